//! # filemate - structural filesystem mirrors
//!
//! filemate keeps an in-memory mirror of a directory tree (names, sizes,
//! kinds and hierarchy, never file contents) and reconciles two such
//! mirrors under an override, merge or replace policy.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filemate::{Context, NodeTreeStore, PackPolicy, Packer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ctx = Context::default();
//!
//!     let mut source = NodeTreeStore::from_path("./incoming")?;
//!     source.build(&mut ctx)?;
//!     let mut destination = NodeTreeStore::from_path("./library")?;
//!     destination.build(&mut ctx)?;
//!
//!     let report = Packer::new(&source, &mut destination, PackPolicy::Merge).pack_all()?;
//!     println!("{} subtrees added", report.grafted);
//!     destination.save(&ctx)?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod logging;
pub mod packer;
pub mod tree;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use context::Context;
pub use entry::FsEntry;
pub use error::{ConfigError, EntryError, PersistError, TreeError};
pub use packer::{PackPolicy, PackReport, Packer};
pub use tree::{BuildReport, NodeId, NodeRecord, NodeTreeStore, SavedTree, TreeNode};
pub use types::{NodeData, NodeKind};

// vim: ts=4
