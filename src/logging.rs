//! Logging prelude module for convenient access to tracing macros.
//!
//! Re-exports the tracing macros used across the crate and provides the
//! subscriber setup used by the `filemate` binary.
//!
//! # Usage
//!
//! ```ignore
//! use crate::logging::*;
//!
//! info!("Built tree with {} nodes", count);
//! warn!("Skipping unreadable entry");
//! ```

pub use tracing::{debug, error, info, info_span, trace, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// `RUST_LOG` wins when set. Otherwise the default level is `info`, or
/// `debug` when `verbose` is requested:
///
/// ```bash
/// RUST_LOG=debug filemate ./photos --tree
/// RUST_LOG=filemate::tree=trace filemate ./photos --tree --show-tree
/// ```
pub fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
		)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}

// vim: ts=4
