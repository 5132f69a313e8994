//! Saving and restoring node trees
//!
//! Saved trees live in `<nodetree_dir>/<name>.json`, one file per root name.
//! The file is the nested root record (`name`, `size`, `kind`, `children`)
//! with one extra top-level `origin` key holding the path the tree mirrors.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::record::{to_json_indented, SavedTree};
use super::NodeTreeStore;
use crate::context::Context;
use crate::error::{PersistError, TreeError};
use crate::logging::*;

/// Location of the save file for `name`
pub fn saved_tree_path(nodetree_dir: &Path, name: &str) -> PathBuf {
	nodetree_dir.join(format!("{}.json", name))
}

impl NodeTreeStore {
	/// Write the tree to its save file, replacing any earlier save
	pub fn save(&self, ctx: &Context) -> Result<PathBuf, TreeError> {
		let _session = ctx.span().enter();
		let dir = &ctx.config().nodetree_dir;
		let path = saved_tree_path(dir, self.name());

		fs::create_dir_all(dir)
			.map_err(|source| PersistError::WriteFailed { path: dir.clone(), source })?;

		let saved = SavedTree { origin: self.origin.clone(), tree: self.export() };
		let json = to_json_indented(&saved, ctx.config().indent).map_err(|e| {
			PersistError::Corrupted { path: path.clone(), message: e.to_string() }
		})?;

		// Write next to the target and rename so readers never see half a file
		let tmp = path.with_extension("json.tmp");
		fs::write(&tmp, json)
			.map_err(|source| PersistError::WriteFailed { path: tmp.clone(), source })?;
		fs::rename(&tmp, &path)
			.map_err(|source| PersistError::WriteFailed { path: path.clone(), source })?;

		info!("Saved tree {} to {}", self.name(), path.display());
		Ok(path)
	}

	/// Load the tree saved under `name`
	pub fn restore(name: &str, ctx: &Context) -> Result<Self, TreeError> {
		let _session = ctx.span().enter();
		let path = saved_tree_path(&ctx.config().nodetree_dir, name);
		if !path.is_file() {
			return Err(TreeError::not_found(format!("saved tree {}", path.display())));
		}

		let contents = fs::read_to_string(&path)
			.map_err(|source| PersistError::ReadFailed { path: path.clone(), source })?;
		let saved: SavedTree = serde_json::from_str(&contents)
			.map_err(|e| PersistError::Corrupted { path: path.clone(), message: e.to_string() })?;

		let store = NodeTreeStore::import(&saved.tree, saved.origin);
		info!("Restored tree {} ({} nodes) from {}", name, store.len(), path.display());
		Ok(store)
	}

	/// Does a save exist for `name`, and is it younger than `max_age`?
	///
	/// With `max_age` of `None` any existing save passes.
	pub fn check_saved(name: &str, max_age: Option<Duration>, ctx: &Context) -> bool {
		let path = saved_tree_path(&ctx.config().nodetree_dir, name);
		let meta = match fs::metadata(&path) {
			Ok(meta) if meta.is_file() => meta,
			_ => return false,
		};

		let max_age = match max_age {
			Some(max_age) => max_age,
			None => return true,
		};

		let modified = match meta.modified() {
			Ok(modified) => modified,
			Err(e) => {
				warn!("Cannot read mtime of {}: {}", path.display(), e);
				return false;
			}
		};
		// mtime in the future counts as age zero
		let age = SystemTime::now().duration_since(modified).unwrap_or(Duration::ZERO);
		age < max_age
	}
}


// vim: ts=4
