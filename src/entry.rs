//! Filesystem entries as seen by the tree builder
//!
//! `FsEntry` classifies a path into a file or a directory and lists the
//! direct children of directories. It never reads file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::EntryError;
use crate::types::{NodeData, NodeKind};
use crate::util::{absolute_path, is_hidden};

/// Closed set of entry kinds
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryKind {
	File { size: u64 },
	Directory,
}

/// A classified filesystem entry
#[derive(Clone, Debug)]
pub struct FsEntry {
	path: PathBuf,
	name: String,
	kind: EntryKind,
	modified: Option<SystemTime>,
	symlink: bool,
}

impl FsEntry {
	/// Classify `path`. Symlinks are followed.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EntryError> {
		let path = absolute_path(path.as_ref());
		let name = match path.file_name() {
			Some(name) => name.to_string_lossy().into_owned(),
			None => return Err(EntryError::InvalidName { path }),
		};

		let symlink =
			fs::symlink_metadata(&path).map(|m| m.file_type().is_symlink()).unwrap_or(false);
		let meta = match fs::metadata(&path) {
			Ok(meta) => meta,
			Err(source) => return Err(EntryError::Metadata { path, source }),
		};

		let kind = if meta.is_dir() {
			EntryKind::Directory
		} else {
			EntryKind::File { size: meta.len() }
		};

		Ok(FsEntry { path, name, kind, modified: meta.modified().ok(), symlink })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> NodeKind {
		match self.kind {
			EntryKind::File { .. } => NodeKind::File,
			EntryKind::Directory => NodeKind::Directory,
		}
	}

	/// Byte size for files, `None` for directories
	pub fn size(&self) -> Option<u64> {
		match self.kind {
			EntryKind::File { size } => Some(size),
			EntryKind::Directory => None,
		}
	}

	pub fn modified(&self) -> Option<SystemTime> {
		self.modified
	}

	pub fn is_directory(&self) -> bool {
		matches!(self.kind, EntryKind::Directory)
	}

	/// True when the path itself is a symbolic link
	pub fn is_symlink(&self) -> bool {
		self.symlink
	}

	/// Snapshot of the entry as node payload
	pub fn to_node_data(&self) -> NodeData {
		NodeData { name: self.name.clone(), size: self.size(), kind: self.kind() }
	}

	/// One level of non-hidden children, sorted by name.
	///
	/// The outer error means the directory itself could not be listed; an
	/// inner error concerns a single child and leaves its siblings intact.
	pub fn children(&self) -> Result<Vec<Result<FsEntry, EntryError>>, EntryError> {
		self.list(false)
	}

	/// Like [`FsEntry::children`] but keeps dot-files
	pub fn all_children(&self) -> Result<Vec<Result<FsEntry, EntryError>>, EntryError> {
		self.list(true)
	}

	fn list(&self, include_hidden: bool) -> Result<Vec<Result<FsEntry, EntryError>>, EntryError> {
		if !self.is_directory() {
			return Ok(Vec::new());
		}

		let entries = fs::read_dir(&self.path)
			.map_err(|source| EntryError::ReadDir { path: self.path.clone(), source })?;

		let mut named = Vec::new();
		let mut failed = Vec::new();
		for entry in entries {
			match entry {
				Ok(entry) => {
					let name = entry.file_name().to_string_lossy().into_owned();
					if !include_hidden && is_hidden(&name) {
						continue;
					}
					named.push((name, entry.path()));
				}
				Err(source) => {
					failed.push(Err(EntryError::ReadDir { path: self.path.clone(), source }))
				}
			}
		}

		// read_dir order is platform dependent
		named.sort_by(|a, b| a.0.cmp(&b.0));

		let mut out: Vec<Result<FsEntry, EntryError>> =
			named.into_iter().map(|(_, path)| FsEntry::from_path(path)).collect();
		out.extend(failed);
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_classify_file_and_directory() {
		let tmp = TempDir::new().unwrap();
		fs::write(tmp.path().join("a.txt"), b"hello").unwrap();

		let dir = FsEntry::from_path(tmp.path()).unwrap();
		assert!(dir.is_directory());
		assert_eq!(dir.size(), None);
		assert_eq!(dir.kind(), NodeKind::Directory);

		let file = FsEntry::from_path(tmp.path().join("a.txt")).unwrap();
		assert!(!file.is_directory());
		assert_eq!(file.name(), "a.txt");
		assert_eq!(file.size(), Some(5));
		assert_eq!(file.to_node_data(), NodeData::file("a.txt", 5));
	}

	#[test]
	fn test_missing_path() {
		let tmp = TempDir::new().unwrap();
		let err = FsEntry::from_path(tmp.path().join("nope")).unwrap_err();
		assert!(matches!(err, EntryError::Metadata { .. }));
	}

	#[test]
	fn test_children_sorted_and_hidden_filtered() {
		let tmp = TempDir::new().unwrap();
		fs::write(tmp.path().join("b.txt"), b"b").unwrap();
		fs::write(tmp.path().join("a.txt"), b"a").unwrap();
		fs::write(tmp.path().join(".hidden"), b"h").unwrap();
		fs::create_dir(tmp.path().join("c")).unwrap();

		let dir = FsEntry::from_path(tmp.path()).unwrap();
		let names: Vec<String> =
			dir.children().unwrap().into_iter().map(|c| c.unwrap().name().to_string()).collect();
		assert_eq!(names, vec!["a.txt", "b.txt", "c"]);

		let all = dir.all_children().unwrap();
		assert_eq!(all.len(), 4);
	}

	#[test]
	fn test_file_has_no_children() {
		let tmp = TempDir::new().unwrap();
		fs::write(tmp.path().join("a.txt"), b"a").unwrap();
		let file = FsEntry::from_path(tmp.path().join("a.txt")).unwrap();
		assert!(file.children().unwrap().is_empty());
	}
}

// vim: ts=4
