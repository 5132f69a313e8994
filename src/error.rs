//! Error types for filemate operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for node tree and packer operations
#[derive(Debug)]
pub enum TreeError {
	/// A name or path lookup found nothing
	NotFound { what: String },

	/// The root entity is not a directory, or an operation would move the root
	InvalidRoot { path: PathBuf },

	/// Attempt to attach a node that already has a parent
	AlreadyAttached { name: String },

	/// Attempt to attach a node below one of its own descendants
	Cycle { name: String },

	/// Operation needs the node's parent but the node has none
	Detached { name: String },

	/// Children can only be attached to directories
	NotADirectory { name: String },

	/// The root entity could not be classified
	Entry(EntryError),

	/// Saved tree could not be read or written
	Persistence(PersistError),
}

impl TreeError {
	pub(crate) fn not_found(what: impl Into<String>) -> Self {
		TreeError::NotFound { what: what.into() }
	}

	/// True for lookup failures
	pub fn is_not_found(&self) -> bool {
		matches!(self, TreeError::NotFound { .. })
	}
}

impl fmt::Display for TreeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TreeError::NotFound { what } => write!(f, "Not found: {}", what),
			TreeError::InvalidRoot { path } => {
				write!(f, "Invalid root {}: not a directory or not movable", path.display())
			}
			TreeError::AlreadyAttached { name } => {
				write!(f, "Node '{}' is already attached to a parent", name)
			}
			TreeError::Cycle { name } => {
				write!(f, "Cannot attach '{}' below its own descendant", name)
			}
			TreeError::Detached { name } => write!(f, "Node '{}' has no parent", name),
			TreeError::NotADirectory { name } => write!(f, "Node '{}' is not a directory", name),
			TreeError::Entry(e) => write!(f, "Entry error: {}", e),
			TreeError::Persistence(e) => write!(f, "Persistence error: {}", e),
		}
	}
}

impl Error for TreeError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			TreeError::Persistence(e) => Some(e),
			TreeError::Entry(e) => Some(e),
			_ => None,
		}
	}
}

impl From<EntryError> for TreeError {
	fn from(e: EntryError) -> Self {
		TreeError::Entry(e)
	}
}

impl From<PersistError> for TreeError {
	fn from(e: PersistError) -> Self {
		TreeError::Persistence(e)
	}
}

/// Saved tree errors
#[derive(Debug)]
pub enum PersistError {
	/// Failed to read the save file
	ReadFailed { path: PathBuf, source: io::Error },

	/// Failed to write the save file
	WriteFailed { path: PathBuf, source: io::Error },

	/// Save file exists but does not hold a tree
	Corrupted { path: PathBuf, message: String },
}

impl fmt::Display for PersistError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PersistError::ReadFailed { path, source } => {
				write!(f, "Failed to read {}: {}", path.display(), source)
			}
			PersistError::WriteFailed { path, source } => {
				write!(f, "Failed to write {}: {}", path.display(), source)
			}
			PersistError::Corrupted { path, message } => {
				write!(f, "Saved tree {} is corrupted: {}", path.display(), message)
			}
		}
	}
}

impl Error for PersistError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			PersistError::ReadFailed { source, .. } | PersistError::WriteFailed { source, .. } => {
				Some(source)
			}
			PersistError::Corrupted { .. } => None,
		}
	}
}

/// Failure to classify or enumerate a single filesystem entry.
///
/// The build walk never escalates these: the entry is skipped and logged.
#[derive(Debug)]
pub enum EntryError {
	/// Metadata could not be read (vanished, permission denied, broken link)
	Metadata { path: PathBuf, source: io::Error },

	/// Directory listing failed
	ReadDir { path: PathBuf, source: io::Error },

	/// Path has no usable final component (e.g. `/` or `..`)
	InvalidName { path: PathBuf },
}

impl EntryError {
	pub fn path(&self) -> &PathBuf {
		match self {
			EntryError::Metadata { path, .. }
			| EntryError::ReadDir { path, .. }
			| EntryError::InvalidName { path } => path,
		}
	}
}

impl fmt::Display for EntryError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntryError::Metadata { path, source } => {
				write!(f, "Cannot stat {}: {}", path.display(), source)
			}
			EntryError::ReadDir { path, source } => {
				write!(f, "Cannot list {}: {}", path.display(), source)
			}
			EntryError::InvalidName { path } => {
				write!(f, "Path {} has no file name", path.display())
			}
		}
	}
}

impl Error for EntryError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			EntryError::Metadata { source, .. } | EntryError::ReadDir { source, .. } => Some(source),
			EntryError::InvalidName { .. } => None,
		}
	}
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
	/// Config file could not be read
	Read { path: PathBuf, source: io::Error },

	/// Config file could not be parsed
	Parse { path: PathBuf, message: String },

	/// Exclude pattern is not a valid glob
	InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigError::Read { path, source } => {
				write!(f, "Failed to read config {}: {}", path.display(), source)
			}
			ConfigError::Parse { path, message } => {
				write!(f, "Failed to parse config {}: {}", path.display(), message)
			}
			ConfigError::InvalidPattern { pattern, message } => {
				write!(f, "Invalid exclude pattern '{}': {}", pattern, message)
			}
		}
	}
}

impl Error for ConfigError {}


// vim: ts=4
