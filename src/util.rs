//! Path helpers

use std::path::{Component, Path, PathBuf};

/// Hidden entries are dot-files, as on Unix
pub fn is_hidden(name: &str) -> bool {
	name.starts_with('.')
}

/// Make `path` absolute (relative paths are joined onto `base`) and resolve
/// `.` and `..` lexically, without touching the filesystem.
pub fn normalize_path(path: &Path, base: &Path) -> PathBuf {
	let joined = if path.is_absolute() { path.to_path_buf() } else { base.join(path) };

	let mut out = PathBuf::new();
	for component in joined.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				// `..` above the root stays at the root
				if out.parent().is_some() {
					out.pop();
				}
			}
			other => out.push(other.as_os_str()),
		}
	}
	out
}

/// Absolute form of `path` relative to the current directory.
///
/// Falls back to the path as given when the current directory is unknown.
pub fn absolute_path(path: &Path) -> PathBuf {
	match std::env::current_dir() {
		Ok(cwd) => normalize_path(path, &cwd),
		Err(_) => path.to_path_buf(),
	}
}


// vim: ts=4
