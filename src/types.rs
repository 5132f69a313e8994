//! Shared value types for node trees

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a filesystem entry as mirrored in a node tree
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	File,
	Directory,
}

impl NodeKind {
	pub fn is_directory(self) -> bool {
		matches!(self, NodeKind::Directory)
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeKind::File => write!(f, "file"),
			NodeKind::Directory => write!(f, "directory"),
		}
	}
}

/// Shallow payload of a tree node: everything but its links.
///
/// Attaching `NodeData` never brings descendants along.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NodeData {
	pub name: String,
	pub size: Option<u64>,
	pub kind: NodeKind,
}

impl NodeData {
	pub fn file(name: impl Into<String>, size: u64) -> Self {
		NodeData { name: name.into(), size: Some(size), kind: NodeKind::File }
	}

	pub fn directory(name: impl Into<String>) -> Self {
		NodeData { name: name.into(), size: None, kind: NodeKind::Directory }
	}
}

// vim: ts=4
