//! Arena-resident tree nodes

use std::fmt;

use crate::types::{NodeData, NodeKind};

/// Handle of a node inside one `NodeTreeStore`.
///
/// Handles are only meaningful for the store that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A single node of the mirror tree.
///
/// Name, size and kind are fixed at creation; only the links change.
#[derive(Clone, Debug)]
pub struct TreeNode {
	name: String,
	size: Option<u64>,
	kind: NodeKind,
	pub(crate) parent: Option<NodeId>,
	pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
	pub(crate) fn new(data: NodeData) -> Self {
		TreeNode {
			name: data.name,
			size: data.size,
			kind: data.kind,
			parent: None,
			children: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn size(&self) -> Option<u64> {
		self.size
	}

	pub fn kind(&self) -> NodeKind {
		self.kind
	}

	pub fn is_directory(&self) -> bool {
		self.kind.is_directory()
	}

	pub fn parent(&self) -> Option<NodeId> {
		self.parent
	}

	pub fn children(&self) -> &[NodeId] {
		&self.children
	}

	pub fn data(&self) -> NodeData {
		NodeData { name: self.name.clone(), size: self.size, kind: self.kind }
	}
}

// vim: ts=4
