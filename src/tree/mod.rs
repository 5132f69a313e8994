//! Node tree store
//!
//! A `NodeTreeStore` owns one mirror tree of a filesystem subtree. Nodes live
//! in an arena and refer to each other through `NodeId` handles, so parent
//! links are plain index lookups. Detached nodes stay in the arena with their
//! own descendants and can be attached again.
//!
//! Building, persistence and display live in the submodules; this module
//! holds the structure itself: search, attach/detach and export/import.

mod build;
mod display;
mod node;
mod persist;
mod record;

pub use build::BuildReport;
pub use node::{NodeId, TreeNode};
pub use record::{NodeRecord, SavedTree};

use std::path::{Component, Path, PathBuf};

use crate::entry::FsEntry;
use crate::error::TreeError;
use crate::types::NodeData;
use crate::util::normalize_path;

pub struct NodeTreeStore {
	nodes: Vec<TreeNode>,
	root: NodeId,
	origin: PathBuf,
	entry: Option<FsEntry>,
}

impl NodeTreeStore {
	/// Bind a store to a root directory. Nothing is walked until `build`.
	pub fn new(entry: FsEntry) -> Result<Self, TreeError> {
		if !entry.is_directory() {
			return Err(TreeError::InvalidRoot { path: entry.path().to_path_buf() });
		}
		let mut store = Self::with_root(entry.to_node_data(), entry.path().to_path_buf());
		store.entry = Some(entry);
		Ok(store)
	}

	/// Classify `path` and bind a store to it
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TreeError> {
		Self::new(FsEntry::from_path(path)?)
	}

	fn with_root(data: NodeData, origin: PathBuf) -> Self {
		NodeTreeStore {
			nodes: vec![TreeNode::new(data)],
			root: NodeId(0),
			origin,
			entry: None,
		}
	}

	/// Drop every node but a fresh root
	fn reset(&mut self) {
		let data = self.nodes[self.root.0].data();
		self.nodes.clear();
		self.nodes.push(TreeNode::new(data));
		self.root = NodeId(0);
	}

	// ------------------------------------------------------------------
	// Accessors
	// ------------------------------------------------------------------

	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Name of the root node; keys the save file
	pub fn name(&self) -> &str {
		self.nodes[self.root.0].name()
	}

	/// Absolute filesystem path the root mirrors
	pub fn origin(&self) -> &Path {
		&self.origin
	}

	/// Root entity the store was bound to, if it came from the filesystem
	pub fn entry(&self) -> Option<&FsEntry> {
		self.entry.as_ref()
	}

	/// Look up a node.
	///
	/// # Panics
	/// If `id` was issued by a different store.
	pub fn node(&self, id: NodeId) -> &TreeNode {
		&self.nodes[id.0]
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.nodes[id.0].children()
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].parent()
	}

	/// First direct child of `parent` called `name`
	pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
		self.children(parent).iter().copied().find(|&c| self.nodes[c.0].name() == name)
	}

	/// Nodes reachable from the root, root included
	pub fn len(&self) -> usize {
		self.descendants(self.root).len()
	}

	/// A store always holds at least its root
	pub fn is_empty(&self) -> bool {
		false
	}

	/// True when `id` hangs below the root (or is the root)
	pub fn is_attached(&self, id: NodeId) -> bool {
		let mut current = id;
		loop {
			if current == self.root {
				return true;
			}
			match self.nodes[current.0].parent {
				Some(parent) => current = parent,
				None => return false,
			}
		}
	}

	/// `id` and everything below it, in pre-order
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![id];
		while let Some(current) = stack.pop() {
			out.push(current);
			stack.extend(self.nodes[current.0].children.iter().rev().copied());
		}
		out
	}

	// ------------------------------------------------------------------
	// Search
	// ------------------------------------------------------------------

	/// Pre-order search from the root; the first node called `name` wins
	pub fn search_by_name(&self, name: &str) -> Option<NodeId> {
		let mut stack = vec![self.root];
		while let Some(current) = stack.pop() {
			let node = &self.nodes[current.0];
			if node.name() == name {
				return Some(current);
			}
			stack.extend(node.children.iter().rev().copied());
		}
		None
	}

	/// Resolve a filesystem path to a node.
	///
	/// Relative paths are taken relative to the origin. The path is
	/// normalized, must lie under the origin, and is then matched one
	/// component per level.
	pub fn search_by_path(&self, path: impl AsRef<Path>) -> Option<NodeId> {
		let full = normalize_path(path.as_ref(), &self.origin);
		let rel = full.strip_prefix(&self.origin).ok()?;

		let mut current = self.root;
		for component in rel.components() {
			let name = match component {
				Component::Normal(name) => name.to_string_lossy(),
				_ => return None,
			};
			current = self.child_by_name(current, &name)?;
		}
		Some(current)
	}

	/// Absolute path of an attached node; `None` once detached
	pub fn path_of(&self, id: NodeId) -> Option<PathBuf> {
		let mut names = Vec::new();
		let mut current = id;
		while current != self.root {
			let node = self.nodes.get(current.0)?;
			names.push(node.name());
			current = node.parent?;
		}
		let mut path = self.origin.clone();
		for name in names.iter().rev() {
			path.push(name);
		}
		Some(path)
	}

	// ------------------------------------------------------------------
	// Structural mutation
	// ------------------------------------------------------------------

	/// Create a node from `data` and append it under `parent`
	pub fn create(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, TreeError> {
		self.ensure_directory(parent)?;
		let id = NodeId(self.nodes.len());
		let mut node = TreeNode::new(data);
		node.parent = Some(parent);
		self.nodes.push(node);
		self.nodes[parent.0].children.push(id);
		Ok(id)
	}

	/// Append a new shallow node under the node at `parent_path`.
	///
	/// Only the node itself is created; callers needing descendants use
	/// [`NodeTreeStore::graft`].
	pub fn add_node(
		&mut self,
		parent_path: impl AsRef<Path>,
		data: NodeData,
	) -> Result<NodeId, TreeError> {
		let parent_path = parent_path.as_ref();
		let parent = self.search_by_path(parent_path).ok_or_else(|| {
			TreeError::not_found(format!("parent {}", parent_path.display()))
		})?;
		self.create(parent, data)
	}

	/// Detach the node at `path` and return its handle
	pub fn remove_node(&mut self, path: impl AsRef<Path>) -> Result<NodeId, TreeError> {
		let path = path.as_ref();
		let id = self
			.search_by_path(path)
			.ok_or_else(|| TreeError::not_found(format!("path {}", path.display())))?;
		self.detach(id)?;
		Ok(id)
	}

	/// Unlink `id` from its parent. The node keeps its own children.
	pub fn detach(&mut self, id: NodeId) -> Result<(), TreeError> {
		if id == self.root {
			return Err(TreeError::InvalidRoot { path: self.origin.clone() });
		}
		let parent = match self.nodes[id.0].parent.take() {
			Some(parent) => parent,
			None => return Err(TreeError::Detached { name: self.nodes[id.0].name().to_string() }),
		};
		self.nodes[parent.0].children.retain(|&c| c != id);
		Ok(())
	}

	/// Re-link a detached node (and its subtree) under `parent`
	pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
		let name = self.nodes[child.0].name().to_string();
		if child == self.root {
			return Err(TreeError::InvalidRoot { path: self.origin.clone() });
		}
		if self.nodes[child.0].parent.is_some() {
			return Err(TreeError::AlreadyAttached { name });
		}
		self.ensure_directory(parent)?;

		let mut up = Some(parent);
		while let Some(current) = up {
			if current == child {
				return Err(TreeError::Cycle { name });
			}
			up = self.nodes[current.0].parent;
		}

		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
		Ok(())
	}

	/// Deep-copy `record` under `parent`; returns the new subtree root
	pub fn graft(&mut self, parent: NodeId, record: &NodeRecord) -> Result<NodeId, TreeError> {
		let top = self.create(parent, record.data())?;
		let mut pending: Vec<(NodeId, &NodeRecord)> = vec![(top, record)];
		while let Some((id, rec)) = pending.pop() {
			for child in &rec.children {
				let child_id = self.push_linked(id, child.data());
				pending.push((child_id, child));
			}
		}
		Ok(top)
	}

	/// Link without the directory check: imported records are taken as-is
	fn push_linked(&mut self, parent: NodeId, data: NodeData) -> NodeId {
		let id = NodeId(self.nodes.len());
		let mut node = TreeNode::new(data);
		node.parent = Some(parent);
		self.nodes.push(node);
		self.nodes[parent.0].children.push(id);
		id
	}

	fn ensure_directory(&self, id: NodeId) -> Result<(), TreeError> {
		let node = &self.nodes[id.0];
		if !node.is_directory() {
			return Err(TreeError::NotADirectory { name: node.name().to_string() });
		}
		Ok(())
	}

	// ------------------------------------------------------------------
	// Export / import
	// ------------------------------------------------------------------

	/// Full structural dump of the tree
	pub fn export(&self) -> NodeRecord {
		self.export_subtree(self.root)
	}

	/// Structural dump of the subtree at `id`
	pub fn export_subtree(&self, id: NodeId) -> NodeRecord {
		let node = &self.nodes[id.0];
		NodeRecord {
			name: node.name().to_string(),
			size: node.size(),
			kind: node.kind(),
			children: node.children.iter().map(|&c| self.export_subtree(c)).collect(),
		}
	}

	/// Rebuild a store from a dump. `origin` anchors path lookups.
	pub fn import(record: &NodeRecord, origin: impl Into<PathBuf>) -> Self {
		let mut store = Self::with_root(record.data(), origin.into());
		let root = store.root;
		let mut pending: Vec<(NodeId, &NodeRecord)> = vec![(root, record)];
		while let Some((id, rec)) = pending.pop() {
			for child in &rec.children {
				let child_id = store.push_linked(id, child.data());
				pending.push((child_id, child));
			}
		}
		store
	}

	/// Export rendered as indented JSON
	pub fn to_json(&self, indent: usize) -> Result<String, serde_json::Error> {
		record::to_json_indented(&self.export(), indent)
	}
}

impl std::fmt::Debug for NodeTreeStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NodeTreeStore")
			.field("name", &self.name())
			.field("origin", &self.origin)
			.field("nodes", &self.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::NodeKind;

	/// /data/A/{x.txt(10), sub/{y.txt(5)}, docs/{x.txt(3)}}
	fn sample() -> NodeTreeStore {
		let record = NodeRecord {
			name: "A".into(),
			size: None,
			kind: NodeKind::Directory,
			children: vec![
				NodeRecord::leaf(NodeData::file("x.txt", 10)),
				NodeRecord {
					name: "sub".into(),
					size: None,
					kind: NodeKind::Directory,
					children: vec![NodeRecord::leaf(NodeData::file("y.txt", 5))],
				},
				NodeRecord {
					name: "docs".into(),
					size: None,
					kind: NodeKind::Directory,
					children: vec![NodeRecord::leaf(NodeData::file("x.txt", 3))],
				},
			],
		};
		NodeTreeStore::import(&record, "/data/A")
	}

	#[test]
	fn test_import_preserves_order() {
		let store = sample();
		assert_eq!(store.name(), "A");
		assert_eq!(store.len(), 6);
		let names: Vec<&str> =
			store.children(store.root()).iter().map(|&c| store.node(c).name()).collect();
		assert_eq!(names, vec!["x.txt", "sub", "docs"]);
	}

	#[test]
	fn test_search_by_name_preorder() {
		let store = sample();
		let hit = store.search_by_name("x.txt").unwrap();
		// the top-level file comes before docs/x.txt in pre-order
		assert_eq!(store.node(hit).size(), Some(10));
		assert_eq!(store.search_by_name("A"), Some(store.root()));
		assert!(store.search_by_name("missing").is_none());
	}

	#[test]
	fn test_search_by_path_forms() {
		let store = sample();
		let y = store.search_by_path("/data/A/sub/y.txt").unwrap();
		assert_eq!(store.node(y).size(), Some(5));
		assert_eq!(store.search_by_path("sub/y.txt"), Some(y));
		assert_eq!(store.search_by_path("/data/A/sub/../sub/./y.txt"), Some(y));
		assert_eq!(store.search_by_path("/data/A"), Some(store.root()));
		assert_eq!(store.search_by_path("."), Some(store.root()));
		assert!(store.search_by_path("/data/A/sub/z.txt").is_none());
		assert!(store.search_by_path("/elsewhere/sub").is_none());
		assert!(store.search_by_path("/data/A/x.txt/deeper").is_none());
	}

	#[test]
	fn test_path_of_inverts_search() {
		let store = sample();
		for id in store.descendants(store.root()) {
			let path = store.path_of(id).unwrap();
			assert_eq!(store.search_by_path(&path), Some(id), "{}", path.display());
		}
	}

	#[test]
	fn test_add_and_remove() {
		let mut store = sample();
		let id = store.add_node("/data/A/sub", NodeData::file("z.txt", 1)).unwrap();
		assert_eq!(store.path_of(id).unwrap(), PathBuf::from("/data/A/sub/z.txt"));

		let err = store.add_node("/data/A/nope", NodeData::file("z.txt", 1)).unwrap_err();
		assert!(err.is_not_found());

		let err = store.add_node("/data/A/x.txt", NodeData::file("z.txt", 1)).unwrap_err();
		assert!(matches!(err, TreeError::NotADirectory { .. }));

		let removed = store.remove_node("/data/A/sub").unwrap();
		assert!(store.search_by_path("/data/A/sub/z.txt").is_none());
		assert!(!store.is_attached(removed));
		assert!(store.path_of(removed).is_none());
		// the orphan keeps its own children
		assert_eq!(store.children(removed).len(), 2);

		assert!(store.remove_node("/data/A/sub").unwrap_err().is_not_found());
	}

	#[test]
	fn test_detach_then_attach_restores_membership() {
		let mut store = sample();
		let root = store.root();
		let before: Vec<NodeId> = store.children(root).to_vec();

		let sub = store.remove_node("/data/A/sub").unwrap();
		assert_eq!(store.children(root).len(), 2);
		store.attach(root, sub).unwrap();

		let mut after = store.children(root).to_vec();
		assert_eq!(*after.last().unwrap(), sub);
		after.sort();
		let mut expected = before;
		expected.sort();
		assert_eq!(after, expected);
		assert!(store.search_by_path("/data/A/sub/y.txt").is_some());
	}

	#[test]
	fn test_attach_guards() {
		let mut store = sample();
		let root = store.root();
		let sub = store.search_by_path("sub").unwrap();
		let docs = store.search_by_path("docs").unwrap();

		assert!(matches!(store.attach(docs, sub), Err(TreeError::AlreadyAttached { .. })));
		assert!(matches!(store.detach(root), Err(TreeError::InvalidRoot { .. })));

		store.detach(docs).unwrap();
		assert!(matches!(store.detach(docs), Err(TreeError::Detached { .. })));

		// docs below its own former child is a cycle
		let inner = store.create(docs, NodeData::directory("inner")).unwrap();
		store.detach(docs).unwrap_err();
		assert!(matches!(store.attach(inner, docs), Err(TreeError::Cycle { .. })));
		store.attach(sub, docs).unwrap();
		assert!(store.search_by_path("sub/docs/inner").is_some());
	}

	#[test]
	fn test_graft_copies_subtree() {
		let mut store = sample();
		let other = sample();
		let sub = other.search_by_path("sub").unwrap();
		let record = other.export_subtree(sub);

		let docs = store.search_by_path("docs").unwrap();
		let grafted = store.graft(docs, &record).unwrap();
		assert_eq!(store.export_subtree(grafted), record);
		assert!(store.search_by_path("docs/sub/y.txt").is_some());
	}

	#[test]
	fn test_export_import_round_trip() {
		let store = sample();
		let record = store.export();
		let again = NodeTreeStore::import(&record, store.origin());
		assert_eq!(again.export(), record);
		assert_eq!(again.len(), store.len());
	}

	#[test]
	fn test_to_json_four_space_indent() {
		let store = sample();
		let json = store.to_json(4).unwrap();
		assert!(json.starts_with("{\n    \"name\": \"A\""));
	}
}

// vim: ts=4
