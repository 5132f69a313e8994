//! Serializable form of node trees

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{NodeData, NodeKind};

/// Nested, order-preserving dump of a subtree
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
	pub name: String,
	pub size: Option<u64>,
	pub kind: NodeKind,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<NodeRecord>,
}

impl NodeRecord {
	pub fn leaf(data: NodeData) -> Self {
		NodeRecord { name: data.name, size: data.size, kind: data.kind, children: Vec::new() }
	}

	pub fn data(&self) -> NodeData {
		NodeData { name: self.name.clone(), size: self.size, kind: self.kind }
	}

	/// Number of nodes in this subtree, itself included
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(NodeRecord::count).sum::<usize>()
	}
}

/// On-disk form of a saved tree: the root record with its origin beside it
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SavedTree {
	/// Absolute path the tree was built from
	pub origin: PathBuf,
	#[serde(flatten)]
	pub tree: NodeRecord,
}

/// Pretty JSON with `indent` spaces per level
pub(crate) fn to_json_indented<T: Serialize>(
	value: &T,
	indent: usize,
) -> Result<String, serde_json::Error> {
	let indent = " ".repeat(indent);
	let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
	let mut buf = Vec::new();
	let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
	value.serialize(&mut ser)?;
	String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_json_shape() {
		let record = NodeRecord {
			name: "A".into(),
			size: None,
			kind: NodeKind::Directory,
			children: vec![NodeRecord::leaf(NodeData::file("x.txt", 10))],
		};
		let json = to_json_indented(&record, 4).unwrap();
		assert!(json.contains("\n    \"name\": \"A\""));
		assert!(json.contains("\"kind\": \"directory\""));
		assert!(json.contains("\"kind\": \"file\""));
		assert_eq!(record.count(), 2);

		let back: NodeRecord = serde_json::from_str(&json).unwrap();
		assert_eq!(back, record);
	}

	#[test]
	fn test_saved_tree_is_flat() {
		let saved = SavedTree {
			origin: PathBuf::from("/data/A"),
			tree: NodeRecord::leaf(NodeData::directory("A")),
		};
		let json = to_json_indented(&saved, 4).unwrap();
		let expected = concat!(
			"{\n",
			"    \"origin\": \"/data/A\",\n",
			"    \"name\": \"A\",\n",
			"    \"size\": null,\n",
			"    \"kind\": \"directory\"\n",
			"}"
		);
		assert_eq!(json, expected);
		let back: SavedTree = serde_json::from_str(&json).unwrap();
		assert_eq!(back, saved);
	}

	#[test]
	fn test_record_children_default() {
		let back: NodeRecord =
			serde_json::from_str(r#"{"name": "x", "size": 3, "kind": "file"}"#).unwrap();
		assert!(back.children.is_empty());
		assert_eq!(back.data(), NodeData::file("x", 3));
	}
}

// vim: ts=4
