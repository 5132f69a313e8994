//! Text rendering of node trees

use std::fmt::{self, Write as _};

use super::{NodeId, NodeTreeStore};

impl NodeTreeStore {
	/// Box-drawing rendering, one node per line, files with their size
	pub fn render(&self) -> String {
		let mut out = String::new();
		// writing into a String cannot fail
		let _ = self.write_tree(&mut out);
		out
	}

	/// Print the tree to stdout
	pub fn show(&self) {
		print!("{}", self.render());
	}

	fn write_tree(&self, out: &mut String) -> fmt::Result {
		writeln!(out, "{}", self.label(self.root))?;
		let mut prefix = String::new();
		self.write_children(self.root, &mut prefix, out)
	}

	fn write_children(&self, id: NodeId, prefix: &mut String, out: &mut String) -> fmt::Result {
		let children = self.children(id);
		for (i, &child) in children.iter().enumerate() {
			let last = i + 1 == children.len();
			writeln!(out, "{}{}{}", prefix, if last { "└── " } else { "├── " }, self.label(child))?;

			let len = prefix.len();
			prefix.push_str(if last { "    " } else { "│   " });
			self.write_children(child, prefix, out)?;
			prefix.truncate(len);
		}
		Ok(())
	}

	fn label(&self, id: NodeId) -> String {
		let node = self.node(id);
		match node.size() {
			Some(size) if !node.is_directory() => format!("{} ({} B)", node.name(), size),
			_ => node.name().to_string(),
		}
	}
}

impl fmt::Display for NodeTreeStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tree::NodeRecord;
	use crate::types::{NodeData, NodeKind};

	#[test]
	fn test_render() {
		let record = NodeRecord {
			name: "A".into(),
			size: None,
			kind: NodeKind::Directory,
			children: vec![
				NodeRecord {
					name: "sub".into(),
					size: None,
					kind: NodeKind::Directory,
					children: vec![NodeRecord::leaf(NodeData::file("y.txt", 5))],
				},
				NodeRecord::leaf(NodeData::file("x.txt", 10)),
			],
		};
		let store = NodeTreeStore::import(&record, "/data/A");
		let expected = "A\n├── sub\n│   └── y.txt (5 B)\n└── x.txt (10 B)\n";
		assert_eq!(store.render(), expected);
		assert_eq!(store.to_string(), expected);
	}
}

// vim: ts=4
