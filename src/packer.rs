//! Tree synchronization ("packing")
//!
//! A `Packer` reconciles a destination tree against a source tree. Each step
//! looks at one `(source, destination)` node pair and, depending on the
//! policy, either unions two directories or replaces the destination node.
//!
//! Replacing is shallow: only the source node itself is copied, never its
//! descendants. Only a directory replaced by a directory is detached; in
//! every other case the copy is added next to the destination node. Whole
//! source subtrees are only copied when a directory union finds a child
//! missing on the destination side.

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;
use crate::logging::*;
use crate::tree::{NodeId, NodeTreeStore};
use crate::util::is_hidden;

/// How conflicting destination nodes are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackPolicy {
	/// Union directories, recursing through the generic dispatch
	Override,

	/// Union directories, recursing through the merge step
	Merge,

	/// Swap the destination node for a shallow copy of the source node
	#[default]
	Replace,
}

impl PackPolicy {
	/// Override wins when both flags are set; neither means replace
	pub fn from_flags(override_flag: bool, merge_flag: bool) -> Self {
		if override_flag {
			PackPolicy::Override
		} else if merge_flag {
			PackPolicy::Merge
		} else {
			PackPolicy::Replace
		}
	}
}

impl FromStr for PackPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"override" => Ok(Self::Override),
			"merge" => Ok(Self::Merge),
			"replace" => Ok(Self::Replace),
			_ => Err(format!("Unknown pack policy: {}. Valid options: override, merge, replace", s)),
		}
	}
}

impl fmt::Display for PackPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Override => write!(f, "override"),
			Self::Merge => write!(f, "merge"),
			Self::Replace => write!(f, "replace"),
		}
	}
}

/// What a pack run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackReport {
	/// Replace actions: shallow source copies attached in the destination
	pub replaced: usize,
	/// Source subtrees copied whole because the destination lacked them
	pub grafted: usize,
	/// Directory pairs unioned
	pub merged: usize,
	/// Pairs without a destination node (no action)
	pub absent: usize,
	/// First-level children whose reconciliation failed
	pub failed: usize,
}

/// Entry point of a directory union's recursion
#[derive(Clone, Copy)]
enum Recurse {
	Dispatch,
	Merge,
}

pub struct Packer<'a> {
	source: &'a NodeTreeStore,
	destination: &'a mut NodeTreeStore,
	policy: PackPolicy,
	report: PackReport,
}

impl<'a> Packer<'a> {
	pub fn new(
		source: &'a NodeTreeStore,
		destination: &'a mut NodeTreeStore,
		policy: PackPolicy,
	) -> Self {
		Packer { source, destination, policy, report: PackReport::default() }
	}

	pub fn policy(&self) -> PackPolicy {
		self.policy
	}

	pub fn report(&self) -> PackReport {
		self.report
	}

	/// Reconcile every first-level child of the source root.
	///
	/// Each child is matched by name anywhere in the destination. Children
	/// with no match are copied whole under the destination root. A failing
	/// child is logged and counted; the remaining children still run.
	pub fn pack_all(&mut self) -> Result<PackReport, TreeError> {
		let source = self.source;
		info!(
			"Packing {} into {} ({})",
			source.origin().display(),
			self.destination.origin().display(),
			self.policy
		);

		for &child in source.children(source.root()) {
			let name = source.node(child).name();
			let result = match self.destination.search_by_name(name) {
				Some(dst) => self.pack(child, Some(dst)),
				None => {
					let root = self.destination.root();
					self.graft(child, root)
				}
			};
			if let Err(e) = result {
				warn!("Skipping {}: {}", name, e);
				self.report.failed += 1;
			}
		}

		let report = self.report;
		info!(
			"Packed: {} replaced, {} grafted, {} merged directories, {} failed",
			report.replaced, report.grafted, report.merged, report.failed
		);
		Ok(report)
	}

	/// Reconcile one pair. Without a destination node nothing happens.
	pub fn pack(&mut self, src: NodeId, dst: Option<NodeId>) -> Result<(), TreeError> {
		let dst = match dst {
			Some(dst) => dst,
			None => {
				self.report.absent += 1;
				return Ok(());
			}
		};

		match self.policy {
			PackPolicy::Override => self.override_node(src, dst),
			PackPolicy::Merge => self.merge_node(src, dst),
			PackPolicy::Replace => self.replace_node(src, dst),
		}
	}

	fn override_node(&mut self, src: NodeId, dst: NodeId) -> Result<(), TreeError> {
		if self.both_directories(src, dst) {
			self.union_directory(src, dst, Recurse::Dispatch)
		} else {
			self.replace_node(src, dst)
		}
	}

	fn merge_node(&mut self, src: NodeId, dst: NodeId) -> Result<(), TreeError> {
		if self.both_directories(src, dst) {
			self.union_directory(src, dst, Recurse::Merge)
		} else {
			self.replace_node(src, dst)
		}
	}

	/// Add what `dst` lacks, reconcile what both have. Nothing is deleted
	/// from `dst`, which is why override and merge end up identical.
	fn union_directory(
		&mut self,
		src: NodeId,
		dst: NodeId,
		recurse: Recurse,
	) -> Result<(), TreeError> {
		let source = self.source;
		debug!("Union {} into {}", source.node(src).name(), self.destination.node(dst).name());

		for &child in source.children(src) {
			let name = source.node(child).name();
			if is_hidden(name) {
				continue;
			}
			match self.destination.child_by_name(dst, name) {
				Some(dst_child) => match recurse {
					Recurse::Dispatch => self.pack(child, Some(dst_child))?,
					Recurse::Merge => self.merge_node(child, dst_child)?,
				},
				None => self.graft(child, dst)?,
			}
		}
		self.report.merged += 1;
		Ok(())
	}

	/// Put a childless copy of `src` under the parent of `dst`.
	///
	/// A destination directory facing a source directory is detached first.
	/// Any other pair keeps `dst` and gains the copy as a sibling.
	fn replace_node(&mut self, src: NodeId, dst: NodeId) -> Result<(), TreeError> {
		let parent = match self.destination.parent(dst) {
			Some(parent) => parent,
			None => {
				return Err(TreeError::Detached {
					name: self.destination.node(dst).name().to_string(),
				})
			}
		};

		let data = self.source.node(src).data();
		if self.both_directories(src, dst) {
			debug!("Replace directory {}", data.name);
			self.destination.detach(dst)?;
		} else {
			debug!("Add {} ({}) next to the existing node", data.name, data.kind);
		}
		self.destination.create(parent, data)?;
		self.report.replaced += 1;
		Ok(())
	}

	fn graft(&mut self, src: NodeId, parent: NodeId) -> Result<(), TreeError> {
		let record = self.source.export_subtree(src);
		debug!("Add {} ({} nodes)", record.name, record.count());
		self.destination.graft(parent, &record)?;
		self.report.grafted += 1;
		Ok(())
	}

	fn both_directories(&self, src: NodeId, dst: NodeId) -> bool {
		self.source.node(src).is_directory() && self.destination.node(dst).is_directory()
	}
}

impl fmt::Display for Packer<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Packer: Source={}, Destination={}",
			self.source.origin().display(),
			self.destination.origin().display()
		)
	}
}


// vim: ts=4
