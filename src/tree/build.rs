//! Building a node tree from the filesystem

use std::path::Path;

use super::{NodeId, NodeRecord, NodeTreeStore};
use crate::cache::Fingerprint;
use crate::context::Context;
use crate::entry::FsEntry;
use crate::error::TreeError;
use crate::logging::*;
use crate::types::NodeData;

/// What a build did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
	/// Nodes created below the root
	pub created: usize,
	/// Entries skipped because they could not be read
	pub skipped: usize,
	/// Entries left out by exclude patterns
	pub excluded: usize,
	/// Directories whose listing was served from the build cache
	pub cache_hits: usize,
}

impl NodeTreeStore {
	/// Walk the root directory and mirror it.
	///
	/// Any previous content is discarded, so handles issued before the call
	/// are stale afterwards. Unreadable entries are skipped with a warning;
	/// the walk itself only fails when the root cannot be classified.
	pub fn build(&mut self, ctx: &mut Context) -> Result<BuildReport, TreeError> {
		let _session = ctx.span().clone().entered();

		let entry = match self.entry.take() {
			Some(entry) => entry,
			None => FsEntry::from_path(&self.origin)?,
		};
		if !entry.is_directory() {
			return Err(TreeError::InvalidRoot { path: entry.path().to_path_buf() });
		}

		info!("Building tree for {}", entry.path().display());
		self.reset();

		let mut report = BuildReport::default();
		let root = self.root;
		self.build_dir(&entry, root, Path::new(""), ctx, &mut report);
		self.entry = Some(entry);

		info!(
			"Built tree {}: {} nodes, {} skipped, {} excluded, {} cached directories",
			self.name(),
			report.created + 1,
			report.skipped,
			report.excluded,
			report.cache_hits
		);
		Ok(report)
	}

	fn build_dir(
		&mut self,
		dir: &FsEntry,
		target: NodeId,
		rel: &Path,
		ctx: &mut Context,
		report: &mut BuildReport,
	) {
		let listing =
			if ctx.config().include_hidden { dir.all_children() } else { dir.children() };
		let listing = match listing {
			Ok(listing) => listing,
			Err(e) => {
				warn!("Skipping contents of {}: {}", dir.path().display(), e);
				report.skipped += 1;
				return;
			}
		};

		let mut entries = Vec::with_capacity(listing.len());
		for item in listing {
			match item {
				Ok(entry) => {
					if ctx.exclusions().is_excluded(&rel.join(entry.name())) {
						debug!("Excluded {}", entry.path().display());
						report.excluded += 1;
					} else {
						entries.push(entry);
					}
				}
				Err(e) => {
					warn!("Skipping node {}: {}", e.path().display(), e);
					report.skipped += 1;
				}
			}
		}

		// A hit only vouches for this one level. Child directories are still
		// visited so their own listings are checked.
		let fingerprint = Fingerprint::of_listing(&entries);
		let cached = ctx.cache_mut().lookup(dir.path(), fingerprint).map(<[NodeRecord]>::to_vec);
		let layer: Vec<NodeData> = match cached {
			Some(records) if records.len() == entries.len() => {
				debug!("Cache hit for {} ({})", dir.path().display(), fingerprint);
				report.cache_hits += 1;
				records.iter().map(NodeRecord::data).collect()
			}
			_ => {
				let layer: Vec<NodeData> = entries.iter().map(FsEntry::to_node_data).collect();
				let records = layer.iter().cloned().map(NodeRecord::leaf).collect();
				ctx.cache_mut().insert(dir.path(), fingerprint, records);
				layer
			}
		};

		for (entry, data) in entries.iter().zip(layer) {
			let child = match self.create(target, data) {
				Ok(child) => child,
				Err(e) => {
					warn!("Skipping node {}: {}", entry.path().display(), e);
					report.skipped += 1;
					continue;
				}
			};
			report.created += 1;

			if entry.is_directory() {
				if entry.is_symlink() {
					debug!("Not following symlinked directory {}", entry.path().display());
					continue;
				}
				self.build_dir(entry, child, &rel.join(entry.name()), ctx, report);
			}
		}
	}
}


// vim: ts=4
