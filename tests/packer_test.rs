//! Packing one tree into another under each policy

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use filemate::{
	Config, Context, NodeData, NodeKind, NodeRecord, NodeTreeStore, PackPolicy, PackReport, Packer,
};

// ============================================================================
// Helper Functions for Test Setup
// ============================================================================

fn dir(name: &str, children: Vec<NodeRecord>) -> NodeRecord {
	NodeRecord { name: name.into(), size: None, kind: NodeKind::Directory, children }
}

fn file(name: &str, size: u64) -> NodeRecord {
	NodeRecord::leaf(NodeData::file(name, size))
}

/// Lay `record` out on disk below `base`, file sizes as byte counts
fn materialize(base: &Path, record: &NodeRecord) -> PathBuf {
	let path = base.join(&record.name);
	match record.kind {
		NodeKind::Directory => {
			fs::create_dir_all(&path).unwrap();
			for child in &record.children {
				materialize(&path, child);
			}
		}
		NodeKind::File => {
			fs::write(&path, vec![0u8; record.size.unwrap_or(0) as usize]).unwrap();
		}
	}
	path
}

fn pack(source: &NodeRecord, destination: &NodeRecord, policy: PackPolicy) -> NodeRecord {
	let source = NodeTreeStore::import(source, "/src/A");
	let mut destination = NodeTreeStore::import(destination, "/dst/A");
	Packer::new(&source, &mut destination, policy).pack_all().unwrap();
	destination.export()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_override_on_disk_trees() {
	let tmp = TempDir::new().unwrap();
	let src_tree = dir("A", vec![file("x.txt", 10), dir("sub", vec![file("y.txt", 5)])]);
	let src_root = materialize(&tmp.path().join("src"), &src_tree);
	let dst_root = materialize(&tmp.path().join("dst"), &dir("A", vec![file("x.txt", 1)]));

	let mut ctx = Context::new(Config { cache_ttl_secs: 0, ..Config::default() }).unwrap();
	let mut source = NodeTreeStore::from_path(&src_root).unwrap();
	source.build(&mut ctx).unwrap();
	let mut destination = NodeTreeStore::from_path(&dst_root).unwrap();
	destination.build(&mut ctx).unwrap();

	let report =
		Packer::new(&source, &mut destination, PackPolicy::Override).pack_all().unwrap();

	assert_eq!(report, PackReport { replaced: 1, grafted: 1, ..PackReport::default() });
	// sub was missing and is grafted whole; the new x.txt joins the old one
	assert_eq!(
		destination.export(),
		dir(
			"A",
			vec![file("x.txt", 1), dir("sub", vec![file("y.txt", 5)]), file("x.txt", 10)]
		)
	);
	let y = destination.search_by_path(dst_root.join("sub/y.txt")).unwrap();
	assert_eq!(destination.node(y).size(), Some(5));
	let x = destination.search_by_path(dst_root.join("x.txt")).unwrap();
	assert_eq!(destination.node(x).size(), Some(1));
	// the filesystem itself is never touched
	assert_eq!(fs::metadata(dst_root.join("x.txt")).unwrap().len(), 1);
	assert!(!dst_root.join("sub").exists());
}

#[test]
fn test_replace_attaches_shallow_copy() {
	let source = dir("A", vec![dir("sub", vec![file("y.txt", 5), dir("deep", vec![])])]);
	let destination = dir("A", vec![dir("sub", vec![file("z.txt", 2)]), file("keep", 1)]);

	let packed = pack(&source, &destination, PackPolicy::Replace);

	assert_eq!(packed, dir("A", vec![file("keep", 1), dir("sub", vec![])]));
}

#[test]
fn test_override_and_merge_agree_on_directories() {
	let source = dir(
		"A",
		vec![
			dir("music", vec![file("a.mp3", 30), dir("live", vec![file("b.mp3", 40)])]),
			dir("new", vec![file("n", 1)]),
			file("readme", 9),
		],
	);
	let destination = dir(
		"A",
		vec![
			dir("music", vec![file("a.mp3", 3), file("only-here.mp3", 4), dir("live", vec![])]),
			file("readme", 2),
		],
	);

	let overridden = pack(&source, &destination, PackPolicy::Override);
	let merged = pack(&source, &destination, PackPolicy::Merge);
	assert_eq!(overridden, merged);

	// destination-only children survive both
	let music = overridden.children.iter().find(|c| c.name == "music").unwrap();
	assert!(music.children.iter().any(|c| c.name == "only-here.mp3"));
	let live = music.children.iter().find(|c| c.name == "live").unwrap();
	assert_eq!(live.children, vec![file("b.mp3", 40)]);
}

#[test]
fn test_pack_all_matches_by_name_anywhere() {
	// "photos" sits one level down in the destination and is still found
	let source = dir("A", vec![dir("photos", vec![file("p1.jpg", 11)])]);
	let destination = dir("A", vec![dir("media", vec![dir("photos", vec![file("p0.jpg", 7)])])]);

	let packed = pack(&source, &destination, PackPolicy::Merge);
	let photos = dir("photos", vec![file("p0.jpg", 7), file("p1.jpg", 11)]);
	assert_eq!(packed, dir("A", vec![dir("media", vec![photos])]));
}

#[test]
fn test_pack_into_empty_destination_copies_everything() {
	let source = dir("A", vec![dir("a", vec![file("1", 1)]), file("b", 2)]);
	let packed = pack(&source, &dir("A", vec![]), PackPolicy::Replace);
	assert_eq!(packed, source);
}

#[test]
fn test_pack_all_continues_after_failure() {
	// the destination root is named like a source child and cannot be replaced
	let source = NodeTreeStore::import(&dir("A", vec![file("A", 1), file("b", 2)]), "/src/A");
	let mut destination = NodeTreeStore::import(&dir("A", vec![]), "/dst/A");

	let report =
		Packer::new(&source, &mut destination, PackPolicy::Replace).pack_all().unwrap();
	assert_eq!(report.failed, 1);
	assert_eq!(report.grafted, 1);
	assert_eq!(destination.export(), dir("A", vec![file("b", 2)]));
}

// vim: ts=4
