//! Build cache for directory walks
//!
//! Remembers the direct children built for a directory so a later build in
//! the same session can reuse them. Entries hold one level only and are keyed
//! by the directory path. They are trusted while
//! - they are younger than the TTL, and
//! - the directory's current listing has the same fingerprint.
//!
//! A fingerprint says nothing about deeper levels, so the walk still visits
//! every child directory and checks its own entry. The cache stores results,
//! not target nodes: a hit copies the records into whatever node is being
//! built.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, UNIX_EPOCH};

use crate::entry::FsEntry;
use crate::tree::NodeRecord;

/// blake3 digest of a one-level directory listing
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
	/// Hash names, kinds, sizes and mtimes of `entries` in order
	pub fn of_listing<'a>(entries: impl IntoIterator<Item = &'a FsEntry>) -> Self {
		let mut hasher = blake3::Hasher::new();
		for entry in entries {
			hasher.update(entry.name().as_bytes());
			hasher.update(&[0]);
			hasher.update(if entry.is_directory() { b"D" } else { b"F" });
			hasher.update(&entry.size().unwrap_or(0).to_le_bytes());
			let mtime = entry
				.modified()
				.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
				.unwrap_or_default();
			hasher.update(&mtime.as_secs().to_le_bytes());
			hasher.update(&mtime.subsec_nanos().to_le_bytes());
		}
		Fingerprint(*hasher.finalize().as_bytes())
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", hex::encode(&self.0[..8]))
	}
}

#[derive(Debug, Clone)]
struct CacheEntry {
	fingerprint: Fingerprint,
	built_at: Instant,
	children: Vec<NodeRecord>,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
	pub hits: usize,
	pub misses: usize,
	pub stale: usize,
}

/// Session-scoped cache of directory listings turned into node records
#[derive(Debug)]
pub struct BuildCache {
	ttl: Duration,
	entries: HashMap<PathBuf, CacheEntry>,
	stats: CacheStats,
}

impl BuildCache {
	/// A TTL of zero disables caching
	pub fn new(ttl: Duration) -> Self {
		BuildCache { ttl, entries: HashMap::new(), stats: CacheStats::default() }
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn is_enabled(&self) -> bool {
		!self.ttl.is_zero()
	}

	/// Cached children of `dir`, if fresh and built from the same listing
	pub fn lookup(&mut self, dir: &Path, fingerprint: Fingerprint) -> Option<&[NodeRecord]> {
		if !self.is_enabled() {
			return None;
		}

		let fresh = match self.entries.get(dir) {
			None => {
				self.stats.misses += 1;
				return None;
			}
			Some(entry) => {
				entry.built_at.elapsed() < self.ttl && entry.fingerprint == fingerprint
			}
		};

		if !fresh {
			self.stats.stale += 1;
			self.entries.remove(dir);
			return None;
		}

		self.stats.hits += 1;
		self.entries.get(dir).map(|entry| entry.children.as_slice())
	}

	pub fn insert(&mut self, dir: &Path, fingerprint: Fingerprint, children: Vec<NodeRecord>) {
		if !self.is_enabled() {
			return;
		}
		self.entries.insert(
			dir.to_path_buf(),
			CacheEntry { fingerprint, built_at: Instant::now(), children },
		);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn stats(&self) -> CacheStats {
		self.stats
	}
}


// vim: ts=4
