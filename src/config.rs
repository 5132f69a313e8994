//! Configuration for node tree sessions
//!
//! The configuration follows a priority chain:
//! 1. Built-in defaults (`Config::default()`)
//! 2. Config file (`.toml`, or `.json`/`.json5`)
//! 3. CLI flags (highest priority, applied by the binary)

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Directory holding saved trees, relative to the working directory
pub const DEFAULT_NODETREE_DIR: &str = "__nodetree__";

/// How long a built directory stays trustworthy in the build cache
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Indentation of saved tree files
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Where `save`/`restore` keep `<name>.json` files
	pub nodetree_dir: PathBuf,

	/// Build cache time-to-live in seconds (0 disables the cache)
	pub cache_ttl_secs: u64,

	/// Mirror dot-files too
	pub include_hidden: bool,

	/// Glob patterns of entries left out of built trees (e.g. "*.tmp", "node_modules")
	pub exclude_patterns: Vec<String>,

	/// Spaces per indentation level in saved tree files
	pub indent: usize,

	/// Saved trees older than this are rebuilt by the CLI (`None` trusts any age)
	pub max_age_secs: Option<u64>,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			nodetree_dir: PathBuf::from(DEFAULT_NODETREE_DIR),
			cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
			include_hidden: false,
			exclude_patterns: Vec::new(),
			indent: DEFAULT_INDENT,
			max_age_secs: None,
		}
	}
}

impl Config {
	/// Load a config file, picking the format from its extension.
	///
	/// Missing keys keep their defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)
			.map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

		let is_toml = path.extension().map(|ext| ext == "toml").unwrap_or(false);
		let parsed: Result<Config, String> = if is_toml {
			toml::from_str(&contents).map_err(|e| e.to_string())
		} else {
			json5::from_str(&contents).map_err(|e| e.to_string())
		};

		let config =
			parsed.map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })?;
		config.exclusions()?;
		Ok(config)
	}

	pub fn cache_ttl(&self) -> Duration {
		Duration::from_secs(self.cache_ttl_secs)
	}

	pub fn max_age(&self) -> Option<Duration> {
		self.max_age_secs.map(Duration::from_secs)
	}

	/// Compile the exclude patterns
	pub fn exclusions(&self) -> Result<Exclusions, ConfigError> {
		Exclusions::new(&self.exclude_patterns)
	}
}

/// Compiled exclude patterns
#[derive(Debug, Clone)]
pub struct Exclusions {
	set: Option<GlobSet>,
}

impl Exclusions {
	pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
		if patterns.is_empty() {
			return Ok(Exclusions { set: None });
		}

		let mut builder = GlobSetBuilder::new();
		for pattern in patterns {
			let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
				pattern: pattern.clone(),
				message: e.to_string(),
			})?;
			builder.add(glob);
		}
		let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
			pattern: patterns.join(","),
			message: e.to_string(),
		})?;
		Ok(Exclusions { set: Some(set) })
	}

	pub fn none() -> Self {
		Exclusions { set: None }
	}

	/// Match against the path relative to the tree root and against the bare name
	pub fn is_excluded(&self, rel_path: &Path) -> bool {
		match &self.set {
			Some(set) => {
				set.is_match(rel_path)
					|| rel_path.file_name().map(|name| set.is_match(name)).unwrap_or(false)
			}
			None => false,
		}
	}
}


// vim: ts=4
