//! Session context
//!
//! A `Context` is created at the start of a session and handed to every store
//! and packer call that needs the build cache, the configuration or the
//! session's log span. Dropping it ends the session and its cache.

use tracing::Span;
use uuid::Uuid;

use crate::cache::BuildCache;
use crate::config::{Config, Exclusions};
use crate::error::ConfigError;
use crate::logging::info_span;

pub struct Context {
	id: Uuid,
	config: Config,
	exclusions: Exclusions,
	cache: BuildCache,
	span: Span,
}

impl Context {
	pub fn new(config: Config) -> Result<Self, ConfigError> {
		let id = Uuid::new_v4();
		let exclusions = config.exclusions()?;
		let cache = BuildCache::new(config.cache_ttl());
		let span = info_span!("session", id = %id);
		Ok(Context { id, config, exclusions, cache, span })
	}

	pub fn id(&self) -> Uuid {
		self.id
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn exclusions(&self) -> &Exclusions {
		&self.exclusions
	}

	pub fn cache(&self) -> &BuildCache {
		&self.cache
	}

	pub fn cache_mut(&mut self) -> &mut BuildCache {
		&mut self.cache
	}

	pub fn span(&self) -> &Span {
		&self.span
	}
}

impl Default for Context {
	fn default() -> Self {
		let config = Config::default();
		let id = Uuid::new_v4();
		let cache = BuildCache::new(config.cache_ttl());
		let span = info_span!("session", id = %id);
		Context { id, config, exclusions: Exclusions::none(), cache, span }
	}
}


// vim: ts=4
