use clap::{value_parser, Arg, ArgAction, Command};
use std::error::Error;
use std::path::{Path, PathBuf};

use filemate::logging::{self, info};
use filemate::{Config, Context, FsEntry, NodeTreeStore, PackPolicy, Packer};

///////////////////////
// Utility functions //
///////////////////////

/// Restore a saved tree for `path` when asked and fresh enough, build otherwise
fn load_or_build(
	path: &Path,
	restore: bool,
	ctx: &mut Context,
) -> Result<NodeTreeStore, Box<dyn Error>> {
	let entry = FsEntry::from_path(path)?;
	let max_age = ctx.config().max_age();

	if restore && NodeTreeStore::check_saved(entry.name(), max_age, ctx) {
		match NodeTreeStore::restore(entry.name(), ctx) {
			Ok(store) => return Ok(store),
			Err(e) => info!("Saved tree unusable ({}), rebuilding", e),
		}
	}

	let mut store = NodeTreeStore::new(entry)?;
	store.build(ctx)?;
	Ok(store)
}

fn cli() -> Command {
	Command::new("filemate")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Mirror directory trees and pack one into another")
		.arg(Arg::new("path").required(true).help("Root directory"))
		.arg(
			Arg::new("tree")
				.short('t')
				.long("tree")
				.action(ArgAction::SetTrue)
				.help("Build (or restore) the node tree"),
		)
		.arg(
			Arg::new("show-tree")
				.short('s')
				.long("show-tree")
				.action(ArgAction::SetTrue)
				.help("Print the node tree"),
		)
		.arg(
			Arg::new("save")
				.long("save")
				.action(ArgAction::SetTrue)
				.help("Save built trees for later runs"),
		)
		.arg(
			Arg::new("restore")
				.short('r')
				.long("restore")
				.action(ArgAction::SetTrue)
				.help("Use saved trees when present (see --max-age)"),
		)
		.arg(
			Arg::new("max-age")
				.long("max-age")
				.value_name("SECS")
				.value_parser(value_parser!(u64))
				.help("Only trust saved trees younger than this"),
		)
		.arg(
			Arg::new("export")
				.long("export")
				.value_name("FILE")
				.help("Write the tree as JSON"),
		)
		.arg(
			Arg::new("pack")
				.long("pack")
				.value_name("DEST")
				.help("Pack the tree into the tree of DEST"),
		)
		.arg(
			Arg::new("override")
				.long("override")
				.action(ArgAction::SetTrue)
				.conflicts_with("merge")
				.help("Pack with the override policy"),
		)
		.arg(
			Arg::new("merge")
				.long("merge")
				.action(ArgAction::SetTrue)
				.help("Pack with the merge policy (default: replace)"),
		)
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.help("Config file (.toml or .json)"),
		)
		.arg(
			Arg::new("no-cache")
				.long("no-cache")
				.action(ArgAction::SetTrue)
				.help("Disable the build cache"),
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.action(ArgAction::SetTrue)
				.help("Debug output"),
		)
}

fn main() -> Result<(), Box<dyn Error>> {
	let matches = cli().get_matches();
	logging::init_tracing(matches.get_flag("verbose"));

	let mut config = match matches.get_one::<String>("config") {
		Some(file) => Config::load(Path::new(file))?,
		None => Config::default(),
	};
	if let Some(secs) = matches.get_one::<u64>("max-age") {
		config.max_age_secs = Some(*secs);
	}
	if matches.get_flag("no-cache") {
		config.cache_ttl_secs = 0;
	}
	let mut ctx = Context::new(config)?;

	let path = PathBuf::from(matches.get_one::<String>("path").ok_or("path argument required")?);
	let restore = matches.get_flag("restore");
	let save = matches.get_flag("save");
	let show = matches.get_flag("show-tree");
	let export = matches.get_one::<String>("export");
	let pack = matches.get_one::<String>("pack");

	let wanted = matches.get_flag("tree") || restore || show || save;
	if !(wanted || export.is_some() || pack.is_some()) {
		return Err("nothing to do: pass --tree, --show-tree, --save, --export or --pack".into());
	}

	let store = load_or_build(&path, restore, &mut ctx)?;
	if save {
		store.save(&ctx)?;
	}
	if let Some(file) = export {
		std::fs::write(file, store.to_json(ctx.config().indent)?)?;
		info!("Exported tree {} to {}", store.name(), file);
	}

	match pack {
		Some(dest) => {
			let policy =
				PackPolicy::from_flags(matches.get_flag("override"), matches.get_flag("merge"));
			let mut destination = load_or_build(Path::new(dest), restore, &mut ctx)?;
			Packer::new(&store, &mut destination, policy).pack_all()?;
			if save {
				destination.save(&ctx)?;
			}
			if show {
				destination.show();
			}
		}
		None => {
			if show {
				store.show();
			}
		}
	}

	Ok(())
}

// vim: ts=4
