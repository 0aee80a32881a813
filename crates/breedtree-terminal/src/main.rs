use std::sync::Arc;

use breedtree::breeding_tree::ShoppingList;
use breedtree::build_session::BuildSession;
use breedtree::progress::{FileMarkStore, RootProgress};
use breedtree::{DirectObtainMarks, DisplayTreeNode, ProgressRegistry, RecipeDB};

const USAGE: &str = "Usage: breedtree-terminal [options] <command> [args]

Commands:
    search <query>          List recipe names matching the query
    tree <root>             Show the breeding tree and what is still needed
    own <root> <path>       Toggle the owned mark on a tree path
    wild <name>             Toggle the direct-obtain mark on a creature
    lineage <root> <path>   Cycle the lineage tag on a tree path
    meguriai <on|off>       Collapse repeated creatures in trees
    progress                List roots with saved progress
    delete <root>           Delete the progress of a root";

#[tokio::main]
async fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optflag( "v", "verbose",    "Increased verbosity");
		opts.optopt(  "r", "recipes",    "Recipe file to read", "FILE");
		opts.optopt(  "d", "data-dir",   "Directory progress is saved in", "DIR");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	let mut config = breedtree::Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		breedtree::Config::default()
	});

	if let Some(dir) = parsed_options.opt_str("d") {
		config.set_data_dir(dir.into());
	}
	if let Some(path) = parsed_options.opt_str("r") {
		if !config.set_recipe_path(path.clone().into()) {
			log::error!("Recipe file {} does not exist.", path);
			return;
		}
	}

	if parsed_options.free.is_empty() {
		eprintln!("{}", opts.usage(USAGE));
		return;
	}

	if let Err(e) = run(&config, &parsed_options.free).await {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

async fn run(config: &breedtree::Config, free: &[String]) -> Result<(), Error> {
	let arg = |i: usize, what: &'static str| free.get(i).map(String::as_str).ok_or(Error::MissingArgument(what));

	let mut store = FileMarkStore::new(config.mark_store_dir())?;
	let mut registry = ProgressRegistry::load_from_store(&store)?;

	match arg(0, "command")? {
		"search" => {
			let db = RecipeDB::load_from_config(config)?;
			let query = free[1..].join(" ");
			for name in db.search_candidates(&query) {
				println!("{}", name);
			}
			return Ok(());
		},
		"tree" => {
			let db = Arc::new(RecipeDB::load_from_config(config)?);
			let root = arg(1, "root")?;
			if !db.contains(root) {
				log::warn!("{} has no recipe, it is a base creature.", root);
			}
			registry.select_root(root)?;
			show_tree(&registry, db).await?;
		},
		"own" => {
			let root = arg(1, "root")?;
			let path = arg(2, "path")?;
			registry.select_root(root)?;
			let owned = registry.toggle_owned(path)?;
			println!("{} `{}` owned: {}", root, path, owned);
		},
		"wild" => {
			let name = arg(1, "name")?;
			let direct_obtain = registry.toggle_direct_obtain(name);
			println!("{} direct-obtain: {}", name, direct_obtain);
		},
		"lineage" => {
			let root = arg(1, "root")?;
			let path = arg(2, "path")?;
			registry.select_root(root)?;
			let tag = registry.cycle_lineage(path)?;
			println!("{} `{}` lineage: {}", root, path, tag.symbol());
		},
		"meguriai" => {
			let enabled = match arg(1, "on|off")? {
				"on" => true,
				"off" => false,
				other => return Err(Error::InvalidArgument(other.to_string())),
			};
			registry.set_meguriai_enabled(enabled);
			println!("meguriai: {}", if enabled { "on" } else { "off" });
		},
		"progress" => {
			for root in registry.in_progress_roots() {
				println!("{}", root);
			}
			return Ok(());
		},
		"delete" => {
			let root = arg(1, "root")?;
			if !registry.delete_root(root) {
				return Err(breedtree::Error::NotFound(format!("no progress for {}", root)).into());
			}
			println!("Deleted progress for {}", root);
		},
		other => return Err(Error::UnknownCommand(other.to_string())),
	}

	log::debug!("Saving progress.");
	registry.save_to_store(&mut store)?;
	Ok(())
}

async fn show_tree(registry: &ProgressRegistry, db: Arc<RecipeDB>) -> Result<(), Error> {
	let mut session = BuildSession::spawn();
	session.request(registry.build_request(db)?)?;
	let tree = session.next_tree().await?;
	session.shutdown().await;

	let progress = registry.active_progress().cloned().unwrap_or_default();
	let direct_obtain = registry.direct_obtain();

	println!("{} breeding tree", tree.name);
	print_node(&tree, &progress, direct_obtain, 0);
	println!();
	println!("Still needed:");
	println!("{}", ShoppingList::aggregate(&tree, &progress.owned, direct_obtain));
	Ok(())
}

fn print_node(node: &DisplayTreeNode, progress: &RootProgress, direct_obtain: &DirectObtainMarks, depth: usize) {
	let owned = progress.owned.is_owned(&node.path);
	let mut line = format!("{}{}", "  ".repeat(depth), node.name);
	if owned {
		line += &format!(" [owned {}]", progress.lineage.get(&node.path).symbol());
	} else if direct_obtain.is_direct_obtain(&node.name) {
		line += " [wild]";
	}
	println!("{}  ({})", line, node.path);

	for child in &node.children {
		print_node(child, progress, direct_obtain, depth + 1);
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("breedtree error: {0}")]
	Breedtree(#[from] breedtree::Error),
	#[error("build error: {0}")]
	Build(#[from] breedtree::build_session::BuildSessionError),
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	#[error("unknown command: {0}")]
	UnknownCommand(String),
}
