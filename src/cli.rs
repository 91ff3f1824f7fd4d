//! Command-line surface: list assets, seed, validate, reformat and summarize
//! graph documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use crate::assets::AssetCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::schema::{self, EdgeFilter, Graph, GraphView};

/// Node/edge graph documents for the champion relationship viewer.
#[derive(Parser, Debug)]
#[command(name = "champ-graph", version, about)]
pub struct Cli {
	/// Configuration file (defaults to ./champ-graph.toml when present).
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
	#[arg(long, value_name = "LEVEL", default_value = "info")]
	pub log_level: String,

	/// Subcommand to run.
	#[command(subcommand)]
	pub command: Command,
}

/// What to do.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List image assets.
	Assets {
		/// Directory to scan instead of `assets.dir`.
		dir: Option<PathBuf>,
	},
	/// Write a graph with one node per image asset.
	Seed {
		/// Directory to scan instead of `assets.dir`.
		dir: Option<PathBuf>,
		/// Write here instead of stdout.
		#[arg(short, long, value_name = "FILE")]
		output: Option<PathBuf>,
	},
	/// Check a graph document and print its warnings.
	Validate {
		/// Graph document to check.
		file: PathBuf,
	},
	/// Validate a graph document and re-emit it in canonical form.
	Fmt {
		/// Graph document to reformat.
		file: PathBuf,
		/// Write here instead of stdout.
		#[arg(short, long, value_name = "FILE")]
		output: Option<PathBuf>,
		/// Single-line output regardless of `schema.pretty`.
		#[arg(long)]
		compact: bool,
	},
	/// Print node, edge and degree counts for one view.
	Stats {
		/// Graph document to summarize.
		file: PathBuf,
		/// Edge type to show, or "all".
		#[arg(long, default_value = "all")]
		view: String,
	},
}

/// Execute `cli`, writing human-facing output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
	let config = Config::load(cli.config.as_deref())?;

	match cli.command {
		Command::Assets { dir } => {
			let dir = dir.unwrap_or_else(|| config.assets.dir.clone());
			let catalog = AssetCatalog::scan(&dir, &config.assets.extensions)?;
			for asset in &catalog.assets {
				writeln!(out, "{}", asset.file_name)?;
			}
		}
		Command::Seed { dir, output } => {
			let mut settings = config.assets.clone();
			if let Some(dir) = dir {
				settings.dir = dir;
			}
			let catalog = AssetCatalog::scan(&settings.dir, &settings.extensions)?;
			let graph = catalog.seed_graph(&settings, &config.schema.fallback_image)?;
			emit(&graph, config.schema.pretty, output.as_deref(), out)?;
		}
		Command::Validate { file } => {
			let graph = load_graph(&file)?;
			for warning in graph.lint() {
				writeln!(out, "warning: {warning}")?;
			}
			writeln!(
				out,
				"ok: {} nodes, {} edges",
				graph.nodes.len(),
				graph.edges.len()
			)?;
		}
		Command::Fmt {
			file,
			output,
			compact,
		} => {
			let graph = load_graph(&file)?;
			emit(&graph, config.schema.pretty && !compact, output.as_deref(), out)?;
		}
		Command::Stats { file, view } => {
			let graph = load_graph(&file)?;
			let filter: EdgeFilter = view.parse()?;
			let default_kind = config.schema.default_edge_type.as_str();
			let stats = GraphView::new(&graph, &filter, default_kind).stats();
			writeln!(out, "view: {view}")?;
			writeln!(out, "nodes: {}", stats.nodes)?;
			writeln!(out, "edges: {}", stats.edges)?;
			writeln!(out, "max degree: {}", stats.max_degree)?;
			writeln!(out, "avg degree: {:.1}", stats.avg_degree)?;
			let kinds: Vec<String> = graph
				.edge_kind_counts(default_kind)
				.into_iter()
				.map(|(kind, count)| format!("{kind} ({count})"))
				.collect();
			writeln!(out, "types: {}", kinds.join(", "))?;
		}
	}
	Ok(())
}

/// Read, parse and validate a graph document.
fn load_graph(path: &Path) -> Result<Graph> {
	let text = fs::read_to_string(path)?;
	let graph = schema::deserialize(&text)?;
	graph.validate()?;
	info!(
		"loaded {}: {} nodes, {} edges",
		path.display(),
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

fn emit(graph: &Graph, pretty: bool, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
	let text = if pretty {
		schema::serialize_pretty(graph)?
	} else {
		schema::serialize(graph)?
	};
	match output {
		Some(path) => {
			fs::write(path, format!("{text}\n"))?;
			info!("wrote {} nodes to {}", graph.nodes.len(), path.display());
		}
		None => writeln!(out, "{text}")?,
	}
	Ok(())
}
