//! champ-graph: node/edge record schema for champion relationship graphs.
//!
//! This crate defines the data contract a graph viewer loads: typed node and
//! edge records, graph-level integrity checks, the canonical JSON wire form,
//! and a small CLI for seeding nodes from image assets and checking documents.

use log::debug;
use tracing_subscriber::EnvFilter;

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod schema;

pub use config::Config;
pub use error::{Error, Result};
pub use schema::{Edge, Graph, Node, Shape, Weight};

/// Initialize logging to stderr. `RUST_LOG` wins over `level` when set.
///
/// Library code logs through the `log` facade; the subscriber picks those
/// records up as well.
pub fn init_logging(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
	debug!("champ-graph: logging initialized");
}
