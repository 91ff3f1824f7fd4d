//! Command-line entrypoint.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::process::ExitCode;

use champ_graph::cli::{self, Cli};
use champ_graph::init_logging;
use clap::Parser;

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(&cli.log_level);

	let stdout = std::io::stdout();
	match cli::run(cli, &mut stdout.lock()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("champ-graph: {e}");
			ExitCode::FAILURE
		}
	}
}
