//! `cliques`: enumerate every maximal clique of an edge-list graph with
//! at least `k_min` nodes, one clique per line on stdout, and report
//! the count on stderr.

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser as _;

use clique_percolation::cli::{CliquesArgs, CliquesConfig};
use clique_percolation::cliques::enumerate_cliques;
use clique_percolation::loader::load_edge_list;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliquesArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cliques: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliquesArgs) -> clique_percolation::Result<()> {
    let config = CliquesConfig::try_from(args)?;
    let loaded = load_edge_list(&config.edge_list, config.string_ids)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    enumerate_cliques(&loaded.graph, config.k_min, |members| {
        count += 1;
        let line = members
            .iter()
            .map(|&id| loaded.names.resolve(id))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    })?;

    eprintln!("{count}");
    Ok(())
}
