use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::warn;

use redux_clades::{CladeForest, merge_up};
use redux_core::Phase;
use redux_io::load_clades;

use crate::common::load;

pub fn run_mergeup(matches: &ArgMatches) -> Result<()> {
    let (config, mut dataset, mut diagnostics) = load(matches)?;

    let records = load_clades(&config, &mut diagnostics)
        .with_context(|| format!("Failed to read clade tree {}", config.tree.display()))?;
    let forest = CladeForest::from_records(&records, &mut dataset.variants, &mut diagnostics);
    diagnostics.report(Phase::Tree);

    let report = merge_up(&forest, &dataset);
    for failure in report.failures.iter() {
        warn!("{}", failure);
    }

    let mut out = io::stdout().lock();
    for line in report.lines() {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
