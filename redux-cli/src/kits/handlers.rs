use std::io::{self, Write};

use anyhow::Result;
use clap::ArgMatches;

use redux_core::Diagnostics;
use redux_io::discover_kits;

use crate::common::resolve_config;

pub fn run_kits(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let mut diagnostics = Diagnostics::new();
    let kits = discover_kits(&config.data_dir, &mut diagnostics)?;
    diagnostics.report(redux_core::Phase::Discovery);

    let show_bed = matches.get_flag("bed");
    let mut out = io::stdout().lock();
    for kit in kits.iter() {
        match (&kit.coverage_path, show_bed) {
            (Some(path), true) => writeln!(out, "{}", path.display())?,
            _ => writeln!(out, "{}", kit.name)?,
        }
    }

    Ok(())
}
