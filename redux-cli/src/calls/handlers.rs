use std::io::Write;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use redux_calls::CallMatrixBuilder;

use crate::common::{load, open_output};

pub fn run_calls(matches: &ArgMatches) -> Result<()> {
    let (_config, dataset, diagnostics) = load(matches)?;

    let matrix = CallMatrixBuilder::new(&dataset)
        .build()
        .context("Failed to build the call matrix")?;

    let mut writer = open_output(matches.get_one::<String>("output"))?;
    matrix
        .write_to(&mut writer)
        .context("Failed to write the call matrix")?;
    writer.flush().context("Failed to flush output")?;

    info!(
        "Wrote {} rows for {} kits ({} input problems skipped)",
        matrix.rows.len(),
        dataset.kits.len(),
        diagnostics.len()
    );
    Ok(())
}
