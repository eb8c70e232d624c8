use std::io::Write;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use redux_calls::DatasetStatistics;
use redux_calls::statistics::{CallStatistics, CoverageStatistics};

use crate::common::{load, open_output};

#[derive(Serialize)]
struct StatsOutput {
    coverage: Vec<CoverageStatistics>,
    calls: Vec<CallStatistics>,
}

pub fn run_stats(matches: &ArgMatches) -> Result<()> {
    let (_config, dataset, _diagnostics) = load(matches)?;

    let output = StatsOutput {
        coverage: dataset.coverage_statistics(),
        calls: dataset.call_statistics(),
    };

    let mut writer = open_output(matches.get_one::<String>("output"))?;
    if matches.get_flag("json") {
        serde_json::to_writer_pretty(&mut writer, &output)
            .context("Failed to serialize statistics")?;
        writeln!(writer)?;
    } else {
        for line in output.coverage.iter() {
            writeln!(writer, "{}", line)?;
        }
        for line in output.calls.iter() {
            writeln!(writer, "{}", line)?;
        }
    }
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
