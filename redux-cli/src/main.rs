mod calls;
mod common;
mod kits;
mod mergeup;
mod query;
mod stats;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "redux";
    pub const BIN_NAME: &str = "redux";
}

fn build_parser() -> Command {
    let cmd = Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Reduce per-kit Y-chromosome coverage and calls into a single call matrix, and find clades that can merge into their parents.")
        .subcommand_required(true)
        .subcommand(calls::cli::create_calls_cli())
        .subcommand(stats::cli::create_stats_cli())
        .subcommand(mergeup::cli::create_mergeup_cli())
        .subcommand(kits::cli::create_kits_cli())
        .subcommand(query::cli::create_query_cli());

    common::with_global_args(cmd)
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    // global args land on the subcommand's matches
    if let Some((_, sub)) = matches.subcommand() {
        common::init_verbose(sub);
    }

    match matches.subcommand() {
        //
        // CALL MATRIX
        //
        Some((calls::cli::CALLS_CMD, matches)) => {
            calls::handlers::run_calls(matches)?;
        }

        //
        // PER-KIT STATISTICS
        //
        Some((stats::cli::STATS_CMD, matches)) => {
            stats::handlers::run_stats(matches)?;
        }

        //
        // CLADE MERGE-UP
        //
        Some((mergeup::cli::MERGEUP_CMD, matches)) => {
            mergeup::handlers::run_mergeup(matches)?;
        }

        //
        // KIT LISTING
        //
        Some((kits::cli::KITS_CMD, matches)) => {
            kits::handlers::run_kits(matches)?;
        }

        //
        // VARIANT QUERY
        //
        Some((query::cli::QUERY_CMD, matches)) => {
            query::handlers::run_query(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
