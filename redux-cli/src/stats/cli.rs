use clap::{Command, arg};

pub const STATS_CMD: &str = "stats";

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .about("Per-kit coverage (against the reference coverage) and call totals.")
        .arg(arg!(--json "Emit both tables as JSON"))
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output path (default: stdout)"),
        )
}
