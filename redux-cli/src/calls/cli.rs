use clap::{Command, arg};

pub const CALLS_CMD: &str = "calls";

pub fn create_calls_cli() -> Command {
    Command::new(CALLS_CMD)
        .about("Build the call matrix: one line per retained variant, one cell per kit.")
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output path (default: stdout)"),
        )
}
