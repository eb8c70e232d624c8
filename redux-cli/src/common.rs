use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};

use redux_core::Diagnostics;
use redux_core::models::Dataset;
use redux_io::{ReduxConfig, load_dataset};

/// Options every subcommand accepts. Paths given here override the config file.
pub fn with_global_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .global(true)
            .help("Path to a YAML config file"),
    )
    .arg(
        Arg::new("data-dir")
            .long("data-dir")
            .global(true)
            .help("Directory with one <kit>.bed and one <kit>.vcf per kit"),
    )
    .arg(
        Arg::new("corrections")
            .long("corrections")
            .global(true)
            .help("Corrections file (^ force-insert, < reference swap)"),
    )
    .arg(
        Arg::new("snp-reference")
            .long("snp-reference")
            .global(true)
            .help("Reference SNP list (CSV)"),
    )
    .arg(
        Arg::new("reference-coverage")
            .long("reference-coverage")
            .global(true)
            .help("Reference coverage BED used by stats"),
    )
    .arg(
        Arg::new("tree")
            .long("tree")
            .global(true)
            .help("Clade tree CSV used by mergeup"),
    )
    .arg(
        Arg::new("chromosome")
            .long("chromosome")
            .global(true)
            .help("Chromosome to keep from coverage and call files"),
    )
    .arg(
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .global(true)
            .action(ArgAction::Count)
            .help("Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)"),
    )
}

pub fn init_verbose(matches: &ArgMatches) {
    let filter_level: LevelFilter = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Config file (if any) with command-line overrides applied.
pub fn resolve_config(matches: &ArgMatches) -> Result<ReduxConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ReduxConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => ReduxConfig::default(),
    };

    let path_override = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);
    if let Some(p) = path_override("data-dir") {
        config.data_dir = p;
    }
    if let Some(p) = path_override("corrections") {
        config.corrections = p;
    }
    if let Some(p) = path_override("snp-reference") {
        config.snp_reference = p;
    }
    if let Some(p) = path_override("reference-coverage") {
        config.reference_coverage = p;
    }
    if let Some(p) = path_override("tree") {
        config.tree = p;
    }
    if let Some(chromosome) = matches.get_one::<String>("chromosome") {
        config.chromosome = chromosome.clone();
    }

    Ok(config)
}

pub fn load(matches: &ArgMatches) -> Result<(ReduxConfig, Dataset, Diagnostics)> {
    let config = resolve_config(matches)?;
    let mut diagnostics = Diagnostics::new();
    let dataset = load_dataset(&config, &mut diagnostics)
        .with_context(|| format!("Failed to load kits from {}", config.data_dir.display()))?;
    Ok((config, dataset, diagnostics))
}

/// Buffered writer to `path`, or stdout when no path is given.
pub fn open_output(path: Option<&String>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file: {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn matches_for(args: &[&str]) -> ArgMatches {
        let cmd = with_global_args(Command::new("redux").subcommand(Command::new("calls")));
        let matches = cmd.try_get_matches_from(args).unwrap();
        matches.subcommand().unwrap().1.clone()
    }

    #[rstest]
    fn test_overrides_apply_over_defaults() {
        let matches = matches_for(&["redux", "calls", "--data-dir", "kits", "--chromosome", "Y"]);
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("kits"));
        assert_eq!(config.chromosome, "Y");
        assert_eq!(config.tree, PathBuf::from("tree.csv"));
    }

    #[rstest]
    fn test_missing_config_file_is_fatal() {
        let matches = matches_for(&["redux", "calls", "--config", "no/such/redux.yaml"]);
        assert!(resolve_config(&matches).is_err());
    }
}
