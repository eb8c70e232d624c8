use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::ReduxError;
use crate::models::Position;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Strip a trailing `.gz` and then the data extension from a file name,
/// giving the kit name: `N1234.bed.gz` -> `N1234`.
///
pub fn kit_name_from_path(path: &Path) -> Option<String> {
    let filename = path.file_name()?.to_str()?;
    let filename = filename.strip_suffix(".gz").unwrap_or(filename);
    let stem = Path::new(filename).file_stem()?.to_str()?;
    Some(stem.to_string())
}

///
/// Compare a chromosome name against the configured target, treating a
/// missing `chr` prefix as equivalent (`Y` == `chrY`).
///
pub fn is_target_chromosome(chrom: &str, target: &str) -> bool {
    let strip = |c: &str| c.strip_prefix("chr").unwrap_or(c).to_owned();
    strip(chrom) == strip(target)
}

pub fn parse_position(token: &str) -> std::result::Result<Position, ReduxError> {
    token
        .parse::<Position>()
        .map_err(|_| ReduxError::PositionParseError(token.to_string()))
}
