use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduxError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Malformed line: expected at least {expected} fields, found {found}")]
    MalformedLine { expected: usize, found: usize },

    #[error("Error parsing position: {0}")]
    PositionParseError(String),

    #[error("Inverted range: start {start} is past end {end}")]
    InvertedRange { start: u32, end: u32 },

    #[error("No companion file for kit: {0}")]
    MissingCompanion(String),

    #[error("Clade range for {child} is not contained in the range of its parent {parent}")]
    RangeNotContained { child: String, parent: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unknown SNP name: {0}")]
    UnknownSnpName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReduxError>;
