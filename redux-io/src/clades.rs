use std::io::Read;

use redux_core::models::Position;
use redux_core::{Diagnostics, Phase, ReduxError};

// min kit, max kit, markers, label
const MIN_KIT_COLUMN: usize = 2;
const MAX_KIT_COLUMN: usize = 3;
const MARKERS_COLUMN: usize = 4;
const LABEL_COLUMN: usize = 6;

/// A defining marker as written in the tree file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerSpec {
    /// a bare position
    Position(Position),
    /// SNP names that are synonyms for one marker
    Names(Vec<String>),
}

impl MarkerSpec {
    pub fn parse(token: &str) -> MarkerSpec {
        match token.parse::<Position>() {
            Ok(pos) => MarkerSpec::Position(pos),
            Err(_) => MarkerSpec::Names(
                token
                    .split('/')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from)
                    .collect(),
            ),
        }
    }
}

/// One row of the clade tree file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CladeRecord {
    pub label: String,
    pub min_kit: usize,
    pub max_kit: usize,
    pub markers: Vec<MarkerSpec>,
}

impl CladeRecord {
    /// The parent label: everything before the last `.`; `None` for a root.
    pub fn parent_label(&self) -> Option<&str> {
        self.label.rsplit_once('.').map(|(parent, _)| parent)
    }
}

fn parse_index(field: &str) -> Result<usize, ReduxError> {
    field
        .trim()
        .parse::<usize>()
        .map_err(|_| ReduxError::PositionParseError(field.to_string()))
}

///
/// Read the header-less clade tree CSV.
///
/// Column 3 and 4 hold the kit index bounds, column 5 the `;`-separated markers and column 7
/// the clade label. Rows that are too short or carry bad indices are reported and skipped.
///
pub fn read_clades<R: Read>(reader: R, source: &str, diagnostics: &mut Diagnostics) -> Vec<CladeRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line_no = i + 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                diagnostics.record(
                    Phase::Tree,
                    source,
                    Some(line_no),
                    ReduxError::InvalidRecord(e.to_string()),
                );
                continue;
            }
        };

        if row.len() <= LABEL_COLUMN {
            diagnostics.record(
                Phase::Tree,
                source,
                Some(line_no),
                ReduxError::MalformedLine {
                    expected: LABEL_COLUMN + 1,
                    found: row.len(),
                },
            );
            continue;
        }

        let bounds = parse_index(&row[MIN_KIT_COLUMN])
            .and_then(|min| parse_index(&row[MAX_KIT_COLUMN]).map(|max| (min, max)));
        let (min_kit, max_kit) = match bounds {
            Ok(bounds) => bounds,
            Err(e) => {
                diagnostics.record(Phase::Tree, source, Some(line_no), e);
                continue;
            }
        };

        let markers = row[MARKERS_COLUMN]
            .split(';')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(MarkerSpec::parse)
            .collect();

        records.push(CladeRecord {
            label: row[LABEL_COLUMN].trim().to_string(),
            min_kit,
            max_kit,
            markers,
        });
    }

    records
}
