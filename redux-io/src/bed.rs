use std::io::{BufRead, ErrorKind};
use std::path::Path;

use redux_core::models::CoverageRange;
use redux_core::utils::{get_dynamic_reader, is_target_chromosome, parse_position};
use redux_core::{Diagnostics, Phase, ReduxError};

///
/// Read coverage ranges (`chromosome start end ...`) for the target chromosome.
///
/// Rows on other chromosomes are dropped silently. Rows with fewer than three fields, a
/// non-numeric coordinate or `start > end` are reported to `diagnostics` and skipped. The
/// returned ranges are sorted by start.
///
/// # Arguments
/// - reader: source of BED-like lines
/// - source: name used in diagnostics
/// - chromosome: the chromosome to keep
/// - diagnostics: where skipped lines are recorded
///
pub fn read_coverage<R: BufRead>(
    reader: R,
    source: &str,
    chromosome: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<CoverageRange> {
    let mut ranges = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // undecodable bytes are already consumed; only a real read failure ends the file
                let fatal = e.kind() != ErrorKind::InvalidData;
                diagnostics.record(Phase::Coverage, source, Some(line_no), e.into());
                if fatal {
                    break;
                }
                continue;
            }
        };

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            diagnostics.record(
                Phase::Coverage,
                source,
                Some(line_no),
                ReduxError::MalformedLine {
                    expected: 3,
                    found: fields.len(),
                },
            );
            continue;
        }

        if !is_target_chromosome(fields[0], chromosome) {
            continue;
        }

        let parsed = parse_position(fields[1])
            .and_then(|start| parse_position(fields[2]).map(|end| (start, end)));
        match parsed {
            Ok((start, end)) if start <= end => ranges.push(CoverageRange::new(start, end)),
            Ok((start, end)) => diagnostics.record(
                Phase::Coverage,
                source,
                Some(line_no),
                ReduxError::InvertedRange { start, end },
            ),
            Err(e) => diagnostics.record(Phase::Coverage, source, Some(line_no), e),
        }
    }

    ranges.sort();
    ranges
}

///
/// Open a coverage file (plain or gzipped) and read it with [`read_coverage`].
///
/// Returns `None` after recording a diagnostic when the file cannot be opened.
///
pub fn read_coverage_file(
    path: &Path,
    chromosome: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<CoverageRange>> {
    let source = path.display().to_string();
    match get_dynamic_reader(path) {
        Ok(reader) => Some(read_coverage(reader, &source, chromosome, diagnostics)),
        Err(e) => {
            diagnostics.record(
                Phase::Coverage,
                source,
                None,
                ReduxError::FileReadError(format!("{:#}", e)),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_reads_target_chromosome_sorted() {
        let input = "chrY\t300\t400\nchr1\t1\t5\nY\t100\t200\nchrY\t250\t250\textra\tcolumns\n";
        let mut diagnostics = Diagnostics::new();

        let ranges = read_coverage(Cursor::new(input), "kit.bed", "chrY", &mut diagnostics);

        assert_eq!(
            ranges,
            vec![
                CoverageRange::new(100, 200),
                CoverageRange::new(250, 250),
                CoverageRange::new(300, 400),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[rstest]
    fn test_malformed_lines_are_skipped_and_reported() {
        let input = "chrY\t100\nchrY\tabc\t200\nchrY\t500\t400\nchrY\t10\t20\n";
        let mut diagnostics = Diagnostics::new();

        let ranges = read_coverage(Cursor::new(input), "kit.bed", "chrY", &mut diagnostics);

        assert_eq!(ranges, vec![CoverageRange::new(10, 20)]);
        assert_eq!(diagnostics.len(), 3);
        let lines: Vec<Option<usize>> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![Some(1), Some(2), Some(3)]);
    }

    #[rstest]
    fn test_undecodable_line_does_not_end_the_file() {
        let input: &[u8] = b"chrY\t10\t20\nchrY\t30\t40\t\xff\xfe\nchrY\t50\t60\n";
        let mut diagnostics = Diagnostics::new();

        let ranges = read_coverage(Cursor::new(input), "kit.bed", "chrY", &mut diagnostics);

        assert_eq!(
            ranges,
            vec![CoverageRange::new(10, 20), CoverageRange::new(50, 60)]
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().line, Some(2));
    }

    #[rstest]
    fn test_missing_file_is_a_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        let ranges = read_coverage_file(Path::new("nope/missing.bed"), "chrY", &mut diagnostics);

        assert!(ranges.is_none());
        assert_eq!(diagnostics.in_phase(Phase::Coverage).count(), 1);
    }

    #[rstest]
    fn test_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kit.bed");
        std::fs::write(&path, "chrY\t5\t9\n").unwrap();

        let mut diagnostics = Diagnostics::new();
        let ranges = read_coverage_file(&path, "chrY", &mut diagnostics).unwrap();
        assert_eq!(ranges, vec![CoverageRange::new(5, 9)]);
    }
}
