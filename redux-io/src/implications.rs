use std::io::{BufRead, ErrorKind};
use std::path::Path;

use redux_core::models::{CallOrigin, Correction, VariantKey, VariantStore};
use redux_core::utils::{get_dynamic_reader, parse_position};
use redux_core::{Diagnostics, Phase, ReduxError};

// marker, position, (unused), reference, alternate
const CORRECTION_FIELDS: usize = 5;

///
/// Read correction records.
///
/// A line whose first token is `^` is a force-insert, `<` a reference swap. Position,
/// reference and alternate are taken from tokens 1, 3 and 4. Any other line is ignored.
/// Each corrected variant is inserted into `store`.
///
pub fn read_corrections<R: BufRead>(
    reader: R,
    source: &str,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) -> Vec<Correction> {
    let mut corrections = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // undecodable bytes are already consumed; only a real read failure ends the file
                let fatal = e.kind() != ErrorKind::InvalidData;
                diagnostics.record(Phase::Corrections, source, Some(line_no), e.into());
                if fatal {
                    break;
                }
                continue;
            }
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(origin) = fields.first().and_then(|t| CallOrigin::from_marker(t)) else {
            continue;
        };

        if fields.len() < CORRECTION_FIELDS {
            diagnostics.record(
                Phase::Corrections,
                source,
                Some(line_no),
                ReduxError::MalformedLine {
                    expected: CORRECTION_FIELDS,
                    found: fields.len(),
                },
            );
            continue;
        }

        match parse_position(fields[1]) {
            Ok(pos) => {
                let variant = store.get_or_insert(VariantKey::new(pos, fields[3], fields[4]));
                corrections.push(Correction { variant, origin });
            }
            Err(e) => diagnostics.record(Phase::Corrections, source, Some(line_no), e),
        }
    }

    corrections
}

/// Open and read a corrections file. A missing file is reported and yields no corrections.
pub fn read_corrections_file(
    path: &Path,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) -> Vec<Correction> {
    let source = path.display().to_string();
    match get_dynamic_reader(path) {
        Ok(reader) => read_corrections(reader, &source, store, diagnostics),
        Err(e) => {
            diagnostics.record(
                Phase::Corrections,
                source,
                None,
                ReduxError::FileReadError(format!("{:#}", e)),
            );
            Vec::new()
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
    fn test_read_corrections() {
        let input = "\
# comment line
^ 6753258 x TA T
< 2887824 x T C
= 100 x A G
< notanumber x A G
^ 42
";
        let mut store = VariantStore::new();
        let mut diagnostics = Diagnostics::new();

        let corrections =
            read_corrections(Cursor::new(input), "implications.txt", &mut store, &mut diagnostics);

        assert_eq!(corrections.len(), 2);
        assert_eq!(corrections[0].origin, CallOrigin::ForceInsert);
        assert_eq!(store.key(corrections[0].variant).to_string(), "6753258.TA.T");
        assert_eq!(corrections[1].origin, CallOrigin::ReferenceSwap);
        assert_eq!(store.key(corrections[1].variant).to_string(), "2887824.T.C");
        assert_eq!(diagnostics.len(), 2);
    }

    #[rstest]
    fn test_undecodable_line_does_not_end_the_file() {
        let input: &[u8] = b"^ 100 x A G\n< 200 x \xff C T\n< 300 x T C\n";
        let mut store = VariantStore::new();
        let mut diagnostics = Diagnostics::new();

        let corrections =
            read_corrections(Cursor::new(input), "implications.txt", &mut store, &mut diagnostics);

        let keys: Vec<String> = corrections
            .iter()
            .map(|c| store.key(c.variant).to_string())
            .collect();
        assert_eq!(keys, vec!["100.A.G", "300.T.C"]);
        assert_eq!(diagnostics.in_phase(Phase::Corrections).count(), 1);
    }
}
