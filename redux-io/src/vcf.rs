use std::io::{BufRead, ErrorKind};
use std::path::Path;

use fxhash::FxHashSet;

use redux_core::models::{Kit, Position, VariantKey, VariantKind, VariantStore};
use redux_core::utils::{get_dynamic_reader, is_target_chromosome, parse_position};
use redux_core::{Diagnostics, Phase, ReduxError};

const VCF_FIELDS: usize = 10;
const FILTER_PASS: &str = "PASS";
const FILTER_REJECTED: &str = "REJECTED";

/// Where and how a kit's calls are read.
pub struct CallReadOptions<'a> {
    pub chromosome: &'a str,
    /// Positions at which REJECTED rows are kept as rejects.
    /// Rejects elsewhere are counted in the stats but not stored.
    pub reject_positions: &'a FxHashSet<Position>,
}

///
/// Read a kit's VCF lines into its call and reject sets.
///
/// A row on the target chromosome with `FILTER == PASS` and real REF/ALT alleles is a call.
/// A `FILTER == REJECTED` row is a reject. Header lines start with `#`. Rows with fewer than
/// ten fields or a bad position are reported and skipped; a bad position is still counted in
/// the stats, which tally every target-chromosome row by its filter.
///
pub fn read_calls<R: BufRead>(
    reader: R,
    source: &str,
    options: &CallReadOptions,
    kit: &mut Kit,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) {
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // undecodable bytes are already consumed; only a real read failure ends the file
                let fatal = e.kind() != ErrorKind::InvalidData;
                diagnostics.record(Phase::Calls, source, Some(line_no), e.into());
                if fatal {
                    break;
                }
                continue;
            }
        };

        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < VCF_FIELDS {
            diagnostics.record(
                Phase::Calls,
                source,
                Some(line_no),
                ReduxError::MalformedLine {
                    expected: VCF_FIELDS,
                    found: fields.len(),
                },
            );
            continue;
        }

        if !is_target_chromosome(fields[0], options.chromosome) {
            continue;
        }

        kit.vcf_stats.rows += 1;
        let (reference, alternate, filter) = (fields[3], fields[4], fields[6]);
        let wanted = match filter {
            FILTER_PASS => {
                kit.vcf_stats.passed += 1;
                reference != "." && alternate != "."
            }
            FILTER_REJECTED => {
                kit.vcf_stats.rejected += 1;
                true
            }
            _ => false,
        };
        if !wanted {
            continue;
        }

        let pos = match parse_position(fields[1]) {
            Ok(pos) => pos,
            Err(e) => {
                diagnostics.record(Phase::Calls, source, Some(line_no), e);
                continue;
            }
        };

        if filter == FILTER_PASS {
            let key = VariantKey::new(pos, reference, alternate);
            match key.kind() {
                Some(VariantKind::Snp) => kit.vcf_stats.snps += 1,
                Some(VariantKind::Indel) => kit.vcf_stats.indels += 1,
                None => {}
            }
            kit.calls.insert(store.get_or_insert(key));
        } else if options.reject_positions.contains(&pos) {
            let key = VariantKey::new(pos, reference, alternate);
            kit.rejects.insert(store.get_or_insert(key));
        }
    }
}

///
/// Open a kit's VCF (plain or gzipped) and read it with [`read_calls`].
///
/// Returns `false` after recording a diagnostic when the file cannot be opened; the kit keeps
/// its index and simply has no calls.
///
pub fn read_calls_file(
    path: &Path,
    options: &CallReadOptions,
    kit: &mut Kit,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) -> bool {
    let source = path.display().to_string();
    match get_dynamic_reader(path) {
        Ok(reader) => {
            read_calls(reader, &source, options, kit, store, diagnostics);
            true
        }
        Err(e) => {
            diagnostics.record(
                Phase::Calls,
                source,
                None,
                ReduxError::FileReadError(format!("{:#}", e)),
            );
            false
        }
    }
}
