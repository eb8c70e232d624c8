use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info};
use rayon::prelude::*;

use redux_core::models::{CallOrigin, Dataset, Kit, Position, VariantId, VariantKey};
use redux_overlaprs::{Coverage, CoverageIndex};

use crate::errors::CallMatrixError;
use crate::models::{Annotation, CallMatrix, ReportRow, StatusMap};

/// Builds the call matrix from a [`Dataset`].
///
/// Building is deterministic: rows are ordered by variant key and cells by canonical kit
/// index, and the parallel classification pass collects its results in kit order.
pub struct CallMatrixBuilder<'a> {
    dataset: &'a Dataset,
}

/// Display alleles for a variant whose stored orientation is inverted.
struct Swap {
    reference: String,
    alternate: String,
}

impl<'a> CallMatrixBuilder<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        CallMatrixBuilder { dataset }
    }

    fn check_canonical(&self) -> Result<(), CallMatrixError> {
        for (position, kit) in self.dataset.kits.iter().enumerate() {
            if kit.index != position {
                return Err(CallMatrixError::NonCanonicalKit {
                    name: kit.name.clone(),
                    position,
                    index: kit.index,
                });
            }
        }
        Ok(())
    }

    /// For every `<` correction (pos, ref, alt), the stored variant (pos, alt, ref)
    /// is reported with the correction's alleles.
    fn swaps(&self) -> FxHashMap<VariantId, Swap> {
        let variants = &self.dataset.variants;
        self.dataset
            .corrections
            .iter()
            .filter(|c| c.origin == CallOrigin::ReferenceSwap)
            .filter_map(|c| {
                let correction = variants.key(c.variant);
                let inverted = variants.get(&correction.inverted())?;
                Some((
                    inverted,
                    Swap {
                        reference: correction.reference.clone(),
                        alternate: correction.alternate.clone(),
                    },
                ))
            })
            .collect()
    }

    /// Variants with at least one kit call or correction record, in key order.
    fn candidates(&self) -> Vec<VariantId> {
        let mut ids: FxHashSet<VariantId> = self
            .dataset
            .kits
            .iter()
            .flat_map(|k| k.calls.iter().copied())
            .collect();
        ids.extend(self.dataset.corrections.iter().map(|c| c.variant));

        let mut ids: Vec<VariantId> = ids.into_iter().collect();
        ids.sort_by(|a, b| {
            self.dataset
                .variants
                .key(*a)
                .cmp(self.dataset.variants.key(*b))
        });
        ids
    }

    pub fn build(&self) -> Result<CallMatrix, CallMatrixError> {
        self.check_canonical()?;

        let variants = &self.dataset.variants;
        let kits = &self.dataset.kits;
        let forced = self.dataset.force_inserted();
        let swaps = self.swaps();
        let candidates = self.candidates();
        info!(
            "Classifying {} candidate variants across {} kits",
            candidates.len(),
            kits.len()
        );

        let positions: Vec<Position> = candidates.iter().map(|id| variants.key(*id).pos).collect();
        let position_set: FxHashSet<Position> = positions.iter().copied().collect();
        let index = CoverageIndex::build(kits, &position_set);
        debug!("{} boundary hits", index.boundaries().len());

        // coverage[kit][candidate]
        let coverage: Vec<Vec<Coverage>> = kits
            .par_iter()
            .map(|kit| index.classify_sorted(kit.index, &positions))
            .collect();

        let mut rows = Vec::new();
        let mut statuses = StatusMap::default();
        let mut dropped = 0;

        for (j, id) in candidates.iter().enumerate() {
            let key = variants.key(*id);
            let called = self.dataset.call_count(*id);
            let swap = swaps.get(id).filter(|_| called > 0);

            let count = match swap {
                Some(_) => kits
                    .iter()
                    .filter(|k| counts_for_swap(k, *id, coverage[k.index][j]))
                    .count(),
                None => called,
            };

            if count == 0 && !forced.contains(id) {
                dropped += 1;
                continue;
            }

            let (reference, alternate) = match swap {
                Some(s) => (display_allele(&s.reference), display_allele(&s.alternate)),
                None => (display_allele(&key.reference), display_allele(&key.alternate)),
            };
            let call_string = VariantKey::new(key.pos, reference.as_str(), alternate.as_str()).to_string();

            let cells: Vec<String> = kits
                .iter()
                .map(|kit| {
                    let has_call = kit.has_call(*id);
                    let class = coverage[kit.index][j];
                    let mut cell = match (swap.is_some(), has_call) {
                        (false, true) => call_string.clone(),
                        (true, false) if counts_for_swap(kit, *id, class) => call_string.clone(),
                        _ => String::new(),
                    };
                    if !has_call {
                        if let Some(annotation) = Annotation::from_coverage(class) {
                            statuses.insert(kit.index, *id, annotation);
                            cell.push_str(annotation.suffix());
                        }
                    }
                    cell
                })
                .collect();

            let origin = if swap.is_some() {
                CallOrigin::ReferenceSwap
            } else if forced.contains(id) {
                CallOrigin::ForceInsert
            } else {
                CallOrigin::Normal
            };

            rows.push(ReportRow {
                variant: *id,
                pos: key.pos,
                reference,
                alternate,
                kind: key.kind(),
                count,
                origin,
                cells,
            });
        }

        info!("Retained {} rows, dropped {}", rows.len(), dropped);
        Ok(CallMatrix { rows, statuses })
    }
}

/// A kit supports a swapped variant when it did not call the inverted form,
/// has coverage at the site and did not reject it.
fn counts_for_swap(kit: &Kit, variant: VariantId, class: Coverage) -> bool {
    !kit.has_call(variant) && class != Coverage::NotCovered && !kit.has_reject(variant)
}

fn display_allele(allele: &str) -> String {
    allele.replace(',', "|")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use redux_core::models::{Correction, CoverageRange};
    use rstest::{fixture, rstest};

    fn kit(index: usize, ranges: &[(u32, u32)]) -> Kit {
        let mut kit = Kit::new(index, format!("kit{}", index));
        kit.ranges = ranges.iter().map(|(s, e)| CoverageRange::new(*s, *e)).collect();
        kit
    }

    /// three kits; kit0 and kit1 cover the whole region, kit2 covers
    /// only up to 2887824 and has a point range at 6753258
    #[fixture]
    fn dataset() -> Dataset {
        let mut dataset = Dataset::default();
        dataset.kits = vec![
            kit(0, &[(1_000_000, 10_000_000)]),
            kit(1, &[(1_000_000, 10_000_000)]),
            kit(2, &[(1_000_000, 2887824), (6753258, 6753258)]),
        ];
        dataset
    }

    fn call(dataset: &mut Dataset, kit: usize, key: VariantKey) -> VariantId {
        let id = dataset.variants.get_or_insert(key);
        dataset.kits[kit].calls.insert(id);
        id
    }

    fn correct(dataset: &mut Dataset, key: VariantKey, origin: CallOrigin) {
        let variant = dataset.variants.get_or_insert(key);
        dataset.corrections.push(Correction { variant, origin });
    }

    #[rstest]
    fn test_normal_rows(mut dataset: Dataset) {
        call(&mut dataset, 0, VariantKey::new(2887824, "C", "T"));
        call(&mut dataset, 1, VariantKey::new(2887824, "C", "T"));
        call(&mut dataset, 1, VariantKey::new(5000000, "A", "AG"));

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();
        let lines: Vec<String> = matrix.lines().collect();

        assert_eq!(
            lines,
            vec![
                "2887824,,C,T,SNP,2,,,,,,,,,,,,2887824.C.T,2887824.C.T,;cbu",
                "5000000,,A,AG,Indel,1,,,,,,,,,,,,,5000000.A.AG,;nc",
            ]
        );
        assert_eq!(matrix.statuses.get(2, VariantId(0)), Some(Annotation::Upper));
        // kit0 covers 5000000 strictly: no status
        assert_eq!(matrix.statuses.get(0, VariantId(1)), None);
    }

    #[rstest]
    fn test_call_wins_over_coverage(mut dataset: Dataset) {
        // kit2's range ends at 2887824 and 5000000 is outside its ranges
        let endpoint = call(&mut dataset, 2, VariantKey::new(2887824, "C", "T"));
        let outside = call(&mut dataset, 2, VariantKey::new(5000000, "A", "AG"));

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();

        assert_eq!(matrix.rows[0].cells, vec!["", "", "2887824.C.T"]);
        assert_eq!(matrix.rows[1].cells, vec!["", "", "5000000.A.AG"]);
        assert_eq!(matrix.statuses.get(2, endpoint), None);
        assert_eq!(matrix.statuses.get(2, outside), None);
    }

    #[rstest]
    fn test_swap_cell_at_lower_bound(mut dataset: Dataset) {
        dataset.kits[1].ranges = vec![CoverageRange::new(2000000, 3000000)];
        correct(&mut dataset, VariantKey::new(2000000, "T", "C"), CallOrigin::ReferenceSwap);
        let inverted = call(&mut dataset, 0, VariantKey::new(2000000, "C", "T"));

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();

        let row = &matrix.rows[0];
        assert_eq!(row.count, 2);
        assert_eq!(row.cells, vec!["", "2000000.T.C;cbl", "2000000.T.C"]);
        assert_eq!(matrix.statuses.get(1, inverted), Some(Annotation::Lower));
        assert_eq!(matrix.statuses.get(0, inverted), None);
    }

    #[rstest]
    fn test_force_insert_kept_with_zero_count(mut dataset: Dataset) {
        correct(&mut dataset, VariantKey::new(6753258, "TA", "T"), CallOrigin::ForceInsert);

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();

        assert_eq!(matrix.rows.len(), 1);
        let row = &matrix.rows[0];
        assert_eq!(row.count, 0);
        assert_eq!(row.origin, CallOrigin::ForceInsert);
        assert_eq!(row.cells, vec!["", "", ";cblu"]);
        assert_eq!(
            row.to_string(),
            "6753258,,TA,T,Indel,0,,,,,,,,,,,,,,;cblu"
        );
    }

    #[rstest]
    fn test_reference_swap_counts_covered_non_callers(mut dataset: Dataset) {
        // the correction says the reference is T; kits store the inverted form
        correct(&mut dataset, VariantKey::new(2000000, "T", "C"), CallOrigin::ReferenceSwap);
        let inverted = call(&mut dataset, 0, VariantKey::new(2000000, "C", "T"));
        dataset.kits[1].rejects.insert(inverted);

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();

        assert_eq!(matrix.rows.len(), 1);
        let row = &matrix.rows[0];
        assert_eq!(row.variant, inverted);
        assert_eq!(row.origin, CallOrigin::ReferenceSwap);
        assert_eq!((row.reference.as_str(), row.alternate.as_str()), ("T", "C"));
        // kit0 called it, kit1 rejected it, kit2 covers it
        assert_eq!(row.count, 1);
        assert_eq!(row.cells, vec!["", "", "2000000.T.C"]);
    }

    #[rstest]
    fn test_swap_with_no_support_is_dropped(mut dataset: Dataset) {
        correct(&mut dataset, VariantKey::new(8000000, "T", "C"), CallOrigin::ReferenceSwap);
        // every covering kit calls it
        for k in 0..2 {
            call(&mut dataset, k, VariantKey::new(8000000, "C", "T"));
        }

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();
        assert!(matrix.rows.is_empty());
    }

    #[rstest]
    fn test_swap_without_calls_falls_back_to_count(mut dataset: Dataset) {
        correct(&mut dataset, VariantKey::new(3000000, "T", "C"), CallOrigin::ReferenceSwap);
        dataset.variants.get_or_insert(VariantKey::new(3000000, "C", "T"));

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();
        // neither the correction nor its inverse has calls
        assert!(matrix.rows.is_empty());
    }

    #[rstest]
    fn test_commas_in_alleles(mut dataset: Dataset) {
        call(&mut dataset, 0, VariantKey::new(4000000, "A", "C,G"));

        let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();
        assert_eq!(matrix.rows[0].alternate, "C|G");
        assert_eq!(matrix.rows[0].cells[0], "4000000.A.C|G");
    }

    #[rstest]
    fn test_build_is_idempotent(mut dataset: Dataset) {
        call(&mut dataset, 2, VariantKey::new(1500000, "G", "A"));
        call(&mut dataset, 0, VariantKey::new(9000000, "G", "A"));
        call(&mut dataset, 1, VariantKey::new(1500000, "G", "C"));
        correct(&mut dataset, VariantKey::new(6753258, "TA", "T"), CallOrigin::ForceInsert);

        let first: Vec<String> = CallMatrixBuilder::new(&dataset).build().unwrap().lines().collect();
        let second: Vec<String> = CallMatrixBuilder::new(&dataset).build().unwrap().lines().collect();
        assert_eq!(first, second);

        let positions: Vec<&str> = first.iter().map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(positions, vec!["1500000", "1500000", "6753258", "9000000"]);
    }

    #[rstest]
    fn test_non_canonical_kits_are_rejected(mut dataset: Dataset) {
        dataset.kits.swap(0, 1);
        let result = CallMatrixBuilder::new(&dataset).build();
        assert!(matches!(result, Err(CallMatrixError::NonCanonicalKit { .. })));
    }
}
