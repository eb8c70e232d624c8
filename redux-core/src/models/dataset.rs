use fxhash::FxHashSet;

use super::correction::{CallOrigin, Correction};
use super::interval::CoverageRange;
use super::kit::Kit;
use super::store::VariantStore;
use super::variant::VariantId;
use crate::traits::CallLookup;

/// Everything ingestion produces, handed to each later phase by reference.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    /// in canonical order; `kits[i].index == i`
    pub kits: Vec<Kit>,
    pub variants: VariantStore,
    pub corrections: Vec<Correction>,
    /// reference coverage (`age.bed`) used for summary statistics
    pub reference_ranges: Vec<CoverageRange>,
}

impl Dataset {
    pub fn force_inserted(&self) -> FxHashSet<VariantId> {
        self.corrections_of(CallOrigin::ForceInsert)
    }

    pub fn corrections_of(&self, origin: CallOrigin) -> FxHashSet<VariantId> {
        self.corrections
            .iter()
            .filter(|c| c.origin == origin)
            .map(|c| c.variant)
            .collect()
    }

    /// Number of kits with a direct call for `variant`.
    pub fn call_count(&self, variant: VariantId) -> usize {
        self.kits.iter().filter(|k| k.has_call(variant)).count()
    }

    /// Kits carrying a direct call for `variant`, in canonical order.
    pub fn kits_with_call(&self, variant: VariantId) -> impl Iterator<Item = &Kit> {
        self.kits.iter().filter(move |k| k.has_call(variant))
    }
}

impl CallLookup for Dataset {
    fn has_call(&self, kit: usize, variant: VariantId) -> bool {
        self.kits.get(kit).is_some_and(|k| k.has_call(variant))
    }

    fn kit_count(&self) -> usize {
        self.kits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VariantKey;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dataset() -> Dataset {
        let mut dataset = Dataset::default();
        let snp = dataset.variants.get_or_insert(VariantKey::new(100, "A", "G"));
        let forced = dataset.variants.get_or_insert(VariantKey::new(200, "C", "T"));
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let mut kit = Kit::new(i, *name);
            if i != 1 {
                kit.calls.insert(snp);
            }
            dataset.kits.push(kit);
        }
        dataset.corrections.push(Correction {
            variant: forced,
            origin: CallOrigin::ForceInsert,
        });
        dataset
    }

    #[rstest]
    fn test_call_lookup(dataset: Dataset) {
        assert!(dataset.has_call(0, VariantId(0)));
        assert!(!dataset.has_call(1, VariantId(0)));
        assert!(!dataset.has_call(17, VariantId(0)));
        assert_eq!(dataset.kit_count(), 3);
    }

    #[rstest]
    fn test_call_count_and_kits(dataset: Dataset) {
        assert_eq!(dataset.call_count(VariantId(0)), 2);
        let names: Vec<&str> = dataset
            .kits_with_call(VariantId(0))
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[rstest]
    fn test_force_inserted(dataset: Dataset) {
        let forced = dataset.force_inserted();
        assert!(forced.contains(&VariantId(1)));
        assert_eq!(forced.len(), 1);
        assert!(dataset.corrections_of(CallOrigin::ReferenceSwap).is_empty());
    }
}
