use fxhash::{FxHashMap, FxHashSet};

use redux_core::models::{Kit, Position};

use crate::coverage::{Coverage, KitCoverage};
use crate::traits::CoverageClassifier;

/// Boundary tags for every (kit, position) pair where a reported position
/// lands on an endpoint of one of the kit's ranges.
#[derive(Debug, Default, Clone)]
pub struct BoundaryTable {
    tags: FxHashMap<(usize, Position), Coverage>,
}

impl BoundaryTable {
    /// Walk every range endpoint of every kit once and keep those in `positions`.
    /// When two endpoints meet at one position the higher-precedence tag is kept.
    pub fn build(kits: &[Kit], positions: &FxHashSet<Position>) -> Self {
        let mut tags: FxHashMap<(usize, Position), Coverage> = FxHashMap::default();

        for kit in kits.iter() {
            for range in kit.ranges.iter() {
                for endpoint in [range.start, range.end] {
                    if !positions.contains(&endpoint) {
                        continue;
                    }
                    let tag = Coverage::of(range, endpoint);
                    tags.entry((kit.index, endpoint))
                        .and_modify(|t| *t = (*t).max(tag))
                        .or_insert(tag);
                }
            }
        }

        BoundaryTable { tags }
    }

    pub fn get(&self, kit: usize, pos: Position) -> Option<Coverage> {
        self.tags.get(&(kit, pos)).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Classification across all kits: the boundary table is consulted first and
/// only positions that are not an endpoint fall through to the kit's ranges.
#[derive(Debug, Clone)]
pub struct CoverageIndex<'a> {
    kits: Vec<KitCoverage<'a>>,
    boundaries: BoundaryTable,
}

impl<'a> CoverageIndex<'a> {
    pub fn build(kits: &'a [Kit], positions: &FxHashSet<Position>) -> Self {
        CoverageIndex {
            kits: kits.iter().map(|k| KitCoverage::new(&k.ranges)).collect(),
            boundaries: BoundaryTable::build(kits, positions),
        }
    }

    pub fn kit_count(&self) -> usize {
        self.kits.len()
    }

    pub fn boundaries(&self) -> &BoundaryTable {
        &self.boundaries
    }

    /// Classify `pos` for the kit at canonical index `kit`.
    /// Unknown kits have no coverage.
    pub fn classify(&self, kit: usize, pos: Position) -> Coverage {
        if let Some(tag) = self.boundaries.get(kit, pos) {
            return tag;
        }
        self.kits
            .get(kit)
            .map(|k| k.classify(pos))
            .unwrap_or(Coverage::NotCovered)
    }

    /// Classify ascending `positions` for one kit, reusing a cursor.
    pub fn classify_sorted(&self, kit: usize, positions: &[Position]) -> Vec<Coverage> {
        let Some(coverage) = self.kits.get(kit) else {
            return vec![Coverage::NotCovered; positions.len()];
        };

        let mut cursor = 0;
        positions
            .iter()
            .map(|p| match self.boundaries.get(kit, *p) {
                Some(tag) => tag,
                None => coverage.seek(*p, &mut cursor),
            })
            .collect()
    }
}
