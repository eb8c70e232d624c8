use fxhash::FxHashMap;

use redux_core::models::{Interval, VariantId, VariantKey, VariantStore};
use redux_core::{Diagnostics, Phase, ReduxError};
use redux_io::{CladeRecord, MarkerSpec};

/// A defining marker: any one of `variants` satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// the marker as written in the tree
    pub label: String,
    pub variants: Vec<VariantId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Root,
    /// index into the forest
    Node(usize),
    /// a parent label that is not in the tree
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CladeNode {
    pub name: String,
    pub parent: Parent,
    /// canonical kit indices, inclusive
    pub kits: Interval<usize>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Default, Clone)]
pub struct CladeForest {
    nodes: Vec<CladeNode>,
    by_name: FxHashMap<String, usize>,
}

fn resolve_marker(spec: &MarkerSpec, store: &mut VariantStore) -> Marker {
    match spec {
        MarkerSpec::Position(pos) => {
            let mut variants = store.ids_at(*pos).to_vec();
            if variants.is_empty() {
                variants.push(store.get_or_insert(VariantKey::position_only(*pos)));
            }
            Marker {
                label: pos.to_string(),
                variants,
            }
        }
        MarkerSpec::Names(names) => {
            let mut variants: Vec<VariantId> = Vec::new();
            for name in names.iter() {
                for id in store.ids_by_name(name) {
                    if !variants.contains(id) {
                        variants.push(*id);
                    }
                }
            }
            Marker {
                label: names.join("/"),
                variants,
            }
        }
    }
}

impl CladeForest {
    ///
    /// Resolve tree records into a forest.
    ///
    /// Parent labels and marker names are resolved once, here. A numeric marker with no known
    /// variant is inserted into `store` as a position-only variant; a named marker that matches
    /// nothing is kept empty and reported. Duplicate labels keep their first row. Child ranges
    /// that are not inside their parent's range are reported but kept.
    ///
    pub fn from_records(
        records: &[CladeRecord],
        store: &mut VariantStore,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut forest = CladeForest::default();
        let mut parent_labels: Vec<Option<String>> = Vec::new();

        for record in records.iter() {
            if forest.by_name.contains_key(&record.label) {
                diagnostics.record(
                    Phase::Tree,
                    record.label.as_str(),
                    None,
                    ReduxError::InvalidRecord(format!("duplicate clade label {}", record.label)),
                );
                continue;
            }

            let markers: Vec<Marker> = record
                .markers
                .iter()
                .map(|spec| resolve_marker(spec, store))
                .collect();
            for marker in markers.iter().filter(|m| m.variants.is_empty()) {
                diagnostics.record(
                    Phase::Tree,
                    record.label.as_str(),
                    None,
                    ReduxError::UnknownSnpName(marker.label.clone()),
                );
            }

            parent_labels.push(record.parent_label().map(String::from));
            forest.by_name.insert(record.label.clone(), forest.nodes.len());
            forest.nodes.push(CladeNode {
                name: record.label.clone(),
                parent: Parent::Root,
                kits: Interval::new(record.min_kit, record.max_kit),
                markers,
            });
        }

        // parents can appear after their children in the file
        for (node, label) in forest.nodes.iter_mut().zip(parent_labels) {
            node.parent = match label {
                None => Parent::Root,
                Some(label) => match forest.by_name.get(&label) {
                    Some(idx) => Parent::Node(*idx),
                    None => Parent::Missing(label),
                },
            };
        }

        forest.validate_ranges(diagnostics);
        forest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[CladeNode] {
        &self.nodes
    }

    pub fn by_name(&self, name: &str) -> Option<&CladeNode> {
        self.by_name.get(name).and_then(|idx| self.nodes.get(*idx))
    }

    pub fn parent_of(&self, node: &CladeNode) -> Option<&CladeNode> {
        match node.parent {
            Parent::Node(idx) => self.nodes.get(idx),
            _ => None,
        }
    }

    /// Report every child whose kit range is not enclosed by its parent's.
    /// Returns the number of offending nodes.
    pub fn validate_ranges(&self, diagnostics: &mut Diagnostics) -> usize {
        let mut offending = 0;
        for node in self.nodes.iter() {
            let Some(parent) = self.parent_of(node) else {
                continue;
            };
            if !parent.kits.encloses(&node.kits) {
                offending += 1;
                diagnostics.record(
                    Phase::Tree,
                    node.name.as_str(),
                    None,
                    ReduxError::RangeNotContained {
                        child: node.name.clone(),
                        parent: parent.name.clone(),
                    },
                );
            }
        }
        offending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn record(label: &str, min: usize, max: usize, markers: Vec<MarkerSpec>) -> CladeRecord {
        CladeRecord {
            label: label.to_string(),
            min_kit: min,
            max_kit: max,
            markers,
        }
    }

    #[fixture]
    fn store() -> VariantStore {
        let mut store = VariantStore::new();
        let id = store.get_or_insert(VariantKey::new(22739367, "T", "C"));
        store.add_name(id, "M269");
        store.add_name(id, "S3");
        store
    }

    #[rstest]
    fn test_parents_resolve_regardless_of_order(mut store: VariantStore) {
        let records = vec![
            record("R.1.a", 4, 5, vec![]),
            record("R.1", 4, 7, vec![MarkerSpec::Names(vec!["M269".into()])]),
            record("R", 0, 9, vec![]),
            record("Q.2", 0, 1, vec![]),
        ];
        let mut diagnostics = Diagnostics::new();
        let forest = CladeForest::from_records(&records, &mut store, &mut diagnostics);

        assert_eq!(forest.len(), 4);
        assert_eq!(forest.by_name("R.1.a").unwrap().parent, Parent::Node(1));
        assert_eq!(forest.by_name("R.1").unwrap().parent, Parent::Node(2));
        assert_eq!(forest.by_name("R").unwrap().parent, Parent::Root);
        assert_eq!(
            forest.by_name("Q.2").unwrap().parent,
            Parent::Missing("Q".to_string())
        );
        assert_eq!(forest.parent_of(forest.by_name("R.1").unwrap()).unwrap().name, "R");
        assert!(diagnostics.is_empty());
    }

    #[rstest]
    fn test_marker_resolution(mut store: VariantStore) {
        let records = vec![record(
            "R.1",
            0,
            0,
            vec![
                MarkerSpec::Names(vec!["M269".into(), "S3".into()]),
                MarkerSpec::Position(22739367),
                MarkerSpec::Position(15654428),
                MarkerSpec::Names(vec!["NOPE".into()]),
            ],
        )];
        let before = store.len();
        let mut diagnostics = Diagnostics::new();
        let forest = CladeForest::from_records(&records, &mut store, &mut diagnostics);

        let markers = &forest.by_name("R.1").unwrap().markers;
        assert_eq!(markers[0].label, "M269/S3");
        assert_eq!(markers[0].variants, vec![VariantId(0)]);
        assert_eq!(markers[1].variants, vec![VariantId(0)]);
        // unknown position becomes a position-only variant
        assert_eq!(markers[2].variants.len(), 1);
        assert_eq!(store.len(), before + 1);
        assert!(markers[3].variants.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[rstest]
    fn test_range_containment_is_only_reported(mut store: VariantStore) {
        let records = vec![record("R", 2, 5, vec![]), record("R.1", 1, 5, vec![])];
        let mut diagnostics = Diagnostics::new();
        let forest = CladeForest::from_records(&records, &mut store, &mut diagnostics);

        assert_eq!(forest.len(), 2);
        assert_eq!(diagnostics.in_phase(Phase::Tree).count(), 1);
        assert_eq!(forest.validate_ranges(&mut Diagnostics::new()), 1);
    }

    #[rstest]
    fn test_duplicate_labels_keep_first(mut store: VariantStore) {
        let records = vec![record("R", 0, 3, vec![]), record("R", 5, 9, vec![])];
        let mut diagnostics = Diagnostics::new();
        let forest = CladeForest::from_records(&records, &mut store, &mut diagnostics);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest.by_name("R").unwrap().kits, Interval::new(0, 3));
        assert_eq!(diagnostics.len(), 1);
    }
}
