use log::{debug, info};
use rayon::prelude::*;

use redux_core::CallLookup;

use crate::errors::CladeError;
use crate::models::{CladeForest, CladeNode, Parent};

/// Outcome of evaluating every non-root clade.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// (child, parent) for every permitted merge, in tree file order
    pub merges: Vec<(String, String)>,
    pub failures: Vec<CladeError>,
}

impl MergeReport {
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.merges
            .iter()
            .map(|(child, parent)| format!("{} into its parent {}", child, parent))
    }
}

///
/// Decide whether `node` can be folded into its parent.
///
/// Every marker of `node` must be called, through at least one of its variants, by every kit
/// in the parent's kit range. The first (marker, kit) pair without a call answers `false`.
/// A node without markers is trivially mergeable; a root is never merged.
///
pub fn can_merge(
    forest: &CladeForest,
    node: &CladeNode,
    lookup: &impl CallLookup,
) -> Result<bool, CladeError> {
    let parent = match &node.parent {
        Parent::Root => return Ok(false),
        Parent::Missing(label) => {
            return Err(CladeError::UnresolvedParent {
                clade: node.name.clone(),
                parent: label.clone(),
            });
        }
        Parent::Node(_) => match forest.parent_of(node) {
            Some(parent) => parent,
            None => {
                return Err(CladeError::UnresolvedParent {
                    clade: node.name.clone(),
                    parent: String::new(),
                });
            }
        },
    };

    let range = parent.kits;
    if range.start > range.end {
        return Err(CladeError::InvertedKitRange {
            clade: parent.name.clone(),
            min: range.start,
            max: range.end,
        });
    }
    if range.end >= lookup.kit_count() {
        return Err(CladeError::KitIndexOutOfRange {
            clade: parent.name.clone(),
            index: range.end,
            count: lookup.kit_count(),
        });
    }
    if let Some(marker) = node.markers.iter().find(|m| m.variants.is_empty()) {
        return Err(CladeError::UnresolvedMarker {
            clade: node.name.clone(),
            marker: marker.label.clone(),
        });
    }

    for marker in node.markers.iter() {
        for kit in range.start..=range.end {
            if !marker.variants.iter().any(|v| lookup.has_call(kit, *v)) {
                debug!("{}: kit {} lacks {}", node.name, kit, marker.label);
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Evaluate every non-root clade of `forest`. Nodes that fail to evaluate are
/// collected in the report and do not stop the others.
pub fn merge_up<L: CallLookup + Sync>(forest: &CladeForest, lookup: &L) -> MergeReport {
    let outcomes: Vec<(usize, Result<bool, CladeError>)> = forest
        .nodes()
        .par_iter()
        .enumerate()
        .filter(|(_, node)| node.parent != Parent::Root)
        .map(|(i, node)| (i, can_merge(forest, node, lookup)))
        .collect();

    let mut report = MergeReport::default();
    for (i, outcome) in outcomes {
        let node = &forest.nodes()[i];
        match outcome {
            Ok(true) => {
                if let Some(parent) = forest.parent_of(node) {
                    report.merges.push((node.name.clone(), parent.name.clone()));
                }
            }
            Ok(false) => {}
            Err(e) => report.failures.push(e),
        }
    }

    info!(
        "{} of {} clades can merge up, {} failed to evaluate",
        report.merges.len(),
        forest.len(),
        report.failures.len()
    );
    report
}
