use thiserror::Error;

/// Why a clade could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CladeError {
    #[error("Parent {parent} of clade {clade} is not in the tree")]
    UnresolvedParent { clade: String, parent: String },

    #[error("Marker {marker} of clade {clade} matches no known variant")]
    UnresolvedMarker { clade: String, marker: String },

    #[error("Kit index {index} in the range of {clade} is outside the {count} loaded kits")]
    KitIndexOutOfRange {
        clade: String,
        index: usize,
        count: usize,
    },

    #[error("Kit range {min}..={max} of {clade} is inverted")]
    InvertedKitRange { clade: String, min: usize, max: usize },
}
