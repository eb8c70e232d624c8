//! Clade merge-up for redux.
//!
//! A clade is a node of the haplogroup tree. It names a range of kits (by canonical index) and
//! the markers that define it. A clade can be folded into its parent when every kit in the
//! **parent's** range carries a call for each of the clade's markers: the markers then do not
//! distinguish the clade from its parent.
//!
//! ```rust
//! use redux_clades::{CladeForest, merge_up};
//! use redux_core::models::{Dataset, Kit, VariantKey};
//! use redux_core::Diagnostics;
//! use redux_io::{CladeRecord, MarkerSpec};
//!
//! let mut dataset = Dataset::default();
//! let id = dataset.variants.get_or_insert(VariantKey::new(2887824, "C", "T"));
//! for i in 0..2 {
//!     let mut kit = Kit::new(i, format!("kit{}", i));
//!     kit.calls.insert(id);
//!     dataset.kits.push(kit);
//! }
//!
//! let records = vec![
//!     CladeRecord { label: "R".into(), min_kit: 0, max_kit: 1, markers: vec![] },
//!     CladeRecord {
//!         label: "R.1".into(),
//!         min_kit: 0,
//!         max_kit: 1,
//!         markers: vec![MarkerSpec::Position(2887824)],
//!     },
//! ];
//! let mut diagnostics = Diagnostics::new();
//! let forest = CladeForest::from_records(&records, &mut dataset.variants, &mut diagnostics);
//!
//! let report = merge_up(&forest, &dataset);
//! assert_eq!(report.lines().collect::<Vec<_>>(), vec!["R.1 into its parent R"]);
//! ```

pub mod errors;
pub mod merge;
pub mod models;

// re-exports
pub use errors::CladeError;
pub use merge::{MergeReport, can_merge, merge_up};
pub use models::{CladeForest, CladeNode, Marker, Parent};
