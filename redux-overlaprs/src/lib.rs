//! Coverage classification and overlap for redux.
//!
//! Each kit carries a sorted list of closed coverage ranges on the target chromosome. This crate
//! answers two questions about them:
//!
//! - **Where does a position fall?** [`KitCoverage`] classifies a single position as strictly
//!   inside a range, on one of its endpoints, or outside every range. Sorted queries can reuse a
//!   cursor through [`KitCoverage::seek`]. [`CoverageIndex`] combines per-kit classification
//!   with a [`BoundaryTable`] precomputed across all kits for the positions being reported.
//! - **How much do two range sets share?** [`overlap`] sweeps tagged start/end events of both
//!   sets and returns the total width of the first set and the width covered by both.
//!
//! ## Quick Start
//!
//! ```rust
//! use redux_overlaprs::{Coverage, CoverageClassifier, KitCoverage, overlap};
//! use redux_core::models::CoverageRange;
//!
//! let ranges = vec![CoverageRange::new(100, 200), CoverageRange::new(200, 300)];
//! let coverage = KitCoverage::new(&ranges);
//!
//! assert_eq!(coverage.classify(150), Coverage::Covered);
//! assert_eq!(coverage.classify(100), Coverage::BoundaryLower);
//! // shared endpoint: the lower bound of the next range wins
//! assert_eq!(coverage.classify(200), Coverage::BoundaryLower);
//! assert_eq!(coverage.classify(300), Coverage::BoundaryUpper);
//! assert_eq!(coverage.classify(301), Coverage::NotCovered);
//!
//! let other = vec![CoverageRange::new(150, 250)];
//! let result = overlap(&ranges, &other);
//! assert_eq!((result.total, result.shared), (200, 100));
//! ```

/// Per-position coverage classification.
///
/// See [`KitCoverage`] for details.
pub mod coverage;

/// Boundary precomputation and the combined index.
///
/// See [`CoverageIndex`] for details.
pub mod index;

/// Interval overlap by sweep.
///
/// See [`overlap`] for details.
pub mod sweep;

/// Core traits for classification.
///
/// See [`CoverageClassifier`] for the main trait.
pub mod traits;

// re-exports
pub use self::coverage::{Coverage, KitCoverage};
pub use self::index::{BoundaryTable, CoverageIndex};
pub use self::sweep::{CoverageOverlap, overlap};
pub use self::traits::CoverageClassifier;
