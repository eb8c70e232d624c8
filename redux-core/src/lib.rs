//! Core data model for redux.
//!
//! redux reduces per-kit Y-chromosome evidence (coverage intervals from a `.bed` file and variant
//! calls from a `.vcf` file) into a single call matrix and decides which clades of a haplogroup
//! tree can be folded into their parents. This crate holds the pieces every other redux crate
//! agrees on:
//!
//! - [`models::VariantStore`]: the variant dictionary, keyed by `(position, ref, alt)`
//! - [`models::Kit`]: one sample, with its coverage ranges and call sets
//! - [`models::Dataset`]: the explicit store handed from one phase to the next
//! - [`Diagnostics`]: the per-phase log of skipped input
//!
//! ```rust
//! use redux_core::models::{Dataset, Kit, VariantKey};
//! use redux_core::CallLookup;
//!
//! let mut dataset = Dataset::default();
//! let id = dataset.variants.get_or_insert(VariantKey::new(2887824, "C", "T"));
//!
//! let mut kit = Kit::new(0, "kit-a");
//! kit.calls.insert(id);
//! dataset.kits.push(kit);
//!
//! assert!(dataset.has_call(0, id));
//! assert_eq!(dataset.kit_count(), 1);
//! ```
pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

// re-exports
pub use diagnostics::{Diagnostic, Diagnostics, Phase};
pub use errors::ReduxError;
pub use traits::CallLookup;
