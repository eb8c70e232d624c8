//! Call matrix construction for redux.
//!
//! Given a loaded [`Dataset`](redux_core::models::Dataset), this crate decides for every
//! (kit, variant) pair whether the kit called the variant, covered the site without calling it,
//! sat on a coverage boundary, or had no coverage at all, and renders one report row per
//! retained variant.
//!
//! - Reference swap corrections (`<`) invert the meaning of a variant: kits that *did not* call
//!   the inverted variant but covered the site are counted.
//! - Force-insert corrections (`^`) keep a variant in the report even when no kit supports it.
//!
//! # Example
//!
//! ```no_run
//! use redux_calls::CallMatrixBuilder;
//! use redux_core::models::Dataset;
//!
//! let dataset = Dataset::default();
//! let matrix = CallMatrixBuilder::new(&dataset).build().unwrap();
//!
//! for line in matrix.lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod errors;
pub mod matrix;
pub mod models;
pub mod statistics;

// re-exports
pub use errors::CallMatrixError;
pub use matrix::CallMatrixBuilder;
pub use models::{Annotation, CallMatrix, ReportRow, StatusMap};
pub use statistics::DatasetStatistics;
