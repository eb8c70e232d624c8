//! # Input readers for redux.
//!
//! Every reader in this crate is forgiving: a malformed line or an unreadable kit file becomes a
//! [`redux_core::Diagnostic`] and reading continues. Only problems that make the whole run
//! meaningless (an unreadable data directory, an invalid configuration file) are returned as
//! errors.
//!
//! [`load_dataset`] ties the readers together in the order later phases depend on: kit
//! discovery, corrections, coverage, calls, then the SNP reference list.
//!
pub mod bed;
pub mod clades;
pub mod config;
pub mod error;
pub mod implications;
pub mod loader;
pub mod snps;
pub mod vcf;

// re-expose core functions
pub use bed::*;
pub use clades::*;
pub use config::*;
pub use error::*;
pub use implications::*;
pub use loader::*;
pub use snps::*;
pub use vcf::*;
