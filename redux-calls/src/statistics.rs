//! Per-kit summary statistics.
//!
//! Coverage totals are measured against the reference coverage set of the dataset; call
//! totals come from the row counts gathered while the kit's VCF was read.

use std::fmt::{self, Display};

use rayon::prelude::*;
use serde::Serialize;

use redux_core::models::Dataset;
use redux_overlaprs::overlap;

/// Coverage of one kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageStatistics {
    pub kit: String,
    /// total width of the kit's ranges
    pub total: u64,
    /// width of the kit's ranges inside the reference coverage
    pub shared: u64,
    pub ranges: usize,
}

impl Display for CoverageStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.total, self.shared, self.ranges)
    }
}

/// Call totals of one kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallStatistics {
    pub kit: String,
    pub rows: u32,
    pub passed: u32,
    pub snps: u32,
    pub indels: u32,
    pub rejected: u32,
}

impl Display for CallStatistics {
    /// The columns left at zero are kept so the line lines up with older reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} 0 0 0 {} 0 0",
            self.rows, self.passed, self.snps, self.indels
        )
    }
}

/// Trait for computing per-kit statistics over a dataset.
pub trait DatasetStatistics {
    /// One entry per kit, canonical order.
    fn coverage_statistics(&self) -> Vec<CoverageStatistics>;

    /// One entry per kit, canonical order.
    fn call_statistics(&self) -> Vec<CallStatistics>;
}

impl DatasetStatistics for Dataset {
    fn coverage_statistics(&self) -> Vec<CoverageStatistics> {
        self.kits
            .par_iter()
            .map(|kit| {
                let result = overlap(&kit.ranges, &self.reference_ranges);
                CoverageStatistics {
                    kit: kit.name.clone(),
                    total: result.total,
                    shared: result.shared,
                    ranges: kit.ranges.len(),
                }
            })
            .collect()
    }

    fn call_statistics(&self) -> Vec<CallStatistics> {
        self.kits
            .iter()
            .map(|kit| CallStatistics {
                kit: kit.name.clone(),
                rows: kit.vcf_stats.rows,
                passed: kit.vcf_stats.passed,
                snps: kit.vcf_stats.snps,
                indels: kit.vcf_stats.indels,
                rejected: kit.vcf_stats.rejected,
            })
            .collect()
    }
}
