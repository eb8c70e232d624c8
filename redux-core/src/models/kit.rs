use std::path::PathBuf;

use fxhash::FxHashSet;

use super::interval::CoverageRange;
use super::variant::VariantId;

/// Row counts gathered while reading a kit's VCF.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VcfStats {
    /// rows on the target chromosome
    pub rows: u32,
    /// PASS rows, including those without real alleles
    pub passed: u32,
    pub snps: u32,
    pub indels: u32,
    pub rejected: u32,
}

/// One sample.
///
/// `index` is the kit's position in canonical order. It is assigned once during discovery and
/// every per-kit structure downstream (matrix columns, clade ranges) is addressed by it.
#[derive(Debug, Clone, Default)]
pub struct Kit {
    pub index: usize,
    pub name: String,
    pub coverage_path: Option<PathBuf>,
    pub call_path: Option<PathBuf>,
    /// sorted by start
    pub ranges: Vec<CoverageRange>,
    pub calls: FxHashSet<VariantId>,
    pub rejects: FxHashSet<VariantId>,
    pub vcf_stats: VcfStats,
}

impl Kit {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Kit {
            index,
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn has_call(&self, variant: VariantId) -> bool {
        self.calls.contains(&variant)
    }

    #[inline]
    pub fn has_reject(&self, variant: VariantId) -> bool {
        self.rejects.contains(&variant)
    }
}
