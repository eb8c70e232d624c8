use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fxhash::FxHashSet;
use log::info;

use redux_core::models::{Dataset, Kit, Position};
use redux_core::utils::{get_dynamic_reader, kit_name_from_path};
use redux_core::{Diagnostics, Phase, ReduxError};

use crate::bed::read_coverage_file;
use crate::clades::{CladeRecord, read_clades};
use crate::config::ReduxConfig;
use crate::error::{ReduxIoError, Result};
use crate::implications::read_corrections_file;
use crate::snps::read_snp_reference_file;
use crate::vcf::{CallReadOptions, read_calls_file};

fn is_kind(path: &Path, ext: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.strip_suffix(".gz").unwrap_or(name);
    Path::new(name).extension().and_then(|e| e.to_str()) == Some(ext)
}

///
/// List the kits in `dir` in canonical order.
///
/// A kit is the stem of a coverage (`.bed`/`.bed.gz`) file. Kits are sorted by name and get
/// their index from that order, once. A kit without a matching `.vcf` keeps its index (its
/// column will be empty) and a diagnostic is recorded; a lone VCF is reported and ignored.
///
pub fn discover_kits(dir: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Kit>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ReduxIoError::DataDirectory(format!("{}: {}", dir.display(), e)))?;

    let mut found: BTreeMap<String, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = kit_name_from_path(&path) else {
            continue;
        };
        if is_kind(&path, "bed") {
            found.entry(name).or_default().0 = Some(path);
        } else if is_kind(&path, "vcf") {
            found.entry(name).or_default().1 = Some(path);
        }
    }

    let mut kits = Vec::new();
    for (name, (bed, vcf)) in found {
        match (bed, vcf) {
            (Some(bed), vcf) => {
                if vcf.is_none() {
                    diagnostics.record(
                        Phase::Discovery,
                        name.as_str(),
                        None,
                        ReduxError::MissingCompanion(format!("{}.vcf", name)),
                    );
                }
                let mut kit = Kit::new(kits.len(), name);
                kit.coverage_path = Some(bed);
                kit.call_path = vcf;
                kits.push(kit);
            }
            (None, _) => diagnostics.record(
                Phase::Discovery,
                name.as_str(),
                None,
                ReduxError::MissingCompanion(format!("{}.bed", name)),
            ),
        }
    }

    Ok(kits)
}

///
/// Assemble a [`Dataset`] from the files named in `config`.
///
/// Phases run in order (discovery, corrections, coverage, calls, SNP reference) and each one
/// reports its diagnostics when it finishes. Only an unreadable data directory is fatal.
///
pub fn load_dataset(config: &ReduxConfig, diagnostics: &mut Diagnostics) -> Result<Dataset> {
    let mut dataset = Dataset::default();

    dataset.kits = discover_kits(&config.data_dir, diagnostics)?;
    info!("Found {} kits in {}", dataset.kits.len(), config.data_dir.display());
    diagnostics.report(Phase::Discovery);

    dataset.corrections =
        read_corrections_file(&config.corrections, &mut dataset.variants, diagnostics);
    info!("Read {} corrections", dataset.corrections.len());
    diagnostics.report(Phase::Corrections);

    for kit in dataset.kits.iter_mut() {
        if let Some(path) = &kit.coverage_path {
            if let Some(ranges) = read_coverage_file(path, &config.chromosome, diagnostics) {
                kit.ranges = ranges;
            }
        }
    }
    if let Some(ranges) =
        read_coverage_file(&config.reference_coverage, &config.chromosome, diagnostics)
    {
        dataset.reference_ranges = ranges;
    }
    info!("Read coverage for {} kits", dataset.kits.len());
    diagnostics.report(Phase::Coverage);

    // only the swap accounting reads rejects, and only at corrected sites
    let reject_positions: FxHashSet<Position> = dataset
        .corrections
        .iter()
        .map(|c| dataset.variants.key(c.variant).pos)
        .collect();
    let options = CallReadOptions {
        chromosome: &config.chromosome,
        reject_positions: &reject_positions,
    };
    for kit in dataset.kits.iter_mut() {
        if let Some(path) = kit.call_path.clone() {
            read_calls_file(&path, &options, kit, &mut dataset.variants, diagnostics);
        }
    }
    info!("Variant store holds {} variants after calls", dataset.variants.len());
    diagnostics.report(Phase::Calls);

    let named = read_snp_reference_file(&config.snp_reference, &mut dataset.variants, diagnostics);
    info!("Applied {} SNP names", named);
    diagnostics.report(Phase::SnpReference);

    Ok(dataset)
}

/// Read the clade tree named in `config`. Unlike the per-kit inputs, a missing tree is fatal.
pub fn load_clades(config: &ReduxConfig, diagnostics: &mut Diagnostics) -> Result<Vec<CladeRecord>> {
    let reader = get_dynamic_reader(&config.tree).map_err(|e| ReduxIoError::Open {
        path: config.tree.display().to_string(),
        reason: format!("{:#}", e),
    })?;
    let records = read_clades(reader, &config.tree.display().to_string(), diagnostics);
    info!("Read {} clades", records.len());
    diagnostics.report(Phase::Tree);
    Ok(records)
}
