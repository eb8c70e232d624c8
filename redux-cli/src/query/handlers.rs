use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::Result;
use clap::ArgMatches;

use redux_core::models::{Position, Variant, VariantId, VariantStore};

use crate::common::load;

/// Variants matching `query`: every variant at the position, or, for a SNP name (matched
/// upper-cased), every variant at the positions that name is attached to.
fn lookup(store: &VariantStore, query: &str) -> Vec<VariantId> {
    let positions: BTreeSet<Position> = match query.parse::<Position>() {
        Ok(pos) => BTreeSet::from([pos]),
        Err(_) => store
            .ids_by_name(&query.to_uppercase())
            .iter()
            .map(|id| store.key(*id).pos)
            .collect(),
    };
    let mut ids: Vec<VariantId> = positions
        .into_iter()
        .flat_map(|pos| store.ids_at(pos).iter().copied())
        .collect();
    ids.sort_by(|a, b| store.key(*a).cmp(store.key(*b)));
    ids
}

fn describe(variant: &Variant) -> String {
    format!(
        "{:>8}.{}.{} - {}",
        variant.key.pos,
        variant.key.reference,
        variant.key.alternate,
        variant.names.join("/")
    )
}

pub fn run_query(matches: &ArgMatches) -> Result<()> {
    let query = matches
        .get_one::<String>("QUERY")
        .expect("A position or SNP name is required.");
    let list_kits = matches.get_flag("kits");

    let (_config, dataset, _diagnostics) = load(matches)?;

    let mut out = io::stdout().lock();
    let ids = lookup(&dataset.variants, query);
    if ids.is_empty() {
        writeln!(out, "no variant matches {}", query)?;
        return Ok(());
    }

    for id in ids {
        writeln!(out, "{}", describe(dataset.variants.variant(id)))?;
        if list_kits {
            for kit in dataset.kits_with_call(id) {
                writeln!(out, "    {}", kit.name)?;
            }
        }
    }

    Ok(())
}
