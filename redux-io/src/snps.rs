use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use redux_core::models::{Position, VariantKey, VariantStore};
use redux_core::utils::get_dynamic_reader;
use redux_core::{Diagnostics, Phase, ReduxError};

/// One row of the reference SNP list. Columns not named here are ignored.
#[derive(Deserialize, Debug, PartialEq)]
pub struct SnpRecord {
    pub start: Position,
    pub allele_anc: String,
    pub allele_der: String,
    #[serde(rename = "Name")]
    pub name: String,
}

///
/// Read the reference SNP list (CSV with header) and attach each name to its
/// `(start, allele_anc, allele_der)` variant, inserting the variant if needed.
///
/// Returns the number of rows applied.
///
pub fn read_snp_reference<R: Read>(
    reader: R,
    source: &str,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) -> usize {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut applied = 0;
    for (i, result) in rdr.deserialize::<SnpRecord>().enumerate() {
        match result {
            Ok(record) => {
                if record.name.is_empty() {
                    continue;
                }
                let key = VariantKey::new(record.start, record.allele_anc, record.allele_der);
                let id = store.get_or_insert(key);
                store.add_name(id, &record.name);
                applied += 1;
            }
            Err(e) => {
                // header is line 1
                diagnostics.record(
                    Phase::SnpReference,
                    source,
                    Some(i + 2),
                    ReduxError::InvalidRecord(e.to_string()),
                );
            }
        }
    }

    applied
}

pub fn read_snp_reference_file(
    path: &Path,
    store: &mut VariantStore,
    diagnostics: &mut Diagnostics,
) -> usize {
    let source = path.display().to_string();
    match get_dynamic_reader(path) {
        Ok(reader) => read_snp_reference(reader, &source, store, diagnostics),
        Err(e) => {
            diagnostics.record(
                Phase::SnpReference,
                source,
                None,
                ReduxError::FileReadError(format!("{:#}", e)),
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_names_attach_to_triples() {
        let input = "\
id,Name,start,allele_anc,allele_der,extra
1,M269,22739367,T,C,x
2,S3,22739367,T,C,x
3,L21,15654428,C,G,x
4,BAD,notanumber,A,G,x
";
        let mut store = VariantStore::new();
        let mut diagnostics = Diagnostics::new();

        let applied = read_snp_reference(Cursor::new(input), "snps.csv", &mut store, &mut diagnostics);

        assert_eq!(applied, 3);
        assert_eq!(store.len(), 2);
        let m269 = store.ids_by_name("M269");
        assert_eq!(m269, store.ids_by_name("S3"));
        assert_eq!(store.key(m269[0]).to_string(), "22739367.T.C");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().line, Some(5));
    }
}
