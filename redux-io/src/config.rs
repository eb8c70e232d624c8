use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReduxIoError, Result};

/// Run configuration. Every key is optional in the YAML file; missing keys fall back to the
/// defaults below.
///
/// ```yaml
/// data_dir: kits
/// corrections: implications.txt
/// snp_reference: snps_hg19.csv
/// reference_coverage: age.bed
/// tree: tree.csv
/// chromosome: chrY
/// ```
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct ReduxConfig {
    /// directory holding one `<kit>.bed` and one `<kit>.vcf` per kit
    pub data_dir: PathBuf,
    pub corrections: PathBuf,
    pub snp_reference: PathBuf,
    pub reference_coverage: PathBuf,
    pub tree: PathBuf,
    pub chromosome: String,
}

impl Default for ReduxConfig {
    fn default() -> Self {
        ReduxConfig {
            data_dir: PathBuf::from("in"),
            corrections: PathBuf::from("implications.txt"),
            snp_reference: PathBuf::from("snps_hg19.csv"),
            reference_coverage: PathBuf::from("age.bed"),
            tree: PathBuf::from("tree.csv"),
            chromosome: "chrY".to_string(),
        }
    }
}

impl TryFrom<&Path> for ReduxConfig {
    type Error = ReduxIoError;

    fn try_from(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        let config: ReduxConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redux.yaml");
        std::fs::write(&path, "data_dir: kits\nchromosome: Y\n").unwrap();

        let config = ReduxConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("kits"));
        assert_eq!(config.chromosome, "Y");
        assert_eq!(config.tree, PathBuf::from("tree.csv"));
    }

    #[rstest]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redux.yaml");
        std::fs::write(&path, "data_dir: [unclosed\n").unwrap();

        let result = ReduxConfig::try_from(path.as_path());
        assert!(matches!(result, Err(ReduxIoError::Yaml(_))));
    }

    #[rstest]
    fn test_missing_config_is_an_error() {
        let result = ReduxConfig::try_from(Path::new("missing/redux.yaml"));
        assert!(matches!(result, Err(ReduxIoError::Io(_))));
    }
}
