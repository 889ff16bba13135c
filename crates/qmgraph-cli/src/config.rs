use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use qmgraph::engine::bonds::DEFAULT_CUTOFF;
use qmgraph::workflows::build::BuildConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PROP_LEN: usize = 12;

/// The optional TOML configuration file. Every field may be omitted; CLI
/// flags always take precedence over file values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialBuildConfig {
    pub dataset_root: Option<PathBuf>,
    pub prop_len: Option<usize>,
    pub cutoff: Option<f64>,
}

impl PartialBuildConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("invalid config file '{}': {}", path.display(), e))
        })
    }

    pub fn merge_with_cli(&self, args: &BuildArgs) -> BuildConfig {
        let dataset_root = args
            .dataset_root
            .clone()
            .or_else(|| self.dataset_root.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let prop_len = args.prop_len.or(self.prop_len).unwrap_or(DEFAULT_PROP_LEN);
        let cutoff = args.cutoff.or(self.cutoff).unwrap_or(DEFAULT_CUTOFF);

        BuildConfig::new(&args.input, dataset_root, prop_len).with_cutoff(cutoff)
    }
}
