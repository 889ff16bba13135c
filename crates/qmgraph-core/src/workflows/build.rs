use crate::core::descriptors::oracle::DescriptorOracle;
use crate::core::io::GeometryFormat;
use crate::core::io::xyz::XyzError;
use crate::core::models::graph::{CollateError, CollatedDataset};
use crate::engine::bonds::DEFAULT_CUTOFF;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::runner;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

const PROCESSED_SUBDIR: &str = "processed";
const ARTIFACT_EXTENSION: &str = "qmg";

/// Configuration of one dataset build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// The geometry source file (`.xyz` or `.extxyz`).
    pub source: PathBuf,
    /// Root directory of the dataset; the artifact lands under
    /// `<dataset_root>/processed/`.
    pub dataset_root: PathBuf,
    /// Length of each molecule's target-property vector.
    pub property_count: usize,
    /// Bonding cutoff radius.
    pub cutoff: f64,
}

impl BuildConfig {
    pub fn new(
        source: impl Into<PathBuf>,
        dataset_root: impl Into<PathBuf>,
        property_count: usize,
    ) -> Self {
        Self {
            source: source.into(),
            dataset_root: dataset_root.into(),
            property_count,
            cutoff: DEFAULT_CUTOFF,
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// The deterministic cache location for this (source, property count)
    /// pair. Distinct sources or property configurations never collide.
    pub fn artifact_path(&self) -> Result<PathBuf, BuildError> {
        let stem = self
            .source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| BuildError::UnsupportedFormat {
                path: self.source.clone(),
            })?;
        Ok(self
            .dataset_root
            .join(PROCESSED_SUBDIR)
            .join(format!("{stem}_p{}.{ARTIFACT_EXTENSION}", self.property_count)))
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Unsupported geometry format: '{path}'", path = path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read geometry source '{path}': {source}", path = path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Collate(#[from] CollateError),

    #[error("Cache I/O error at '{path}': {source}", path = path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt dataset artifact at '{path}': {source}", path = path.display())]
    CacheDecode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Failed to encode dataset artifact: {0}")]
    CacheEncode(#[source] bincode::Error),
}

/// Builds (or loads) the collated dataset for one geometry source.
///
/// The format is resolved from the source extension before any processing; an
/// unrecognized extension fails with no partial work performed. If an
/// artifact for this (source, property count) pair already exists it is
/// decoded and returned without touching the worker pool. Otherwise the
/// source is parsed, every molecule is assembled in parallel, the graphs are
/// collated, and the artifact is written atomically: it is encoded to a
/// sibling temporary path and renamed into place, so an interrupted run never
/// leaves behind a half-written artifact that a later lookup would trust.
#[instrument(skip_all, name = "dataset_build_workflow")]
pub fn run<O: DescriptorOracle>(
    config: &BuildConfig,
    oracle: &O,
    reporter: &ProgressReporter,
) -> Result<CollatedDataset, BuildError> {
    let format = GeometryFormat::from_path(&config.source).ok_or_else(|| {
        BuildError::UnsupportedFormat {
            path: config.source.clone(),
        }
    })?;
    let artifact = config.artifact_path()?;

    if artifact.exists() {
        info!(artifact = %artifact.display(), "Cache hit; loading existing dataset artifact.");
        reporter.report(Progress::Note(format!(
            "Loaded cached dataset from {}",
            artifact.display()
        )));
        return load_artifact(&artifact);
    }

    info!(source = %config.source.display(), "Parsing geometry source.");
    let records = reporter
        .stage("Reading geometries", || {
            format.read_records(&config.source, config.property_count)
        })
        .map_err(|source| BuildError::Source {
            path: config.source.clone(),
            source,
        })?;
    info!(molecules = records.len(), "Geometry source parsed.");

    let graphs = reporter.stage("Building graphs", || {
        runner::run(&records, oracle, config.cutoff, reporter)
    })?;

    let dataset = CollatedDataset::collate(graphs)?;
    persist_atomically(&artifact, &dataset)?;
    info!(artifact = %artifact.display(), graphs = dataset.len(), "Dataset artifact written.");

    Ok(dataset)
}

fn load_artifact(path: &Path) -> Result<CollatedDataset, BuildError> {
    let bytes = fs::read(path).map_err(|source| BuildError::CacheIo {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(|source| BuildError::CacheDecode {
        path: path.to_path_buf(),
        source,
    })
}

fn persist_atomically(path: &Path, dataset: &CollatedDataset) -> Result<(), BuildError> {
    let bytes = bincode::serialize(dataset).map_err(BuildError::CacheEncode)?;

    let io_err = |source| BuildError::CacheIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    // Write-then-rename keeps the final path either absent or fully written.
    let tmp_path = path.with_extension("qmg.tmp");
    fs::write(&tmp_path, &bytes).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)?;
    Ok(())
}
