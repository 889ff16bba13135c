//! Provides input functionality for molecular geometry file formats.
//!
//! Geometry sources come in two supported encodings: the plain multi-frame
//! XYZ format with trailing property columns on the comment line, and the
//! extended XYZ format carrying `key=value` metadata. The encoding is
//! resolved exactly once from the source file extension into the closed
//! [`GeometryFormat`] variant, so no extension string ever branches inside
//! the pipeline itself.

pub(crate) mod elements;
pub mod extxyz;
pub mod traits;
pub mod xyz;

use crate::core::io::traits::GeometryFile;
use crate::core::io::xyz::XyzError;
use crate::core::models::molecule::MoleculeRecord;
use std::path::Path;

/// The closed set of supported geometry source encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    Xyz,
    ExtXyz,
}

impl GeometryFormat {
    /// Resolves the format from the source file extension, or `None` for any
    /// unsupported extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("xyz") => Some(Self::Xyz),
            Some("extxyz") => Some(Self::ExtXyz),
            _ => None,
        }
    }

    /// Reads every molecule record from the source, assigning sequential
    /// indices in file order.
    pub fn read_records(
        &self,
        path: &Path,
        property_count: usize,
    ) -> Result<Vec<MoleculeRecord>, XyzError> {
        match self {
            Self::Xyz => xyz::XyzFile::read_from_path(path, property_count),
            Self::ExtXyz => extxyz::ExtXyzFile::read_from_path(path, property_count),
        }
    }
}
