use nalgebra::{DMatrix, Point3};
use thiserror::Error;

/// One atom of a molecule's composition: its element and its 3-D position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomSite {
    pub atomic_number: u32,
    pub position: Point3<f64>,
}

/// The contiguous range of orbital indices belonging to one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitalSlice {
    pub start: usize,
    pub end: usize,
}

impl OrbitalSlice {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Everything the oracle produces for one molecule.
///
/// Both matrices are indexed by orbital and square over the total orbital
/// count; `orbital_slices` has one entry per atom and partitions that orbital
/// index space in atom order.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSet {
    pub overlap: DMatrix<f64>,
    pub core_hamiltonian: DMatrix<f64>,
    pub orbital_slices: Vec<OrbitalSlice>,
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Element Z={atomic_number} is not supported by this oracle")]
    UnsupportedElement { atomic_number: u32 },

    #[error("Descriptor backend failed: {0}")]
    Backend(String),
}

/// The external quantum-descriptor boundary.
///
/// Implementations must be pure functions of the atomic composition: the
/// batch runner shares one oracle across all workers, so `Sync` is required
/// and no per-call mutable state is assumed.
pub trait DescriptorOracle: Sync {
    fn compute(&self, sites: &[AtomSite]) -> Result<DescriptorSet, DescriptorError>;
}
