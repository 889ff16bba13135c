use crate::core::descriptors::oracle::AtomSite;
use nalgebra::Point3;

/// One molecule as read from a geometry source file.
///
/// The record is immutable after parsing. The `index` is the molecule's stable
/// position in the source file; it is carried through the whole pipeline and
/// used for error attribution, so it is never reassigned or reused.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecord {
    pub atomic_numbers: Vec<u32>,
    pub positions: Vec<Point3<f64>>,
    pub labels: Vec<f64>,
    pub index: usize,
}

impl MoleculeRecord {
    pub fn new(
        atomic_numbers: Vec<u32>,
        positions: Vec<Point3<f64>>,
        labels: Vec<f64>,
        index: usize,
    ) -> Self {
        debug_assert_eq!(atomic_numbers.len(), positions.len());
        Self {
            atomic_numbers,
            positions,
            labels,
            index,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atomic_numbers.len()
    }

    /// The atomic composition handed to the descriptor oracle.
    pub fn sites(&self) -> Vec<AtomSite> {
        self.atomic_numbers
            .iter()
            .zip(self.positions.iter())
            .map(|(&atomic_number, &position)| AtomSite {
                atomic_number,
                position,
            })
            .collect()
    }
}
