use crate::core::descriptors::oracle::{DescriptorSet, OrbitalSlice};
use crate::core::models::graph::EDGE_FEATURE_LEN;
use crate::engine::error::EngineError;
use nalgebra::DMatrix;

/// Aggregate statistics of one orbital sub-block: sum, mean, max-abs,
/// Frobenius norm. Defined for any non-empty rectangular block.
fn block_stats(matrix: &DMatrix<f64>, rows: OrbitalSlice, cols: OrbitalSlice) -> [f64; 4] {
    let block = matrix.view((rows.start, cols.start), (rows.len(), cols.len()));
    let count = (rows.len() * cols.len()) as f64;

    let mut sum = 0.0;
    let mut max_abs = 0.0f64;
    let mut sq_sum = 0.0;
    for value in block.iter() {
        sum += value;
        max_abs = max_abs.max(value.abs());
        sq_sum += value * value;
    }

    [sum, sum / count, max_abs, sq_sum.sqrt()]
}

fn endpoint_slice(
    descriptors: &DescriptorSet,
    atom: usize,
    index: usize,
) -> Result<OrbitalSlice, EngineError> {
    let slice = descriptors
        .orbital_slices
        .get(atom)
        .copied()
        .ok_or_else(|| {
            EngineError::Internal(format!(
                "edge references atom {atom} outside the orbital slice table of molecule {index}"
            ))
        })?;
    if slice.is_empty() {
        return Err(EngineError::EmptyOrbitalRange { index, atom });
    }
    if slice.end > descriptors.overlap.nrows() {
        return Err(EngineError::Internal(format!(
            "orbital slice {}..{} of atom {atom} exceeds the {}-orbital matrices of molecule {index}",
            slice.start,
            slice.end,
            descriptors.overlap.nrows()
        )));
    }
    Ok(slice)
}

/// Reduces the overlap/core-Hamiltonian orbital blocks of every edge to one
/// fixed-size feature vector, returned as a flat array aligned 1:1 with the
/// edge list.
///
/// An empty orbital range for an endpoint atom is surfaced as an error, never
/// silently zero-filled.
pub fn edge_features(
    descriptors: &DescriptorSet,
    edges: &[[usize; 2]],
    atomic_numbers: &[u32],
    index: usize,
) -> Result<Vec<f64>, EngineError> {
    let mut attrs = Vec::with_capacity(edges.len() * EDGE_FEATURE_LEN);

    for &[a, b] in edges {
        let slice_a = endpoint_slice(descriptors, a, index)?;
        let slice_b = endpoint_slice(descriptors, b, index)?;

        attrs.extend_from_slice(&block_stats(&descriptors.overlap, slice_a, slice_b));
        attrs.extend_from_slice(&block_stats(
            &descriptors.core_hamiltonian,
            slice_a,
            slice_b,
        ));
        attrs.push(f64::from(atomic_numbers[a]));
        attrs.push(f64::from(atomic_numbers[b]));
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_atom_descriptors() -> DescriptorSet {
        // 3 orbitals: atom 0 owns 0..2, atom 1 owns 2..3.
        let overlap = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 0.5, 0.2, 0.5, 1.0, -0.4, 0.2, -0.4, 1.0],
        );
        let core_hamiltonian = DMatrix::from_row_slice(
            3,
            3,
            &[-2.0, -0.5, -0.1, -0.5, -2.0, 0.3, -0.1, 0.3, -1.0],
        );
        DescriptorSet {
            overlap,
            core_hamiltonian,
            orbital_slices: vec![
                OrbitalSlice { start: 0, end: 2 },
                OrbitalSlice { start: 2, end: 3 },
            ],
        }
    }

    #[test]
    fn features_align_one_to_one_with_edges() {
        let descriptors = two_atom_descriptors();
        let edges = vec![[0, 1], [1, 0]];
        let attrs = edge_features(&descriptors, &edges, &[6, 1], 0).unwrap();

        assert_eq!(attrs.len(), edges.len() * EDGE_FEATURE_LEN);

        // Edge (0, 1): rectangular 2x1 overlap block [0.2, -0.4].
        let first = &attrs[..EDGE_FEATURE_LEN];
        assert!((first[0] - (0.2 - 0.4)).abs() < 1e-12);
        assert!((first[1] - (0.2 - 0.4) / 2.0).abs() < 1e-12);
        assert!((first[2] - 0.4).abs() < 1e-12);
        assert!((first[3] - (0.2f64 * 0.2 + 0.4 * 0.4).sqrt()).abs() < 1e-12);
        assert_eq!(first[8], 6.0);
        assert_eq!(first[9], 1.0);

        // Edge (1, 0) carries the swapped atomic-number context.
        let second = &attrs[EDGE_FEATURE_LEN..];
        assert_eq!(second[8], 1.0);
        assert_eq!(second[9], 6.0);
    }

    #[test]
    fn empty_orbital_range_is_an_error() {
        let mut descriptors = two_atom_descriptors();
        descriptors.orbital_slices[1] = OrbitalSlice { start: 2, end: 2 };

        let result = edge_features(&descriptors, &[[0, 1]], &[6, 1], 42);
        assert!(matches!(
            result,
            Err(EngineError::EmptyOrbitalRange { index: 42, atom: 1 })
        ));
    }

    #[test]
    fn out_of_bounds_slice_is_an_internal_error() {
        let mut descriptors = two_atom_descriptors();
        descriptors.orbital_slices[1] = OrbitalSlice { start: 2, end: 5 };

        let result = edge_features(&descriptors, &[[0, 1]], &[6, 1], 0);
        assert!(matches!(result, Err(EngineError::Internal(_))));
    }

    #[test]
    fn no_edges_means_no_features() {
        let descriptors = two_atom_descriptors();
        let attrs = edge_features(&descriptors, &[], &[6, 1], 0).unwrap();
        assert!(attrs.is_empty());
    }
}
