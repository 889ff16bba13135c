use nalgebra::DMatrix;

/// Default bonding cutoff radius in length units.
pub const DEFAULT_CUTOFF: f64 = 5.0;

/// Converts a distance matrix into a directed edge list by thresholding.
///
/// Every ordered pair `(a, b)` with `a != b` and `dij[a][b] <= cutoff` is
/// included, so a bonded pair contributes both directions. Enumeration is
/// row-major over atom pairs, which fixes the edge ordering for reproducible
/// downstream indexing. A cutoff that excludes all pairs yields an empty list
/// (a discrete graph); guarding against that is the caller's concern.
pub fn cutoff_edges(dij: &DMatrix<f64>, cutoff: f64) -> Vec<[usize; 2]> {
    let n = dij.nrows();
    let mut edges = Vec::new();
    for a in 0..n {
        for b in 0..n {
            if a != b && dij[(a, b)] <= cutoff {
                edges.push([a, b]);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::distance::distance_matrix;
    use nalgebra::Point3;

    fn chain_positions() -> Vec<Point3<f64>> {
        (0..4)
            .map(|i| Point3::new(2.0 * i as f64, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn edges_are_row_major_and_bidirectional() {
        let dij = distance_matrix(&chain_positions());
        let edges = cutoff_edges(&dij, 2.5);

        assert_eq!(edges, vec![[0, 1], [1, 0], [1, 2], [2, 1], [2, 3], [3, 2]]);
    }

    #[test]
    fn no_self_loops_at_any_cutoff() {
        let dij = distance_matrix(&chain_positions());
        let edges = cutoff_edges(&dij, f64::MAX);
        assert!(edges.iter().all(|e| e[0] != e[1]));
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn smaller_cutoff_yields_a_subset() {
        let dij = distance_matrix(&chain_positions());
        let tight = cutoff_edges(&dij, 2.0);
        let loose = cutoff_edges(&dij, 4.0);

        assert!(tight.iter().all(|e| loose.contains(e)));
        assert!(tight.len() <= loose.len());
    }

    #[test]
    fn excluding_cutoff_yields_empty_list() {
        let dij = distance_matrix(&chain_positions());
        assert!(cutoff_edges(&dij, 0.5).is_empty());
    }

    #[test]
    fn boundary_distance_is_included() {
        let dij = distance_matrix(&[Point3::origin(), Point3::new(2.0, 0.0, 0.0)]);
        assert_eq!(cutoff_edges(&dij, 2.0), vec![[0, 1], [1, 0]]);
    }
}
