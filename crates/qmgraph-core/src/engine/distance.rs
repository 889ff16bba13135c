use nalgebra::{DMatrix, Point3};

/// Computes the pairwise Euclidean distance matrix of a set of positions.
///
/// Each pair norm is computed once and written to both triangles, so the
/// result is symmetric by construction rather than by post-hoc
/// symmetrization.
pub fn distance_matrix(positions: &[Point3<f64>]) -> DMatrix<f64> {
    let n = positions.len();
    let mut dij = DMatrix::zeros(n, n);
    for a in 0..n {
        for b in (a + 1)..n {
            let d = (positions[a] - positions[b]).norm();
            dij[(a, b)] = d;
            dij[(b, a)] = d;
        }
    }
    dij
}
