use crate::core::descriptors::oracle::DescriptorSet;
use crate::core::models::graph::MoleculeGraph;
use crate::core::models::molecule::MoleculeRecord;
use crate::engine::bonds::cutoff_edges;
use crate::engine::distance::distance_matrix;
use crate::engine::error::EngineError;
use crate::engine::features::edge_features;
use tracing::instrument;

/// Builds the validated graph of one molecule from its record and the
/// descriptor oracle's output.
///
/// The orbital layout must agree with the graph's node indexing: the number
/// of orbital slices must equal one plus the maximum atom index referenced by
/// the edge list. A mismatch is a data-integrity failure carrying the
/// molecule's stable index, not a retryable condition. For an edgeless
/// molecule the invariant is vacuous and a discrete graph is emitted.
///
/// Purely functional: no side effects beyond the computation.
#[instrument(skip_all, fields(molecule = record.index))]
pub fn assemble(
    record: &MoleculeRecord,
    descriptors: &DescriptorSet,
    cutoff: f64,
) -> Result<MoleculeGraph, EngineError> {
    let dij = distance_matrix(&record.positions);
    let edge_index = cutoff_edges(&dij, cutoff);

    if let Some(max_atom) = edge_index.iter().map(|e| e[0].max(e[1])).max() {
        let node_count = max_atom + 1;
        if descriptors.orbital_slices.len() != node_count {
            return Err(EngineError::OrbitalLayoutMismatch {
                index: record.index,
                orbital_count: descriptors.orbital_slices.len(),
                node_count,
            });
        }
    }

    let edge_attrs = edge_features(
        descriptors,
        &edge_index,
        &record.atomic_numbers,
        record.index,
    )?;

    Ok(MoleculeGraph {
        atomic_numbers: record.atomic_numbers.clone(),
        edge_index,
        edge_attrs,
        labels: record.labels.clone(),
        positions: record.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
        index: record.index,
    })
}
