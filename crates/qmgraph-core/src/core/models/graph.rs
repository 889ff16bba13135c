use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of values in every per-edge feature vector.
///
/// For each of the overlap and core-Hamiltonian orbital blocks the reducer
/// emits four aggregate statistics, followed by the two endpoint atomic
/// numbers as categorical context.
pub const EDGE_FEATURE_LEN: usize = 10;

/// The graph representation of one molecule.
///
/// Nodes are atoms (featurized by atomic number), edges are the directed
/// cutoff-bonded pairs, and `edge_attrs` is a flat array holding one
/// [`EDGE_FEATURE_LEN`]-sized feature vector per edge, aligned 1:1 with
/// `edge_index`. Created once by the assembler and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeGraph {
    pub atomic_numbers: Vec<u32>,
    pub edge_index: Vec<[usize; 2]>,
    pub edge_attrs: Vec<f64>,
    pub labels: Vec<f64>,
    pub positions: Vec<[f64; 3]>,
    pub index: usize,
}

impl MoleculeGraph {
    pub fn node_count(&self) -> usize {
        self.atomic_numbers.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    /// The feature vector of the i-th edge.
    pub fn edge_attr(&self, edge: usize) -> &[f64] {
        &self.edge_attrs[edge * EDGE_FEATURE_LEN..(edge + 1) * EDGE_FEATURE_LEN]
    }
}

/// Prefix-sum offsets locating each graph's node and edge sub-ranges inside
/// the concatenated arrays of a [`CollatedDataset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSlices {
    pub node_offsets: Vec<usize>,
    pub edge_offsets: Vec<usize>,
}

/// The persisted dataset artifact: all molecule graphs concatenated into flat
/// arrays plus the slice index enabling O(1) recovery of any single graph.
///
/// Edge indices are stored graph-local (every graph's atoms are numbered from
/// zero), so recovering a graph is pure array slicing. Written exactly once by
/// the dataset build workflow, read many times afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollatedDataset {
    pub atomic_numbers: Vec<u32>,
    pub positions: Vec<[f64; 3]>,
    pub edge_index: Vec<[usize; 2]>,
    pub edge_attrs: Vec<f64>,
    pub labels: Vec<f64>,
    pub indices: Vec<usize>,
    pub label_len: usize,
    pub slices: GraphSlices,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollateError {
    #[error("Molecule {index} carries {found} label(s) where {expected} were expected")]
    LabelLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl CollatedDataset {
    /// Merges the per-molecule graphs into one artifact, preserving order.
    ///
    /// Every graph must carry the same number of labels; the flat `labels`
    /// array is sliced by multiples of `label_len`, so one odd graph would
    /// silently misalign every label after it.
    pub fn collate(graphs: Vec<MoleculeGraph>) -> Result<Self, CollateError> {
        let label_len = graphs.first().map_or(0, |g| g.labels.len());
        for graph in &graphs {
            if graph.labels.len() != label_len {
                return Err(CollateError::LabelLengthMismatch {
                    index: graph.index,
                    expected: label_len,
                    found: graph.labels.len(),
                });
            }
        }

        let mut dataset = Self {
            atomic_numbers: Vec::new(),
            positions: Vec::new(),
            edge_index: Vec::new(),
            edge_attrs: Vec::new(),
            labels: Vec::new(),
            indices: Vec::with_capacity(graphs.len()),
            label_len,
            slices: GraphSlices {
                node_offsets: vec![0],
                edge_offsets: vec![0],
            },
        };

        for graph in graphs {
            dataset.atomic_numbers.extend_from_slice(&graph.atomic_numbers);
            dataset.positions.extend_from_slice(&graph.positions);
            dataset.edge_index.extend_from_slice(&graph.edge_index);
            dataset.edge_attrs.extend_from_slice(&graph.edge_attrs);
            dataset.labels.extend_from_slice(&graph.labels);
            dataset.indices.push(graph.index);
            dataset
                .slices
                .node_offsets
                .push(dataset.atomic_numbers.len());
            dataset.slices.edge_offsets.push(dataset.edge_index.len());
        }

        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Reconstructs the i-th molecule graph from the concatenated arrays.
    pub fn graph(&self, i: usize) -> Option<MoleculeGraph> {
        if i >= self.len() {
            return None;
        }

        let (node_start, node_end) = (self.slices.node_offsets[i], self.slices.node_offsets[i + 1]);
        let (edge_start, edge_end) = (self.slices.edge_offsets[i], self.slices.edge_offsets[i + 1]);

        Some(MoleculeGraph {
            atomic_numbers: self.atomic_numbers[node_start..node_end].to_vec(),
            positions: self.positions[node_start..node_end].to_vec(),
            edge_index: self.edge_index[edge_start..edge_end].to_vec(),
            edge_attrs: self.edge_attrs
                [edge_start * EDGE_FEATURE_LEN..edge_end * EDGE_FEATURE_LEN]
                .to_vec(),
            labels: self.labels[i * self.label_len..(i + 1) * self.label_len].to_vec(),
            index: self.indices[i],
        })
    }
}
