use crate::core::descriptors::oracle::DescriptorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Orbital layout mismatch for molecule {index}: {orbital_count} orbital slice(s) but the edge list references {node_count} atom(s)"
    )]
    OrbitalLayoutMismatch {
        index: usize,
        orbital_count: usize,
        node_count: usize,
    },

    #[error("Atom {atom} of molecule {index} has an empty orbital range")]
    EmptyOrbitalRange { index: usize, atom: usize },

    #[error("Descriptor computation failed for molecule {index}: {source}")]
    Descriptor {
        index: usize,
        #[source]
        source: DescriptorError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
