//! Quantum descriptor computation boundary.
//!
//! The pipeline never performs self-consistent-field chemistry itself; it
//! consumes an oracle that, given a molecule's atomic composition, returns an
//! overlap matrix, a core-Hamiltonian matrix, and the orbital-slice layout
//! mapping each atom to its range of orbital indices. Real quantum-chemistry
//! backends implement [`oracle::DescriptorOracle`]; [`slater`] ships a
//! deterministic analytic surrogate so the pipeline runs without one.

pub mod oracle;
pub mod slater;
