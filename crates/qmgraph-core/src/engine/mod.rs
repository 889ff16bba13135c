//! # Engine Module
//!
//! This module implements the per-molecule graph-construction pipeline and its
//! parallel batch wrapper.
//!
//! ## Architecture
//!
//! - **Distance Matrix** ([`distance`]) - Pairwise Euclidean distances,
//!   symmetric by construction.
//! - **Cutoff Graph** ([`bonds`]) - Deterministic directed edge list from
//!   thresholding the distance matrix.
//! - **Edge Features** ([`features`]) - Fixed-size reductions of the
//!   overlap/core-Hamiltonian orbital blocks restricted to bonded pairs.
//! - **Assembly** ([`assembler`]) - Combines the above into one validated
//!   molecule graph, enforcing the orbital-layout/node-count invariant.
//! - **Batch Runner** ([`runner`]) - Fans assembly out over a worker pool with
//!   order-preserving collection and first-error abort.
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks.
//! - **Error Handling** ([`error`]) - Engine-specific error types carrying the
//!   offending molecule's stable index.

pub mod assembler;
pub mod bonds;
pub mod distance;
pub mod error;
pub mod features;
pub mod progress;
pub mod runner;
