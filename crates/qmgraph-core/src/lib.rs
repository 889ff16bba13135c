//! # QMGraph Core Library
//!
//! A library for converting collections of molecular geometries into cached,
//! graph-structured datasets with quantum-descriptor edge features, suitable for
//! downstream learning models.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`MoleculeRecord`,
//!   `MoleculeGraph`, `CollatedDataset`), geometry file I/O, and the descriptor
//!   oracle boundary.
//!
//! - **[`engine`]: The Logic Core.** Implements the per-molecule pipeline: the
//!   distance matrix, the cutoff bonding graph, the edge feature reduction, the
//!   validated graph assembly, and the parallel batch runner that fans the
//!   assembly out over a worker pool while preserving input order.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute the complete
//!   dataset build, including on-disk memoization keyed by the source file
//!   identity. It provides a simple and powerful entry point for end-users of
//!   the library.

pub mod core;
pub mod engine;
pub mod workflows;
