//! # Core Module
//!
//! This module provides the fundamental building blocks for the dataset
//! construction pipeline, serving as the stateless foundation of the library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the data model:
//!
//! - **Molecular Representation** ([`models`]) - Input molecule records, output
//!   graph records, and the collated dataset artifact.
//! - **File I/O** ([`io`]) - Reading geometry source files in the supported
//!   formats through a unified trait-based interface.
//! - **Quantum Descriptors** ([`descriptors`]) - The oracle boundary supplying
//!   overlap/core-Hamiltonian matrices and the orbital-slice layout.

pub mod descriptors;
pub mod io;
pub mod models;
