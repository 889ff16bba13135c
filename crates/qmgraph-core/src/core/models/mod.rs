//! Data models for molecules and their graph representations.

pub mod graph;
pub mod molecule;
