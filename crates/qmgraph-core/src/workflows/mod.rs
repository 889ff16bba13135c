//! # Workflows Module
//!
//! This module provides the high-level, user-facing entry points of the
//! library.
//!
//! ## Overview
//!
//! Workflows tie the `core` and `engine` layers together into complete
//! procedures. The [`build`] workflow turns a geometry source file into the
//! persisted, collated dataset artifact, memoized on disk so that reruns over
//! the same source skip recomputation entirely.

pub mod build;
