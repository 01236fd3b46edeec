//! Shared test utilities for the dirmirror workspace.
//!
//! This crate provides standardised tree fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.

pub mod tree;

pub use tree::{read_tree, temp_tree, write_tree};
