//! Shared test utilities for the codec workspace.
//!
//! Dev-dependency only, never published.

pub mod tree;

pub use tree::ConfigTree;
