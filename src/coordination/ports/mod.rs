//! Port contracts for coordination tree access.
//!
//! Ports define infrastructure-agnostic interfaces used by publishing
//! services.

pub mod tree;

pub use tree::{ConfigTree, ConfigTreeError, ConfigTreeResult};
