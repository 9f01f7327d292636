//! Coordination tree access for configuration publishing.
//!
//! Runtime configuration is published into a hierarchical key-value store
//! (`ZooKeeper`). The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Node publishing service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
