//! Cluster-wide configuration: database pools and the memcached pool.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Publishing and inspection services in [`services`]
//!
//! Services write through the coordination tree port and provision the
//! shared `api` schema through the database port.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
