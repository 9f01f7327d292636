//! Relational provisioning: client schemas and API consumer credentials.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Provisioning services in [`services`]
//! - Schema file access in [`scripts`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod scripts;
pub mod services;

#[cfg(test)]
mod tests;
