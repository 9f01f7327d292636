//! Per-client provisioning and settings publication.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The client publishing service in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
