//! Port contracts for relational provisioning.
//!
//! Ports define infrastructure-agnostic interfaces used by provisioning
//! services.

pub mod database;

pub use database::{DatabaseConnector, DatastoreError, DatastoreResult, ProvisioningSession};
