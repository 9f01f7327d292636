//! In-memory database adapter for provisioning tests.

mod cluster;

pub use cluster::{InMemoryDatabaseCluster, InMemoryProvisioningSession, SchemaCreation};
