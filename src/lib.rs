//! Provisioner: one-shot setup of a multi-tenant deployment.
//!
//! This crate creates per-client `MySQL` schemas, registers API consumer
//! credentials, and publishes cluster configuration (database connection
//! pools, memcached server lists, per-client settings) into a `ZooKeeper`
//! coordination tree.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types and validation with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the coordination tree and the
//!   relational database
//! - **Adapters**: Concrete implementations of ports (`ZooKeeper`, `MySQL`,
//!   in-memory)
//!
//! # Modules
//!
//! - [`coordination`]: Coordination tree paths, port, and node publishing
//! - [`datastore`]: Schema provisioning and API consumer credentials
//! - [`cluster`]: Database-pool and cache-pool publishing
//! - [`tenant`]: Per-client provisioning and settings publishing
//! - [`manifest`]: Provisioning input loaded from a JSON manifest
//! - [`workflow`]: Command-level orchestration used by the CLI

pub mod cluster;
pub mod coordination;
pub mod datastore;
pub mod manifest;
pub mod tenant;
pub mod workflow;
