//! `MySQL` adapters for schema and consumer provisioning.

mod models;
mod session;

pub use session::{MysqlConnector, MysqlProvisioningSession, ProvisioningMysqlPool};
