//! Domain model for cluster configuration documents.

mod error;
mod pool;
mod server;
mod settings_map;

pub use error::ClusterDomainError;
pub use pool::{CachePool, DatabasePool, DatabasePoolSet, jdbc_url};
pub use server::{CacheServerDescriptor, ServerDescriptor};
pub use settings_map::{DatabaseSettingsMap, extract_database_settings};
