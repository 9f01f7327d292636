//! Services publishing and reading cluster configuration documents.

mod cache_pool;
mod database_pools;
mod error;
mod inspector;

pub use cache_pool::CachePoolPublisher;
pub use database_pools::DatabasePoolPublisher;
pub use error::{ClusterPublishError, ClusterPublishResult};
pub use inspector::ClusterInspector;
