//! Service-level errors for cluster configuration publishing.

use crate::cluster::domain::ClusterDomainError;
use crate::coordination::services::NodePublishError;
use crate::datastore::services::SchemaProvisionError;
use thiserror::Error;

/// Errors returned by cluster configuration services.
#[derive(Debug, Error)]
pub enum ClusterPublishError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] ClusterDomainError),
    /// Provisioning the shared `api` schema failed.
    #[error(transparent)]
    Schema(#[from] SchemaProvisionError),
    /// Writing or reading a tree node failed.
    #[error(transparent)]
    Publish(#[from] NodePublishError),
}

/// Result type for cluster configuration services.
pub type ClusterPublishResult<T> = Result<T, ClusterPublishError>;
