//! Coordination tree port for node creation, writes, and reads.

use crate::coordination::domain::TreePath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for coordination tree operations.
pub type ConfigTreeResult<T> = Result<T, ConfigTreeError>;

/// Hierarchical key-value store contract.
///
/// Writes are unconditional overwrites: there is no versioning or conflict
/// detection.
#[async_trait]
pub trait ConfigTree: Send + Sync {
    /// Creates every missing node along `path`, including `path` itself.
    ///
    /// Existing nodes are left untouched.
    async fn ensure_path(&self, path: &TreePath) -> ConfigTreeResult<()>;

    /// Replaces the data stored at an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::NoNode`] when the node does not exist.
    async fn set_data(&self, path: &TreePath, data: &[u8]) -> ConfigTreeResult<()>;

    /// Reads the data stored at a node.
    ///
    /// Returns `None` when the node does not exist.
    async fn get_data(&self, path: &TreePath) -> ConfigTreeResult<Option<Vec<u8>>>;
}

/// Errors returned by coordination tree implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigTreeError {
    /// The node does not exist.
    #[error("coordination node not found: {0}")]
    NoNode(TreePath),

    /// The coordination service could not be reached.
    #[error("coordination service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Backend failure while serving a request.
    #[error("coordination tree error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigTreeError {
    /// Wraps a connection error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
