//! Node publishing: create-then-overwrite writes of JSON and text values.

use crate::coordination::{
    domain::TreePath,
    ports::{ConfigTree, ConfigTreeError},
};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while publishing or reading tree nodes.
#[derive(Debug, Error)]
pub enum NodePublishError {
    /// Tree operation failed.
    #[error(transparent)]
    Tree(#[from] ConfigTreeError),

    /// Document could not be encoded or decoded as JSON.
    #[error("invalid JSON document at {path}: {source}")]
    Json {
        /// Node the document belongs to.
        path: TreePath,
        /// Underlying serialisation error.
        source: serde_json::Error,
    },
}

/// Result type for node publishing operations.
pub type NodePublishResult<T> = Result<T, NodePublishError>;

/// Writes values to tree nodes, creating missing path segments first.
///
/// Every write replaces the node's previous contents; there is no merge.
#[derive(Debug)]
pub struct NodePublisher<T>
where
    T: ConfigTree,
{
    tree: Arc<T>,
}

impl<T> NodePublisher<T>
where
    T: ConfigTree,
{
    /// Creates a publisher over the given tree.
    #[must_use]
    pub const fn new(tree: Arc<T>) -> Self {
        Self { tree }
    }

    /// Serialises `value` as compact JSON and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NodePublishError::Json`] when serialisation fails or
    /// [`NodePublishError::Tree`] when the write fails.
    pub async fn publish_json<V>(&self, path: &TreePath, value: &V) -> NodePublishResult<()>
    where
        V: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(value).map_err(|source| NodePublishError::Json {
            path: path.clone(),
            source,
        })?;
        self.publish_bytes(path, &data).await
    }

    /// Writes a UTF-8 string to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NodePublishError::Tree`] when the write fails.
    pub async fn publish_text(&self, path: &TreePath, text: &str) -> NodePublishResult<()> {
        self.publish_bytes(path, text.as_bytes()).await
    }

    /// Reads and decodes a JSON document.
    ///
    /// Missing nodes and nodes holding only whitespace yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`NodePublishError::Json`] when the stored data is not a valid
    /// document of type `V`, or [`NodePublishError::Tree`] when the read
    /// fails.
    pub async fn read_json<V>(&self, path: &TreePath) -> NodePublishResult<Option<V>>
    where
        V: DeserializeOwned,
    {
        let Some(data) = self.tree.get_data(path).await? else {
            return Ok(None);
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| NodePublishError::Json {
                path: path.clone(),
                source,
            })
    }

    async fn publish_bytes(&self, path: &TreePath, data: &[u8]) -> NodePublishResult<()> {
        self.tree.ensure_path(path).await?;
        self.tree.set_data(path, data).await?;
        tracing::debug!(node = %path, bytes = data.len(), "node written");
        Ok(())
    }
}
