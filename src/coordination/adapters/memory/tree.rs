//! In-memory coordination tree for tests and dry runs.

use crate::coordination::{
    domain::TreePath,
    ports::{ConfigTree, ConfigTreeError, ConfigTreeResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory coordination tree.
///
/// Nodes behave like persistent `ZooKeeper` nodes: the root always exists,
/// `set_data` fails on a missing node, and `ensure_path` creates missing
/// ancestors with empty data.
#[derive(Debug, Clone)]
pub struct InMemoryConfigTree {
    nodes: Arc<RwLock<BTreeMap<TreePath, Vec<u8>>>>,
}

impl Default for InMemoryConfigTree {
    fn default() -> Self {
        Self {
            nodes: Arc::new(RwLock::new(BTreeMap::from([(TreePath::root(), Vec::new())]))),
        }
    }
}

impl InMemoryConfigTree {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every node below the root, in lexical order.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn paths(&self) -> ConfigTreeResult<Vec<TreePath>> {
        let nodes = self
            .nodes
            .read()
            .map_err(|err| ConfigTreeError::backend(std::io::Error::other(err.to_string())))?;
        Ok(nodes.keys().filter(|path| !path.is_root()).cloned().collect())
    }

    /// Returns the direct children of `parent`.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn children(&self, parent: &TreePath) -> ConfigTreeResult<Vec<TreePath>> {
        let depth = parent.lineage().len() + 1;
        Ok(self
            .paths()?
            .into_iter()
            .filter(|path| {
                let lineage = path.lineage();
                lineage.len() == depth
                    && (parent.is_root() || lineage.iter().any(|ancestor| ancestor == parent))
            })
            .collect())
    }
}

#[async_trait]
impl ConfigTree for InMemoryConfigTree {
    async fn ensure_path(&self, path: &TreePath) -> ConfigTreeResult<()> {
        let mut nodes = self
            .nodes
            .write()
            .map_err(|err| ConfigTreeError::backend(std::io::Error::other(err.to_string())))?;
        for node in path.lineage() {
            nodes.entry(node).or_default();
        }
        Ok(())
    }

    async fn set_data(&self, path: &TreePath, data: &[u8]) -> ConfigTreeResult<()> {
        let mut nodes = self
            .nodes
            .write()
            .map_err(|err| ConfigTreeError::backend(std::io::Error::other(err.to_string())))?;
        let slot = nodes
            .get_mut(path)
            .ok_or_else(|| ConfigTreeError::NoNode(path.clone()))?;
        data.clone_into(slot);
        Ok(())
    }

    async fn get_data(&self, path: &TreePath) -> ConfigTreeResult<Option<Vec<u8>>> {
        let nodes = self
            .nodes
            .read()
            .map_err(|err| ConfigTreeError::backend(std::io::Error::other(err.to_string())))?;
        Ok(nodes.get(path).cloned())
    }
}
