//! Client descriptors and their published settings.

use super::TenantDomainError;
use crate::cluster::domain::DatabaseSettingsMap;
use crate::coordination::domain::{TreePath, TreePathError};
use crate::datastore::domain::{DatabaseSettings, SchemaName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tenant client: its name, optional database, and free-form settings.
///
/// Every manifest key other than `name` and `db` lands in `settings`, in
/// manifest order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDescriptor {
    /// Client name, used as schema name, consumer short name, and node name.
    pub name: String,
    /// Logical database name; `None` selects the default database.
    #[serde(default)]
    pub db: Option<String>,
    /// Remaining settings, each published as one leaf node.
    #[serde(flatten)]
    pub settings: IndexMap<String, Value>,
}

impl ClientDescriptor {
    /// Creates a client with no settings.
    #[must_use]
    pub fn new(name: impl Into<String>, db: Option<String>) -> Self {
        Self {
            name: name.into(),
            db,
            settings: IndexMap::new(),
        }
    }

    /// Adds one setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Returns the client's schema name.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::InvalidClientName`] when the name is not
    /// a valid schema identifier.
    pub fn schema_name(&self) -> Result<SchemaName, TenantDomainError> {
        SchemaName::new(self.name.as_str()).map_err(|source| {
            TenantDomainError::InvalidClientName {
                name: self.name.clone(),
                source,
            }
        })
    }

    /// Resolves the database this client is provisioned on.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::UnknownDatabase`] when the named database
    /// is not configured, or [`TenantDomainError::NoDatabases`] when no name
    /// is given and no database exists.
    pub fn resolve_database<'a>(
        &self,
        databases: &'a DatabaseSettingsMap,
    ) -> Result<(&'a str, &'a DatabaseSettings), TenantDomainError> {
        match &self.db {
            Some(requested) => databases
                .get_key_value(requested)
                .ok_or_else(|| TenantDomainError::UnknownDatabase {
                    client: self.name.clone(),
                    database: requested.clone(),
                }),
            None => databases
                .default_database()
                .ok_or_else(|| TenantDomainError::NoDatabases(self.name.clone())),
        }
    }

    /// Returns the client node `<parent>/<name>`.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::InvalidClientName`] when the name is not
    /// a valid schema identifier.
    pub fn node(&self, parent: &TreePath) -> Result<TreePath, TenantDomainError> {
        let schema = self.schema_name()?;
        parent
            .join(schema.as_str())
            .map_err(|source| self.invalid_segment(schema.as_str(), source))
    }

    /// Returns `(leaf node, text)` for every setting, in manifest order.
    ///
    /// # Errors
    ///
    /// Returns [`TenantDomainError::InvalidNodeName`] when a key is empty or
    /// contains `/`.
    pub fn setting_leaves(
        &self,
        client_node: &TreePath,
    ) -> Result<Vec<(TreePath, String)>, TenantDomainError> {
        self.settings
            .iter()
            .map(|(key, value)| {
                let leaf = client_node
                    .join(key)
                    .map_err(|source| self.invalid_segment(key, source))?;
                Ok((leaf, setting_text(value)))
            })
            .collect()
    }

    fn invalid_segment(&self, segment: &str, source: TreePathError) -> TenantDomainError {
        TenantDomainError::InvalidNodeName {
            client: self.name.clone(),
            segment: segment.to_owned(),
            source,
        }
    }
}

/// Converts a setting value to the text stored in its leaf node.
///
/// Strings are stored verbatim; any other value as compact JSON.
#[must_use]
pub fn setting_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Document written to a client's node: the JNDI name of its database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBinding {
    /// Logical database name the client's pool is looked up by.
    #[serde(rename = "DB_JNDI_NAME")]
    pub db_jndi_name: String,
}
