//! Ordered mapping from logical database name to connection settings.

use super::{ClusterDomainError, ServerDescriptor};
use crate::datastore::domain::DatabaseSettings;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Connection settings keyed by logical database name, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettingsMap {
    databases: IndexMap<String, DatabaseSettings>,
}

impl DatabaseSettingsMap {
    /// Builds the map from server descriptors, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterDomainError::DuplicateDatabase`] when two servers
    /// share a name.
    pub fn from_servers(servers: &[ServerDescriptor]) -> Result<Self, ClusterDomainError> {
        let mut databases = IndexMap::with_capacity(servers.len());
        for server in servers {
            match databases.entry(server.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(ClusterDomainError::DuplicateDatabase(server.name.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(server.settings());
                }
            }
        }
        Ok(Self { databases })
    }

    /// Returns the settings of the named database.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DatabaseSettings> {
        self.databases.get(name)
    }

    /// Returns the stored name and settings of the named database.
    #[must_use]
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &DatabaseSettings)> {
        self.databases
            .get_key_value(name)
            .map(|(key, settings)| (key.as_str(), settings))
    }

    /// Returns the database used by clients that do not name one: the
    /// first server in manifest order.
    #[must_use]
    pub fn default_database(&self) -> Option<(&str, &DatabaseSettings)> {
        self.databases
            .first()
            .map(|(name, settings)| (name.as_str(), settings))
    }

    /// Iterates over `(name, settings)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatabaseSettings)> {
        self.databases
            .iter()
            .map(|(name, settings)| (name.as_str(), settings))
    }

    /// Returns the number of databases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    /// Returns `true` when no database is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}

/// Extracts per-database connection settings from server descriptors.
///
/// # Errors
///
/// Returns [`ClusterDomainError::DuplicateDatabase`] when two servers share
/// a name.
pub fn extract_database_settings(
    servers: &[ServerDescriptor],
) -> Result<DatabaseSettingsMap, ClusterDomainError> {
    DatabaseSettingsMap::from_servers(servers)
}
