//! In-memory database servers for provisioning tests.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::datastore::{
    domain::{
        ConsumerRecord, ConsumerScope, DatabaseSettings, SchemaName, SchemaScript,
        SchemaScriptKind,
    },
    ports::{DatabaseConnector, DatastoreError, DatastoreResult, ProvisioningSession},
};

/// Schema script run recorded by [`InMemoryDatabaseCluster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCreation {
    /// `host:port` of the server the script ran against.
    pub server: String,
    /// Schema that was created.
    pub schema: SchemaName,
    /// Script that created it.
    pub kind: SchemaScriptKind,
}

/// Thread-safe set of fake database servers keyed by `host:port`.
///
/// Every address is reachable unless marked otherwise. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabaseCluster {
    state: Arc<RwLock<ClusterState>>,
}

#[derive(Debug, Default)]
struct ClusterState {
    unreachable: HashSet<String>,
    schemas: HashMap<String, BTreeSet<SchemaName>>,
    consumers: HashMap<String, Vec<ConsumerRecord>>,
    creations: Vec<SchemaCreation>,
    connections: usize,
}

impl InMemoryDatabaseCluster {
    /// Creates a cluster with no schemas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes connections to `address` fail.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn mark_unreachable(&self, address: &str) -> DatastoreResult<()> {
        self.write()?.unreachable.insert(address.to_owned());
        Ok(())
    }

    /// Records an existing schema without logging a creation.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn seed_schema(&self, address: &str, schema: SchemaName) -> DatastoreResult<()> {
        self.write()?
            .schemas
            .entry(address.to_owned())
            .or_default()
            .insert(schema);
        Ok(())
    }

    /// Records an existing consumer row.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn seed_consumer(&self, address: &str, record: ConsumerRecord) -> DatastoreResult<()> {
        self.write()?
            .consumers
            .entry(address.to_owned())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Returns the schemas present on `address`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn schemas(&self, address: &str) -> DatastoreResult<Vec<SchemaName>> {
        Ok(self
            .read()?
            .schemas
            .get(address)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Returns every schema script run, in execution order.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn schema_creations(&self) -> DatastoreResult<Vec<SchemaCreation>> {
        Ok(self.read()?.creations.clone())
    }

    /// Returns the consumer rows on `address`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn consumers(&self, address: &str) -> DatastoreResult<Vec<ConsumerRecord>> {
        Ok(self
            .read()?
            .consumers
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    /// Returns how many sessions have been opened.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn connection_count(&self) -> DatastoreResult<usize> {
        Ok(self.read()?.connections)
    }

    fn read(&self) -> DatastoreResult<RwLockReadGuard<'_, ClusterState>> {
        self.state
            .read()
            .map_err(|err| DatastoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> DatastoreResult<RwLockWriteGuard<'_, ClusterState>> {
        self.state
            .write()
            .map_err(|err| DatastoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl DatabaseConnector for InMemoryDatabaseCluster {
    type Session = InMemoryProvisioningSession;

    async fn connect(&self, settings: &DatabaseSettings) -> DatastoreResult<Self::Session> {
        let address = settings.address();
        let mut state = self.write()?;
        if state.unreachable.contains(&address) {
            return Err(DatastoreError::unavailable(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("cannot connect to {address}"),
            )));
        }
        state.connections += 1;
        Ok(InMemoryProvisioningSession {
            cluster: self.clone(),
            address,
        })
    }
}

/// Session bound to one server of an [`InMemoryDatabaseCluster`].
#[derive(Debug, Clone)]
pub struct InMemoryProvisioningSession {
    cluster: InMemoryDatabaseCluster,
    address: String,
}

impl InMemoryProvisioningSession {
    /// Returns the `host:port` this session is connected to.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl ProvisioningSession for InMemoryProvisioningSession {
    async fn schema_exists(&self, schema: &SchemaName) -> DatastoreResult<bool> {
        let state = self.cluster.read()?;
        Ok(state
            .schemas
            .get(&self.address)
            .is_some_and(|names| names.contains(schema)))
    }

    async fn create_schema(
        &self,
        schema: &SchemaName,
        script: &SchemaScript,
    ) -> DatastoreResult<()> {
        let mut state = self.cluster.write()?;
        let created = state
            .schemas
            .entry(self.address.clone())
            .or_default()
            .insert(schema.clone());
        if !created {
            return Err(DatastoreError::persistence(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("database '{schema}' exists"),
            )));
        }
        state.creations.push(SchemaCreation {
            server: self.address.clone(),
            schema: schema.clone(),
            kind: script.kind(),
        });
        Ok(())
    }

    async fn consumer_exists(
        &self,
        short_name: &str,
        scope: ConsumerScope,
    ) -> DatastoreResult<bool> {
        let state = self.cluster.read()?;
        Ok(state.consumers.get(&self.address).is_some_and(|rows| {
            rows.iter()
                .any(|row| row.short_name() == short_name && row.scope() == scope)
        }))
    }

    async fn insert_consumer(&self, record: &ConsumerRecord) -> DatastoreResult<()> {
        self.cluster
            .write()?
            .consumers
            .entry(self.address.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
