//! Pool documents published to the coordination tree.

use super::CacheServerDescriptor;
use crate::datastore::domain::DatabaseSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

const JDBC_OPTIONS: &str = concat!(
    "characterEncoding=utf8",
    "&useServerPrepStmts=true",
    "&logger=com.mysql.jdbc.log.StandardLogger",
    "&roundRobinLoadBalance=true",
    "&transformedBitIsBoolean=true",
    "&rewriteBatchedStatements=true",
);

/// Builds the load-balanced replication JDBC URL for one server.
///
/// The server is listed as both master and slave.
#[must_use]
pub fn jdbc_url(host: &str, port: u16) -> String {
    format!("jdbc:mysql:replication://{host}:{port},{host}:{port}/?{JDBC_OPTIONS}")
}

/// Connection pool definition for one logical database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabasePool {
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// JDBC connection URL.
    pub jdbc: String,
    /// Logical database name.
    pub name: String,
}

impl DatabasePool {
    /// Builds the pool definition for a database.
    #[must_use]
    pub fn for_database(name: &str, settings: &DatabaseSettings) -> Self {
        Self {
            user: settings.user.clone(),
            password: settings.password.clone(),
            jdbc: jdbc_url(&settings.host, settings.port),
            name: name.to_owned(),
        }
    }
}

impl fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabasePool")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("jdbc", &self.jdbc)
            .field("name", &self.name)
            .finish()
    }
}

/// Document holding every database pool: `{"dbs": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabasePoolSet {
    /// Pool definitions in manifest order.
    pub dbs: Vec<DatabasePool>,
}

/// Memcached pool document: `{"servers": "h1:p1,h2:p2", "numClients": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePool {
    /// Comma-separated `host:port` list.
    pub servers: String,
    /// Number of client connections per server.
    #[serde(rename = "numClients")]
    pub num_clients: u32,
}

impl CachePool {
    /// Client connections per server in published pools.
    pub const NUM_CLIENTS: u32 = 1;

    /// Builds the pool document from server descriptors, keeping their
    /// order.
    #[must_use]
    pub fn from_servers(servers: &[CacheServerDescriptor]) -> Self {
        Self {
            servers: servers
                .iter()
                .map(CacheServerDescriptor::address)
                .collect::<Vec<_>>()
                .join(","),
            num_clients: Self::NUM_CLIENTS,
        }
    }
}
