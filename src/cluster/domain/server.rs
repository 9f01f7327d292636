//! Server descriptors read from the provisioning manifest.

use crate::datastore::domain::DatabaseSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database server entry: a logical database name plus connection details.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Logical database name, also used as the JNDI name.
    pub name: String,
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
}

impl ServerDescriptor {
    /// Returns the connection settings of this server.
    #[must_use]
    pub fn settings(&self) -> DatabaseSettings {
        DatabaseSettings::new(
            self.host.as_str(),
            self.port,
            self.user.as_str(),
            self.password.as_str(),
        )
    }
}

impl fmt::Debug for ServerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerDescriptor")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Memcached server entry. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheServerDescriptor {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl CacheServerDescriptor {
    /// Creates a cache server descriptor.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the `host:port` address of the server.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
