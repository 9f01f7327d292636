//! Provisioning manifest: the JSON document describing what to provision.
//!
//! ```json
//! {
//!   "db_servers": [{"name": "ClientDB", "host": "db1", "port": 3306, "user": "root", "password": "secret"}],
//!   "memcache_servers": [{"host": "cache1", "port": 11211}],
//!   "clients": [{"name": "acme", "db": null, "algorithms": "recentItems"}],
//!   "consumer_details": {"js_consumer_key": "ACMEJSKEY"},
//!   "nodes": {"dbcp": "/config/dbcp", "memcache": "/config/memcached", "clients": "/all_clients"}
//! }
//! ```
//!
//! Every section is optional. Commands that need a missing section fail
//! with [`ConfigError::MissingSection`].

use crate::cluster::domain::{CacheServerDescriptor, ServerDescriptor};
use crate::coordination::domain::TreePath;
use crate::datastore::domain::ConsumerOverrides;
use crate::tenant::domain::ClientDescriptor;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has the wrong shape.
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Underlying decoding error.
        source: serde_json::Error,
    },

    /// A section required by the requested command is absent.
    #[error("manifest has no '{0}' section")]
    MissingSection(&'static str),
}

/// Coordination tree nodes the provisioner writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeLayout {
    /// Node holding the database pool set.
    pub dbcp: TreePath,
    /// Node holding the memcached pool.
    pub memcache: TreePath,
    /// Parent of the per-client nodes.
    pub clients: TreePath,
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            dbcp: TreePath::from_static("/config/dbcp"),
            memcache: TreePath::from_static("/config/memcached"),
            clients: TreePath::from_static("/all_clients"),
        }
    }
}

/// Parsed provisioning manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Database servers, one per logical database.
    #[serde(default)]
    pub db_servers: Option<Vec<ServerDescriptor>>,
    /// Memcached servers.
    #[serde(default)]
    pub memcache_servers: Option<Vec<CacheServerDescriptor>>,
    /// Tenant clients.
    #[serde(default)]
    pub clients: Option<Vec<ClientDescriptor>>,
    /// Credential overrides shared by every client.
    #[serde(default)]
    pub consumer_details: Option<ConsumerOverrides>,
    /// Target nodes.
    #[serde(default)]
    pub nodes: NodeLayout,
}

impl Manifest {
    /// Loads a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid manifest.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| read_error(std::io::Error::other("path must include a file name")))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let bytes = dir.read(file_name).map_err(read_error)?;
        Self::from_slice(path, &bytes)
    }

    /// Parses a manifest from JSON bytes; `origin` names the source in
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the bytes are not a valid
    /// manifest.
    pub fn from_slice(origin: &Utf8Path, bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|source| ConfigError::Parse {
            path: origin.to_owned(),
            source,
        })
    }

    /// Returns the database servers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] when `db_servers` is absent.
    pub fn database_servers(&self) -> Result<&[ServerDescriptor], ConfigError> {
        self.db_servers
            .as_deref()
            .ok_or(ConfigError::MissingSection("db_servers"))
    }

    /// Returns the memcached servers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] when `memcache_servers` is
    /// absent.
    pub fn cache_servers(&self) -> Result<&[CacheServerDescriptor], ConfigError> {
        self.memcache_servers
            .as_deref()
            .ok_or(ConfigError::MissingSection("memcache_servers"))
    }

    /// Returns the tenant clients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] when `clients` is absent.
    pub fn client_descriptors(&self) -> Result<&[ClientDescriptor], ConfigError> {
        self.clients
            .as_deref()
            .ok_or(ConfigError::MissingSection("clients"))
    }

    /// Returns the credential overrides, empty when none are given.
    #[must_use]
    pub fn consumer_overrides(&self) -> ConsumerOverrides {
        self.consumer_details.clone().unwrap_or_default()
    }
}
