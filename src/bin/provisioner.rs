//! Provisions a multi-tenant deployment from a JSON manifest.
//!
//! Usage:
//!
//! ```text
//! provisioner --zk-connect zk1:2181 --manifest deploy.json all
//! ```
//!
//! Commands:
//!
//! - `dbcp`: create the `api` schema on every database and publish the
//!   database pools
//! - `memcache`: publish the memcached pool
//! - `clients`: create client schemas and credentials, publish client nodes
//! - `all`: `dbcp`, `memcache`, then `clients`
//! - `inspect`: read back and decode the published pool documents
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::WrapErr;
use mockable::DefaultClock;
use provisioner::coordination::adapters::zookeeper::ZooKeeperConfigTree;
use provisioner::datastore::adapters::mysql::MysqlConnector;
use provisioner::datastore::scripts::{DEFAULT_SCHEMA_DIR, ScriptLibrary};
use provisioner::manifest::Manifest;
use provisioner::workflow::{Step, Workflow, WorkflowReport};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "provisioner")]
#[command(about = "Provision client schemas and publish cluster configuration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// `ZooKeeper` connect string
    #[arg(long, env = "PROVISIONER_ZK_CONNECT", default_value = "localhost:2181")]
    zk_connect: String,

    /// Seconds to wait for the `ZooKeeper` session
    #[arg(long, default_value_t = 10)]
    zk_timeout_secs: u64,

    /// Seconds to wait for each `MySQL` connection
    #[arg(long, default_value_t = 30)]
    db_timeout_secs: u64,

    /// Directory holding `api.sql` and `client.sql`
    #[arg(long, default_value = DEFAULT_SCHEMA_DIR)]
    schema_dir: Utf8PathBuf,

    /// Provisioning manifest (JSON)
    #[arg(long)]
    manifest: Utf8PathBuf,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Create the `api` schema on every database and publish the pools
    Dbcp,
    /// Publish the memcached server list
    Memcache,
    /// Provision and publish every client
    Clients,
    /// Run dbcp, memcache, and clients in order
    All,
    /// Read back the published pool documents
    Inspect,
}

impl From<Command> for Step {
    fn from(command: Command) -> Self {
        match command {
            Command::Dbcp => Self::DatabasePools,
            Command::Memcache => Self::CachePool,
            Command::Clients => Self::Clients,
            Command::All => Self::All,
            Command::Inspect => Self::Inspect,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let manifest = Manifest::from_file(&cli.manifest)?;
    let step = Step::from(cli.command);

    let tree = ZooKeeperConfigTree::connect(
        &cli.zk_connect,
        Duration::from_secs(cli.zk_timeout_secs),
    )
    .await
    .wrap_err_with(|| format!("connecting to ZooKeeper at {}", cli.zk_connect))?;
    let connector = MysqlConnector::new(Duration::from_secs(cli.db_timeout_secs));

    let mut workflow = Workflow::new(Arc::new(tree), Arc::new(connector), Arc::new(DefaultClock));
    if step.needs_schema_scripts() {
        let scripts = ScriptLibrary::open(&cli.schema_dir)?;
        workflow = workflow.with_scripts(Arc::new(scripts));
    }

    let report = workflow.run(step, &manifest).await?;
    log_report(&report);
    Ok(())
}

fn log_report(report: &WorkflowReport) {
    if let Some(pools) = &report.database_pools {
        for pool in &pools.dbs {
            tracing::info!(name = %pool.name, jdbc = %pool.jdbc, "database pool");
        }
    }
    if let Some(cache) = &report.cache_pool {
        tracing::info!(servers = %cache.servers, clients = cache.num_clients, "cache pool");
    }
    for client in &report.clients {
        tracing::info!(
            client = %client.client,
            database = %client.database,
            schema = ?client.schema,
            settings = client.leaves.len(),
            "client provisioned"
        );
    }
}
