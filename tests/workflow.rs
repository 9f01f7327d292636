//! End-to-end provisioning runs against in-memory adapters.
//!
//! Each scenario loads a manifest, runs workflow steps, and checks both the
//! coordination tree contents and the database side effects.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use camino::Utf8Path;
use eyre::{Result, eyre};
use mockable::DefaultClock;
use provisioner::coordination::{
    adapters::memory::InMemoryConfigTree, domain::TreePath, ports::ConfigTree,
};
use provisioner::datastore::{
    adapters::memory::InMemoryDatabaseCluster,
    domain::{ConsumerScope, SchemaName, SchemaScriptKind},
    scripts::ScriptLibrary,
};
use provisioner::manifest::{ConfigError, Manifest};
use provisioner::workflow::{Step, Workflow, WorkflowError};
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestWorkflow = Workflow<InMemoryConfigTree, InMemoryDatabaseCluster, DefaultClock>;

const MANIFEST: &str = r#"{
    "db_servers": [
        {"name": "ClientDB", "host": "db1", "port": 3306, "user": "root", "password": "secret"},
        {"name": "ReportingDB", "host": "db2", "port": 3307, "user": "root", "password": "secret"}
    ],
    "memcache_servers": [
        {"host": "cache1", "port": 11211},
        {"host": "cache2", "port": 11211}
    ],
    "clients": [
        {"name": "acme", "db": null, "algorithms": "recentItems", "max_items": 20},
        {"name": "globex", "db": "ReportingDB", "locale": "en_GB"}
    ],
    "consumer_details": {"js_consumer_key": "SHAREDJSKEY"}
}"#;

struct Deployment {
    tree: Arc<InMemoryConfigTree>,
    cluster: InMemoryDatabaseCluster,
    workflow: TestWorkflow,
}

#[fixture]
fn deployment() -> Deployment {
    let tree = Arc::new(InMemoryConfigTree::new());
    let cluster = InMemoryDatabaseCluster::new();
    let scripts = ScriptLibrary::inline([
        (SchemaScriptKind::Api, "CREATE DATABASE api; USE api;"),
        (SchemaScriptKind::Client, "CREATE TABLE items (id INT);"),
    ]);
    let workflow = Workflow::new(
        Arc::clone(&tree),
        Arc::new(cluster.clone()),
        Arc::new(DefaultClock),
    )
    .with_scripts(Arc::new(scripts));
    Deployment {
        tree,
        cluster,
        workflow,
    }
}

fn manifest(raw: &str) -> Result<Manifest> {
    Ok(Manifest::from_slice(Utf8Path::new("manifest.json"), raw.as_bytes())?)
}

async fn node_text(tree: &InMemoryConfigTree, raw: &str) -> Result<String> {
    let path = TreePath::new(raw)?;
    let data = tree
        .get_data(&path)
        .await?
        .ok_or_else(|| eyre!("node {raw} is missing"))?;
    Ok(String::from_utf8(data)?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_run_publishes_every_document(deployment: Deployment) -> Result<()> {
    let manifest = manifest(MANIFEST)?;

    let report = deployment.workflow.run(Step::All, &manifest).await?;

    let pools = report
        .database_pools
        .ok_or_else(|| eyre!("database pools missing from report"))?;
    let names: Vec<_> = pools.dbs.iter().map(|pool| pool.name.as_str()).collect();
    assert_eq!(names, vec!["ClientDB", "ReportingDB"]);
    assert_eq!(
        node_text(&deployment.tree, "/config/memcached").await?,
        r#"{"servers":"cache1:11211,cache2:11211","numClients":1}"#
    );
    assert!(
        node_text(&deployment.tree, "/config/dbcp")
            .await?
            .contains("jdbc:mysql:replication://db2:3307,db2:3307/?")
    );
    assert_eq!(
        node_text(&deployment.tree, "/all_clients/acme").await?,
        r#"{"DB_JNDI_NAME":"ClientDB"}"#
    );
    assert_eq!(
        node_text(&deployment.tree, "/all_clients/acme/max_items").await?,
        "20"
    );
    assert_eq!(
        node_text(&deployment.tree, "/all_clients/globex").await?,
        r#"{"DB_JNDI_NAME":"ReportingDB"}"#
    );
    assert_eq!(
        node_text(&deployment.tree, "/all_clients/globex/locale").await?,
        "en_GB"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_run_provisions_schemas_and_credentials(deployment: Deployment) -> Result<()> {
    let manifest = manifest(MANIFEST)?;

    deployment.workflow.run(Step::All, &manifest).await?;

    assert_eq!(
        deployment.cluster.schemas("db1:3306")?,
        vec![SchemaName::new("acme")?, SchemaName::api()]
    );
    assert_eq!(
        deployment.cluster.schemas("db2:3307")?,
        vec![SchemaName::api(), SchemaName::new("globex")?]
    );

    let js_keys: Vec<_> = ["db1:3306", "db2:3307"]
        .into_iter()
        .map(|server| deployment.cluster.consumers(server))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .filter(|row| row.scope() == ConsumerScope::Js)
        .map(|row| (row.short_name().to_owned(), row.consumer_key().to_owned()))
        .collect();
    assert_eq!(
        js_keys,
        vec![
            ("acme".to_owned(), "SHAREDJSKEY".to_owned()),
            ("globex".to_owned(), "SHAREDJSKEY".to_owned()),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_run_is_idempotent(deployment: Deployment) -> Result<()> {
    let manifest = manifest(MANIFEST)?;

    deployment.workflow.run(Step::All, &manifest).await?;
    let first_paths = deployment.tree.paths()?;
    deployment.workflow.run(Step::All, &manifest).await?;

    assert_eq!(deployment.tree.paths()?, first_paths);
    assert_eq!(deployment.cluster.schema_creations()?.len(), 4);
    assert_eq!(deployment.cluster.consumers("db1:3306")?.len(), 2);
    assert_eq!(deployment.cluster.consumers("db2:3307")?.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inspect_reads_back_published_pools(deployment: Deployment) -> Result<()> {
    let manifest = manifest(MANIFEST)?;
    let published = deployment.workflow.run(Step::All, &manifest).await?;

    let inspected = deployment.workflow.run(Step::Inspect, &manifest).await?;

    assert_eq!(inspected.database_pools, published.database_pools);
    assert_eq!(inspected.cache_pool, published.cache_pool);
    assert!(inspected.clients.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inspect_of_empty_tree_finds_nothing(deployment: Deployment) -> Result<()> {
    let report = deployment.workflow.run(Step::Inspect, &manifest("{}")?).await?;

    assert_eq!(report.database_pools, None);
    assert_eq!(report.cache_pool, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_nodes_are_honoured(deployment: Deployment) -> Result<()> {
    let manifest = manifest(
        r#"{
            "memcache_servers": [{"host": "cache1", "port": 11211}],
            "nodes": {"memcache": "/seldon/memcache"}
        }"#,
    )?;

    deployment.workflow.run(Step::CachePool, &manifest).await?;

    assert_eq!(
        node_text(&deployment.tree, "/seldon/memcache").await?,
        r#"{"servers":"cache1:11211","numClients":1}"#
    );
    assert!(
        !deployment
            .tree
            .paths()?
            .contains(&TreePath::new("/config/memcached")?)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_section_is_a_configuration_error(deployment: Deployment) {
    let manifest = manifest(r#"{"db_servers": []}"#).expect("valid manifest");

    let result = deployment.workflow.run(Step::Clients, &manifest).await;

    assert!(matches!(
        result,
        Err(WorkflowError::Config(ConfigError::MissingSection("clients")))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provisioning_steps_require_scripts() {
    let workflow: TestWorkflow = Workflow::new(
        Arc::new(InMemoryConfigTree::new()),
        Arc::new(InMemoryDatabaseCluster::new()),
        Arc::new(DefaultClock),
    );
    let manifest = manifest(MANIFEST).expect("valid manifest");

    let result = workflow.run(Step::DatabasePools, &manifest).await;

    assert!(matches!(
        result,
        Err(WorkflowError::MissingScripts(Step::DatabasePools))
    ));
    assert!(Step::All.needs_schema_scripts());
    assert!(!Step::CachePool.needs_schema_scripts());
    assert!(!Step::Inspect.needs_schema_scripts());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_database_aborts_before_pools_are_published(
    deployment: Deployment,
) -> Result<()> {
    deployment.cluster.mark_unreachable("db2:3307")?;
    let manifest = manifest(MANIFEST)?;

    let result = deployment.workflow.run(Step::All, &manifest).await;

    assert!(matches!(result, Err(WorkflowError::Cluster(_))));
    assert!(deployment.tree.paths()?.is_empty());
    assert_eq!(deployment.cluster.schemas("db1:3306")?, vec![SchemaName::api()]);
    Ok(())
}
