//! cloud-api-smoke: call a few read-only operations against a live API.
//!
//! Reads CLOUD_API_BASE_URL, CLOUD_API_KEY, CLOUD_PROJECT_ID and
//! CLOUD_API_TIMEOUT_MS from the environment.

use anyhow::Context;
use cloud_api_sdk::operations::clusters::ListClustersParams;
use cloud_api_sdk::operations::projects::ListProjectsParams;
use cloud_api_sdk::{setup_config, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env().context("loading configuration from environment")?;
    let project_id = std::env::var("CLOUD_PROJECT_ID").ok();
    let client = setup_config(config);
    println!("target: {}", client.base_url());

    let projects = client
        .list_projects(ListProjectsParams::default())
        .await
        .context("listProjects failed")?;
    println!("listProjects: {} ({} items)", projects.status, projects.data.items.len());
    for project in &projects.data.items {
        println!("  {} {}", project.id, project.name);
    }

    let clusters = client
        .list_clusters(ListClustersParams {
            project_id,
            ..Default::default()
        })
        .await
        .context("listClusters failed")?;
    println!("listClusters: {} ({} items)", clusters.status, clusters.data.items.len());
    for cluster in &clusters.data.items {
        println!("  {} {} {:?}", cluster.id, cluster.name, cluster.status);
    }
    Ok(())
}
