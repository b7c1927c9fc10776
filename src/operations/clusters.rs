use super::{segment, Prepared};
use crate::config::ClientConfig;
use crate::models::{
    Cluster, ClusterCredentials, ClusterList, CreateClusterRequest, CreateNodePoolRequest,
    NodePool, NodePoolList, Operation, ScaleClusterRequest, UpdateClusterRequest,
};
use crate::response::ApiResponse;
use crate::transport::{PreparedRequest, RequestOptions};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

fn cluster_path(cluster_id: &str) -> Result<String> {
    Ok(format!("/v1/clusters/{}", segment("clusterId", cluster_id)?))
}

// listClusters

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListClustersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Server-side filter expression, e.g. `status=RUNNING`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_clusters_request(params: ListClustersParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/clusters",
        RequestOptions::new(Method::GET)
            .query_opt("projectId", params.project_id)
            .query_opt("filter", params.filter)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_clusters(
    params: ListClustersParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<ClusterList>> {
    list_clusters_request(params)?.send(config).await?.json()
}

// getCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetClusterParams {
    pub cluster_id: String,
}

pub fn get_cluster_request(params: GetClusterParams) -> Prepared {
    Ok(PreparedRequest::new(
        cluster_path(&params.cluster_id)?,
        RequestOptions::new(Method::GET),
    ))
}

pub async fn get_cluster(
    params: GetClusterParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Cluster>> {
    get_cluster_request(params)?.send(config).await?.json()
}

// createCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClusterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub body: CreateClusterRequest,
}

pub fn create_cluster_request(params: CreateClusterParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/clusters",
        RequestOptions::new(Method::POST)
            .query_opt("projectId", params.project_id)
            .json(&params.body)?,
    ))
}

pub async fn create_cluster(
    params: CreateClusterParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Cluster>> {
    create_cluster_request(params)?.send(config).await?.json()
}

// updateCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClusterParams {
    pub cluster_id: String,
    /// Optimistic concurrency: only apply when the cluster's etag matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_match: Option<String>,
    pub body: UpdateClusterRequest,
}

pub fn update_cluster_request(params: UpdateClusterParams) -> Prepared {
    let mut options = RequestOptions::new(Method::PATCH).json(&params.body)?;
    if let Some(etag) = params.if_match {
        options = options.header("If-Match", etag);
    }
    Ok(PreparedRequest::new(cluster_path(&params.cluster_id)?, options))
}

pub async fn update_cluster(
    params: UpdateClusterParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Cluster>> {
    update_cluster_request(params)?.send(config).await?.json()
}

// deleteCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteClusterParams {
    pub cluster_id: String,
    /// Delete even when applications are still scheduled on the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

pub fn delete_cluster_request(params: DeleteClusterParams) -> Prepared {
    Ok(PreparedRequest::new(
        cluster_path(&params.cluster_id)?,
        RequestOptions::new(Method::DELETE).query_opt("force", params.force),
    ))
}

pub async fn delete_cluster(
    params: DeleteClusterParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<()>> {
    delete_cluster_request(params)?.send(config).await?.empty()
}

// startCluster / stopCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterActionParams {
    pub cluster_id: String,
}

pub fn start_cluster_request(params: ClusterActionParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/start", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::POST),
    ))
}

pub async fn start_cluster(
    params: ClusterActionParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    start_cluster_request(params)?.send(config).await?.json()
}

pub fn stop_cluster_request(params: ClusterActionParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/stop", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::POST),
    ))
}

pub async fn stop_cluster(
    params: ClusterActionParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    stop_cluster_request(params)?.send(config).await?.json()
}

// scaleCluster

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScaleClusterParams {
    pub cluster_id: String,
    pub body: ScaleClusterRequest,
}

pub fn scale_cluster_request(params: ScaleClusterParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/scale", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::POST).json(&params.body)?,
    ))
}

pub async fn scale_cluster(
    params: ScaleClusterParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    scale_cluster_request(params)?.send(config).await?.json()
}

// getClusterCredentials

pub fn get_cluster_credentials_request(params: ClusterActionParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/credentials", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::GET),
    ))
}

pub async fn get_cluster_credentials(
    params: ClusterActionParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<ClusterCredentials>> {
    get_cluster_credentials_request(params)?
        .send(config)
        .await?
        .json()
}

// listNodePools

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListNodePoolsParams {
    pub cluster_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_node_pools_request(params: ListNodePoolsParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/node-pools", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::GET)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_node_pools(
    params: ListNodePoolsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<NodePoolList>> {
    list_node_pools_request(params)?.send(config).await?.json()
}

// createNodePool

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateNodePoolParams {
    pub cluster_id: String,
    pub body: CreateNodePoolRequest,
}

pub fn create_node_pool_request(params: CreateNodePoolParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/node-pools", cluster_path(&params.cluster_id)?),
        RequestOptions::new(Method::POST).json(&params.body)?,
    ))
}

pub async fn create_node_pool(
    params: CreateNodePoolParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<NodePool>> {
    create_node_pool_request(params)?.send(config).await?.json()
}

// deleteNodePool

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteNodePoolParams {
    pub cluster_id: String,
    pub node_pool_id: String,
}

pub fn delete_node_pool_request(params: DeleteNodePoolParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!(
            "{}/node-pools/{}",
            cluster_path(&params.cluster_id)?,
            segment("nodePoolId", &params.node_pool_id)?
        ),
        RequestOptions::new(Method::DELETE),
    ))
}

pub async fn delete_node_pool(
    params: DeleteNodePoolParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<()>> {
    delete_node_pool_request(params)?.send(config).await?.empty()
}
