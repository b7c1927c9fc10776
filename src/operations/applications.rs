use super::{segment, Prepared};
use crate::config::ClientConfig;
use crate::models::{
    Application, ApplicationList, CreateApplicationRequest, DeployApplicationRequest, Deployment,
    DeploymentList, Operation, RollbackApplicationRequest, UpdateApplicationRequest,
};
use crate::response::ApiResponse;
use crate::transport::{PreparedRequest, RequestOptions};
use crate::Result;
use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

fn application_path(application_id: &str) -> Result<String> {
    Ok(format!(
        "/v1/applications/{}",
        segment("applicationId", application_id)?
    ))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationParams {
    pub application_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListApplicationsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_applications_request(params: ListApplicationsParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/applications",
        RequestOptions::new(Method::GET)
            .query_opt("clusterId", params.cluster_id)
            .query_opt("projectId", params.project_id)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_applications(
    params: ListApplicationsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<ApplicationList>> {
    list_applications_request(params)?.send(config).await?.json()
}

pub fn get_application_request(params: ApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        application_path(&params.application_id)?,
        RequestOptions::new(Method::GET),
    ))
}

pub async fn get_application(
    params: ApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Application>> {
    get_application_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateApplicationParams {
    pub body: CreateApplicationRequest,
}

pub fn create_application_request(params: CreateApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/applications",
        RequestOptions::new(Method::POST).json(&params.body)?,
    ))
}

pub async fn create_application(
    params: CreateApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Application>> {
    create_application_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateApplicationParams {
    pub application_id: String,
    pub body: UpdateApplicationRequest,
}

pub fn update_application_request(params: UpdateApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        application_path(&params.application_id)?,
        RequestOptions::new(Method::PATCH).json(&params.body)?,
    ))
}

pub async fn update_application(
    params: UpdateApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Application>> {
    update_application_request(params)?.send(config).await?.json()
}

pub fn delete_application_request(params: ApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        application_path(&params.application_id)?,
        RequestOptions::new(Method::DELETE),
    ))
}

pub async fn delete_application(
    params: ApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<()>> {
    delete_application_request(params)?.send(config).await?.empty()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeployApplicationParams {
    pub application_id: String,
    pub body: DeployApplicationRequest,
}

pub fn deploy_application_request(params: DeployApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/deployments", application_path(&params.application_id)?),
        RequestOptions::new(Method::POST).json(&params.body)?,
    ))
}

pub async fn deploy_application(
    params: DeployApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Deployment>> {
    deploy_application_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListDeploymentsParams {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_deployments_request(params: ListDeploymentsParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/deployments", application_path(&params.application_id)?),
        RequestOptions::new(Method::GET)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_deployments(
    params: ListDeploymentsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<DeploymentList>> {
    list_deployments_request(params)?.send(config).await?.json()
}

pub fn restart_application_request(params: ApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/restart", application_path(&params.application_id)?),
        RequestOptions::new(Method::POST),
    ))
}

pub async fn restart_application(
    params: ApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    restart_application_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RollbackApplicationParams {
    pub application_id: String,
    #[serde(default)]
    pub body: RollbackApplicationRequest,
}

pub fn rollback_application_request(params: RollbackApplicationParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/rollback", application_path(&params.application_id)?),
        RequestOptions::new(Method::POST).json(&params.body)?,
    ))
}

pub async fn rollback_application(
    params: RollbackApplicationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Deployment>> {
    rollback_application_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetApplicationLogsParams {
    pub application_id: String,
    /// RFC 3339 timestamp lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

pub fn get_application_logs_request(params: GetApplicationLogsParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/logs", application_path(&params.application_id)?),
        RequestOptions::new(Method::GET)
            .header("Accept", "text/plain")
            .query_opt("since", params.since)
            .query_opt("tailLines", params.tail_lines)
            .query_opt("container", params.container),
    ))
}

/// Plain-text log output.
pub async fn get_application_logs(
    params: GetApplicationLogsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<String>> {
    get_application_logs_request(params)?.send(config).await?.text()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DownloadApplicationArtifactParams {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

pub fn download_application_artifact_request(
    params: DownloadApplicationArtifactParams,
) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/artifact", application_path(&params.application_id)?),
        RequestOptions::new(Method::GET)
            .header("Accept", "application/octet-stream")
            .query_opt("deploymentId", params.deployment_id),
    ))
}

/// Raw artifact bytes (opaque archive).
pub async fn download_application_artifact(
    params: DownloadApplicationArtifactParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Bytes>> {
    download_application_artifact_request(params)?
        .send(config)
        .await?
        .bytes()
}
