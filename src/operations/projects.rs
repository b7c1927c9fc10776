use super::{segment, Prepared};
use crate::config::ClientConfig;
use crate::models::{Project, ProjectList};
use crate::response::ApiResponse;
use crate::transport::{PreparedRequest, RequestOptions};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListProjectsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_projects_request(params: ListProjectsParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/projects",
        RequestOptions::new(Method::GET)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_projects(
    params: ListProjectsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<ProjectList>> {
    list_projects_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetProjectParams {
    pub project_id: String,
}

pub fn get_project_request(params: GetProjectParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("/v1/projects/{}", segment("projectId", &params.project_id)?),
        RequestOptions::new(Method::GET),
    ))
}

pub async fn get_project(
    params: GetProjectParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Project>> {
    get_project_request(params)?.send(config).await?.json()
}
