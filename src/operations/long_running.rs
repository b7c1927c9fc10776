use super::{segment, Prepared};
use crate::config::ClientConfig;
use crate::models::{Operation, OperationList};
use crate::response::ApiResponse;
use crate::transport::{PreparedRequest, RequestOptions};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListOperationsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

pub fn list_operations_request(params: ListOperationsParams) -> Prepared {
    Ok(PreparedRequest::new(
        "/v1/operations",
        RequestOptions::new(Method::GET)
            .query_opt("targetId", params.target_id)
            .query_opt("pageSize", params.page_size)
            .query_opt("pageToken", params.page_token),
    ))
}

pub async fn list_operations(
    params: ListOperationsParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<OperationList>> {
    list_operations_request(params)?.send(config).await?.json()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationParams {
    pub operation_id: String,
}

fn operation_path(operation_id: &str) -> Result<String> {
    Ok(format!(
        "/v1/operations/{}",
        segment("operationId", operation_id)?
    ))
}

pub fn get_operation_request(params: OperationParams) -> Prepared {
    Ok(PreparedRequest::new(
        operation_path(&params.operation_id)?,
        RequestOptions::new(Method::GET),
    ))
}

pub async fn get_operation(
    params: OperationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    get_operation_request(params)?.send(config).await?.json()
}

pub fn cancel_operation_request(params: OperationParams) -> Prepared {
    Ok(PreparedRequest::new(
        format!("{}/cancel", operation_path(&params.operation_id)?),
        RequestOptions::new(Method::POST),
    ))
}

pub async fn cancel_operation(
    params: OperationParams,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<Operation>> {
    cancel_operation_request(params)?.send(config).await?.json()
}
