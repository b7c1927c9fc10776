//! Static operation registry: OpenAPI operation id -> request builder.
//!
//! The table is fixed at compile time and indexed once per process. Lookups
//! for unknown ids return `None`.

use super::{applications, clusters, long_running, projects};
use crate::config::ClientConfig;
use crate::response::{ApiResponse, ResponseBody};
use crate::transport::PreparedRequest;
use crate::{Error, ErrorContext, Result};
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

type Prepare = fn(serde_json::Value) -> Result<PreparedRequest>;

/// One generated endpoint.
pub struct OperationDef {
    /// OpenAPI operation id, e.g. `listClusters`.
    pub name: &'static str,
    pub method: &'static str,
    /// Path template with `{param}` placeholders.
    pub path: &'static str,
    prepare: Prepare,
}

impl OperationDef {
    /// Decode wire-form `args` (camelCase keys, `body` for the request body)
    /// into this operation's params and build the request without sending it.
    /// `null` is accepted for operations without required params.
    pub fn prepare(&self, args: serde_json::Value) -> Result<PreparedRequest> {
        (self.prepare)(args)
    }

    /// Prepare the request and send it with `config`.
    pub fn invoke(
        &self,
        args: serde_json::Value,
        config: Arc<ClientConfig>,
    ) -> BoxFuture<'static, Result<ApiResponse<ResponseBody>>> {
        let prepared = self.prepare(args);
        Box::pin(async move { prepared?.send(Some(config.as_ref())).await })
    }
}

impl std::fmt::Debug for OperationDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDef")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .finish()
    }
}

fn decode_args<P: DeserializeOwned>(operation: &str, args: serde_json::Value) -> Result<P> {
    let args = if args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| {
        Error::validation_with_context(
            format!("invalid arguments for operation '{operation}'"),
            ErrorContext::new()
                .with_field_path(format!("{operation}.args"))
                .with_details(e.to_string())
                .with_source("registry"),
        )
    })
}

macro_rules! operation_table {
    ($($name:literal => $method:literal $path:literal => $build:path;)*) => {
        static OPERATIONS: &[OperationDef] = &[
            $(OperationDef {
                name: $name,
                method: $method,
                path: $path,
                prepare: |args| decode_args($name, args).and_then($build),
            },)*
        ];
    };
}

operation_table! {
    "listProjects" => "GET" "/v1/projects" => projects::list_projects_request;
    "getProject" => "GET" "/v1/projects/{projectId}" => projects::get_project_request;
    "listClusters" => "GET" "/v1/clusters" => clusters::list_clusters_request;
    "getCluster" => "GET" "/v1/clusters/{clusterId}" => clusters::get_cluster_request;
    "createCluster" => "POST" "/v1/clusters" => clusters::create_cluster_request;
    "updateCluster" => "PATCH" "/v1/clusters/{clusterId}" => clusters::update_cluster_request;
    "deleteCluster" => "DELETE" "/v1/clusters/{clusterId}" => clusters::delete_cluster_request;
    "startCluster" => "POST" "/v1/clusters/{clusterId}/start" => clusters::start_cluster_request;
    "stopCluster" => "POST" "/v1/clusters/{clusterId}/stop" => clusters::stop_cluster_request;
    "scaleCluster" => "POST" "/v1/clusters/{clusterId}/scale" => clusters::scale_cluster_request;
    "getClusterCredentials" => "GET" "/v1/clusters/{clusterId}/credentials" => clusters::get_cluster_credentials_request;
    "listNodePools" => "GET" "/v1/clusters/{clusterId}/node-pools" => clusters::list_node_pools_request;
    "createNodePool" => "POST" "/v1/clusters/{clusterId}/node-pools" => clusters::create_node_pool_request;
    "deleteNodePool" => "DELETE" "/v1/clusters/{clusterId}/node-pools/{nodePoolId}" => clusters::delete_node_pool_request;
    "listApplications" => "GET" "/v1/applications" => applications::list_applications_request;
    "getApplication" => "GET" "/v1/applications/{applicationId}" => applications::get_application_request;
    "createApplication" => "POST" "/v1/applications" => applications::create_application_request;
    "updateApplication" => "PATCH" "/v1/applications/{applicationId}" => applications::update_application_request;
    "deleteApplication" => "DELETE" "/v1/applications/{applicationId}" => applications::delete_application_request;
    "deployApplication" => "POST" "/v1/applications/{applicationId}/deployments" => applications::deploy_application_request;
    "listDeployments" => "GET" "/v1/applications/{applicationId}/deployments" => applications::list_deployments_request;
    "restartApplication" => "POST" "/v1/applications/{applicationId}/restart" => applications::restart_application_request;
    "rollbackApplication" => "POST" "/v1/applications/{applicationId}/rollback" => applications::rollback_application_request;
    "getApplicationLogs" => "GET" "/v1/applications/{applicationId}/logs" => applications::get_application_logs_request;
    "downloadApplicationArtifact" => "GET" "/v1/applications/{applicationId}/artifact" => applications::download_application_artifact_request;
    "listOperations" => "GET" "/v1/operations" => long_running::list_operations_request;
    "getOperation" => "GET" "/v1/operations/{operationId}" => long_running::get_operation_request;
    "cancelOperation" => "POST" "/v1/operations/{operationId}/cancel" => long_running::cancel_operation_request;
}

static INDEX: Lazy<HashMap<&'static str, &'static OperationDef>> =
    Lazy::new(|| OPERATIONS.iter().map(|op| (op.name, op)).collect());

/// Look up an operation by id.
pub fn find(name: &str) -> Option<&'static OperationDef> {
    INDEX.get(name).copied()
}

/// Every registered operation, in declaration order.
pub fn all() -> &'static [OperationDef] {
    OPERATIONS
}

pub fn names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(|op| op.name)
}
