//! Request and response schema types.
//!
//! Pure data: every type round-trips through serde using the API's camelCase
//! field names. Unknown fields are ignored on input. Response types are
//! lenient: an absent field takes its default and unrecognized statuses map
//! to `Unknown`, so a sparse 2xx body still decodes.

pub mod applications;
pub mod clusters;
pub mod operation;
pub mod projects;

pub use applications::{
    Application, ApplicationList, ApplicationStatus, CreateApplicationRequest, Deployment,
    DeploymentList, DeploymentStatus, DeployApplicationRequest, RollbackApplicationRequest,
    UpdateApplicationRequest,
};
pub use clusters::{
    Cluster, ClusterCredentials, ClusterList, ClusterStatus, CreateClusterRequest,
    CreateNodePoolRequest, NodePool, NodePoolList, ScaleClusterRequest, UpdateClusterRequest,
};
pub use operation::{Operation, OperationError, OperationList, OperationStatus};
pub use projects::{Project, ProjectList};

use serde::{Deserialize, Serialize};

/// Error payload returned by the API alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
