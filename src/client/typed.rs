//! Typed forwarding methods: `client.op(params)` == `operations::op(params, Some(&config))`.

use super::core::BoundClient;
use crate::models::{
    Application, ApplicationList, Cluster, ClusterCredentials, ClusterList, Deployment,
    DeploymentList, NodePool, NodePoolList, Operation, OperationList, Project, ProjectList,
};
use crate::operations::applications::{
    self, ApplicationParams, CreateApplicationParams, DeployApplicationParams,
    DownloadApplicationArtifactParams, GetApplicationLogsParams, ListApplicationsParams,
    ListDeploymentsParams, RollbackApplicationParams, UpdateApplicationParams,
};
use crate::operations::clusters::{
    self, ClusterActionParams, CreateClusterParams, CreateNodePoolParams, DeleteClusterParams,
    DeleteNodePoolParams, GetClusterParams, ListClustersParams, ListNodePoolsParams,
    ScaleClusterParams, UpdateClusterParams,
};
use crate::operations::long_running::{self, ListOperationsParams, OperationParams};
use crate::operations::projects::{self, GetProjectParams, ListProjectsParams};
use crate::response::ApiResponse;
use crate::Result;
use bytes::Bytes;

macro_rules! bound_operations {
    ($($func:ident($params:ty) -> $out:ty => $target:path;)*) => {
        impl BoundClient {
            $(
                pub async fn $func(&self, params: $params) -> Result<ApiResponse<$out>> {
                    let config = self.config();
                    $target(params, Some(config.as_ref())).await
                }
            )*
        }
    };
}

bound_operations! {
    list_projects(ListProjectsParams) -> ProjectList => projects::list_projects;
    get_project(GetProjectParams) -> Project => projects::get_project;

    list_clusters(ListClustersParams) -> ClusterList => clusters::list_clusters;
    get_cluster(GetClusterParams) -> Cluster => clusters::get_cluster;
    create_cluster(CreateClusterParams) -> Cluster => clusters::create_cluster;
    update_cluster(UpdateClusterParams) -> Cluster => clusters::update_cluster;
    delete_cluster(DeleteClusterParams) -> () => clusters::delete_cluster;
    start_cluster(ClusterActionParams) -> Operation => clusters::start_cluster;
    stop_cluster(ClusterActionParams) -> Operation => clusters::stop_cluster;
    scale_cluster(ScaleClusterParams) -> Operation => clusters::scale_cluster;
    get_cluster_credentials(ClusterActionParams) -> ClusterCredentials => clusters::get_cluster_credentials;
    list_node_pools(ListNodePoolsParams) -> NodePoolList => clusters::list_node_pools;
    create_node_pool(CreateNodePoolParams) -> NodePool => clusters::create_node_pool;
    delete_node_pool(DeleteNodePoolParams) -> () => clusters::delete_node_pool;

    list_applications(ListApplicationsParams) -> ApplicationList => applications::list_applications;
    get_application(ApplicationParams) -> Application => applications::get_application;
    create_application(CreateApplicationParams) -> Application => applications::create_application;
    update_application(UpdateApplicationParams) -> Application => applications::update_application;
    delete_application(ApplicationParams) -> () => applications::delete_application;
    deploy_application(DeployApplicationParams) -> Deployment => applications::deploy_application;
    list_deployments(ListDeploymentsParams) -> DeploymentList => applications::list_deployments;
    restart_application(ApplicationParams) -> Operation => applications::restart_application;
    rollback_application(RollbackApplicationParams) -> Deployment => applications::rollback_application;
    get_application_logs(GetApplicationLogsParams) -> String => applications::get_application_logs;
    download_application_artifact(DownloadApplicationArtifactParams) -> Bytes => applications::download_application_artifact;

    list_operations(ListOperationsParams) -> OperationList => long_running::list_operations;
    get_operation(OperationParams) -> Operation => long_running::get_operation;
    cancel_operation(OperationParams) -> Operation => long_running::cancel_operation;
}
