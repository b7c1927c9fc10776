//! Bound client behaves like the direct functions with the config appended.

use super::mock_server::{MockServerFixture, CLUSTER_LIST};
use cloud_api_sdk::models::{ClusterList, ClusterStatus};
use cloud_api_sdk::operations::clusters::{self, GetClusterParams, ListClustersParams};
use cloud_api_sdk::operations::projects::ListProjectsParams;
use cloud_api_sdk::{setup_config, ClientConfig, Error};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn bound_call_matches_direct_call() {
    let mut fx = MockServerFixture::new().await;
    // Every path must send exactly this request.
    let mock = fx
        .server
        .mock("GET", "/v1/clusters")
        .match_header("x-api-key", "secret")
        .match_header("x-team", "core")
        .match_header("content-type", "application/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("projectId".into(), "proj-1".into()),
            Matcher::UrlEncoded("pageSize".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CLUSTER_LIST)
        .expect(3)
        .create_async()
        .await;

    let config = fx
        .config_builder()
        .api_key("secret")
        .header("x-team", "core")
        .build()
        .unwrap();
    let params = || ListClustersParams {
        project_id: Some("proj-1".into()),
        page_size: Some(2),
        ..Default::default()
    };

    let direct = clusters::list_clusters(params(), Some(&config)).await.unwrap();
    let client = setup_config(config);
    let bound = client.list_clusters(params()).await.unwrap();
    let by_name = client
        .call("listClusters", json!({ "projectId": "proj-1", "pageSize": 2 }))
        .await
        .unwrap();

    assert_eq!(direct.status, bound.status);
    assert_eq!(direct.data, bound.data);
    assert_eq!(by_name.status, direct.status);
    let raw: ClusterList = serde_json::from_value(by_name.data.as_json().unwrap().clone()).unwrap();
    assert_eq!(raw, direct.data);
    mock.assert_async().await;
}

#[tokio::test]
async fn sparse_listing_items_decode_on_typed_path() {
    const SPARSE: &str = r#"{"items":[{"id":"a"},{"id":"b"}]}"#;
    let mut fx = MockServerFixture::new().await;
    let clusters_mock = fx.mock_json("GET", "/v1/clusters", 200, SPARSE).await;
    let projects_mock = fx.mock_json("GET", "/v1/projects", 200, SPARSE).await;

    let client = fx.client();
    let clusters = client
        .list_clusters(ListClustersParams::default())
        .await
        .unwrap();
    let projects = client
        .list_projects(ListProjectsParams::default())
        .await
        .unwrap();

    assert_eq!(clusters.data.items.len(), 2);
    assert_eq!(clusters.data.items[0].id, "a");
    assert_eq!(clusters.data.items[0].status, ClusterStatus::Unknown);
    assert_eq!(projects.data.items.len(), 2);
    assert_eq!(projects.data.items[1].id, "b");
    clusters_mock.assert_async().await;
    projects_mock.assert_async().await;
}

#[tokio::test]
async fn list_clusters_decodes_items_and_sends_query() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/v1/clusters")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("projectId".into(), "proj-1".into()),
            Matcher::UrlEncoded("pageSize".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CLUSTER_LIST)
        .create_async()
        .await;

    let resp = fx
        .client()
        .list_clusters(ListClustersParams {
            project_id: Some("proj-1".into()),
            page_size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.data.items.len(), 2);
    assert_eq!(resp.data.items[0].status, ClusterStatus::Running);
    assert_eq!(resp.data.next_page_token.as_deref(), Some("page-2"));
    mock.assert_async().await;
}

#[tokio::test]
async fn by_name_call_uses_wire_form_arguments() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .json_mock(
            "GET",
            "/v1/clusters/c-9",
            200,
            r#"{"id": "c-9", "name": "nine", "status": "RUNNING"}"#,
        )
        .expect(2)
        .create_async()
        .await;

    let client = fx.client();
    let resp = client
        .call("getCluster", json!({ "clusterId": "c-9" }))
        .await
        .unwrap();
    assert_eq!(resp.data.as_json().unwrap()["name"], "nine");

    let op = client.operation("getCluster").unwrap();
    assert_eq!(op.definition().path, "/v1/clusters/{clusterId}");
    let again = op.call(json!({ "clusterId": "c-9" })).await.unwrap();
    assert_eq!(again.status, 200);

    mock.assert_async().await;
}

#[tokio::test]
async fn by_name_call_rejects_bad_arguments_before_sending() {
    let fx = MockServerFixture::new().await;
    let err = fx
        .client()
        .call("getCluster", json!({ "clusterID": "c-1" }))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("getCluster.args")
    );
}

#[tokio::test]
async fn separate_clients_do_not_share_base_urls() {
    let mut a = MockServerFixture::new().await;
    let mut b = MockServerFixture::new().await;
    let mock_a = a
        .mock_json("GET", "/v1/projects", 200, r#"{"items": [{"id": "pa", "name": "A"}]}"#)
        .await;
    let mock_b = b
        .mock_json("GET", "/v1/projects", 200, r#"{"items": [{"id": "pb", "name": "B"}]}"#)
        .await;

    let client_a = a.client();
    let client_b = b.client();
    let (ra, rb) = tokio::join!(
        client_a.list_projects(ListProjectsParams::default()),
        client_b.list_projects(ListProjectsParams::default()),
    );

    assert_eq!(ra.unwrap().data.items[0].id, "pa");
    assert_eq!(rb.unwrap().data.items[0].id, "pb");
    mock_a.assert_async().await;
    mock_b.assert_async().await;
}

#[tokio::test]
async fn set_base_url_redirects_later_calls() {
    let mut old = MockServerFixture::new().await;
    let mut new = Server::new_async().await;
    let old_mock = old
        .mock_json("GET", "/v1/clusters/c-1", 200, r#"{"id": "c-1", "name": "old", "status": "RUNNING"}"#)
        .await;
    let new_mock = new
        .mock("GET", "/v1/clusters/c-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "c-1", "name": "new", "status": "RUNNING"}"#)
        .create_async()
        .await;

    let client = old.client();
    let params = || GetClusterParams {
        cluster_id: "c-1".into(),
    };
    assert_eq!(client.get_cluster(params()).await.unwrap().data.name, "old");

    client.set_base_url(&format!("{}/", new.url())).unwrap();
    assert_eq!(client.base_url(), new.url());
    assert_eq!(client.get_cluster(params()).await.unwrap().data.name, "new");

    old_mock.assert_async().await;
    new_mock.assert_async().await;
}

#[tokio::test]
async fn missing_config_is_a_configuration_error() {
    let err = clusters::list_clusters(ListClustersParams::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn empty_params_are_rejected_locally() {
    let fx = MockServerFixture::new().await;
    let err = fx
        .client()
        .get_cluster(GetClusterParams::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("params.clusterId")
    );
}

#[test]
fn config_from_builder_is_usable_without_runtime() {
    let cfg = ClientConfig::builder("http://127.0.0.1:1/").build().unwrap();
    let client = setup_config(cfg);
    assert_eq!(client.base_url(), "http://127.0.0.1:1");
    assert!(client.has_operation("listClusters"));
}
