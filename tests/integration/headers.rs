//! Header precedence and URL resolution seen from the server side.

use super::mock_server::MockServerFixture;
use cloud_api_sdk::models::UpdateClusterRequest;
use cloud_api_sdk::operations::applications::GetApplicationLogsParams;
use cloud_api_sdk::operations::clusters::{GetClusterParams, UpdateClusterParams};
use cloud_api_sdk::setup_config;
use cloud_api_sdk::transport::{fetch, RequestOptions};
use mockito::{Matcher, Server};
use reqwest::Method;

#[tokio::test]
async fn config_headers_reach_the_server_with_json_content_type() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/v1/clusters/c-1")
        .match_header("x-api-key", "secret")
        .match_header("x-project-id", "proj-1")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "c-1", "name": "alpha", "status": "RUNNING"}"#)
        .create_async()
        .await;

    let config = fx
        .config_builder()
        .api_key("secret")
        .project_id("proj-1")
        .build()
        .unwrap();
    setup_config(config)
        .get_cluster(GetClusterParams {
            cluster_id: "c-1".into(),
        })
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn config_content_type_overrides_the_default() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("PATCH", "/v1/clusters/c-1")
        .match_header("content-type", "application/merge-patch+json")
        .match_header("if-match", "etag-7")
        .match_body(Matcher::PartialJsonString(r#"{"name": "renamed"}"#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "c-1", "name": "renamed", "status": "UPDATING"}"#)
        .create_async()
        .await;

    let config = fx
        .config_builder()
        .header("Content-Type", "application/merge-patch+json")
        .build()
        .unwrap();
    let resp = setup_config(config)
        .update_cluster(UpdateClusterParams {
            cluster_id: "c-1".into(),
            if_match: Some("etag-7".into()),
            body: UpdateClusterRequest {
                name: Some("renamed".into()),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(resp.data.name, "renamed");
    mock.assert_async().await;
}

#[tokio::test]
async fn per_call_headers_override_config_headers() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/v1/applications/app-1/logs")
        .match_header("accept", "text/plain")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("ok")
        .create_async()
        .await;

    let config = fx
        .config_builder()
        .header("Accept", "application/json")
        .build()
        .unwrap();
    setup_config(config)
        .get_application_logs(GetApplicationLogsParams {
            application_id: "app-1".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn absolute_paths_bypass_the_base_url() {
    let fx = MockServerFixture::new().await;
    let mut elsewhere = Server::new_async().await;
    let mock = elsewhere
        .mock("GET", "/healthz")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let config = fx.config();
    let resp = fetch(
        &format!("{}/healthz", elsewhere.url()),
        RequestOptions::new(Method::GET),
        Some(&config),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.as_json().unwrap()["ok"], true);
    mock.assert_async().await;
}
