//! Status handling and body decoding through the real transport.

use super::mock_server::MockServerFixture;
use cloud_api_sdk::operations::applications::{
    DownloadApplicationArtifactParams, GetApplicationLogsParams,
};
use cloud_api_sdk::operations::clusters::{DeleteClusterParams, GetClusterParams};
use cloud_api_sdk::{Error, ResponseBody};
use serde_json::json;

#[tokio::test]
async fn not_found_surfaces_status_and_json_body() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .mock_json(
            "GET",
            "/v1/clusters/missing",
            404,
            r#"{"code": "NOT_FOUND", "message": "cluster not found"}"#,
        )
        .await;

    let err = fx
        .client()
        .get_cluster(GetClusterParams {
            cluster_id: "missing".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.body().and_then(ResponseBody::as_json),
        Some(&json!({"code": "NOT_FOUND", "message": "cluster not found"}))
    );
    let api = err.api_error().unwrap();
    assert_eq!(api.code.as_deref(), Some("NOT_FOUND"));
    assert!(!err.is_cancelled());
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_with_text_body_is_kept_verbatim() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("DELETE", "/v1/clusters/c-1")
        .with_status(503)
        .with_header("content-type", "text/plain")
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = fx
        .client()
        .delete_cluster(DeleteClusterParams {
            cluster_id: "c-1".into(),
            force: None,
        })
        .await
        .unwrap_err();

    match err {
        Error::Http { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body.as_text(), Some("upstream unavailable"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn no_content_is_a_successful_empty_body() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("DELETE", "/v1/clusters/c-1")
        .match_query(mockito::Matcher::UrlEncoded("force".into(), "true".into()))
        .with_status(204)
        .create_async()
        .await;

    let resp = fx
        .client()
        .delete_cluster(DeleteClusterParams {
            cluster_id: "c-1".into(),
            force: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(resp.status, 204);
    mock.assert_async().await;
}

#[tokio::test]
async fn logs_are_returned_as_text() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/v1/applications/app-1/logs")
        .match_header("accept", "text/plain")
        .with_status(200)
        .with_header("content-type", "text/plain; charset=utf-8")
        .with_body("line one\nline two\n")
        .create_async()
        .await;

    let resp = fx
        .client()
        .get_application_logs(GetApplicationLogsParams {
            application_id: "app-1".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(resp.data.lines().count(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn artifacts_are_returned_as_bytes() {
    let mut fx = MockServerFixture::new().await;
    let payload: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0xff];
    let mock = fx
        .mock_raw(
            "GET",
            "/v1/applications/app-1/artifact",
            "application/octet-stream",
            payload,
        )
        .await;

    let resp = fx
        .client()
        .download_application_artifact(DownloadApplicationArtifactParams {
            application_id: "app-1".into(),
            deployment_id: Some("d-3".into()),
        })
        .await
        .unwrap();
    assert_eq!(resp.data.as_ref(), payload);
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_json_success_body_is_a_serialization_error() {
    let mut fx = MockServerFixture::new().await;
    let _mock = fx
        .mock_json("GET", "/v1/clusters/c-1", 200, "{not json")
        .await;

    let err = fx
        .client()
        .get_cluster(GetClusterParams {
            cluster_id: "c-1".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
