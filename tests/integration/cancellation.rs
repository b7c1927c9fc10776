//! Timeout and cancellation, mostly against a server that accepts but never answers.

use super::mock_server::{MockServerFixture, CLUSTER_LIST};
use cloud_api_sdk::operations::clusters::ListClustersParams;
use cloud_api_sdk::transport::{fetch, RequestOptions};
use cloud_api_sdk::{setup_config, CancelReason, CancellationToken, ClientConfig, Error};
use reqwest::Method;
use std::net::TcpListener;
use std::time::Duration;

/// Listener whose backlog completes the handshake; nothing ever reads or replies.
fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));
    (listener, url)
}

#[tokio::test]
async fn config_timeout_cancels_with_timeout_reason() {
    let (_listener, url) = silent_listener();
    let config = ClientConfig::builder(url).timeout_ms(150).build().unwrap();

    let err = setup_config(config)
        .list_clusters(ListClustersParams::default())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    match err {
        Error::Cancelled {
            reason: CancelReason::Timeout(limit),
        } => assert_eq!(limit, Duration::from_millis(150)),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn config_token_aborts_in_flight_request() {
    let (_listener, url) = silent_listener();
    let token = CancellationToken::new();
    let config = ClientConfig::builder(url)
        .cancellation(token.clone())
        .build()
        .unwrap();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = setup_config(config)
        .list_clusters(ListClustersParams::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Cancelled {
            reason: CancelReason::Signal
        }
    ));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn explicit_token_takes_precedence_over_timeout() {
    let (_listener, url) = silent_listener();
    let config = ClientConfig::builder(url).timeout_ms(20).build().unwrap();
    let token = CancellationToken::new();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        trigger.cancel();
    });

    let err = fetch(
        "/v1/clusters",
        RequestOptions::new(Method::GET).cancellation(token),
        Some(&config),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Cancelled {
            reason: CancelReason::Signal
        }
    ));
}

#[tokio::test]
async fn already_cancelled_token_fails_without_waiting() {
    let (_listener, url) = silent_listener();
    let config = ClientConfig::builder(url).build().unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let started = std::time::Instant::now();
    let err = fetch(
        "/v1/clusters",
        RequestOptions::new(Method::GET).cancellation(token),
        Some(&config),
    )
    .await
    .unwrap_err();
    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn timeout_fires_on_the_paused_clock() {
    let (_listener, url) = silent_listener();
    // A bare client has no connect timer that could fire first.
    let config = ClientConfig::builder(url)
        .timeout(Duration::from_secs(30))
        .http_client(reqwest::Client::new())
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let err = setup_config(config)
        .list_clusters(ListClustersParams::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Cancelled {
            reason: CancelReason::Timeout(limit)
        } if limit == Duration::from_secs(30)
    ));
    assert!(started.elapsed() >= Duration::from_secs(30));
}

#[tokio::test]
async fn completed_call_leaves_no_live_timer() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .json_mock("GET", "/v1/clusters", 200, CLUSTER_LIST)
        .expect(2)
        .create_async()
        .await;
    let client = setup_config(fx.config_builder().timeout_ms(500).build().unwrap());

    let first = client.list_clusters(ListClustersParams::default()).await;

    // Jump well past the limit; a leaked timer would fire here.
    tokio::time::pause();
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    tokio::time::resume();

    let first = first.unwrap();
    assert_eq!(first.status, 200);
    assert_eq!(first.data.items.len(), 2);

    let second = client.list_clusters(ListClustersParams::default()).await;
    assert!(second.is_ok(), "later call affected by earlier timer: {second:?}");
    mock.assert_async().await;
}
