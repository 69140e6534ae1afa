//! Integration test — run a local axum webhook, point the client at it, assert decoding.

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use hawar_core::config::ClientConfig;
use hawar_core::conversation::{Conversation, SEND_FAILED, SendOutcome};
use hawar_core::payload::{Attachment, OutboundPayload};
use hawar_core::reply::{PLACEHOLDER_REPLY, WebhookBody, WebhookReply};
use hawar_core::webhook::{WebhookClient, WebhookError, WebhookTransport};
use serde_json::{Value, json};

/// Start the fake workflow on an ephemeral port and return its base URL.
async fn spawn_webhook() -> String {
    let app = Router::new()
        .route("/response", post(|| async { Json(json!({"response": "X"})) }))
        .route("/string", post(|| async { Json(json!("Y")) }))
        .route("/message", post(|| async { Json(json!({"message": "Z"})) }))
        .route("/empty", post(|| async { Json(json!({})) }))
        .route("/text", post(|| async { "not json at all" }))
        .route(
            "/fail",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"response": "late"}))
            }),
        )
        .route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"response": {"contentType": content_type, "received": body}}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn client(base: &str, path: &str) -> WebhookClient {
    let config = ClientConfig {
        webhook_url: format!("{base}{path}"),
        ..ClientConfig::default()
    };
    WebhookClient::new(&config).expect("client")
}

fn payload(message: &str) -> OutboundPayload {
    OutboundPayload::new(message, None, 500_000)
}

#[tokio::test]
async fn recognised_reply_shapes_decode() {
    let base = spawn_webhook().await;

    let cases = [
        ("/response", "X"),
        ("/string", "Y"),
        ("/message", "Z"),
        ("/empty", PLACEHOLDER_REPLY),
        ("/text", "not json at all"),
    ];
    for (path, expected) in cases {
        let body = client(&base, path).post(&payload("hi")).await.expect(path);
        assert_eq!(WebhookReply::decode(&body).text(), expected, "{path}");
    }
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let base = spawn_webhook().await;
    let err = client(&base, "/fail").post(&payload("hi")).await.unwrap_err();
    match err {
        WebhookError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn slow_webhook_times_out() {
    let base = spawn_webhook().await;
    let config = ClientConfig {
        webhook_url: format!("{base}/slow"),
        timeout: Duration::from_millis(200),
        ..ClientConfig::default()
    };
    let err = WebhookClient::new(&config)
        .unwrap()
        .post(&payload("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, WebhookError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn payload_is_posted_as_json() {
    let base = spawn_webhook().await;
    let file = Attachment::new("a.txt", "text/plain", b"abc".to_vec());
    let body = client(&base, "/echo")
        .post(&OutboundPayload::new("with file", Some(&file), 500_000))
        .await
        .unwrap();

    let WebhookBody::Json(value) = body else {
        panic!("expected JSON body");
    };
    let echoed = &value["response"];
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["received"]["message"], "with file");
    assert_eq!(echoed["received"]["fileName"], "a.txt");
    assert_eq!(echoed["received"]["fileSize"], 3);
    assert_eq!(
        echoed["received"]["fileContent"],
        "data:text/plain;base64,YWJj"
    );
    assert!(
        echoed["received"]["sessionId"]
            .as_str()
            .unwrap()
            .starts_with("session_")
    );
}

#[tokio::test]
async fn conversation_round_trip_over_http() {
    let base = spawn_webhook().await;
    let config = ClientConfig {
        webhook_url: format!("{base}/response"),
        ..ClientConfig::default()
    };
    let mut conv = Conversation::connect(config).unwrap();

    let outcome = conv.send_message("hello", None).await;
    assert!(matches!(outcome, SendOutcome::Replied(_)));
    assert_eq!(conv.messages().len(), 2);
    assert_eq!(conv.messages()[1].text, "X");
}

#[tokio::test]
async fn conversation_failure_over_http() {
    let base = spawn_webhook().await;
    let config = ClientConfig {
        webhook_url: format!("{base}/fail"),
        ..ClientConfig::default()
    };
    let mut conv = Conversation::connect(config).unwrap();

    conv.send_message("hello", None).await;
    assert_eq!(conv.messages().len(), 1);
    assert_eq!(conv.error(), Some(SEND_FAILED));
}
