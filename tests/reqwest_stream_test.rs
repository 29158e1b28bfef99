//! End-to-end tests of the reqwest transport against a local mock server.

mod common;

use common::{config_for, sse_body};
use futures::StreamExt;
use guru_stream::guidance::{GUIDANCE_PATH, GURUS_PATH, HEALTH_PATH, STREAM_PATH};
use guru_stream::models::GuidanceRequest;
use guru_stream::{GuidanceClient, GuruKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_streams_events_from_server() {
    let mock_server = MockServer::start().await;
    let body = sse_body(
        &[
            json!({"content": "Chant slowly, "}),
            json!({"content": "one verse at a time."}),
        ],
        true,
    );

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .and(header("Accept", "text/event-stream"))
        .and(body_json(json!({
            "guru_type": "sloka",
            "question": "How do I learn the Gita?",
            "user_context": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    let stream = client
        .stream_question(Some(GuruKind::Sloka), "How do I learn the Gita?")
        .await
        .unwrap();

    let texts: Vec<String> = stream
        .map(|item| item.unwrap().text_field(&["content"]).unwrap().to_string())
        .collect()
        .await;
    assert_eq!(texts, vec!["Chant slowly, ", "one verse at a time."]);
}

#[tokio::test]
async fn test_body_without_sentinel_ends_cleanly() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: {\"content\":\"Om\"}", "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    let items: Vec<_> = client
        .stream_question(Some(GuruKind::Bhakti), "q")
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_ref().unwrap().payload(), &json!({"content": "Om"}));
}

#[tokio::test]
async fn test_server_error_fails_before_streaming() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    let err = client
        .stream_question(Some(GuruKind::Yoga), "q")
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "E_NET_HTTP");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn test_connection_refused() {
    let client = GuidanceClient::from_config(config_for("http://127.0.0.1:59998")).unwrap();
    let err = client
        .stream_question(Some(GuruKind::Yoga), "q")
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err.error_code(), "E_NET_CONN" | "E_NET_OTHER"));
}

#[tokio::test]
async fn test_buffered_ask() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GUIDANCE_PATH))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "guru_type": "karma",
            "question": "Should I take the job?",
            "user_context": {"mood": "uncertain"},
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "guru_name": "AI Karma Guru",
            "response": "Do the work; release the outcome.",
            "session_id": 7
        })))
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    let request = GuidanceRequest::new(GuruKind::Karma, "Should I take the job?")
        .with_user_context(json!({"mood": "uncertain"}));
    let response = client.ask(&request).await.unwrap();

    assert!(response.success);
    assert_eq!(response.guru_name.as_deref(), Some("AI Karma Guru"));
    assert_eq!(response.session_id.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_ask_guru_posts_prompt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/meditation", GURUS_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Sit."})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    let value = client
        .ask_guru(GuruKind::Meditation, "Where do I start?")
        .await
        .unwrap();
    assert_eq!(value, json!({"answer": "Sit."}));

    let received = mock_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["question"], json!("Where do I start?"));
    assert!(sent["prompt"]
        .as_str()
        .unwrap()
        .contains("Question: Where do I start?\nContext: meditation-guidance"));
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy", "service": "guru-backend"})),
        )
        .mount(&mock_server)
        .await;

    let client = GuidanceClient::from_config(config_for(&mock_server.uri())).unwrap();
    assert!(client.health_check().await.unwrap());
}
