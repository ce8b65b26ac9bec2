//! Integration tests for the HTTP API

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use classifier_rs::{Corpus, SpamClassifier, TrainingMode};
use serde_json::{json, Value};
use spamcheck_rs::api::AppState;
use spamcheck_rs::config::HistoryConfig;
use spamcheck_rs::server::router;
use spamcheck_rs::{Config, HistoryStore};
use std::sync::Arc;
use tower::ServiceExt;

/// Router around a classifier trained on the builtin corpus
async fn setup_app() -> Router {
    let history = HistoryStore::connect("sqlite::memory:").await.unwrap();
    history.init_db().await.unwrap();
    app_with(trained_classifier(), history)
}

fn trained_classifier() -> Arc<SpamClassifier> {
    let corpus = Corpus::builtin().unwrap();
    Arc::new(SpamClassifier::trained(&corpus, TrainingMode::Sequential).unwrap())
}

fn history_limits() -> HistoryConfig {
    HistoryConfig {
        default_limit: 2,
        max_limit: 3,
    }
}

fn app_with(classifier: Arc<SpamClassifier>, history: HistoryStore) -> Router {
    router(Arc::new(AppState {
        classifier,
        history,
        history_limits: history_limits(),
    }))
}

#[test]
fn test_history_limits_are_deployable() {
    let config = Config {
        history: history_limits(),
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["trained"], true);
    assert_eq!(body["history_records"], 0);
}

#[tokio::test]
async fn test_predict_spam_and_ham() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/predict",
            json!({"message": "Congratulations you have won a free prize claim now"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["label"], "Spam");
    assert!(body["data"]["confidence"].as_f64().unwrap() > 50.0);

    let (_, body) = send(
        &app,
        post_json(
            "/api/predict",
            json!({"message": "Let's meet for lunch tomorrow at noon"}),
        ),
    )
    .await;
    assert_eq!(body["data"]["label"], "Not Spam");
}

#[tokio::test]
async fn test_predict_empty_message_uses_prior() {
    let app = setup_app().await;
    let (status, body) = send(&app, post_json("/api/predict", json!({"message": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["label"], "Not Spam");
    assert_eq!(body["data"]["confidence"], 50.0);
}

#[tokio::test]
async fn test_predict_does_not_store() {
    let app = setup_app().await;
    send(&app, post_json("/api/predict", json!({"message": "free prize"}))).await;
    let (_, body) = send(&app, get("/api/history")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_classify_stores_and_lists_history() {
    let app = setup_app().await;

    let messages = [
        "Win a free cruise, claim now",
        "Lunch at noon tomorrow?",
        "Claim your cash prize",
        "Meeting notes attached",
    ];
    for message in messages {
        let (status, body) =
            send(&app, post_json("/api/classify", json!({"message": message}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["record"]["message_text"], message);
        assert_eq!(body["data"]["retryable"], false);
    }

    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["history_records"], 4);

    // default_limit applies without a query
    let (_, body) = send(&app, get("/api/history")).await;
    let logs = body["data"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["message_text"], "Meeting notes attached");
    assert!(uuid::Uuid::parse_str(logs[0]["id"].as_str().unwrap()).is_ok());

    // max_limit caps the request
    let (status, body) = send(&app, get("/api/history?limit=50")).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body["data"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0]["message_text"], "Meeting notes attached");
    assert_eq!(logs[1]["message_text"], "Claim your cash prize");
    assert_eq!(logs[2]["message_text"], "Lunch at noon tomorrow?");

    let (_, body) = send(&app, get("/api/history?limit=1")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_classify_rejects_blank_message() {
    let app = setup_app().await;
    let (status, body) =
        send(&app, post_json("/api/classify", json!({"message": "   \n"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_classify_keeps_prediction_when_storage_fails() {
    // no init_db: the spam_logs table does not exist
    let history = HistoryStore::connect("sqlite::memory:").await.unwrap();
    let app = app_with(trained_classifier(), history);

    let (status, body) = send(
        &app,
        post_json("/api/classify", json!({"message": "Claim your free prize"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["label"], "Spam");
    assert_eq!(body["data"]["retryable"], true);
    assert!(body["data"]["record"].is_null());
    assert!(body["error"].as_str().unwrap().contains("try again"));

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["history_records"].is_null());
}

#[tokio::test]
async fn test_untrained_classifier_unavailable() {
    let history = HistoryStore::connect("sqlite::memory:").await.unwrap();
    history.init_db().await.unwrap();
    let app = app_with(Arc::new(SpamClassifier::new()), history);

    let (status, body) = send(&app, post_json("/api/predict", json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, get("/api/model")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["trained"], false);
}

#[tokio::test]
async fn test_model_summary() {
    let app = setup_app().await;
    let (status, body) = send(&app, get("/api/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["spam_documents"], 30);
    assert_eq!(body["data"]["ham_documents"], 30);
    assert_eq!(body["data"]["total_documents"], 60);
}
