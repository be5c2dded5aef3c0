use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use clay_dashboard::config::DisplaySettings;
use clay_dashboard::models::SummaryRecord;
use clay_dashboard::routes::{create_router, AppState};
use clay_dashboard::services::{LoadError, SummarySource};

/// Summary source that always answers with the same outcome and counts calls.
pub struct StubSource {
    record: Option<SummaryRecord>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn ok(record: SummaryRecord) -> Arc<Self> {
        Arc::new(Self {
            record: Some(record),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            record: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummarySource for StubSource {
    async fn fetch_summary(&self) -> Result<SummaryRecord, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record
            .clone()
            .ok_or_else(|| LoadError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
    }
}

pub fn setup_test_app(source: Arc<StubSource>) -> Router {
    create_router(AppState::new(DisplaySettings::default(), source))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

/// Mounts a view and waits until its summary load has settled.
pub async fn mount_loaded(app: &Router) -> (String, Value) {
    let (status, snapshot) = send(app, "POST", "/gallium/api/dashboard/views", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = snapshot["id"].as_str().unwrap().to_string();

    for _ in 0..100 {
        let (status, snapshot) = send(app, "GET", &format!("/gallium/api/dashboard/views/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        if snapshot["loading"] == Value::Bool(false) {
            return (id, snapshot);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("dashboard view {id} never finished loading");
}
