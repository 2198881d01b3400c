//! Router test helpers: scripted completion, request builders, body readers

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::build_app;
use crate::assistant::{CompletionError, CompletionProvider, CompletionRequest};
use crate::catalog::Catalog;
use crate::core::{Config, ServerState};

#[derive(Default)]
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(replies: Vec<Result<String, CompletionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::NotConfigured))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub(crate) fn create_test_state(provider: Arc<ScriptedProvider>) -> ServerState {
    ServerState::with_provider(
        Config::default(),
        Arc::new(Catalog::embedded().unwrap()),
        provider,
    )
}

pub(crate) fn create_test_app(state: &ServerState) -> Router {
    build_app(state.clone())
}

/// Send a request and return the status plus the decoded JSON body (Null when empty)
pub(crate) async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a session through the API and return its id
pub(crate) async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}
