//! Shared helpers for API integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use flashdeck_api::auth::jwt::{generate_access_token, JwtConfig};
use flashdeck_api::config::ServerConfig;
use flashdeck_api::router::build_app_router;
use flashdeck_api::state::AppState;
use flashdeck_db::models::user::CreateUser;
use flashdeck_db::repositories::UserRepo;
use flashdeck_llm::{CompletionClient, CompletionError};

/// Model name the stub reports; ends up on every generation row.
pub const STUB_MODEL: &str = "stub-model";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        json_logs: false,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

// ---------------------------------------------------------------------------
// Stub completion service
// ---------------------------------------------------------------------------

enum StubReply {
    Content(Option<String>),
    ApiError(u16),
}

/// Completion client that answers every call with the same canned reply.
pub struct StubCompletion {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubCompletion {
    /// Reply with `n` well-formed cards (`Q1`/`A1` ... `Qn`/`An`).
    pub fn cards(n: usize) -> Self {
        let cards: Vec<_> = (1..=n)
            .map(|i| serde_json::json!({ "front": format!("Q{i}"), "back": format!("A{i}") }))
            .collect();
        Self::content(&serde_json::json!({ "flashcards": cards }).to_string())
    }

    /// Reply with raw message content.
    pub fn content(content: &str) -> Self {
        Self {
            reply: StubReply::Content(Some(content.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call with a non-2xx status.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: StubReply::ApiError(status),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    fn model(&self) -> &str {
        STUB_MODEL
    }

    async fn complete_json(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<Option<String>, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Content(content) => Ok(content.clone()),
            StubReply::ApiError(status) => Err(CompletionError::Api {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with a stub that returns three cards.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubCompletion::cards(3)))
}

/// Build the full application router around the given completion stub.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(pool: PgPool, completion: Arc<StubCompletion>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        completion,
    };
    build_app_router(state, &config)
}

/// Insert a user directly and return its id plus a valid access token.
///
/// Skips password hashing; use the register endpoint when the password
/// matters.
pub async fn create_user_with_token(pool: &PgPool, email: &str) -> (i64, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "unused".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    let token = generate_access_token(user.id, &user.email, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST a raw (possibly malformed) JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A source text of exactly `chars` characters.
pub fn source_text(chars: usize) -> String {
    "Cells store energy as ATP. "
        .chars()
        .cycle()
        .take(chars)
        .collect()
}
