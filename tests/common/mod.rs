#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_checkout_api::{
    app,
    config::AppConfig,
    db::{self, DbConfig},
    entities::coupon,
    payment_provider::{PaymentIntent, PaymentProvider, ProviderError},
    AppState,
};

/// Test double for the card-payment provider: records every call and can be
/// armed to fail with a fixed message.
pub struct RecordingProvider {
    pub calls: Mutex<Vec<(i64, String)>>,
    failure: Option<String>,
}

impl RecordingProvider {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentProvider for RecordingProvider {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((amount, currency.to_string()));
        match &self.failure {
            Some(message) => Err(ProviderError(message.clone())),
            None => Ok(PaymentIntent {
                id: "pi_test_123".to_string(),
                client_secret: "pi_test_123_secret_456".to_string(),
            }),
        }
    }
}

/// Helper harness spinning up the full router against an in-memory SQLite
/// database and a recording payment provider.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub provider: Arc<RecordingProvider>,
}

impl TestApp {
    /// Fresh app with migrations applied and a succeeding provider.
    pub async fn new() -> Self {
        Self::build(RecordingProvider::ok(), true).await
    }

    pub async fn with_provider(provider: Arc<RecordingProvider>) -> Self {
        Self::build(provider, true).await
    }

    /// App whose database has no schema at all; any store access fails.
    pub async fn without_migrations() -> Self {
        Self::build(RecordingProvider::ok(), false).await
    }

    async fn build(provider: Arc<RecordingProvider>, migrate: bool) -> Self {
        // One pooled connection so the in-memory database is shared.
        let db_config = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let database = db::establish_connection_with_config(&db_config)
            .await
            .expect("failed to open in-memory database");
        if migrate {
            db::run_migrations(&database)
                .await
                .expect("failed to run migrations");
        }

        let config = AppConfig::new(
            "sqlite::memory:".to_string(),
            "sk_test_dummy".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        let state = AppState {
            db: Arc::new(database),
            config,
            payment_provider: provider.clone(),
        };
        let router = app(state.clone());

        Self {
            router,
            state,
            provider,
        }
    }

    /// POST a JSON body and return (status, parsed body).
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    pub async fn options(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

/// Insert a coupon document directly into the store.
pub async fn insert_coupon(app: &TestApp, code: &str, is_active: bool) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let model = coupon::ActiveModel {
        id: Set(id),
        code: Set(code.to_string()),
        is_active: Set(is_active),
        discount_type: Set("percentage".to_string()),
        discount_value: Set(dec!(10)),
        description: Set(Some(format!("{} test coupon", code))),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model
        .insert(&*app.state.db)
        .await
        .expect("failed to insert coupon");
    id
}
