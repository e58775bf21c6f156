//! Storefront Checkout API Library
//!
//! Checkout orchestration core for an e-commerce storefront: the client-side
//! form state machine and validation engine (pure, in [`checkout`]), and the
//! server-side payment-intent and coupon services with their HTTP handlers.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod checkout;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod payment_provider;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::payment_provider::PaymentProvider;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

/// Versioned API routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .nest("/payment-intents", handlers::payment_intents::routes())
        .nest("/coupons", handlers::coupons::routes())
}

/// Full application router: liveness + health + v1 API + Swagger UI, with
/// request tracing and the storefront's CORS policy applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "storefront-checkout-api up" }))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Browser checkouts come from arbitrary storefront origins, so cross-origin
/// requests are permitted from any origin for the methods and headers the
/// checkout client sends.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn api_status() -> Json<Value> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "storefront-checkout-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Json(status_data)
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, errors::ServiceError> {
    // Check database connectivity
    let db_status = match state.db.ping().await {
        Ok(()) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Ok(Json(health_data))
}
