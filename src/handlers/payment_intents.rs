use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::payment_intents::PaymentIntentService;

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"amount": 19.99, "currency": "USD"}))]
pub struct CreatePaymentIntentRequest {
    /// Major-unit amount as entered client-side (e.g. dollars)
    #[schema(example = 19.99)]
    pub amount: Option<Decimal>,
    /// 3-letter currency code, case-insensitive
    #[schema(example = "USD")]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"clientSecret": "pi_3K..._secret_X9"}))]
pub struct PaymentIntentResponse {
    /// Opaque secret the client uses to complete card authorization
    pub client_secret: String,
}

/// Create a payment intent for the checkout total
#[utoipa::path(
    post,
    path = "/api/v1/payment-intents",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 400, description = "Missing amount or currency", body = crate::errors::ErrorResponse),
        (status = 500, description = "Payment provider call failed", body = crate::errors::ErrorResponse)
    ),
    tag = "Checkout"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ServiceError> {
    let service = PaymentIntentService::new(state.payment_provider.clone());

    let intent = service
        .create_payment_intent(request.amount, request.currency.as_deref())
        .await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Payment intent routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_payment_intent))
}
