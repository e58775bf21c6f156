use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::entities::coupon;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::coupons::CouponService;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"couponCode": "SAVE10"}))]
pub struct ApplyCouponRequest {
    /// Redemption code exactly as the shopper typed it
    #[schema(example = "SAVE10")]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponResponse {
    /// The full coupon document
    pub data: coupon::Model,
}

/// Validate a coupon code at checkout time
#[utoipa::path(
    post,
    path = "/api/v1/coupons/apply",
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon is active", body = CouponResponse),
        (status = 400, description = "Missing code or inactive coupon", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown coupon code", body = crate::errors::ErrorResponse),
        (status = 500, description = "Lookup failed", body = crate::errors::ErrorResponse)
    ),
    tag = "Checkout"
)]
pub async fn apply_coupon(
    State(state): State<AppState>,
    Json(request): Json<ApplyCouponRequest>,
) -> Result<Json<CouponResponse>, ServiceError> {
    let code = request.coupon_code.unwrap_or_default();
    let service = CouponService::new(state.db.clone());

    let coupon = service.apply_coupon(&code).await?;
    Ok(Json(CouponResponse { data: coupon }))
}

/// Preflight terminates here: no body, no store access.
pub async fn coupon_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Coupon routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/apply", post(apply_coupon).options(coupon_preflight))
}
