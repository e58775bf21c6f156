use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Checkout API",
        description = "Checkout orchestration core: payment-intent creation and coupon validation"
    ),
    paths(
        crate::handlers::payment_intents::create_payment_intent,
        crate::handlers::coupons::apply_coupon,
    ),
    components(schemas(
        crate::handlers::payment_intents::CreatePaymentIntentRequest,
        crate::handlers::payment_intents::PaymentIntentResponse,
        crate::handlers::coupons::ApplyCouponRequest,
        crate::handlers::coupons::CouponResponse,
        crate::entities::coupon::Model,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "Checkout", description = "Checkout orchestration endpoints")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, document served at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
