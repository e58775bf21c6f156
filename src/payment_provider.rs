//! Card-payment provider integration.
//!
//! [`PaymentProvider`] is the seam the payment-intent service calls through;
//! [`StripeGateway`] is the production implementation. Amounts cross this
//! boundary already normalized to the provider's minor unit.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Provider-side record of an attempt to collect payment. The client
/// completes authorization with the opaque `client_secret`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Failure reported by the provider call: network, validation, or rate
/// limiting. The message is surfaced to the caller verbatim.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// Outbound payment-provider interface.
///
/// One call per checkout submit; no retry, no idempotency key, so a
/// client-side retry after a timeout can create a duplicate intent.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent restricted to card payment methods.
    /// `amount` is in the provider's minor unit (e.g. cents for USD).
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProviderError>;
}

#[derive(Debug, Default, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    error: StripeErrorDetails,
}

#[derive(Debug, Default, Deserialize)]
struct StripeErrorDetails {
    #[serde(default)]
    message: Option<String>,
}

/// Stripe-backed [`PaymentProvider`] speaking the form-encoded
/// `/v1/payment_intents` API.
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(secret_key: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        debug!(amount, currency, "requesting payment intent from provider");

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", currency.to_ascii_lowercase()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("payment provider returned {}", status));
            return Err(ProviderError(message));
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| ProviderError(format!("malformed provider response: {}", e)))
    }
}
