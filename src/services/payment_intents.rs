use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::payment_provider::PaymentProvider;

/// Successful intent creation: the opaque secret the client uses to
/// complete card authorization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResult {
    pub client_secret: String,
}

/// Converts a client-supplied major-unit amount to the provider's
/// minor-unit integer.
///
/// USD is scaled to cents; every other code is assumed zero-decimal and
/// only rounded. Known limitation: three-decimal currencies (KWD, BHD, ...)
/// get no scaling either, so they would be billed in major units.
/// Rounding is to the nearest integer, ties away from zero.
pub fn to_minor_units(amount: Decimal, currency: &str) -> Result<i64, ServiceError> {
    let scaled = if currency.eq_ignore_ascii_case("usd") {
        amount * Decimal::ONE_HUNDRED
    } else {
        amount
    };

    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| ServiceError::BadRequest(format!("amount {} is out of range", amount)))
}

/// Server-side payment-intent creation. Stateless; one provider call per
/// request, no retry.
pub struct PaymentIntentService {
    provider: Arc<dyn PaymentProvider>,
}

impl PaymentIntentService {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    /// Validate the request, normalize the amount, and create one
    /// card-restricted intent with the provider.
    #[instrument(skip(self))]
    pub async fn create_payment_intent(
        &self,
        amount: Option<Decimal>,
        currency: Option<&str>,
    ) -> Result<PaymentIntentResult, ServiceError> {
        let amount = amount.ok_or_else(|| {
            ServiceError::BadRequest("amount and currency are required".to_string())
        })?;
        let currency = match currency {
            Some(code) if !code.is_empty() => code,
            _ => {
                return Err(ServiceError::BadRequest(
                    "amount and currency are required".to_string(),
                ))
            }
        };

        let minor_units = to_minor_units(amount, currency)?;
        info!(%amount, currency, minor_units, "creating payment intent");

        let intent = self
            .provider
            .create_payment_intent(minor_units, currency)
            .await
            .map_err(|e| ServiceError::PaymentProvider(e.to_string()))?;

        Ok(PaymentIntentResult {
            client_secret: intent.client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment_provider::{PaymentIntent, ProviderError};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[test]
    fn usd_scales_to_cents() {
        assert_eq!(to_minor_units(dec!(19.99), "usd").unwrap(), 1999);
        assert_eq!(to_minor_units(dec!(19.99), "USD").unwrap(), 1999);
        assert_eq!(to_minor_units(dec!(19.99), "UsD").unwrap(), 1999);
        assert_eq!(to_minor_units(dec!(0), "usd").unwrap(), 0);
    }

    #[test]
    fn non_usd_is_rounded_but_not_scaled() {
        assert_eq!(to_minor_units(dec!(15000), "COP").unwrap(), 15000);
        assert_eq!(to_minor_units(dec!(19.99), "eur").unwrap(), 20);
        assert_eq!(to_minor_units(dec!(19.49), "gbp").unwrap(), 19);
    }

    #[test]
    fn rounding_breaks_ties_away_from_zero() {
        // 0.005 USD -> 0.5 cents -> 1 cent.
        assert_eq!(to_minor_units(dec!(0.005), "usd").unwrap(), 1);
        assert_eq!(to_minor_units(dec!(19.995), "usd").unwrap(), 2000);
        assert_eq!(to_minor_units(dec!(2.5), "jpy").unwrap(), 3);
    }

    #[test]
    fn three_decimal_currencies_are_not_scaled() {
        // Known limitation carried over from the original two-branch
        // normalization: KWD bills in fils (1/1000), but the amount is sent
        // in major units like every other non-USD code.
        assert_eq!(to_minor_units(dec!(12.345), "KWD").unwrap(), 12);
    }

    struct StubProvider {
        calls: Mutex<Vec<(i64, String)>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl PaymentProvider for StubProvider {
        async fn create_payment_intent(
            &self,
            amount: i64,
            currency: &str,
        ) -> Result<PaymentIntent, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push((amount, currency.to_string()));
            match &self.fail_with {
                Some(message) => Err(ProviderError(message.clone())),
                None => Ok(PaymentIntent {
                    id: "pi_stub".to_string(),
                    client_secret: "pi_stub_secret".to_string(),
                }),
            }
        }
    }

    fn service(fail_with: Option<String>) -> (PaymentIntentService, Arc<StubProvider>) {
        let provider = Arc::new(StubProvider {
            calls: Mutex::new(Vec::new()),
            fail_with,
        });
        (PaymentIntentService::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn missing_amount_is_a_bad_request_without_a_provider_call() {
        let (service, provider) = service(None);
        let err = service
            .create_payment_intent(None, Some("usd"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_or_empty_currency_is_a_bad_request() {
        let (service, provider) = service(None);
        for currency in [None, Some("")] {
            let err = service
                .create_payment_intent(Some(dec!(10)), currency)
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::BadRequest(_)));
        }
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_passes_minor_units_to_the_provider() {
        let (service, provider) = service(None);
        let result = service
            .create_payment_intent(Some(dec!(19.99)), Some("USD"))
            .await
            .unwrap();
        assert_eq!(result.client_secret, "pi_stub_secret");
        assert_eq!(
            provider.calls.lock().unwrap().as_slice(),
            &[(1999, "USD".to_string())]
        );
    }

    #[tokio::test]
    async fn provider_failure_surfaces_message_after_a_single_attempt() {
        let (service, provider) = service(Some("Your card was declined".to_string()));
        let err = service
            .create_payment_intent(Some(dec!(5)), Some("usd"))
            .await
            .unwrap_err();
        match err {
            ServiceError::PaymentProvider(message) => {
                assert_eq!(message, "Your card was declined")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // No internal retry.
        assert_eq!(provider.calls.lock().unwrap().len(), 1);
    }
}
