//! Payment service facade
//!
//! [`PaymentService`] sits between callers and a [`PaymentProvider`]. On the
//! way out it validates requests and encrypts sensitive details; on the way
//! back it masks payment methods. Every outcome is logged through the
//! injected [`Logger`], and errors are returned exactly as produced.

use crate::config::ServiceConfig;
use crate::crypto::Encryptor;
use crate::error::{ConfigError, PaymentError, Result};
use crate::masking::mask_payment_method;
use crate::provider::PaymentProvider;
use crate::types::{
    AddPaymentMethodInput, EncryptedPaymentMethodInput, PaymentMethod, PaymentMethodInput,
    PaymentRequest, PaymentResult, ProviderPaymentMethod, ProviderPaymentRequest,
};
use paywarden_log::{Fields, Logger};
use paywarden_validation::Validate;
use std::sync::Arc;

/// Payment service wrapping a provider
pub struct PaymentService<P: PaymentProvider + ?Sized> {
    provider: Arc<P>,
    encryptor: Arc<dyn Encryptor>,
    logger: Arc<dyn Logger>,
}

impl<P: PaymentProvider> PaymentService<P> {
    /// Create a new payment service
    pub fn new(provider: P, encryptor: Arc<dyn Encryptor>, logger: Arc<dyn Logger>) -> Self {
        Self::with_shared_provider(Arc::new(provider), encryptor, logger)
    }

    /// Create with the encryptor and logger described by `config`
    pub fn from_config(
        provider: P,
        config: &ServiceConfig,
    ) -> std::result::Result<Self, ConfigError> {
        let encryptor = config.encryptor()?;
        Ok(Self::new(
            provider,
            Arc::new(encryptor),
            Arc::new(config.logger()),
        ))
    }
}

impl<P: PaymentProvider + ?Sized> PaymentService<P> {
    /// Create from an already shared provider, including `Arc<dyn PaymentProvider>`
    pub fn with_shared_provider(
        provider: Arc<P>,
        encryptor: Arc<dyn Encryptor>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            provider,
            encryptor,
            logger,
        }
    }

    /// Get the provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate, encrypt and submit a payment.
    ///
    /// The provider result is returned as is, whether or not the payment
    /// succeeded. Invalid requests never reach the provider.
    pub async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentResult> {
        if let Err(errors) = request.validate() {
            self.logger.error(
                "payment validation failed",
                &Fields::new()
                    .with("currency", request.currency.as_str())
                    .with("errors", errors.to_json()),
            );
            return Err(PaymentError::Validation(errors));
        }

        let summary = Fields::new()
            .with("provider", self.provider.name())
            .with("amount", request.amount.to_string())
            .with("currency", request.currency.as_str());

        let sealed = self
            .seal_request(request)
            .map_err(|err| self.fail("payment failed", summary.clone(), err))?;

        self.logger.debug(
            "dispatching payment",
            &summary
                .clone()
                .with("method", method_kind(&sealed.payment_method)),
        );

        let result = self
            .provider
            .create_payment(sealed)
            .await
            .map_err(|err| self.fail("payment failed", summary.clone(), err))?;

        if result.success {
            let mut fields = summary;
            if let Some(transaction_id) = &result.transaction_id {
                fields.insert("transactionId", transaction_id.as_str());
            }
            self.logger.info("payment processed", &fields);
        } else {
            self.logger.error(
                "payment declined",
                &summary.with("error", result.error.as_deref().unwrap_or("unknown")),
            );
        }

        Ok(result)
    }

    /// List a customer's payment methods, masked
    pub async fn get_payment_methods(&self, customer_id: &str) -> Result<Vec<PaymentMethod>> {
        let context = Fields::new().with("customerId", customer_id);
        self.logger.debug("fetching payment methods", &context);

        let methods = self
            .provider
            .get_payment_methods(customer_id)
            .await
            .map_err(|err| self.fail("failed to fetch payment methods", context.clone(), err))?;

        let methods: Vec<PaymentMethod> = methods.into_iter().map(mask_payment_method).collect();
        self.logger.info(
            "payment methods fetched",
            &context.with("count", methods.len()),
        );
        Ok(methods)
    }

    /// Encrypt and store a payment method, returning it masked
    pub async fn add_payment_method(
        &self,
        customer_id: &str,
        input: AddPaymentMethodInput,
    ) -> Result<PaymentMethod> {
        let context = Fields::new()
            .with("customerId", customer_id)
            .with("type", input.method_type.as_str());

        let details = self
            .encryptor
            .encrypt_details(&input.details)
            .map_err(|err| self.fail("failed to add payment method", context.clone(), err.into()))?;

        self.logger.debug("adding payment method", &context);

        let sealed = EncryptedPaymentMethodInput {
            method_type: input.method_type,
            details,
        };
        let method = self
            .provider
            .add_payment_method(customer_id, sealed)
            .await
            .map_err(|err| self.fail("failed to add payment method", context.clone(), err))?;

        let method = mask_payment_method(method);
        self.logger.info(
            "payment method added",
            &context.with("methodId", method.id.as_str()),
        );
        Ok(method)
    }

    /// Delete a stored payment method
    pub async fn remove_payment_method(&self, method_id: &str) -> Result<()> {
        let context = Fields::new().with("methodId", method_id);
        self.logger.debug("removing payment method", &context);

        self.provider
            .remove_payment_method(method_id)
            .await
            .map_err(|err| self.fail("failed to remove payment method", context.clone(), err))?;

        self.logger.info("payment method removed", &context);
        Ok(())
    }

    fn seal_request(&self, request: PaymentRequest) -> Result<ProviderPaymentRequest> {
        let payment_method = match request.payment_method {
            PaymentMethodInput::Reference(id) => ProviderPaymentMethod::Reference(id),
            PaymentMethodInput::Inline {
                method_type,
                details,
            } => ProviderPaymentMethod::Inline {
                method_type,
                details: self.encryptor.encrypt_details(&details)?,
            },
        };

        Ok(ProviderPaymentRequest {
            amount: request.amount,
            currency: request.currency,
            payment_method,
            customer_id: request.customer_id,
            description: request.description,
            metadata: request.metadata,
        })
    }

    /// Log `err` at error level and hand it back untouched
    fn fail(&self, message: &str, context: Fields, err: PaymentError) -> PaymentError {
        self.logger.error(
            message,
            &context
                .with("error", err.to_string())
                .with("errorKind", err.kind()),
        );
        err
    }
}

impl<P: PaymentProvider + ?Sized> Clone for PaymentService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            encryptor: Arc::clone(&self.encryptor),
            logger: Arc::clone(&self.logger),
        }
    }
}

fn method_kind(method: &ProviderPaymentMethod) -> &'static str {
    match method {
        ProviderPaymentMethod::Reference(_) => "reference",
        ProviderPaymentMethod::Inline { .. } => "inline",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::AesGcmEncryptor;
    use crate::types::Details;
    use async_trait::async_trait;
    use paywarden_log::{Level, MemoryLogger};
    use rust_decimal::Decimal;

    struct Unreachable;

    #[async_trait]
    impl PaymentProvider for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn create_payment(&self, _request: ProviderPaymentRequest) -> Result<PaymentResult> {
            Err(PaymentError::Network("offline".into()))
        }

        async fn get_payment_methods(&self, _customer_id: &str) -> Result<Vec<PaymentMethod>> {
            Err(PaymentError::Network("offline".into()))
        }

        async fn add_payment_method(
            &self,
            _customer_id: &str,
            _input: EncryptedPaymentMethodInput,
        ) -> Result<PaymentMethod> {
            Err(PaymentError::Network("offline".into()))
        }

        async fn remove_payment_method(&self, _method_id: &str) -> Result<()> {
            Err(PaymentError::Network("offline".into()))
        }
    }

    fn service(logger: &MemoryLogger) -> PaymentService<Unreachable> {
        PaymentService::new(
            Unreachable,
            Arc::new(AesGcmEncryptor::new(&[1u8; 32]).unwrap()),
            Arc::new(logger.clone()),
        )
    }

    #[test]
    fn test_seal_request_encrypts_inline_details() {
        let svc = service(&MemoryLogger::new());
        let request = PaymentRequest::new(
            Decimal::from(10),
            "USD",
            PaymentMethodInput::inline(
                "card",
                Details::new()
                    .with("cardNumber", "4111111111111111")
                    .with("expMonth", "12"),
            ),
        )
        .metadata("order", "1234");

        let sealed = svc.seal_request(request).unwrap();
        assert_eq!(sealed.metadata.get("order").map(String::as_str), Some("1234"));
        match sealed.payment_method {
            ProviderPaymentMethod::Inline {
                method_type,
                details,
            } => {
                assert_eq!(method_type, "card");
                assert_eq!(details.len(), 2);
                assert!(
                    details
                        .iter()
                        .all(|(_, v)| !v.as_str().contains("4111111111111111"))
                );
            }
            other => panic!("expected inline method, got {:?}", other),
        }
    }

    #[test]
    fn test_seal_request_keeps_reference() {
        let svc = service(&MemoryLogger::new());
        let request =
            PaymentRequest::new(Decimal::from(10), "USD", PaymentMethodInput::reference("pm_9"));
        let sealed = svc.seal_request(request).unwrap();
        assert_eq!(
            sealed.payment_method,
            ProviderPaymentMethod::Reference("pm_9".into())
        );
    }

    #[tokio::test]
    async fn test_error_fields_carry_kind() {
        let logger = MemoryLogger::new();
        let err = service(&logger).get_payment_methods("cus_1").await.unwrap_err();
        assert_eq!(err, PaymentError::Network("offline".into()));

        let record = logger
            .find(Level::Error, "failed to fetch payment methods")
            .unwrap();
        assert_eq!(record.fields.get_str("customerId"), Some("cus_1"));
        assert_eq!(record.fields.get_str("errorKind"), Some("network"));
        assert_eq!(
            record.fields.get_str("error"),
            Some("Network error: offline")
        );
    }

    #[test]
    fn test_clone_shares_provider() {
        let svc = service(&MemoryLogger::new());
        let cloned = svc.clone();
        assert!(Arc::ptr_eq(&svc.provider, &cloned.provider));
    }
}
