//! Payment provider trait

use crate::error::Result;
use crate::types::{EncryptedPaymentMethodInput, PaymentMethod, PaymentResult, ProviderPaymentRequest};
use async_trait::async_trait;

/// Payment provider trait
///
/// Implement this for each payment gateway. Providers only ever see
/// encrypted payment details; the service masks whatever they return
/// before it reaches a caller.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Get provider name
    fn name(&self) -> &'static str;

    /// Execute a payment
    async fn create_payment(&self, request: ProviderPaymentRequest) -> Result<PaymentResult>;

    /// List a customer's stored payment methods
    async fn get_payment_methods(&self, customer_id: &str) -> Result<Vec<PaymentMethod>>;

    /// Store a payment method for a customer
    async fn add_payment_method(
        &self,
        customer_id: &str,
        input: EncryptedPaymentMethodInput,
    ) -> Result<PaymentMethod>;

    /// Delete a stored payment method
    async fn remove_payment_method(&self, method_id: &str) -> Result<()>;
}
