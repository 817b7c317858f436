// Shared test doubles for payment service tests
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use paywarden_payments::{
    AesGcmEncryptor, Details, EncryptedPaymentMethodInput, EncryptionError, Encryptor,
    EncryptedValue, PaymentMethod, PaymentProvider, PaymentResult, ProviderPaymentRequest,
    Result,
};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_KEY: [u8; 32] = [42u8; 32];

pub fn encryptor() -> AesGcmEncryptor {
    AesGcmEncryptor::new(&TEST_KEY).unwrap()
}

/// A call received by [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreatePayment(ProviderPaymentRequest),
    GetPaymentMethods(String),
    AddPaymentMethod(String, EncryptedPaymentMethodInput),
    RemovePaymentMethod(String),
}

#[derive(Default)]
struct Responses {
    payment: Option<Result<PaymentResult>>,
    methods: Option<Result<Vec<PaymentMethod>>>,
    added: Option<Result<PaymentMethod>>,
    removed: Option<Result<()>>,
}

/// Recording provider with configurable responses.
///
/// Unconfigured operations succeed: payments get a fresh transaction id,
/// listing returns nothing and added methods are echoed back with their
/// encrypted details.
#[derive(Clone, Default)]
pub struct MockProvider {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<Responses>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payment_result(self, result: Result<PaymentResult>) -> Self {
        self.responses.lock().payment = Some(result);
        self
    }

    pub fn with_methods(self, result: Result<Vec<PaymentMethod>>) -> Self {
        self.responses.lock().methods = Some(result);
        self
    }

    pub fn with_added(self, result: Result<PaymentMethod>) -> Self {
        self.responses.lock().added = Some(result);
        self
    }

    pub fn with_remove_result(self, result: Result<()>) -> Self {
        self.responses.lock().removed = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Requests passed to `create_payment`, in order
    pub fn payment_requests(&self) -> Vec<ProviderPaymentRequest> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::CreatePayment(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_payment(&self, request: ProviderPaymentRequest) -> Result<PaymentResult> {
        self.record(Call::CreatePayment(request));
        match &self.responses.lock().payment {
            Some(result) => result.clone(),
            None => Ok(PaymentResult::succeeded(format!(
                "tx_{}",
                Uuid::new_v4().simple()
            ))),
        }
    }

    async fn get_payment_methods(&self, customer_id: &str) -> Result<Vec<PaymentMethod>> {
        self.record(Call::GetPaymentMethods(customer_id.to_string()));
        match &self.responses.lock().methods {
            Some(result) => result.clone(),
            None => Ok(Vec::new()),
        }
    }

    async fn add_payment_method(
        &self,
        customer_id: &str,
        input: EncryptedPaymentMethodInput,
    ) -> Result<PaymentMethod> {
        self.record(Call::AddPaymentMethod(customer_id.to_string(), input.clone()));
        match &self.responses.lock().added {
            Some(result) => result.clone(),
            None => {
                let details: Details = input
                    .details
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_str().to_string()))
                    .collect();
                Ok(
                    PaymentMethod::new(format!("pm_{}", Uuid::new_v4().simple()), input.method_type, details)
                        .customer(customer_id),
                )
            }
        }
    }

    async fn remove_payment_method(&self, method_id: &str) -> Result<()> {
        self.record(Call::RemovePaymentMethod(method_id.to_string()));
        match &self.responses.lock().removed {
            Some(result) => result.clone(),
            None => Ok(()),
        }
    }
}

/// Encryptor that always fails
pub struct FailingEncryptor;

impl Encryptor for FailingEncryptor {
    fn encrypt(&self, _plaintext: &str) -> std::result::Result<EncryptedValue, EncryptionError> {
        Err(EncryptionError::EncryptionFailed)
    }

    fn decrypt(&self, _value: &EncryptedValue) -> std::result::Result<String, EncryptionError> {
        Err(EncryptionError::DecryptionFailed)
    }
}
