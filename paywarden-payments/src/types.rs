//! Payment types and data structures
//!
//! Plaintext and encrypted variants of the inbound types are distinct
//! types, so a provider can only ever be handed the encrypted form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Field name of the card number inside [`Details`]
pub const CARD_NUMBER_FIELD: &str = "cardNumber";

/// Sensitive payment-method fields, keyed by field name.
///
/// `Debug` prints field names only, never values.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Details(HashMap<String, String>);

impl Details {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Add a field, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Details")
            .field("fields", &self.keys())
            .finish_non_exhaustive()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Details {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for Details {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Opaque ciphertext token produced by an [`Encryptor`](crate::Encryptor)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedValue(String);

impl EncryptedValue {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encrypted counterpart of [`Details`]: same keys, every value sealed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedDetails(HashMap<String, EncryptedValue>);

impl EncryptedDetails {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: EncryptedValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&EncryptedValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EncryptedValue)> {
        self.0.iter()
    }
}

/// Payment request as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount to charge, in major units
    pub amount: Decimal,
    /// ISO 4217 currency code
    pub currency: String,
    /// Stored method reference or inline method details
    pub payment_method: PaymentMethodInput,
    /// Customer ID (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl PaymentRequest {
    /// Create a simple payment request
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        payment_method: PaymentMethodInput,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            payment_method,
            customer_id: None,
            description: None,
            metadata: HashMap::new(),
        }
    }

    /// With customer
    pub fn customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// With description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With metadata
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Payment method supplied with a payment request.
///
/// On the wire a bare string is a reference and an object is inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentMethodInput {
    /// ID of a payment method the provider already holds
    Reference(String),
    /// Method details supplied with the request
    Inline {
        #[serde(rename = "type")]
        method_type: String,
        #[serde(default)]
        details: Details,
    },
}

impl PaymentMethodInput {
    /// Stored payment method
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }

    /// Inline payment method
    pub fn inline(method_type: impl Into<String>, details: Details) -> Self {
        Self::Inline {
            method_type: method_type.into(),
            details,
        }
    }

    /// Inline card with just a card number
    pub fn card(number: impl Into<String>) -> Self {
        Self::inline("card", Details::new().with(CARD_NUMBER_FIELD, number))
    }

    /// The method type, if inline
    pub fn method_type(&self) -> Option<&str> {
        match self {
            Self::Reference(_) => None,
            Self::Inline { method_type, .. } => Some(method_type),
        }
    }
}

/// Payment request as handed to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPaymentRequest {
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: ProviderPaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// Provider-side payment method: references pass through, inline details are sealed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderPaymentMethod {
    Reference(String),
    Inline {
        #[serde(rename = "type")]
        method_type: String,
        details: EncryptedDetails,
    },
}

/// Outcome of a payment as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    /// Whether the payment went through
    pub success: bool,
    /// Present iff `success`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Present iff not `success`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResult {
    /// Successful payment
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error: None,
        }
    }

    /// Failed payment
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Payment method ID
    pub id: String,
    /// Type (card, bank_account, ...)
    #[serde(rename = "type")]
    pub method_type: String,
    /// Method details; masked before reaching callers
    #[serde(default)]
    pub details: Details,
    /// Customer ID (if attached)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Created timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, method_type: impl Into<String>, details: Details) -> Self {
        Self {
            id: id.into(),
            method_type: method_type.into(),
            details,
            customer_id: None,
            created_at: None,
        }
    }

    /// Attach to a customer
    pub fn customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Set the creation time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Request to register a new payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPaymentMethodInput {
    #[serde(rename = "type")]
    pub method_type: String,
    /// Raw details; encrypted before they reach the provider
    pub details: Details,
}

impl AddPaymentMethodInput {
    pub fn new(method_type: impl Into<String>, details: Details) -> Self {
        Self {
            method_type: method_type.into(),
            details,
        }
    }
}

/// [`AddPaymentMethodInput`] after encryption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedPaymentMethodInput {
    #[serde(rename = "type")]
    pub method_type: String,
    pub details: EncryptedDetails,
}
