//! Payment facade for Paywarden
//!
//! Wraps any [`PaymentProvider`] with request validation, field-level
//! encryption of sensitive details, masking of returned payment methods
//! and structured logging.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PaymentService                          │
//! │                                                              │
//! │  process_payment | get_payment_methods                      │
//! │  add_payment_method | remove_payment_method                  │
//! │                                                              │
//! │   outbound:  validate ─► encrypt details ─► provider        │
//! │   inbound:   provider ─► mask card number ─► caller         │
//! │                                                              │
//! │   every outcome ─► Logger (no sensitive details)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paywarden_payments::{
//!     PaymentMethodInput, PaymentRequest, PaymentService, ServiceConfig,
//! };
//! use rust_decimal::Decimal;
//!
//! let config = ServiceConfig::from_env()?;
//! let service = PaymentService::from_config(MyProvider::new(), &config)?;
//!
//! let result = service
//!     .process_payment(PaymentRequest::new(
//!         Decimal::new(2999, 2),
//!         "USD",
//!         PaymentMethodInput::card("4111111111111111"),
//!     ))
//!     .await?;
//!
//! for method in service.get_payment_methods("cus_123").await? {
//!     println!("{} {:?}", method.id, method.details.get("cardNumber"));
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod masking;
pub mod provider;
pub mod service;
pub mod types;
pub mod validate;

pub use config::*;
pub use crypto::*;
pub use error::*;
pub use masking::*;
pub use provider::*;
pub use service::*;
pub use types::*;

pub use paywarden_validation::{Validate, ValidationError, ValidationErrors};
