//! Validation primitives for Paywarden
//!
//! Field-level validators that each return a single [`ValidationError`], and
//! the [`Validate`] trait that request types implement by collecting them
//! into [`ValidationErrors`].
//!
//! # Examples
//!
//! ## Validating a request type
//!
//! ```
//! use paywarden_validation::{IsPositive, NotEmpty, Validate, ValidationErrors};
//!
//! struct Refund {
//!     charge_id: String,
//!     amount: i64,
//! }
//!
//! impl Validate for Refund {
//!     fn validate(&self) -> Result<(), ValidationErrors> {
//!         let mut errors = ValidationErrors::default();
//!         errors.check(NotEmpty::validate(&self.charge_id, "chargeId"));
//!         errors.check(IsPositive::validate(self.amount, "amount"));
//!         errors.into_result()
//!     }
//! }
//!
//! let refund = Refund { charge_id: "ch_1".to_string(), amount: 0 };
//! let errors = refund.validate().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.errors[0].field, "amount");
//! ```
//!
//! ## Membership checks
//!
//! ```
//! use paywarden_validation::OneOf;
//!
//! let levels = OneOf(&["debug", "info", "warn", "error"]);
//! assert!(levels.validate("warn", "logLevel").is_ok());
//!
//! let err = levels.validate("verbose", "logLevel").unwrap_err();
//! assert_eq!(err.constraint, "oneOf");
//! assert_eq!(err.value.as_deref(), Some("verbose"));
//! ```

mod errors;
mod traits;
mod validators;

pub use errors::*;
pub use traits::*;
pub use validators::*;
