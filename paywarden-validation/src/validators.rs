// Built-in validators

use crate::ValidationError;
use std::fmt::Display;

/// Validates that a string is not empty
///
/// Whitespace-only values count as empty. The value is never echoed back,
/// so this is safe to run over card data.
pub struct NotEmpty;

impl NotEmpty {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(
                ValidationError::new(field, format!("{} should not be empty", field))
                    .with_constraint("notEmpty"),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates that a value is one of an allowed set
pub struct OneOf<'a>(pub &'a [&'a str]);

impl OneOf<'_> {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.0.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} must be one of: {}", field, self.0.join(", ")),
            )
            .with_constraint("oneOf")
            .with_value(value.to_string()))
        }
    }
}

/// Validates value is strictly greater than zero
pub struct IsPositive;

impl IsPositive {
    /// Works for any numeric type whose `Default` is zero, including
    /// `rust_decimal::Decimal`.
    pub fn validate<T: PartialOrd + Default + Display>(
        value: T,
        field: &str,
    ) -> Result<(), ValidationError> {
        if value > T::default() {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a positive number", field))
                    .with_constraint("isPositive")
                    .with_value(value.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(NotEmpty::validate("test", "field").is_ok());
        assert!(NotEmpty::validate("", "field").is_err());
        assert!(NotEmpty::validate("   ", "field").is_err());
        assert!(NotEmpty::validate("\t\n  \r", "field").is_err());
    }

    #[test]
    fn test_not_empty_does_not_echo_value() {
        let err = NotEmpty::validate(" ", "cardNumber").unwrap_err();
        assert_eq!(err.constraint, "notEmpty");
        assert!(err.value.is_none());
    }

    #[test]
    fn test_one_of() {
        let validator = OneOf(&["debug", "info"]);
        assert!(validator.validate("info", "level").is_ok());
        let err = validator.validate("trace", "level").unwrap_err();
        assert_eq!(err.message, "level must be one of: debug, info");
        assert_eq!(err.value.as_deref(), Some("trace"));
    }

    #[test]
    fn test_one_of_is_case_sensitive() {
        assert!(OneOf(&["info"]).validate("INFO", "level").is_err());
    }

    #[test]
    fn test_is_positive() {
        assert!(IsPositive::validate(1, "amount").is_ok());
        assert!(IsPositive::validate(0, "amount").is_err());
        assert!(IsPositive::validate(-5, "amount").is_err());
        assert!(IsPositive::validate(0.01, "amount").is_ok());
        assert!(IsPositive::validate(0.0, "amount").is_err());
    }
}
