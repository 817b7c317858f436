//! Structural validation of inbound payment requests

use crate::types::{AddPaymentMethodInput, Details, PaymentMethodInput, PaymentRequest};
use paywarden_validation::{IsPositive, NotEmpty, Validate, ValidationError, ValidationErrors};

/// Three ASCII letters, in any case
fn currency_code(code: &str, field: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{} must be a three-letter ISO 4217 code", field),
        )
        .with_constraint("currencyCode")
        .with_value(code))
    }
}

fn require_details(errors: &mut ValidationErrors, details: &Details, field: &str) {
    if details.is_empty() {
        errors.add(
            ValidationError::new(field, format!("{} should not be empty", field))
                .with_constraint("notEmpty"),
        );
    } else {
        check_keys(errors, details, field);
    }
}

fn check_keys(errors: &mut ValidationErrors, details: &Details, field: &str) {
    if details.iter().any(|(key, _)| key.trim().is_empty()) {
        errors.add(
            ValidationError::new(field, format!("{} contains an empty field name", field))
                .with_constraint("fieldName"),
        );
    }
}

impl Validate for PaymentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check(IsPositive::validate(self.amount, "amount"));

        match NotEmpty::validate(&self.currency, "currency") {
            Ok(()) => errors.check(currency_code(&self.currency, "currency")),
            Err(e) => errors.add(e),
        }

        match &self.payment_method {
            PaymentMethodInput::Reference(id) => {
                errors.check(NotEmpty::validate(id, "paymentMethod"));
            }
            PaymentMethodInput::Inline {
                method_type,
                details,
            } => {
                errors.check(NotEmpty::validate(method_type, "paymentMethod.type"));
                // wallets and redirects carry no details
                check_keys(&mut errors, details, "paymentMethod.details");
            }
        }

        if let Some(customer_id) = &self.customer_id {
            errors.check(NotEmpty::validate(customer_id, "customerId"));
        }

        errors.into_result()
    }
}

impl Validate for AddPaymentMethodInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(NotEmpty::validate(&self.method_type, "type"));
        require_details(&mut errors, &self.details, "details");
        errors.into_result()
    }
}
