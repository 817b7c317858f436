//! Integration tests for paywarden-validation

use paywarden_validation::*;

const METHOD_TYPES: &[&str] = &["card", "bank_account", "wallet"];

struct ChargeInput {
    customer_id: String,
    method_type: String,
    amount: i64,
}

impl Validate for ChargeInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check(NotEmpty::validate(&self.customer_id, "customerId"));
        errors.check(NotEmpty::validate(&self.method_type, "type"));
        errors.check(OneOf(METHOD_TYPES).validate(&self.method_type, "type"));
        errors.check(IsPositive::validate(self.amount, "amount"));
        errors.into_result()
    }
}

fn valid_charge() -> ChargeInput {
    ChargeInput {
        customer_id: "cus_1".to_string(),
        method_type: "card".to_string(),
        amount: 1500,
    }
}

#[test]
fn test_valid_struct_passes() {
    assert!(valid_charge().validate().is_ok());
    assert!(valid_charge().is_valid());
}

#[test]
fn test_all_violations_reported() {
    let charge = ChargeInput {
        customer_id: " ".to_string(),
        method_type: String::new(),
        amount: -1,
    };

    let errors = charge.validate().unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.fields(), vec!["customerId", "type", "amount"]);
    assert_eq!(errors.get_field_errors("type").len(), 2);
}

#[test]
fn test_option_and_slice_validation() {
    let none: Option<ChargeInput> = None;
    assert!(none.validate().is_ok());

    let mut bad = valid_charge();
    bad.method_type = "cheque".to_string();
    let charges = vec![valid_charge(), bad];
    let errors = charges.as_slice().validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].constraint, "oneOf");
}

#[test]
fn test_errors_serialize_for_logging() {
    let errors = ChargeInput {
        amount: 0,
        ..valid_charge()
    }
    .validate()
    .unwrap_err();

    let json = errors.to_json();
    assert_eq!(json["errors"][0]["field"], "amount");
    assert_eq!(json["errors"][0]["constraint"], "isPositive");
}

#[test]
fn test_validation_error_creation() {
    let error = ValidationError::new("currency", "unsupported currency")
        .with_constraint("currency")
        .with_value("XYZ");

    assert_eq!(error.field, "currency");
    assert_eq!(error.message, "unsupported currency");
    assert_eq!(error.to_string(), "currency: unsupported currency");
}
