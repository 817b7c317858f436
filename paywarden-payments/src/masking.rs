//! Display masking for payment methods returned to callers

use crate::types::{CARD_NUMBER_FIELD, Details, PaymentMethod};

const MASK: &str = "****";

/// `****` followed by the last four characters of `value`.
///
/// Values of four characters or fewer are kept whole after the mask.
pub fn mask_card_number(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let start = chars.len().saturating_sub(4);
    let last4: String = chars[start..].iter().collect();
    format!("{}{}", MASK, last4)
}

/// Mask the sensitive fields of `details`.
///
/// Details without a card number come back unchanged.
pub fn mask_details(mut details: Details) -> Details {
    if let Some(number) = details.get(CARD_NUMBER_FIELD) {
        let masked = mask_card_number(number);
        details.insert(CARD_NUMBER_FIELD, masked);
    }
    details
}

/// Mask a payment method before it is handed back to a caller
pub fn mask_payment_method(mut method: PaymentMethod) -> PaymentMethod {
    method.details = mask_details(method.details);
    method
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111111111111111"), "****1111");
        assert_eq!(mask_card_number("5500 0000 0000 0004"), "****0004");
        assert_eq!(mask_card_number("1234"), "****1234");
        assert_eq!(mask_card_number("12"), "****12");
        assert_eq!(mask_card_number(""), "****");
    }

    #[test]
    fn test_mask_card_number_is_char_based() {
        assert_eq!(mask_card_number("ab€€€€"), "****€€€€");
    }

    #[test]
    fn test_mask_details_replaces_card_number_only() {
        let details = Details::new()
            .with("cardNumber", "4111111111111111")
            .with("expMonth", "12");
        let masked = mask_details(details);

        assert_eq!(masked.get("cardNumber"), Some("****1111"));
        assert_eq!(masked.get("expMonth"), Some("12"));
        assert_eq!(masked.len(), 2);
    }

    #[test]
    fn test_mask_details_without_card_is_unchanged() {
        let details = Details::new()
            .with("iban", "DE89370400440532013000")
            .with("holder", "Ada");
        assert_eq!(mask_details(details.clone()), details);
        assert_eq!(mask_details(Details::new()), Details::new());
    }

    #[test]
    fn test_mask_payment_method() {
        let method = PaymentMethod::new(
            "pm_1",
            "card",
            Details::new().with("cardNumber", "378282246310005"),
        )
        .customer("cus_1");

        let masked = mask_payment_method(method);
        assert_eq!(masked.id, "pm_1");
        assert_eq!(masked.customer_id.as_deref(), Some("cus_1"));
        assert_eq!(masked.details.get("cardNumber"), Some("****0005"));
    }
}
