// Paywarden - a guarded facade in front of payment providers
//
// Validates requests, encrypts sensitive payment details before they reach a
// provider, masks card numbers on the way back and logs every outcome.

// Re-export the payment facade
pub use paywarden_payments::*;

// Supporting crates
pub use paywarden_log as log;
pub use paywarden_validation as validation;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AddPaymentMethodInput,
        AesGcmEncryptor,
        ConfigError,
        Details,
        EncryptedDetails,
        EncryptedPaymentMethodInput,
        EncryptedValue,
        Encryptor,
        PaymentError,
        PaymentMethod,
        PaymentMethodInput,
        PaymentProvider,
        PaymentRequest,
        PaymentResult,
        PaymentService,
        ProviderPaymentMethod,
        ProviderPaymentRequest,
        ServiceConfig,
        Validate,
        // Masking
        mask_card_number,
        mask_details,
        mask_payment_method,
    };
    pub use paywarden_log::{Fields, Level, Logger, MemoryLogger, StderrLogger};
}
