// Validation traits

use crate::ValidationErrors;

/// Trait for validatable types
pub trait Validate {
    /// Validate the value, reporting every violation found
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Shorthand for `validate().is_ok()`
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut all = ValidationErrors::default();
        for item in self {
            if let Err(errors) = item.validate() {
                all.errors.extend(errors.errors);
            }
        }
        all.into_result()
    }
}
