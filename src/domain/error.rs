//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::AmountError;

/// Domain-specific errors
///
/// These errors represent invalid input and business rule violations.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid monetary amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Category text that matches no known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Date or month that cannot be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Required field left empty
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_invalid_amount_error() {
        let err: DomainError = AmountError::Negative(Decimal::new(-5, 0)).into();
        assert!(matches!(err, DomainError::InvalidAmount(AmountError::Negative(_))));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_empty_field_error() {
        let err = DomainError::EmptyField("username");
        assert_eq!(err.to_string(), "Field must not be empty: username");
    }
}
