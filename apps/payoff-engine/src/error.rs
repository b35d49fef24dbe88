//! Error types for the payoff engine.
//!
//! Every failure is a local validation failure detected before any
//! floating-point work begins. None are retryable; callers decide how to
//! surface them (disable a "Calculate" action, show a validation message).
//!
//! | Code | Raised when |
//! |------|-------------|
//! | `INVALID_PARAMETER` | Non-positive spot/strike, non-finite input, zero quantity |
//! | `UNDEFINED_AT_EXPIRATION` | Greeks requested with T <= 0 or sigma <= 0 |
//! | `EMPTY_STRATEGY` | No legs supplied |
//! | `DEGENERATE_RANGE` | Price range or sample count collapses |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for callers that branch on error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input outside the model's domain.
    InvalidParameter,
    /// Greeks are not defined at or past expiration.
    UndefinedAtExpiration,
    /// No legs were supplied.
    EmptyStrategy,
    /// The sampled price range has no width.
    DegenerateRange,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::UndefinedAtExpiration => "UNDEFINED_AT_EXPIRATION",
            Self::EmptyStrategy => "EMPTY_STRATEGY",
            Self::DegenerateRange => "DEGENERATE_RANGE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors from pricing, Greeks, aggregation and payoff analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A parameter is outside the model's domain.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message.
        message: String,
    },

    /// Greeks requested at or past expiration, or with zero volatility.
    #[error(
        "Greeks undefined at expiration (time_to_expiry={time_to_expiry}, volatility={volatility})"
    )]
    UndefinedAtExpiration {
        /// Time to expiration in years.
        time_to_expiry: f64,
        /// Annualized volatility.
        volatility: f64,
    },

    /// The strategy has no legs.
    #[error("Strategy has no legs")]
    EmptyStrategy,

    /// The price range collapsed to zero width.
    #[error("Degenerate price range: {message}")]
    DegenerateRange {
        /// Error message.
        message: String,
    },
}

impl PricingError {
    /// Build an `InvalidParameter` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Build a `DegenerateRange` error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateRange {
            message: message.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::UndefinedAtExpiration { .. } => ErrorCode::UndefinedAtExpiration,
            Self::EmptyStrategy => ErrorCode::EmptyStrategy,
            Self::DegenerateRange { .. } => ErrorCode::DegenerateRange,
        }
    }

    /// Whether retrying the same call could succeed. Always false: every
    /// error is a deterministic validation failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result alias for engine operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Reject non-finite values and values `<= 0`.
pub(crate) fn require_positive(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Reject non-finite values.
pub(crate) fn require_finite(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PricingError::invalid("x").code(),
            ErrorCode::InvalidParameter
        );
        assert_eq!(PricingError::EmptyStrategy.code(), ErrorCode::EmptyStrategy);
        assert_eq!(
            PricingError::degenerate("x").code(),
            ErrorCode::DegenerateRange
        );
        assert_eq!(
            PricingError::UndefinedAtExpiration {
                time_to_expiry: 0.0,
                volatility: 0.2
            }
            .code(),
            ErrorCode::UndefinedAtExpiration
        );
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::UndefinedAtExpiration).unwrap();
        assert_eq!(json, "\"UNDEFINED_AT_EXPIRATION\"");
        assert_eq!(ErrorCode::DegenerateRange.to_string(), "DEGENERATE_RANGE");
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!PricingError::EmptyStrategy.is_retryable());
        assert!(!PricingError::invalid("spot").is_retryable());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("spot", 1.0).is_ok());
        assert!(require_positive("spot", 0.0).is_err());
        assert!(require_positive("spot", -5.0).is_err());
        assert!(require_positive("spot", f64::NAN).is_err());
        assert!(require_positive("spot", f64::INFINITY).is_err());
        assert!(require_finite("rate", -0.01).is_ok());
        assert!(require_finite("rate", f64::NAN).is_err());
    }
}
