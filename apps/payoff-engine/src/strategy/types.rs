//! Leg classification types.
//!
//! A leg is either an option (call or put) or a block of the underlying
//! stock, held long or short.

use serde::{Deserialize, Serialize};

use crate::pricing::OptionType;

/// Instrument held by a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegType {
    /// Call option.
    Call,
    /// Put option.
    Put,
    /// The underlying stock itself.
    Stock,
}

impl LegType {
    /// The option type for option legs, `None` for stock.
    #[must_use]
    pub const fn option_type(&self) -> Option<OptionType> {
        match self {
            Self::Call => Some(OptionType::Call),
            Self::Put => Some(OptionType::Put),
            Self::Stock => None,
        }
    }

    /// Whether the leg's value keeps rising with the underlying.
    #[must_use]
    pub const fn is_upside_exposed(&self) -> bool {
        matches!(self, Self::Call | Self::Stock)
    }
}

impl From<OptionType> for LegType {
    fn from(kind: OptionType) -> Self {
        match kind {
            OptionType::Call => Self::Call,
            OptionType::Put => Self::Put,
        }
    }
}

impl std::fmt::Display for LegType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
            Self::Stock => write!(f, "Stock"),
        }
    }
}

/// Position direction for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegDirection {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl LegDirection {
    /// +1 for long, -1 for short.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}
