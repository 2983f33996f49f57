//! Weights

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Weight could not be created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
    /// Weights must be strictly positive.
    #[error("weight must be greater than zero, got {0} kg")]
    NotPositive(Decimal),
}

/// A measured weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(Decimal);

impl Weight {
    /// Create a weight from a number of kilograms.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::NotPositive`] for zero or negative weights.
    pub fn from_kilograms(kilograms: Decimal) -> Result<Self, WeightError> {
        if kilograms > Decimal::ZERO {
            Ok(Self(kilograms))
        } else {
            Err(WeightError::NotPositive(kilograms))
        }
    }

    /// Create a weight from whole grams.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::NotPositive`] for zero grams.
    pub fn from_grams(grams: u32) -> Result<Self, WeightError> {
        Self::from_kilograms(Decimal::new(i64::from(grams), 3))
    }

    /// Weight in kilograms.
    pub fn kilograms(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg", self.0)
    }
}
