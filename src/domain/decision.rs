use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DecisionError {
    #[error("decision {0} is outside [-1, 1]")]
    OutOfRange(f64),
}

/// A validated trade decision in `[-1, 1]`.
///
/// Negative values sell that fraction of the asset balance, positive values
/// spend that fraction of the base balance, zero holds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decision(f64);

impl Decision {
    pub const HOLD: Self = Self(0.0);
    pub const ALL_IN: Self = Self(1.0);

    pub fn validate(raw: f64) -> Result<Self, DecisionError> {
        if raw.is_nan() || raw.abs() > 1.0 {
            return Err(DecisionError::OutOfRange(raw));
        }
        Ok(Self(raw))
    }

    /// Saturating constructor for bots that scale a signal into a decision.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::HOLD;
        }
        Self(raw.clamp(-1.0, 1.0))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(Decision::validate(1.0).is_ok());
        assert!(Decision::validate(-1.0).is_ok());
        assert_eq!(Decision::validate(1.5), Err(DecisionError::OutOfRange(1.5)));
        assert!(Decision::validate(-1.0001).is_err());
        assert!(Decision::validate(f64::NAN).is_err());
    }

    #[test]
    fn clamped_saturates() {
        assert_eq!(Decision::clamped(3.2).value(), 1.0);
        assert_eq!(Decision::clamped(-7.0).value(), -1.0);
        assert_eq!(Decision::clamped(0.25).value(), 0.25);
        assert_eq!(Decision::clamped(f64::NAN), Decision::HOLD);
    }
}
