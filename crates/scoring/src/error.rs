use thiserror::Error;

use crate::types::Sex;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("reps out of range: {0} (must be between 1 and 36)")]
    RepsOutOfRange(u32),

    /// A rep count that does not even fit the unsigned range, e.g. a negative stored value.
    #[error("reps out of range: {0} (must be between 1 and 36)")]
    InvalidRepCount(i64),

    #[error("weight {0} cannot be represented as a number")]
    UnrepresentableWeight(String),

    #[error("weight must be positive: {0}")]
    NonPositiveWeight(f64),

    #[error("bodyweight must be positive: {0}")]
    NonPositiveBodyweight(f64),

    #[error("working weight {working} must be below target 1RM {target}")]
    WorkingWeightNotBelowTarget { working: f64, target: f64 },

    #[error("insufficient data: a first-set or last-set effort is required")]
    InsufficientData,

    #[error("coefficient is not positive at bodyweight {bodyweight} kg")]
    NonPositiveCoefficient { bodyweight: f64 },

    #[error("set count must be at least 1: {0}")]
    InvalidSetCount(u32),

    #[error("penalty {penalty} kg is outside the allowed range {min}-{max} kg")]
    PenaltyOutOfRange { penalty: f64, min: f64, max: f64 },

    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// Not a domain failure: the coefficient record for this sex was never supplied.
    #[error("formula unavailable for {0}")]
    FormulaUnavailable(Sex),
}

impl ScoringError {
    /// True for user-correctable input errors, false for missing configuration.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::FormulaUnavailable(_))
    }

    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
