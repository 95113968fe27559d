//! Parameter validation errors

use thiserror::Error;

/// Rejected motion parameters
///
/// Only the opt-in validation entry points return this. The numeric core
/// itself never fails; it yields NaN/Inf when a caller contract is broken.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// A parameter was NaN or infinite
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Natural frequency must be strictly positive
    #[error("frequency must be greater than zero, got {0}")]
    NonPositiveFrequency(f64),

    /// Damping ratio must not be negative
    #[error("damping must not be negative, got {0}")]
    NegativeDamping(f64),
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NonFinite { name, value })
    }
}
