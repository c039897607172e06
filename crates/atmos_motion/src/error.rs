//! Error types for controller setup and configuration
//!
//! Per-frame stepping is pure arithmetic and never fails. Errors only come
//! out of activation (a missing host reference) and settings validation.

use thiserror::Error;

use crate::config::ConfigError;

/// Locomotion-level errors
#[derive(Error, Debug)]
pub enum LocomotionError {
    /// A reference the controller cannot work without was not supplied
    #[error("Missing required reference: {0}")]
    MissingReference(&'static str),

    /// A tuning value is out of its valid range
    #[error("Invalid tuning value for {field}: {value} ({reason})")]
    InvalidTuning {
        /// Name of the offending field
        field: &'static str,
        /// Value that failed validation
        value: f32,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// Loading or saving settings failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LocomotionError>;

/// Check that a tuning value is finite and strictly positive
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LocomotionError::InvalidTuning {
            field,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}

/// Check that a tuning value is finite and strictly negative
pub(crate) fn require_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value < 0.0 {
        Ok(())
    } else {
        Err(LocomotionError::InvalidTuning {
            field,
            value,
            reason: "must be finite and less than zero",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("walk_speed", 3.0).is_ok());
        assert!(require_positive("walk_speed", 0.0).is_err());
        assert!(require_positive("walk_speed", f32::INFINITY).is_err());
        assert!(require_positive("walk_speed", f32::NAN).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = require_negative("gravity", 9.81).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("gravity"));
        assert!(message.contains("9.81"));
    }
}
