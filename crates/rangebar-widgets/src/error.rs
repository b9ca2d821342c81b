//! Error types for rangebar widgets.
//!
//! The interaction path (drags, committed field edits) never fails: values
//! are clamped onto the track. Errors only surface when building a slider
//! from configuration or when a field commit is not a number.

use thiserror::Error;

/// Errors raised while configuring a range slider or parsing field input.
#[derive(Debug, Error)]
pub enum RangeError {
    /// Domain bounds are not ordered.
    #[error("invalid bounds: min ({min}) must be less than max ({max})")]
    InvalidBounds { min: f32, max: f32 },

    /// Overlap ratio outside the supported range.
    #[error("overlap ratio {0} is outside 0..=2")]
    InvalidOverlapRatio(f32),

    /// Handle width is not a positive finite number.
    #[error("handle width {0} must be positive")]
    InvalidHandleWidth(f32),

    /// Field text could not be read as a number.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// YAML configuration could not be parsed.
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML config error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias for rangebar widget operations.
pub type RangeResult<T> = Result<T, RangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_display() {
        let err = RangeError::InvalidBounds {
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid bounds: min (10) must be less than max (5)"
        );
    }

    #[test]
    fn test_not_a_number_display() {
        let err = RangeError::NotANumber("12abc".into());
        assert_eq!(err.to_string(), "not a number: \"12abc\"");
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: RangeError = yaml_err.into();
        assert!(matches!(err, RangeError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML config error"));
    }
}
