//! Range slider configuration.
//!
//! A [`RangeConfig`] can be built in code or loaded from YAML/TOML. Missing
//! keys fall back to the price-filter defaults (domain `0..35000`, overlap
//! ratio `0.9`, 20px handles).
//!
//! ```
//! use rangebar_widgets::RangeConfig;
//!
//! let config = RangeConfig::from_yaml("min: 100\nmax: 900\noverlap_ratio: 1.0\n").unwrap();
//! assert_eq!(config.min, 100.0);
//! assert_eq!(config.overlap_margin(), 0.0);
//! ```

use crate::error::{RangeError, RangeResult};
use crate::range_model::ValueMapping;
use serde::{Deserialize, Serialize};

/// Default overlap ratio between the two handles.
pub const DEFAULT_OVERLAP_RATIO: f32 = 0.9;

/// Largest accepted overlap ratio (handles may overlap by a full width).
pub const MAX_OVERLAP_RATIO: f32 = 2.0;

/// Default handle width in pixels.
pub const DEFAULT_HANDLE_WIDTH: f32 = 20.0;

/// Settings for one range slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Lower domain bound
    pub min: f32,
    /// Upper domain bound
    pub max: f32,
    /// How far the handles may overlap, from 0 (never) to 2
    pub overlap_ratio: f32,
    /// Handle width in pixels (native widget only; the browser reads it from markup)
    pub handle_width: f32,
    /// Pixel/value mapping used for the to-value
    pub value_mapping: ValueMapping,
    /// Initial from/to values (native widget only)
    pub initial: Option<(f32, f32)>,
    /// Selectors used to find the slider parts in page markup
    pub selectors: RangeSelectors,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 35_000.0,
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
            handle_width: DEFAULT_HANDLE_WIDTH,
            value_mapping: ValueMapping::default(),
            initial: None,
            selectors: RangeSelectors::default(),
        }
    }
}

impl RangeConfig {
    /// Config for the domain `min..max` with default settings.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(source: &str) -> RangeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> RangeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check bounds, overlap ratio and handle width.
    pub fn validate(&self) -> RangeResult<()> {
        let ordered = self.min.is_finite() && self.max.is_finite() && self.min < self.max;
        if !ordered {
            return Err(RangeError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if !(0.0..=MAX_OVERLAP_RATIO).contains(&self.overlap_ratio) {
            return Err(RangeError::InvalidOverlapRatio(self.overlap_ratio));
        }
        let positive = self.handle_width.is_finite() && self.handle_width > 0.0;
        if !positive {
            return Err(RangeError::InvalidHandleWidth(self.handle_width));
        }
        Ok(())
    }

    /// Width of the domain, `max - min`.
    #[must_use]
    pub fn value_interval(&self) -> f32 {
        self.max - self.min
    }

    /// Minimum pixel gap between the handles for the configured handle width.
    #[must_use]
    pub fn overlap_margin(&self) -> f32 {
        overlap_margin(self.handle_width, self.overlap_ratio)
    }
}

/// Pixel gap kept between the handles: `handle_width * (1 - ratio)`.
///
/// Negative for ratios above 1, which lets the handles cross by up to one
/// handle width.
#[must_use]
pub fn overlap_margin(handle_width: f32, overlap_ratio: f32) -> f32 {
    handle_width * (1.0 - overlap_ratio)
}

/// CSS selectors locating the slider parts inside the root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSelectors {
    /// Root container searched on page load
    pub root: String,
    /// Track
    pub scale: String,
    /// Highlighted bar between the handles
    pub bar: String,
    /// Min handle
    pub min_thumb: String,
    /// Max handle
    pub max_thumb: String,
    /// From field
    pub min_input: String,
    /// To field
    pub max_input: String,
}

impl Default for RangeSelectors {
    fn default() -> Self {
        Self {
            root: ".filter--price".into(),
            scale: ".range__scale".into(),
            bar: ".range__bar".into(),
            min_thumb: ".range__thumb--min".into(),
            max_thumb: ".range__thumb--max".into(),
            min_input: ".filter__number-field--min".into(),
            max_input: ".filter__number-field--max".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_price_filter() {
        let config = RangeConfig::default();
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 35_000.0);
        assert_eq!(config.overlap_ratio, 0.9);
        assert_eq!(config.value_mapping, ValueMapping::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_margin_example() {
        // 20px handles at ratio 0.9 keep 2px apart
        let config = RangeConfig::default();
        assert!((config.overlap_margin() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_overlap_margin_negative_above_one() {
        assert_eq!(overlap_margin(20.0, 2.0), -20.0);
        assert_eq!(overlap_margin(20.0, 0.0), 20.0);
    }

    #[test]
    fn test_validate_rejects_unordered_bounds() {
        let err = RangeConfig::new(10.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, RangeError::InvalidBounds { .. }));
    }

    #[test]
    fn test_validate_rejects_nan_bounds() {
        assert!(RangeConfig::new(f32::NAN, 10.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlap_ratio() {
        let config = RangeConfig {
            overlap_ratio: 2.5,
            ..RangeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RangeError::InvalidOverlapRatio(r)) if r == 2.5
        ));
    }

    #[test]
    fn test_validate_rejects_handle_width() {
        let config = RangeConfig {
            handle_width: 0.0,
            ..RangeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RangeError::InvalidHandleWidth(_))
        ));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = RangeConfig::from_yaml(
            "min: 0\nmax: 1000\nvalue_mapping: Symmetric\nselectors:\n  root: '#filter'\n",
        )
        .unwrap();
        assert_eq!(config.max, 1000.0);
        assert_eq!(config.value_mapping, ValueMapping::Symmetric);
        assert_eq!(config.selectors.root, "#filter");
        assert_eq!(config.selectors.bar, ".range__bar");
    }

    #[test]
    fn test_from_yaml_invalid_is_rejected() {
        let err = RangeConfig::from_yaml("min: 5\nmax: 1\n").unwrap_err();
        assert!(matches!(err, RangeError::InvalidBounds { .. }));
    }

    #[test]
    fn test_from_toml() {
        let config = RangeConfig::from_toml("min = 50.0\nmax = 150.0\ninitial = [60.0, 140.0]\n")
            .unwrap();
        assert_eq!(config.min, 50.0);
        assert_eq!(config.initial, Some((60.0, 140.0)));
        assert_eq!(config.handle_width, DEFAULT_HANDLE_WIDTH);
    }

    #[test]
    fn test_from_toml_syntax_error() {
        let err = RangeConfig::from_toml("min = [").unwrap_err();
        assert!(matches!(err, RangeError::Toml(_)));
    }
}
