use std::env;

use tracing::{info, warn};

use crate::error::{QuotaError, Result};
use crate::quota::constants::{DEFAULT_MAX_CONSUMPTION_PERCENT, MAX_CONSUMPTION_ENV};

/// Runtime settings for quota checks.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaConfig {
    /// Share of a category's reference servings one set may use, in percent.
    pub max_consumption_percent: f64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_consumption_percent: DEFAULT_MAX_CONSUMPTION_PERCENT,
        }
    }
}

impl QuotaConfig {
    pub fn new(max_consumption_percent: f64) -> Result<Self> {
        if !max_consumption_percent.is_finite() || max_consumption_percent < 0.0 {
            return Err(QuotaError::InvalidConfig(format!(
                "max consumption must be a non-negative percentage, got {}",
                max_consumption_percent
            )));
        }
        Ok(Self {
            max_consumption_percent,
        })
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables. Unset or blank values fall
    /// back to the default ceiling.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(raw) = lookup(MAX_CONSUMPTION_ENV).filter(|v| !v.trim().is_empty()) else {
            info!(
                "{MAX_CONSUMPTION_ENV} not set, using default: {}",
                DEFAULT_MAX_CONSUMPTION_PERCENT
            );
            return Ok(Self::default());
        };

        let value: f64 = raw.trim().parse().map_err(|e| {
            warn!("Invalid {MAX_CONSUMPTION_ENV} value {raw:?}: {e}");
            QuotaError::InvalidConfig(format!("{MAX_CONSUMPTION_ENV}={raw:?} is not a number"))
        })?;

        Self::new(value)
    }

    /// Replace the ceiling when an explicit value was given.
    pub fn with_override(self, max_consumption_percent: Option<f64>) -> Result<Self> {
        match max_consumption_percent {
            Some(value) => Self::new(value),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_with(value: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let value = value.map(str::to_string);
        move |key| {
            assert_eq!(key, MAX_CONSUMPTION_ENV);
            value.clone()
        }
    }

    #[test]
    fn test_default_when_unset() {
        let config = QuotaConfig::from_lookup(lookup_with(None)).unwrap();
        assert_eq!(config.max_consumption_percent, DEFAULT_MAX_CONSUMPTION_PERCENT);

        let blank = QuotaConfig::from_lookup(lookup_with(Some("  "))).unwrap();
        assert_eq!(blank, QuotaConfig::default());
    }

    #[test]
    fn test_parses_value() {
        let config = QuotaConfig::from_lookup(lookup_with(Some(" 120 "))).unwrap();
        assert_eq!(config.max_consumption_percent, 120.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            QuotaConfig::from_lookup(lookup_with(Some("lots"))),
            Err(QuotaError::InvalidConfig(_))
        ));
        assert!(QuotaConfig::from_lookup(lookup_with(Some("-5"))).is_err());
        assert!(QuotaConfig::new(f64::NAN).is_err());
        assert!(QuotaConfig::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_override() {
        let config = QuotaConfig::default().with_override(Some(50.0)).unwrap();
        assert_eq!(config.max_consumption_percent, 50.0);

        let untouched = QuotaConfig::new(80.0).unwrap().with_override(None).unwrap();
        assert_eq!(untouched.max_consumption_percent, 80.0);
    }
}
