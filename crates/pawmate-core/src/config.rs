//! Runtime configuration types.
//!
//! Plain serde structs with defaults; the embedding application decides
//! where the TOML comes from and hands the parsed values to the components
//! that need them.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct PawmateConfig {
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub feed: FeedSettings,
}

impl PawmateConfig {
    /// Parses a configuration file's contents, filling defaults for
    /// anything not overridden.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Device location request intervals, handed to whoever owns the location
/// subscription.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Desired interval between fixes, in milliseconds.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
    /// Fastest delivery the caller will accept, in milliseconds.
    #[serde(default = "default_fastest_interval_ms")]
    pub fastest_interval_ms: u64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            fastest_interval_ms: default_fastest_interval_ms(),
        }
    }
}

fn default_update_interval_ms() -> u64 {
    2000
}

fn default_fastest_interval_ms() -> u64 {
    5000
}

/// Tuning for the read feeds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// How many reviews the "latest reviews" panel asks for.
    #[serde(default = "default_latest_reviews_limit")]
    pub latest_reviews_limit: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            latest_reviews_limit: default_latest_reviews_limit(),
        }
    }
}

fn default_latest_reviews_limit() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PawmateConfig::default();
        assert_eq!(config.location.update_interval_ms, 2000);
        assert_eq!(config.location.fastest_interval_ms, 5000);
        assert_eq!(config.feed.latest_reviews_limit, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = PawmateConfig::from_toml_str(
            r#"
            [location]
            update_interval_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.location.update_interval_ms, 500);
        assert_eq!(config.location.fastest_interval_ms, 5000);
        assert_eq!(config.feed.latest_reviews_limit, 3);
    }

    #[test]
    fn test_invalid_toml_is_a_serialization_error() {
        let err = PawmateConfig::from_toml_str("location = 3").unwrap_err();
        assert!(matches!(
            err,
            crate::error::PawmateError::Serialization { format, .. } if format == "TOML"
        ));
    }
}
