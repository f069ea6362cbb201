//! YAML Configuration File Support for autoreply
//!
//! One file configures the matcher, usage tracking and the embeddable
//! widget. Every section is optional and falls back to its defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "acme support"
//!
//! matcher:
//!   fuzzy_threshold: 0.7
//!   max_pattern_len: 512
//!
//! usage:
//!   max_keys: 100000
//!   metrics_enabled: true
//!   top_keywords_limit: 10
//!
//! widget:
//!   business_name: "Acme"
//!   primary_color: "#4F46E5"
//!   position: "bottom-left"
//!   open_delay_secs: 3
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use usage::{InMemoryUsageStore, MetricsUsageSink, UsageTracker};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AutoreplyConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Keyword matcher tuning
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Usage tracking
    #[serde(default)]
    pub usage: UsageYamlConfig,

    /// Widget appearance and behaviour
    #[serde(default)]
    pub widget: WidgetSettings,
}

impl AutoreplyConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AutoreplyConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        self.usage.validate()?;
        self.widget.validate()?;
        Ok(())
    }

    /// Build the usage tracker described by the `usage` section.
    ///
    /// The in-memory store is returned as well so callers can serve the
    /// keyword analytics report from it.
    pub fn build_usage(&self) -> (UsageTracker, Arc<InMemoryUsageStore>) {
        let store = Arc::new(match self.usage.max_keys {
            Some(max) => InMemoryUsageStore::with_max_keys(max),
            None => InMemoryUsageStore::new(),
        });
        let mut tracker = UsageTracker::new(store.clone());
        if self.usage.metrics_enabled {
            tracker = tracker.with_sink(Arc::new(MetricsUsageSink));
        }
        (tracker, store)
    }
}

impl Default for AutoreplyConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatcherConfig::default(),
            usage: UsageYamlConfig::default(),
            widget: WidgetSettings::default(),
        }
    }
}

/// Usage tracking YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageYamlConfig {
    /// Cap on distinct `(tenant, keyword)` counters held in memory
    #[serde(default)]
    pub max_keys: Option<usize>,

    /// Also emit `keyword_matches_total` through the metrics facade
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Default row count of the "top keywords" report
    #[serde(default = "default_top_keywords_limit")]
    pub top_keywords_limit: usize,
}

impl UsageYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_keys == Some(0) {
            return Err(ConfigLoadError::Validation(
                "usage.max_keys must be >= 1".to_string(),
            ));
        }
        if self.top_keywords_limit == 0 {
            return Err(ConfigLoadError::Validation(
                "usage.top_keywords_limit must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for UsageYamlConfig {
    fn default() -> Self {
        Self {
            max_keys: None,
            metrics_enabled: false,
            top_keywords_limit: default_top_keywords_limit(),
        }
    }
}

/// Corner of the page the widget launcher is pinned to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Widget settings
///
/// Every option the embed script understands, with its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WidgetSettings {
    pub business_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub position: WidgetPosition,
    pub icon: String,
    pub welcome_message: String,
    pub is_active: bool,
    pub auto_open: bool,
    /// Seconds before the widget opens itself when `auto_open` is set.
    pub open_delay_secs: u32,
    pub hide_on_mobile: bool,
}

pub const MAX_OPEN_DELAY_SECS: u32 = 60;

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            business_name: "My Business".to_string(),
            primary_color: "#4F46E5".to_string(),
            secondary_color: "#EEF2FF".to_string(),
            position: WidgetPosition::BottomRight,
            icon: "message-circle".to_string(),
            welcome_message: "Hello! How can I help you today?".to_string(),
            is_active: true,
            auto_open: false,
            open_delay_secs: 3,
            hide_on_mobile: false,
        }
    }
}

impl WidgetSettings {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.business_name.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "widget.business_name must not be empty".to_string(),
            ));
        }
        if self.welcome_message.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "widget.welcome_message must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigLoadError::Validation(format!(
                    "widget.{name} must be a #RRGGBB colour, got {value:?}"
                )));
            }
        }
        if self.open_delay_secs > MAX_OPEN_DELAY_SECS {
            return Err(ConfigLoadError::Validation(format!(
                "widget.open_delay_secs must be <= {MAX_OPEN_DELAY_SECS}"
            )));
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn default_top_keywords_limit() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_use_defaults() {
        let cfg = AutoreplyConfig::from_yaml("version: \"1.0\"\n").unwrap();
        assert_eq!(cfg, AutoreplyConfig::default());
    }

    #[test]
    fn full_document_parses() {
        let yaml = r##"
version: "1"
name: acme
matcher:
  fuzzy_threshold: 0.8
  max_pattern_len: 128
usage:
  max_keys: 500
  metrics_enabled: true
widget:
  business_name: Acme
  primary_color: "#112233"
  position: top-left
  open_delay_secs: 10
"##;
        let cfg = AutoreplyConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.name.as_deref(), Some("acme"));
        assert_eq!(cfg.matcher.fuzzy_threshold, 0.8);
        assert_eq!(cfg.matcher.regex_confidence, 0.9);
        assert_eq!(cfg.usage.max_keys, Some(500));
        assert_eq!(cfg.usage.top_keywords_limit, 10);
        assert_eq!(cfg.widget.position, WidgetPosition::TopLeft);
        assert_eq!(cfg.widget.secondary_color, "#EEF2FF");
    }

    #[test]
    fn rejects_unknown_version() {
        let err = AutoreplyConfig::from_yaml("version: \"2\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2"));
    }

    #[test]
    fn rejects_bad_matcher_threshold() {
        let err =
            AutoreplyConfig::from_yaml("version: \"1\"\nmatcher:\n  fuzzy_threshold: 2.0\n")
                .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(msg) if msg.contains("fuzzy_threshold")));
    }

    #[test]
    fn rejects_bad_widget_colour() {
        let err = AutoreplyConfig::from_yaml(
            "version: \"1\"\nwidget:\n  primary_color: \"blue\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(msg) if msg.contains("primary_color")));
    }

    #[test]
    fn rejects_long_open_delay() {
        let mut cfg = AutoreplyConfig::default();
        cfg.widget.open_delay_secs = 61;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = AutoreplyConfig::default();
        let yaml = cfg.to_yaml().unwrap();
        assert_eq!(AutoreplyConfig::from_yaml(&yaml).unwrap(), cfg);
    }

    #[test]
    fn build_usage_respects_metrics_flag() {
        let mut cfg = AutoreplyConfig::default();
        let (tracker, _) = cfg.build_usage();
        assert_eq!(tracker.sink_count(), 1);

        cfg.usage.metrics_enabled = true;
        let (tracker, store) = cfg.build_usage();
        assert_eq!(tracker.sink_count(), 2);
        assert!(tracker.track_keyword_usage("k1", "t1"));
        assert_eq!(store.count("t1", "k1"), 1);
    }

    #[test]
    fn hex_colours() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("a1b2c3"));
        assert!(!is_hex_color("#abc"));
        assert!(!is_hex_color("#gggggg"));
    }
}
