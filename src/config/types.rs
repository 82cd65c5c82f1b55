//! Configuration type definitions.

use crate::timeline::FilterPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output formats.
    pub formats: Vec<OutputFormat>,

    /// Clip name filter policy.
    pub filter_policy: FilterPolicy,

    /// Prefix CSV output with a UTF-8 byte order mark.
    pub csv_bom: bool,

    /// Output directory (None = next to each input).
    pub output_dir: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Text],
            filter_policy: FilterPolicy::default(),
            csv_bom: true,
            output_dir: None,
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report.
    Text,
    /// Row-per-clip CSV table.
    Csv,
    /// JSON envelope with per-track clips.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" | "table" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().ok(), Some(OutputFormat::Text));
        assert_eq!("TXT".parse::<OutputFormat>().ok(), Some(OutputFormat::Text));
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("table".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_defaults_config_default_values() {
        let defaults = DefaultsConfig::default();
        assert_eq!(defaults.formats, vec![OutputFormat::Text]);
        assert_eq!(defaults.filter_policy, FilterPolicy::Legacy);
        assert!(defaults.csv_bom);
        assert!(defaults.output_dir.is_none());
    }
}
