//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::{Config, OutputFormat};

/// Print a short usage reminder that reflects the active configuration.
pub fn print_smart_help(config: &Config) {
    print!("{}", usage_text(config));
}

/// Build the usage reminder shown when no inputs are given.
pub fn usage_text(config: &Config) -> String {
    let formats = config
        .defaults
        .formats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut text = String::new();
    text.push_str("Usage: clipscan [FILES]... [OPTIONS]\n\n");
    text.push_str("Examples:\n");
    text.push_str("  clipscan edit.xml --stdout\n");
    text.push_str("  clipscan projects/ -f text,csv -o reports\n");
    text.push_str("  clipscan export reports/edit.clips.txt -o edit.csv\n\n");
    text.push_str(&format!(
        "Defaults: formats={formats}, policy={}, csv_bom={}\n\n",
        config.defaults.filter_policy, config.defaults.csv_bom
    ));
    text.push_str("Run 'clipscan -h' for all options or 'clipscan config init' to create a config file.\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::FilterPolicy;

    #[test]
    fn test_usage_text_reflects_defaults() {
        let text = usage_text(&Config::default());
        assert!(text.starts_with("Usage: clipscan"));
        assert!(text.contains("formats=text"));
        assert!(text.contains("policy=legacy"));
    }

    #[test]
    fn test_usage_text_reflects_configured_values() {
        let mut config = Config::default();
        config.defaults.formats = vec![OutputFormat::Csv, OutputFormat::Json];
        config.defaults.filter_policy = FilterPolicy::ExcludeMedia;

        let text = usage_text(&config);
        assert!(text.contains("formats=csv,json"));
        assert!(text.contains("policy=exclude-media"));
    }
}
