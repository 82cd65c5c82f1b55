//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if defaults.formats.is_empty() {
        return Err(Error::ConfigValidation {
            message: "formats must list at least one output format".to_string(),
        });
    }

    if let Some(dir) = &defaults.output_dir
        && dir.is_file()
    {
        return Err(Error::ConfigValidation {
            message: format!("output_dir is a file: {}", dir.display()),
        });
    }

    Ok(())
}
