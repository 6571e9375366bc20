//! Get command implementation

use codec_settings::Settings;

use crate::error::{CliError, Result};

/// Print the resolved value of `key`
pub fn run_get(settings: &Settings, key: &str) -> Result<()> {
    match settings.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CliError::user(format!("Setting '{key}' has no value"))),
    }
}
