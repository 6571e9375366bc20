//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based input.

use codec_fs::NormalizedPath;
use codec_settings::{Value, coerce};
use dialoguer::{Confirm, Input};

use crate::error::Result;

/// Ask for a value for `key`. The reply goes through the same coercion as
/// config file values.
pub fn prompt_value(key: &str) -> Result<Value> {
    let raw: String = Input::new()
        .with_prompt(format!("Value for {key}"))
        .allow_empty(true)
        .interact_text()?;
    Ok(coerce(&raw))
}

/// Ask whether to save the filled-in settings to `target`.
pub fn confirm_save(target: &NormalizedPath) -> Result<bool> {
    let proceed = Confirm::new()
        .with_prompt(format!("Save to {}?", target.as_str()))
        .default(true)
        .interact()?;
    Ok(proceed)
}
