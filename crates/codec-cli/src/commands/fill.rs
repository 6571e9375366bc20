//! Fill command implementation
//!
//! Prompts for requested settings that have no value yet.

use codec_settings::Settings;
use colored::Colorize;

use super::print_saved;
use crate::error::Result;
use crate::interactive;

/// Ensure every key in `keys` has a value, prompting for the missing ones
pub fn run_fill(settings: &mut Settings, keys: &[String]) -> Result<()> {
    let missing = settings.ensure_keys(keys);
    if missing.is_empty() {
        println!("{} All requested settings have values.", "OK".green().bold());
        return Ok(());
    }

    for key in &missing {
        let value = interactive::prompt_value(key)?;
        tracing::debug!("Filled {} = {}", key, value);
        settings.assign(key, value);
    }

    // A requested save runs after the command anyway
    if settings.save_target()?.is_some() {
        return Ok(());
    }

    if let Some(target) = settings.config_file().cloned() {
        if interactive::confirm_save(&target)? {
            let plan = settings.save(&target)?;
            print_saved(&plan);
        }
    }
    Ok(())
}
