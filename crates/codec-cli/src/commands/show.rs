//! Show command implementation

use codec_settings::{Setting, Settings, Tier};
use colored::Colorize;
use serde_json::{Map, json};

use crate::error::Result;

/// Display every resolved setting
pub fn run_show(settings: &Settings, json: bool) -> Result<()> {
    if json {
        let mut values = Map::new();
        let mut tiers = Map::new();
        for setting in settings.iter() {
            if let Some(value) = &setting.value {
                values.insert(setting.name.clone(), serde_json::to_value(value)?);
                tiers.insert(setting.name.clone(), serde_json::to_value(setting.tier)?);
            }
        }
        let output = json!({
            "config_file": settings.config_file().map(|p| p.as_str()),
            "settings": values,
            "tiers": tiers,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let config = settings
        .config_file()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    println!("{} {}", "Settings from".bold(), config.yellow());
    println!();

    let width = settings
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);
    for setting in settings.iter().filter(|s| s.value.is_some()) {
        println!(
            "  {:<width$}  {}  {}",
            setting.name,
            display_value(setting),
            origin(setting).dimmed()
        );
    }
    Ok(())
}

fn display_value(setting: &Setting) -> String {
    match &setting.value {
        Some(value) if value.is_null() => "none".dimmed().to_string(),
        Some(value) => value.to_string().cyan().to_string(),
        None => String::new(),
    }
}

/// Where a setting's value came from, e.g. `file team.cfg`.
fn origin(setting: &Setting) -> String {
    match (setting.tier, setting.source_file()) {
        (Tier::File, Some(path)) => format!("file {}", path.file_name().unwrap_or(path.as_str())),
        (tier, _) => tier.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec_fs::NormalizedPath;
    use codec_settings::Value;

    #[test]
    fn test_origin_names_source_file() {
        let setting = Setting::new("Verbosity", Some(Value::from("DEBUG")), Tier::File)
            .with_provenance(vec![NormalizedPath::new("/x/.codecfile"), NormalizedPath::new("/x/team.cfg")]);
        assert_eq!(origin(&setting), "file team.cfg");
    }

    #[test]
    fn test_origin_falls_back_to_tier() {
        let setting = Setting::new("Verbosity", Some(Value::from("DEBUG")), Tier::Cli);
        assert_eq!(origin(&setting), "cli");
    }
}
