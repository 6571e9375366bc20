//! Save command implementation
//!
//! Writes the resolved settings to a config file, or previews the edit.

use codec_fs::NormalizedPath;
use codec_settings::{Error, SavePlan, Settings};
use colored::Colorize;

use super::print_saved;
use crate::error::Result;

/// Save to `path`, or to the root config file when no path is given
pub fn run_save(settings: &Settings, path: Option<&str>, dry_run: bool) -> Result<()> {
    let target = match path {
        Some(path) => NormalizedPath::new(path),
        None => settings.config_file().cloned().ok_or(Error::NoSaveTarget)?,
    };

    if dry_run {
        let plan = SavePlan::compute(settings, &target);
        print_preview(&plan);
        return Ok(());
    }

    let plan = settings.save(&target)?;
    print_saved(&plan);
    Ok(())
}

/// Print the pending edit as a colored unified diff
fn print_preview(plan: &SavePlan) {
    if !plan.has_changes() {
        println!(
            "{} No changes needed. {} is up to date.",
            "OK".green().bold(),
            plan.target.as_str().yellow()
        );
        return;
    }

    println!("{} {}", "Diff".blue().bold(), plan.target.as_str().yellow());
    println!();
    for line in plan.diff().lines() {
        let colored_line = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{colored_line}");
    }

    if !plan.overridden.is_empty() {
        println!();
        println!(
            "{} {}",
            "Overrides imported values:".dimmed(),
            plan.overridden.join(", ")
        );
    }

    println!();
    println!("Run {} to apply these changes.", "codec save".cyan());
}
