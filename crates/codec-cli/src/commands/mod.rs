//! Command implementations for codec-cli

pub mod fill;
pub mod get;
pub mod save;
pub mod show;

use codec_settings::{SavePlan, Warning};
use colored::Colorize;

pub use fill::run_fill;
pub use get::run_get;
pub use save::run_save;
pub use show::run_show;

/// Print config file warnings to stderr.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{}: {}", "warning".yellow().bold(), warning);
    }
}

/// Print a one-line summary of an applied save.
pub fn print_saved(plan: &SavePlan) {
    if !plan.has_changes() {
        println!(
            "{} {} is up to date",
            "OK".green().bold(),
            plan.target.as_str().yellow()
        );
        return;
    }

    println!(
        "{} {} ({} written, {} removed)",
        "Saved".green().bold(),
        plan.target.as_str().yellow(),
        plan.written.len(),
        plan.deleted.len()
    );
}
