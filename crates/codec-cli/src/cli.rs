//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use codec_settings::{CliOverrides, Value, coerce_literal};

/// codec - Resolve, inspect and save layered codec settings
#[derive(Parser, Debug)]
#[command(name = "codec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (filtered by RUST_LOG when set)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags that override settings from the config file.
///
/// List flags may be repeated or given comma separated values.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideArgs {
    /// Directories to process
    #[arg(short = 'd', long = "dirs", value_name = "DIR", global = true)]
    pub dirs: Vec<String>,

    /// Directories to skip
    #[arg(long = "ignored-dirs", value_name = "DIR", global = true)]
    pub ignored_dirs: Vec<String>,

    /// Directories processed without descending into them
    #[arg(long = "flat-dirs", value_name = "DIR", global = true)]
    pub flat_dirs: Vec<String>,

    /// File extensions to process
    #[arg(short = 't', long = "types", value_name = "EXT", global = true)]
    pub types: Vec<String>,

    /// File extensions to skip
    #[arg(long = "ignored-types", value_name = "EXT", global = true)]
    pub ignored_types: Vec<String>,

    /// Text filters to apply
    #[arg(short = 'f', long = "filters", value_name = "FILTER", global = true)]
    pub filters: Vec<String>,

    /// Text filters to skip
    #[arg(long = "ignored-filters", value_name = "FILTER", global = true)]
    pub ignored_filters: Vec<String>,

    /// Regular expression filters to apply
    #[arg(long = "regex-filters", value_name = "REGEX", global = true)]
    pub regex_filters: Vec<String>,

    /// Log format
    #[arg(short = 'l', long = "log", value_enum, ignore_case = true, global = true)]
    pub log: Option<LogType>,

    /// Log output file
    #[arg(short = 'o', long = "output", value_name = "FILE", global = true)]
    pub output: Option<String>,

    /// Log verbosity
    #[arg(short = 'v', long = "verbosity", value_enum, ignore_case = true, global = true)]
    pub verbosity: Option<Verbosity>,

    /// Root config file
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "CODEC_CONFIG", global = true)]
    pub config: Option<String>,

    /// Save the resolved settings, to FILE or to the root config file
    #[arg(short = 's', long = "save", value_name = "FILE", num_args = 0..=1, global = true)]
    pub save: Option<Option<String>>,

    /// Number of parallel jobs
    #[arg(short = 'j', long = "jobs", value_name = "N", global = true)]
    pub jobs: Option<String>,
}

/// Log formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    #[value(name = "CONSOLE")]
    Console,
    #[value(name = "TXT")]
    Txt,
    #[value(name = "HTML")]
    Html,
}

impl LogType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "CONSOLE",
            Self::Txt => "TXT",
            Self::Html => "HTML",
        }
    }
}

/// Log levels, most severe first
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    #[value(name = "ERR")]
    Error,
    #[value(name = "WARN")]
    Warn,
    #[value(name = "INFO")]
    Info,
    #[value(name = "DEBUG")]
    Debug,
}

impl Verbosity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl OverrideArgs {
    /// Setting values for every flag. Flags that were not given map to `None`.
    pub fn to_overrides(&self) -> CliOverrides {
        let fixed = |value: Option<&str>| value.map(Value::from);

        CliOverrides::new()
            .with("TargetDirectories", list(&self.dirs))
            .with("IgnoredDirectories", list(&self.ignored_dirs))
            .with("FlatDirectories", list(&self.flat_dirs))
            .with("TargetFileTypes", list(&self.types))
            .with("IgnoredFileTypes", list(&self.ignored_types))
            .with("Filters", list(&self.filters))
            .with("IgnoredFilters", list(&self.ignored_filters))
            .with("RegexFilters", list(&self.regex_filters))
            .with("LogType", fixed(self.log.map(LogType::as_str)))
            .with("LogOutput", self.output.as_deref().map(coerce_literal))
            .with("Verbosity", fixed(self.verbosity.map(Verbosity::as_str)))
            .with("ConfigFile", self.config.as_deref().map(coerce_literal))
            .with("Save", self.save.as_ref().map(save_value))
            .with("JobCount", self.jobs.as_deref().map(coerce_literal))
    }
}

/// Merge every occurrence of a repeatable flag into one value.
///
/// Each occurrence may hold several items separated by `,` or `;`. Items are
/// taken as written, backslashes included.
fn list(raw: &[String]) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    let items = raw
        .iter()
        .flat_map(|r| r.split([',', ';']))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(coerce_literal)
        .collect();
    Some(Value::from_items(items))
}

/// `--save` alone means the root config file.
fn save_value(file: &Option<String>) -> Value {
    match file {
        Some(path) => coerce_literal(path),
        None => Value::Boolean(true),
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show every resolved setting and where it came from
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved value of one setting
    ///
    /// Examples:
    ///   codec get Verbosity
    ///   codec -v DEBUG get verbosity
    Get {
        /// Setting name (case-insensitive)
        key: String,
    },

    /// Save the resolved settings to a config file
    ///
    /// Only lines that have to change are touched. Values equal to the
    /// built-in default are removed rather than written.
    Save {
        /// Target file (defaults to the root config file)
        path: Option<String>,

        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Prompt for settings that have no value yet
    ///
    /// Examples:
    ///   codec fill Owner Deadline
    Fill {
        /// Setting names to ensure
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   codec completions bash > ~/.local/share/bash-completion/completions/codec
    ///   codec completions zsh > ~/.zfunc/_codec
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
