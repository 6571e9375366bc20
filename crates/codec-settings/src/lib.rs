//! Layered settings for codec
//!
//! Settings come from three tiers, lowest precedence first: built-in
//! defaults, a root config file (plus any files it imports), and
//! command-line flags. The resolved store can be written back to a config
//! file with minimal, comment-preserving edits.
//!
//! # Modules
//!
//! - [`value`]: typed values and the text coercion grammar
//! - [`line`]: parsing of single config lines
//! - [`import`]: recursive, cycle-safe config file resolution
//! - [`store`]: the merged [`Settings`] store
//! - [`persist`]: saving a store back to disk

pub mod defaults;
pub mod error;
pub mod import;
pub mod line;
pub mod persist;
pub mod setting;
pub mod store;
pub mod value;

pub use defaults::{DEFAULT_CONFIG_FILE, Defaults};
pub use error::{Error, Result, Warning};
pub use import::{ImportHistory, Resolution, ResolvedEntry, resolve, resolve_file};
pub use line::{MalformedReason, ParsedLine, parse_line};
pub use persist::{SavePlan, save};
pub use setting::{Setting, Tier};
pub use store::{CliOverrides, Settings};
pub use value::{Value, coerce, coerce_literal};
