//! Filesystem layer for codec settings
//!
//! Provides normalized path handling and crash-safe text I/O.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
