//! Taskfile discovery, settings and loading
//!
//! This module finds the active Taskfile, reads launcher settings from the
//! environment, and parses the task table out of the file.

pub mod locate;
pub mod parse;
pub mod settings;
pub mod types;

// Re-export main types
pub use locate::*;
pub use parse::*;
pub use settings::*;
pub use types::*;
