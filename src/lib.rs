//! Lata - an interactive menu for Taskfile tasks
//!
//! Lata finds a Taskfile, lists its tasks as a numbered menu, asks for any
//! input a task declares, and hands the chosen task to the external `task`
//! runner. The same loop also drives launchers built from a static registry
//! of handlers.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod runner;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use cli::launch;
pub use error::{LataError, Result};

/// Current version of Lata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
