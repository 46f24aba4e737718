//! External runner invocation
//!
//! This module starts the external task runner, in list mode for the menu
//! banner and in run mode for the chosen task.

pub mod command;
pub mod interrupt;

// Re-export main types
pub use command::*;
pub use interrupt::*;
