//! Terminal interaction
//!
//! Console output, prompts, input collection and menu rendering.

pub mod console;
pub mod input;
pub mod menu;
pub mod prompt;

// Re-export main types
pub use self::console::*;
pub use input::*;
pub use menu::*;
pub use prompt::*;
