//! Console output
//!
//! All user-facing output goes through the [`Console`] trait so the session
//! can be driven against a recording sink in tests.

use colored::Colorize;
use std::cell::RefCell;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

/// Kind of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Heading,
    Plain,
    Info,
    Success,
    Warn,
    Error,
    /// Dimmed usage hint
    Hint,
    Debug,
}

/// Output sink used by the launcher
pub trait Console {
    /// Write one line of the given kind
    fn line(&self, level: Level, message: &str);

    fn heading(&self, message: &str) {
        self.line(Level::Heading, message);
    }

    /// Verbatim text (menu rows, runner output)
    fn plain(&self, message: &str) {
        self.line(Level::Plain, message);
    }

    fn info(&self, message: &str) {
        self.line(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.line(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.line(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.line(Level::Error, message);
    }

    fn hint(&self, message: &str) {
        self.line(Level::Hint, message);
    }

    fn debug(&self, message: &str) {
        self.line(Level::Debug, message);
    }
}

/// Colored terminal output gated by verbosity
#[derive(Debug, Clone, Copy)]
pub struct TerminalConsole {
    pub verbosity: Verbosity,
}

impl TerminalConsole {
    pub fn new(verbosity: Verbosity) -> Self {
        TerminalConsole { verbosity }
    }

    /// Minimum verbosity at which a level is shown
    fn threshold(level: Level) -> Verbosity {
        match level {
            Level::Error => Verbosity::Quiet,
            // The menu must stay visible even in quiet mode
            Level::Heading | Level::Plain | Level::Warn => Verbosity::Quiet,
            Level::Info | Level::Success | Level::Hint => Verbosity::Normal,
            Level::Debug => Verbosity::Verbose,
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Console for TerminalConsole {
    fn line(&self, level: Level, message: &str) {
        if self.verbosity < Self::threshold(level) {
            return;
        }

        match level {
            Level::Heading => println!("{}", message.blue().bold()),
            Level::Plain => println!("{}", message),
            Level::Info => println!("{}", message.blue()),
            Level::Success => println!("{}", message.green()),
            Level::Warn => println!("{}", message.yellow()),
            Level::Error => eprintln!("{}", message.red()),
            Level::Hint => println!("{}", message.dimmed()),
            Level::Debug => eprintln!("{}", format!("[DEBUG] {}", message).dimmed()),
        }
    }
}

/// Console that records every line, for tests
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Recorded lines of one level
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Console for MemoryConsole {
    fn line(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(TerminalConsole::threshold(Level::Error), Verbosity::Quiet);
        assert_eq!(TerminalConsole::threshold(Level::Plain), Verbosity::Quiet);
        assert_eq!(TerminalConsole::threshold(Level::Info), Verbosity::Normal);
        assert_eq!(TerminalConsole::threshold(Level::Hint), Verbosity::Normal);
        assert_eq!(TerminalConsole::threshold(Level::Debug), Verbosity::Verbose);
    }

    #[test]
    fn test_memory_console_records_levels() {
        let console = MemoryConsole::new();
        console.info("starting");
        console.error("boom");
        console.plain("  1. build");

        assert_eq!(console.lines().len(), 3);
        assert_eq!(console.messages(Level::Error), vec!["boom".to_string()]);
        assert!(console.contains("1. build"));
        assert!(!console.contains("2."));
    }
}
