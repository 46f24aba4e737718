//! Ctrl+C tracking while a child process runs

use signal_hook::consts::SIGINT;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag raised by SIGINT.
///
/// Once installed, SIGINT no longer terminates the launcher; the child in the
/// foreground still receives it and the executor reads the flag afterwards.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// A flag not connected to any signal
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag raised by SIGINT for the rest of the process lifetime
    pub fn install() -> io::Result<Self> {
        let flag = Self::new();
        flag.listen()?;
        Ok(flag)
    }

    /// Raise this flag, and every clone of it, on SIGINT from now on
    pub fn listen(&self) -> io::Result<()> {
        signal_hook::flag::register(SIGINT, Arc::clone(&self.raised))?;
        Ok(())
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    /// Read and reset the flag
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}
