//! Where `println` and `print` output goes.
//!
//! The engine formats builtin arguments itself and hands finished text to
//! an `Output`, shared between the interpreter and its host so tests can
//! read back what a program printed.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum Output {
    /// Process standard output, flushed after every write.
    Stdout,
    /// Kept in memory until the host reads it.
    Capture(Mutex<String>),
    Discard,
}

/// Output shared between an interpreter and its host.
pub type SharedOutput = Arc<Output>;

impl Output {
    pub fn stdout() -> SharedOutput {
        Arc::new(Output::Stdout)
    }

    pub fn capture() -> SharedOutput {
        Arc::new(Output::Capture(Mutex::new(String::new())))
    }

    pub fn discard() -> SharedOutput {
        Arc::new(Output::Discard)
    }

    pub fn write(&self, text: &str) {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout does not stop the program.
                let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
            }
            Output::Capture(buf) => buf.lock().push_str(text),
            Output::Discard => {}
        }
    }

    /// Everything captured so far; empty unless capturing.
    pub fn captured(&self) -> String {
        match self {
            Output::Capture(buf) => buf.lock().clone(),
            Output::Stdout | Output::Discard => String::new(),
        }
    }

    /// Drain the capture buffer.
    pub fn take(&self) -> String {
        match self {
            Output::Capture(buf) => std::mem::take(&mut *buf.lock()),
            Output::Stdout | Output::Discard => String::new(),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Output::Capture(_))
    }
}
