//! # Result Display
//!
//! The single text pane every operation writes into. Each write replaces the
//! whole pane. Text is stored verbatim and only made safe when rendered for
//! the terminal, so a response body can never smuggle escape sequences onto
//! the user's screen.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

/// The display area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultDisplay {
    text: String,
    writes: usize,
}

impl ResultDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pane contents
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.writes += 1;
    }

    /// Stored text, exactly as written
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the pane has been overwritten
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Text safe to print to a terminal
    pub fn render(&self) -> String {
        sanitize_for_terminal(&self.text)
    }
}

/// Escape every control character except newline and tab.
///
/// Covers ESC (and so every ANSI/OSC sequence), carriage return, backspace,
/// bell and the C1 range.
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() && c != '\n' && c != '\t' {
            let _ = write!(out, "{}", c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    out
}

/// Display handle shared between the panel and its background tasks
#[derive(Debug, Clone, Default)]
pub struct SharedDisplay {
    inner: Arc<Mutex<ResultDisplay>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ResultDisplay> {
        // A panic mid-write cannot leave the pane half-updated, so a poisoned
        // lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().set_text(text);
    }

    pub fn text(&self) -> String {
        self.lock().text().to_string()
    }

    pub fn render(&self) -> String {
        self.lock().render()
    }

    pub fn writes(&self) -> usize {
        self.lock().writes()
    }
}
