//! Line-based terminal rendition of a text input.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use formcheck_lib::{ErrorDisplay, FieldState, TextControl};

/// Shared output sink for prompts and field errors.
#[derive(Clone)]
pub struct Terminal {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Terminal {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    /// Write a full line.
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Write a prompt and leave the cursor on the same line.
    pub fn prompt(&self, label: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write!(out, "{}: ", label)?;
        out.flush()
    }
}

/// Prints a field's error whenever it changes.
///
/// Re-renders of an unchanged state (e.g. a submit that re-validates) print
/// nothing.
pub struct TerminalControl {
    label: String,
    terminal: Terminal,
    last: Mutex<Option<FieldState>>,
}

impl TerminalControl {
    pub fn new(label: impl Into<String>, terminal: Terminal) -> Self {
        Self {
            label: label.into(),
            terminal,
            last: Mutex::new(None),
        }
    }

    fn format_error(&self, error: &str, display: ErrorDisplay) -> Option<String> {
        match display {
            ErrorDisplay::Below => Some(format!("  {}: {}", self.label, error)),
            ErrorDisplay::Inline => Some(format!("  [{}]", error)),
            ErrorDisplay::None => None,
        }
    }
}

impl TextControl for TerminalControl {
    fn render(&self, state: &FieldState, display: ErrorDisplay) {
        {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if last.as_ref() == Some(state) {
                return;
            }
            *last = Some(state.clone());
        }

        let Some(error) = state.error.as_deref() else { return };
        if let Some(line) = self.format_error(error, display)
            && let Err(e) = self.terminal.line(&line)
        {
            log::warn!("[control] Failed to render {}: {}", self.label, e);
        }
    }
}
