//! Accumulates diagnostics while a document is decoded.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so one pass can report every problem it finds.
///
/// Warnings are logged as they arrive. Errors make [`finish`] fail, but do
/// not stop collection.
///
/// [`finish`]: DiagnosticCollector::finish
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else {
            warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// Returns the warnings on success, or every diagnostic as a
    /// [`ParseError`] if any error was emitted.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
