//! The error returned when a document cannot be read.

use std::fmt;

use crate::error::Diagnostic;

/// A document could not be decoded.
///
/// Holds every diagnostic gathered up to the failure, errors and warnings
/// alike, in the order they were reported.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first diagnostic with error severity.
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.severity().is_error())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.first_error().or(self.diagnostics.first()) else {
            return Ok(());
        };
        write!(f, "{first}")?;
        if self.diagnostics.len() > 1 {
            write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let err: ParseError = Diagnostic::error("invalid xml").with_code(ErrorCode::E100).into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.to_string(), "error[E100]: invalid xml");
    }

    #[test]
    fn test_parse_error_display_leads_with_error() {
        let err = ParseError::new(vec![
            Diagnostic::warning("invalid number `abc`"),
            Diagnostic::error("document root is not a dict"),
            Diagnostic::warning("missing field"),
        ]);

        assert_eq!(err.to_string(), "error: document root is not a dict (+2 more)");
    }
}
