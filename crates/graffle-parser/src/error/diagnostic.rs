//! A single error or warning.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message, optionally pointing into the XML source.
///
/// Structural problems are reported as errors with spans taken from the XML
/// nodes. Data errors found while extracting or rendering a document are
/// warnings: they carry a code and a message naming the offending graphic,
/// and usually no span because the typed document no longer knows where it
/// came from.
///
/// # Example
///
/// ```
/// # use graffle_parser::error::{Diagnostic, ErrorCode};
/// # use graffle_parser::Span;
///
/// let diag = Diagnostic::error("unknown plist node `color`")
///     .with_code(ErrorCode::E101)
///     .with_label(Span::new(120..141), "not a property-list element")
///     .with_help("property lists may only contain dict, array and scalar elements");
///
/// assert_eq!(diag.to_string(), "error[E101]: unknown plist node `color`");
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a coded warning for a recoverable data problem.
    ///
    /// # Example
    ///
    /// ```
    /// # use graffle_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::data_error(ErrorCode::E304, "unknown stroke pattern `7`");
    /// assert!(diag.severity().is_warning());
    /// assert_eq!(diag.code(), Some(ErrorCode::E304));
    /// ```
    pub fn data_error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::warning(message).with_code(code)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label, such as the enclosing dict of a bad entry.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
