//! Error adapter for converting GraffleError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`graffle_parser::error::ParseError`] contains multiple diagnostics,
//! each diagnostic is rendered independently against the document's XML.
//! Data warnings collected while rendering pages have no source attached and
//! are rendered on their own.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use graffle::GraffleError;
use graffle_parser::error::{Diagnostic, ErrorCode};

/// Adapter for a single graffle diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// XML source for displaying snippets, if the labels point into one
    src: Option<&'a str>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create an adapter whose labels point into `src`.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self {
            diag,
            src: Some(src),
        }
    }

    /// Create an adapter for a diagnostic without source text.
    pub fn without_source(diag: &'a Diagnostic) -> Self {
        Self { diag, src: None }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self.diag.severity() {
            graffle_parser::error::Severity::Error => Some(miette::Severity::Error),
            graffle_parser::error::Severity::Warning => Some(miette::Severity::Warning),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() || self.src.is_none() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`GraffleError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, unrecognised input files, missing pages and export
/// errors.
pub struct ErrorAdapter<'a>(pub &'a GraffleError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match &self.0 {
            GraffleError::Io(_) => Box::new("graffle::io"),
            GraffleError::InvalidInputFile { .. } => Box::new(ErrorCode::E001),
            GraffleError::MalformedDocument { .. } => return None,
            GraffleError::PageOutOfRange { .. } => Box::new("graffle::page"),
            GraffleError::Export(_) => Box::new("graffle::export"),
        };
        Some(code)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            GraffleError::InvalidInputFile { .. } => Some(Box::new(
                "expected property-list XML, plain or gzip-compressed",
            )),
            GraffleError::PageOutOfRange { count, .. } => Some(Box::new(format!(
                "pages are numbered from 0 to {}",
                count.saturating_sub(1)
            ))),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic, with source location information when available.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a graffle [`Span`](graffle_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: graffle_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`GraffleError`] into a list of reportable errors.
///
/// For [`GraffleError::MalformedDocument`], this returns one [`Reportable`]
/// for each diagnostic in the error. For other error variants, this returns
/// a single [`Reportable`].
pub fn to_reportables(err: &GraffleError) -> Vec<Reportable<'_>> {
    match err {
        GraffleError::MalformedDocument {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert data warnings into reportables.
pub fn warnings_to_reportables(warnings: &[Diagnostic]) -> Vec<Reportable<'_>> {
    warnings
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::without_source(d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use graffle_parser::{Span, error::ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("value without a key")
            .with_code(ErrorCode::E102)
            .with_label(Span::new(0..5), "here")
            .with_help("every value needs a preceding key");
        let err = GraffleError::new_malformed_document(ParseError::from(diag), "<dict>");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "value without a key");
                assert_eq!(d.code().unwrap().to_string(), "E102");
                assert!(d.source_code().is_some());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E102)
                .with_label(Span::new(10..15), "second"),
        ];
        let err = GraffleError::new_malformed_document(
            ParseError::from(diags),
            "source text of the document",
        );

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
    }

    #[test]
    fn test_non_diagnostic_errors() {
        let err = GraffleError::InvalidInputFile {
            path: PathBuf::from("notes.txt"),
        };
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "invalid input file: notes.txt");
        assert_eq!(reportables[0].code().unwrap().to_string(), "E001");

        let err = GraffleError::PageOutOfRange { page: 4, count: 2 };
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "graffle::page");
        assert_eq!(
            reportables[0].help().unwrap().to_string(),
            "pages are numbered from 0 to 1"
        );
    }

    #[test]
    fn test_warnings_have_no_labels() {
        let warnings = vec![
            Diagnostic::data_error(ErrorCode::E301, "graphic 3: unknown shape `Star`")
                .with_label(Span::new(0..5), "ignored"),
        ];
        let reportables = warnings_to_reportables(&warnings);

        assert_eq!(reportables.len(), 1);
        assert!(reportables[0].labels().is_none());
        assert!(reportables[0].source_code().is_none());
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
