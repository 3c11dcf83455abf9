//! Error and diagnostic system for the graffle parser.
//!
//! Every problem found while reading a document becomes a [`Diagnostic`]:
//! an optional [`ErrorCode`], a message, labelled [`Span`]s into the XML
//! source and help text. Structural problems are errors and end up in a
//! [`ParseError`]. Data problems are warnings: the offending value is
//! skipped or defaulted and the caller receives the warnings alongside the
//! result.
//!
//! # Example
//!
//! ```
//! # use graffle_parser::error::{Diagnostic, ErrorCode};
//! # use graffle_parser::Span;
//!
//! let diag = Diagnostic::error("value without a key")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(212..238), "this value")
//!     .with_secondary_label(Span::new(180..420), "in this dict");
//! ```
//!
//! [`Span`]: crate::Span

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
