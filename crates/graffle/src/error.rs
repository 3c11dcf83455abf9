//! Error types for graffle operations.
//!
//! [`GraffleError`] wraps the conditions that stop a conversion: the input
//! cannot be read or recognised, the document structure is malformed, or a
//! page is requested that does not exist. Data problems inside a page are
//! not errors; they are returned as warning diagnostics next to the output.

use std::{io, path::PathBuf};

use thiserror::Error;

use graffle_parser::{ContainerError, error::ParseError};

/// The main error type for graffle operations.
///
/// # Diagnostic Variants
///
/// `MalformedDocument` keeps the XML source next to the [`ParseError`] so
/// that callers can render snippets of the offending nodes.
#[derive(Debug, Error)]
pub enum GraffleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid input file: {}", path.display())]
    InvalidInputFile { path: PathBuf },

    #[error("{err}")]
    MalformedDocument { err: ParseError, src: String },

    #[error("page {page} out of range, the document has {count} page(s)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for GraffleError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<ContainerError> for GraffleError {
    fn from(error: ContainerError) -> Self {
        match error {
            ContainerError::Io { path, source } => Self::Io(io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),
            ContainerError::InvalidInputFile { path } => Self::InvalidInputFile { path },
        }
    }
}

impl GraffleError {
    /// Create a new `MalformedDocument` error with the associated XML source.
    pub fn new_malformed_document(err: ParseError, src: impl Into<String>) -> Self {
        Self::MalformedDocument {
            err,
            src: src.into(),
        }
    }
}
