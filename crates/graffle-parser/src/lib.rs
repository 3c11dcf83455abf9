//! # Graffle Parser
//!
//! Reader for OmniGraffle documents. This crate takes a `.graffle` file from
//! raw bytes to the typed [`Document`] model of `graffle-core`.
//!
//! ## Usage
//!
//! ```
//! # use graffle_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//!         <plist version="1.0"><dict>
//!             <key>GraphDocumentVersion</key><integer>6</integer>
//!             <key>GraphicsList</key><array/>
//!         </dict></plist>"#;
//!
//!     let (document, warnings) = parse(xml)?;
//!     assert_eq!(document.sheets().len(), 1);
//!     assert!(warnings.is_empty());
//!     Ok(())
//! }
//! ```

pub mod container;
pub mod coords;
mod elaborate;
pub mod error;
pub mod plist;
pub mod rtf;
mod span;
pub mod value;

pub use container::{ContainerError, ContainerKind, GraffleFile};
pub use elaborate::elaborate;
pub use span::Span;

use log::info;

use graffle_core::document::Document;

use error::{Diagnostic, ParseError};

/// Parse property-list XML into a document.
///
/// The pipeline has two steps:
///
/// 1. **Decode** - Map the XML onto the generic [`value::Value`] tree
/// 2. **Elaborate** - Build the typed [`Document`] from that tree
///
/// # Returns
///
/// The document and the non-fatal data problems found while building it, or
/// a [`ParseError`] when the XML or the page structure is malformed.
pub fn parse(xml: &str) -> Result<(Document, Vec<Diagnostic>), ParseError> {
    // Step 1: Decode
    let root = plist::decode(xml)?;

    // Step 2: Elaborate
    let (document, warnings) = elaborate(&root)?;
    info!(sheets = document.sheets().len(), warnings = warnings.len(); "Document parsed");
    Ok((document, warnings))
}
