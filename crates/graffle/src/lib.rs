//! Graffle - Convert OmniGraffle diagrams to SVG.
//!
//! Reading, page rendering and SVG export for OmniGraffle documents. Files
//! may be plain or gzip-compressed property-list XML; each page (sheet)
//! becomes one standalone SVG document.

pub mod config;
pub mod export;
pub mod render;

mod error;

pub use graffle_core::{color, document, geometry};
pub use graffle_parser::{
    ContainerKind,
    error::{Diagnostic, ErrorCode, ParseError, Severity},
};

pub use error::GraffleError;

use std::path::Path;

use log::{debug, info, trace};

use graffle_core::document::Document;
use graffle_parser::GraffleFile;

use config::AppConfig;
use export::{Target, svg::SvgTarget};

/// Builder for reading and converting graffle documents.
///
/// # Examples
///
/// ```rust,no_run
/// use graffle::{Converter, config::AppConfig};
///
/// let converter = Converter::new(AppConfig::default());
///
/// // Read and parse the file
/// let (document, warnings) = converter.open("diagram.graffle")
///     .expect("Failed to read");
///
/// // Render every page
/// for page in 0..converter.page_count(&document) {
///     let (svg, page_warnings) = converter.render_svg(&document, page)
///         .expect("Failed to render");
///     println!("{svg}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    config: AppConfig,
}

impl Converter {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Rendering options and font substitutions
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this converter renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read a graffle file from disk and parse it.
    ///
    /// The container is detected from the file content: gzip-compressed
    /// XML is inflated first, anything else is read as XML text.
    ///
    /// # Errors
    ///
    /// Returns `GraffleError` if the file cannot be read, is not a graffle
    /// container, or holds a malformed property list.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<(Document, Vec<Diagnostic>), GraffleError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Opening document");

        let file = GraffleFile::open(path)?;
        debug!(container:% = file.kind(); "Container detected");

        self.parse(&file.close())
    }

    /// Parse property-list XML into a document.
    ///
    /// # Returns
    ///
    /// The document and the data problems found while reading it.
    ///
    /// # Errors
    ///
    /// Returns `GraffleError::MalformedDocument` with the XML source attached
    /// when the XML or the page structure is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle::Converter;
    ///
    /// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
    ///     <plist version="1.0"><dict>
    ///         <key>GraphDocumentVersion</key><integer>6</integer>
    ///         <key>GraphicsList</key><array/>
    ///     </dict></plist>"#;
    ///
    /// let converter = Converter::default();
    /// let (document, _) = converter.parse(xml).unwrap();
    /// assert_eq!(converter.page_count(&document), 1);
    /// ```
    pub fn parse(&self, xml: &str) -> Result<(Document, Vec<Diagnostic>), GraffleError> {
        let (document, warnings) = graffle_parser::parse(xml)
            .map_err(|err| GraffleError::new_malformed_document(err, xml))?;

        debug!(
            version = document.format_version(),
            pages = document.sheets().len(),
            images = document.images().len();
            "Document parsed"
        );
        trace!(document:?; "Parsed document");

        Ok((document, warnings))
    }

    /// Number of pages in `document`.
    pub fn page_count(&self, document: &Document) -> usize {
        document.sheets().len()
    }

    /// Render one page of `document` to an SVG string.
    ///
    /// Pages are numbered from zero.
    ///
    /// # Returns
    ///
    /// The SVG text and the data problems found on the page.
    ///
    /// # Errors
    ///
    /// Returns `GraffleError::PageOutOfRange` for a page the document does
    /// not have, or `GraffleError::Export` if the SVG cannot be produced.
    pub fn render_svg(
        &self,
        document: &Document,
        page: usize,
    ) -> Result<(String, Vec<Diagnostic>), GraffleError> {
        let view_box = self.config.render().bounding_box().map(|clip| clip.to_bounds());
        let mut target = SvgTarget::new().with_view_box(view_box);
        let warnings = render::render_page(document, page, &self.config, &mut target)?;
        let svg = target.output()?;

        info!(page, warnings = warnings.len(); "SVG rendered");
        Ok((svg, warnings))
    }
}
