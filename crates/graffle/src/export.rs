//! Output targets for rendered pages.
//!
//! The interpreter in [`crate::render`] walks a page and reports what it
//! finds as drawing primitives: rectangles, ellipses, paths, images, glyphs
//! that reference a shared definition, and text blocks. A [`Target`] receives
//! those primitives in paint order and turns them into an output document.
//!
//! # Pipeline Position
//!
//! ```text
//! .graffle file
//!     ↓ open + parse (graffle-parser)
//! Document
//!     ↓ render (one page at a time)
//! Drawing primitives + required definitions
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Required definitions
//!
//! Markers, the drop-shadow filter and the cloud glyph are not written when
//! a graphic first asks for them. The interpreter collects [`Definition`]
//! tokens in a [`RequiredDefinitions`] set during the walk and hands the set
//! to [`Target::finalize`] once the page is done, so every distinct token is
//! materialised exactly once.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgTarget`]

/// SVG export backend.
pub mod svg;

use std::fmt;

use indexmap::IndexSet;

use graffle_core::{
    document::PathTransform,
    geometry::{self, Bounds, Point},
};

/// A sink for the primitives of one page.
///
/// Calls arrive in paint order: [`reset`](Target::reset) first, then any mix
/// of `add_*` calls and balanced [`push_layer`](Target::push_layer) /
/// [`pop_layer`](Target::pop_layer) pairs, then
/// [`finalize`](Target::finalize). Each primitive carries the style string of
/// its own scope; inherited properties live on the enclosing layers.
pub trait Target {
    /// The serialized page.
    type Output;

    /// Starts a new page whose root layer carries `base_style`.
    ///
    /// Anything recorded for a previous page is discarded.
    fn reset(&mut self, base_style: &str);

    /// Opens a nested layer; following primitives are added to it.
    fn push_layer(&mut self, style: &str);

    /// Closes the innermost nested layer. The root layer is never closed.
    fn pop_layer(&mut self);

    fn add_rect(&mut self, rect: Rect);

    fn add_ellipse(&mut self, ellipse: Ellipse);

    fn add_path(&mut self, path: Path);

    fn add_image(&mut self, image: Image);

    /// Places a scaled copy of a shared definition.
    fn add_glyph(&mut self, glyph: Glyph);

    fn add_text(&mut self, text: TextBlock);

    /// Materialises every required definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if no page was started.
    fn finalize(&mut self, required: &RequiredDefinitions) -> Result<(), Error>;

    /// Returns the current page in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if no page was started.
    fn output(&self) -> Result<Self::Output, Error>;
}

/// An axis-aligned rectangle, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub id: String,
    pub bounds: Bounds,
    /// Corner radii `(rx, ry)`.
    pub radius: Option<(f64, f64)>,
    /// Rotation in degrees about the centre.
    pub rotation: Option<f64>,
    pub style: String,
}

/// An ellipse inscribed in its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub id: String,
    pub bounds: Bounds,
    pub rotation: Option<f64>,
    pub style: String,
}

impl Ellipse {
    /// Returns the radii `(rx, ry)`.
    pub fn radii(&self) -> (f64, f64) {
        (self.bounds.width() / 2.0, self.bounds.height() / 2.0)
    }
}

/// A polyline or polygon through `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: String,
    pub points: Vec<Point>,
    pub closed: bool,
    pub transform: PathTransform,
    pub style: String,
}

impl Path {
    /// Returns the points after horizontal flip, vertical flip and rotation,
    /// in that order, each about the point set's own centre.
    pub fn resolved_points(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        if self.transform.h_flip {
            points = geometry::h_flip_points(&points, None);
        }
        if self.transform.v_flip {
            points = geometry::v_flip_points(&points, None);
        }
        if let Some(angle) = self.transform.rotation {
            points = geometry::rotate_points(&points, angle, None);
        }
        points
    }
}

/// An embedded image reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: String,
    pub bounds: Bounds,
    pub href: String,
    pub style: String,
}

/// A shared definition drawn into `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub id: String,
    pub bounds: Bounds,
    pub definition: Definition,
    pub style: String,
}

impl Glyph {
    /// Returns the scale factors from the definition's extent to `bounds`.
    pub fn scale(&self) -> (f64, f64) {
        let extent = self.definition.extent();
        (self.bounds.width() / extent, self.bounds.height() / extent)
    }
}

/// A vertically centred block of text lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// The owning graphic's ID.
    pub id: String,
    /// Origin of the inset text box.
    pub origin: Point,
    /// Font style of the whole block.
    pub style: String,
    pub lines: Vec<TextLine>,
}

/// One positioned line of a [`TextBlock`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Anchor point; `y` is the baseline.
    pub position: Point,
    pub anchor: TextAnchor,
    /// Presentation attributes of the line's first character.
    pub attributes: Vec<(&'static str, String)>,
}

/// Horizontal anchoring of a text line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A deferred output asset, identified by its element ID.
///
/// Filled arrow heads are keyed by the stroke color and width in effect when
/// they were requested, so differently styled lines get their own markers
/// while identical ones share a single definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Definition {
    /// Filled head marker; `color` is six hex digits, `width` a CSS length.
    FilledArrowEnd { color: String, width: String },
    FilledArrowStart { color: String, width: String },
    StickArrowEnd,
    StickArrowStart,
    Bar,
    CrowBall,
    DropShadow,
    NetworkCloud,
}

impl Definition {
    /// Returns the element ID of the materialised definition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graffle::export::Definition;
    /// let marker = Definition::FilledArrowEnd {
    ///     color: "808080".to_string(),
    ///     width: "1.000000px".to_string(),
    /// };
    /// assert_eq!(marker.id(), "Arrow1Lend_808080_1.000000px");
    /// assert_eq!(Definition::Bar.id(), "mBar");
    /// ```
    pub fn id(&self) -> String {
        match self {
            Self::FilledArrowEnd { color, width } => format!("Arrow1Lend_{color}_{width}"),
            Self::FilledArrowStart { color, width } => format!("Arrow1Lstart_{color}_{width}"),
            Self::StickArrowEnd => "Arrow2Lend".to_string(),
            Self::StickArrowStart => "Arrow2Lstart".to_string(),
            Self::Bar => "mBar".to_string(),
            Self::CrowBall => "mCrowBall".to_string(),
            Self::DropShadow => "DropShadow".to_string(),
            Self::NetworkCloud => "network_cloud".to_string(),
        }
    }

    /// Returns the `url(#...)` reference used in style properties.
    pub fn reference(&self) -> String {
        format!("url(#{})", self.id())
    }

    /// Side length of the square a glyph definition is drawn in.
    pub fn extent(&self) -> f64 {
        match self {
            Self::NetworkCloud => 500.0,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// The definitions a page refers to, in first-request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredDefinitions {
    definitions: IndexSet<Definition>,
}

impl RequiredDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `definition`. Returns `false` if it was already required.
    pub fn insert(&mut self, definition: Definition) -> bool {
        self.definitions.insert(definition)
    }

    pub fn contains(&self, definition: &Definition) -> bool {
        self.definitions.contains(definition)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Errors that can occur while exporting a page.
///
/// This type is converted into [`GraffleError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`GraffleError::Export`]: crate::GraffleError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
