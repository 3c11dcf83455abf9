//! Typed document model.
//!
//! A [`Document`] is built once per input file by the parser's extraction
//! stage and is read-only afterwards. The renderer only ever borrows it, so
//! several pages may be rendered from the same document with independent
//! targets.
//!
//! # Organization
//!
//! - [`Document`], [`FileInfo`], [`PrintInfo`] - the root and its metadata
//! - [`Sheet`] - one page with its graphics tree
//! - [`Graphic`], [`GraphicKind`] - the drawable elements
//! - [`Style`], [`FillStyle`], [`StrokeStyle`], [`ShadowStyle`] - local style records
//! - [`TextRun`], [`FontInfo`] - attached rich text and its font

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{
    color::Rgb,
    geometry::{Bounds, Point},
};

/// The root of a decoded graffle file.
#[derive(Debug, Clone, Default)]
pub struct Document {
    file_info: FileInfo,
    sheets: Vec<Sheet>,
    images: Vec<String>,
}

impl Document {
    /// Create a new Document.
    ///
    /// A file without a `Sheets` array is represented as a single sheet.
    pub fn new(file_info: FileInfo, sheets: Vec<Sheet>, images: Vec<String>) -> Self {
        Self {
            file_info,
            sheets,
            images,
        }
    }

    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }

    /// The format generation, `-1` when the file does not declare one.
    pub fn format_version(&self) -> i64 {
        self.file_info.format_version
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Embedded image references, indexed by the `ImageID` of a graphic.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn image(&self, id: i64) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.images.get(i))
            .map(String::as_str)
    }
}

/// Version and authoring metadata of a document.
#[derive(Debug, Clone)]
pub struct FileInfo {
    format_version: i64,
    creator: String,
    creation_date: String,
    modification_date: String,
    application_version: Vec<String>,
    print_info: PrintInfo,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            format_version: -1,
            creator: String::new(),
            creation_date: String::new(),
            modification_date: String::new(),
            application_version: Vec::new(),
            print_info: PrintInfo::default(),
        }
    }
}

impl FileInfo {
    pub fn new(format_version: i64, print_info: PrintInfo) -> Self {
        Self {
            format_version,
            print_info,
            ..Self::default()
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    pub fn with_dates(
        mut self,
        created: impl Into<String>,
        modified: impl Into<String>,
    ) -> Self {
        self.creation_date = created.into();
        self.modification_date = modified.into();
        self
    }

    pub fn with_application_version(mut self, version: Vec<String>) -> Self {
        self.application_version = version;
        self
    }

    pub fn format_version(&self) -> i64 {
        self.format_version
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn modification_date(&self) -> &str {
        &self.modification_date
    }

    pub fn application_version(&self) -> &[String] {
        &self.application_version
    }

    pub fn print_info(&self) -> &PrintInfo {
        &self.print_info
    }
}

/// A single typed `PrintInfo` entry.
///
/// The file stores each entry as a `[type, value]` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintValue {
    Int(i64),
    Size(f64, f64),
    Text(String),
    /// An archived object. Its payload is not decoded.
    Coded,
}

/// Print settings, used to size the page background of old documents.
#[derive(Debug, Clone, Default)]
pub struct PrintInfo {
    entries: IndexMap<String, PrintValue>,
}

impl PrintInfo {
    pub fn new(entries: IndexMap<String, PrintValue>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&PrintValue> {
        self.entries.get(key)
    }

    fn number(&self, key: &str, default: f64) -> f64 {
        match self.entries.get(key) {
            Some(PrintValue::Int(v)) => *v as f64,
            _ => default,
        }
    }

    pub fn left_margin(&self) -> f64 {
        self.number("NSLeftMargin", 0.0)
    }

    pub fn right_margin(&self) -> f64 {
        self.number("NSRightMargin", 0.0)
    }

    pub fn top_margin(&self) -> f64 {
        self.number("NSTopMargin", 0.0)
    }

    pub fn bottom_margin(&self) -> f64 {
        self.number("NSBottomMargin", 0.0)
    }

    pub fn orientation(&self) -> i64 {
        match self.entries.get("NSOrientation") {
            Some(PrintValue::Int(v)) => *v,
            _ => 1,
        }
    }

    pub fn paper_name(&self) -> &str {
        match self.entries.get("NSPaperName") {
            Some(PrintValue::Text(name)) => name,
            _ => "",
        }
    }

    /// Paper width and height, `100 x 100` when absent.
    pub fn paper_size(&self) -> (f64, f64) {
        match self.entries.get("NSPaperSize") {
            Some(PrintValue::Size(w, h)) => (*w, *h),
            _ => (100.0, 100.0),
        }
    }

    /// The printable area: paper size minus the four margins.
    pub fn printable_size(&self) -> (f64, f64) {
        let (w, h) = self.paper_size();
        (
            w - self.left_margin() - self.right_margin(),
            h - self.top_margin() - self.bottom_margin(),
        )
    }
}

/// One page of a document.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    title: Option<String>,
    graphics: Vec<Graphic>,
    background: Option<Graphic>,
    canvas_origin: Point,
    canvas_color: Option<Rgb>,
}

impl Sheet {
    /// Create a new Sheet from its graphics in stored order (topmost first).
    pub fn new(graphics: Vec<Graphic>) -> Self {
        Self {
            graphics,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_background(mut self, background: Option<Graphic>) -> Self {
        self.background = background;
        self
    }

    pub fn with_canvas(mut self, origin: Point, color: Option<Rgb>) -> Self {
        self.canvas_origin = origin;
        self.canvas_color = color;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Graphics in stored order, which is the reverse of paint order.
    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    /// The dedicated background graphic of format version 6 and later.
    pub fn background(&self) -> Option<&Graphic> {
        self.background.as_ref()
    }

    pub fn canvas_origin(&self) -> Point {
        self.canvas_origin
    }

    pub fn canvas_color(&self) -> Option<Rgb> {
        self.canvas_color
    }
}

/// A drawable element of a sheet.
#[derive(Debug, Clone)]
pub struct Graphic {
    id: String,
    bounds: Option<Bounds>,
    style: Option<Style>,
    text: Option<TextRun>,
    font: Option<FontInfo>,
    kind: GraphicKind,
}

impl Graphic {
    pub fn new(id: impl Into<String>, kind: GraphicKind) -> Self {
        Self {
            id: id.into(),
            bounds: None,
            style: None,
            text: None,
            font: None,
            kind,
        }
    }

    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_style(mut self, style: Option<Style>) -> Self {
        self.style = style;
        self
    }

    pub fn with_text(mut self, text: Option<TextRun>, font: Option<FontInfo>) -> Self {
        self.text = text;
        self.font = font;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn text(&self) -> Option<&TextRun> {
        self.text.as_ref()
    }

    pub fn font(&self) -> Option<&FontInfo> {
        self.font.as_ref()
    }

    pub fn kind(&self) -> &GraphicKind {
        &self.kind
    }
}

impl fmt::Display for Graphic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.class_name(), self.id)
    }
}

/// The class-specific part of a [`Graphic`].
#[derive(Debug, Clone)]
pub enum GraphicKind {
    Shaped(ShapedGraphic),
    /// A filled shape without decoration, used for page backgrounds.
    Solid(ShapedGraphic),
    Line(LineGraphic),
    /// Child graphics in stored order.
    Group(Vec<Graphic>),
    /// Table cells in stored order.
    TableGroup(Vec<Graphic>),
    /// A `Class` value the renderer does not know.
    Unknown(String),
}

impl GraphicKind {
    /// The `Class` name this kind was read from.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Shaped(_) => "ShapedGraphic",
            Self::Solid(_) => "SolidGraphic",
            Self::Line(_) => "LineGraphic",
            Self::Group(_) => "Group",
            Self::TableGroup(_) => "TableGroup",
            Self::Unknown(class) => class,
        }
    }
}

/// Shape attributes shared by shaped and solid graphics.
#[derive(Debug, Clone, Default)]
pub struct ShapedGraphic {
    shape: Shape,
    image_id: Option<i64>,
    h_flip: bool,
    v_flip: bool,
    rotation: Option<f64>,
    shape_data: Option<ShapeData>,
}

impl ShapedGraphic {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image_id: Option<i64>) -> Self {
        self.image_id = image_id;
        self
    }

    pub fn with_flips(mut self, h_flip: bool, v_flip: bool) -> Self {
        self.h_flip = h_flip;
        self.v_flip = v_flip;
        self
    }

    pub fn with_rotation(mut self, rotation: Option<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_shape_data(mut self, shape_data: Option<ShapeData>) -> Self {
        self.shape_data = shape_data;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn image_id(&self) -> Option<i64> {
        self.image_id
    }

    pub fn transform(&self) -> PathTransform {
        PathTransform {
            h_flip: self.h_flip,
            v_flip: self.v_flip,
            rotation: self.rotation,
        }
    }

    pub fn shape_data(&self) -> Option<&ShapeData> {
        self.shape_data.as_ref()
    }
}

/// Flip and rotation options applied to path-based shapes, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathTransform {
    pub h_flip: bool,
    pub v_flip: bool,
    /// Rotation in degrees about the point set's centre.
    pub rotation: Option<f64>,
}

impl PathTransform {
    pub fn is_identity(&self) -> bool {
        !self.h_flip && !self.v_flip && self.rotation.is_none()
    }
}

/// Shape-specific parameters, currently only used by adjustable arrows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeData {
    /// Shaft height as a fraction of the bounds height.
    pub ratio: Option<f64>,
    /// Length of the arrow head.
    pub width: Option<f64>,
}

/// The geometric kind of a shaped graphic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Shape {
    #[default]
    Rectangle,
    RoundRect,
    Circle,
    HorizontalTriangle,
    RightTriangle,
    VerticalTriangle,
    AdjustableArrow,
    Diamond,
    Cloud,
    Unknown(String),
}

impl FromStr for Shape {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Rectangle" => Self::Rectangle,
            "RoundRect" => Self::RoundRect,
            "Circle" => Self::Circle,
            "HorizontalTriangle" => Self::HorizontalTriangle,
            "RightTriangle" => Self::RightTriangle,
            "VerticalTriangle" => Self::VerticalTriangle,
            "AdjustableArrow" => Self::AdjustableArrow,
            "Diamond" => Self::Diamond,
            "Cloud" => Self::Cloud,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rectangle => "Rectangle",
            Self::RoundRect => "RoundRect",
            Self::Circle => "Circle",
            Self::HorizontalTriangle => "HorizontalTriangle",
            Self::RightTriangle => "RightTriangle",
            Self::VerticalTriangle => "VerticalTriangle",
            Self::AdjustableArrow => "AdjustableArrow",
            Self::Diamond => "Diamond",
            Self::Cloud => "Cloud",
            Self::Unknown(name) => name,
        };
        f.write_str(name)
    }
}

/// A connector drawn through its stored points.
#[derive(Debug, Clone, Default)]
pub struct LineGraphic {
    points: Vec<Point>,
    orthogonal_bar_automatic: bool,
    orthogonal_bar_position: Option<f64>,
}

impl LineGraphic {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn with_orthogonal_bar(mut self, automatic: bool, position: Option<f64>) -> Self {
        self.orthogonal_bar_automatic = automatic;
        self.orthogonal_bar_position = position;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The manual orthogonal-bar position, when the bar is not automatic.
    ///
    /// This is a routing hint only.
    pub fn orthogonal_bar_hint(&self) -> Option<f64> {
        if self.orthogonal_bar_automatic {
            None
        } else {
            self.orthogonal_bar_position
        }
    }
}

/// A graphic's local style record. Absent parts are inherited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<FillStyle>,
    pub stroke: Option<StrokeStyle>,
    pub shadow: Option<ShadowStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    /// `false` only when the file says `Draws = NO`.
    pub draws: bool,
    pub color: Option<Rgb>,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            draws: true,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub draws: bool,
    pub color: Option<Rgb>,
    pub width: Option<f64>,
    pub corner_radius: Option<f64>,
    /// Dash pattern code.
    pub pattern: Option<i64>,
    pub head_arrow: Option<ArrowKind>,
    pub tail_arrow: Option<ArrowKind>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            draws: true,
            color: None,
            width: None,
            corner_radius: None,
            pattern: None,
            head_arrow: None,
            tail_arrow: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowStyle {
    pub draws: bool,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self { draws: true }
    }
}

/// Arrow decoration at one end of a stroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowKind {
    FilledArrow,
    StickArrow,
    Bar,
    CrowBall,
    /// The literal `0`: explicitly no arrow.
    NoArrow,
    Unknown(String),
}

impl FromStr for ArrowKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "FilledArrow" => Self::FilledArrow,
            "StickArrow" => Self::StickArrow,
            "Bar" => Self::Bar,
            "CrowBall" => Self::CrowBall,
            "0" => Self::NoArrow,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilledArrow => f.write_str("FilledArrow"),
            Self::StickArrow => f.write_str("StickArrow"),
            Self::Bar => f.write_str("Bar"),
            Self::CrowBall => f.write_str("CrowBall"),
            Self::NoArrow => f.write_str("0"),
            Self::Unknown(name) => f.write_str(name),
        }
    }
}

/// Rich text attached to a graphic, with its inset from the bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pad: f64,
    pub vertical_pad: f64,
}

/// The graphic-level font record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontInfo {
    pub font: Option<String>,
    pub size: Option<f64>,
    pub color: Option<Rgb>,
}
