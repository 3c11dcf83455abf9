//! Configuration types for graffle conversion.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from a
//! TOML file. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and font settings.
//! - [`RenderConfig`] - Background drawing and bounding-box culling.
//! - [`FontConfig`] - Font family substitutions and the fallback font size.
//!
//! # Example
//!
//! ```
//! # use graffle::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().background());
//! assert_eq!(config.fonts().substitute("Courier"), "Courier New");
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use graffle_core::geometry::{ClipBox, Point};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Font configuration section.
    #[serde(default)]
    fonts: FontConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, fonts: FontConfig) -> Self {
        Self { render, fonts }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the render configuration for modification.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns the font configuration.
    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }
}

/// How pages are drawn.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Draw the page background before the graphics.
    #[serde(default = "default_background")]
    background: bool,

    /// Clip box as `[x1, y1, x2, y2]`. Graphics reaching outside it are
    /// skipped and the box becomes the SVG `viewBox`.
    #[serde(default)]
    bounding_box: Option<[f64; 4]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            bounding_box: None,
        }
    }
}

impl RenderConfig {
    pub fn new(background: bool, bounding_box: Option<[f64; 4]>) -> Self {
        Self {
            background,
            bounding_box,
        }
    }

    pub fn background(&self) -> bool {
        self.background
    }

    pub fn set_background(&mut self, background: bool) {
        self.background = background;
    }

    /// Returns the clip box, normalised so that either corner order works.
    pub fn bounding_box(&self) -> Option<ClipBox> {
        self.bounding_box
            .map(|[x1, y1, x2, y2]| ClipBox::from_corners(Point::new(x1, y1), Point::new(x2, y2)))
    }

    pub fn set_bounding_box(&mut self, bounding_box: Option<[f64; 4]>) {
        self.bounding_box = bounding_box;
    }
}

/// Font handling for text blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Font family replacements, applied to the graphic-level font name.
    #[serde(default = "default_substitutions")]
    substitutions: IndexMap<String, String>,

    /// Line height used when neither the text nor the graphic names a size.
    #[serde(default = "default_font_size")]
    default_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            substitutions: default_substitutions(),
            default_size: default_font_size(),
        }
    }
}

impl FontConfig {
    pub fn new(substitutions: IndexMap<String, String>, default_size: f64) -> Self {
        Self {
            substitutions,
            default_size,
        }
    }

    /// Returns the replacement for `family`, or `family` itself.
    pub fn substitute<'a>(&'a self, family: &'a str) -> &'a str {
        self.substitutions
            .get(family)
            .map_or(family, String::as_str)
    }

    pub fn default_size(&self) -> f64 {
        self.default_size
    }
}

fn default_background() -> bool {
    true
}

fn default_font_size() -> f64 {
    12.0
}

fn default_substitutions() -> IndexMap<String, String> {
    [
        ("LucidaGrande", "Luxi Sans"),
        ("Courier", "Courier New"),
        ("GillSans", "Arial Narrow"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}
