//! SVG export backend.
//!
//! [`SvgTarget`] builds one SVG document per page with the `svg` crate. The
//! document has a single `<defs>` element, filled by
//! [`Target::finalize`], followed by a root `<g>` that carries the base
//! style. Nested layers become nested `<g>` elements.

mod defs;
mod element;

use log::debug;
use svg::{Node, node::element as svg_element};

use graffle_core::geometry::Bounds;

use super::{Ellipse, Error, Glyph, Image, Path, Rect, RequiredDefinitions, Target, TextBlock};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// An SVG [`Target`] that renders pages into memory.
///
/// # Examples
///
/// ```
/// use graffle::export::{Rect, RequiredDefinitions, Target, svg::SvgTarget};
/// use graffle_core::geometry::Bounds;
///
/// let mut target = SvgTarget::new();
/// target.reset("fill:#fff");
/// target.add_rect(Rect {
///     id: "1".to_string(),
///     bounds: Bounds::from_origin_extent(0.0, 0.0, 100.0, 50.0),
///     radius: None,
///     rotation: None,
///     style: String::new(),
/// });
/// target.finalize(&RequiredDefinitions::new()).unwrap();
///
/// let svg = target.output().unwrap();
/// assert!(svg.contains(r#"<rect height="50" id="1" width="100" x="0" y="0"/>"#));
/// ```
#[derive(Debug, Default)]
pub struct SvgTarget {
    view_box: Option<Bounds>,
    page: Option<Page>,
}

/// The document under construction.
#[derive(Debug)]
struct Page {
    defs: svg_element::Definitions,
    /// Open layers, root first.
    layers: Vec<svg_element::Group>,
}

impl SvgTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `viewBox` written on every page.
    pub fn with_view_box(mut self, view_box: Option<Bounds>) -> Self {
        self.view_box = view_box;
        self
    }

    fn page_mut(&mut self) -> Option<&mut Page> {
        self.page.as_mut()
    }

    /// Appends `node` to the innermost open layer.
    ///
    /// Primitives arriving before [`Target::reset`] have no page to go to
    /// and are dropped.
    fn append(&mut self, node: impl Into<Box<dyn Node>>) {
        match self
            .page_mut()
            .and_then(|page| page.layers.last_mut())
        {
            Some(layer) => layer.append(node),
            None => debug!("Primitive added before reset, dropped"),
        }
    }
}

impl Target for SvgTarget {
    type Output = String;

    fn reset(&mut self, base_style: &str) {
        self.page = Some(Page {
            defs: svg_element::Definitions::new(),
            layers: vec![element::with_style(svg_element::Group::new(), base_style)],
        });
    }

    fn push_layer(&mut self, style: &str) {
        if let Some(page) = self.page_mut() {
            page.layers
                .push(element::with_style(svg_element::Group::new(), style));
        }
    }

    fn pop_layer(&mut self) {
        let Some(page) = self.page_mut() else {
            return;
        };
        if page.layers.len() < 2 {
            return;
        }
        if let Some(layer) = page.layers.pop() {
            if let Some(parent) = page.layers.last_mut() {
                parent.append(layer);
            }
        }
    }

    fn add_rect(&mut self, rect: Rect) {
        self.append(element::rect(&rect));
    }

    fn add_ellipse(&mut self, ellipse: Ellipse) {
        self.append(element::ellipse(&ellipse));
    }

    fn add_path(&mut self, path: Path) {
        if path.points.is_empty() {
            debug!(id = path.id.as_str(); "Path without points, dropped");
            return;
        }
        self.append(element::path(&path));
    }

    fn add_image(&mut self, image: Image) {
        self.append(element::image(&image));
    }

    fn add_glyph(&mut self, glyph: Glyph) {
        self.append(element::glyph(&glyph));
    }

    fn add_text(&mut self, text: TextBlock) {
        self.append(element::text(&text));
    }

    fn finalize(&mut self, required: &RequiredDefinitions) -> Result<(), Error> {
        let page = self
            .page_mut()
            .ok_or_else(|| Error::Render("finalize called before reset".to_string()))?;
        for definition in required.iter() {
            page.defs.append(defs::materialize(definition));
        }
        debug!(definitions = required.len(); "Definitions materialised");
        Ok(())
    }

    fn output(&self) -> Result<String, Error> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| Error::Render("no page has been rendered".to_string()))?;

        // Close any layer still open so the output is well formed.
        let mut layers = page.layers.clone();
        while layers.len() > 1 {
            if let (Some(layer), Some(parent)) = (layers.pop(), layers.last_mut()) {
                parent.append(layer);
            }
        }

        let mut doc = svg::Document::new()
            .set("version", "1.1")
            .set("xmlns:xlink", XLINK_NAMESPACE);
        if let Some(view_box) = self.view_box {
            doc = doc.set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view_box.x(),
                    view_box.y(),
                    view_box.width(),
                    view_box.height()
                ),
            );
        }
        doc = doc.add(page.defs.clone());
        for layer in layers {
            doc = doc.add(layer);
        }

        Ok(format!("{XML_DECLARATION}\n{doc}\n"))
    }
}
