//! Page rendering.
//!
//! [`render_page`] walks one sheet of a [`Document`] and reports drawing
//! primitives to a [`Target`]. The walk:
//!
//! 1. resets the target and starts a fresh [`RenderState`] whose base scope
//!    holds the default fill, stroke and stroke width;
//! 2. draws the page background, if enabled;
//! 3. visits the sheet's graphics in reverse stored order, since files keep
//!    the topmost graphic first;
//! 4. hands the definitions requested during the walk to
//!    [`Target::finalize`].
//!
//! Every graphic opens a style scope for its own style record and closes it
//! when done, so groups pass their style on to their children. Data problems
//! are reported as warnings and never abort the page.

pub mod shape;
pub mod style;
pub mod text;

use log::{debug, info, trace, warn};

use graffle_core::{
    document::{Document, Graphic, GraphicKind, LineGraphic, Shape, ShapedGraphic, Sheet, TextRun},
    geometry::{self, Bounds, ClipBox, Point},
};
use graffle_parser::{
    error::{Diagnostic, ErrorCode},
    rtf,
};

use crate::{
    GraffleError,
    config::{AppConfig, FontConfig},
    export::{Definition, Ellipse, Glyph, Image, Path, Rect, Target},
};

use shape::{Outline, OutlineError};
use style::RenderState;

/// First format version that stores the page background as a graphic.
const BACKGROUND_GRAPHIC_VERSION: i64 = 6;

/// Renders page `page` of `document` into `target`.
///
/// The target is reset first and finalized last; read the page with
/// [`Target::output`] afterwards.
///
/// # Returns
///
/// The data problems found on the page, in the order they were met.
///
/// # Errors
///
/// Returns [`GraffleError::PageOutOfRange`] if the document has no such
/// page, or [`GraffleError::Export`] if the target fails to finalize.
pub fn render_page<T: Target>(
    document: &Document,
    page: usize,
    config: &AppConfig,
    target: &mut T,
) -> Result<Vec<Diagnostic>, GraffleError> {
    let sheet = document
        .sheet(page)
        .ok_or_else(|| GraffleError::PageOutOfRange {
            page,
            count: document.sheets().len(),
        })?;
    info!(page, graphics = sheet.graphics().len(); "Rendering page");

    let mut walker = Walker {
        document,
        fonts: config.fonts(),
        target,
        state: RenderState::new(),
        bounding_box: config.render().bounding_box(),
        diagnostics: Vec::new(),
    };
    walker.target.reset(&walker.state.layer_style());

    if config.render().background() {
        walker.background(sheet);
    }
    walker.visit_all(sheet.graphics());

    let Walker {
        state, diagnostics, target, ..
    } = walker;
    target.finalize(state.required())?;

    debug!(
        page,
        definitions = state.required().len(),
        warnings = diagnostics.len();
        "Page rendered"
    );
    Ok(diagnostics)
}

/// The state of one page walk.
struct Walker<'a, T: Target> {
    document: &'a Document,
    fonts: &'a FontConfig,
    target: &'a mut T,
    state: RenderState,
    bounding_box: Option<ClipBox>,
    diagnostics: Vec<Diagnostic>,
}

impl<T: Target> Walker<'_, T> {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
        self.diagnostics.push(diagnostic);
    }

    fn is_culled(&self, points: &[Point]) -> bool {
        geometry::out_of_bounding_box(points, self.bounding_box.as_ref())
    }

    /// Draws the page background. It is never culled.
    fn background(&mut self, sheet: &Sheet) {
        let clip = self.bounding_box.take();

        if self.document.format_version() >= BACKGROUND_GRAPHIC_VERSION {
            match sheet.background() {
                Some(background) => self.visit(background),
                None => debug!("Sheet without background graphic"),
            }
        } else if let Some(color) = sheet.canvas_color() {
            // Older files only store a canvas color; the page size comes
            // from the print settings.
            let origin = sheet.canvas_origin();
            let (width, height) = self.document.file_info().print_info().printable_size();

            self.state.styles_mut().push_scope();
            self.state.styles_mut().set("fill", color.to_string());
            self.target.add_rect(Rect {
                id: "background".to_string(),
                bounds: Bounds::from_origin_extent(origin.x(), origin.y(), width, height),
                radius: None,
                rotation: None,
                style: self.state.element_style(),
            });
            self.state.styles_mut().pop_scope();
        }

        self.bounding_box = clip;
    }

    /// Visits `graphics` in paint order, the reverse of stored order.
    fn visit_all(&mut self, graphics: &[Graphic]) {
        for graphic in graphics.iter().rev() {
            self.visit(graphic);
        }
    }

    fn visit(&mut self, graphic: &Graphic) {
        trace!(id = graphic.id(), class = graphic.kind().class_name(); "Visiting graphic");

        self.state.styles_mut().push_scope();
        if let Some(style) = graphic.style() {
            for diagnostic in self.state.apply(style, graphic.id()) {
                self.report(diagnostic);
            }
        }

        match graphic.kind() {
            GraphicKind::Shaped(shaped) | GraphicKind::Solid(shaped) => {
                self.shaped_graphic(graphic, shaped);
            }
            GraphicKind::Line(line) => self.line_graphic(graphic, line),
            GraphicKind::Group(children) | GraphicKind::TableGroup(children) => {
                if !children.is_empty() {
                    self.layer(children);
                }
            }
            GraphicKind::Unknown(class) => self.report(Diagnostic::data_error(
                ErrorCode::E302,
                format!("graphic {}: unknown graphic class `{class}`", graphic.id()),
            )),
        }

        if let Some(text) = graphic.text() {
            self.text(graphic, text);
        }

        self.state.styles_mut().pop_scope();
    }

    /// Draws `children` into a nested layer that carries the full style in
    /// effect.
    fn layer(&mut self, children: &[Graphic]) {
        self.state.styles_mut().push_scope();
        self.target.push_layer(&self.state.layer_style());
        self.visit_all(children);
        self.target.pop_layer();
        self.state.styles_mut().pop_scope();
    }

    fn shaped_graphic(&mut self, graphic: &Graphic, shaped: &ShapedGraphic) {
        let id = graphic.id();
        let Some(bounds) = graphic.bounds() else {
            self.report(Diagnostic::data_error(
                ErrorCode::E305,
                format!("graphic {id}: {} without bounds", graphic.kind().class_name()),
            ));
            return;
        };
        if self.is_culled(&bounds.corners()) {
            trace!(id; "Shape outside bounding box");
            return;
        }

        let style = self.state.element_style();
        let transform = shaped.transform();

        if let (Shape::Rectangle, Some(image_id)) = (shaped.shape(), shaped.image_id()) {
            match self.document.image(image_id) {
                Some(href) => self.target.add_image(Image {
                    id: id.to_string(),
                    bounds,
                    href: href.to_string(),
                    style,
                }),
                None => self.report(Diagnostic::data_error(
                    ErrorCode::E300,
                    format!(
                        "graphic {id}: image {image_id} out of range, the document has {} image(s)",
                        self.document.images().len()
                    ),
                )),
            }
            return;
        }

        let corner_radius = graphic
            .style()
            .and_then(|style| style.stroke.as_ref())
            .and_then(|stroke| stroke.corner_radius);

        match shape::outline(shaped.shape(), bounds, shaped.shape_data(), corner_radius) {
            Ok(Outline::Rect { radius }) => self.target.add_rect(Rect {
                id: id.to_string(),
                bounds,
                radius,
                rotation: transform.rotation,
                style,
            }),
            Ok(Outline::Ellipse) => self.target.add_ellipse(Ellipse {
                id: id.to_string(),
                bounds,
                rotation: transform.rotation,
                style,
            }),
            Ok(Outline::Polygon(points)) => self.target.add_path(Path {
                id: id.to_string(),
                points,
                closed: true,
                transform,
                style,
            }),
            Ok(Outline::Cloud) => {
                let definition = Definition::NetworkCloud;
                self.state.require(definition.clone());
                self.target.add_glyph(Glyph {
                    id: id.to_string(),
                    bounds,
                    definition,
                    style,
                });
            }
            Err(OutlineError::UnknownShape(name)) => self.report(Diagnostic::data_error(
                ErrorCode::E301,
                format!("graphic {id}: unknown shape `{name}`"),
            )),
            Err(OutlineError::MissingShapeData) => self.report(Diagnostic::data_error(
                ErrorCode::E306,
                format!("graphic {id}: {} needs ShapeData ratio and width", shaped.shape()),
            )),
        }
    }

    fn line_graphic(&mut self, graphic: &Graphic, line: &LineGraphic) {
        let id = graphic.id();
        let points = line.points();
        if points.is_empty() {
            trace!(id; "Line without points");
            return;
        }
        if self.is_culled(points) {
            trace!(id; "Line outside bounding box");
            return;
        }
        if let Some(position) = line.orthogonal_bar_hint() {
            // Routing follows the stored points; the bar position is not used.
            debug!(id, position; "Ignoring orthogonal bar position");
        }

        self.state.styles_mut().set("fill", "none");
        self.target.add_path(Path {
            id: id.to_string(),
            points: points.to_vec(),
            closed: false,
            transform: Default::default(),
            style: self.state.element_style(),
        });
    }

    fn text(&mut self, graphic: &Graphic, run: &TextRun) {
        let Some(bounds) = graphic.bounds() else {
            self.report(Diagnostic::data_error(
                ErrorCode::E305,
                format!("graphic {}: text without bounds", graphic.id()),
            ));
            return;
        };
        if self.is_culled(&bounds.corners()) {
            trace!(id = graphic.id(); "Text outside bounding box");
            return;
        }

        // The decoder logs its own warnings.
        let (spans, warnings) = rtf::decode(&run.text).into_parts();
        self.diagnostics.extend(warnings);

        let block = text::layout(
            graphic.id(),
            bounds.inset(run.pad, run.vertical_pad),
            graphic.font(),
            &spans,
            self.fonts,
        );
        self.target.add_text(block);
    }
}
