//! Style resolution.
//!
//! Turns a graphic's [`Style`] record into CSS-like properties on the
//! innermost scope of the page's [`CascadingStyles`], and records the
//! marker and filter definitions those properties refer to.

use graffle_core::{
    color::Rgb,
    document::{ArrowKind, FillStyle, StrokeStyle, Style},
    style::CascadingStyles,
};
use graffle_parser::error::{Diagnostic, ErrorCode};

use crate::export::{Definition, RequiredDefinitions};

/// Properties of the root scope of every page.
pub const BASE_STYLE: [(&str, &str); 3] = [
    ("fill", "#fff"),
    ("stroke", "#000000"),
    ("stroke-width", "1.000000px"),
];

/// Per-page render state: the style stack and the definitions requested so
/// far. A fresh state is created for every page.
#[derive(Debug, Clone)]
pub struct RenderState {
    styles: CascadingStyles,
    required: RequiredDefinitions,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    /// Creates a state holding only the base scope.
    pub fn new() -> Self {
        let mut styles = CascadingStyles::new();
        styles.push_scope();
        for (key, value) in BASE_STYLE {
            styles.set(key, value);
        }
        Self {
            styles,
            required: RequiredDefinitions::new(),
        }
    }

    pub fn styles(&self) -> &CascadingStyles {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut CascadingStyles {
        &mut self.styles
    }

    pub fn required(&self) -> &RequiredDefinitions {
        &self.required
    }

    /// Records a definition the page needs.
    pub fn require(&mut self, definition: Definition) {
        self.required.insert(definition);
    }

    /// Style string of the innermost scope, for an emitted element.
    pub fn element_style(&self) -> String {
        self.styles.scope_style().to_string()
    }

    /// Style string of every open scope, for a layer.
    pub fn layer_style(&self) -> String {
        self.styles.to_string()
    }

    /// Applies `style` to the innermost scope.
    ///
    /// `owner` names the graphic in diagnostics. Unknown arrow kinds and
    /// dash patterns fall back to a default and are returned as warnings.
    pub fn apply(&mut self, style: &Style, owner: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if let Some(fill) = &style.fill {
            self.apply_fill(fill);
        }
        if let Some(stroke) = &style.stroke {
            self.apply_stroke(stroke, owner, &mut diagnostics);
        }
        // Documents omit the shadow entry for the default, visible shadow.
        self.apply_shadow(style.shadow.as_ref().is_none_or(|shadow| shadow.draws));
        diagnostics
    }

    fn apply_fill(&mut self, fill: &FillStyle) {
        if !fill.draws {
            self.styles.set("fill", "none");
        } else if let Some(color) = fill.color {
            self.styles.set("fill", color.to_string());
        }
    }

    fn apply_stroke(&mut self, stroke: &StrokeStyle, owner: &str, diagnostics: &mut Vec<Diagnostic>) {
        if stroke.draws {
            self.styles
                .set("stroke", stroke.color.unwrap_or(Rgb::BLACK).to_string());
        } else {
            self.styles.set("stroke", "none");
        }

        if let Some(width) = stroke.width {
            self.styles.set("stroke-width", format!("{width:.6}px"));
        }

        if let Some(head) = &stroke.head_arrow {
            self.apply_arrow(head, ArrowEnd::Head, owner, diagnostics);
        }
        if let Some(tail) = &stroke.tail_arrow {
            self.apply_arrow(tail, ArrowEnd::Tail, owner, diagnostics);
        }

        if let Some(pattern) = stroke.pattern {
            let dashes = match pattern {
                1 => "3 3",
                2 => "5 5",
                other => {
                    diagnostics.push(Diagnostic::data_error(
                        ErrorCode::E304,
                        format!("graphic {owner}: unknown stroke pattern `{other}`"),
                    ));
                    "1 1"
                }
            };
            self.styles.set("stroke-dasharray", dashes);
        }
    }

    fn apply_arrow(
        &mut self,
        kind: &ArrowKind,
        end: ArrowEnd,
        owner: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let property = end.property();
        let definition = match (end, kind) {
            (_, ArrowKind::NoArrow) => {
                self.styles.set(property, "none");
                return;
            }
            (ArrowEnd::Head, ArrowKind::FilledArrow) => {
                let (color, width) = self.current_stroke();
                Definition::FilledArrowEnd { color, width }
            }
            (ArrowEnd::Tail, ArrowKind::FilledArrow) => {
                let (color, width) = self.current_stroke();
                Definition::FilledArrowStart { color, width }
            }
            (_, ArrowKind::Bar) => Definition::Bar,
            (ArrowEnd::Tail, ArrowKind::CrowBall) => Definition::CrowBall,
            (_, ArrowKind::StickArrow) => end.stick(),
            (_, other) => {
                diagnostics.push(Diagnostic::data_error(
                    ErrorCode::E303,
                    format!("graphic {owner}: unknown {} arrow `{other}`", end.name()),
                ));
                end.stick()
            }
        };
        self.styles.set(property, definition.reference());
        self.require(definition);
    }

    /// The stroke color as six hex digits and the stroke width currently in
    /// effect. A stroke that is not a color, such as `none`, keys as black.
    fn current_stroke(&self) -> (String, String) {
        let color = self
            .styles
            .get("stroke")
            .and_then(|stroke| stroke.strip_prefix('#'))
            .unwrap_or("000000")
            .to_string();
        let width = self
            .styles
            .get("stroke-width")
            .unwrap_or(BASE_STYLE[2].1)
            .to_string();
        (color, width)
    }

    fn apply_shadow(&mut self, draws: bool) {
        if draws {
            let definition = Definition::DropShadow;
            self.styles.set("filter", definition.reference());
            self.require(definition);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowEnd {
    Head,
    Tail,
}

impl ArrowEnd {
    fn property(self) -> &'static str {
        match self {
            Self::Head => "marker-end",
            Self::Tail => "marker-start",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Tail => "tail",
        }
    }

    fn stick(self) -> Definition {
        match self {
            Self::Head => Definition::StickArrowEnd,
            Self::Tail => Definition::StickArrowStart,
        }
    }
}
