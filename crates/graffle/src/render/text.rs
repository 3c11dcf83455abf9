//! Text block layout.

use graffle_core::{
    color::Rgb,
    document::FontInfo,
    geometry::{Bounds, Point},
};
use graffle_parser::rtf::{TextAlign, TextSpan};

use crate::{
    config::FontConfig,
    export::{TextAnchor, TextBlock, TextLine},
};

/// Style string for a text element from the graphic's font record.
///
/// Text is filled and thinly stroked in the font color. Family and size are
/// only written when the record names them.
pub fn font_style(font: Option<&FontInfo>, fonts: &FontConfig) -> String {
    let color = font.and_then(|f| f.color).unwrap_or(Rgb::BLACK);
    let mut parts = vec![
        format!("fill:{color}"),
        format!("stroke:{color}"),
        "stroke-width:0.1px".to_string(),
    ];
    if let Some(family) = font.and_then(|f| f.font.as_deref()) {
        parts.push(format!("font-family:{}", fonts.substitute(family)));
    }
    if let Some(size) = font.and_then(|f| f.size) {
        parts.push(format!("font-size:{}px", size.trunc()));
    }
    parts.join(";")
}

/// Lays out `spans` as lines centred vertically in `bounds`.
///
/// Every line advances the baseline by its own font size. Lines without a
/// size use the graphic's font size, truncated to whole pixels, or the
/// configured default.
pub fn layout(
    id: &str,
    bounds: Bounds,
    font: Option<&FontInfo>,
    spans: &[TextSpan],
    fonts: &FontConfig,
) -> TextBlock {
    let fallback = font
        .and_then(|f| f.size)
        .map_or(fonts.default_size(), f64::trunc);
    let line_height = |span: &TextSpan| span.style.font_size.unwrap_or(fallback);

    let total_height: f64 = spans.iter().map(line_height).sum();
    let mut baseline = bounds.y() + bounds.height() / 2.0 - total_height / 2.0;

    let lines = spans
        .iter()
        .map(|span| {
            baseline += line_height(span);
            let (x, anchor) = match span.style.text_align {
                Some(TextAlign::Center) => {
                    (bounds.x() + bounds.width() / 2.0, TextAnchor::Middle)
                }
                Some(TextAlign::Right) => (bounds.x() + bounds.width(), TextAnchor::End),
                _ => (bounds.x(), TextAnchor::Start),
            };
            TextLine {
                text: span.text.clone(),
                position: Point::new(x, baseline),
                anchor,
                attributes: span.style.attributes(),
            }
        })
        .collect();

    TextBlock {
        id: id.to_string(),
        origin: bounds.min_point(),
        style: font_style(font, fonts),
        lines,
    }
}
