//! SVG elements for drawing primitives.

use svg::{Node, node::element as svg_element};

use crate::export::{Ellipse, Glyph, Image, Path, Rect, TextAnchor, TextBlock};

/// Sets the `style` attribute unless `style` is empty.
pub(super) fn with_style<T: Node>(mut element: T, style: &str) -> T {
    if !style.is_empty() {
        element.assign("style", style);
    }
    element
}

fn with_id<T: Node>(mut element: T, id: &str) -> T {
    if !id.is_empty() {
        element.assign("id", id);
    }
    element
}

fn rotate_about_centre<T: Node>(mut element: T, rotation: Option<f64>, cx: f64, cy: f64) -> T {
    if let Some(angle) = rotation {
        element.assign("transform", format!("rotate({angle} {cx} {cy})"));
    }
    element
}

pub(super) fn rect(rect: &Rect) -> svg_element::Rectangle {
    let bounds = rect.bounds;
    let mut element = svg_element::Rectangle::new()
        .set("x", bounds.x())
        .set("y", bounds.y())
        .set("width", bounds.width())
        .set("height", bounds.height());
    if let Some((rx, ry)) = rect.radius {
        element = element.set("rx", rx).set("ry", ry);
    }
    let centre = bounds.center();
    let element = rotate_about_centre(element, rect.rotation, centre.x(), centre.y());
    with_style(with_id(element, &rect.id), &rect.style)
}

pub(super) fn ellipse(ellipse: &Ellipse) -> svg_element::Ellipse {
    let centre = ellipse.bounds.center();
    let (rx, ry) = ellipse.radii();
    let element = svg_element::Ellipse::new()
        .set("cx", centre.x())
        .set("cy", centre.y())
        .set("rx", rx)
        .set("ry", ry);
    let element = rotate_about_centre(element, ellipse.rotation, centre.x(), centre.y());
    with_style(with_id(element, &ellipse.id), &ellipse.style)
}

/// Path data `M x,y L x,y ...`, closed with `z` when requested.
pub(super) fn path_data(points: &[graffle_core::geometry::Point], closed: bool) -> String {
    let mut data = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { "M" } else { " L" };
        data.push_str(&format!("{command} {},{}", point.x(), point.y()));
    }
    if closed {
        data.push_str(" z");
    }
    data
}

pub(super) fn path(path: &Path) -> svg_element::Path {
    let element =
        svg_element::Path::new().set("d", path_data(&path.resolved_points(), path.closed));
    with_style(with_id(element, &path.id), &path.style)
}

pub(super) fn image(image: &Image) -> svg_element::Image {
    let bounds = image.bounds;
    let element = svg_element::Image::new()
        .set("x", bounds.x())
        .set("y", bounds.y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("xlink:href", image.href.as_str());
    with_style(with_id(element, &image.id), &image.style)
}

pub(super) fn glyph(glyph: &Glyph) -> svg_element::Group {
    let (sx, sy) = glyph.scale();
    let element = svg_element::Group::new()
        .set(
            "transform",
            format!(
                "translate({},{}) scale({sx},{sy})",
                glyph.bounds.x(),
                glyph.bounds.y()
            ),
        )
        .add(svg_element::Use::new().set("xlink:href", format!("#{}", glyph.definition.id())));
    with_style(with_id(element, &glyph.id), &glyph.style)
}

/// A `<text>` element with one `<tspan>` per line.
///
/// The element ID is `<id>_text`; lines are numbered from one as
/// `<id>_line<n>`.
pub(super) fn text(block: &TextBlock) -> svg_element::Text {
    let element = svg_element::Text::new("")
        .set("id", format!("{}_text", block.id))
        .set("x", block.origin.x())
        .set("y", block.origin.y());
    let mut element = with_style(element, &block.style);

    for (n, line) in block.lines.iter().enumerate() {
        let mut tspan = svg_element::TSpan::new(line.text.as_str())
            .set("id", format!("{}_line{}", block.id, n + 1))
            .set("x", line.position.x())
            .set("y", line.position.y());
        if line.anchor != TextAnchor::Start {
            tspan = tspan.set("text-anchor", line.anchor.as_str());
        }
        for (name, value) in &line.attributes {
            tspan = tspan.set(*name, value.as_str());
        }
        element.append(tspan);
    }
    element
}
