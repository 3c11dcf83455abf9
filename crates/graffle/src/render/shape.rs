//! Outlines of the built-in shapes.
//!
//! Every outline is expressed in the shape's own bounds `(x, y, w, h)`.
//! Path shapes are plain point lists; flips and rotation are applied later by
//! the target from the graphic's [`PathTransform`].
//!
//! [`PathTransform`]: graffle_core::document::PathTransform

use graffle_core::{
    document::{Shape, ShapeData},
    geometry::{Bounds, Point},
};

/// What a shaped graphic draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// A rectangle with optional `(rx, ry)` corner radii.
    Rect { radius: Option<(f64, f64)> },
    Ellipse,
    /// A closed polygon.
    Polygon(Vec<Point>),
    /// The shared cloud glyph.
    Cloud,
}

/// Why a shape has no outline.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineError {
    UnknownShape(String),
    /// An adjustable arrow without its `ratio` and `width` parameters.
    MissingShapeData,
}

/// Computes the outline of `shape` within `bounds`.
///
/// `corner_radius` is the stroke's corner radius and only affects plain
/// rectangles.
pub fn outline(
    shape: &Shape,
    bounds: Bounds,
    shape_data: Option<&ShapeData>,
    corner_radius: Option<f64>,
) -> Result<Outline, OutlineError> {
    let outline = match shape {
        Shape::Rectangle => Outline::Rect {
            radius: corner_radius.map(|r| (r, r)),
        },
        Shape::RoundRect => Outline::Rect {
            radius: round_rect_radius(bounds.width(), bounds.height()),
        },
        Shape::Circle => Outline::Ellipse,
        Shape::HorizontalTriangle => Outline::Polygon(horizontal_triangle(bounds)),
        Shape::RightTriangle => Outline::Polygon(right_triangle(bounds)),
        Shape::VerticalTriangle => Outline::Polygon(vertical_triangle(bounds)),
        Shape::Diamond => Outline::Polygon(diamond(bounds)),
        Shape::AdjustableArrow => {
            let (ratio, neck) = shape_data
                .and_then(|data| data.ratio.zip(data.width))
                .ok_or(OutlineError::MissingShapeData)?;
            Outline::Polygon(adjustable_arrow(bounds, ratio, neck))
        }
        Shape::Cloud => Outline::Cloud,
        Shape::Unknown(name) => return Err(OutlineError::UnknownShape(name.clone())),
    };
    Ok(outline)
}

/// Radii that turn the short sides of a `w` by `h` rectangle into arcs.
///
/// Taller-than-wide rectangles have no real solution and get square
/// corners.
fn round_rect_radius(width: f64, height: f64) -> Option<(f64, f64)> {
    let radicand = width * width - height * height;
    if radicand < 0.0 {
        return None;
    }
    Some(((width - radicand.sqrt()) / 2.0, height / 2.0))
}

fn horizontal_triangle(b: Bounds) -> Vec<Point> {
    let (x, y, w, h) = (b.x(), b.y(), b.width(), b.height());
    vec![
        Point::new(x, y),
        Point::new(x + w, y + h / 2.0),
        Point::new(x, y + h),
    ]
}

fn right_triangle(b: Bounds) -> Vec<Point> {
    let (x, y, w, h) = (b.x(), b.y(), b.width(), b.height());
    vec![
        Point::new(x, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ]
}

fn vertical_triangle(b: Bounds) -> Vec<Point> {
    let (x, y, w, h) = (b.x(), b.y(), b.width(), b.height());
    vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w / 2.0, y + h),
    ]
}

fn diamond(b: Bounds) -> Vec<Point> {
    let (x, y, w, h) = (b.x(), b.y(), b.width(), b.height());
    let (mid_x, mid_y) = (x + w / 2.0, y + h / 2.0);
    vec![
        Point::new(x, mid_y),
        Point::new(mid_x, y + h),
        Point::new(x + w, mid_y),
        Point::new(mid_x, y),
    ]
}

/// A right-pointing arrow whose shaft is `ratio` of the height and whose
/// head is `neck` long.
fn adjustable_arrow(b: Bounds, ratio: f64, neck: f64) -> Vec<Point> {
    let (x, y, w, h) = (b.x(), b.y(), b.width(), b.height());
    let inset = h * (1.0 - ratio) / 2.0;
    let neck_x = x + w - neck;
    vec![
        Point::new(x, y + inset),
        Point::new(neck_x, y + inset),
        Point::new(neck_x, y),
        Point::new(x + w, y + h / 2.0),
        Point::new(neck_x, y + h),
        Point::new(neck_x, y + h - inset),
        Point::new(x, y + h - inset),
    ]
}
