//! Geometric primitives and point-set transforms.
//!
//! Graffle documents place every graphic in page coordinates, using the same
//! convention as SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Bounds`] - An axis-aligned rectangle stored as origin and extent
//! - [`find_centre`], [`h_flip_points`], [`v_flip_points`], [`rotate_points`] -
//!   transforms applied to path-based shapes
//! - [`ClipBox`], [`out_of_bounding_box`] - the clip rectangle and the test
//!   used for bounding-box culling

/// Angles are rounded to seven decimal places before the whole and half turn
/// checks, so `359.99999999` is treated as a full turn.
const ANGLE_ROUNDING: f64 = 1e7;

/// A 2D point in page coordinates.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle given as origin and extent.
///
/// Graffle serializes bounds as `{{x, y}, {w, h}}`, so the origin/extent
/// form is the canonical one here. Corner coordinates are derived on demand
/// with [`Bounds::min_point`] and [`Bounds::max_point`].
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{Bounds, Point};
/// let bounds = Bounds::from_origin_extent(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(bounds.max_point(), Point::new(110.0, 70.0));
/// assert_eq!(bounds.center(), Point::new(60.0, 45.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates bounds from the top-left origin and the extent.
    pub fn from_origin_extent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates bounds spanning two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the top-left corner
    pub fn min_point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the bottom-right corner
    pub fn max_point(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Returns the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the two opposite corners, the point set used for culling.
    pub fn corners(&self) -> [Point; 2] {
        [self.min_point(), self.max_point()]
    }

    /// Shrinks the bounds by `dx` on the left and right and `dy` on the top
    /// and bottom.
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }
}

/// Finds the centre of a point set's bounding box.
///
/// This is the midpoint of the extremes, not the centroid. An empty set has
/// its centre at the origin.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{find_centre, Point};
/// let pts = [Point::new(-4.0, -1.0), Point::new(0.0, 1.0)];
/// assert_eq!(find_centre(&pts), Point::new(-2.0, 0.0));
/// ```
pub fn find_centre(points: &[Point]) -> Point {
    let Some(first) = points.first() else {
        return Point::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    Point::new(0.5 * (max_x + min_x), 0.5 * (max_y + min_y))
}

/// Mirrors points across the vertical line through `centre`.
///
/// When `centre` is `None` the point set's own centre is used.
pub fn h_flip_points(points: &[Point], centre: Option<Point>) -> Vec<Point> {
    let c = centre.unwrap_or_else(|| find_centre(points));
    points
        .iter()
        .map(|p| Point::new(c.x - (p.x - c.x), p.y))
        .collect()
}

/// Mirrors points across the horizontal line through `centre`.
///
/// When `centre` is `None` the point set's own centre is used.
pub fn v_flip_points(points: &[Point], centre: Option<Point>) -> Vec<Point> {
    let c = centre.unwrap_or_else(|| find_centre(points));
    points
        .iter()
        .map(|p| Point::new(p.x, c.y - (p.y - c.y)))
        .collect()
}

/// Rotates points by `angle` degrees about `centre`.
///
/// Angles that are whole turns return the input unchanged. Half turns are
/// computed as a vertical then horizontal flip, which keeps the coordinates
/// exact. Both checks round the angle to seven decimal places first.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{rotate_points, Point};
/// let pts = [Point::new(-1.0, 1.0), Point::new(1.0, 1.0)];
/// assert_eq!(rotate_points(&pts, 360.0, None), pts.to_vec());
/// assert_eq!(
///     rotate_points(&pts, 180.0, None),
///     vec![Point::new(1.0, 1.0), Point::new(-1.0, 1.0)],
/// );
/// ```
pub fn rotate_points(points: &[Point], angle: f64, centre: Option<Point>) -> Vec<Point> {
    let c = centre.unwrap_or_else(|| find_centre(points));

    if is_multiple_of(angle, 360.0) {
        return points.to_vec();
    }
    if is_multiple_of(angle, 180.0) {
        return h_flip_points(&v_flip_points(points, Some(c)), Some(c));
    }

    let (sin, cos) = angle.to_radians().sin_cos();
    points
        .iter()
        .map(|p| {
            let (rel_x, rel_y) = (p.x - c.x, p.y - c.y);
            Point::new(
                c.x + (cos * rel_x - sin * rel_y),
                c.y + (sin * rel_x + cos * rel_y),
            )
        })
        .collect()
}

/// A clip rectangle kept as its two corners.
///
/// Unlike [`Bounds`], the far corner is stored as given rather than rebuilt
/// from origin plus extent, so points on the edge compare exactly.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{ClipBox, Point};
/// let clip = ClipBox::from_corners(Point::new(5.2, 1.1), Point::new(1.1, 5.2));
/// assert_eq!(clip.min_point(), Point::new(1.1, 1.1));
/// assert!(clip.contains(Point::new(5.2, 5.2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBox {
    min: Point,
    max: Point,
}

impl ClipBox {
    /// Creates a clip box spanning two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn min_point(&self) -> Point {
        self.min
    }

    pub fn max_point(&self) -> Point {
        self.max
    }

    /// Returns `true` unless `point` lies strictly outside on either axis.
    pub fn contains(&self, point: Point) -> bool {
        !(point.x < self.min.x
            || point.x > self.max.x
            || point.y < self.min.y
            || point.y > self.max.y)
    }

    /// The same rectangle as origin and extent.
    pub fn to_bounds(&self) -> Bounds {
        Bounds::from_corners(self.min, self.max)
    }
}

/// Returns `true` if any point lies strictly outside `bounding_box` on
/// either axis.
///
/// A missing bounding box never excludes anything.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{out_of_bounding_box, ClipBox, Point};
/// let pts = [Point::new(-1.0, -1.0), Point::new(1.0, 1.0)];
/// let inside = ClipBox::from_corners(Point::new(-2.0, -3.0), Point::new(3.0, 4.0));
/// let clipped = ClipBox::from_corners(Point::new(0.0, -3.0), Point::new(3.0, 4.0));
///
/// assert!(!out_of_bounding_box(&pts, None));
/// assert!(!out_of_bounding_box(&pts, Some(&inside)));
/// assert!(out_of_bounding_box(&pts, Some(&clipped)));
/// ```
pub fn out_of_bounding_box(points: &[Point], bounding_box: Option<&ClipBox>) -> bool {
    let Some(clip) = bounding_box else {
        return false;
    };
    points.iter().any(|p| !clip.contains(*p))
}

fn is_multiple_of(angle: f64, modulus: f64) -> bool {
    let rounded = (angle.rem_euclid(modulus) * ANGLE_ROUNDING).round() / ANGLE_ROUNDING;
    // Just below the modulus rounds up to the modulus itself.
    rounded == 0.0 || rounded == modulus
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn points_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec(point_strategy(), 1..12)
    }

    fn angle_strategy() -> impl Strategy<Value = f64> {
        -720.0f64..720.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Rotating forward then backward about the same centre restores the points.
    fn check_rotate_roundtrip(points: Vec<Point>, angle: f64) -> Result<(), TestCaseError> {
        let centre = find_centre(&points);
        let rotated = rotate_points(&points, angle, Some(centre));
        let restored = rotate_points(&rotated, -angle, Some(centre));

        for (r, p) in restored.iter().zip(&points) {
            prop_assert!(approx_eq!(f64, r.x(), p.x(), epsilon = 1e-7));
            prop_assert!(approx_eq!(f64, r.y(), p.y(), epsilon = 1e-7));
        }
        Ok(())
    }

    /// Flipping twice about the same centre is the identity.
    fn check_double_flip_is_identity(points: Vec<Point>) -> Result<(), TestCaseError> {
        let centre = find_centre(&points);
        let twice = h_flip_points(&h_flip_points(&points, Some(centre)), Some(centre));
        for (t, p) in twice.iter().zip(&points) {
            prop_assert!(approx_eq!(f64, t.x(), p.x(), epsilon = 1e-9));
            prop_assert_eq!(t.y(), p.y());
        }
        Ok(())
    }

    /// A box spanning the points' own extremes never excludes them.
    fn check_hull_box_contains_points(points: Vec<Point>) -> Result<(), TestCaseError> {
        let (mut lo, mut hi) = (points[0], points[0]);
        for p in &points {
            lo = Point::new(lo.x().min(p.x()), lo.y().min(p.y()));
            hi = Point::new(hi.x().max(p.x()), hi.y().max(p.y()));
        }
        let bb = ClipBox::from_corners(lo, hi);
        prop_assert!(!out_of_bounding_box(&points, Some(&bb)));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn rotate_roundtrip(points in points_strategy(), angle in angle_strategy()) {
            check_rotate_roundtrip(points, angle)?;
        }

        #[test]
        fn double_flip_is_identity(points in points_strategy()) {
            check_double_flip_is_identity(points)?;
        }

        #[test]
        fn hull_box_contains_points(points in points_strategy()) {
            check_hull_box_contains_points(points)?;
        }
    }
}
