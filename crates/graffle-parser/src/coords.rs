//! Parsers for graffle coordinate strings.
//!
//! Points are stored as `{x, y}` and rectangles as `{{x, y}, {w, h}}`, with
//! arbitrary spacing and any float syntax.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{delimited, separated_pair},
    error::ModalResult,
};

use graffle_core::geometry::{Bounds, Point};

use crate::error::{Diagnostic, ErrorCode};

fn number(input: &mut &str) -> ModalResult<f64> {
    delimited(multispace0, float, multispace0).parse_next(input)
}

fn pair(input: &mut &str) -> ModalResult<(f64, f64)> {
    delimited(
        (multispace0, '{'),
        separated_pair(number, ',', number),
        ('}', multispace0),
    )
    .parse_next(input)
}

fn rect(input: &mut &str) -> ModalResult<((f64, f64), (f64, f64))> {
    delimited(
        (multispace0, '{'),
        separated_pair(pair, ',', pair),
        ('}', multispace0),
    )
    .parse_next(input)
}

/// Parses a point string such as `{12.5, -3}`.
///
/// # Errors
///
/// Returns an `E200` data error naming the offending text.
///
/// # Example
///
/// ```
/// # use graffle_parser::coords::parse_point;
/// # use graffle_core::geometry::Point;
/// assert_eq!(parse_point("{756, 553}").unwrap(), Point::new(756.0, 553.0));
/// ```
pub fn parse_point(text: &str) -> Result<Point, Diagnostic> {
    pair.parse(text)
        .map(Point::from)
        .map_err(|err| invalid(text, "{x, y}", &err.to_string()))
}

/// Parses a bounds string such as `{{0, 0}, {100, 50}}` as origin and extent.
///
/// # Errors
///
/// Returns an `E200` data error naming the offending text.
///
/// # Example
///
/// ```
/// # use graffle_parser::coords::parse_bounds;
/// let bounds = parse_bounds("{{10, 20}, {100, 50}}").unwrap();
/// assert_eq!(bounds.width(), 100.0);
/// assert_eq!(bounds.max_point().y(), 70.0);
/// ```
pub fn parse_bounds(text: &str) -> Result<Bounds, Diagnostic> {
    rect.parse(text)
        .map(|((x, y), (w, h))| Bounds::from_origin_extent(x, y, w, h))
        .map_err(|err| invalid(text, "{{x, y}, {w, h}}", &err.to_string()))
}

/// Parses a size string such as `{612, 792}`.
pub fn parse_size(text: &str) -> Result<(f64, f64), Diagnostic> {
    pair.parse(text)
        .map_err(|err| invalid(text, "{w, h}", &err.to_string()))
}

fn invalid(text: &str, expected: &str, detail: &str) -> Diagnostic {
    Diagnostic::data_error(
        ErrorCode::E200,
        format!("invalid coordinate string `{text}`"),
    )
    .with_help(format!("expected `{expected}`\n{detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("{0,0}").unwrap(), Point::new(0.0, 0.0));
        assert_eq!(parse_point(" { -1.5 , 2e1 } ").unwrap(), Point::new(-1.5, 20.0));
    }

    #[test]
    fn test_parse_bounds() {
        let bounds = parse_bounds("{{0, 0}, {756, 553}}").unwrap();
        assert_eq!(bounds, Bounds::from_origin_extent(0.0, 0.0, 756.0, 553.0));

        let bounds = parse_bounds("{{-10.25,4},{3,   7.5}}").unwrap();
        assert_eq!(bounds, Bounds::from_origin_extent(-10.25, 4.0, 3.0, 7.5));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("{612, 792}").unwrap(), (612.0, 792.0));
    }

    #[test]
    fn test_invalid_point() {
        let err = parse_point("{1, x}").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E200));
        assert!(err.severity().is_warning());
        assert_eq!(err.message(), "invalid coordinate string `{1, x}`");
    }

    #[test]
    fn test_trailing_input_is_rejected() {
        assert!(parse_point("{1, 2} {3, 4}").is_err());
        assert!(parse_bounds("{1, 2}").is_err());
        assert!(parse_point("").is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn coordinate_strategy() -> impl Strategy<Value = f64> {
        -10000.0f64..10000.0
    }

    fn spacing_strategy() -> impl Strategy<Value = String> {
        "[ \t]{0,3}"
    }

    proptest! {
        #[test]
        fn point_with_any_spacing(
            x in coordinate_strategy(),
            y in coordinate_strategy(),
            pad in spacing_strategy(),
        ) {
            let text = format!("{pad}{{{pad}{x}{pad},{pad}{y}{pad}}}{pad}");
            let point = parse_point(&text).map_err(|err| TestCaseError::fail(err.message().to_string()))?;
            prop_assert!(approx_eq!(f64, point.x(), x, ulps = 2));
            prop_assert!(approx_eq!(f64, point.y(), y, ulps = 2));
        }

        #[test]
        fn bounds_keep_origin_and_extent(
            x in coordinate_strategy(),
            y in coordinate_strategy(),
            w in 0.0f64..5000.0,
            h in 0.0f64..5000.0,
        ) {
            let bounds = parse_bounds(&format!("{{{{{x}, {y}}}, {{{w}, {h}}}}}"))
                .map_err(|err| TestCaseError::fail(err.message().to_string()))?;
            prop_assert!(approx_eq!(f64, bounds.min_point().x(), x, ulps = 2));
            prop_assert!(approx_eq!(f64, bounds.min_point().y(), y, ulps = 2));
            prop_assert!(approx_eq!(f64, bounds.width(), w, epsilon = 1e-9));
            prop_assert!(approx_eq!(f64, bounds.height(), h, epsilon = 1e-9));
        }
    }
}
