//! Error codes for the graffle diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input container errors
//! - `E1xx` - Property-list structure errors
//! - `E2xx` - Document data errors
//! - `E3xx` - Render data errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input Container Errors (E0xx)
    // =========================================================================
    /// Unrecognized input container.
    ///
    /// The file is neither gzip-compressed XML nor plain XML text.
    E001,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Invalid XML.
    ///
    /// The container held text that is not well-formed XML.
    E100,

    /// Unknown node kind.
    ///
    /// The property list contains an element that is not one of `dict`,
    /// `array`, `key`, `string`, `integer`, `real`, `true`, `false`, `date`
    /// or `data`.
    E101,

    /// Unpaired dictionary entry.
    ///
    /// A `dict` holds a value without a preceding `key`, or a `key` without
    /// a following value.
    E102,

    /// Missing document root.
    ///
    /// The `plist` element is absent or its top-level value is not a `dict`.
    E103,

    // =========================================================================
    // Document Data Errors (E2xx)
    // =========================================================================
    /// Invalid coordinate string.
    ///
    /// Points must look like `{x, y}` and bounds like `{{x, y}, {w, h}}`.
    E200,

    /// Invalid number.
    ///
    /// A numeric field holds text that does not parse as a number.
    E201,

    /// Missing required field.
    ///
    /// A graphic lacks a field its class needs, such as `Class` or `Points`.
    E202,

    /// Wrong value kind.
    ///
    /// A field holds an array where a dict was expected, or similar.
    E203,

    // =========================================================================
    // Render Data Errors (E3xx)
    // =========================================================================
    /// Image index out of range.
    ///
    /// A graphic's `ImageID` does not name an entry of the `ImageList`.
    E300,

    /// Unknown shape.
    E301,

    /// Unknown graphic class.
    E302,

    /// Unknown arrow kind.
    ///
    /// The stick arrow marker is used instead.
    E303,

    /// Unknown stroke pattern.
    ///
    /// The `1 1` dash array is used instead.
    E304,

    /// Graphic without bounds.
    ///
    /// Shapes and text need a `Bounds` rectangle to be placed.
    E305,

    /// Missing shape data.
    ///
    /// Adjustable arrows need `ShapeData` with `ratio` and `width`.
    E306,

    /// Invalid rich text.
    ///
    /// The text run is not a readable RTF document.
    E307,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            ErrorCode::E305 => "E305",
            ErrorCode::E306 => "E306",
            ErrorCode::E307 => "E307",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unrecognized input container",
            ErrorCode::E100 => "invalid xml",
            ErrorCode::E101 => "unknown node kind",
            ErrorCode::E102 => "unpaired dictionary entry",
            ErrorCode::E103 => "missing document root",
            ErrorCode::E200 => "invalid coordinate string",
            ErrorCode::E201 => "invalid number",
            ErrorCode::E202 => "missing required field",
            ErrorCode::E203 => "wrong value kind",
            ErrorCode::E300 => "image index out of range",
            ErrorCode::E301 => "unknown shape",
            ErrorCode::E302 => "unknown graphic class",
            ErrorCode::E303 => "unknown arrow kind",
            ErrorCode::E304 => "unknown stroke pattern",
            ErrorCode::E305 => "graphic without bounds",
            ErrorCode::E306 => "missing shape data",
            ErrorCode::E307 => "invalid rich text",
        }
    }

    /// Returns `true` for codes that make a whole document unreadable.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ErrorCode::E001 | ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E303.to_string(), "E303");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E300.description(), "image index out of range");
        assert_eq!(ErrorCode::E101.description(), "unknown node kind");
    }

    #[test]
    fn test_structural_codes() {
        assert!(ErrorCode::E101.is_structural());
        assert!(!ErrorCode::E200.is_structural());
        assert!(!ErrorCode::E304.is_structural());
    }
}
