//! Color handling for graffle documents
//!
//! Graffle stores colors as `r`, `g`, `b` channel fractions in `0.0..=1.0`
//! (plus an alpha channel that is ignored here). SVG wants `#rrggbb`, so the
//! conversion lives in [`mk_hex`] and [`Rgb`].

use std::fmt;

/// Encodes one channel fraction as two lowercase hex digits.
///
/// The fraction is scaled by 256 and truncated, saturating at `ff`, so every
/// byte value `v` survives the trip through `v / 255.0`.
///
/// # Examples
///
/// ```
/// use graffle_core::color::mk_hex;
///
/// assert_eq!(mk_hex(0.0), "00");
/// assert_eq!(mk_hex(0.5), "80");
/// assert_eq!(mk_hex(1.0), "ff");
/// ```
pub fn mk_hex(channel: f64) -> String {
    let byte = (channel * 256.0).clamp(0.0, 255.0) as u8;
    format!("{byte:02x}")
}

/// An opaque RGB color with channel fractions in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    r: f64,
    g: f64,
    b: f64,
}

impl Rgb {
    /// Black, the default stroke and font color.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// White, the default fill color.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channel values, as found in RTF color tables.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Returns the six hex digits without the leading `#`.
    ///
    /// This form is used inside marker definition ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::color::Rgb;
    ///
    /// assert_eq!(Rgb::new(0.5, 0.5, 0.5).to_hex(), "808080");
    /// assert_eq!(Rgb::from_bytes(75, 75, 75).to_hex(), "4b4b4b");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{}{}{}", mk_hex(self.r), mk_hex(self.g), mk_hex(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mk_hex_extremes() {
        assert_eq!(mk_hex(0.0), "00");
        assert_eq!(mk_hex(1.0), "ff");
    }

    #[test]
    fn test_mk_hex_byte_fractions() {
        assert_eq!(mk_hex(1.0 / 255.0), "01");
        assert_eq!(mk_hex(15.0 / 255.0), "0f");
        assert_eq!(mk_hex(254.0 / 255.0), "fe");
    }

    #[test]
    fn test_mk_hex_out_of_range_saturates() {
        assert_eq!(mk_hex(-0.2), "00");
        assert_eq!(mk_hex(3.0), "ff");
    }

    #[test]
    fn test_from_bytes_roundtrips_every_byte() {
        for v in 0..=255u8 {
            let color = Rgb::from_bytes(v, v, v);
            assert_eq!(color.to_hex(), format!("{v:02x}{v:02x}{v:02x}"));
        }
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
        assert_eq!(Rgb::default().to_string(), "#000000");
        assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_string(), "#ff8000");
    }
}
