//! Color conversion - HEX, RGB and HSL.
//!
//! Catalog colors are plain strings and are not guaranteed to be well formed.
//! Parsing therefore returns a [`ColorParseError`] instead of panicking, and
//! callers decide how a malformed color is placed (see [`crate::sort`]).

use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in HSL space.
///
/// `h` is in whole degrees `0..360`, `s` and `l` are whole percentages `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. The leading `#` is optional.
    ///
    /// # Errors
    /// Returns an error if the string is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Uppercase `#RRGGBB` representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    #[must_use]
    pub const fn to_rgb_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(*self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Errors that can occur when parsing a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// Wrong number of hex digits (expected 6 without `#`).
    #[error("invalid hex color length: {0} (expected 6)")]
    InvalidLength(usize),
    /// Non-hex characters in the string.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Parse a hex color string into RGB channels.
///
/// # Errors
/// See [`Rgb::from_hex`].
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorParseError> {
    Rgb::from_hex(hex)
}

/// Convert RGB to HSL using the standard normalized-channel algorithm.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions,
    clippy::float_cmp
)]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    // Rounding can land exactly on 360 for hues just below red.
    let hue = ((h * 360.0).round() as u16) % 360;

    Hsl {
        h: hue,
        s: (s * 100.0).round().clamp(0.0, 100.0) as u8,
        l: (l * 100.0).round().clamp(0.0, 100.0) as u8,
    }
}

/// Parse a hex color straight to HSL, `None` when the color is malformed.
#[must_use]
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    Rgb::from_hex(hex).ok().map(rgb_to_hsl)
}
