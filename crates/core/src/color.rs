//! The `Rgba` color type used throughout the engine.
//!
//! Red, green and blue are `f64` values on the 0–255 byte scale; alpha is on
//! the 0–1 scale. Components are stored unclamped: the field accumulates
//! color additively (several overlapping sources push a channel past 255),
//! and clamping only happens when a color is quantized for output.
//!
//! Serializes as a hex string `"#rrggbb"` (alpha is fixed at 1 on parse);
//! this is the format the configuration and CLI accept.

use crate::error::SimError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color: rgb on the 0–255 scale, alpha on 0–1, all `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(255.0, 255.0, 255.0);

    /// Creates a color from all four components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color (alpha = 1).
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    /// The parsed color is opaque.
    ///
    /// Returns `SimError::InvalidColor` if the input is not a valid 6-digit
    /// hex color.
    pub fn from_hex(hex: &str) -> Result<Rgba, SimError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Length is in bytes; slicing below is only safe on ASCII input.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SimError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| SimError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| SimError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| SimError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Rgba::rgb(r as f64, g as f64, b as f64))
    }

    /// Converts the color to a hex string like `"#rrggbb"`, dropping alpha.
    ///
    /// Components are clamped and rounded to 8-bit.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes to an RGBA8 pixel, clamping each channel.
    pub fn to_bytes(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 255.0)).round() as u8;
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), a]
    }

    /// Adds `weight × other`'s rgb channels into this color in place.
    ///
    /// Alpha is untouched: the accumulator keeps whatever alpha it started
    /// with. This is the additive light mixing used for node colors.
    pub fn accumulate(&mut self, other: Rgba, weight: f64) {
        self.r += other.r * weight;
        self.g += other.g * weight;
        self.b += other.b * weight;
    }

    /// Channel-wise rgb mean of a set of colors, with alpha 1.
    ///
    /// Returns opaque black for an empty slice.
    pub fn mean(colors: &[Rgba]) -> Rgba {
        if colors.is_empty() {
            return Rgba::rgb(0.0, 0.0, 0.0);
        }
        let n = colors.len() as f64;
        let sum = colors.iter().fold((0.0, 0.0, 0.0), |(r, g, b), c| {
            (r + c.r, g + c.g, b + c.b)
        });
        Rgba::rgb(sum.0 / n, sum.1 / n, sum.2 / n)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
