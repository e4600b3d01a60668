//! Color handling for Tokenloom
//!
//! This module provides the [`Color`] type which wraps the sRGB color type from
//! the color crate. Token documents use CSS color syntax, and platforms need a
//! handful of fixed output notations (`#rrggbb`, `#aarrggbb`, `rgba(...)`), so
//! parsing goes through the color crate and formatting is done here.
//!
//! Ramp generation works in the HSL and HSV spaces, which are also provided.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use thiserror::Error;

/// Error returned when a string is not a valid CSS color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// An sRGB color with alpha.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgba8().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenloom_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_hex_string(), "#ff0000");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let dynamic = DynamicColor::from_str(color_str.trim()).map_err(|err| ColorError {
            input: color_str.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            color: dynamic.to_alpha_color::<Srgb>(),
        })
    }

    /// Creates a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_unit(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        let clamp = |c: f64| c.clamp(0.0, 1.0) as f32;
        Self {
            color: AlphaColor::new([clamp(r), clamp(g), clamp(b), clamp(a)]),
        }
    }

    fn unit(&self) -> [f64; 3] {
        let [r, g, b, _] = self.color.components;
        [f64::from(r), f64::from(g), f64::from(b)]
    }

    /// Creates an opaque color from hue (degrees), saturation and lightness
    /// (both `0.0..=1.0`).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let [r, g, b] = hue_to_rgb(hue, chroma, lightness - chroma / 2.0);
        Self::from_unit(r, g, b, 1.0)
    }

    /// Returns the hue (degrees), saturation and lightness of this color.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * lightness - 1.0).abs())
        };
        (hue_of(r, g, b, max, delta), saturation, lightness)
    }

    /// Creates an opaque color from hue (degrees), saturation and value
    /// (both `0.0..=1.0`).
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let chroma = value * saturation;
        let [r, g, b] = hue_to_rgb(hue, chroma, value - chroma);
        Self::from_unit(r, g, b, 1.0)
    }

    /// Returns the hue (degrees), saturation and value of this color.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        (hue_of(r, g, b, max, delta), saturation, max)
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenloom_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha.clamp(0.0, 1.0)),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the channels as 8-bit values in `[r, g, b, a]` order.
    pub fn rgba8(&self) -> [u8; 4] {
        self.color
            .components
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Relative luminance per WCAG, from `0.0` (black) to `1.0` (white).
    pub fn luminance(&self) -> f64 {
        let linear = |c: f64| {
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        let [r, g, b] = self.unit();
        0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
    }

    /// Formats as `#rrggbb`, ignoring alpha.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, _] = self.rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Formats as `#rrggbbaa`.
    pub fn to_hex8_string(&self) -> String {
        let [r, g, b, a] = self.rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// Formats as `#aarrggbb`, the notation XAML uses.
    pub fn to_argb_hex_string(&self) -> String {
        let [r, g, b, a] = self.rgba8();
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }

    /// Formats as `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.rgba8()[3] == 255 {
            self.to_hex_string()
        } else {
            self.to_hex8_string()
        }
    }

    /// Formats as `rgb(r, g, b)` when opaque and `rgba(r, g, b, a)` otherwise,
    /// with alpha rounded to two decimals.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenloom_core::color::Color;
    ///
    /// let blue = Color::new("#0078d4").unwrap();
    /// assert_eq!(blue.to_rgb_string(), "rgb(0, 120, 212)");
    /// assert_eq!(blue.with_alpha(0.5).to_rgb_string(), "rgba(0, 120, 212, 0.5)");
    /// ```
    pub fn to_rgb_string(&self) -> String {
        let [r, g, b, _] = self.rgba8();
        let alpha = (f64::from(self.alpha()) * 100.0).round() / 100.0;
        if alpha >= 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {alpha})")
        }
    }
}

fn hue_of(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let hue = if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    hue.rem_euclid(360.0)
}

fn hue_to_rgb(hue: f64, chroma: f64, offset: f64) -> [f64; 3] {
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    [r + offset, g + offset, b + offset]
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgba8(0, 0, 0, 255)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("rgb(255, 0, 0)").is_ok());
        assert!(Color::new("transparent").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.to_string().starts_with("invalid color `not-a-color`"));
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_hex_string(), "#000000");
    }

    #[test]
    fn test_hex_notations() {
        let color = Color::from_rgba8(0x11, 0x22, 0x33, 0x80);
        assert_eq!(color.to_hex_string(), "#112233");
        assert_eq!(color.to_hex8_string(), "#11223380");
        assert_eq!(color.to_argb_hex_string(), "#80112233");
        assert_eq!(color.to_hex(), "#11223380");
        assert_eq!(color.with_alpha(1.0).to_hex(), "#112233");
    }

    #[test]
    fn test_rgb_string() {
        let white = Color::new("white").unwrap();
        assert_eq!(white.to_rgb_string(), "rgb(255, 255, 255)");
        assert_eq!(white.with_alpha(0.3).to_rgb_string(), "rgba(255, 255, 255, 0.3)");
        assert_eq!(white.with_alpha(0.0).to_rgb_string(), "rgba(255, 255, 255, 0)");
    }

    #[test]
    fn test_transparent() {
        let transparent = Color::new("transparent").unwrap();
        assert_eq!(transparent.rgba8()[3], 0);
        assert_eq!(transparent.to_argb_hex_string(), "#00000000");
    }

    #[test]
    fn test_hsl_of_orange() {
        let orange = Color::new("#ff8c00").unwrap();
        let (hue, saturation, lightness) = orange.to_hsl();
        assert!(approx_eq!(f64, hue, 32.94, epsilon = 0.01));
        assert!(approx_eq!(f64, saturation, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, lightness, 0.5, epsilon = 1e-6));
    }

    #[test]
    fn test_hsv_of_gray() {
        let gray = Color::new("#808080").unwrap();
        let (hue, saturation, value) = gray.to_hsv();
        assert_eq!(hue, 0.0);
        assert_eq!(saturation, 0.0);
        assert!(approx_eq!(f64, value, 128.0 / 255.0, epsilon = 1e-6));
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(approx_eq!(f64, Color::new("white").unwrap().luminance(), 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, Color::new("black").unwrap().luminance(), 0.0, epsilon = 1e-6));
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("#ff0000").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }

    fn check_hsl_round_trip(r: u8, g: u8, b: u8) -> Result<(), TestCaseError> {
        let color = Color::from_rgba8(r, g, b, 255);
        let (h, s, l) = color.to_hsl();
        prop_assert_eq!(Color::from_hsl(h, s, l).rgba8(), color.rgba8());
        Ok(())
    }

    fn check_hsv_round_trip(r: u8, g: u8, b: u8) -> Result<(), TestCaseError> {
        let color = Color::from_rgba8(r, g, b, 255);
        let (h, s, v) = color.to_hsv();
        prop_assert_eq!(Color::from_hsv(h, s, v).rgba8(), color.rgba8());
        Ok(())
    }

    proptest! {
        #[test]
        fn hsl_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            check_hsl_round_trip(r, g, b)?;
        }

        #[test]
        fn hsv_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            check_hsv_round_trip(r, g, b)?;
        }
    }
}
