/// Colors and the three-stop gradient shared by the background field and the QR modules.
///
/// Colors are kept as typed 24-bit RGB values and only parsed from, or formatted
/// to, `#RRGGBB` strings at the edges of the crate.
use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// A 24-bit RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` string (hex digits in either case).
    ///
    /// # Example
    ///
    /// ```rust
    /// use qishape::color::Rgb;
    ///
    /// let c = Rgb::from_hex("#FF0066").unwrap();
    /// assert_eq!(c, Rgb::new(255, 0, 102));
    /// assert!(Rgb::from_hex("FF0066").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(hex.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Like [`Rgb::from_hex`], but malformed input becomes black.
    pub fn from_hex_or_black(hex: &str) -> Self {
        match Self::from_hex(hex) {
            Ok(color) => color,
            Err(err) => {
                log::warn!("{}; using #000000", err);
                Self::BLACK
            }
        }
    }

    /// Formats the color as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Ordered left, center and right color stops.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gradient {
    pub left: Rgb,
    pub center: Rgb,
    pub right: Rgb,
}

impl Gradient {
    pub const fn new(left: Rgb, center: Rgb, right: Rgb) -> Self {
        Self { left, center, right }
    }

    /// Builds a gradient from three `#RRGGBB` strings, substituting black for
    /// any stop that does not parse.
    pub fn from_hex_or_black(left: &str, center: &str, right: &str) -> Self {
        Self::new(
            Rgb::from_hex_or_black(left),
            Rgb::from_hex_or_black(center),
            Rgb::from_hex_or_black(right),
        )
    }

    /// Returns the color at `factor` along the ramp.
    ///
    /// The ramp is piecewise linear: `[0, 0.5]` blends left into center and
    /// `(0.5, 1]` blends center into right. Each channel is rounded half away
    /// from zero. Out-of-range factors are clamped and NaN is treated as 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qishape::color::{Gradient, Rgb};
    ///
    /// let g = Gradient::new(Rgb::new(0, 0, 0), Rgb::new(100, 100, 100), Rgb::new(200, 0, 0));
    /// assert_eq!(g.interpolate(0.25), Rgb::new(50, 50, 50));
    /// assert_eq!(g.interpolate(1.0), Rgb::new(200, 0, 0));
    /// ```
    pub fn interpolate(&self, factor: f64) -> Rgb {
        let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        let (from, to, t) = if factor <= 0.5 {
            (self.left, self.center, factor * 2.0)
        } else {
            (self.center, self.right, (factor - 0.5) * 2.0)
        };
        Rgb::new(lerp(from.r, to.r, t), lerp(from.g, to.g, t), lerp(from.b, to.b, t))
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(Rgb::new(0xFF, 0x00, 0x66), Rgb::new(0x99, 0x33, 0xFF), Rgb::new(0x00, 0x66, 0xFF))
    }
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_stops() -> Gradient {
        Gradient::from_hex_or_black("#FF0000", "#00FF00", "#0000FF")
    }

    #[test]
    fn test_interpolate_hits_stops_exactly() {
        let g = rgb_stops();
        assert_eq!(g.interpolate(0.0), g.left);
        assert_eq!(g.interpolate(0.5), g.center);
        assert_eq!(g.interpolate(1.0), g.right);
    }

    #[test]
    fn test_interpolate_rounds_half_away_from_zero() {
        let g = Gradient::new(Rgb::new(0, 0, 0), Rgb::new(1, 3, 255), Rgb::new(0, 0, 0));
        // t = 0.5 on the first segment: 0.5 -> 1, 1.5 -> 2, 127.5 -> 128
        assert_eq!(g.interpolate(0.25), Rgb::new(1, 2, 128));
    }

    #[test]
    fn test_interpolate_second_segment() {
        let g = rgb_stops();
        assert_eq!(g.interpolate(0.75), Rgb::new(0, 128, 128));
    }

    #[test]
    fn test_interpolate_clamps_out_of_range() {
        let g = rgb_stops();
        assert_eq!(g.interpolate(-3.0), g.left);
        assert_eq!(g.interpolate(7.5), g.right);
        assert_eq!(g.interpolate(f64::NAN), g.left);
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#FF0066", "#9933FF", "#0066FF", "#1A2B3C"] {
            assert_eq!(Rgb::from_hex(hex).unwrap().to_hex(), hex);
        }
        assert_eq!(Rgb::from_hex("#abcdef").unwrap().to_hex(), "#ABCDEF");
    }

    #[test]
    fn test_invalid_hex_falls_back_to_black() {
        for bad in ["", "#", "FF0066", "#FF006", "#FF00666", "#GG0066", "#ff00-1"] {
            assert!(matches!(Rgb::from_hex(bad), Err(Error::InvalidColor(_))), "{bad}");
            assert_eq!(Rgb::from_hex_or_black(bad), Rgb::BLACK);
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let c: Rgb = "#0066ff".parse().unwrap();
        assert_eq!(c.to_string(), "#0066FF");
    }
}
