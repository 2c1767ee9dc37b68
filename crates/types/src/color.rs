//! Foundational color types used throughout the colormap maker.
//!
//! `Rgb` and `ColorStop` are the building blocks of every colormap. Colors
//! travel as `#RRGGBB` strings in files and as 8-bit channels in memory.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ColormapError;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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

    /// Parse a `#RRGGBB` string. Upper and lower case digits are accepted.
    pub fn from_hex(s: &str) -> Result<Self, ColormapError> {
        let invalid = || ColormapError::UnparsableColor(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Opaque `0xAARRGGBB` value, the layout Qt's `QColor::rgb()` returns
    pub fn packed_argb(&self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Channels scaled to 0.0..=1.0
    pub fn to_unit(&self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s.trim())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Color stop for gradients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorStop {
    pub position: f64, // 0.0 to 1.0
    pub color: Rgb,
}

impl ColorStop {
    pub fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_accepts_both_cases() {
        assert_eq!(Rgb::from_hex("#12ab9F").unwrap(), Rgb::new(0x12, 0xAB, 0x9F));
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb::WHITE);
        assert_eq!("  #000000 ".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_hex_parse_rejects_malformed() {
        for bad in ["", "#", "123456", "#12345", "#1234567", "#12345G", "#+12345", "#ééé"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(ColormapError::UnparsableColor(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_hex_format_is_uppercase() {
        assert_eq!(Rgb::new(0x0a, 0xbc, 0xde).to_hex(), "#0ABCDE");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_packed_argb_matches_qt_layout() {
        assert_eq!(Rgb::BLACK.packed_argb(), 4278190080);
        assert_eq!(Rgb::WHITE.packed_argb(), 4294967295);
        assert_eq!(Rgb::new(255, 0, 0).packed_argb(), 0xFFFF0000);
    }

    #[test]
    fn test_color_stop_serialization() {
        let stop = ColorStop::new(0.25, Rgb::new(255, 0, 16));
        let json = serde_json::to_string(&stop).unwrap();
        assert_eq!(json, r##"{"position":0.25,"color":"#FF0010"}"##);

        let back: ColorStop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stop);

        let bad: Result<ColorStop, _> =
            serde_json::from_str(r##"{"position":0.25,"color":"#FF00"}"##);
        assert!(bad.is_err());
    }
}
