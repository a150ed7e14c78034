use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color: {0:?}")]
pub struct ColorParseError(pub String);

const PALETTE: &[(&str, Color)] = &[
    ("red", Color::rgb(0xE5, 0x39, 0x35)),
    ("green", Color::rgb(0x43, 0xA0, 0x47)),
    ("blue", Color::rgb(0x1E, 0x88, 0xE5)),
    ("yellow", Color::rgb(0xFD, 0xD8, 0x35)),
    ("orange", Color::rgb(0xFB, 0x8C, 0x00)),
    ("purple", Color::rgb(0x8E, 0x24, 0xAA)),
    ("cyan", Color::rgb(0x00, 0xAC, 0xC1)),
    ("magenta", Color::rgb(0xD8, 0x1B, 0x60)),
    ("pink", Color::rgb(0xF4, 0x8F, 0xB1)),
    ("brown", Color::rgb(0x6D, 0x4C, 0x41)),
    ("lime", Color::rgb(0xC0, 0xCA, 0x33)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("gray", Color::rgb(0x75, 0x75, 0x75)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
];

impl Color {
    pub const BACKGROUND: Color = Color::rgb(0x21, 0x21, 0x21);
    pub const TEXT: Color = Color::rgb(0xEE, 0xEE, 0xEE);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn named(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        PALETTE
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(trimmed))
            .map(|(_, color)| *color)
    }

    /// Palette name when the color is one of the named entries.
    pub fn name(&self) -> Option<&'static str> {
        PALETTE
            .iter()
            .find(|(_, color)| color == self)
            .map(|(label, _)| *label)
    }

    pub fn to_css(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(color) = Color::named(raw) {
            return Ok(color);
        }
        let err = || ColorParseError(raw.to_string());
        let hex = raw.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => f.write_str(&self.to_css()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Red".parse::<Color>(), Ok(Color::named("red").unwrap()));
        assert_eq!(" blue ".parse::<Color>().map(|c| c.name()), Ok(Some("blue")));
    }

    #[test]
    fn parses_hex() {
        assert_eq!("#102030".parse::<Color>(), Ok(Color::rgb(0x10, 0x20, 0x30)));
        assert_eq!(
            "#10203080".parse::<Color>(),
            Ok(Color::rgba(0x10, 0x20, 0x30, 0x80))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("chartreuse".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zz0000".parse::<Color>().is_err());
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0,0,0,0.000)");
    }
}
