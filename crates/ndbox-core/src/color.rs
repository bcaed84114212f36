use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and a handful of named colors.
    pub fn parse(text: &str) -> Option<Self> {
        let s = text.trim().to_ascii_lowercase();
        match s.as_str() {
            "transparent" => return Some(Self::rgba(0, 0, 0, 0)),
            "white" => return Some(Self::rgb(255, 255, 255)),
            "black" => return Some(Self::rgb(0, 0, 0)),
            _ => {}
        }

        let hex = s.strip_prefix('#')?;
        fn hex2(b: &[u8]) -> Option<u8> {
            let hi = (*b.first()? as char).to_digit(16)? as u8;
            let lo = (*b.get(1)? as char).to_digit(16)? as u8;
            Some((hi << 4) | lo)
        }
        fn hex1(c: u8) -> Option<u8> {
            let v = (c as char).to_digit(16)? as u8;
            Some((v << 4) | v)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Self::rgb(hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?)),
            4 => Some(Self::rgba(
                hex1(bytes[0])?,
                hex1(bytes[1])?,
                hex1(bytes[2])?,
                hex1(bytes[3])?,
            )),
            6 => Some(Self::rgb(
                hex2(&bytes[0..2])?,
                hex2(&bytes[2..4])?,
                hex2(&bytes[4..6])?,
            )),
            8 => Some(Self::rgba(
                hex2(&bytes[0..2])?,
                hex2(&bytes[2..4])?,
                hex2(&bytes[4..6])?,
                hex2(&bytes[6..8])?,
            )),
            _ => None,
        }
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#08090a"), Some(Color::rgb(8, 9, 10)));
        assert_eq!(Color::parse("#FFF"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("#0000"), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(
            Color::parse(" #3ab1d280 "),
            Some(Color::rgba(0x3a, 0xb1, 0xd2, 0x80))
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse("White"), Some(Color::rgb(255, 255, 255)));
        assert!(!Color::parse("transparent").unwrap().is_opaque());
    }

    #[test]
    fn rejects_malformed_input() {
        for text in ["", "#", "#12", "#12345", "#gggggg", "rebeccapurple", "3ab1d2"] {
            assert!(Color::parse(text).is_none(), "{text:?} should not parse");
        }
        assert!(matches!(
            "nope".parse::<Color>(),
            Err(Error::InvalidColor { .. })
        ));
    }

    #[test]
    fn hex_output_is_canonical() {
        assert_eq!(Color::rgb(0xc2, 0x2e, 0xb8).to_hex(), "#c22eb8");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }
}
