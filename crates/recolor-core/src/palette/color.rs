//! Palette color triples.
//!
//! Palettes in sprite files and in process memory store each color as three
//! bytes in Blue, Green, Red order.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::limits::BYTES_PER_COLOR;
use crate::palette::signature::{format_pattern, parse_pattern};

/// A single palette entry in (Blue, Green, Red) byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const BLACK: Bgr = Bgr::new(0x00, 0x00, 0x00);

    /// Transparent marker written by the sprite exporter (red channel 0xA5).
    pub const TRANSPARENT: Bgr = Bgr::new(0x00, 0x00, 0xA5);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    /// Read a triple from the first three bytes of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b, g, r, ..] => Some(Self::new(*b, *g, *r)),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; BYTES_PER_COLOR] {
        [self.b, self.g, self.r]
    }

    /// Write this triple into the first three bytes of `bytes`.
    pub fn write_to(self, bytes: &mut [u8]) {
        bytes[..BYTES_PER_COLOR].copy_from_slice(&self.to_bytes());
    }

    /// Perceived brightness (0-255), ITU-R BT.601 weights in fixed point.
    pub fn luminance(self) -> u8 {
        let sum = 77 * u32::from(self.r) + 150 * u32::from(self.g) + 29 * u32::from(self.b);
        (sum >> 8) as u8
    }
}

impl fmt::Display for Bgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X} {:02X}", self.b, self.g, self.r)
    }
}

/// Serialized as the same hex text used for signatures ("00 00 A5").
impl Serialize for Bgr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_pattern(&self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for Bgr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = parse_pattern(&text).map_err(serde::de::Error::custom)?;
        if bytes.len() != BYTES_PER_COLOR {
            return Err(serde::de::Error::custom(format!(
                "expected {} bytes for a color, got {}",
                BYTES_PER_COLOR,
                bytes.len()
            )));
        }
        Ok(Bgr::new(bytes[0], bytes[1], bytes[2]))
    }
}

/// Iterate the color entries of a byte window, ignoring a trailing partial entry.
pub fn colors(window: &[u8]) -> impl Iterator<Item = Bgr> + '_ {
    window
        .chunks_exact(BYTES_PER_COLOR)
        .map(|chunk| Bgr::new(chunk[0], chunk[1], chunk[2]))
}
