//! Color schemes and the in-place palette transform.

mod engine;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{Error, Result};
use crate::palette::Bgr;

pub use engine::{SentinelSet, TransformEngine, apply};

// Tint targets (B, G, R)
const CRIMSON_RED: Bgr = Bgr::new(48, 40, 220);
const OCEAN_BLUE: Bgr = Bgr::new(200, 110, 30);
const FOREST_GREEN: Bgr = Bgr::new(50, 140, 40);
const GOLDEN_YELLOW: Bgr = Bgr::new(40, 190, 230);
const DEEP_PURPLE: Bgr = Bgr::new(160, 40, 120);
const IRON_GRAY: Bgr = Bgr::new(128, 128, 128);
const MIDNIGHT_BLACK: Bgr = Bgr::new(70, 40, 40);
const ROSE_PINK: Bgr = Bgr::new(170, 120, 230);
const WHITE_SILVER: Bgr = Bgr::new(230, 225, 220);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ColorScheme {
    Original,
    Red,
    Blue,
    Green,
    Purple,
    CrimsonRed,
    OceanBlue,
    ForestGreen,
    GoldenYellow,
    DeepPurple,
    IronGray,
    MidnightBlack,
    RosePink,
    WhiteSilver,
}

impl ColorScheme {
    /// Scheme set produced by the variant generator by default.
    pub const BASIC: [ColorScheme; 5] = [
        ColorScheme::Original,
        ColorScheme::Red,
        ColorScheme::Blue,
        ColorScheme::Green,
        ColorScheme::Purple,
    ];

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| Error::UnknownScheme(name.to_string()))
    }

    pub fn all() -> impl Iterator<Item = ColorScheme> {
        ColorScheme::iter()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Original)
    }

    /// Target hue for luminance-preserving tints; `None` for channel-arithmetic schemes.
    pub fn tint(&self) -> Option<Bgr> {
        match self {
            Self::CrimsonRed => Some(CRIMSON_RED),
            Self::OceanBlue => Some(OCEAN_BLUE),
            Self::ForestGreen => Some(FOREST_GREEN),
            Self::GoldenYellow => Some(GOLDEN_YELLOW),
            Self::DeepPurple => Some(DEEP_PURPLE),
            Self::IronGray => Some(IRON_GRAY),
            Self::MidnightBlack => Some(MIDNIGHT_BLACK),
            Self::RosePink => Some(ROSE_PINK),
            Self::WhiteSilver => Some(WHITE_SILVER),
            _ => None,
        }
    }

    /// The pure per-color function for this scheme.
    pub fn transform(&self) -> fn(Bgr) -> Bgr {
        match self {
            Self::Original => identity,
            Self::Red => red,
            Self::Blue => blue,
            Self::Green => green,
            Self::Purple => purple,
            Self::CrimsonRed => |c| tint(c, CRIMSON_RED),
            Self::OceanBlue => |c| tint(c, OCEAN_BLUE),
            Self::ForestGreen => |c| tint(c, FOREST_GREEN),
            Self::GoldenYellow => |c| tint(c, GOLDEN_YELLOW),
            Self::DeepPurple => |c| tint(c, DEEP_PURPLE),
            Self::IronGray => |c| tint(c, IRON_GRAY),
            Self::MidnightBlack => |c| tint(c, MIDNIGHT_BLACK),
            Self::RosePink => |c| tint(c, ROSE_PINK),
            Self::WhiteSilver => |c| tint(c, WHITE_SILVER),
        }
    }

    pub fn apply_to(&self, color: Bgr) -> Bgr {
        (self.transform())(color)
    }
}

fn identity(c: Bgr) -> Bgr {
    c
}

fn red(c: Bgr) -> Bgr {
    Bgr::new(c.b / 3, c.g / 2, c.r.saturating_add(80))
}

fn blue(c: Bgr) -> Bgr {
    Bgr::new(c.b.saturating_add(80), c.g / 2, c.r / 3)
}

fn green(c: Bgr) -> Bgr {
    Bgr::new(c.b / 3, c.g.saturating_add(80), c.r / 3)
}

fn purple(c: Bgr) -> Bgr {
    Bgr::new(c.b.saturating_add(60), c.g / 3, c.r.saturating_add(60))
}

/// Scale `target` by the color's luminance; mid-gray (128) maps to `target` itself.
fn tint(c: Bgr, target: Bgr) -> Bgr {
    let lum = u32::from(c.luminance());
    let scale = |t: u8| (u32::from(t) * lum / 128).min(255) as u8;
    Bgr::new(scale(target.b), scale(target.g), scale(target.r))
}
