//! Named preset palettes.
//!
//! Tables are compiled in and materialized into [`Palette`] values once, on
//! first use, then shared read-only for the life of the process.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::palette::Palette;
use crate::color::Rgb;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

const GAMEBOY: &[Rgb] = &[
    rgb(155, 188, 15),
    rgb(139, 172, 15),
    rgb(48, 98, 48),
    rgb(15, 56, 15),
];

const NES: &[Rgb] = &[
    rgb(84, 84, 84),
    rgb(0, 30, 116),
    rgb(8, 16, 144),
    rgb(48, 0, 136),
    rgb(68, 0, 100),
    rgb(92, 0, 48),
    rgb(136, 0, 0),
    rgb(120, 16, 0),
    rgb(104, 40, 0),
    rgb(88, 48, 0),
    rgb(64, 64, 0),
    rgb(0, 120, 0),
    rgb(8, 104, 0),
    rgb(0, 88, 0),
    rgb(0, 64, 88),
    rgb(0, 0, 0),
];

const C64: &[Rgb] = &[
    rgb(0, 0, 0),
    rgb(255, 255, 255),
    rgb(136, 0, 0),
    rgb(170, 255, 238),
    rgb(204, 68, 204),
    rgb(0, 204, 85),
    rgb(0, 0, 170),
    rgb(238, 238, 119),
    rgb(221, 136, 85),
    rgb(102, 68, 0),
    rgb(255, 119, 119),
    rgb(51, 51, 51),
    rgb(119, 119, 119),
    rgb(170, 255, 102),
    rgb(0, 136, 255),
    rgb(187, 187, 187),
];

// 0, 16, ..., 240
const MONO: &[Rgb] = &[
    rgb(0, 0, 0),
    rgb(16, 16, 16),
    rgb(32, 32, 32),
    rgb(48, 48, 48),
    rgb(64, 64, 64),
    rgb(80, 80, 80),
    rgb(96, 96, 96),
    rgb(112, 112, 112),
    rgb(128, 128, 128),
    rgb(144, 144, 144),
    rgb(160, 160, 160),
    rgb(176, 176, 176),
    rgb(192, 192, 192),
    rgb(208, 208, 208),
    rgb(224, 224, 224),
    rgb(240, 240, 240),
];

const MONOCHROME: &[Rgb] = &[rgb(0, 0, 0), rgb(255, 255, 255)];

const SEPIA: &[Rgb] = &[
    rgb(62, 39, 35),
    rgb(147, 104, 67),
    rgb(211, 161, 116),
    rgb(241, 217, 169),
    rgb(255, 245, 208),
    rgb(255, 255, 255),
];

const VAPORWAVE: &[Rgb] = &[
    rgb(255, 105, 180),
    rgb(255, 20, 147),
    rgb(138, 43, 226),
    rgb(75, 0, 130),
    rgb(0, 191, 255),
    rgb(135, 206, 250),
    rgb(255, 255, 255),
    rgb(192, 192, 192),
    rgb(255, 0, 255),
    rgb(0, 255, 255),
    rgb(255, 255, 0),
    rgb(255, 0, 0),
];

const NEON: &[Rgb] = &[
    rgb(255, 0, 255),
    rgb(0, 255, 255),
    rgb(255, 255, 0),
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(255, 255, 255),
    rgb(255, 165, 0),
];

const PASTEL: &[Rgb] = &[
    rgb(255, 182, 193),
    rgb(255, 218, 185),
    rgb(255, 255, 186),
    rgb(186, 255, 201),
    rgb(186, 225, 255),
    rgb(255, 186, 255),
    rgb(255, 229, 229),
    rgb(229, 229, 255),
];

const AMIGA: &[Rgb] = &[
    rgb(0, 0, 0),
    rgb(255, 255, 255),
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(255, 255, 0),
    rgb(255, 0, 255),
    rgb(0, 255, 255),
    rgb(255, 128, 0),
    rgb(255, 0, 128),
    rgb(128, 255, 0),
    rgb(0, 255, 128),
    rgb(128, 0, 255),
    rgb(0, 128, 255),
    rgb(192, 192, 192),
    rgb(128, 128, 128),
];

const ATARI: &[Rgb] = &[
    rgb(0, 0, 0),
    rgb(255, 255, 255),
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(255, 255, 0),
    rgb(255, 0, 255),
    rgb(0, 255, 255),
    rgb(128, 128, 128),
    rgb(255, 128, 128),
    rgb(128, 255, 128),
    rgb(128, 128, 255),
];

const EARTH: &[Rgb] = &[
    rgb(139, 69, 19),
    rgb(160, 82, 45),
    rgb(205, 133, 63),
    rgb(222, 184, 135),
    rgb(245, 222, 179),
    rgb(210, 180, 140),
    rgb(188, 143, 143),
    rgb(165, 42, 42),
];

const OCEAN: &[Rgb] = &[
    rgb(0, 0, 139),
    rgb(0, 0, 255),
    rgb(30, 144, 255),
    rgb(64, 224, 208),
    rgb(127, 255, 212),
    rgb(173, 216, 230),
    rgb(240, 248, 255),
    rgb(0, 191, 255),
];

const SUNSET: &[Rgb] = &[
    rgb(255, 69, 0),
    rgb(255, 99, 71),
    rgb(255, 140, 0),
    rgb(255, 165, 0),
    rgb(255, 215, 0),
    rgb(255, 255, 0),
    rgb(255, 182, 193),
    rgb(255, 192, 203),
];

const FOREST: &[Rgb] = &[
    rgb(0, 100, 0),
    rgb(34, 139, 34),
    rgb(50, 205, 50),
    rgb(60, 179, 113),
    rgb(107, 142, 35),
    rgb(124, 252, 0),
    rgb(173, 255, 47),
    rgb(240, 255, 240),
];

/// A named preset palette, or [`PaletteName::None`].
///
/// Names are matched case-insensitively with `-` and `_` treated alike.
/// Unknown names resolve to `None` (no palette) with a warning, so a typo in
/// a configuration file never aborts a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaletteName {
    /// No fixed palette; colors are derived from the image.
    #[default]
    None,
    /// Four-shade green of the original Game Boy, lightest first.
    Gameboy,
    /// Sixteen dark entries of the NES system palette.
    Nes,
    /// The Commodore 64's sixteen colors.
    C64,
    /// Sixteen grays, 0 to 240 in steps of 16.
    Mono,
    /// Pure black and white.
    Monochrome,
    Sepia,
    Vaporwave,
    Neon,
    Pastel,
    Amiga,
    Atari,
    Earth,
    Ocean,
    Sunset,
    Forest,
}

static PRESETS: OnceLock<Vec<Palette>> = OnceLock::new();

impl PaletteName {
    /// Every preset, in listing order. Excludes [`PaletteName::None`].
    pub const ALL: &'static [PaletteName] = &[
        PaletteName::Gameboy,
        PaletteName::Nes,
        PaletteName::C64,
        PaletteName::Mono,
        PaletteName::Monochrome,
        PaletteName::Sepia,
        PaletteName::Vaporwave,
        PaletteName::Neon,
        PaletteName::Pastel,
        PaletteName::Amiga,
        PaletteName::Atari,
        PaletteName::Earth,
        PaletteName::Ocean,
        PaletteName::Sunset,
        PaletteName::Forest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::None => "none",
            PaletteName::Gameboy => "gameboy",
            PaletteName::Nes => "nes",
            PaletteName::C64 => "c64",
            PaletteName::Mono => "mono",
            PaletteName::Monochrome => "monochrome",
            PaletteName::Sepia => "sepia",
            PaletteName::Vaporwave => "vaporwave",
            PaletteName::Neon => "neon",
            PaletteName::Pastel => "pastel",
            PaletteName::Amiga => "amiga",
            PaletteName::Atari => "atari",
            PaletteName::Earth => "earth",
            PaletteName::Ocean => "ocean",
            PaletteName::Sunset => "sunset",
            PaletteName::Forest => "forest",
        }
    }

    /// Strict lookup. Returns `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        if key.is_empty() || key == "none" {
            return Some(PaletteName::None);
        }
        Self::ALL.iter().copied().find(|p| p.as_str() == key)
    }

    /// Lenient lookup: unknown names fall back to [`PaletteName::None`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(palette = name, "unknown palette name, using none");
            PaletteName::None
        })
    }

    fn table(self) -> &'static [Rgb] {
        match self {
            PaletteName::None => &[],
            PaletteName::Gameboy => GAMEBOY,
            PaletteName::Nes => NES,
            PaletteName::C64 => C64,
            PaletteName::Mono => MONO,
            PaletteName::Monochrome => MONOCHROME,
            PaletteName::Sepia => SEPIA,
            PaletteName::Vaporwave => VAPORWAVE,
            PaletteName::Neon => NEON,
            PaletteName::Pastel => PASTEL,
            PaletteName::Amiga => AMIGA,
            PaletteName::Atari => ATARI,
            PaletteName::Earth => EARTH,
            PaletteName::Ocean => OCEAN,
            PaletteName::Sunset => SUNSET,
            PaletteName::Forest => FOREST,
        }
    }

    /// The preset's palette, or `None` for [`PaletteName::None`].
    pub fn palette(self) -> Option<&'static Palette> {
        let idx = Self::ALL.iter().position(|p| *p == self)?;
        let presets = PRESETS.get_or_init(|| {
            Self::ALL
                .iter()
                .map(|p| Palette::from_trusted(p.table()))
                .collect()
        });
        presets.get(idx)
    }
}

/// Game Boy preset, built fresh. For callers that need a palette when none
/// is configured.
pub(crate) fn gameboy() -> Palette {
    Palette::from_trusted(GAMEBOY)
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PaletteName {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for PaletteName {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<PaletteName> for String {
    fn from(name: PaletteName) -> Self {
        name.as_str().to_string()
    }
}
