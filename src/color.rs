//! Color values in the platform's `0x00BBGGRR` layout
//!
//! Plain colors format as `#RRGGBB`. Values with any of the top eight bits set
//! (the toolkit's "no color" and "default color" markers among them) format as
//! `0xAABBGGRR` so they survive a round trip.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::value::ValueKind;

static HEX_RGB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid color pattern"));

static RAW_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[xX]([0-9A-Fa-f]{1,8})$").expect("valid color pattern"));

static RGB_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:rgb)\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("valid color pattern")
});

/// A color reference: red in the low byte, then green, then blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ColorRef(pub u32);

impl ColorRef {
    /// "No color" marker
    pub const NONE: ColorRef = ColorRef(0xFFFF_FFFF);
    /// "Use the default color" marker
    pub const DEFAULT: ColorRef = ColorRef(0xFF00_0000);

    pub const BLACK: ColorRef = ColorRef::rgb(0, 0, 0);
    pub const WHITE: ColorRef = ColorRef::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorRef((r as u32) | ((g as u32) << 8) | ((b as u32) << 16))
    }

    #[inline]
    pub const fn red(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Whether this is a plain RGB color rather than a marker value
    #[inline]
    pub const fn is_rgb(self) -> bool {
        self.0 & 0xFF00_0000 == 0
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rgb() {
            write!(f, "#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
        } else {
            write!(f, "0x{:08X}", self.0)
        }
    }
}

impl FromStr for ColorRef {
    type Err = Error;

    /// Accepts `#RRGGBB`, `RRGGBB`, `rgb(r, g, b)` and raw `0xAABBGGRR`
    fn from_str(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim();
        let invalid = || Error::format(ValueKind::Color, text);

        if let Some(caps) = HEX_RGB.captures(trimmed) {
            let packed = u32::from_str_radix(&caps[1], 16).map_err(|_| invalid())?;
            let [b, g, r, _] = packed.to_le_bytes();
            return Ok(ColorRef::rgb(r, g, b));
        }
        if let Some(caps) = RAW_HEX.captures(trimmed) {
            let raw = u32::from_str_radix(&caps[1], 16).map_err(|_| invalid())?;
            return Ok(ColorRef(raw));
        }
        if let Some(caps) = RGB_CALL.captures(trimmed) {
            let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
            return Ok(ColorRef::rgb(channel(1)?, channel(2)?, channel(3)?));
        }
        Err(invalid())
    }
}
