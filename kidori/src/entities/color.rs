use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::fsize;

/// Display color of a piece, an RGB triple. (De)serialized as `#RRGGBB`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ColorTag(pub u8, pub u8, pub u8);

impl ColorTag {
    pub const BLACK: ColorTag = ColorTag(0x00, 0x00, 0x00);

    /// Converts a hue-saturation-brightness color (all components in `[0, 1]`) to RGB.
    pub fn from_hsb(hue: fsize, saturation: fsize, brightness: fsize) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - f * saturation);
        let t = brightness * (1.0 - (1.0 - f) * saturation);
        let (r, g, b) = match sector as u8 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        let to_u8 = |c: fsize| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        ColorTag(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl Display for ColorTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for ColorTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "color should be formatted as #RRGGBB, got {s:?}"
        );
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).with_context(|| format!("invalid color {s:?}"))
        };
        Ok(ColorTag(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for ColorTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ColorTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ColorTag::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Assigns one color per distinct piece size, so equally sized pieces share a color in the diagram.
#[derive(Clone, Debug, Default)]
pub struct ColorLegend {
    colors: HashMap<(OrderedFloat<fsize>, OrderedFloat<fsize>), ColorTag>,
    next_index: usize,
}

impl ColorLegend {
    /// Hue step between consecutive sizes, in degrees
    const HUE_STEP: usize = 37;
    const SATURATION: fsize = 0.5;
    const BRIGHTNESS: fsize = 0.8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color of the `(long_side, short_side)` size, registering a new one if the size is unseen.
    pub fn color_for(&mut self, long_side: fsize, short_side: fsize) -> ColorTag {
        let key = (OrderedFloat(long_side), OrderedFloat(short_side));
        if let Some(color) = self.colors.get(&key) {
            return *color;
        }
        let color = Self::nth_color(self.next_index);
        self.next_index += 1;
        self.colors.insert(key, color);
        color
    }

    /// Registers an already assigned color for a size, keeping the first color if the size is known.
    pub fn register(&mut self, long_side: fsize, short_side: fsize, color: ColorTag) {
        let key = (OrderedFloat(long_side), OrderedFloat(short_side));
        if !self.colors.contains_key(&key) {
            self.colors.insert(key, color);
            self.next_index += 1;
        }
    }

    pub fn n_sizes(&self) -> usize {
        self.colors.len()
    }

    fn nth_color(index: usize) -> ColorTag {
        let hue = ((index * Self::HUE_STEP) % 360) as fsize / 360.0;
        ColorTag::from_hsb(hue, Self::SATURATION, Self::BRIGHTNESS)
    }
}
