use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::TermfxError;

/// 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

/// A terminal foreground color: either true color or an xterm-256 palette index.
///
/// Text form is `RRGGBB` (optional `#`) or a decimal index `0..=255`. Any decimal string that
/// fits the palette is read as an index, so `"100"` is xterm 100 while `"100100"` is hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// True color.
    Rgb(Rgb),
    /// xterm-256 palette index.
    Xterm(u8),
}

impl Color {
    /// Shorthand for `Color::Rgb(Rgb::new(r, g, b))`.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Resolve to true color, mapping palette indices through the standard xterm table.
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Xterm(idx) => xterm_to_rgb(idx),
        }
    }
}

const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const SYSTEM: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

fn xterm_to_rgb(idx: u8) -> Rgb {
    match idx {
        0..=15 => {
            let (r, g, b) = SYSTEM[usize::from(idx)];
            Rgb::new(r, g, b)
        }
        16..=231 => {
            let i = usize::from(idx - 16);
            Rgb::new(LEVELS[i / 36], LEVELS[(i / 6) % 6], LEVELS[i % 6])
        }
        _ => {
            let v = 8 + 10 * (idx - 232);
            Rgb::new(v, v, v)
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be RRGGBB (case-insensitive)".to_owned());
    }
    Ok(Rgb::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

impl FromStr for Color {
    type Err = TermfxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.len() <= 3 && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(idx) = s.parse::<u8>() {
                return Ok(Self::Xterm(idx));
            }
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        parse_hex(hex)
            .map(Self::Rgb)
            .map_err(|e| TermfxError::config(format!("invalid color \"{s}\": {e}")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(c) => write!(f, "{:02x}{:02x}{:02x}", c.r, c.g, c.b),
            Self::Xterm(idx) => write!(f, "{idx}"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Xterm(idx) => serializer.serialize_u8(*idx),
            Self::Rgb(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(u8),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(idx) => Ok(Self::Xterm(idx)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/color.rs"]
mod tests;
