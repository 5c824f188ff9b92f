use crate::foundation::core::Rgba8;
use crate::foundation::error::{WavyBgError, WavyBgResult};
use serde::Deserialize;
use std::str::FromStr;

/// A straight-alpha color with normalized `0..=1` channels.
///
/// Deserializes from CSS-like strings (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`,
/// named colors), `{ "r", "g", "b", "a" }` objects or `[r, g, b(, a)]` arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: to_u8(self.r),
            g: to_u8(self.g),
            b: to_u8(self.b),
            a: to_u8(self.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = WavyBgError;

    fn from_str(s: &str) -> WavyBgResult<Self> {
        parse_css(s).map_err(WavyBgError::color)
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
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
                &[r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_css(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let args = args
            .strip_suffix(')')
            .ok_or_else(|| format!("unterminated color function \"{s}\""))?;
        return parse_rgb_args(args);
    }
    named(&lower).ok_or_else(|| format!("unknown color \"{s}\""))
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let bytes = s.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|n| n * 17))
            .collect::<Result<_, _>>()?,
        6 | 8 => bytes
            .chunks_exact(2)
            .map(|p| Ok(nibble(p[0])? * 16 + nibble(p[1])?))
            .collect::<Result<_, String>>()?,
        _ => {
            return Err(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)"
                    .to_owned(),
            );
        }
    };

    let a = channels.get(3).copied().unwrap_or(255);
    Ok(Color::rgba(
        f64::from(channels[0]) / 255.0,
        f64::from(channels[1]) / 255.0,
        f64::from(channels[2]) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn parse_rgb_args(args: &str) -> Result<Color, String> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("rgb()/rgba() expects 3 or 4 arguments, got {}", parts.len()));
    }

    let channel = |p: &str| -> Result<f64, String> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            pct.parse::<f64>().map(|v| v / 100.0)
        } else {
            p.parse::<f64>().map(|v| v / 255.0)
        };
        v.map_err(|_| format!("invalid color channel \"{p}\""))
    };
    let alpha = |p: &str| -> Result<f64, String> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            pct.parse::<f64>().map(|v| v / 100.0)
        } else {
            p.parse::<f64>()
        };
        v.map_err(|_| format!("invalid alpha \"{p}\""))
    };

    let a = match parts.get(3) {
        Some(p) => alpha(p)?,
        None => 1.0,
    };
    Ok(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

fn named(name: &str) -> Option<Color> {
    let rgb = |r: u8, g: u8, b: u8| {
        Color::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    };
    Some(match name {
        "black" => rgb(0, 0, 0),
        "white" => rgb(255, 255, 255),
        "transparent" => Color::rgba(0.0, 0.0, 0.0, 0.0),
        "red" => rgb(255, 0, 0),
        "green" => rgb(0, 128, 0),
        "blue" => rgb(0, 0, 255),
        "cyan" | "aqua" => rgb(0, 255, 255),
        "magenta" | "fuchsia" => rgb(255, 0, 255),
        "yellow" => rgb(255, 255, 0),
        "gray" | "grey" => rgb(128, 128, 128),
        "navy" => rgb(0, 0, 128),
        "purple" => rgb(128, 0, 128),
        "orange" => rgb(255, 165, 0),
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
