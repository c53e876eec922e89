use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Named "gold" (#ffd700)
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const GOLDENROD: Color = Color::rgb(218, 165, 32);
    pub const NAVY: Color = Color::rgb(0, 0, 128);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with opacity `alpha` in `[0, 1]`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse `#rrggbb`, `#rgb`, or one of the named colours
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(named) = Self::named(text) {
            return Ok(named);
        }
        Self::from_hex(text).ok_or_else(|| anyhow!("unrecognised colour '{}'", text))
    }

    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "gold" => Some(Self::GOLD),
            "goldenrod" => Some(Self::GOLDENROD),
            "navy" => Some(Self::NAVY),
            "lime" => Some(Self::LIME),
            _ => None,
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let nibble = |i: usize| u8::from_str_radix(digits.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

        match digits.len() {
            3 => Some(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear blend towards `other` by `t` in `[0, 1]`
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

const PLASMA_STOPS: [Color; 9] = [
    Color::rgb(13, 8, 135),
    Color::rgb(75, 3, 161),
    Color::rgb(125, 3, 168),
    Color::rgb(168, 34, 150),
    Color::rgb(203, 71, 119),
    Color::rgb(229, 107, 93),
    Color::rgb(248, 148, 65),
    Color::rgb(253, 195, 40),
    Color::rgb(240, 249, 33),
];

/// Plasma colormap, interpolated between evenly spaced stops
pub fn plasma(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (PLASMA_STOPS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(PLASMA_STOPS.len() - 2);
    let frac = (scaled - lower as f64) as f32;
    PLASMA_STOPS[lower].lerp(PLASMA_STOPS[lower + 1], frac)
}

/// `n` plasma colours sampled evenly over `[lo, hi]`
pub fn plasma_gradient(n: usize, lo: f64, hi: f64) -> Vec<Color> {
    super::angles::linspace(lo, hi, n, true)
        .into_iter()
        .map(plasma)
        .collect()
}

const TAB20: [Color; 20] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xae, 0xc7, 0xe8),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0xff, 0xbb, 0x78),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0x98, 0xdf, 0x8a),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0xff, 0x98, 0x96),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0xc5, 0xb0, 0xd5),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xc4, 0x9c, 0x94),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0xf7, 0xb6, 0xd2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xc7, 0xc7, 0xc7),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0xdb, 0xdb, 0x8d),
    Color::rgb(0x17, 0xbe, 0xcf),
    Color::rgb(0x9e, 0xda, 0xe5),
];

pub fn tab20(index: usize) -> Color {
    TAB20[index % TAB20.len()]
}

/// Continuous lookup into the 20-entry table, `t` in `[0, 1]`
pub fn tab20_sample(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let idx = ((t * TAB20.len() as f64) as usize).min(TAB20.len() - 1);
    TAB20[idx]
}

/// Fixed colour list assigned cyclically by index
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(anyhow!("palette needs at least one colour"));
        }
        Ok(Self { colors })
    }

    pub fn from_hex(codes: &[&str]) -> Result<Self> {
        let colors = codes
            .iter()
            .map(|code| Color::parse(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn get(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
