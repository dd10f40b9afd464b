use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PixelGridError, PixelGridResult};

/// Upper bound of the red/green/blue channels.
pub const CHANNEL_MAX: f64 = 255.0;
/// Upper bound of the alpha channel.
pub const ALPHA_MAX: f64 = 1.0;

/// Straight (non-premultiplied) RGBA value: channels in `[0, 255]`, alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Build a value without clamping.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque value from an 8-bit color.
    pub fn opaque(rgb: Rgb) -> Self {
        rgb.with_alpha(ALPHA_MAX)
    }

    /// Round to 8-bit `[r, g, b, a]`, alpha scaled to `0..=255`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a * CHANNEL_MAX),
        ]
    }

    /// The 8-bit color part, alpha dropped.
    pub fn rgb(self) -> Rgb {
        let [r, g, b, _] = self.to_rgba8();
        Rgb::new(r, g, b)
    }
}

fn channel_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, CHANNEL_MAX) as u8
}

/// 8-bit RGB color as picked by the host (brush and solid background colors).
///
/// Parsed from `#rrggbb` or `rrggbb`; serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha value.
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba::new(f64::from(self.r), f64::from(self.g), f64::from(self.b), a)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = PixelGridError;

    fn from_str(s: &str) -> PixelGridResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PixelGridError::validation(format!(
                "color '{s}' must be a #rrggbb hex string"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| PixelGridError::validation(format!("color '{s}': {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = PixelGridError;

    fn try_from(value: String) -> PixelGridResult<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// One translucent color layer of a cell.
///
/// Setters take `Option<f64>`: `None` (or a non-finite value) keeps the previous channel,
/// anything else is clamped into the channel's legal range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorLayer {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Default for ColorLayer {
    /// Opaque white, the bottom color of a fresh layer stack without an explicit color.
    fn default() -> Self {
        Self::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX, ALPHA_MAX)
    }
}

impl ColorLayer {
    /// Build a layer, clamping every channel.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        let mut layer = Self::transparent();
        layer.set_color(Some(r), Some(g), Some(b), Some(a));
        layer
    }

    /// Fully transparent black, the content of every pushed layer.
    pub fn transparent() -> Self {
        Self {
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            alpha: 0.0,
        }
    }

    /// Layer holding `rgba`, clamped.
    pub fn from_rgba(rgba: Rgba) -> Self {
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_red(&mut self, value: Option<f64>) {
        self.red = clamp_or_keep(self.red, value, CHANNEL_MAX);
    }

    pub fn set_green(&mut self, value: Option<f64>) {
        self.green = clamp_or_keep(self.green, value, CHANNEL_MAX);
    }

    pub fn set_blue(&mut self, value: Option<f64>) {
        self.blue = clamp_or_keep(self.blue, value, CHANNEL_MAX);
    }

    pub fn set_alpha(&mut self, value: Option<f64>) {
        self.alpha = clamp_or_keep(self.alpha, value, ALPHA_MAX);
    }

    /// Set all four channels; `None` entries are left unchanged.
    pub fn set_color(&mut self, r: Option<f64>, g: Option<f64>, b: Option<f64>, a: Option<f64>) {
        self.set_red(r);
        self.set_green(g);
        self.set_blue(b);
        self.set_alpha(a);
    }

    /// Current value as a 4-tuple.
    pub fn color(&self) -> Rgba {
        Rgba::new(self.red, self.green, self.blue, self.alpha)
    }

    /// Replace all channels with `rgba`, clamped.
    pub fn set_rgba(&mut self, rgba: Rgba) {
        self.set_color(Some(rgba.r), Some(rgba.g), Some(rgba.b), Some(rgba.a));
    }

    /// True when the 8-bit RGB of this layer equals `rgb`; alpha is ignored.
    pub fn same_rgb(&self, rgb: Rgb) -> bool {
        self.color().rgb() == rgb
    }

    /// Composite `overlay` on top of this layer with the "over" operator.
    ///
    /// `a = oa + ta * (1 - oa)`, `c = (oc * oa + tc * ta * (1 - oa)) / a`.
    /// With a resulting alpha of zero the color channels keep their previous value.
    pub fn merge_over(&mut self, overlay: &ColorLayer) {
        let oa = overlay.alpha;
        let under = self.alpha * (1.0 - oa);
        let alpha = oa + under;

        if alpha > 0.0 {
            let blend = |over: f64, this: f64| (over * oa + this * under) / alpha;
            self.red = blend(overlay.red, self.red).clamp(0.0, CHANNEL_MAX);
            self.green = blend(overlay.green, self.green).clamp(0.0, CHANNEL_MAX);
            self.blue = blend(overlay.blue, self.blue).clamp(0.0, CHANNEL_MAX);
        }
        self.alpha = alpha.clamp(0.0, ALPHA_MAX);
    }
}

fn clamp_or_keep(prev: f64, value: Option<f64>, max: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, max),
        _ => prev,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
