//! Color value type and hue-space math for light overrides.
//!
//! [`Rgba`] is the plain color record carried by schematic entries and pushed
//! into live light controllers. [`shift_hue`] rotates a color around the hue
//! circle; the conversion goes RGB→HSV→RGB because interpolating directly in
//! RGB space does not produce a uniform color cycle.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);

    /// Create a color from the four channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// Decompose a color into (hue, saturation, value), each in `0.0..=1.0`.
///
/// Achromatic colors (zero chroma) report hue `0.0`.
pub fn rgb_to_hsv(color: Rgba) -> (f32, f32, f32) {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        (((b - r) / delta) + 2.0) / 6.0
    } else {
        (((r - g) / delta) + 4.0) / 6.0
    };

    let saturation = if max <= 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

/// Compose a color from (hue, saturation, value) plus an alpha channel.
///
/// Hue is circular: any input is wrapped into `0.0..1.0` first, so `1.2`
/// and `0.2` name the same hue.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32, alpha: u8) -> Rgba {
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor() as i32 % 6;
    let f = h - h.floor();

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    Rgba::new(channel(r), channel(g), channel(b), alpha)
}

/// Rotate a color's hue by `amount` (full cycle = `1.0`), keeping
/// saturation, value, and alpha unchanged. Wraps at the cycle boundary.
pub fn shift_hue(color: Rgba, amount: f32) -> Rgba {
    let (hue, saturation, value) = rgb_to_hsv(color);
    hsv_to_rgb(hue + amount, saturation, value, color.a)
}

fn channel(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
