//! Color space conversion utilities
//!
//! Provides the conversions everything else builds on:
//! - Hex string ↔ RGB parsing and formatting
//! - RGB ↔ HSL with the achromatic degenerate case handled explicitly
//! - RGB → CIELAB via the sRGB → linear → XYZ → Lab pipeline (D65)
//! - Hue-circle arithmetic with wraparound
//!
//! All functions are pure and deterministic; only [`hex_to_rgb`] can fail.

use serde::{Deserialize, Serialize};

use crate::constants::{d65, lab, srgb};
use crate::{AnalysisError, Result};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase 6-digit hex form with "#" prefix
    pub fn hex(&self) -> String {
        rgb_to_hex(i32::from(self.r), i32::from(self.g), i32::from(self.b))
    }
}

/// HSL color: hue in degrees [0, 360), saturation and lightness in percent
/// [0, 100].
///
/// For achromatic colors the hue is undefined and reported as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// CIELAB color: L in [0, 100], a/b unbounded (typically ~[-128, 127])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// Parse a hex color string into RGB
///
/// Accepts 3- or 6-digit strings, optionally prefixed with "#". The 3-digit
/// form expands each nibble by duplication ("f0a" → "ff00aa").
///
/// # Errors
///
/// Returns `InvalidFormat` when the string contains non-hex characters or
/// has a length other than 3 or 6 after stripping the prefix.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AnalysisError::invalid_format(hex, "non-hex characters"));
    }

    let expanded;
    let digits = match digits.len() {
        6 => digits,
        3 => {
            expanded = digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>();
            expanded.as_str()
        }
        n => {
            return Err(AnalysisError::invalid_format(
                hex,
                format!("expected 3 or 6 hex digits, got {n}"),
            ))
        }
    };

    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| AnalysisError::invalid_format(hex, "non-hex characters"))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format RGB channels as a lowercase "#rrggbb" string
///
/// Out-of-range channels are clamped to [0, 255] rather than rejected,
/// since upstream math may overshoot by rounding.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |c: i32| c.clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", clamp(r), clamp(g), clamp(b))
}

/// Convert RGB to HSL
///
/// The achromatic case (max == min channel) yields hue 0 and saturation 0;
/// the hue is undefined there and reported as 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert HSL back to RGB, rounding to the nearest 8-bit channel
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |offset: f64| {
        let mut t = h + offset;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgb::new(channel(1.0 / 3.0), channel(0.0), channel(-1.0 / 3.0))
}

/// Linearize one sRGB channel (inverse companding)
///
/// Piecewise per IEC 61966-2-1: linear below 0.04045, power 2.4 above.
pub(crate) fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= srgb::LINEAR_THRESHOLD {
        c / srgb::LINEAR_DIVISOR
    } else {
        ((c + srgb::GAMMA_OFFSET) / srgb::GAMMA_SCALE).powf(srgb::GAMMA_EXPONENT)
    }
}

/// Convert RGB to CIELAB under the D65 reference white
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let rl = linearize(rgb.r);
    let gl = linearize(rgb.g);
    let bl = linearize(rgb.b);

    let m = srgb::RGB_TO_XYZ;
    let x = rl * m[0][0] + gl * m[0][1] + bl * m[0][2];
    let y = rl * m[1][0] + gl * m[1][1] + bl * m[1][2];
    let z = rl * m[2][0] + gl * m[2][1] + bl * m[2][2];

    let [xn, yn, zn] = d65::WHITE_POINT_XYZ;

    let f = |t: f64| {
        if t > lab::EPSILON {
            t.cbrt()
        } else {
            lab::KAPPA * t + 16.0 / 116.0
        }
    };

    let fx = f(x / xn);
    let fy = f(y / yn);
    let fz = f(z / zn);

    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Minimum angular distance between two hues on the 360° circle
///
/// Always in [0, 180]; the distance between 350° and 10° is 20°, not 340°.
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs().rem_euclid(360.0);
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Rotate a hue by the given number of degrees, wrapping into [0, 360)
pub fn rotate_hue(h: f64, degrees: f64) -> f64 {
    (h + degrees).rem_euclid(360.0)
}
