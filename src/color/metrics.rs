//! Perceptual distance, WCAG contrast, and temperature classification
//!
//! CIELAB distance is used for perceptual comparisons because it weighs
//! differences closer to how the eye does than raw RGB arithmetic.

use serde::{Deserialize, Serialize};

use crate::color::conversion::{linearize, Lab, Rgb};
use crate::constants::{
    temperature::{Temperature, HUE_RANGES, NEUTRAL_SATURATION_FLOOR},
    wcag,
};

/// CIE76 color difference: Euclidean distance in Lab space
///
/// Returns a value ≥ 0; exactly 0 only for identical triplets. Symmetric.
pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIEDE2000 color difference (Sharma, Wu & Dalal 2005)
///
/// Heavier than CIE76 but better aligned with perception for small
/// differences; surfaced by the compare report alongside CIE76.
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_avg = (c1 + c2) / 2.0;
    let c_avg7 = c_avg.powi(7);
    let g = 0.5 * (1.0 - (c_avg7 / (c_avg7 + 25.0_f64.powi(7))).sqrt());

    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);

    let c1p = (a1p * a1p + b1 * b1).sqrt();
    let c2p = (a2p * a2p + b2 * b2).sqrt();

    let h1p = b1.atan2(a1p).to_degrees().rem_euclid(360.0);
    let h2p = b2.atan2(a2p).to_degrees().rem_euclid(360.0);

    let dlp = l2 - l1;
    let dcp = c2p - c1p;

    let dhp = if c1p * c2p == 0.0 {
        0.0
    } else if (h2p - h1p).abs() <= 180.0 {
        h2p - h1p
    } else if h2p - h1p > 180.0 {
        h2p - h1p - 360.0
    } else {
        h2p - h1p + 360.0
    };
    let dhp_term = 2.0 * (c1p * c2p).sqrt() * (dhp / 2.0).to_radians().sin();

    let lp_avg = (l1 + l2) / 2.0;
    let cp_avg = (c1p + c2p) / 2.0;

    let hp_avg = if c1p * c2p == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (hp_avg - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_avg).to_radians().cos()
        + 0.32 * (3.0 * hp_avg + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_avg - 63.0).to_radians().cos();

    let s_l = 1.0 + 0.015 * (lp_avg - 50.0).powi(2) / (20.0 + (lp_avg - 50.0).powi(2)).sqrt();
    let s_c = 1.0 + 0.045 * cp_avg;
    let s_h = 1.0 + 0.015 * cp_avg * t;

    let cp_avg7 = cp_avg.powi(7);
    let r_c = 2.0 * (cp_avg7 / (cp_avg7 + 25.0_f64.powi(7))).sqrt();
    let d_theta = 30.0 * (-((hp_avg - 275.0) / 25.0).powi(2)).exp();
    let r_t = -(2.0 * d_theta).to_radians().sin() * r_c;

    let term_l = dlp / s_l;
    let term_c = dcp / s_c;
    let term_h = dhp_term / s_h;

    (term_l * term_l + term_c * term_c + term_h * term_h + r_t * term_c * term_h).sqrt()
}

/// WCAG relative luminance of an RGB color, in [0, 1]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    wcag::LUMA_RED * linearize(rgb.r)
        + wcag::LUMA_GREEN * linearize(rgb.g)
        + wcag::LUMA_BLUE * linearize(rgb.b)
}

/// WCAG contrast ratio between two colors
///
/// Always in [1.0, 21.0] and symmetric under swapping the inputs.
pub fn contrast_ratio(rgb1: Rgb, rgb2: Rgb) -> f64 {
    let l1 = relative_luminance(rgb1);
    let l2 = relative_luminance(rgb2);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + wcag::CONTRAST_OFFSET) / (darker + wcag::CONTRAST_OFFSET)
}

/// A foreground/background pair with its contrast ratio and WCAG pass flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

impl ContrastResult {
    /// Measure the pair and evaluate every WCAG threshold
    pub fn measure(foreground: Rgb, background: Rgb) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground: foreground.hex(),
            background: background.hex(),
            ratio,
            aa_normal: ratio >= wcag::AA_NORMAL,
            aa_large: ratio >= wcag::AA_LARGE,
            aaa_normal: ratio >= wcag::AAA_NORMAL,
            aaa_large: ratio >= wcag::AAA_LARGE,
        }
    }
}

/// Classify the perceived temperature of an HSL color
///
/// Saturation below [`NEUTRAL_SATURATION_FLOOR`] reads as neutral; otherwise
/// the hue is wrapped into [0, 360) and looked up in [`HUE_RANGES`].
pub fn classify_temperature(h: f64, s: f64) -> Temperature {
    if s < NEUTRAL_SATURATION_FLOOR {
        return Temperature::Neutral;
    }
    let h = h.rem_euclid(360.0);
    for &(start, end, temp) in &HUE_RANGES {
        if h >= start && h < end {
            return temp;
        }
    }
    // Unreachable: the table covers [0, 360) and h is wrapped
    Temperature::Neutral
}

/// Human-readable label for a temperature
pub fn temperature_label(t: Temperature) -> &'static str {
    match t {
        Temperature::Warm => "warm",
        Temperature::Cool => "cool",
        Temperature::Transitional => "transitional",
        Temperature::Neutral => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::conversion::rgb_to_lab;

    #[test]
    fn test_delta_e_zero_for_identical() {
        let lab = Lab::new(50.0, 10.0, -5.0);
        assert_eq!(delta_e(lab, lab), 0.0);
    }

    #[test]
    fn test_delta_e_symmetric() {
        let red = rgb_to_lab(Rgb::new(255, 0, 0));
        let blue = rgb_to_lab(Rgb::new(0, 0, 255));
        assert!((delta_e(red, blue) - delta_e(blue, red)).abs() < 1e-12);
    }

    #[test]
    fn test_delta_e_black_vs_white_is_large() {
        let black = rgb_to_lab(Rgb::new(0, 0, 0));
        let white = rgb_to_lab(Rgb::new(255, 255, 255));
        assert!(delta_e(black, white) > 90.0);
    }

    #[test]
    fn test_delta_e_2000_zero_and_symmetric() {
        let lab1 = Lab::new(50.0, 2.6772, -79.7751);
        let lab2 = Lab::new(50.0, 0.0, -82.7485);
        assert!(delta_e_2000(lab1, lab1).abs() < 1e-12);
        assert!((delta_e_2000(lab1, lab2) - delta_e_2000(lab2, lab1)).abs() < 1e-9);
    }

    #[test]
    fn test_delta_e_2000_sharma_reference_pair() {
        // Pair 1 from the Sharma/Wu/Dalal test data set; expected ΔE00 = 2.0425
        let lab1 = Lab::new(50.0, 2.6772, -79.7751);
        let lab2 = Lab::new(50.0, 0.0, -82.7485);
        assert!((delta_e_2000(lab1, lab2) - 2.0425).abs() < 1e-3);
    }

    #[test]
    fn test_relative_luminance_bounds() {
        assert!(relative_luminance(Rgb::new(0, 0, 0)).abs() < 1e-9);
        assert!((relative_luminance(Rgb::new(255, 255, 255)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_ratio_white_black_is_21() {
        let cr = contrast_ratio(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        assert!((cr - 21.0).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_ratio_symmetric_and_bounded() {
        let a = Rgb::new(77, 147, 117);
        let b = Rgb::new(18, 18, 18);
        let cr = contrast_ratio(a, b);
        assert!((cr - contrast_ratio(b, a)).abs() < 1e-12);
        assert!((1.0..=21.0).contains(&cr));
        // Same color: ratio exactly 1
        assert!((contrast_ratio(a, a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_result_flags() {
        // #4d9375 on #121212 passes AA for normal text but not AAA
        let result = ContrastResult::measure(Rgb::new(77, 147, 117), Rgb::new(18, 18, 18));
        assert!(result.ratio >= 4.5);
        assert!(result.aa_normal);
        assert!(result.aa_large);
        assert!(!result.aaa_normal);
    }

    #[test]
    fn test_classify_temperature() {
        assert_eq!(classify_temperature(10.0, 80.0), Temperature::Warm);
        assert_eq!(classify_temperature(350.0, 70.0), Temperature::Warm);
        assert_eq!(classify_temperature(200.0, 60.0), Temperature::Cool);
        assert_eq!(classify_temperature(80.0, 50.0), Temperature::Transitional);
        assert_eq!(classify_temperature(200.0, 2.0), Temperature::Neutral); // below floor
        assert_eq!(classify_temperature(360.0, 50.0), Temperature::Warm); // wraps to 0
    }
}
