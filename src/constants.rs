//! Reference values and classification tables for color analysis
//!
//! This module contains compile-time constants for color-space conversion
//! and the boundary tables used by the classifiers. Tables are explicit
//! ordered constants rather than inline literals so boundary conventions
//! stay documented and independently testable.

/// CIE Standard Illuminant D65
///
/// D65 represents average daylight (CCT 6504K) and is the reference white
/// for sRGB and therefore for every conversion in this crate.
pub mod d65 {
    /// D65 white point in CIE XYZ
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f64; 3] = [0.95047, 1.00000, 1.08883];
}

/// sRGB companding and linear-RGB → XYZ conversion (D65)
pub mod srgb {
    /// Linear segment threshold of the sRGB companding curve
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Divisor for the linear segment
    pub const LINEAR_DIVISOR: f64 = 12.92;

    /// Offset and scale for the power-law segment: ((c + 0.055) / 1.055)^2.4
    pub const GAMMA_OFFSET: f64 = 0.055;
    pub const GAMMA_SCALE: f64 = 1.055;
    pub const GAMMA_EXPONENT: f64 = 2.4;

    /// Row-major linear-RGB → XYZ matrix for sRGB primaries under D65
    /// Source: IEC 61966-2-1
    pub const RGB_TO_XYZ: [[f64; 3]; 3] = [
        [0.4124564, 0.3575761, 0.1804375],
        [0.2126729, 0.7151522, 0.0721750],
        [0.0193339, 0.1191920, 0.9503041],
    ];
}

/// CIELAB forward-transform constants
pub mod lab {
    /// f(t) switches from cube root to the linear segment below this value
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear segment: f(t) = 7.787 t + 16/116
    pub const KAPPA: f64 = 7.787;
}

/// WCAG 2.x luminance and contrast thresholds
pub mod wcag {
    /// Relative-luminance channel weights on linearized sRGB
    pub const LUMA_RED: f64 = 0.2126;
    pub const LUMA_GREEN: f64 = 0.7152;
    pub const LUMA_BLUE: f64 = 0.0722;

    /// Flare term added to both luminances in the contrast ratio
    pub const CONTRAST_OFFSET: f64 = 0.05;

    /// Minimum ratios per conformance level
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AAA_LARGE: f64 = 4.5;
}

/// Harmony classification parameters
pub mod harmony {
    /// Maximum angular deviation from a pattern's ideal geometry.
    ///
    /// A pattern match is only reported when its worst pairwise error is
    /// within this tolerance; confidence is `1 - deviation / TOLERANCE_DEG`.
    pub const TOLERANCE_DEG: f64 = 15.0;

    /// Ideal separations for the canonical patterns
    pub const COMPLEMENTARY_DEG: f64 = 180.0;
    pub const TRIADIC_DEG: f64 = 120.0;
    pub const SPLIT_COMPLEMENTARY_DEG: f64 = 150.0;
    /// Separation between the two split partners (180° ± 30° around the
    /// complement leaves them 60° apart)
    pub const SPLIT_PARTNER_SEPARATION_DEG: f64 = 60.0;
    pub const ANALOGOUS_STEP_DEG: f64 = 30.0;
    /// Step between the four corners of a square (tetradic) scheme
    pub const TETRADIC_STEP_DEG: f64 = 90.0;
}

/// Warm/cool temperature classification
pub mod temperature {
    /// Perceived temperature of a hue range
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Temperature {
        Warm,
        Cool,
        Transitional,
        Neutral,
    }

    /// Below this saturation (percent) a color reads as neutral regardless
    /// of hue
    pub const NEUTRAL_SATURATION_FLOOR: f64 = 5.0;

    /// Hue-range → temperature table.
    ///
    /// Rows are (start, end, temperature) with inclusive start and exclusive
    /// end, covering [0, 360) with no gaps. Inputs must be wrapped into
    /// [0, 360) before lookup.
    pub const HUE_RANGES: [(f64, f64, Temperature); 5] = [
        (0.0, 60.0, Temperature::Warm),
        (60.0, 150.0, Temperature::Transitional),
        (150.0, 270.0, Temperature::Cool),
        (270.0, 300.0, Temperature::Transitional),
        (300.0, 360.0, Temperature::Warm),
    ];
}

/// Cross-theme consistency thresholds
pub mod consistency {
    /// A shared scope is flagged when its hue spread across themes exceeds
    /// this angle
    pub const MAX_HUE_SPREAD_DEG: f64 = 15.0;
}

/// Perceptual-difference interpretation thresholds (ΔE, CIE76)
pub mod delta_e {
    /// Just-noticeable difference for most observers
    pub const JUST_NOTICEABLE: f64 = 2.3;

    /// Above this a replacement is a clearly different color
    pub const SIGNIFICANT: f64 = 10.0;

    /// Border visibility against the background
    pub const BORDER_VISIBLE: f64 = 10.0;
    pub const BORDER_SUBTLE: f64 = 5.0;
}
