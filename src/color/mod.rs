//! Color conversion and measurement module
//!
//! This module handles color space conversions, perceptual distance,
//! WCAG contrast, and temperature classification.

pub mod conversion;
pub mod metrics;

pub use conversion::{
    hex_to_rgb, hsl_to_rgb, hue_distance, rgb_to_hex, rgb_to_hsl, rgb_to_lab, rotate_hue, Hsl,
    Lab, Rgb,
};
pub use metrics::{
    classify_temperature, contrast_ratio, delta_e, delta_e_2000, relative_luminance,
    temperature_label, ContrastResult,
};
