//! Color psychology and predicted-response mapping
//!
//! Deterministic two-stage lookup: a hue bucket supplies the base emotional
//! association, then saturation and lightness bands supply the predicted
//! response text. All tables are ordered constants with inclusive-start /
//! exclusive-end bounds so every boundary hue lands in exactly one bucket.

use serde::{Deserialize, Serialize};

use crate::color::{classify_temperature, temperature_label, Hsl};
use crate::constants::temperature::NEUTRAL_SATURATION_FLOOR;

/// Base emotional association for a hue range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueBucket {
    /// Inclusive start of the hue range, degrees
    pub start: f64,
    /// Exclusive end of the hue range, degrees
    pub end: f64,
    pub emotion: &'static str,
    pub arousal: &'static str,
    pub valence: &'static str,
}

/// Saturation or lightness band with its predicted response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseBand {
    /// Inclusive start, percent
    pub start: f64,
    /// Exclusive end, percent; the final band also accepts its end value
    /// so 100% has a home
    pub end: f64,
    pub name: &'static str,
    pub response: &'static str,
}

/// Hue → emotional association, covering [0, 360) with no gaps or overlaps.
/// The red range wraps, so it appears as both the first and last row.
pub const HUE_BUCKETS: [HueBucket; 8] = [
    HueBucket {
        start: 0.0,
        end: 30.0,
        emotion: "energy, urgency, passion",
        arousal: "high",
        valence: "mixed",
    },
    HueBucket {
        start: 30.0,
        end: 60.0,
        emotion: "warmth, comfort, optimism",
        arousal: "medium",
        valence: "positive",
    },
    HueBucket {
        start: 60.0,
        end: 90.0,
        emotion: "clarity, attention, caution",
        arousal: "medium-high",
        valence: "mixed",
    },
    HueBucket {
        start: 90.0,
        end: 150.0,
        emotion: "growth, balance, freshness",
        arousal: "low-medium",
        valence: "positive",
    },
    HueBucket {
        start: 150.0,
        end: 210.0,
        emotion: "calm, trust, stability",
        arousal: "low",
        valence: "positive",
    },
    HueBucket {
        start: 210.0,
        end: 270.0,
        emotion: "depth, introspection, focus",
        arousal: "low-medium",
        valence: "neutral",
    },
    HueBucket {
        start: 270.0,
        end: 330.0,
        emotion: "creativity, luxury, mystery",
        arousal: "medium",
        valence: "mixed",
    },
    HueBucket {
        start: 330.0,
        end: 360.0,
        emotion: "energy, urgency, passion",
        arousal: "high",
        valence: "mixed",
    },
];

/// Lightness → predicted response, covering [0, 100]
pub const LIGHTNESS_BANDS: [ResponseBand; 7] = [
    ResponseBand {
        start: 0.0,
        end: 15.0,
        name: "very dark",
        response: "immersion, focus, reduced eye strain in dim environments",
    },
    ResponseBand {
        start: 15.0,
        end: 30.0,
        name: "dark",
        response: "concentration, professionalism, modern aesthetic",
    },
    ResponseBand {
        start: 30.0,
        end: 45.0,
        name: "medium dark",
        response: "balance, readability, moderate contrast",
    },
    ResponseBand {
        start: 45.0,
        end: 60.0,
        name: "medium",
        response: "neutrality, versatility, comfortable extended use",
    },
    ResponseBand {
        start: 60.0,
        end: 75.0,
        name: "medium light",
        response: "openness, approachability, paper-like comfort",
    },
    ResponseBand {
        start: 75.0,
        end: 90.0,
        name: "light",
        response: "clarity, spaciousness, traditional document feel",
    },
    ResponseBand {
        start: 90.0,
        end: 100.0,
        name: "very light",
        response: "airiness, minimalism, clean aesthetic",
    },
];

/// Saturation → predicted response, covering [0, 100]
pub const SATURATION_BANDS: [ResponseBand; 5] = [
    ResponseBand {
        start: 0.0,
        end: 15.0,
        name: "desaturated",
        response: "calm, professional, reduces visual fatigue over time",
    },
    ResponseBand {
        start: 15.0,
        end: 35.0,
        name: "muted",
        response: "sophisticated, natural, non-distracting for long sessions",
    },
    ResponseBand {
        start: 35.0,
        end: 55.0,
        name: "moderate",
        response: "balanced, engaging without overwhelming",
    },
    ResponseBand {
        start: 55.0,
        end: 75.0,
        name: "saturated",
        response: "vibrant, attention-grabbing, best reserved for accents",
    },
    ResponseBand {
        start: 75.0,
        end: 100.0,
        name: "vivid",
        response: "intense, energetic, may cause fatigue if overused",
    },
];

/// Hue-level emotional association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueEmotion {
    pub emotion: String,
    pub arousal: String,
    pub valence: String,
}

/// Psychological profile of one color
///
/// `hue_emotion` is absent for near-neutral colors (saturation below the
/// neutral floor), where the hue carries no reliable association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsychologyResult {
    pub hue_emotion: Option<HueEmotion>,
    pub temperature: String,
    pub lightness_class: String,
    pub lightness_response: String,
    pub saturation_class: String,
    pub saturation_response: String,
}

fn hue_bucket(h: f64) -> &'static HueBucket {
    let h = h.rem_euclid(360.0);
    HUE_BUCKETS
        .iter()
        .find(|b| h >= b.start && h < b.end)
        // The table covers [0, 360) and h is wrapped
        .unwrap_or(&HUE_BUCKETS[0])
}

fn band_lookup(bands: &'static [ResponseBand], value: f64) -> &'static ResponseBand {
    let value = value.clamp(0.0, 100.0);
    bands
        .iter()
        .find(|b| value >= b.start && (value < b.end || b.end >= 100.0))
        .unwrap_or(&bands[bands.len() - 1])
}

/// Classify the emotional/psychological associations of an HSL color
pub fn classify_emotion(hsl: Hsl) -> PsychologyResult {
    let hue_emotion = if hsl.s >= NEUTRAL_SATURATION_FLOOR {
        let bucket = hue_bucket(hsl.h);
        Some(HueEmotion {
            emotion: bucket.emotion.to_string(),
            arousal: bucket.arousal.to_string(),
            valence: bucket.valence.to_string(),
        })
    } else {
        None
    };

    let lightness = band_lookup(&LIGHTNESS_BANDS, hsl.l);
    let saturation = band_lookup(&SATURATION_BANDS, hsl.s);

    PsychologyResult {
        hue_emotion,
        temperature: temperature_label(classify_temperature(hsl.h, hsl.s)).to_string(),
        lightness_class: lightness.name.to_string(),
        lightness_response: lightness.response.to_string(),
        saturation_class: saturation.name.to_string(),
        saturation_response: saturation.response.to_string(),
    }
}

/// Name of the saturation band a value falls in (used for the theme-level
/// average-saturation mood)
pub fn saturation_band_name(s: f64) -> &'static str {
    band_lookup(&SATURATION_BANDS, s).name
}
