//! Color comparison, replacement impact, and harmony suggestions
//!
//! These operate on explicit hex inputs rather than whole themes, so bad
//! input surfaces as `InvalidColor` naming the analysis that rejected it.

use serde::{Deserialize, Serialize};

use crate::color::{
    classify_temperature, contrast_ratio, delta_e, delta_e_2000, hsl_to_rgb, hue_distance,
    rotate_hue, temperature_label, ContrastResult, Hsl,
};
use crate::constants::delta_e as de;
use crate::constants::harmony::{
    ANALOGOUS_STEP_DEG, COMPLEMENTARY_DEG, SPLIT_COMPLEMENTARY_DEG, TETRADIC_STEP_DEG,
    TRIADIC_DEG,
};
use crate::harmony::{classify, HarmonyMatch, HueSample};
use crate::palette::{normalize_hex, Color, Palette};
use crate::theme::ThemeSet;
use crate::{AnalysisError, Result};

fn parse_input(hex: &str, context: &str) -> Result<Color> {
    Color::parse(&normalize_hex(hex))
        .map_err(|_| AnalysisError::invalid_color(hex, context))
}

// ── compare ──────────────────────────────────────────────────────────

/// Perceptual and accessibility metrics between two colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    pub first: Color,
    pub second: Color,
    /// CIE76 Lab distance
    pub delta_e76: f64,
    /// CIEDE2000 distance
    pub delta_e2000: f64,
    pub hue_distance: f64,
    pub contrast_ratio: f64,
    /// Human reading of the CIE76 distance
    pub perceptual: &'static str,
}

fn perceptual_label(d: f64) -> &'static str {
    if d < de::JUST_NOTICEABLE {
        "barely perceptible"
    } else if d < de::SIGNIFICANT {
        "noticeable"
    } else {
        "clearly different"
    }
}

/// Compare two colors across every metric the engine computes
///
/// # Errors
///
/// Returns `InvalidColor` when either input fails to parse.
pub fn compare(first_hex: &str, second_hex: &str) -> Result<CompareResult> {
    let first = parse_input(first_hex, "compare")?;
    let second = parse_input(second_hex, "compare")?;
    let d76 = delta_e(first.lab, second.lab);
    Ok(CompareResult {
        delta_e76: d76,
        delta_e2000: delta_e_2000(first.lab, second.lab),
        hue_distance: hue_distance(first.hsl.h, second.hsl.h),
        contrast_ratio: contrast_ratio(first.rgb, second.rgb),
        perceptual: perceptual_label(d76),
        first,
        second,
    })
}

// ── replace ──────────────────────────────────────────────────────────

/// Contrast of old and new color against one theme's background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastChange {
    pub theme: String,
    pub before: ContrastResult,
    pub after: ContrastResult,
}

/// Where one theme uses the color being replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeUsage {
    pub theme: String,
    pub ui_roles: Vec<String>,
    pub syntax_roles: Vec<String>,
}

/// Impact assessment for replacing one color across the loaded themes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceImpact {
    pub old: Color,
    pub new: Color,
    pub delta_e: f64,
    pub perceptual: &'static str,
    /// Themes that actually use the old color, with the roles affected
    pub usages: Vec<ThemeUsage>,
    pub contrast_changes: Vec<ContrastChange>,
    /// (old, new) temperature labels when the replacement shifts them
    pub temperature_shift: Option<(String, String)>,
    /// Harmony matches over each using theme's chromatic hues, with the
    /// replacement applied, keyed by theme
    pub harmony_after: Vec<(String, Vec<HarmonyMatch>)>,
    pub recommendations: Vec<String>,
}

/// Assess the impact of swapping `old_hex` for `new_hex` in the theme set
///
/// # Errors
///
/// Returns `InvalidColor` when either input fails to parse.
pub fn replace_impact(themes: &ThemeSet, old_hex: &str, new_hex: &str) -> Result<ReplaceImpact> {
    let old = parse_input(old_hex, "replace")?;
    let new = parse_input(new_hex, "replace")?;
    let d = delta_e(old.lab, new.lab);

    let mut usages = Vec::new();
    let mut contrast_changes = Vec::new();
    let mut harmony_after = Vec::new();

    for (name, theme) in themes {
        let ui = Palette::from_entries(name.clone(), theme.ui_color_entries());
        let syntax = Palette::from_entries(name.clone(), theme.syntax_color_entries());
        let ui_roles = ui.get(&old.hex).map(|e| e.roles.clone()).unwrap_or_default();
        let syntax_roles = syntax
            .get(&old.hex)
            .map(|e| e.roles.clone())
            .unwrap_or_default();
        if ui_roles.is_empty() && syntax_roles.is_empty() {
            continue;
        }

        let background = Color::parse(&normalize_hex(theme.background_hex()))
            .unwrap_or_else(|_| Color::from_rgb(crate::color::Rgb::new(0, 0, 0)));
        contrast_changes.push(ContrastChange {
            theme: name.clone(),
            before: ContrastResult::measure(old.rgb, background.rgb),
            after: ContrastResult::measure(new.rgb, background.rgb),
        });

        // Re-run harmony over the theme's syntax hues with the swap applied
        let samples: Vec<HueSample> = syntax
            .entries
            .iter()
            .filter(|e| e.color.hsl.s > 15.0)
            .map(|e| {
                let color = if e.color.hex == old.hex { &new } else { &e.color };
                let label = e
                    .roles
                    .first()
                    .cloned()
                    .unwrap_or_else(|| color.hex.clone());
                HueSample::new(label, color.hsl.h)
            })
            .collect();
        harmony_after.push((name.clone(), classify(&samples)));

        usages.push(ThemeUsage {
            theme: name.clone(),
            ui_roles,
            syntax_roles,
        });
    }

    let old_temp = temperature_label(classify_temperature(old.hsl.h, old.hsl.s));
    let new_temp = temperature_label(classify_temperature(new.hsl.h, new.hsl.s));
    let temperature_shift =
        (old_temp != new_temp).then(|| (old_temp.to_string(), new_temp.to_string()));

    let mut recommendations = Vec::new();
    if d < de::JUST_NOTICEABLE {
        recommendations
            .push("change is barely perceptible; safe to apply without review".to_string());
    } else if d < de::SIGNIFICANT {
        recommendations
            .push("moderate perceptual change; review the affected roles".to_string());
    } else {
        recommendations
            .push("large perceptual change; review every affected theme".to_string());
    }
    for change in &contrast_changes {
        if change.before.aa_normal && !change.after.aa_normal {
            recommendations.push(format!(
                "{}: replacement loses AA normal-text compliance ({:.2} → {:.2})",
                change.theme, change.before.ratio, change.after.ratio
            ));
        } else if !change.before.aa_normal && change.after.aa_normal {
            recommendations.push(format!(
                "{}: replacement gains AA normal-text compliance ({:.2} → {:.2})",
                change.theme, change.before.ratio, change.after.ratio
            ));
        }
        if change.after.ratio < 3.0 {
            recommendations.push(format!(
                "{}: replacement may be hard to see against the background ({:.2})",
                change.theme, change.after.ratio
            ));
        }
    }
    if let Some((from, to)) = &temperature_shift {
        recommendations.push(format!(
            "temperature shifts {from} → {to}; check the palette's warm/cool balance"
        ));
    }

    Ok(ReplaceImpact {
        perceptual: perceptual_label(d),
        old,
        new,
        delta_e: d,
        usages,
        contrast_changes,
        temperature_shift,
        harmony_after,
        recommendations,
    })
}

// ── suggest ──────────────────────────────────────────────────────────

/// Which harmony families to generate suggestions for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestFilter {
    All,
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
}

impl SuggestFilter {
    /// Parse a user-facing filter name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "complementary" => Some(Self::Complementary),
            "analogous" => Some(Self::Analogous),
            "triadic" => Some(Self::Triadic),
            "split" | "split-complementary" => Some(Self::SplitComplementary),
            "tetradic" | "square" => Some(Self::Tetradic),
            _ => None,
        }
    }

    fn wants(self, family: &str) -> bool {
        matches!(
            (self, family),
            (Self::All, _)
                | (Self::Complementary, "complementary")
                | (Self::Analogous, "analogous")
                | (Self::Triadic, "triadic")
                | (Self::SplitComplementary, "split-complementary")
                | (Self::Tetradic, "tetradic")
        )
    }
}

/// One generated harmony partner for a seed color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Harmony family the partner belongs to
    pub family: String,
    /// Hue rotation applied to the seed, degrees
    pub rotation: f64,
    pub color: Color,
    /// CIE76 distance from the seed
    pub delta_e: f64,
}

/// Same-hue lightness variant of the seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightnessVariation {
    /// Signed lightness offset, percent
    pub offset: f64,
    pub color: Color,
}

/// Harmony partners and lightness variants for one seed color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub seed: Color,
    pub partners: Vec<Suggestion>,
    pub variations: Vec<LightnessVariation>,
}

fn rotated(seed: &Color, degrees: f64) -> Color {
    let hsl = Hsl::new(rotate_hue(seed.hsl.h, degrees), seed.hsl.s, seed.hsl.l);
    Color::from_rgb(hsl_to_rgb(hsl))
}

/// Generate harmony partners and lightness variations for a seed color
///
/// Partners keep the seed's saturation and lightness and rotate only the
/// hue, so each generated pair classifies as its own harmony family.
///
/// # Errors
///
/// Returns `InvalidColor` when the seed fails to parse.
pub fn suggest(seed_hex: &str, filter: SuggestFilter) -> Result<Suggestions> {
    let seed = parse_input(seed_hex, "suggest")?;

    let families: [(&str, &[f64]); 5] = [
        ("complementary", &[COMPLEMENTARY_DEG]),
        ("analogous", &[-ANALOGOUS_STEP_DEG, ANALOGOUS_STEP_DEG]),
        ("triadic", &[TRIADIC_DEG, 2.0 * TRIADIC_DEG]),
        (
            "split-complementary",
            &[SPLIT_COMPLEMENTARY_DEG, 360.0 - SPLIT_COMPLEMENTARY_DEG],
        ),
        (
            "tetradic",
            &[TETRADIC_STEP_DEG, 2.0 * TETRADIC_STEP_DEG, 3.0 * TETRADIC_STEP_DEG],
        ),
    ];

    let mut partners = Vec::new();
    for (family, rotations) in families {
        if !filter.wants(family) {
            continue;
        }
        for &rotation in rotations {
            let color = rotated(&seed, rotation);
            partners.push(Suggestion {
                family: family.to_string(),
                rotation,
                delta_e: delta_e(seed.lab, color.lab),
                color,
            });
        }
    }

    let variations = [-20.0, -10.0, 10.0, 20.0]
        .into_iter()
        .map(|offset| {
            let hsl = Hsl::new(seed.hsl.h, seed.hsl.s, (seed.hsl.l + offset).clamp(0.0, 100.0));
            LightnessVariation {
                offset,
                color: Color::from_rgb(hsl_to_rgb(hsl)),
            }
        })
        .collect();

    Ok(Suggestions {
        seed,
        partners,
        variations,
    })
}
