//! Theme-level analysis reports
//!
//! Each function here composes the conversion engine, harmony classifier,
//! and psychology mapper into one structured report per theme. Everything
//! is recomputed per call; nothing is cached.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::{
    classify_temperature, contrast_ratio, delta_e, temperature_label, ContrastResult, Rgb,
};
use crate::constants::{consistency, delta_e as de, wcag};
use crate::harmony::{classify, temperature_balance, HarmonyMatch, HueSample, TemperatureBalance};
use crate::palette::{normalize_hex, Color, Palette};
use crate::psychology::{classify_emotion, saturation_band_name, PsychologyResult};
use crate::theme::{Theme, ThemeSet};
use crate::{AnalysisError, Result};

/// Saturation floor for a color to count as chromatic in harmony input
const HARMONY_SATURATION_FLOOR: f64 = 15.0;

/// Lightness window for harmony input; near-black and near-white hues are
/// too unstable to classify
const HARMONY_LIGHTNESS_RANGE: (f64, f64) = (10.0, 90.0);

/// Saturation floor for psychology and cross-theme aggregation
const CHROMATIC_SATURATION_FLOOR: f64 = 10.0;

/// The theme's declared background as a parsed color, black when the
/// declaration is missing or unparsable
fn background_color(theme: &Theme) -> Color {
    Color::parse(&normalize_hex(theme.background_hex()))
        .unwrap_or_else(|_| Color::from_rgb(Rgb::new(0, 0, 0)))
}

fn empty_palette_guard(theme_name: &str, palette: &Palette) -> Result<()> {
    if palette.is_empty() {
        return Err(AnalysisError::EmptyPalette {
            theme: theme_name.to_string(),
        });
    }
    Ok(())
}

// ── palette ──────────────────────────────────────────────────────────

/// One unique color in a palette listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColorReport {
    pub color: Color,
    pub roles: Vec<String>,
    pub temperature: String,
    pub contrast_vs_background: f64,
}

/// Palette overview for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteReport {
    pub theme: String,
    pub base: Option<String>,
    pub background: String,
    pub ui: Vec<PaletteColorReport>,
    pub syntax: Vec<PaletteColorReport>,
}

fn palette_listing(palette: &Palette, background: &Color) -> Vec<PaletteColorReport> {
    palette
        .entries
        .iter()
        .map(|entry| PaletteColorReport {
            temperature: temperature_label(classify_temperature(
                entry.color.hsl.h,
                entry.color.hsl.s,
            ))
            .to_string(),
            contrast_vs_background: contrast_ratio(entry.color.rgb, background.rgb),
            color: entry.color.clone(),
            roles: entry.roles.clone(),
        })
        .collect()
}

/// List each theme's unique UI and syntax colors with derived metrics
///
/// # Errors
///
/// Returns `EmptyPalette` when a theme yields no parsable colors at all.
pub fn palette_report(themes: &ThemeSet) -> Result<Vec<PaletteReport>> {
    let mut reports = Vec::new();
    for (name, theme) in themes {
        let ui = Palette::from_entries(name.clone(), theme.ui_color_entries());
        let syntax = Palette::from_entries(name.clone(), theme.syntax_color_entries());
        if ui.is_empty() && syntax.is_empty() {
            return Err(AnalysisError::EmptyPalette {
                theme: name.clone(),
            });
        }
        let background = background_color(theme);
        reports.push(PaletteReport {
            theme: name.clone(),
            base: theme.base.clone(),
            background: background.hex.clone(),
            ui: palette_listing(&ui, &background),
            syntax: palette_listing(&syntax, &background),
        });
    }
    Ok(reports)
}

// ── harmony ──────────────────────────────────────────────────────────

/// Harmony classification for one theme's syntax palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyReport {
    pub theme: String,
    /// Chromatic hues that entered classification, palette order
    pub samples: Vec<HueSample>,
    pub matches: Vec<HarmonyMatch>,
    pub balance: TemperatureBalance,
}

/// Chromatic hue samples of a palette, labeled by first role
fn chromatic_samples(palette: &Palette) -> Vec<HueSample> {
    palette
        .entries
        .iter()
        .filter(|e| {
            e.color.hsl.s > HARMONY_SATURATION_FLOOR
                && e.color.hsl.l > HARMONY_LIGHTNESS_RANGE.0
                && e.color.hsl.l < HARMONY_LIGHTNESS_RANGE.1
        })
        .map(|e| {
            let label = e
                .roles
                .first()
                .cloned()
                .unwrap_or_else(|| e.color.hex.clone());
            HueSample::new(label, e.color.hsl.h)
        })
        .collect()
}

/// Classify each theme's chromatic syntax hues against the canonical
/// harmony patterns
///
/// # Errors
///
/// Returns `EmptyPalette` when a theme has no syntax colors.
pub fn harmony_report(themes: &ThemeSet) -> Result<Vec<HarmonyReport>> {
    let mut reports = Vec::new();
    for (name, theme) in themes {
        let syntax = Palette::from_entries(name.clone(), theme.syntax_color_entries());
        empty_palette_guard(name, &syntax)?;
        let samples = chromatic_samples(&syntax);
        reports.push(HarmonyReport {
            theme: name.clone(),
            matches: classify(&samples),
            balance: temperature_balance(&samples),
            samples,
        });
    }
    Ok(reports)
}

// ── contrast ─────────────────────────────────────────────────────────

/// Pass/warn/fail against the requested contrast floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastStatus {
    Pass,
    /// Below the floor but still above the AA large-text minimum
    Warn,
    Fail,
}

/// Contrast of one unique syntax color against the background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxContrast {
    pub scope: String,
    pub result: ContrastResult,
    pub status: ContrastStatus,
}

/// Border-key visibility against the background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderVisibility {
    pub key: String,
    pub hex: String,
    pub contrast: f64,
    pub delta_e: f64,
    pub visible: bool,
    pub subtle: bool,
}

/// WCAG contrast report for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    pub theme: String,
    /// Main text: editor foreground over editor background
    pub main: ContrastResult,
    /// Unique syntax colors, worst ratio first
    pub syntax: Vec<SyntaxContrast>,
    pub passing: usize,
    pub borders: Vec<BorderVisibility>,
}

/// Measure every semantic foreground/background pair against the WCAG
/// thresholds
///
/// `min_contrast` is the floor for the pass count (4.5 for AA normal text).
///
/// # Errors
///
/// Returns `EmptyPalette` when a theme has no syntax colors.
pub fn contrast_report(themes: &ThemeSet, min_contrast: f64) -> Result<Vec<ContrastReport>> {
    let mut reports = Vec::new();
    for (name, theme) in themes {
        let background = background_color(theme);
        let foreground = Color::parse(&normalize_hex(theme.foreground_hex()))
            .unwrap_or_else(|_| Color::from_rgb(Rgb::new(255, 255, 255)));

        let syntax_palette = Palette::from_entries(name.clone(), theme.syntax_color_entries());
        empty_palette_guard(name, &syntax_palette)?;

        let mut syntax: Vec<SyntaxContrast> = syntax_palette
            .entries
            .iter()
            .map(|entry| {
                let result = ContrastResult::measure(entry.color.rgb, background.rgb);
                let status = if result.ratio >= min_contrast {
                    ContrastStatus::Pass
                } else if result.ratio >= wcag::AA_LARGE {
                    ContrastStatus::Warn
                } else {
                    ContrastStatus::Fail
                };
                SyntaxContrast {
                    scope: entry
                        .roles
                        .first()
                        .cloned()
                        .unwrap_or_else(|| entry.color.hex.clone()),
                    result,
                    status,
                }
            })
            .collect();
        syntax.sort_by(|a, b| {
            a.result
                .ratio
                .partial_cmp(&b.result.ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let passing = syntax
            .iter()
            .filter(|s| s.status == ContrastStatus::Pass)
            .count();

        let mut border_keys: Vec<(&String, &String)> = theme
            .colors
            .iter()
            .filter(|(k, _)| {
                let k = k.to_ascii_lowercase();
                k.contains("border") && !k.contains("bracket")
            })
            .collect();
        border_keys.sort_by(|a, b| a.0.cmp(b.0));

        let borders = border_keys
            .into_iter()
            .take(5)
            .filter_map(|(key, raw)| {
                let color = Color::parse(&normalize_hex(raw)).ok()?;
                let d = delta_e(color.lab, background.lab);
                Some(BorderVisibility {
                    key: key.clone(),
                    hex: color.hex.clone(),
                    contrast: contrast_ratio(color.rgb, background.rgb),
                    delta_e: d,
                    visible: d > de::BORDER_VISIBLE,
                    subtle: d > de::BORDER_SUBTLE && d <= de::BORDER_VISIBLE,
                })
            })
            .collect();

        reports.push(ContrastReport {
            theme: name.clone(),
            main: ContrastResult::measure(foreground.rgb, background.rgb),
            syntax,
            passing,
            borders,
        });
    }
    Ok(reports)
}

// ── psychology ───────────────────────────────────────────────────────

/// Psychology profile of one unique color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPsychology {
    pub hex: String,
    pub roles: Vec<String>,
    pub profile: PsychologyResult,
}

/// Psychology report for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologyReport {
    pub theme: String,
    pub background_hex: String,
    pub background: PsychologyResult,
    /// Unique chromatic syntax colors, palette order
    pub colors: Vec<ColorPsychology>,
    /// Mean saturation of the chromatic colors, percent
    pub average_saturation: f64,
    /// Saturation band name for the average — the theme's overall mood
    pub mood: Option<String>,
    pub emotion_counts: IndexMap<String, usize>,
    pub temperature_counts: IndexMap<String, usize>,
    pub is_dark: bool,
}

/// Predict emotional associations per color and aggregate a theme mood
///
/// # Errors
///
/// Returns `EmptyPalette` when a theme has no syntax colors.
pub fn psychology_report(themes: &ThemeSet) -> Result<Vec<PsychologyReport>> {
    let mut reports = Vec::new();
    for (name, theme) in themes {
        let background = background_color(theme);
        let syntax = Palette::from_entries(name.clone(), theme.syntax_color_entries());
        empty_palette_guard(name, &syntax)?;

        let mut colors = Vec::new();
        let mut saturations = Vec::new();
        let mut emotion_counts: IndexMap<String, usize> = IndexMap::new();
        let mut temperature_counts: IndexMap<String, usize> = IndexMap::new();

        for entry in &syntax.entries {
            if entry.color.hsl.s <= CHROMATIC_SATURATION_FLOOR {
                continue;
            }
            let profile = classify_emotion(entry.color.hsl);
            saturations.push(entry.color.hsl.s);
            if let Some(emotion) = &profile.hue_emotion {
                *emotion_counts.entry(emotion.emotion.clone()).or_default() += 1;
            }
            *temperature_counts
                .entry(profile.temperature.clone())
                .or_default() += 1;
            colors.push(ColorPsychology {
                hex: entry.color.hex.clone(),
                roles: entry.roles.clone(),
                profile,
            });
        }

        let average_saturation = if saturations.is_empty() {
            0.0
        } else {
            saturations.iter().sum::<f64>() / saturations.len() as f64
        };
        let mood = (average_saturation > 0.0)
            .then(|| saturation_band_name(average_saturation).to_string());

        reports.push(PsychologyReport {
            theme: name.clone(),
            background_hex: background.hex.clone(),
            background: classify_emotion(background.hsl),
            colors,
            average_saturation,
            mood,
            emotion_counts,
            temperature_counts,
            is_dark: theme.is_dark(),
        });
    }
    Ok(reports)
}

// ── cross-theme ──────────────────────────────────────────────────────

/// Hue spread of one scope across themes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeSpread {
    pub scope: String,
    /// (theme name, hue) per theme that colors this scope
    pub hues: Vec<(String, f64)>,
    pub spread: f64,
}

/// Cross-theme consistency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossThemeReport {
    /// Scopes colored by every theme
    pub common_scopes: usize,
    /// Shared scopes whose hue spread exceeds the tolerance, widest first
    pub inconsistent: Vec<ScopeSpread>,
    /// Main text contrast per theme
    pub main_contrast: IndexMap<String, f64>,
}

/// Circular spread of a hue list: linear range, wrapped when it crosses 0°
fn hue_spread(hues: &[f64]) -> f64 {
    let max = hues.iter().copied().fold(f64::MIN, f64::max);
    let min = hues.iter().copied().fold(f64::MAX, f64::min);
    let spread = max - min;
    if spread > 180.0 {
        360.0 - spread
    } else {
        spread
    }
}

/// Flag scopes whose color identity drifts across theme variants
pub fn cross_theme_report(themes: &ThemeSet) -> Result<CrossThemeReport> {
    // Chromatic hue per scope per theme
    let mut theme_scope_hues: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
    for (name, theme) in themes {
        let mut scope_hues = IndexMap::new();
        for (scope, raw) in theme.syntax_color_entries() {
            if let Ok(color) = Color::parse(&normalize_hex(&raw)) {
                if color.hsl.s > CHROMATIC_SATURATION_FLOOR {
                    scope_hues.insert(scope, color.hsl.h);
                }
            }
        }
        theme_scope_hues.insert(name.clone(), scope_hues);
    }

    // Scopes present in every theme
    let mut common: Vec<String> = theme_scope_hues
        .values()
        .next()
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();
    common.retain(|scope| theme_scope_hues.values().all(|sh| sh.contains_key(scope)));
    common.sort();

    let mut inconsistent = Vec::new();
    for scope in &common {
        let hues: Vec<(String, f64)> = theme_scope_hues
            .iter()
            .map(|(theme, sh)| (theme.clone(), sh[scope]))
            .collect();
        if hues.len() < 2 {
            continue;
        }
        let spread = hue_spread(&hues.iter().map(|(_, h)| *h).collect::<Vec<_>>());
        if spread > consistency::MAX_HUE_SPREAD_DEG {
            inconsistent.push(ScopeSpread {
                scope: scope.clone(),
                hues,
                spread,
            });
        }
    }
    inconsistent.sort_by(|a, b| {
        b.spread
            .partial_cmp(&a.spread)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut main_contrast = IndexMap::new();
    for (name, theme) in themes {
        let bg = background_color(theme);
        if let Ok(fg) = Color::parse(&normalize_hex(theme.foreground_hex())) {
            main_contrast.insert(name.clone(), contrast_ratio(fg.rgb, bg.rgb));
        }
    }

    Ok(CrossThemeReport {
        common_scopes: common.len(),
        inconsistent,
        main_contrast,
    })
}
