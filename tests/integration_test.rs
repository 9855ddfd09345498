//! Integration tests for the complete theme analysis pipeline
//!
//! These tests validate the end-to-end workflow including:
//! - Theme file loading from a directory
//! - Palette extraction with deduplication
//! - The full report suite (palette, harmony, contrast, psychology,
//!   cross-theme)
//! - Color-level operations (compare, replace, suggest)
//! - Error handling for missing themes and malformed colors

use std::fs;
use std::path::PathBuf;

use theme_colors::analysis::{
    self, compare, replace_impact, suggest, ContrastStatus, SuggestFilter,
};
use theme_colors::color::hue_distance;
use theme_colors::harmony::HarmonyKind;
use theme_colors::theme::{load_themes, Theme, ThemeSet};
use theme_colors::{AnalysisError, Color};

const DARK_THEME: &str = r##"{
    "name": "patina-dark",
    "base": "vs-dark",
    "colors": {
        "editor.background": "#121212",
        "editor.foreground": "#dbd7ca",
        "panel.border": "#2a2a2a",
        "editorBracketMatch.border": "#4d937550"
    },
    "tokenColors": [
        { "scope": "keyword", "settings": { "foreground": "#4d9375" } },
        { "scope": ["string", "string.quoted"], "settings": { "foreground": "#c98a7d" } },
        { "scope": "constant.numeric", "settings": { "foreground": "#4c9a91" } },
        { "scope": "comment", "settings": { "foreground": "#758575" } }
    ],
    "semanticTokenColors": {
        "function": "#80a665"
    }
}"##;

const LIGHT_THEME: &str = r##"{
    "name": "patina-light",
    "base": "vs",
    "colors": {
        "editor.background": "#f5f1e8",
        "editor.foreground": "#393a34"
    },
    "tokenColors": [
        { "scope": "keyword", "settings": { "foreground": "#1c6b48" } },
        { "scope": ["string", "string.quoted"], "settings": { "foreground": "#b56959" } },
        { "scope": "comment", "settings": { "foreground": "#a0ada0" } }
    ]
}"##;

fn theme_set() -> ThemeSet {
    let mut set = ThemeSet::new();
    let dark: Theme = serde_json::from_str(DARK_THEME).unwrap();
    let light: Theme = serde_json::from_str(LIGHT_THEME).unwrap();
    set.insert("patina-dark".to_string(), dark);
    set.insert("patina-light".to_string(), light);
    set
}

fn write_theme_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("theme-colors-it-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("a-dark.json"), DARK_THEME).unwrap();
    fs::write(dir.join("b-light.json"), LIGHT_THEME).unwrap();
    dir
}

// ============================================================================
// Theme Loading
// ============================================================================

#[test]
fn test_load_themes_from_directory() {
    let dir = write_theme_dir("load");
    let themes = load_themes(&dir).unwrap();

    // Keyed by declared name, in filename order
    let names: Vec<&str> = themes.keys().map(String::as_str).collect();
    assert_eq!(names, ["patina-dark", "patina-light"]);
    assert!(themes["patina-dark"].is_dark());
    assert!(!themes["patina-light"].is_dark());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_themes_missing_directory() {
    let result = load_themes(&PathBuf::from("/nonexistent/theme-colors-dir"));
    assert!(matches!(result, Err(AnalysisError::ThemeRead { .. })));
}

#[test]
fn test_load_themes_malformed_json() {
    let dir = std::env::temp_dir().join(format!("theme-colors-it-bad-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("broken.json"), "{ not json").unwrap();

    let result = load_themes(&dir);
    assert!(matches!(result, Err(AnalysisError::ThemeParse { .. })));

    fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Palette Report
// ============================================================================

#[test]
fn test_palette_report_end_to_end() {
    let themes = theme_set();
    let reports = analysis::palette_report(&themes).unwrap();
    assert_eq!(reports.len(), 2);

    let dark = &reports[0];
    assert_eq!(dark.theme, "patina-dark");
    assert_eq!(dark.background, "#121212");
    // 4 tokenColors rules + 1 semantic entry, all distinct hexes
    assert_eq!(dark.syntax.len(), 5);
    // The string scope array collapses onto one entry with both roles
    let string = dark
        .syntax
        .iter()
        .find(|c| c.color.hex == "#c98a7d")
        .expect("string color present");
    assert_eq!(string.roles, ["string", "string.quoted"]);
    // Alpha suffix on the bracket border is stripped during extraction
    let bracket = dark
        .ui
        .iter()
        .find(|c| c.roles.iter().any(|r| r.contains("BracketMatch")))
        .expect("bracket border present");
    assert_eq!(bracket.color.hex, "#4d9375");
}

#[test]
fn test_palette_report_empty_theme_is_an_error() {
    let mut themes = ThemeSet::new();
    themes.insert("bare".to_string(), Theme::default());
    let err = analysis::palette_report(&themes).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyPalette { theme } if theme == "bare"));
}

// ============================================================================
// Harmony Report
// ============================================================================

#[test]
fn test_harmony_report_end_to_end() {
    let themes = theme_set();
    let reports = analysis::harmony_report(&themes).unwrap();
    let dark = &reports[0];

    // Comment gray (#758575, s ≈ 9%) is filtered out of classification
    assert!(dark.samples.iter().all(|s| s.label != "comment"));
    assert!(!dark.samples.is_empty());

    // Matches are ranked by confidence descending
    for pair in dark.matches.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    for m in &dark.matches {
        assert!(m.confidence > 0.0 && m.confidence <= 1.0);
    }
}

// ============================================================================
// Contrast Report
// ============================================================================

#[test]
fn test_contrast_report_end_to_end() {
    let themes = theme_set();
    let reports = analysis::contrast_report(&themes, 4.5).unwrap();

    let dark = &reports[0];
    // #dbd7ca on #121212 is far above AA
    assert!(dark.main.ratio > 10.0, "main text ratio should be high");
    assert!(dark.main.aa_normal && dark.main.aaa_normal);

    // Worst ratio sorts first
    for pair in dark.syntax.windows(2) {
        assert!(pair[0].result.ratio <= pair[1].result.ratio);
    }

    // The keyword green passes the AA floor on the dark background
    let keyword = dark
        .syntax
        .iter()
        .find(|s| s.scope == "keyword")
        .expect("keyword measured");
    assert_eq!(keyword.status, ContrastStatus::Pass);

    // panel.border is audited, bracket border keys are excluded
    assert_eq!(dark.borders.len(), 1);
    assert_eq!(dark.borders[0].key, "panel.border");
}

#[test]
fn test_contrast_floor_is_configurable() {
    let themes = theme_set();
    let strict = analysis::contrast_report(&themes, 7.0).unwrap();
    let lenient = analysis::contrast_report(&themes, 3.0).unwrap();
    assert!(strict[0].passing <= lenient[0].passing);
}

// ============================================================================
// Psychology Report
// ============================================================================

#[test]
fn test_psychology_report_end_to_end() {
    let themes = theme_set();
    let reports = analysis::psychology_report(&themes).unwrap();

    let dark = &reports[0];
    assert!(dark.is_dark);
    assert_eq!(dark.background.lightness_class, "very dark");
    // The green-leaning syntax palette reads calm overall
    assert!(dark
        .emotion_counts
        .keys()
        .any(|e| e.contains("calm") || e.contains("growth")));
    assert!(dark.average_saturation > 0.0 && dark.average_saturation < 100.0);
    assert!(dark.mood.is_some());

    // Every reported color is chromatic and carries a hue emotion
    for color in &dark.colors {
        assert!(
            color.profile.hue_emotion.is_some(),
            "chromatic color {} should have a hue emotion",
            color.hex
        );
    }
}

// ============================================================================
// Cross-Theme Report
// ============================================================================

#[test]
fn test_cross_theme_report_end_to_end() {
    let themes = theme_set();
    let report = analysis::cross_theme_report(&themes).unwrap();

    // keyword, string, string.quoted are chromatic in both themes;
    // the comment grays fall under the chromatic floor
    assert_eq!(report.common_scopes, 3);

    // Both keyword greens sit near 150°, so nothing is flagged
    assert!(
        report.inconsistent.is_empty(),
        "consistent palettes should not be flagged: {:?}",
        report.inconsistent
    );

    assert_eq!(report.main_contrast.len(), 2);
    for ratio in report.main_contrast.values() {
        assert!(*ratio > 4.5, "both themes have readable main text");
    }
}

#[test]
fn test_cross_theme_flags_hue_drift() {
    let mut themes = theme_set();
    // Recolor the light theme's keyword to blue: spread jumps past tolerance
    let drifted: Theme = serde_json::from_str(
        r##"{
            "tokenColors": [
                { "scope": "keyword", "settings": { "foreground": "#2255cc" } },
                { "scope": ["string", "string.quoted"], "settings": { "foreground": "#b56959" } }
            ]
        }"##,
    )
    .unwrap();
    themes.insert("patina-light".to_string(), drifted);

    let report = analysis::cross_theme_report(&themes).unwrap();
    assert!(report
        .inconsistent
        .iter()
        .any(|s| s.scope == "keyword"), "keyword drift should be flagged");
}

// ============================================================================
// Compare / Replace / Suggest
// ============================================================================

#[test]
fn test_compare_metrics_are_consistent() {
    let result = compare("#4d9375", "#c98a7d").unwrap();
    assert!(result.delta_e76 > 0.0);
    assert!(result.delta_e2000 > 0.0);
    // CIEDE2000 compresses large chroma differences relative to CIE76
    assert!(result.delta_e2000 < result.delta_e76);
    assert!(result.hue_distance > 0.0 && result.hue_distance <= 180.0);
    assert!(result.contrast_ratio >= 1.0);
}

#[test]
fn test_compare_invalid_input() {
    let err = compare("#12345", "#ffffff").unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidColor { ref context, .. } if context == "compare"
    ));
}

#[test]
fn test_replace_impact_end_to_end() {
    let themes = theme_set();
    let impact = replace_impact(&themes, "#4d9375", "#4c9a91").unwrap();

    // Only the dark theme uses the color, in both UI and syntax roles
    assert_eq!(impact.usages.len(), 1);
    assert_eq!(impact.usages[0].theme, "patina-dark");
    assert!(impact.usages[0].syntax_roles.contains(&"keyword".to_string()));
    assert!(!impact.usages[0].ui_roles.is_empty());

    assert_eq!(impact.contrast_changes.len(), 1);
    assert_eq!(impact.harmony_after.len(), 1);
    assert!(!impact.recommendations.is_empty());
}

#[test]
fn test_suggest_complement_classifies_as_complementary() {
    let suggestions = suggest("#4d9375", SuggestFilter::All).unwrap();

    let complement = suggestions
        .partners
        .iter()
        .find(|p| p.family == "complementary")
        .expect("complement generated");
    // The generated pair must itself classify as complementary
    let samples = [
        theme_colors::harmony::HueSample::new("seed", suggestions.seed.hsl.h),
        theme_colors::harmony::HueSample::new("partner", complement.color.hsl.h),
    ];
    let matches = theme_colors::harmony::classify(&samples);
    assert!(
        matches.iter().any(|m| m.kind == HarmonyKind::Complementary),
        "complement of a color should classify as complementary with it"
    );
}

#[test]
fn test_suggest_partners_preserve_saturation_and_lightness() {
    let suggestions = suggest("#4d9375", SuggestFilter::All).unwrap();
    for partner in &suggestions.partners {
        // 8-bit rounding allows small drift only
        assert!((partner.color.hsl.s - suggestions.seed.hsl.s).abs() < 3.0);
        assert!((partner.color.hsl.l - suggestions.seed.hsl.l).abs() < 3.0);
    }
    for variation in &suggestions.variations {
        assert!(hue_distance(variation.color.hsl.h, suggestions.seed.hsl.h) < 5.0);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_full_pipeline_is_deterministic() {
    let themes = theme_set();
    let first = analysis::harmony_report(&themes).unwrap();
    let second = analysis::harmony_report(&themes).unwrap();
    assert_eq!(first, second);

    let color_a = Color::parse("#4d9375").unwrap();
    let color_b = Color::parse("#4d9375").unwrap();
    assert_eq!(color_a, color_b);
}
