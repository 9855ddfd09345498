//! Analysis orchestration
//!
//! Composes the conversion engine, harmony classifier, and psychology
//! mapper into the theme-level reports and the color-level compare /
//! replace / suggest operations.

mod replacement;
mod reports;

pub use replacement::{
    compare, replace_impact, suggest, CompareResult, ContrastChange, LightnessVariation,
    ReplaceImpact, SuggestFilter, Suggestion, Suggestions, ThemeUsage,
};
pub use reports::{
    contrast_report, cross_theme_report, harmony_report, palette_report, psychology_report,
    BorderVisibility, ColorPsychology, ContrastReport, ContrastStatus, CrossThemeReport,
    HarmonyReport, PaletteColorReport, PaletteReport, PsychologyReport, ScopeSpread,
    SyntaxContrast,
};
