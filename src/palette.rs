//! Color value objects and ordered palette extraction
//!
//! A [`Palette`] is the unique set of colors one theme uses, in first-seen
//! source order, with each color carrying the roles (UI keys or token
//! scopes) that reference it. Uniqueness is by normalized hex value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, rgb_to_hsl, rgb_to_lab, Hsl, Lab, Rgb};
use crate::Result;

/// One color in every representation the analyses need
///
/// Built once at parse time; conversions are deterministic, so the fields
/// always agree with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Normalized lowercase "#rrggbb"
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub lab: Lab,
}

impl Color {
    /// Parse a hex string into a fully converted color
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed hex input.
    pub fn parse(hex: &str) -> Result<Self> {
        let rgb = hex_to_rgb(hex)?;
        Ok(Self::from_rgb(rgb))
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb.hex(),
            rgb,
            hsl: rgb_to_hsl(rgb),
            lab: rgb_to_lab(rgb),
        }
    }
}

/// Normalize a raw theme hex value for uniqueness comparison
///
/// Lowercases and truncates an alpha channel ("#rrggbbaa" → "#rrggbb");
/// theme files routinely carry alpha, the analyses never do.
pub fn normalize_hex(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    let max = if lower.starts_with('#') { 7 } else { 6 };
    // Truncate on a character boundary; non-ASCII input must reach the
    // parser intact and fail there, not panic here
    match lower.char_indices().nth(max) {
        Some((idx, _)) => lower[..idx].to_string(),
        None => lower,
    }
}

/// A unique color plus every role that uses it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: Color,
    pub roles: Vec<String>,
}

/// Ordered unique colors for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub theme: String,
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from (role, raw hex) pairs
    ///
    /// Colors are deduplicated by normalized hex; the first occurrence
    /// fixes the position, later roles accumulate on the existing entry.
    /// Unparsable values are skipped so one bad color never aborts the
    /// whole extraction.
    pub fn from_entries<I>(theme: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_hex: IndexMap<String, PaletteEntry> = IndexMap::new();
        for (role, raw) in entries {
            let normalized = normalize_hex(&raw);
            let Ok(color) = Color::parse(&normalized) else {
                continue;
            };
            by_hex
                .entry(color.hex.clone())
                .or_insert_with(|| PaletteEntry {
                    color,
                    roles: Vec::new(),
                })
                .roles
                .push(role);
        }
        Self {
            theme: theme.into(),
            entries: by_hex.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry by normalized hex
    pub fn get(&self, hex: &str) -> Option<&PaletteEntry> {
        let normalized = normalize_hex(hex);
        self.entries.iter().find(|e| e.color.hex == normalized)
    }
}
