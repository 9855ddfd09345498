//! Theme file loading and the theme data model
//!
//! Themes are VS Code-style JSON: a `colors` map of UI keys, a
//! `tokenColors` array of syntax rules (scope may be a string or an array),
//! and an optional `semanticTokenColors` map. Maps keep source order so
//! palette listings reflect the file.
//!
//! Directory resolution order:
//!   1. an explicit path argument
//!   2. the `THEME_COLORS_DIR` environment variable
//!   3. `themes/` relative to the current working directory

use std::env;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// Environment variable naming the themes directory
pub const THEMES_DIR_ENV: &str = "THEME_COLORS_DIR";

/// Default themes directory relative to the working directory
pub const DEFAULT_THEMES_DIR: &str = "themes";

/// A set of themes keyed by theme name, in load order
pub type ThemeSet = IndexMap<String, Theme>;

/// One parsed theme definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub name: String,

    /// Base kind, e.g. "vs-dark" for dark themes
    #[serde(default)]
    pub base: Option<String>,

    /// UI colors: key → hex string, source order preserved
    #[serde(default)]
    pub colors: IndexMap<String, String>,

    /// Syntax token rules
    #[serde(default, rename = "tokenColors")]
    pub token_colors: Vec<TokenColor>,

    /// Semantic token colors: token kind → hex string (non-string values
    /// are tolerated and skipped during extraction)
    #[serde(default, rename = "semanticTokenColors")]
    pub semantic_token_colors: IndexMap<String, serde_json::Value>,
}

/// One `tokenColors` rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenColor {
    #[serde(default)]
    pub scope: Option<Scope>,

    #[serde(default)]
    pub settings: TokenSettings,
}

/// A scope selector: themes write either a single string or an array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scope {
    One(String),
    Many(Vec<String>),
}

impl Scope {
    fn names(&self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s.clone()],
            Self::Many(v) => v.clone(),
        }
    }
}

/// Settings block of a token rule; only the foreground matters here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSettings {
    #[serde(default)]
    pub foreground: Option<String>,
}

impl Theme {
    /// Declared editor background, defaulting to black
    pub fn background_hex(&self) -> &str {
        self.colors
            .get("editor.background")
            .map_or("#000000", String::as_str)
    }

    /// Declared editor foreground, defaulting to white
    pub fn foreground_hex(&self) -> &str {
        self.colors
            .get("editor.foreground")
            .map_or("#ffffff", String::as_str)
    }

    /// Whether this is a dark theme variant
    pub fn is_dark(&self) -> bool {
        self.base.as_deref() == Some("vs-dark")
    }

    /// UI color entries as (role, raw hex), in source order
    pub fn ui_color_entries(&self) -> Vec<(String, String)> {
        self.colors
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Syntax color entries as (scope, raw hex), in source order
    ///
    /// Semantic token entries follow the token rules, prefixed "semantic:".
    pub fn syntax_color_entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for rule in &self.token_colors {
            let Some(fg) = &rule.settings.foreground else {
                continue;
            };
            let Some(scope) = &rule.scope else {
                continue;
            };
            for name in scope.names() {
                entries.push((name, fg.clone()));
            }
        }
        for (key, value) in &self.semantic_token_colors {
            if let serde_json::Value::String(hex) = value {
                entries.push((format!("semantic:{key}"), hex.clone()));
            }
        }
        entries
    }
}

/// Resolve the themes directory from an optional override
pub fn resolve_themes_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Ok(dir) = env::var(THEMES_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_THEMES_DIR)
}

/// Load every `.json` theme file from a directory, sorted by filename
///
/// Themes are keyed by their declared name, falling back to the file stem.
///
/// # Errors
///
/// Returns `ThemeRead` when the directory or a file cannot be read and
/// `ThemeParse` when a file is not valid theme JSON.
pub fn load_themes(dir: &Path) -> Result<ThemeSet> {
    let entries = std::fs::read_dir(dir).map_err(|source| AnalysisError::ThemeRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut themes = ThemeSet::new();
    for path in paths {
        let theme = load_theme_file(&path)?;
        let name = if theme.name.is_empty() {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            theme.name.clone()
        };
        themes.insert(name, theme);
    }
    Ok(themes)
}

/// Load a single theme JSON file
pub fn load_theme_file(path: &Path) -> Result<Theme> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::ThemeRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AnalysisError::ThemeParse {
        path: path.to_path_buf(),
        source,
    })
}
