//! # theme-colors
//!
//! Color science engine for editor theme palettes: exact conversions
//! between hex, RGB, HSL, and CIELAB; WCAG contrast measurement; harmony
//! classification over hue sets; and a deterministic color psychology
//! mapping. On top of those sit theme-level reports (palette, harmony,
//! contrast, psychology, cross-theme consistency) and color-level
//! operations (compare, replacement impact, harmony suggestions).
//!
//! ## Quick start
//!
//! ```no_run
//! use theme_colors::{analysis, theme};
//!
//! fn main() -> theme_colors::Result<()> {
//!     let dir = theme::resolve_themes_dir(None);
//!     let themes = theme::load_themes(&dir)?;
//!     for report in analysis::harmony_report(&themes)? {
//!         for m in &report.matches {
//!             println!(
//!                 "{}: {} (confidence {:.2})",
//!                 report.theme,
//!                 m.kind.label(),
//!                 m.confidence
//!             );
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Determinism
//!
//! Every operation is a pure function of its inputs. Conversions use fixed
//! D65 constants, tables are ordered constants, and palettes preserve
//! source order, so the same theme files always produce the same reports.

pub mod analysis;
pub mod color;
pub mod constants;
pub mod error;
pub mod harmony;
pub mod palette;
pub mod psychology;
pub mod theme;

pub use error::{AnalysisError, Result};
pub use palette::{Color, Palette, PaletteEntry};
