//! Command-line interface for theme palette analysis
//!
//! Reports go to stdout, diagnostics to stderr, exit code 1 on any error.

use std::env;
use std::path::PathBuf;
use std::process;

use theme_colors::analysis::{self, ContrastStatus, SuggestFilter};
use theme_colors::constants::wcag;
use theme_colors::theme::{self, ThemeSet};
use theme_colors::Result;

fn print_help() {
    println!("theme-colors - color science analysis for editor themes");
    println!();
    println!("USAGE:");
    println!("    theme-colors [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    palette                 List each theme's unique colors");
    println!("    harmony                 Classify color harmony patterns");
    println!("    contrast                WCAG contrast audit");
    println!("    psychology              Emotional association report");
    println!("    cross-theme             Consistency across theme variants");
    println!("    compare <hex> <hex>     Perceptual metrics between two colors");
    println!("    replace <old> <new>     Impact of replacing a color");
    println!("    suggest <hex> [family]  Harmony partners for a color");
    println!("                            (family: all, complementary, analogous,");
    println!("                             triadic, split, tetradic)");
    println!("    all                     Every theme report in sequence");
    println!();
    println!("OPTIONS:");
    println!("    -d, --themes-dir <DIR>  Themes directory");
    println!("                            (default: $THEME_COLORS_DIR, then ./themes)");
    println!("    -t, --theme <NAME>      Restrict reports to one theme");
    println!("    -m, --min <RATIO>       Contrast floor for the audit (default 4.5)");
    println!("    -h, --help              Print this help");
}

struct Options {
    themes_dir: Option<PathBuf>,
    theme: Option<String>,
    min_contrast: f64,
    command: Vec<String>,
}

fn parse_args() -> Options {
    let mut opts = Options {
        themes_dir: None,
        theme: None,
        min_contrast: wcag::AA_NORMAL,
        command: Vec::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-d" | "--themes-dir" => match args.next() {
                Some(dir) => opts.themes_dir = Some(PathBuf::from(dir)),
                None => missing_value(&arg),
            },
            "-t" | "--theme" => match args.next() {
                Some(name) => opts.theme = Some(name),
                None => missing_value(&arg),
            },
            "-m" | "--min" => match args.next().and_then(|v| v.parse::<f64>().ok()) {
                Some(ratio) => opts.min_contrast = ratio,
                None => missing_value(&arg),
            },
            _ => opts.command.push(arg),
        }
    }
    opts
}

fn missing_value(flag: &str) -> ! {
    eprintln!("error: {flag} requires a value");
    process::exit(1);
}

fn load(opts: &Options) -> Result<ThemeSet> {
    let dir = theme::resolve_themes_dir(opts.themes_dir.as_deref());
    let mut themes = theme::load_themes(&dir)?;
    if let Some(name) = &opts.theme {
        if !themes.contains_key(name) {
            eprintln!("error: theme {name:?} not found in {}", dir.display());
            process::exit(1);
        }
        themes.retain(|k, _| k == name);
    }
    Ok(themes)
}

fn run_palette(themes: &ThemeSet) -> Result<()> {
    for report in analysis::palette_report(themes)? {
        println!("=== {} ===", report.theme);
        println!(
            "background {} ({})",
            report.background,
            report.base.as_deref().unwrap_or("unspecified base")
        );
        println!("-- UI colors ({}) --", report.ui.len());
        for c in &report.ui {
            println!(
                "  {}  {:>12}  contrast {:5.2}  {}",
                c.color.hex,
                c.temperature,
                c.contrast_vs_background,
                c.roles.join(", ")
            );
        }
        println!("-- Syntax colors ({}) --", report.syntax.len());
        for c in &report.syntax {
            println!(
                "  {}  {:>12}  contrast {:5.2}  {}",
                c.color.hex,
                c.temperature,
                c.contrast_vs_background,
                c.roles.join(", ")
            );
        }
        println!();
    }
    Ok(())
}

fn run_harmony(themes: &ThemeSet) -> Result<()> {
    for report in analysis::harmony_report(themes)? {
        println!("=== {} ===", report.theme);
        println!("{} chromatic hues", report.samples.len());
        if report.matches.is_empty() {
            println!("no harmony patterns within tolerance");
        }
        for m in &report.matches {
            let labels: Vec<&str> = m.samples.iter().map(|s| s.label.as_str()).collect();
            println!(
                "  {:<20} confidence {:.2}  deviation {:4.1}\u{b0}  [{}]",
                m.kind.label(),
                m.confidence,
                m.deviation,
                labels.join(", ")
            );
        }
        let b = &report.balance;
        println!(
            "temperature balance: {} warm / {} cool / {} transitional",
            b.warm, b.cool, b.transitional
        );
        println!();
    }
    Ok(())
}

fn pass(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "FAIL"
    }
}

fn run_contrast(themes: &ThemeSet, min_contrast: f64) -> Result<()> {
    for report in analysis::contrast_report(themes, min_contrast)? {
        println!("=== {} ===", report.theme);
        println!(
            "main text: {} on {} = {:.2} (AA {}, AAA {})",
            report.main.foreground,
            report.main.background,
            report.main.ratio,
            pass(report.main.aa_normal),
            pass(report.main.aaa_normal)
        );
        println!(
            "syntax colors passing {:.1}:1 floor: {}/{}",
            min_contrast,
            report.passing,
            report.syntax.len()
        );
        for s in &report.syntax {
            let mark = match s.status {
                ContrastStatus::Pass => "pass",
                ContrastStatus::Warn => "warn",
                ContrastStatus::Fail => "FAIL",
            };
            println!(
                "  [{}] {}  {:5.2}  {}",
                mark, s.result.foreground, s.result.ratio, s.scope
            );
        }
        if !report.borders.is_empty() {
            println!("borders:");
            for b in &report.borders {
                let visibility = if b.visible {
                    "visible"
                } else if b.subtle {
                    "subtle"
                } else {
                    "invisible"
                };
                println!(
                    "  {}  {:<9}  dE {:5.1}  contrast {:4.2}  {}",
                    b.hex, visibility, b.delta_e, b.contrast, b.key
                );
            }
        }
        println!();
    }
    Ok(())
}

fn run_psychology(themes: &ThemeSet) -> Result<()> {
    for report in analysis::psychology_report(themes)? {
        println!("=== {} ===", report.theme);
        println!(
            "background {} ({}): {}",
            report.background_hex,
            report.background.lightness_class,
            report.background.lightness_response
        );
        println!(
            "average saturation {:.1}% — mood: {}",
            report.average_saturation,
            report.mood.as_deref().unwrap_or("n/a")
        );
        for c in &report.colors {
            let emotion = c
                .profile
                .hue_emotion
                .as_ref()
                .map_or("(neutral)", |e| e.emotion.as_str());
            println!(
                "  {}  {:>12}  {:<32} {}",
                c.hex,
                c.profile.temperature,
                emotion,
                c.roles.join(", ")
            );
        }
        if !report.emotion_counts.is_empty() {
            println!("dominant associations:");
            for (emotion, count) in &report.emotion_counts {
                println!("  {count}x {emotion}");
            }
        }
        println!();
    }
    Ok(())
}

fn run_cross_theme(themes: &ThemeSet) -> Result<()> {
    let report = analysis::cross_theme_report(themes)?;
    println!("scopes shared by all themes: {}", report.common_scopes);
    if report.inconsistent.is_empty() {
        println!("no shared scope exceeds the hue spread tolerance");
    } else {
        println!("inconsistent scopes (widest spread first):");
        for scope in &report.inconsistent {
            println!("  {}  spread {:.1}\u{b0}", scope.scope, scope.spread);
            for (theme, hue) in &scope.hues {
                println!("    {theme}: {hue:.1}\u{b0}");
            }
        }
    }
    println!("main text contrast:");
    for (theme, ratio) in &report.main_contrast {
        println!("  {theme}: {ratio:.2}");
    }
    Ok(())
}

fn run_compare(first: &str, second: &str) -> Result<()> {
    let result = analysis::compare(first, second)?;
    println!("{} vs {}", result.first.hex, result.second.hex);
    println!("  delta E (CIE76):     {:6.2}  {}", result.delta_e76, result.perceptual);
    println!("  delta E (CIEDE2000): {:6.2}", result.delta_e2000);
    println!("  hue distance:        {:6.2}\u{b0}", result.hue_distance);
    println!("  contrast ratio:      {:6.2}:1", result.contrast_ratio);
    Ok(())
}

fn run_replace(themes: &ThemeSet, old: &str, new: &str) -> Result<()> {
    let impact = analysis::replace_impact(themes, old, new)?;
    println!(
        "{} -> {}  (dE {:.2}, {})",
        impact.old.hex, impact.new.hex, impact.delta_e, impact.perceptual
    );
    if impact.usages.is_empty() {
        println!("no loaded theme uses {}", impact.old.hex);
    }
    for usage in &impact.usages {
        println!("{}:", usage.theme);
        if !usage.ui_roles.is_empty() {
            println!("  ui: {}", usage.ui_roles.join(", "));
        }
        if !usage.syntax_roles.is_empty() {
            println!("  syntax: {}", usage.syntax_roles.join(", "));
        }
    }
    for change in &impact.contrast_changes {
        println!(
            "{}: contrast {:.2} -> {:.2}",
            change.theme, change.before.ratio, change.after.ratio
        );
    }
    for rec in &impact.recommendations {
        println!("note: {rec}");
    }
    Ok(())
}

fn run_suggest(seed: &str, family: Option<&str>) -> Result<()> {
    let filter = match family {
        None => SuggestFilter::All,
        Some(name) => match SuggestFilter::parse(name) {
            Some(filter) => filter,
            None => {
                eprintln!(
                    "error: unknown harmony family {name:?} \
                     (expected all, complementary, analogous, triadic, split, tetradic)"
                );
                process::exit(1);
            }
        },
    };
    let suggestions = analysis::suggest(seed, filter)?;
    println!("seed {}", suggestions.seed.hex);
    for partner in &suggestions.partners {
        println!(
            "  {:<20} {:+7.1}\u{b0}  {}  dE {:.1}",
            partner.family, partner.rotation, partner.color.hex, partner.delta_e
        );
    }
    println!("lightness variations:");
    for variation in &suggestions.variations {
        println!("  L{:+5.1}  {}", variation.offset, variation.color.hex);
    }
    Ok(())
}

fn run(opts: &Options) -> Result<()> {
    let command = opts.command.first().map(String::as_str).unwrap_or("");
    match command {
        "palette" => run_palette(&load(opts)?),
        "harmony" => run_harmony(&load(opts)?),
        "contrast" => run_contrast(&load(opts)?, opts.min_contrast),
        "psychology" => run_psychology(&load(opts)?),
        "cross-theme" => run_cross_theme(&load(opts)?),
        "all" => {
            let themes = load(opts)?;
            run_palette(&themes)?;
            run_harmony(&themes)?;
            run_contrast(&themes, opts.min_contrast)?;
            run_psychology(&themes)?;
            run_cross_theme(&themes)
        }
        "compare" => match &opts.command[1..] {
            [first, second] => run_compare(first, second),
            _ => usage_error("compare requires two hex colors"),
        },
        "replace" => match &opts.command[1..] {
            [old, new] => run_replace(&load(opts)?, old, new),
            _ => usage_error("replace requires an old and a new hex color"),
        },
        "suggest" => match &opts.command[1..] {
            [seed] => run_suggest(seed, None),
            [seed, family] => run_suggest(seed, Some(family)),
            _ => usage_error("suggest requires a hex color"),
        },
        "" => {
            print_help();
            process::exit(1);
        }
        other => usage_error(&format!("unknown command {other:?}")),
    }
}

fn usage_error(msg: &str) -> ! {
    eprintln!("error: {msg}");
    eprintln!("run with --help for usage");
    process::exit(1);
}

fn main() {
    let opts = parse_args();
    if let Err(err) = run(&opts) {
        eprintln!("error: {err}");
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}
