//! Output of a [`ThemeRegistry`].
//!
//! Themes are written as a stylesheet of CSS custom properties (one rule per section), printed as
//! JSON, or shown as a table with color swatches.

use colored::Colorize;
use eyre::{Result, bail};
use log::debug;
use serde::Serialize;
use tinytemplate::TinyTemplate;

use photo_theme::ThemeRegistry;
use photo_theme::color::hex_to_rgb;

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::Path;

static STYLESHEET_TEMPLATE: &str = r#":root \{
    color-scheme: { color_scheme };
}
{{ for section in sections }}
[data-section="{ section.name }"] \{
    --section-background: { section.background };
    --section-text: { section.text };
    --section-accent: { section.accent };
}
{{ endfor }}"#;

#[derive(Clone, Debug, Serialize)]
struct SectionRule<'a> {
    name: &'a str,
    background: &'a str,
    text: &'a str,
    accent: &'a str,
}

#[derive(Clone, Debug, Serialize)]
struct Stylesheet<'a> {
    color_scheme: &'static str,
    sections: Vec<SectionRule<'a>>,
}

impl<'a> Stylesheet<'a> {
    fn new(registry: &'a ThemeRegistry) -> Self {
        Self {
            color_scheme: if registry.dark_mode() { "dark" } else { "light" },
            sections: registry
                .iter()
                .map(|(name, theme)| SectionRule {
                    name,
                    background: &theme.background,
                    text: &theme.text,
                    accent: &theme.accent,
                })
                .collect(),
        }
    }
}

/// Ensure a file's parent directory exists.
pub fn ensure_parent(file: &Path) -> Result<()> {
    match file.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Ok(()),
        Some(parent) => {
            debug!("creating directory at {}", parent.display());
            create_dir_all(parent)?;
            Ok(())
        }
        None => bail!("invalid path {}", file.display()),
    }
}

/// Write bytes to a file, creating parent directories as needed.
pub fn write_file(target: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(target)?;
    debug!("writing to {}", target.display());
    let mut f = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(target)?;
    f.write_all(content)?;
    Ok(())
}

/// Render the stylesheet for every section in the registry.
pub fn render_stylesheet(registry: &ThemeRegistry) -> Result<String> {
    let mut template = TinyTemplate::new();
    template.set_default_formatter(&tinytemplate::format_unescaped);
    template.add_template("stylesheet", STYLESHEET_TEMPLATE)?;
    Ok(template.render("stylesheet", &Stylesheet::new(registry))?)
}

pub fn write_stylesheet(target: &Path, registry: &ThemeRegistry) -> Result<()> {
    write_file(target, render_stylesheet(registry)?.as_bytes())
}

pub fn render_json(registry: &ThemeRegistry) -> Result<String> {
    Ok(serde_json::to_string_pretty(registry)?)
}

fn swatch(hex: &str) -> String {
    let rgb = hex_to_rgb(hex);
    format!("{} {hex}", "  ".on_truecolor(rgb.r, rgb.g, rgb.b))
}

/// Print one line per section with color swatches.
pub fn print_table(registry: &ThemeRegistry) {
    let mode = if registry.dark_mode() { "dark" } else { "light" };
    println!("{} {mode}", "mode".bold());
    for (name, theme) in registry.iter() {
        println!(
            "{:<12} {}  {}  {}  contrast {:.2}",
            name.bold(),
            swatch(&theme.background),
            swatch(&theme.text),
            swatch(&theme.accent),
            theme.contrast()
        );
    }
}
