//! Per-section theme store.
//!
//! The registry is owned by whatever presents the themes. The analysis functions in this crate
//! never touch it; callers store their results with [`ThemeRegistry::set_theme`].

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::theme::Theme;

/// Built-in themes, `(section, background, text, accent)`.
const BUILTIN_THEMES: &[(&str, &str, &str, &str)] = &[
    ("about", "#ffffff", "#1f2937", "#3b82f6"),
    ("contact", "#ffffff", "#1f2937", "#3b82f6"),
    ("education", "#ffffff", "#1f2937", "#3b82f6"),
    ("experience", "#f9fafb", "#1f2937", "#3b82f6"),
    ("hero", "#ffffff", "#1f2937", "#3b82f6"),
    ("projects", "#f9fafb", "#1f2937", "#3b82f6"),
];

/// Section read by [`ThemeRegistry::theme_or_default`] for sections without any theme.
const FALLBACK_SECTION: &str = "hero";

/// Themes keyed by section name, plus the session-wide dark mode switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
    #[serde(skip, default = "builtin_themes")]
    defaults: BTreeMap<String, Theme>,
    #[serde(default)]
    dark_mode: bool,
}

fn builtin_themes() -> BTreeMap<String, Theme> {
    BUILTIN_THEMES
        .iter()
        .map(|&(section, background, text, accent)| {
            (section.to_owned(), Theme::new(background, text, accent))
        })
        .collect()
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    /// A registry holding the built-in theme of every known section.
    pub fn new() -> Self {
        let defaults = builtin_themes();
        Self {
            themes: defaults.clone(),
            defaults,
            dark_mode: false,
        }
    }

    /// Current theme of a section.
    pub fn theme(&self, section: &str) -> Option<&Theme> {
        self.themes.get(section)
    }

    /// Current theme of a section, or the hero default for sections the registry has never seen.
    pub fn theme_or_default(&self, section: &str) -> Theme {
        self.themes
            .get(section)
            .or_else(|| self.defaults.get(FALLBACK_SECTION))
            .cloned()
            .unwrap_or_else(|| Theme::new("#ffffff", "#1f2937", "#3b82f6"))
    }

    /// Replace the theme of a section, returning the previous one.
    pub fn set_theme(&mut self, section: impl Into<String>, theme: Theme) -> Option<Theme> {
        self.themes.insert(section.into(), theme)
    }

    /// Replace the default theme of a section and make it current.
    pub fn set_default(&mut self, section: impl Into<String>, theme: Theme) {
        let section = section.into();
        self.defaults.insert(section.clone(), theme.clone());
        self.themes.insert(section, theme);
    }

    /// Default theme of a section, if it has one.
    pub fn default_theme(&self, section: &str) -> Option<&Theme> {
        self.defaults.get(section)
    }

    /// Put a section back to its default. Sections without a default are removed.
    pub fn reset(&mut self, section: &str) {
        match self.defaults.get(section) {
            Some(theme) => {
                self.themes.insert(section.to_owned(), theme.clone());
            }
            None => {
                self.themes.remove(section);
            }
        }
    }

    /// Sections and their themes, ordered by section name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Theme)> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Flip dark mode, returning the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}
