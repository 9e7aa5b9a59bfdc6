//! Section manifest.
//!
//! A manifest lists the page sections whose themes are derived from photos, and optionally
//! overrides the built-in default theme of a section. Image paths are relative to the manifest's
//! directory.

use eyre::{Result, bail, ensure};
use hex_color::HexColor;
use log::{debug, info};
use serde::Deserialize;

use photo_theme::color::Rgb;
use photo_theme::{ImageRef, Theme, ThemeRegistry};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One page section.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Section identifier, e.g. `"hero"`.
    pub name: String,
    /// Photo the section is themed after.
    pub image: Option<PathBuf>,
    /// Default background override.
    pub background: Option<HexColor>,
    /// Default text color override.
    pub text: Option<HexColor>,
    /// Default accent override.
    pub accent: Option<HexColor>,
}

/// The top-level manifest document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Directory image paths are resolved against.
    #[serde(skip)]
    pub base: PathBuf,
    /// Initial dark mode setting.
    #[serde(default)]
    pub dark_mode: bool,
    /// Sections, in the order they are analyzed.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A section paired with the image to analyze for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub section: String,
    pub image: ImageRef,
}

fn to_hex(color: HexColor) -> String {
    Rgb::new(color.r, color.g, color.b).to_hex()
}

impl Section {
    /// Returns `true` if any default color is overridden.
    pub fn has_overrides(&self) -> bool {
        self.background.is_some() || self.text.is_some() || self.accent.is_some()
    }

    /// `base` with this section's overrides applied.
    pub fn default_theme(&self, base: &Theme) -> Theme {
        Theme {
            background: self.background.map_or_else(|| base.background.clone(), to_hex),
            text: self.text.map_or_else(|| base.text.clone(), to_hex),
            accent: self.accent.map_or_else(|| base.accent.clone(), to_hex),
        }
    }
}

impl Manifest {
    /// Read and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Parsing manifest at {}", path.display());
        let content = fs::read_to_string(path)?;
        let mut manifest = Self::parse(&content)?;
        manifest.base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(manifest)
    }

    /// Parse and validate manifest text. Image paths stay relative.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest = toml::from_str::<Self>(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut overridden = HashSet::new();
        for section in &self.sections {
            ensure!(!section.name.trim().is_empty(), "section with an empty name");
            if section.has_overrides() && !overridden.insert(section.name.as_str()) {
                bail!("{}: default colors overridden more than once", section.name);
            }
        }
        Ok(())
    }

    /// A registry with the built-in defaults, this manifest's overrides and dark mode setting.
    pub fn registry(&self) -> ThemeRegistry {
        let mut registry = ThemeRegistry::new();
        registry.set_dark_mode(self.dark_mode);
        for section in self.sections.iter().filter(|s| s.has_overrides()) {
            let base = registry.theme_or_default(&section.name);
            debug!("{}: overriding default theme", section.name);
            registry.set_default(section.name.as_str(), section.default_theme(&base));
        }
        registry
    }

    /// Sections that have an image, with paths resolved against [`Manifest::base`].
    pub fn jobs(&self) -> Vec<Job> {
        self.sections
            .iter()
            .filter_map(|s| {
                s.image.as_ref().map(|image| Job {
                    section: s.name.clone(),
                    image: ImageRef::Path(self.base.join(image)),
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub mod test {
    use std::path::{Path, PathBuf};

    use photo_theme::{ImageRef, Theme};

    use super::{Job, Manifest};

    pub static DUMMY_MANIFEST: &str = r##"
    [[sections]]
    name = "hero"
    image = "images/profile.jpg"

    [[sections]]
    name = "projects"
    image = "images/ecommerce-project.jpg"
    background = "#F0F4FF"

    [[sections]]
    name = "gallery"
    text = "#0B0B0B"
    "##;

    #[test]
    fn test_de_manifest() {
        let manifest = Manifest::parse(DUMMY_MANIFEST).unwrap();
        assert!(!manifest.dark_mode);
        assert_eq!(manifest.sections.len(), 3);
        assert_eq!(
            manifest.sections[0].image.as_deref(),
            Some(Path::new("images/profile.jpg"))
        );
        assert!(!manifest.sections[0].has_overrides());
        assert!(manifest.sections[1].has_overrides());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert!(manifest.sections.is_empty());
        assert!(manifest.jobs().is_empty());
        assert_eq!(manifest.registry().len(), 6);
    }

    #[test]
    fn test_partial_override() {
        let registry = Manifest::parse(DUMMY_MANIFEST).unwrap().registry();
        assert_eq!(
            registry.theme("projects"),
            Some(&Theme::new("#f0f4ff", "#1f2937", "#3b82f6"))
        );
        // Unknown sections start from the hero default.
        assert_eq!(
            registry.default_theme("gallery"),
            Some(&Theme::new("#ffffff", "#0b0b0b", "#3b82f6"))
        );
        assert_eq!(registry.theme("hero").unwrap().background, "#ffffff");
    }

    #[test]
    fn test_jobs() {
        let mut manifest = Manifest::parse(DUMMY_MANIFEST).unwrap();
        manifest.base = PathBuf::from("/srv/site");
        assert_eq!(
            manifest.jobs(),
            vec![
                Job {
                    section: "hero".to_owned(),
                    image: ImageRef::Path(PathBuf::from("/srv/site/images/profile.jpg")),
                },
                Job {
                    section: "projects".to_owned(),
                    image: ImageRef::Path(PathBuf::from(
                        "/srv/site/images/ecommerce-project.jpg"
                    )),
                },
            ]
        );
    }

    #[test]
    fn test_dark_mode() {
        let manifest = Manifest::parse("dark_mode = true").unwrap();
        assert!(manifest.registry().dark_mode());
    }

    #[test]
    fn test_invalid_manifests() {
        assert!(Manifest::parse("[[sections]]\nname = \"\"").is_err());
        assert!(Manifest::parse("[[sections]]\nname = \"hero\"\naccent = \"blue\"").is_err());
        assert!(
            Manifest::parse(
                "[[sections]]\nname = \"hero\"\ntext = \"#000000\"\n\
                 [[sections]]\nname = \"hero\"\ntext = \"#ffffff\""
            )
            .is_err()
        );
    }
}
