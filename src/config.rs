//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a yamltree.toml, and if present we load settings from there.
//! This provides which file extensions count as YAML, the outline panel width and the
//! editor's highlighting theme.

use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "yamltree.toml";

fn default_extensions() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

fn default_theme() -> String {
    "dracula".to_string()
}

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from yamltree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = default_extensions())]
    /// File suffixes treated as YAML and matched when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = 40)]
    /// Outline panel width as a percentage of the terminal.
    pub outline_width: u16,
    #[facet(default = default_theme())]
    /// Syntax highlighting theme for the editor view.
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: default_extensions(),
            outline_width: 40,
            theme: default_theme(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from yamltree.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from a specific file, using defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config.clamped(),
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Keep the outline panel between a tenth and nine tenths of the screen.
    fn clamped(mut self) -> Self {
        self.outline_width = self.outline_width.clamp(10, 90);
        self
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
