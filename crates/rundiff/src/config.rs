//! Configuration loading

use anyhow::{Context, Result};
use ratatui::style::Color;
use rundiff_core::ViewMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging to file
    pub debug: bool,
    /// Path to log directory
    pub log_path: PathBuf,
    /// Layout used when the viewer opens
    pub view_mode: ViewMode,
    /// Open with every file expanded
    pub expand_all: bool,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_path: default_log_path(),
            view_mode: ViewMode::Unified,
            expand_all: false,
            theme: ThemeConfig::default(),
        }
    }
}

/// Colors as written in the config file: names (`"green"`) or `#rrggbb`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub added: String,
    pub removed: String,
    pub context: String,
    pub line_number: String,
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            added: "green".into(),
            removed: "red".into(),
            context: "gray".into(),
            line_number: "darkgray".into(),
            accent: "cyan".into(),
        }
    }
}

/// Colors resolved for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub added: Color,
    pub removed: Color,
    pub context: Color,
    pub line_number: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        ThemeConfig::default().resolve()
    }
}

impl ThemeConfig {
    /// Parse every color, keeping the built-in one for values that don't parse
    pub fn resolve(&self) -> Theme {
        Theme {
            added: parse_color("added", &self.added, Color::Green),
            removed: parse_color("removed", &self.removed, Color::Red),
            context: parse_color("context", &self.context, Color::Gray),
            line_number: parse_color("line_number", &self.line_number, Color::DarkGray),
            accent: parse_color("accent", &self.accent, Color::Cyan),
        }
    }
}

fn parse_color(key: &str, value: &str, fallback: Color) -> Color {
    value.parse().unwrap_or_else(|_| {
        warn!(key, value, "unknown theme color, using default");
        fallback
    })
}

/// Default log path: ~/.config/rundiff/logs
fn default_log_path() -> PathBuf {
    config_dir().join("logs")
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("rundiff")
}

/// Get the default configuration file path.
pub fn default_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration from file.
///
/// If `path` is `None`, uses the default path. A missing file yields the
/// defaults, with logs placed next to where the file would be.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = path.map(PathBuf::from).unwrap_or_else(default_path);
    let config_dir = path.parent();

    if !path.exists() {
        let mut config = Config::default();
        if let Some(dir) = config_dir {
            config.log_path = dir.join("logs");
        }
        return Ok(config);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    if config.log_path == default_log_path() {
        if let Some(dir) = config_dir {
            config.log_path = dir.join("logs");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = load(Some(&path)).unwrap();
        assert!(!config.debug);
        assert_eq!(config.view_mode, ViewMode::Unified);
        assert!(!config.expand_all);
        assert_eq!(config.log_path, dir.path().join("logs"));
    }

    #[test]
    fn test_load_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
debug = true
view_mode = "split"
expand_all = true

[theme]
added = "#00ff00"
"##,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(config.debug);
        assert_eq!(config.view_mode, ViewMode::Split);
        assert!(config.expand_all);
        assert_eq!(config.theme.added, "#00ff00");
        assert_eq!(config.theme.removed, "red");

        let theme = config.theme.resolve();
        assert_eq!(theme.added, Color::Rgb(0, 255, 0));
        assert_eq!(theme.removed, Color::Red);
    }

    #[test]
    fn test_explicit_log_path_is_kept() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_path = \"/var/log/rundiff\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/var/log/rundiff"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "view_mode = \"diagonal\"\n").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_bad_color_falls_back() {
        let theme = ThemeConfig {
            accent: "not-a-color".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(theme.resolve().accent, Color::Cyan);
    }
}
