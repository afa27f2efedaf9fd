//! Configuration management for mdpdf.
//!
//! Parses `mdpdf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page width in columns.
    pub width: Option<usize>,
    /// Override page height in lines.
    pub height: Option<usize>,
    /// Override GitHub Flavored Markdown flag.
    pub gfm: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpdf.toml";

const MIN_WIDTH: usize = 20;
const MIN_HEIGHT: usize = 10;
const MIN_INDENT: usize = 2;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown parser configuration.
    pub markdown: MarkdownConfig,
    /// Page geometry configuration.
    pub page: PageConfig,
    /// List decoration configuration.
    pub list: ListConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    /// Enable typographic quotes and dashes.
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            smart_punctuation: false,
        }
    }
}

/// Page geometry configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Columns per line.
    pub width: usize,
    /// Lines per page.
    pub height: usize,
    /// Running header text; empty disables the header.
    pub header: String,
    /// Footer with `{page}` and `{pages}` placeholders; empty disables it.
    pub footer: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            header: String::new(),
            footer: "{page} / {pages}".to_owned(),
        }
    }
}

/// List decoration configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Width of the marker column.
    pub indent: usize,
    /// Bullet per nesting depth; the last one repeats.
    pub bullets: Vec<String>,
    /// Numbering pattern per nesting depth (`%d` number, `%a` letter).
    pub numbering: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            bullets: vec!["•".to_owned(), "◦".to_owned(), "–".to_owned()],
            numbering: vec!["%d.".to_owned(), "%a.".to_owned(), "%d)".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a numeric field to reach a lower bound.
fn require_at_least(value: usize, min: usize, field: &str) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::Validation(format!(
            "{field} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpdf.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and take precedence over
    /// config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(width) = settings.width {
            self.page.width = width;
        }
        if let Some(height) = settings.height {
            self.page.height = height;
        }
        if let Some(gfm) = settings.gfm {
            self.markdown.gfm = gfm;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_page()?;
        self.validate_list()?;
        Ok(())
    }

    fn validate_page(&self) -> Result<(), ConfigError> {
        require_at_least(self.page.width, MIN_WIDTH, "page.width")?;
        require_at_least(self.page.height, MIN_HEIGHT, "page.height")?;
        Ok(())
    }

    fn validate_list(&self) -> Result<(), ConfigError> {
        require_at_least(self.list.indent, MIN_INDENT, "list.indent")?;

        if self.list.bullets.is_empty() {
            return Err(ConfigError::Validation(
                "list.bullets cannot be empty".to_owned(),
            ));
        }
        if self.list.numbering.is_empty() {
            return Err(ConfigError::Validation(
                "list.numbering cannot be empty".to_owned(),
            ));
        }
        if let Some(pattern) = self
            .list
            .numbering
            .iter()
            .find(|p| !p.contains("%d") && !p.contains("%a"))
        {
            return Err(ConfigError::Validation(format!(
                "list.numbering pattern {pattern:?} must contain %d or %a"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.markdown.gfm);
        assert!(!config.markdown.smart_punctuation);
        assert_eq!(config.page.width, 80);
        assert_eq!(config.page.height, 60);
        assert_eq!(config.page.footer, "{page} / {pages}");
        assert_eq!(config.list.indent, 4);
        assert_eq!(config.list.bullets, vec!["•", "◦", "–"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.page.width, 80);
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[markdown]
gfm = false
smart_punctuation = true

[page]
width = 72
height = 40
header = "Report"
footer = "- {page} -"

[list]
indent = 3
bullets = ["*"]
numbering = ["%d)", "(%a)"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.markdown.gfm);
        assert!(config.markdown.smart_punctuation);
        assert_eq!(config.page.width, 72);
        assert_eq!(config.page.height, 40);
        assert_eq!(config.page.header, "Report");
        assert_eq!(config.page.footer, "- {page} -");
        assert_eq!(config.list.indent, 3);
        assert_eq!(config.list.bullets, vec!["*"]);
        assert_eq!(config.list.numbering, vec!["%d)", "(%a)"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_page_bounds() {
        let config: Config = toml::from_str("[page]\nwidth = 10").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("page.width"));

        let config: Config = toml::from_str("[page]\nheight = 5").unwrap();
        assert!(config.validate().unwrap_err().to_string().contains("page.height"));
    }

    #[test]
    fn test_validate_numbering_placeholder() {
        let config: Config = toml::from_str("[list]\nnumbering = [\"%d.\", \"-\"]").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("\"-\""));
    }

    #[test]
    fn test_validate_empty_bullets() {
        let config: Config = toml::from_str("[list]\nbullets = []").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            width: Some(100),
            gfm: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.page.width, 100);
        assert_eq!(config.page.height, 60); // Unchanged
        assert!(!config.markdown.gfm);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[page]\nwidth = 64\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.page.width, 64);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[page\nwidth = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            height: Some(3),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(err.to_string().contains("page.height"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::discover_config(&nested), Some(path));
    }
}
