use crate::error::{GhiError, Result};
use crate::style::ColorChoice;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "ghi";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

// ============================================================================
// Configuration
// ============================================================================

/// User preferences for rendering.
///
/// Missing fields in a config file fall back to their defaults, so partial
/// files are valid.
///
/// # Example
///
/// ```toml
/// # Login used to highlight @mentions and to say "assigned to you"
/// user = "octocat"
///
/// # auto, always or never
/// color = "auto"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Login of the authenticated user.
    #[serde(default)]
    pub user: Option<String>,

    /// When to emit color escapes.
    #[serde(default)]
    pub color: ColorChoice,
}

impl Config {
    /// Apply command-line overrides on top of the file settings.
    pub fn with_overrides(mut self, user: Option<String>, color: Option<ColorChoice>) -> Self {
        if user.is_some() {
            self.user = user;
        }
        if let Some(color) = color {
            self.color = color;
        }
        self
    }
}

/// Generate config file content with explanatory comments.
fn generate_config_with_comments(config: &Config) -> String {
    let user = match &config.user {
        Some(user) => format!("user = {:?}", user),
        None => "# user = \"octocat\"".to_string(),
    };
    let color = config.color.as_str();
    format!(
        r#"# ghi Configuration

# Login of the authenticated user.
# Mentions of @user are highlighted and "assigned to user" reads "assigned to you".
{user}

# Color output
# - auto: color when stdout is a terminal and NO_COLOR is unset
# - always: always emit color escapes
# - never: plain text with [tag] markers
color = "{color}"
"#
    )
}

// ============================================================================
// Config File Management
// ============================================================================

/// Get the ghi config directory path (~/.config/ghi/).
///
/// Does not create the directory.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GhiError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (~/.config/ghi/config.toml).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration from `~/.config/ghi/config.toml`.
///
/// A missing file yields the default configuration.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, the file
/// cannot be read, or it contains invalid TOML.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from `path`, defaulting when it does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        GhiError::Config(format!(
            "Failed to parse config file at {:?}: {}",
            path, e
        ))
    })?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");

    Ok(config)
}

/// Save the configuration to `~/.config/ghi/config.toml`, returning the path
/// written.
///
/// This overwrites any existing file, including user-added comments.
pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save the configuration to `path`, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_with_comments(config))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_dir_returns_path_ending_with_ghi() {
        let result = config_dir().unwrap();
        assert!(result.ends_with("ghi"));
        assert!(result.parent().unwrap().ends_with(".config"));
    }

    #[test]
    fn test_config_path_file_name() {
        assert!(config_path().unwrap().ends_with("ghi/config.toml"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user, None);
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "user = \"octocat\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.user.as_deref(), Some("octocat"));
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_load_invalid_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "color = \"sometimes\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, GhiError::Config(_)));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".config").join("ghi").join("config.toml");
        let config = Config {
            user: Some("octocat".into()),
            color: ColorChoice::Never,
        };

        save_config_to(&config, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# ghi Configuration"));
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_saved_default_config_is_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        save_config_to(&Config::default(), &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_with_overrides() {
        let config = Config {
            user: Some("octocat".into()),
            color: ColorChoice::Auto,
        };
        let overridden = config
            .clone()
            .with_overrides(Some("hubot".into()), Some(ColorChoice::Never));
        assert_eq!(overridden.user.as_deref(), Some("hubot"));
        assert_eq!(overridden.color, ColorChoice::Never);
        assert_eq!(config.clone().with_overrides(None, None), config);
    }
}
