use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "VIBE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub git: Option<PathBuf>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub git: PathBuf,
    pub color: ColorMode,
    pub emoji: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            color: ColorMode::Auto,
            emoji: true,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let proj = directories::ProjectDirs::from("", "", "vibe")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Loads the config file if present. A missing file is not an error: the
/// wrapper must keep working for users who never configured it.
pub fn load_default_config() -> Result<ResolvedConfig> {
    let path = default_config_path()?;
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(ResolvedConfig::default());
    }
    log::debug!("loading config from {}", path.display());
    load_config(&path)
}

pub fn load_config(path: &Path) -> Result<ResolvedConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let raw: Config = toml::from_str(contents).context("failed to parse config TOML")?;
    let defaults = ResolvedConfig::default();

    let git = match raw.general.git {
        Some(path) => {
            let Some(text) = path.to_str() else {
                bail!("git path is not valid UTF-8: {}", path.display());
            };
            if text.trim().is_empty() {
                bail!("git must not be empty");
            }
            expand_tilde(text)
        }
        None => defaults.git,
    };

    let color = match raw.general.color.as_deref() {
        None | Some("auto") => ColorMode::Auto,
        Some("always") => ColorMode::Always,
        Some("never") => ColorMode::Never,
        Some(other) => bail!(
            "unknown color mode {:?}\n  hint: use one of auto, always, never",
            other
        ),
    };

    Ok(ResolvedConfig {
        git,
        color,
        emoji: raw.general.emoji.unwrap_or(defaults.emoji),
    })
}

fn expand_tilde(path: &str) -> PathBuf {
    let home = || directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = home() {
            return home;
        }
    }
    PathBuf::from(path)
}
