use anyhow::{Context, Result};
use config::{Config, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds between automatic refreshes.
    pub refresh_interval_secs: u64,
    pub log_tail_lines: usize,
    pub compact: bool,
    /// Include stopped containers in the table.
    pub show_all: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 2,
            log_tail_lines: 100,
            compact: false,
            show_all: true,
            log_level: "info".to_string(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "dockdash", "dockdash")
        .context("Failed to determine project directories")
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let config_dir = proj_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.join("config.toml"))
}

pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    Ok(data_dir)
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path()?)
}

/// Reads `path`, writing the defaults there first if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        save_config(path, &default_config)?;
        return Ok(default_config);
    }

    let settings = Config::builder()
        .add_source(File::from(path.to_path_buf()))
        .build()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = settings
        .try_deserialize::<AppConfig>()
        .context("Failed to parse configuration")?;

    if config.refresh_interval_secs == 0 {
        anyhow::bail!("refresh_interval_secs must be at least 1");
    }
    Ok(config)
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml_string = toml::to_string_pretty(config)?;

    let mut file = fs::File::create(path)?;
    file.write_all(toml_string.as_bytes())?;

    Ok(())
}
