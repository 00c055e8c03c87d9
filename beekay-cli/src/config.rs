use anyhow::{Context, Result};
use beekay_chat::SessionConfig;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{beekay_home, ensure_beekay_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSection {
    /// Simulated processing delay before each reply
    #[serde(default = "default_delay_ms")]
    pub processing_delay_ms: u64,
    /// IANA zone used for "today" and month names
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSection {
    /// Where downloaded reports are written
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_delay_ms(),
            timezone: default_timezone(),
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        Ok(beekay_core::parse_timezone(&self.session.timezone)?)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            processing_delay: Duration::from_millis(self.session.processing_delay_ms),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(beekay_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_beekay_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
