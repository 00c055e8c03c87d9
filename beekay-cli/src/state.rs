use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$BEEKAY_HOME`, or `~/.beekay`.
pub fn beekay_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BEEKAY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".beekay"))
}

pub fn ensure_beekay_home() -> Result<PathBuf> {
    let dir = beekay_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
