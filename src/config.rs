use crate::history::DEFAULT_HISTORY_LIMIT;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "EditorConfig::default_unsaved_reminder_seconds")]
    pub unsaved_reminder_seconds: f32,
    #[serde(default = "EditorConfig::default_curve_dir")]
    pub curve_dir: PathBuf,
}

impl EditorConfig {
    const fn default_history_limit() -> usize {
        DEFAULT_HISTORY_LIMIT
    }

    const fn default_unsaved_reminder_seconds() -> f32 {
        180.0
    }

    fn default_curve_dir() -> PathBuf {
        PathBuf::from("assets/curves")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: Self::default_history_limit(),
            unsaved_reminder_seconds: Self::default_unsaved_reminder_seconds(),
            curve_dir: Self::default_curve_dir(),
        }
    }
}
