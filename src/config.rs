// ⚙️ Configuration - Grade scale and log destination

use crate::grades::GradeScale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Letter table offered by the grade picker
    pub grade_scale: GradeScale,

    /// Where interactive mode writes its log (nothing is logged without one)
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config file if one was given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }
}
