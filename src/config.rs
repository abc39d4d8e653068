//! Custom encoding configuration.
//!
//! An optional document lists extra encodings to append to the codec registry.
//! Entries are either bare names or tables with a `name` and an optional `module`:
//!
//! ```toml
//! encodings = ["koi8-r", { name = "shift_jis", module = "jis" }]
//! ```
//!
//! Files ending in `.json` are read as JSON (`{"encodings": [...]}`), everything
//! else as TOML.

use crate::error::{Result, RlhexError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name probed in the home and working directories
pub const DEFAULT_JSON_NAME: &str = "rlhex_encodings.json";

/// One custom encoding entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EncodingEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        module: Option<String>,
    },
}

impl EncodingEntry {
    pub fn name(&self) -> &str {
        match self {
            EncodingEntry::Name(name) => name,
            EncodingEntry::Detailed { name, .. } => name,
        }
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            EncodingEntry::Name(_) => None,
            EncodingEntry::Detailed { module, .. } => module.as_deref(),
        }
    }
}

/// Parsed custom encoding document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EncodingConfig {
    #[serde(default)]
    pub encodings: Vec<EncodingEntry>,
}

impl EncodingConfig {
    /// Load an explicit configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RlhexError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if is_json(path) {
            Self::from_json_str(&contents)
                .map_err(|e| RlhexError::config(format!("Invalid JSON in {}: {}", path.display(), e)))
        } else {
            Self::from_toml_str(&contents)
                .map_err(|e| RlhexError::config(format!("Invalid TOML in {}: {}", path.display(), e)))
        }
    }

    pub fn from_json_str(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Candidate default locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", DEFAULT_JSON_NAME)));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("rlhex").join("encodings.toml"));
        }
        paths.push(PathBuf::from(DEFAULT_JSON_NAME));
        paths
    }

    /// Load the first existing default file. Missing files are not an error; an
    /// unreadable or malformed one is logged and ignored.
    pub fn discover() -> Option<Self> {
        let path = Self::default_paths().into_iter().find(|p| p.is_file())?;
        match Self::load(&path) {
            Ok(config) => {
                log::info!("loaded custom encodings from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring custom encodings: {}", e);
                None
            }
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
