// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Site configuration.
//!
//! Points at the database to play, carries the about text and project link
//! shown by front ends, and holds the default game options.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::GameOptions;

/// File name a database directory resolves to
pub const DATABASE_INDEX: &str = "index.json";

/// Root site configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Database file, or a directory holding `index.json`
    pub database: String,
    /// About text (may span several lines)
    #[serde(default)]
    pub about: String,
    /// Link to the project source
    #[serde(default)]
    pub source: String,
    /// Default game options
    #[serde(default)]
    pub game: GameOptions,
}

impl SiteConfig {
    /// Load a site configuration, YAML or JSON by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Parse a site configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a site configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse JSON configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Base location of audio sources, always ending in `/`
    ///
    /// A database pointing at a file uses the file's parent directory.
    pub fn base_url(&self) -> String {
        let base = if self.points_to_file() {
            match self.database.rfind('/') {
                Some(i) => &self.database[..=i],
                None => "",
            }
        } else {
            self.database.as_str()
        };

        if base.is_empty() || base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        }
    }

    /// Base location of audio sources for a config living in `root`
    pub fn base_url_under<P: AsRef<Path>>(&self, root: P) -> String {
        let root = root.as_ref();
        let base = self.base_url();
        if root.as_os_str().is_empty() || base.starts_with('/') {
            return base;
        }

        let joined = root.join(&base).to_string_lossy().into_owned();
        if joined.ends_with('/') {
            joined
        } else {
            format!("{}/", joined)
        }
    }

    /// Database file path, resolved against `root`
    pub fn database_path<P: AsRef<Path>>(&self, root: P) -> PathBuf {
        let path = root.as_ref().join(&self.database);
        if self.points_to_file() {
            path
        } else {
            path.join(DATABASE_INDEX)
        }
    }

    fn points_to_file(&self) -> bool {
        let name = self.database.rsplit('/').next().unwrap_or_default();
        name.ends_with(".json") || name.ends_with(".yaml") || name.ends_with(".yml")
    }
}
