// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track databases.
//!
//! A database is a named collection of sets, each set a named list of
//! music entries. Raw records are deserialized from JSON or YAML and then
//! validated into `Database` / `DatabaseSet`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::MusitesError;

/// A single music entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Music {
    /// Accepted titles; the first one is canonical
    #[serde(default)]
    pub title: Vec<String>,
    /// Audio sources for this music
    #[serde(default)]
    pub source: Vec<String>,
}

impl Music {
    /// Create a music entry
    pub fn new<T, S>(title: T, source: S) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            title: title.into_iter().map(Into::into).collect(),
            source: source.into_iter().map(Into::into).collect(),
        }
    }

    /// The canonical title
    pub fn canonical_title(&self) -> Option<&str> {
        self.title.first().map(String::as_str)
    }
}

/// Raw set record as found in database files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DatabaseSetData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub music: Vec<Music>,
}

/// Raw database record as found in database files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DatabaseData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: Vec<DatabaseSetData>,
}

impl DatabaseData {
    /// Parse a database from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse JSON database")
    }

    /// Parse a database from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML database")
    }

    /// Load a database file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read database file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }
}

/// A validated, named list of music
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSet {
    name: String,
    music: Vec<Music>,
}

impl DatabaseSet {
    /// Validate a raw set record
    ///
    /// Fails when the name is empty, the music list is empty, or a music
    /// entry has no title at all.
    pub fn new(data: DatabaseSetData) -> crate::Result<Self> {
        if data.name.is_empty() {
            return Err(MusitesError::BadDatabaseSet("set has no name".to_string()));
        }
        if data.music.is_empty() {
            return Err(MusitesError::BadDatabaseSet(format!(
                "set '{}' has no music",
                data.name
            )));
        }
        if let Some(index) = data.music.iter().position(|m| m.title.is_empty()) {
            return Err(MusitesError::BadDatabaseSet(format!(
                "music #{} in set '{}' has no title",
                index + 1,
                data.name
            )));
        }

        Ok(Self {
            name: data.name,
            music: data.music,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn music(&self) -> &[Music] {
        &self.music
    }

    /// Number of music entries
    pub fn count(&self) -> usize {
        self.music.len()
    }

    /// Canonical titles of every music entry, in order
    pub fn music_list(&self) -> Vec<&str> {
        self.music.iter().filter_map(Music::canonical_title).collect()
    }

    /// Number of (music, source) pairs, i.e. distinct questions available
    pub fn source_count(&self) -> usize {
        self.music.iter().map(|m| m.source.len()).sum()
    }
}

/// A validated database of sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    name: String,
    sets: Vec<DatabaseSet>,
}

impl Database {
    /// Validate a raw database record and every set inside it
    pub fn new(data: DatabaseData) -> crate::Result<Self> {
        if data.name.is_empty() {
            return Err(MusitesError::BadDatabase("database has no name".to_string()));
        }
        if data.sets.is_empty() {
            return Err(MusitesError::BadDatabase(format!(
                "database '{}' has no sets",
                data.name
            )));
        }

        let sets = data
            .sets
            .into_iter()
            .map(DatabaseSet::new)
            .collect::<crate::Result<Vec<_>>>()?;

        tracing::debug!(name = %data.name, sets = sets.len(), "loaded database");

        Ok(Self {
            name: data.name,
            sets,
        })
    }

    /// Load and validate a database file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = DatabaseData::load(path.as_ref())?;
        Self::new(data).with_context(|| format!("Invalid database file: {:?}", path.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sets(&self) -> &[DatabaseSet] {
        &self.sets
    }

    /// Find a set by name
    pub fn set(&self, name: &str) -> Option<&DatabaseSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn set_names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }
}
