// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use scale_registry::{Registry, TypeTable};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A type table plus hex vectors and the JSON they decode to.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Register the bundled tables before `types`
    #[serde(default = "default_bundled")]
    pub bundled: bool,
    #[serde(default)]
    pub types: Value,
    pub cases: Vec<FixtureCase>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    #[serde(rename = "type")]
    pub type_name: String,
    pub hex: String,
    pub json: Value,
}

fn default_bundled() -> bool {
    true
}

impl Fixture {
    /// Build a registry holding the fixture's types.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        if self.bundled {
            TypeTable::bundled()?.register_into(&mut registry)?;
        }
        if !self.types.is_null() {
            TypeTable::from_json(&self.types)?.register_into(&mut registry)?;
        }
        Ok(registry)
    }
}

pub struct FixtureLoader {
    fixtures_dir: PathBuf,
}

impl FixtureLoader {
    /// Create a new fixture loader
    pub fn new(fixtures_dir: impl AsRef<Path>) -> Self {
        Self {
            fixtures_dir: fixtures_dir.as_ref().to_path_buf(),
        }
    }

    /// Loader for the fixtures shipped with this crate
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.fixtures_dir.join(path)
        }
    }

    /// Load a JSON fixture file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Fixture> {
        let full_path = self.full_path(path.as_ref());

        let content = std::fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read fixture file: {:?}", full_path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON fixture: {:?}", full_path))
    }

    /// Check if a fixture file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.full_path(path.as_ref()).exists()
    }

    /// Every `.json` fixture in the directory, sorted by file name
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut paths = std::fs::read_dir(&self.fixtures_dir)
            .with_context(|| format!("Failed to list fixtures in {:?}", self.fixtures_dir))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
        paths.sort();
        Ok(paths)
    }

    /// Get the fixtures directory path
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }
}
