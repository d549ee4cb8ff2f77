// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

/// Where type tables are loaded from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesConfig {
    /// Register the type tables compiled into the binary
    ///
    /// Env: SCALE_TYPES_BUNDLED
    /// Default: true
    pub bundled: bool,

    /// Additional JSON type table files
    ///
    /// Env: SCALE_TYPES_PATHS
    /// Format: comma-separated list of paths
    /// Default: []
    pub paths: Vec<String>,
}

pub(crate) fn default_bundled() -> bool {
    true
}

impl TypesConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(position) = self.paths.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::ValidateError(format!(
                "Type table path at position {} is empty",
                position
            )));
        }

        Ok(())
    }
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            bundled: default_bundled(),
            paths: vec![],
        }
    }
}
