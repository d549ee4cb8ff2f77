// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod codec;
mod error;
mod log;
mod types;

pub use args::{Args, Command};
pub use codec::CodecConfig;
pub use error::ConfigError;
pub use log::LogConfig;
pub use types::TypesConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "SCALE_";

/// Flat view of the `SCALE_*` environment, split into sections afterwards.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "codec::default_max_sequence_len")]
    codec_max_sequence_len: u32,
    #[serde(default = "codec::default_max_depth")]
    codec_max_depth: usize,
    #[serde(default)]
    codec_lenient_bool: bool,

    #[serde(default = "types::default_bundled")]
    types_bundled: bool,
    #[serde(default)]
    types_paths: Vec<String>,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,
}

impl From<EnvConfig> for RegistryConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            codec: CodecConfig {
                max_sequence_len: env.codec_max_sequence_len,
                max_depth: env.codec_max_depth,
                lenient_bool: env.codec_lenient_bool,
            },
            types: TypesConfig {
                bundled: env.types_bundled,
                paths: env.types_paths,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub codec: CodecConfig,
    pub types: TypesConfig,
    pub log: LogConfig,
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    /// Load variables from an env file into the process environment, then read the config.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenv::from_path(path).map_err(|source| ConfigError::EnvFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_env()
    }

    /// Read the config from an explicit set of variables instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()?;
        self.types.validate()?;
        self.log.validate()?;
        Ok(())
    }
}
