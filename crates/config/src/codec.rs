// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

/// Limits and decoding behaviour applied to every encode/decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest element count a length-prefixed sequence (or string) may declare.
    ///
    /// Env: SCALE_CODEC_MAX_SEQUENCE_LEN
    /// Default: 1048576
    pub max_sequence_len: u32,

    /// Deepest schema nesting a single call may reach.
    ///
    /// Env: SCALE_CODEC_MAX_DEPTH
    /// Default: 256
    pub max_depth: usize,

    /// Accept any non-zero byte as `true` when decoding booleans.
    ///
    /// Env: SCALE_CODEC_LENIENT_BOOL
    /// Default: false
    pub lenient_bool: bool,
}

pub(crate) fn default_max_sequence_len() -> u32 {
    1 << 20
}

pub(crate) fn default_max_depth() -> usize {
    256
}

impl CodecConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sequence_len == 0 {
            return Err(ConfigError::ValidateError(
                "Codec max sequence length cannot be 0".to_string(),
            ));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::ValidateError(
                "Codec max depth cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: default_max_sequence_len(),
            max_depth: default_max_depth(),
            lenient_bool: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codec_config() {
        let config = CodecConfig::default();
        assert_eq!(config.max_sequence_len, 1_048_576);
        assert_eq!(config.max_depth, 256);
        assert!(!config.lenient_bool);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limits() {
        let config = CodecConfig {
            max_sequence_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CodecConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
