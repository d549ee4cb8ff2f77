// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Codec error taxonomy.
//!
//! Every failure is fatal to the call that produced it. Decode errors record the
//! byte offset where the failing read started; encode errors record how many
//! bytes had been written. The path names the schema, field, variant or element
//! being processed, outermost first.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("invalid discriminant byte 0x{0:02x}")]
    InvalidDiscriminant(u8),

    #[error("unknown enum variant with discriminant {0}")]
    UnknownVariant(u32),

    #[error("non-canonical compact encoding")]
    NonCanonicalEncoding,

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unresolved schema '{0}'")]
    UnresolvedSchema(String),

    #[error("element count {count} exceeds the maximum of {max}")]
    ElementCountExceeded { count: u64, max: u32 },

    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("unknown name '{0}'")]
    UnknownName(String),

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("nesting depth exceeds the maximum of {0}")]
    DepthLimitExceeded(usize),

    #[error("{0} trailing bytes left after decoding")]
    TrailingBytes(usize),
}

/// A codec failure with the position and schema path it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}{}", render_path(.path))]
pub struct CodecError {
    pub kind: ErrorKind,
    pub offset: usize,
    /// Outermost segment first.
    pub path: Vec<String>,
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" in {}", path.join("."))
    }
}

impl CodecError {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            path: Vec::new(),
        }
    }

    /// Errors raised outside of any byte stream, e.g. while building schemas.
    pub fn schema(kind: ErrorKind) -> Self {
        Self::new(kind, 0)
    }

    /// Prefix the path with an enclosing segment as the error propagates outwards.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_path() {
        let err = CodecError::new(ErrorKind::NonCanonicalEncoding, 3);
        assert_eq!(err.to_string(), "non-canonical compact encoding at byte 3");
    }

    #[test]
    fn test_display_with_nested_path() {
        let err = CodecError::new(
            ErrorKind::TruncatedInput {
                needed: 4,
                available: 1,
            },
            10,
        )
        .within("number")
        .within("Header");

        assert_eq!(err.path, vec!["Header", "number"]);
        assert_eq!(
            err.to_string(),
            "truncated input: needed 4 bytes, 1 available at byte 10 in Header.number"
        );
    }

    #[test]
    fn test_unknown_variant_display() {
        let err = CodecError::new(ErrorKind::UnknownVariant(7), 0);
        assert_eq!(err.kind(), &ErrorKind::UnknownVariant(7));
        assert!(err.to_string().contains("discriminant 7"));
    }
}
