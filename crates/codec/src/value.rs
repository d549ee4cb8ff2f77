// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dynamic values produced by decoding and consumed by encoding.

use primitive_types::U256;
use std::collections::BTreeSet;

/// A dynamic SCALE value.
///
/// Encoding accepts more than one shape for some schemas, but decoding always
/// yields the normal form below, so `decode(encode(v)) == v` holds only for
/// values already in it:
///
/// - unsigned integers up to 128 bits decode to [`Value::UInt`], `u256` to
///   [`Value::U256`], whichever integer variant was encoded;
/// - signed integers up to 128 bits decode to [`Value::Int`] and `i256` to
///   [`Value::I256`], so `Int(-1)` encoded as `i256` comes back as
///   `I256(U256::MAX)`;
/// - sequences and fixed arrays of `u8` decode to [`Value::Bytes`], even when
///   encoded from a [`Value::Sequence`] of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Zero-sized values: `()`, `Null` and unit variant payloads.
    Unit,
    Bool(bool),
    /// Unsigned integers up to 128 bits, including compact integers.
    UInt(u128),
    /// Signed integers up to 128 bits.
    Int(i128),
    U256(U256),
    /// 256-bit signed integer as its two's complement bit pattern.
    I256(U256),
    Str(String),
    /// Fixed byte arrays and sequences of bytes.
    Bytes(Vec<u8>),
    Option(Option<Box<Value>>),
    Result(Result<Box<Value>, Box<Value>>),
    Tuple(Vec<Value>),
    /// Sequences and fixed arrays of non-byte elements.
    Sequence(Vec<Value>),
    /// Struct fields in declared order.
    Struct(Vec<(String, Value)>),
    Variant { name: String, value: Box<Value> },
    Flags(BTreeSet<String>),
}

impl Value {
    pub fn some(value: Value) -> Self {
        Self::Option(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Self::Option(None)
    }

    pub fn ok(value: Value) -> Self {
        Self::Result(Ok(Box::new(value)))
    }

    pub fn err(value: Value) -> Self {
        Self::Result(Err(Box::new(value)))
    }

    pub fn unit_variant(name: impl Into<String>) -> Self {
        Self::Variant {
            name: name.into(),
            value: Box::new(Self::Unit),
        }
    }

    pub fn variant(name: impl Into<String>, value: Value) -> Self {
        Self::Variant {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn structure<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Self {
        Self::Struct(fields.into_iter().map(|(n, v)| (n.into(), v)).collect())
    }

    pub fn flags<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self::Flags(names.into_iter().map(Into::into).collect())
    }

    /// Short description of the value's shape, used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::UInt(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::U256(_) => "u256",
            Self::I256(_) => "i256",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Option(_) => "option",
            Self::Result(_) => "result",
            Self::Tuple(_) => "tuple",
            Self::Sequence(_) => "sequence",
            Self::Struct(_) => "struct",
            Self::Variant { .. } => "variant",
            Self::Flags(_) => "flags",
        }
    }

    /// Unsigned integer view, if the value holds a non-negative integer.
    pub fn as_u256(&self) -> Option<U256> {
        match self {
            Self::UInt(v) => Some(U256::from(*v)),
            Self::U256(v) => Some(*v),
            Self::Int(v) if *v >= 0 => Some(U256::from(*v as u128)),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::UInt(value as u128)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::UInt(value as u128)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::UInt(value as u128)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value as u128)
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        Self::UInt(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value as i128)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value as i128)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Value::some(Value::from(5u32)), Value::Option(Some(Box::new(Value::UInt(5)))));
        assert_eq!(Value::unit_variant("Off"), Value::Variant {
            name: "Off".to_string(),
            value: Box::new(Value::Unit)
        });
        assert_eq!(
            Value::flags(["Web", "Display", "Web"]),
            Value::Flags(["Display".to_string(), "Web".to_string()].into_iter().collect())
        );
    }

    #[test]
    fn test_as_u256() {
        assert_eq!(Value::UInt(7).as_u256(), Some(U256::from(7)));
        assert_eq!(Value::Int(7).as_u256(), Some(U256::from(7)));
        assert_eq!(Value::Int(-1).as_u256(), None);
        assert_eq!(Value::Bool(true).as_u256(), None);
    }

    #[test]
    fn test_field_lookup() {
        let value = Value::structure([("number", Value::from(1u32)), ("ok", Value::from(true))]);
        assert_eq!(value.field("ok"), Some(&Value::Bool(true)));
        assert_eq!(value.field("missing"), None);
    }
}
