// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema descriptions.
//!
//! [`TypeDef`] is what builders produce: a tree that may mention other schemas
//! by name. The registry lowers it into [`Schema`] nodes stored in an arena,
//! where every child is a [`SchemaId`] and named references point at the
//! target's slot, so cyclic graphs need no special representation.

use std::fmt;

/// Stable handle to a node in a registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) u32);

impl SchemaId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => Self::Bool,
            "str" | "String" | "Text" => Self::Str,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "u256" => Self::U256,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "i256" => Self::I256,
            _ => return None,
        })
    }

    /// Bit width of integer primitives.
    pub fn bits(self) -> Option<u32> {
        match self {
            Self::U8 | Self::I8 => Some(8),
            Self::U16 | Self::I16 => Some(16),
            Self::U32 | Self::I32 => Some(32),
            Self::U64 | Self::I64 => Some(64),
            Self::U128 | Self::I128 => Some(128),
            Self::U256 | Self::I256 => Some(256),
            Self::Bool | Self::Str => None,
        }
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::U256
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::I256
        )
    }

    pub fn unsigned(bits: u32) -> Option<Self> {
        Some(match bits {
            8 => Self::U8,
            16 => Self::U16,
            32 => Self::U32,
            64 => Self::U64,
            128 => Self::U128,
            256 => Self::U256,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Str => "str",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::U256 => "u256",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::I256 => "i256",
        }
    }
}

/// Wire width of an enum discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagWidth {
    #[default]
    U8,
    U16,
    U32,
}

impl TagWidth {
    pub fn from_bytes(bytes: u64) -> Option<Self> {
        match bytes {
            1 => Some(Self::U8),
            2 => Some(Self::U16),
            4 => Some(Self::U32),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
        }
    }

    pub fn max(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }
}

/// Builder-side description of a type. `Named` is a forward reference resolved
/// by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Primitive(Primitive),
    Unit,
    Bytes(usize),
    Compact(Box<TypeDef>),
    Option(Box<TypeDef>),
    Result(Box<TypeDef>, Box<TypeDef>),
    Tuple(Vec<TypeDef>),
    Sequence(Box<TypeDef>),
    Array(Box<TypeDef>, usize),
    Struct(Vec<(String, TypeDef)>),
    Enum(EnumDef),
    BitSet(BitSetDef),
    Alias(Box<TypeDef>),
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumDef {
    pub tag: TagWidth,
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDef {
    pub name: String,
    pub index: u32,
    /// `None` for unit variants.
    pub payload: Option<TypeDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSetDef {
    pub bits: u32,
    pub flags: Vec<(String, u32)>,
}

impl TypeDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn option(inner: TypeDef) -> Self {
        Self::Option(Box::new(inner))
    }

    pub fn compact(inner: TypeDef) -> Self {
        Self::Compact(Box::new(inner))
    }

    pub fn sequence(inner: TypeDef) -> Self {
        Self::Sequence(Box::new(inner))
    }

    pub fn array(inner: TypeDef, len: usize) -> Self {
        Self::Array(Box::new(inner), len)
    }

    pub fn result(ok: TypeDef, err: TypeDef) -> Self {
        Self::Result(Box::new(ok), Box::new(err))
    }

    pub fn alias(target: TypeDef) -> Self {
        Self::Alias(Box::new(target))
    }

    pub fn structure<N: Into<String>>(fields: impl IntoIterator<Item = (N, TypeDef)>) -> Self {
        Self::Struct(fields.into_iter().map(|(n, t)| (n.into(), t)).collect())
    }

    /// An enum with sequential discriminants starting at zero.
    pub fn enumeration<N: Into<String>>(
        variants: impl IntoIterator<Item = (N, Option<TypeDef>)>,
    ) -> Self {
        Self::Enum(EnumDef {
            tag: TagWidth::U8,
            variants: variants
                .into_iter()
                .enumerate()
                .map(|(index, (name, payload))| VariantDef {
                    name: name.into(),
                    index: index as u32,
                    payload,
                })
                .collect(),
        })
    }
}

impl From<Primitive> for TypeDef {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

/// A lowered, immutable schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    Primitive(Primitive),
    Unit,
    Bytes(usize),
    Compact(SchemaId),
    Option(SchemaId),
    Result { ok: SchemaId, err: SchemaId },
    Tuple(Vec<SchemaId>),
    Sequence(SchemaId),
    Array(SchemaId, usize),
    Struct(Vec<Field>),
    Enum(EnumSchema),
    BitSet(BitSetSchema),
    Alias(SchemaId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub schema: SchemaId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumSchema {
    pub tag: TagWidth,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    pub name: String,
    pub index: u32,
    pub payload: Option<SchemaId>,
}

impl EnumSchema {
    pub fn by_index(&self, index: u32) -> Option<&Variant> {
        self.variants.iter().find(|v| v.index == index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// True when no variant carries a payload.
    pub fn is_basic(&self) -> bool {
        self.variants.iter().all(|v| v.payload.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitSetSchema {
    pub bits: u32,
    /// Flag name and bit position, in declared order.
    pub flags: Vec<(String, u32)>,
}

impl Schema {
    /// Short human-readable kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(p) => p.name(),
            Self::Unit => "unit",
            Self::Bytes(_) => "fixed bytes",
            Self::Compact(_) => "compact",
            Self::Option(_) => "option",
            Self::Result { .. } => "result",
            Self::Tuple(_) => "tuple",
            Self::Sequence(_) => "sequence",
            Self::Array(..) => "array",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
            Self::BitSet(_) => "bit set",
            Self::Alias(_) => "alias",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_names_round_trip() {
        for name in ["bool", "str", "u8", "u64", "u256", "i16", "i256"] {
            let primitive = Primitive::from_name(name).unwrap();
            assert_eq!(primitive.name(), name);
        }
        assert_eq!(Primitive::from_name("Text"), Some(Primitive::Str));
        assert_eq!(Primitive::from_name("AccountId"), None);
    }

    #[test]
    fn test_primitive_widths() {
        assert_eq!(Primitive::U32.bits(), Some(32));
        assert_eq!(Primitive::I256.bits(), Some(256));
        assert_eq!(Primitive::Bool.bits(), None);
        assert!(Primitive::U128.is_unsigned());
        assert!(!Primitive::I128.is_unsigned());
        assert_eq!(Primitive::unsigned(64), Some(Primitive::U64));
        assert_eq!(Primitive::unsigned(24), None);
    }

    #[test]
    fn test_enumeration_assigns_sequential_indices() {
        let def = TypeDef::enumeration([("Off", None), ("Signed", None), ("Emergency", None)]);
        let TypeDef::Enum(def) = def else {
            panic!("expected enum");
        };
        let indices: Vec<u32> = def.variants.iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(def.tag, TagWidth::U8);
    }

    #[test]
    fn test_tag_width_limits() {
        assert_eq!(TagWidth::from_bytes(2), Some(TagWidth::U16));
        assert_eq!(TagWidth::from_bytes(3), None);
        assert_eq!(TagWidth::U16.max(), 65535);
    }
}
