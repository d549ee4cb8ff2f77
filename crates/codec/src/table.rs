// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON type tables in the polkadot-js definition format.
//!
//! A table is an object mapping type names to definitions:
//!
//! ```json
//! {
//!   "BlockNumber": "u32",
//!   "Header": { "parentHash": "Hash", "number": "Compact<BlockNumber>" },
//!   "ElectionPhase": { "_enum": { "Off": null, "Signed": null, "Emergency": null } },
//!   "IdentityFields": { "_set": { "_bitLength": 64, "Display": 1, "Legal": 2 } }
//! }
//! ```
//!
//! Definitions are parsed eagerly; names they mention are only checked when the
//! registry resolves them.

use crate::error::{CodecError, ErrorKind};
use crate::parser::{ParseError, parse_type};
use crate::registry::Registry;
use crate::schema::{BitSetDef, EnumDef, TagWidth, TypeDef, VariantDef};
use include_dir::{Dir, include_dir};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

static TYPE_TABLES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/type_tables");

const ENUM_KEY: &str = "_enum";
const SET_KEY: &str = "_set";
const DISCRIMINANT_BYTES_KEY: &str = "_discriminant_bytes";
const BIT_LENGTH_KEY: &str = "_bitLength";
const DEFAULT_SET_BITS: u64 = 8;
/// Struct keys that carry no wire information.
const IGNORED_STRUCT_KEYS: [&str; 2] = ["_alias", "_fallback"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read type table '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid type table '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: Box<TableError>,
    },

    #[error("Type table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type table must be a JSON object of name to definition")]
    NotAnObject,

    #[error("Type '{0}' is defined more than once")]
    Duplicate(String),

    #[error("Invalid definition of '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("Invalid type expression in '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}

fn invalid(name: &str, reason: impl Into<String>) -> TableError {
    TableError::InvalidDefinition {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Named definitions in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTable {
    entries: Vec<(String, TypeDef)>,
}

impl FromStr for TypeTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let json: JsonValue = serde_json::from_str(s)?;
        Self::from_json(&json)
    }
}

impl TypeTable {
    pub fn from_json(json: &JsonValue) -> Result<Self, TableError> {
        let JsonValue::Object(object) = json else {
            return Err(TableError::NotAnObject);
        };
        let entries = object
            .iter()
            .map(|(name, def)| Ok((name.clone(), definition(name, def)?)))
            .collect::<Result<_, TableError>>()?;
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        text.parse().map_err(|source| TableError::File {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }

    /// The tables shipped with the crate, merged in file name order.
    pub fn bundled() -> Result<Self, TableError> {
        let mut files: Vec<_> = TYPE_TABLES
            .files()
            .filter(|file| file.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let mut table = Self::default();
        for file in files {
            let path = file.path().display().to_string();
            let parsed = file
                .contents_utf8()
                .ok_or(TableError::NotAnObject)
                .and_then(str::parse::<TypeTable>)
                .map_err(|source| TableError::File {
                    path: path.clone(),
                    source: Box::new(source),
                })?;
            debug!(file = %path, types = parsed.len(), "loaded bundled type table");
            table.merge(parsed)?;
        }
        Ok(table)
    }

    /// Append another table. Names must not repeat.
    pub fn merge(&mut self, other: TypeTable) -> Result<(), TableError> {
        for (name, _) in &other.entries {
            if self.get(name).is_some() {
                return Err(TableError::Duplicate(name.clone()));
            }
        }
        self.entries.extend(other.entries);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, def)| def)
    }

    /// Register every definition with the registry. Nothing is resolved yet.
    ///
    /// Either every name is registered or, when one is already taken, none is.
    pub fn register_into(&self, registry: &mut Registry) -> Result<usize, CodecError> {
        if let Some(name) = self.names().find(|name| registry.contains(name)) {
            return Err(CodecError::schema(ErrorKind::DuplicateSchema(name.to_string())));
        }
        for (name, def) in &self.entries {
            registry.register_def(name.clone(), def.clone())?;
        }
        Ok(self.entries.len())
    }
}

fn definition(name: &str, json: &JsonValue) -> Result<TypeDef, TableError> {
    match json {
        JsonValue::Null => Ok(TypeDef::Unit),
        JsonValue::String(expr) => parse_type(expr).map_err(|source| TableError::Parse {
            name: name.to_string(),
            source,
        }),
        JsonValue::Object(object) if object.contains_key(ENUM_KEY) => enum_definition(name, object),
        JsonValue::Object(object) if object.contains_key(SET_KEY) => set_definition(name, object),
        JsonValue::Object(object) => struct_definition(name, object),
        _ => Err(invalid(name, "expected a type string, null or an object")),
    }
}

fn struct_definition(name: &str, object: &Map<String, JsonValue>) -> Result<TypeDef, TableError> {
    let mut fields = Vec::with_capacity(object.len());
    for (field, def) in object {
        if IGNORED_STRUCT_KEYS.contains(&field.as_str()) {
            continue;
        }
        if field.starts_with('_') {
            return Err(invalid(name, format!("unknown directive '{}'", field)));
        }
        fields.push((field.clone(), definition(&format!("{}.{}", name, field), def)?));
    }
    Ok(TypeDef::Struct(fields))
}

fn enum_definition(name: &str, object: &Map<String, JsonValue>) -> Result<TypeDef, TableError> {
    if let Some(key) = object
        .keys()
        .find(|key| *key != ENUM_KEY && *key != DISCRIMINANT_BYTES_KEY)
    {
        return Err(invalid(name, format!("unexpected key '{}' next to _enum", key)));
    }
    let tag = match object.get(DISCRIMINANT_BYTES_KEY) {
        None => TagWidth::U8,
        Some(bytes) => bytes
            .as_u64()
            .and_then(TagWidth::from_bytes)
            .ok_or_else(|| invalid(name, "_discriminant_bytes must be 1, 2 or 4"))?,
    };

    let variants = match object.get(ENUM_KEY) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::String(variant) => Ok(VariantDef {
                    name: variant.clone(),
                    index: index as u32,
                    payload: None,
                }),
                _ => Err(invalid(name, "array-form _enum entries must be strings")),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(JsonValue::Object(map)) if !map.is_empty() && map.values().all(JsonValue::is_number) => {
            map.iter()
                .map(|(variant, index)| {
                    let index = index
                        .as_u64()
                        .and_then(|index| u32::try_from(index).ok())
                        .ok_or_else(|| invalid(name, format!("bad discriminant for '{}'", variant)))?;
                    Ok(VariantDef {
                        name: variant.clone(),
                        index,
                        payload: None,
                    })
                })
                .collect::<Result<Vec<_>, TableError>>()?
        }
        Some(JsonValue::Object(map)) => map
            .iter()
            .enumerate()
            .map(|(index, (variant, payload))| {
                let payload = match payload {
                    JsonValue::Number(_) => {
                        return Err(invalid(
                            name,
                            "numeric discriminants cannot be mixed with payloads",
                        ));
                    }
                    payload => match definition(&format!("{}::{}", name, variant), payload)? {
                        TypeDef::Unit => None,
                        def => Some(def),
                    },
                };
                Ok(VariantDef {
                    name: variant.clone(),
                    index: index as u32,
                    payload,
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(invalid(name, "_enum must be an array or an object")),
    };

    Ok(TypeDef::Enum(EnumDef { tag, variants }))
}

fn set_definition(name: &str, object: &Map<String, JsonValue>) -> Result<TypeDef, TableError> {
    let Some(JsonValue::Object(map)) = object.get(SET_KEY) else {
        return Err(invalid(name, "_set must be an object"));
    };
    let bits = match map.get(BIT_LENGTH_KEY) {
        None => DEFAULT_SET_BITS,
        Some(bits) => bits
            .as_u64()
            .ok_or_else(|| invalid(name, "_bitLength must be a number"))?,
    };
    let flags = map
        .iter()
        .filter(|(flag, _)| flag.as_str() != BIT_LENGTH_KEY)
        .map(|(flag, mask)| {
            // Masks are single bits; the schema stores their position.
            let mask = mask.as_u64().filter(|mask| mask.is_power_of_two()).ok_or_else(|| {
                invalid(name, format!("mask of '{}' must be a single bit", flag))
            })?;
            Ok((flag.clone(), mask.trailing_zeros()))
        })
        .collect::<Result<Vec<_>, TableError>>()?;

    Ok(TypeDef::BitSet(BitSetDef {
        bits: u32::try_from(bits).map_err(|_| invalid(name, "_bitLength is too large"))?,
        flags,
    }))
}
