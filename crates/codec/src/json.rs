// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-directed conversion between [`Value`] and JSON.
//!
//! The JSON shape follows substrate-api-sidecar:
//!
//! - **Basic enums** (no variant carries data) serialize as strings:
//!   `DispatchClass::Normal` -> `"Normal"`
//! - **Non-basic enums** serialize as one-key objects with a lowerCamelCase key:
//!   `WeightLimit::Unlimited` -> `{"unlimited": null}`,
//!   `WeightLimit::Limited(w)` -> `{"limited": <weight>}`
//! - Integers wider than 64 bits are decimal strings, byte arrays and `u8`
//!   sequences are `0x` hex.
//! - `None` is `null` and `Some(v)` is `v`, unless `v` itself may render as
//!   `null` (`Option<Option<T>>`, `Option<()>`). Then `Some(v)` is
//!   `{"some": v}`, keeping `Some(None)` apart from `None`.
//!
//! Parsing accepts the same shapes, plus integers given as decimal or `0x` hex
//! strings and byte strings given as arrays of numbers.

use crate::dispatch::{i256_bits, unsigned_value};
use crate::error::{CodecError, ErrorKind};
use crate::format::{decode_hex, hex_with_prefix, lowercase_first_char};
use crate::registry::Registry;
use crate::schema::{EnumSchema, Primitive, Schema, SchemaId, Variant};
use crate::value::Value;
use primitive_types::U256;
use serde_json::{Map, Value as JsonValue, json};

const MAX_JSON_NUMBER_BITS: u32 = 64;

static NULL: JsonValue = JsonValue::Null;

fn error(kind: ErrorKind) -> CodecError {
    CodecError::new(kind, 0)
}

fn mismatch(expected: &str, found: &str) -> CodecError {
    error(ErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Registry {
    /// Render a value of schema `id` as JSON.
    pub fn to_json(&self, id: SchemaId, value: &Value) -> Result<JsonValue, CodecError> {
        let schema = self.node(id).map_err(error)?;
        self.schema_to_json(schema, value)
            .map_err(|err| self.label_error(id, err))
    }

    /// Build a value of schema `id` from JSON.
    pub fn from_json(&self, id: SchemaId, json: &JsonValue) -> Result<Value, CodecError> {
        let schema = self.node(id).map_err(error)?;
        self.schema_from_json(schema, json)
            .map_err(|err| self.label_error(id, err))
    }

    /// Whether some value of `id` renders as `null`.
    fn is_nullable(&self, id: SchemaId) -> bool {
        matches!(
            self.resolve_alias(id),
            Ok((_, Schema::Option(_) | Schema::Unit))
        )
    }

    fn schema_to_json(&self, schema: &Schema, value: &Value) -> Result<JsonValue, CodecError> {
        match (schema, value) {
            (Schema::Alias(target), _) => self.to_json(*target, value),
            (Schema::Primitive(p), _) => primitive_to_json(*p, value),
            (Schema::Unit, Value::Unit) => Ok(JsonValue::Null),
            (Schema::Bytes(_), Value::Bytes(bytes)) => Ok(json!(hex_with_prefix(bytes))),
            (Schema::Compact(inner), _) => {
                let bits = self.compact_bits(*inner).map_err(error)?;
                let raw = value
                    .as_u256()
                    .ok_or_else(|| mismatch("compact", value.kind_name()))?;
                Ok(unsigned_to_json(bits, raw))
            }
            (Schema::Option(_), Value::Option(None)) => Ok(JsonValue::Null),
            (Schema::Option(inner), Value::Option(Some(inner_value))) => {
                let json = self
                    .to_json(*inner, inner_value)
                    .map_err(|e| e.within("Some"))?;
                if self.is_nullable(*inner) {
                    Ok(json!({ "some": json }))
                } else {
                    Ok(json)
                }
            }
            (Schema::Result { ok, .. }, Value::Result(Ok(inner))) => {
                let inner = self.to_json(*ok, inner).map_err(|e| e.within("Ok"))?;
                Ok(json!({ "ok": inner }))
            }
            (Schema::Result { err, .. }, Value::Result(Err(inner))) => {
                let inner = self.to_json(*err, inner).map_err(|e| e.within("Err"))?;
                Ok(json!({ "err": inner }))
            }
            (Schema::Tuple(ids), Value::Tuple(items)) => {
                if ids.len() != items.len() {
                    return Err(error(ErrorKind::LengthMismatch {
                        expected: ids.len(),
                        actual: items.len(),
                    }));
                }
                let items = ids.iter().zip(items).map(|(id, item)| (*id, item));
                self.array_to_json(items)
            }
            (Schema::Sequence(_) | Schema::Array(..), Value::Bytes(bytes)) => {
                Ok(json!(hex_with_prefix(bytes)))
            }
            (Schema::Sequence(inner) | Schema::Array(inner, _), Value::Sequence(items)) => {
                self.array_to_json(items.iter().map(|item| (*inner, item)))
            }
            (Schema::Struct(fields), Value::Struct(values)) => {
                let mut object = Map::with_capacity(fields.len());
                for field in fields {
                    let value = values
                        .iter()
                        .find(|(name, _)| name == &field.name)
                        .map(|(_, value)| value)
                        .ok_or_else(|| error(ErrorKind::MissingField(field.name.clone())))?;
                    let json = self
                        .to_json(field.schema, value)
                        .map_err(|e| e.within(field.name.clone()))?;
                    object.insert(field.name.clone(), json);
                }
                Ok(JsonValue::Object(object))
            }
            (Schema::Enum(schema), Value::Variant { name, value }) => {
                let variant = schema
                    .by_name(name)
                    .ok_or_else(|| error(ErrorKind::UnknownName(name.clone())))?;
                if schema.is_basic() {
                    return Ok(json!(variant.name));
                }
                let payload = match variant.payload {
                    Some(payload) => self.to_json(payload, value).map_err(|e| e.within(name))?,
                    None => JsonValue::Null,
                };
                let mut object = Map::with_capacity(1);
                object.insert(lowercase_first_char(&variant.name), payload);
                Ok(JsonValue::Object(object))
            }
            (Schema::BitSet(schema), Value::Flags(flags)) => Ok(JsonValue::Array(
                schema
                    .flags
                    .iter()
                    .filter(|(name, _)| flags.contains(name))
                    .map(|(name, _)| json!(name))
                    .collect(),
            )),
            (schema, value) => Err(mismatch(schema.kind_name(), value.kind_name())),
        }
    }

    fn array_to_json<'v>(
        &self,
        items: impl Iterator<Item = (SchemaId, &'v Value)>,
    ) -> Result<JsonValue, CodecError> {
        let items = items
            .enumerate()
            .map(|(index, (id, item))| {
                self.to_json(id, item)
                    .map_err(|e| e.within(format!("[{}]", index)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(JsonValue::Array(items))
    }

    fn schema_from_json(&self, schema: &Schema, json: &JsonValue) -> Result<Value, CodecError> {
        match schema {
            Schema::Alias(target) => self.from_json(*target, json),
            Schema::Primitive(p) => primitive_from_json(*p, json),
            Schema::Unit => match json {
                JsonValue::Null => Ok(Value::Unit),
                JsonValue::Array(items) if items.is_empty() => Ok(Value::Unit),
                other => Err(mismatch("null", json_kind(other))),
            },
            Schema::Bytes(_) => bytes_from_json(json),
            Schema::Compact(inner) => {
                let bits = self.compact_bits(*inner).map_err(error)?;
                Ok(unsigned_value(bits, parse_unsigned(json)?))
            }
            Schema::Option(inner) => match json {
                JsonValue::Null => Ok(Value::none()),
                json if self.is_nullable(*inner) => {
                    let (key, payload) = single_entry(json)?;
                    if key != "some" && key != "Some" {
                        return Err(error(ErrorKind::UnknownName(key.clone())));
                    }
                    Ok(Value::some(
                        self.from_json(*inner, payload).map_err(|e| e.within("Some"))?,
                    ))
                }
                json => Ok(Value::some(
                    self.from_json(*inner, json).map_err(|e| e.within("Some"))?,
                )),
            },
            Schema::Result { ok, err } => {
                let (key, inner) = single_entry(json)?;
                match key.as_str() {
                    "ok" | "Ok" => Ok(Value::ok(
                        self.from_json(*ok, inner).map_err(|e| e.within("Ok"))?,
                    )),
                    "err" | "Err" => Ok(Value::err(
                        self.from_json(*err, inner).map_err(|e| e.within("Err"))?,
                    )),
                    other => Err(error(ErrorKind::UnknownName(other.to_string()))),
                }
            }
            Schema::Tuple(ids) => {
                let items = array_items(json, "tuple")?;
                if items.len() != ids.len() {
                    return Err(error(ErrorKind::LengthMismatch {
                        expected: ids.len(),
                        actual: items.len(),
                    }));
                }
                let ids = ids.iter().copied();
                Ok(Value::Tuple(self.items_from_json(ids.zip(items))?))
            }
            Schema::Sequence(inner) | Schema::Array(inner, _) if self.is_u8(*inner) => {
                bytes_from_json(json)
            }
            Schema::Sequence(inner) | Schema::Array(inner, _) => {
                let items = array_items(json, "sequence")?;
                let pairs = items.iter().map(|item| (*inner, item));
                Ok(Value::Sequence(self.items_from_json(pairs)?))
            }
            Schema::Struct(fields) => {
                let JsonValue::Object(object) = json else {
                    return Err(mismatch("object", json_kind(json)));
                };
                if let Some(extra) = object
                    .keys()
                    .find(|key| !fields.iter().any(|f| &f.name == *key))
                {
                    return Err(error(ErrorKind::UnknownName(extra.clone())));
                }
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let json = object
                        .get(&field.name)
                        .ok_or_else(|| error(ErrorKind::MissingField(field.name.clone())))?;
                    let value = self
                        .from_json(field.schema, json)
                        .map_err(|e| e.within(field.name.clone()))?;
                    values.push((field.name.clone(), value));
                }
                Ok(Value::Struct(values))
            }
            Schema::Enum(schema) => self.enum_from_json(schema, json),
            Schema::BitSet(schema) => {
                let items = array_items(json, "flag list")?;
                let mut flags = Vec::with_capacity(items.len());
                for item in items {
                    let name = item
                        .as_str()
                        .ok_or_else(|| mismatch("flag name", json_kind(item)))?;
                    if !schema.flags.iter().any(|(flag, _)| flag == name) {
                        return Err(error(ErrorKind::UnknownName(name.to_string())));
                    }
                    flags.push(name);
                }
                Ok(Value::flags(flags))
            }
        }
    }

    fn items_from_json<'j>(
        &self,
        items: impl Iterator<Item = (SchemaId, &'j JsonValue)>,
    ) -> Result<Vec<Value>, CodecError> {
        items
            .enumerate()
            .map(|(index, (id, item))| {
                self.from_json(id, item)
                    .map_err(|e| e.within(format!("[{}]", index)))
            })
            .collect()
    }

    fn enum_from_json(&self, schema: &EnumSchema, json: &JsonValue) -> Result<Value, CodecError> {
        let (key, payload) = match json {
            JsonValue::String(name) => (name.clone(), &NULL),
            json => single_entry(json)?,
        };
        let variant = find_variant(schema, &key)
            .ok_or_else(|| error(ErrorKind::UnknownName(key.clone())))?;
        let value = match (variant.payload, payload) {
            (Some(id), payload) => self
                .from_json(id, payload)
                .map_err(|e| e.within(variant.name.clone()))?,
            (None, JsonValue::Null) => Value::Unit,
            (None, other) => {
                return Err(mismatch("null", json_kind(other)).within(variant.name.clone()));
            }
        };
        Ok(Value::variant(variant.name.clone(), value))
    }
}

/// Variants match by exact name or by their lowerCamelCase key.
fn find_variant<'s>(schema: &'s EnumSchema, key: &str) -> Option<&'s Variant> {
    schema
        .by_name(key)
        .or_else(|| schema.variants.iter().find(|v| lowercase_first_char(&v.name) == key))
}

fn single_entry(json: &JsonValue) -> Result<(String, &JsonValue), CodecError> {
    match json {
        JsonValue::Object(object) if object.len() == 1 => object
            .iter()
            .next()
            .map(|(key, value)| (key.clone(), value))
            .ok_or_else(|| mismatch("single-key object", "empty object")),
        other => Err(mismatch("single-key object", json_kind(other))),
    }
}

fn array_items<'j>(json: &'j JsonValue, expected: &str) -> Result<&'j Vec<JsonValue>, CodecError> {
    match json {
        JsonValue::Array(items) => Ok(items),
        other => Err(mismatch(expected, json_kind(other))),
    }
}

fn bytes_from_json(json: &JsonValue) -> Result<Value, CodecError> {
    match json {
        JsonValue::String(s) => decode_hex(s)
            .map(Value::Bytes)
            .map_err(|e| mismatch("hex string", &e.to_string())),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|byte| u8::try_from(byte).ok())
                    .ok_or_else(|| mismatch("byte", json_kind(item)))
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Value::Bytes),
        other => Err(mismatch("hex string", json_kind(other))),
    }
}

fn unsigned_to_json(bits: u32, raw: U256) -> JsonValue {
    if bits <= MAX_JSON_NUMBER_BITS {
        json!(raw.low_u64())
    } else {
        json!(raw.to_string())
    }
}

/// Render a 256-bit two's complement pattern as a signed decimal string.
fn i256_to_string(raw: U256) -> String {
    if raw.bit(255) {
        format!("-{}", U256::zero().overflowing_sub(raw).0)
    } else {
        raw.to_string()
    }
}

fn primitive_to_json(primitive: Primitive, value: &Value) -> Result<JsonValue, CodecError> {
    let bits = primitive.bits().unwrap_or(0);
    match (primitive, value) {
        (Primitive::Bool, Value::Bool(b)) => Ok(json!(b)),
        (Primitive::Str, Value::Str(s)) => Ok(json!(s)),
        (Primitive::I256, Value::I256(raw)) => Ok(json!(i256_to_string(*raw))),
        (Primitive::I256, Value::Int(v)) => Ok(json!(v.to_string())),
        (p, Value::Int(v)) if p.is_signed() && bits <= MAX_JSON_NUMBER_BITS => {
            Ok(json!(*v as i64))
        }
        (p, Value::Int(v)) if p.is_signed() => Ok(json!(v.to_string())),
        (p, value) if p.is_unsigned() || p.is_signed() => value
            .as_u256()
            .map(|raw| unsigned_to_json(bits, raw))
            .ok_or_else(|| mismatch(p.name(), value.kind_name())),
        (p, value) => Err(mismatch(p.name(), value.kind_name())),
    }
}

fn parse_unsigned(json: &JsonValue) -> Result<U256, CodecError> {
    let out_of_range = |text: String| error(ErrorKind::ValueOutOfRange(text));
    match json {
        JsonValue::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| out_of_range(format!("{} is not an unsigned integer", n))),
        JsonValue::String(s) if s.starts_with("0x") => {
            let bytes = decode_hex(s).map_err(|e| mismatch("hex integer", &e.to_string()))?;
            if bytes.len() > 32 {
                return Err(out_of_range(format!("{} exceeds 256 bits", s)));
            }
            Ok(U256::from_big_endian(&bytes))
        }
        JsonValue::String(s) => U256::from_dec_str(s)
            .map_err(|_| out_of_range(format!("'{}' is not an unsigned integer", s))),
        other => Err(mismatch("integer", json_kind(other))),
    }
}

fn parse_i256(json: &JsonValue) -> Result<U256, CodecError> {
    let limit = U256::one() << 255;
    match json {
        JsonValue::Number(n) => n
            .as_i64()
            .map(|v| i256_bits(v as i128))
            .ok_or_else(|| error(ErrorKind::ValueOutOfRange(format!("{} is not an integer", n)))),
        JsonValue::String(s) => {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, s.as_str()),
            };
            let magnitude = U256::from_dec_str(digits).map_err(|_| {
                error(ErrorKind::ValueOutOfRange(format!("'{}' is not an integer", s)))
            })?;
            let fits = if negative { magnitude <= limit } else { magnitude < limit };
            if !fits {
                return Err(error(ErrorKind::ValueOutOfRange(format!(
                    "{} does not fit in i256",
                    s
                ))));
            }
            Ok(if negative {
                U256::zero().overflowing_sub(magnitude).0
            } else {
                magnitude
            })
        }
        other => Err(mismatch("integer", json_kind(other))),
    }
}

fn primitive_from_json(primitive: Primitive, json: &JsonValue) -> Result<Value, CodecError> {
    match (primitive, json) {
        (Primitive::Bool, JsonValue::Bool(b)) => Ok(Value::Bool(*b)),
        (Primitive::Str, JsonValue::String(s)) => Ok(Value::Str(s.clone())),
        (Primitive::I256, json) => Ok(Value::I256(parse_i256(json)?)),
        (p, JsonValue::Number(n)) if p.is_signed() => n
            .as_i64()
            .map(|v| Value::Int(v as i128))
            .ok_or_else(|| error(ErrorKind::ValueOutOfRange(format!("{} is not an integer", n)))),
        (p, JsonValue::String(s)) if p.is_signed() => s
            .parse::<i128>()
            .map(Value::Int)
            .map_err(|_| error(ErrorKind::ValueOutOfRange(format!("'{}' is not an integer", s)))),
        (p, json) if p.is_unsigned() => {
            Ok(unsigned_value(p.bits().unwrap_or(256), parse_unsigned(json)?))
        }
        (p, json) => Err(mismatch(p.name(), json_kind(json))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BitSetDef, TypeDef};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_def(
                "DispatchClass",
                TypeDef::enumeration([("Normal", None), ("Operational", None), ("Mandatory", None)]),
            )
            .unwrap();
        registry
            .register_def(
                "WeightLimit",
                TypeDef::enumeration([
                    ("Unlimited", None),
                    ("Limited", Some(TypeDef::compact(TypeDef::Primitive(Primitive::U64)))),
                ]),
            )
            .unwrap();
        registry
            .register_def(
                "Info",
                TypeDef::structure([
                    ("class", TypeDef::named("DispatchClass")),
                    ("limit", TypeDef::named("WeightLimit")),
                    ("fee", TypeDef::Primitive(Primitive::U128)),
                    ("hash", TypeDef::Bytes(4)),
                    ("memo", TypeDef::option(TypeDef::Primitive(Primitive::Str))),
                ]),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_sidecar_rendering() {
        let mut registry = registry();
        let id = registry.resolve("Info").unwrap();
        let value = Value::structure([
            ("class", Value::unit_variant("Operational")),
            ("limit", Value::variant("Limited", Value::from(5_000u64))),
            ("fee", Value::UInt(u128::MAX)),
            ("hash", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])),
            ("memo", Value::none()),
        ]);
        let json = registry.to_json(id, &value).unwrap();
        assert_eq!(
            json,
            json!({
                "class": "Operational",
                "limit": { "limited": 5000 },
                "fee": "340282366920938463463374607431768211455",
                "hash": "0xdeadbeef",
                "memo": null,
            })
        );
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["class", "limit", "fee", "hash", "memo"]);

        assert_eq!(registry.from_json(id, &json).unwrap(), value);
    }

    #[test]
    fn test_nested_options_stay_distinct() {
        let mut registry = Registry::new();
        let id = registry.schema_for("Option<Option<u32>>").unwrap();
        let cases = [
            (Value::none(), json!(null)),
            (Value::some(Value::none()), json!({ "some": null })),
            (Value::some(Value::some(Value::from(7u32))), json!({ "some": 7 })),
        ];
        for (value, expected) in cases {
            let json = registry.to_json(id, &value).unwrap();
            assert_eq!(json, expected);
            assert_eq!(registry.from_json(id, &json).unwrap(), value);
        }

        let unit = registry.schema_for("Option<()>").unwrap();
        assert_eq!(
            registry.to_json(unit, &Value::some(Value::Unit)).unwrap(),
            json!({ "some": null })
        );
        assert_eq!(registry.to_json(unit, &Value::none()).unwrap(), json!(null));

        let plain = registry.schema_for("Option<u32>").unwrap();
        assert_eq!(
            registry.to_json(plain, &Value::some(Value::from(7u32))).unwrap(),
            json!(7)
        );
        assert!(registry.from_json(id, &json!(7)).is_err());
    }

    #[test]
    fn test_unit_variant_of_non_basic_enum() {
        let mut registry = registry();
        let id = registry.resolve("WeightLimit").unwrap();
        let json = registry.to_json(id, &Value::unit_variant("Unlimited")).unwrap();
        assert_eq!(json, json!({ "unlimited": null }));
        assert_eq!(
            registry.from_json(id, &json!("Unlimited")).unwrap(),
            Value::unit_variant("Unlimited")
        );
    }

    #[test]
    fn test_integer_inputs() {
        let mut registry = Registry::new();
        let id = registry.schema_for("u128").unwrap();
        assert_eq!(registry.from_json(id, &json!(7)).unwrap(), Value::UInt(7));
        assert_eq!(registry.from_json(id, &json!("1000")).unwrap(), Value::UInt(1000));
        assert_eq!(registry.from_json(id, &json!("0x0100")).unwrap(), Value::UInt(256));
        assert!(registry.from_json(id, &json!(-1)).is_err());

        let signed = registry.schema_for("i256").unwrap();
        let value = registry.from_json(signed, &json!("-5")).unwrap();
        assert_eq!(registry.to_json(signed, &value).unwrap(), json!("-5"));
        assert_eq!(
            registry.encode(signed, &value).unwrap(),
            registry.encode(signed, &Value::Int(-5)).unwrap()
        );
    }

    #[test]
    fn test_collections() {
        let mut registry = Registry::new();
        let id = registry
            .schema_for("(Vec<u8>, Vec<u16>, Result<(), u8>, BTreeMap<u8, bool>)")
            .unwrap();
        let json = json!(["0x0102", [1, 2], { "err": 9 }, [[1, true]]]);
        let value = registry.from_json(id, &json).unwrap();
        assert_eq!(
            value,
            Value::Tuple(vec![
                Value::Bytes(vec![1, 2]),
                Value::Sequence(vec![Value::UInt(1), Value::UInt(2)]),
                Value::err(Value::UInt(9)),
                Value::Sequence(vec![Value::Tuple(vec![Value::UInt(1), Value::Bool(true)])]),
            ])
        );
        assert_eq!(registry.to_json(id, &value).unwrap(), json);
    }

    #[test]
    fn test_bitset_json() {
        let mut registry = Registry::new();
        let id = registry
            .define(TypeDef::BitSet(BitSetDef {
                bits: 8,
                flags: vec![("Display".to_string(), 0), ("Web".to_string(), 2)],
            }))
            .unwrap();
        let value = registry.from_json(id, &json!(["Web", "Display"])).unwrap();
        assert_eq!(registry.to_json(id, &value).unwrap(), json!(["Display", "Web"]));
        assert!(registry.from_json(id, &json!(["Twitter"])).is_err());
    }

    #[test]
    fn test_struct_json_errors() {
        let mut registry = registry();
        let id = registry.resolve("Info").unwrap();
        let err = registry.from_json(id, &json!({ "class": "Normal" })).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingField("limit".to_string()));
        assert_eq!(err.path, vec!["Info"]);

        let err = registry
            .from_json(id, &json!({ "class": "Bogus" }))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownName("Bogus".to_string()));
        assert_eq!(err.path, vec!["Info", "class", "DispatchClass"]);
    }
}
