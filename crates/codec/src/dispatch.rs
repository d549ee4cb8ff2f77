// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-directed encoding and decoding of [`Value`]s.
//!
//! Every call walks the resolved node graph from a [`SchemaId`], picking the
//! primitive or composite rule for each node. Errors are prefixed with the
//! registered names, field names and variant names on the way out.

use crate::composite::{
    decode_fixed, decode_option, decode_result, decode_sequence, encode_array, encode_option,
    encode_result, encode_sequence,
};
use crate::error::{CodecError, ErrorKind};
use crate::input::Input;
use crate::primitive::{
    decode_bool, decode_compact_bounded, decode_fixed_bytes, decode_int, decode_length,
    decode_str, decode_uint, encode_bool, encode_compact, encode_fixed_bytes, encode_int,
    encode_length, encode_str, encode_uint,
};
use crate::registry::Registry;
use crate::schema::{BitSetSchema, EnumSchema, Field, Primitive, Schema, SchemaId};
use crate::value::Value;
use primitive_types::U256;
use std::collections::BTreeSet;

/// `Option<bool>` is a single byte.
const OPTION_BOOL_NONE: u8 = 0x00;
const OPTION_BOOL_TRUE: u8 = 0x01;
const OPTION_BOOL_FALSE: u8 = 0x02;

impl Registry {
    pub fn encode(&self, id: SchemaId, value: &Value) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode_to(id, value, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `value` to `out`.
    pub fn encode_to(&self, id: SchemaId, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.encode_node(id, value, out, 0)
    }

    /// Decode one value from the front of `bytes`, returning it with the number
    /// of bytes consumed.
    pub fn decode(&self, id: SchemaId, bytes: &[u8]) -> Result<(Value, usize), CodecError> {
        let mut input = Input::new(bytes);
        let value = self.decode_from(id, &mut input)?;
        Ok((value, input.offset()))
    }

    /// Decode a value that must span the whole buffer.
    pub fn decode_all(&self, id: SchemaId, bytes: &[u8]) -> Result<Value, CodecError> {
        let mut input = Input::new(bytes);
        let value = self.decode_from(id, &mut input)?;
        if !input.is_empty() {
            return Err(input.error(ErrorKind::TrailingBytes(input.remaining())));
        }
        Ok(value)
    }

    pub fn decode_from(&self, id: SchemaId, input: &mut Input<'_>) -> Result<Value, CodecError> {
        self.decode_node(id, input, 0)
    }

    fn encode_node(
        &self,
        id: SchemaId,
        value: &Value,
        out: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        let at = |kind| CodecError::new(kind, out.len());
        if depth > self.options().max_depth {
            return Err(at(ErrorKind::DepthLimitExceeded(self.options().max_depth)));
        }
        let schema = self.node(id).map_err(at)?;
        let result = self.encode_schema(schema, value, out, depth);
        result.map_err(|err| self.label_error(id, err))
    }

    fn encode_schema(
        &self,
        schema: &Schema,
        value: &Value,
        out: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        let next = depth + 1;
        match (schema, value) {
            (Schema::Alias(target), _) => self.encode_node(*target, value, out, next),
            (Schema::Primitive(p), _) => encode_primitive(*p, value, out),
            (Schema::Unit, Value::Unit) => Ok(()),
            (Schema::Bytes(len), Value::Bytes(bytes)) => encode_fixed_bytes(*len, bytes, out),
            (Schema::Bytes(len), Value::Sequence(items)) => {
                encode_array(*len, items, out, |_, v, out| {
                    encode_primitive(Primitive::U8, v, out)
                })
            }
            (Schema::Compact(inner), _) => {
                let bits = self
                    .compact_bits(*inner)
                    .map_err(|kind| CodecError::new(kind, out.len()))?;
                let raw = unsigned(value, bits, out)?;
                encode_compact(raw, out);
                Ok(())
            }
            (Schema::Option(inner), Value::Option(inner_value)) if self.is_bool(*inner) => {
                let byte = match inner_value.as_deref() {
                    None => OPTION_BOOL_NONE,
                    Some(Value::Bool(true)) => OPTION_BOOL_TRUE,
                    Some(Value::Bool(false)) => OPTION_BOOL_FALSE,
                    Some(other) => return Err(mismatch("bool", other, out).within("Some")),
                };
                out.push(byte);
                Ok(())
            }
            (Schema::Option(inner), Value::Option(inner_value)) => {
                encode_option(inner_value.as_deref(), out, |v, out| {
                    self.encode_node(*inner, v, out, next)
                })
            }
            (Schema::Result { ok, err }, Value::Result(result)) => encode_result(
                result.as_ref().map(|v| &**v).map_err(|v| &**v),
                out,
                |v, out| self.encode_node(*ok, v, out, next),
                |v, out| self.encode_node(*err, v, out, next),
            ),
            (Schema::Tuple(ids), Value::Tuple(items)) => {
                encode_array(ids.len(), items, out, |index, v, out| {
                    self.encode_node(ids[index], v, out, next)
                })
            }
            (Schema::Sequence(inner), Value::Bytes(bytes)) if self.is_u8(*inner) => {
                encode_length(bytes.len(), out)?;
                out.extend_from_slice(bytes);
                Ok(())
            }
            (Schema::Sequence(inner), Value::Sequence(items)) => {
                encode_sequence(items, out, |_, v, out| self.encode_node(*inner, v, out, next))
            }
            (Schema::Array(inner, len), Value::Bytes(bytes)) if self.is_u8(*inner) => {
                encode_fixed_bytes(*len, bytes, out)
            }
            (Schema::Array(inner, len), Value::Sequence(items)) => {
                encode_array(*len, items, out, |_, v, out| {
                    self.encode_node(*inner, v, out, next)
                })
            }
            (Schema::Struct(fields), Value::Struct(values)) => {
                self.encode_struct(fields, values, out, next)
            }
            (Schema::Enum(schema), Value::Variant { name, value }) => {
                self.encode_enum(schema, name, value, out, next)
            }
            (Schema::BitSet(schema), Value::Flags(flags)) => encode_bitset(schema, flags, out),
            (schema, value) => Err(mismatch(schema.kind_name(), value, out)),
        }
    }

    fn encode_struct(
        &self,
        fields: &[Field],
        values: &[(String, Value)],
        out: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        if let Some((extra, _)) = values
            .iter()
            .find(|(name, _)| !fields.iter().any(|f| &f.name == name))
        {
            return Err(CodecError::new(ErrorKind::UnknownName(extra.clone()), out.len()));
        }
        for field in fields {
            let value = values
                .iter()
                .find(|(name, _)| name == &field.name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    CodecError::new(ErrorKind::MissingField(field.name.clone()), out.len())
                })?;
            self.encode_node(field.schema, value, out, depth)
                .map_err(|e| e.within(field.name.clone()))?;
        }
        Ok(())
    }

    fn encode_enum(
        &self,
        schema: &EnumSchema,
        name: &str,
        value: &Value,
        out: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        let variant = schema
            .by_name(name)
            .ok_or_else(|| CodecError::new(ErrorKind::UnknownName(name.to_string()), out.len()))?;
        encode_uint(schema.tag.bits(), U256::from(variant.index), out)?;
        match (variant.payload, value) {
            (Some(payload), value) => self
                .encode_node(payload, value, out, depth)
                .map_err(|e| e.within(name)),
            (None, Value::Unit) => Ok(()),
            (None, other) => Err(mismatch("unit", other, out).within(name)),
        }
    }

    fn decode_node(&self, id: SchemaId, input: &mut Input<'_>, depth: usize) -> Result<Value, CodecError> {
        if depth > self.options().max_depth {
            return Err(input.error(ErrorKind::DepthLimitExceeded(self.options().max_depth)));
        }
        let schema = self.node(id).map_err(|kind| input.error(kind))?;
        self.decode_schema(schema, input, depth)
            .map_err(|err| self.label_error(id, err))
    }

    fn decode_schema(
        &self,
        schema: &Schema,
        input: &mut Input<'_>,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let next = depth + 1;
        let max_len = self.options().max_sequence_len;
        match schema {
            Schema::Alias(target) => self.decode_node(*target, input, next),
            Schema::Primitive(p) => decode_primitive(*p, input, self.options().lenient_bool, max_len),
            Schema::Unit => Ok(Value::Unit),
            Schema::Bytes(len) => Ok(Value::Bytes(decode_fixed_bytes(*len, input)?.to_vec())),
            Schema::Compact(inner) => {
                let bits = self.compact_bits(*inner).map_err(|kind| input.error(kind))?;
                Ok(unsigned_value(bits, decode_compact_bounded(bits, input)?))
            }
            Schema::Option(inner) if self.is_bool(*inner) => {
                let start = input.offset();
                match input.read_byte()? {
                    OPTION_BOOL_NONE => Ok(Value::none()),
                    OPTION_BOOL_TRUE => Ok(Value::some(Value::Bool(true))),
                    OPTION_BOOL_FALSE => Ok(Value::some(Value::Bool(false))),
                    other => Err(input.error_at(start, ErrorKind::InvalidDiscriminant(other))),
                }
            }
            Schema::Option(inner) => {
                let value = decode_option(input, |input| self.decode_node(*inner, input, next))?;
                Ok(Value::Option(value.map(Box::new)))
            }
            Schema::Result { ok, err } => {
                let value = decode_result(
                    input,
                    |input| self.decode_node(*ok, input, next),
                    |input| self.decode_node(*err, input, next),
                )?;
                Ok(Value::Result(value.map(Box::new).map_err(Box::new)))
            }
            Schema::Tuple(ids) => Ok(Value::Tuple(decode_fixed(input, ids.len(), |index, input| {
                self.decode_node(ids[index], input, next)
            })?)),
            Schema::Sequence(inner) if self.is_u8(*inner) => {
                let len = decode_length(input, max_len)?;
                Ok(Value::Bytes(input.read_bytes(len)?.to_vec()))
            }
            Schema::Sequence(inner) => Ok(Value::Sequence(decode_sequence(input, max_len, |_, input| {
                self.decode_node(*inner, input, next)
            })?)),
            Schema::Array(inner, len) if self.is_u8(*inner) => {
                Ok(Value::Bytes(decode_fixed_bytes(*len, input)?.to_vec()))
            }
            Schema::Array(inner, len) => Ok(Value::Sequence(decode_fixed(input, *len, |_, input| {
                self.decode_node(*inner, input, next)
            })?)),
            Schema::Struct(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let value = self
                        .decode_node(field.schema, input, next)
                        .map_err(|e| e.within(field.name.clone()))?;
                    values.push((field.name.clone(), value));
                }
                Ok(Value::Struct(values))
            }
            Schema::Enum(schema) => self.decode_enum(schema, input, next),
            Schema::BitSet(schema) => decode_bitset(schema, input),
        }
    }

    fn decode_enum(
        &self,
        schema: &EnumSchema,
        input: &mut Input<'_>,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let start = input.offset();
        let index = decode_uint(schema.tag.bits(), input)?.low_u32();
        let variant = schema
            .by_index(index)
            .ok_or_else(|| input.error_at(start, ErrorKind::UnknownVariant(index)))?;
        let value = match variant.payload {
            Some(payload) => self
                .decode_node(payload, input, depth)
                .map_err(|e| e.within(variant.name.clone()))?,
            None => Value::Unit,
        };
        Ok(Value::variant(variant.name.clone(), value))
    }
}

fn mismatch(expected: &str, found: &Value, out: &[u8]) -> CodecError {
    CodecError::new(
        ErrorKind::TypeMismatch {
            expected: expected.to_string(),
            found: found.kind_name().to_string(),
        },
        out.len(),
    )
}

/// Read `value` as an unsigned integer that must fit in `bits`.
fn unsigned(value: &Value, bits: u32, out: &[u8]) -> Result<U256, CodecError> {
    match value {
        Value::Int(v) if *v < 0 => Err(CodecError::new(
            ErrorKind::ValueOutOfRange(format!("{} is negative", v)),
            out.len(),
        )),
        _ => {
            let raw = value
                .as_u256()
                .ok_or_else(|| mismatch(&format!("u{}", bits), value, out))?;
            if raw.bits() > bits as usize {
                return Err(CodecError::new(
                    ErrorKind::ValueOutOfRange(format!("{} does not fit in u{}", raw, bits)),
                    out.len(),
                ));
            }
            Ok(raw)
        }
    }
}

/// Two's complement bit pattern of `value` in 256 bits.
pub(crate) fn i256_bits(value: i128) -> U256 {
    if value >= 0 {
        U256::from(value as u128)
    } else {
        U256::MAX - U256::from((-(value + 1)) as u128)
    }
}

/// The value an unsigned integer of `bits` width decodes to.
pub(crate) fn unsigned_value(bits: u32, raw: U256) -> Value {
    if bits <= 128 {
        Value::UInt(raw.low_u128())
    } else {
        Value::U256(raw)
    }
}

fn encode_primitive(primitive: Primitive, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
    match (primitive, value) {
        (Primitive::Bool, Value::Bool(b)) => {
            encode_bool(*b, out);
            Ok(())
        }
        (Primitive::Str, Value::Str(s)) => encode_str(s, out),
        (Primitive::I256, Value::I256(raw)) => encode_uint(256, *raw, out),
        (Primitive::I256, Value::Int(v)) => encode_uint(256, i256_bits(*v), out),
        (Primitive::I256, Value::UInt(v)) => encode_uint(256, U256::from(*v), out),
        (p, Value::Int(v)) if p.is_signed() => encode_int(p.bits().unwrap_or(128), *v, out),
        (p, Value::UInt(v)) if p.is_signed() => match i128::try_from(*v) {
            Ok(v) => encode_int(p.bits().unwrap_or(128), v, out),
            Err(_) => Err(CodecError::new(
                ErrorKind::ValueOutOfRange(format!("{} does not fit in {}", v, p.name())),
                out.len(),
            )),
        },
        (p, value) if p.is_unsigned() => {
            let bits = p.bits().unwrap_or(256);
            let raw = unsigned(value, bits, out)?;
            encode_uint(bits, raw, out)
        }
        (p, value) => Err(mismatch(p.name(), value, out)),
    }
}

fn decode_primitive(
    primitive: Primitive,
    input: &mut Input<'_>,
    lenient_bool: bool,
    max_len: u32,
) -> Result<Value, CodecError> {
    Ok(match primitive {
        Primitive::Bool => Value::Bool(decode_bool(input, lenient_bool)?),
        Primitive::Str => Value::Str(decode_str(input, max_len)?),
        Primitive::I256 => Value::I256(decode_uint(256, input)?),
        p if p.is_signed() => Value::Int(decode_int(p.bits().unwrap_or(128), input)?),
        p => {
            let bits = p.bits().unwrap_or(256);
            unsigned_value(bits, decode_uint(bits, input)?)
        }
    })
}

fn encode_bitset(
    schema: &BitSetSchema,
    flags: &BTreeSet<String>,
    out: &mut Vec<u8>,
) -> Result<(), CodecError> {
    let mut raw = U256::zero();
    for name in flags {
        let position = schema
            .flags
            .iter()
            .find(|(flag, _)| flag == name)
            .map(|(_, position)| *position)
            .ok_or_else(|| CodecError::new(ErrorKind::UnknownName(name.clone()), out.len()))?;
        raw = raw | (U256::one() << position as usize);
    }
    encode_uint(schema.bits, raw, out)
}

/// Bits with no declared flag are ignored.
fn decode_bitset(schema: &BitSetSchema, input: &mut Input<'_>) -> Result<Value, CodecError> {
    let raw = decode_uint(schema.bits, input)?;
    Ok(Value::Flags(
        schema
            .flags
            .iter()
            .filter(|(_, position)| raw.bit(*position as usize))
            .map(|(name, _)| name.clone())
            .collect(),
    ))
}
