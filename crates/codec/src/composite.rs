// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Container codecs: options, results, length-prefixed sequences and
//! fixed-length runs (arrays and tuples).
//!
//! Element encoding is delegated to the caller through closures, so these
//! helpers know nothing about schemas.

use crate::error::{CodecError, ErrorKind};
use crate::input::Input;
use crate::primitive::{decode_length, encode_length};

const NONE_FLAG: u8 = 0x00;
const SOME_FLAG: u8 = 0x01;
const OK_TAG: u8 = 0x00;
const ERR_TAG: u8 = 0x01;

fn element(index: usize) -> String {
    format!("[{}]", index)
}

pub fn encode_option<T>(
    value: Option<&T>,
    out: &mut Vec<u8>,
    encode: impl FnOnce(&T, &mut Vec<u8>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    match value {
        None => {
            out.push(NONE_FLAG);
            Ok(())
        }
        Some(inner) => {
            out.push(SOME_FLAG);
            encode(inner, out).map_err(|e| e.within("Some"))
        }
    }
}

pub fn decode_option<'a, T>(
    input: &mut Input<'a>,
    decode: impl FnOnce(&mut Input<'a>) -> Result<T, CodecError>,
) -> Result<Option<T>, CodecError> {
    let start = input.offset();
    match input.read_byte()? {
        NONE_FLAG => Ok(None),
        SOME_FLAG => decode(input).map(Some).map_err(|e| e.within("Some")),
        other => Err(input.error_at(start, ErrorKind::InvalidDiscriminant(other))),
    }
}

pub fn encode_result<T, E>(
    value: Result<&T, &E>,
    out: &mut Vec<u8>,
    encode_ok: impl FnOnce(&T, &mut Vec<u8>) -> Result<(), CodecError>,
    encode_err: impl FnOnce(&E, &mut Vec<u8>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    match value {
        Ok(inner) => {
            out.push(OK_TAG);
            encode_ok(inner, out).map_err(|e| e.within("Ok"))
        }
        Err(inner) => {
            out.push(ERR_TAG);
            encode_err(inner, out).map_err(|e| e.within("Err"))
        }
    }
}

pub fn decode_result<'a, T, E>(
    input: &mut Input<'a>,
    decode_ok: impl FnOnce(&mut Input<'a>) -> Result<T, CodecError>,
    decode_err: impl FnOnce(&mut Input<'a>) -> Result<E, CodecError>,
) -> Result<Result<T, E>, CodecError> {
    let start = input.offset();
    match input.read_byte()? {
        OK_TAG => decode_ok(input).map(Ok).map_err(|e| e.within("Ok")),
        ERR_TAG => decode_err(input).map(Err).map_err(|e| e.within("Err")),
        other => Err(input.error_at(start, ErrorKind::InvalidDiscriminant(other))),
    }
}

/// Encode exactly `items.len()` elements with no length prefix.
pub fn encode_fixed<T>(
    items: &[T],
    out: &mut Vec<u8>,
    mut encode: impl FnMut(usize, &T, &mut Vec<u8>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    for (index, item) in items.iter().enumerate() {
        encode(index, item, out).map_err(|e| e.within(element(index)))?;
    }
    Ok(())
}

/// Decode exactly `len` elements with no length prefix.
pub fn decode_fixed<'a, T>(
    input: &mut Input<'a>,
    len: usize,
    mut decode: impl FnMut(usize, &mut Input<'a>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    // Every element takes at least one byte in practice, but zero-sized ones do
    // exist, so cap the reservation instead of rejecting early.
    let mut items = Vec::with_capacity(len.min(input.remaining()));
    for index in 0..len {
        items.push(decode(index, input).map_err(|e| e.within(element(index)))?);
    }
    Ok(items)
}

/// Fixed-length array: checks the element count, then encodes without a prefix.
pub fn encode_array<T>(
    len: usize,
    items: &[T],
    out: &mut Vec<u8>,
    encode: impl FnMut(usize, &T, &mut Vec<u8>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    if items.len() != len {
        return Err(CodecError::new(
            ErrorKind::LengthMismatch {
                expected: len,
                actual: items.len(),
            },
            out.len(),
        ));
    }
    encode_fixed(items, out, encode)
}

/// Length-prefixed sequence: `Compact<u32>` count followed by the elements.
pub fn encode_sequence<T>(
    items: &[T],
    out: &mut Vec<u8>,
    encode: impl FnMut(usize, &T, &mut Vec<u8>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    encode_length(items.len(), out)?;
    encode_fixed(items, out, encode)
}

pub fn decode_sequence<'a, T>(
    input: &mut Input<'a>,
    max_len: u32,
    decode: impl FnMut(usize, &mut Input<'a>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let len = decode_length(input, max_len)?;
    decode_fixed(input, len, decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{decode_uint, encode_uint};
    use parity_scale_codec::Encode;
    use primitive_types::U256;

    fn put_u16(value: &u16, out: &mut Vec<u8>) -> Result<(), CodecError> {
        encode_uint(16, U256::from(*value), out)
    }

    fn take_u16(input: &mut Input<'_>) -> Result<u16, CodecError> {
        decode_uint(16, input).map(|v| v.low_u32() as u16)
    }

    #[test]
    fn test_option_matches_reference() {
        let mut out = Vec::new();
        encode_option(Some(&513u16), &mut out, put_u16).unwrap();
        assert_eq!(out, Some(513u16).encode());

        let mut out = Vec::new();
        encode_option(None, &mut out, put_u16).unwrap();
        assert_eq!(out, None::<u16>.encode());
    }

    #[test]
    fn test_option_invalid_flag() {
        let err = decode_option(&mut Input::new(&[0x02, 0, 0]), take_u16).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDiscriminant(0x02));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_option_some_truncated_reports_path() {
        let err = decode_option(&mut Input::new(&[0x01, 0x05]), take_u16).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TruncatedInput { .. }));
        assert_eq!(err.path, vec!["Some"]);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_result_matches_reference() {
        let value: Result<u16, u16> = Err(7);
        let mut out = Vec::new();
        encode_result(value.as_ref(), &mut out, put_u16, put_u16).unwrap();
        assert_eq!(out, value.encode());

        let decoded = decode_result(&mut Input::new(&out), take_u16, take_u16).unwrap();
        assert_eq!(decoded, Err(7));

        let err = decode_result(&mut Input::new(&[0x03]), take_u16, take_u16).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDiscriminant(0x03));
    }

    #[test]
    fn test_sequence_matches_reference() {
        let items: Vec<u16> = (0..100).collect();
        let mut out = Vec::new();
        encode_sequence(&items, &mut out, |_, v, out| put_u16(v, out)).unwrap();
        assert_eq!(out, items.encode());

        let mut input = Input::new(&out);
        let decoded = decode_sequence(&mut input, 1000, |_, input| take_u16(input)).unwrap();
        assert_eq!(decoded, items);
        assert!(input.is_empty());
    }

    #[test]
    fn test_sequence_truncated() {
        // declares 10 u16 elements, provides 5 bytes
        let bytes = [10 << 2, 1, 0, 2, 0, 3];
        let err = decode_sequence(&mut Input::new(&bytes), 1000, |_, input| take_u16(input))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TruncatedInput { .. }));
        assert_eq!(err.path, vec!["[2]"]);
    }

    #[test]
    fn test_sequence_count_bound() {
        let bytes = [10 << 2];
        let err = decode_sequence(&mut Input::new(&bytes), 4, |_, input| take_u16(input))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ElementCountExceeded { count: 10, max: 4 });
    }

    #[test]
    fn test_array_length_mismatch() {
        let err = encode_array(3, &[1u16, 2], &mut Vec::new(), |_, v, out| put_u16(v, out))
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_fixed_matches_reference_array() {
        let items = [1u16, 2, 3];
        let mut out = Vec::new();
        encode_array(3, &items, &mut out, |_, v, out| put_u16(v, out)).unwrap();
        assert_eq!(out, items.encode());

        let decoded = decode_fixed(&mut Input::new(&out), 3, |_, input| take_u16(input)).unwrap();
        assert_eq!(decoded, items.to_vec());

        let err = decode_fixed(&mut Input::new(&out[..5]), 3, |_, input| take_u16(input))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TruncatedInput { .. }));
    }
}
