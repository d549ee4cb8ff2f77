// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Byte-level codecs for fixed-width scalars, fixed byte arrays, strings and the
//! compact integer format.
//!
//! All multi-byte integers are little-endian. Compact integers use the four-mode
//! SCALE layout selected by the two low bits of the first byte:
//!
//! | mode   | bytes        | range                |
//! |--------|--------------|----------------------|
//! | `0b00` | 1            | `0..=63`             |
//! | `0b01` | 2            | `64..=16383`         |
//! | `0b10` | 4            | `16384..=2^30 - 1`   |
//! | `0b11` | 1 + n        | `2^30..` (`n >= 4`)  |
//!
//! Decoding accepts exactly one encoding per value; anything wider than the
//! minimal form fails with [`ErrorKind::NonCanonicalEncoding`].

use crate::error::{CodecError, ErrorKind};
use crate::input::Input;
use primitive_types::U256;

const SINGLE_BYTE_MAX_BITS: usize = 6;
const TWO_BYTE_MAX_BITS: usize = 14;
const FOUR_BYTE_MAX_BITS: usize = 30;
const BIG_INTEGER_MIN_BYTES: usize = 4;
const MAX_PAYLOAD_BYTES: usize = 32;

fn width_bytes(bits: u32) -> usize {
    (bits / 8) as usize
}

fn out_of_range(out: &[u8], message: String) -> CodecError {
    CodecError::new(ErrorKind::ValueOutOfRange(message), out.len())
}

/// Encode an unsigned integer of `bits` width (8..=256).
pub fn encode_uint(bits: u32, value: U256, out: &mut Vec<u8>) -> Result<(), CodecError> {
    if value.bits() > bits as usize {
        return Err(out_of_range(out, format!("{} does not fit in u{}", value, bits)));
    }
    out.extend((0..width_bytes(bits)).map(|i| value.byte(i)));
    Ok(())
}

pub fn decode_uint(bits: u32, input: &mut Input<'_>) -> Result<U256, CodecError> {
    let bytes = input.read_bytes(width_bytes(bits))?;
    Ok(U256::from_little_endian(bytes))
}

/// Encode a signed integer of `bits` width (8..=128) in two's complement.
pub fn encode_int(bits: u32, value: i128, out: &mut Vec<u8>) -> Result<(), CodecError> {
    if bits < 128 {
        let max = (1i128 << (bits - 1)) - 1;
        let min = -(1i128 << (bits - 1));
        if value < min || value > max {
            return Err(out_of_range(out, format!("{} does not fit in i{}", value, bits)));
        }
    }
    out.extend_from_slice(&value.to_le_bytes()[..width_bytes(bits)]);
    Ok(())
}

pub fn decode_int(bits: u32, input: &mut Input<'_>) -> Result<i128, CodecError> {
    let bytes = input.read_bytes(width_bytes(bits))?;
    let negative = bytes.last().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xffu8; 16] } else { [0u8; 16] };
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(i128::from_le_bytes(buf))
}

pub fn encode_bool(value: bool, out: &mut Vec<u8>) {
    out.push(value as u8);
}

/// Strict decoding accepts only `0x00` and `0x01`; lenient decoding treats any
/// non-zero byte as `true`.
pub fn decode_bool(input: &mut Input<'_>, lenient: bool) -> Result<bool, CodecError> {
    let start = input.offset();
    match input.read_byte()? {
        0 => Ok(false),
        1 => Ok(true),
        _ if lenient => Ok(true),
        other => Err(input.error_at(start, ErrorKind::InvalidDiscriminant(other))),
    }
}

pub fn encode_fixed_bytes(len: usize, value: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
    if value.len() != len {
        return Err(CodecError::new(
            ErrorKind::LengthMismatch {
                expected: len,
                actual: value.len(),
            },
            out.len(),
        ));
    }
    out.extend_from_slice(value);
    Ok(())
}

pub fn decode_fixed_bytes<'a>(len: usize, input: &mut Input<'a>) -> Result<&'a [u8], CodecError> {
    input.read_bytes(len)
}

/// Number of bytes [`encode_compact`] emits for `value`.
pub fn compact_len(value: U256) -> usize {
    match value.bits() {
        0..=SINGLE_BYTE_MAX_BITS => 1,
        7..=TWO_BYTE_MAX_BITS => 2,
        15..=FOUR_BYTE_MAX_BITS => 4,
        bits => 1 + bits.div_ceil(8).max(BIG_INTEGER_MIN_BYTES),
    }
}

pub fn encode_compact(value: U256, out: &mut Vec<u8>) {
    match value.bits() {
        0..=SINGLE_BYTE_MAX_BITS => out.push((value.low_u32() as u8) << 2),
        7..=TWO_BYTE_MAX_BITS => {
            let raw = ((value.low_u32() as u16) << 2) | 0b01;
            out.extend_from_slice(&raw.to_le_bytes());
        }
        15..=FOUR_BYTE_MAX_BITS => {
            let raw = (value.low_u32() << 2) | 0b10;
            out.extend_from_slice(&raw.to_le_bytes());
        }
        bits => {
            let len = bits.div_ceil(8).max(BIG_INTEGER_MIN_BYTES);
            out.push((((len - BIG_INTEGER_MIN_BYTES) as u8) << 2) | 0b11);
            out.extend((0..len).map(|i| value.byte(i)));
        }
    }
}

pub fn decode_compact(input: &mut Input<'_>) -> Result<U256, CodecError> {
    let start = input.offset();
    let prefix = input.read_byte()?;
    let non_canonical = CodecError::new(ErrorKind::NonCanonicalEncoding, start);

    match prefix & 0b11 {
        0b00 => Ok(U256::from(prefix >> 2)),
        0b01 => {
            let [high] = input.read_array::<1>()?;
            let value = u16::from_le_bytes([prefix, high]) >> 2;
            if (value as usize) < (1 << SINGLE_BYTE_MAX_BITS) {
                return Err(non_canonical);
            }
            Ok(U256::from(value))
        }
        0b10 => {
            let tail = input.read_array::<3>()?;
            let value = u32::from_le_bytes([prefix, tail[0], tail[1], tail[2]]) >> 2;
            if value < (1 << TWO_BYTE_MAX_BITS) {
                return Err(non_canonical);
            }
            Ok(U256::from(value))
        }
        _ => {
            let len = (prefix >> 2) as usize + BIG_INTEGER_MIN_BYTES;
            let bytes = input.read_bytes(len)?;
            // The most significant byte must carry data, and the value must not fit a smaller mode.
            if bytes[len - 1] == 0 {
                return Err(non_canonical);
            }
            if len > MAX_PAYLOAD_BYTES {
                return Err(input.error_at(
                    start,
                    ErrorKind::ValueOutOfRange(format!("{}-byte compact exceeds 256 bits", len)),
                ));
            }
            let value = U256::from_little_endian(bytes);
            if value.bits() <= FOUR_BYTE_MAX_BITS {
                return Err(non_canonical);
            }
            Ok(value)
        }
    }
}

/// Decode a compact integer and check it fits an unsigned integer of `bits` width.
pub fn decode_compact_bounded(bits: u32, input: &mut Input<'_>) -> Result<U256, CodecError> {
    let start = input.offset();
    let value = decode_compact(input)?;
    if value.bits() > bits as usize {
        return Err(input.error_at(
            start,
            ErrorKind::ValueOutOfRange(format!("compact value {} does not fit in u{}", value, bits)),
        ));
    }
    Ok(value)
}

/// Decode a `Compact<u32>` length prefix and enforce the element count bound.
pub fn decode_length(input: &mut Input<'_>, max: u32) -> Result<usize, CodecError> {
    let start = input.offset();
    let count = decode_compact_bounded(32, input)?.low_u64();
    if count > max as u64 {
        return Err(input.error_at(start, ErrorKind::ElementCountExceeded { count, max }));
    }
    Ok(count as usize)
}

pub fn encode_length(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    if len > u32::MAX as usize {
        return Err(out_of_range(out, format!("length {} does not fit in u32", len)));
    }
    encode_compact(U256::from(len), out);
    Ok(())
}

pub fn encode_str(value: &str, out: &mut Vec<u8>) -> Result<(), CodecError> {
    encode_length(value.len(), out)?;
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

pub fn decode_str(input: &mut Input<'_>, max: u32) -> Result<String, CodecError> {
    let len = decode_length(input, max)?;
    let start = input.offset();
    let bytes = input.read_bytes(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| input.error_at(start, ErrorKind::InvalidUtf8))
}
