// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting helpers for hex strings and enum variant keys.

/// Format bytes as hex string with "0x" prefix
pub fn hex_with_prefix(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode a hex string, with or without the "0x" prefix. Odd-length input is
/// read as if it had a leading zero.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    }
}

/// Lowercase only the first character, e.g. "PreRuntime" -> "preRuntime".
/// snake_case names pass through unchanged.
pub fn lowercase_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
