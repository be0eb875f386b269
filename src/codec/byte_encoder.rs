// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::Write;

use crate::errors::ByteEncodingError;

/// Two lowercase hex digits per byte.
pub fn hex_string_from_bytes(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{:02x}", byte);
        out
    })
}

/// Decodes hex digits (either case). Odd-length input gets a leading zero.
pub fn bytes_from_hex_string(string: &str) -> Result<Vec<u8>, ByteEncodingError> {
    decode_groups(string, 2, 16, "hex")
}

/// Eight binary digits per byte.
pub fn binary_string_from_bytes(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 8), |mut out, byte| {
        let _ = write!(out, "{:08b}", byte);
        out
    })
}

/// Decodes binary digits, left-padding with zeros to a multiple of 8.
pub fn bytes_from_binary_string(string: &str) -> Result<Vec<u8>, ByteEncodingError> {
    decode_groups(string, 8, 2, "binary")
}

/// Splits `string` into runs of at most `size` characters.
pub fn chunk(string: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = string.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|group| group.iter().collect())
        .collect()
}

fn decode_groups(
    string: &str,
    digits: usize,
    radix: u32,
    name: &str,
) -> Result<Vec<u8>, ByteEncodingError> {
    let count = string.chars().count();
    let fill = (digits - count % digits) % digits;
    let padded: String = std::iter::repeat('0').take(fill).chain(string.chars()).collect();

    chunk(&padded, digits)
        .into_iter()
        .map(|group| {
            let valid = group.chars().all(|c| c.is_digit(radix));
            valid
                .then(|| u8::from_str_radix(&group, radix).ok())
                .flatten()
                .ok_or_else(|| {
                    ByteEncodingError::new(format!("Invalid {} encoded byte '{}'", name, group))
                })
        })
        .collect()
}
