// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Variant-parameterized base64.
//!
//! A [`Base64Variant`] describes the alphabet, padding policy, tolerance for
//! foreign characters and optional line wrapping. Four variants ship built in.

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::ByteEncodingError;

const ALPHABET_BASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Descriptor of a base64 flavour, consumed by raw codec callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Variant {
    #[serde(skip)]
    pub name: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// 64 ordered characters
    pub alphabet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_character: Option<char>,
    pub pad_character_optional: bool,
    pub foreign_characters_forbidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_separator: Option<&'static str>,
}

impl Base64Variant {
    /// Standard `base64` (RFC 3548, RFC 4648).
    pub fn standard() -> Self {
        Self {
            name: "base64",
            label: "Standard 'base64' (RFC 3548, RFC 4648)",
            description: None,
            alphabet: format!("{}+/", ALPHABET_BASE),
            pad_character: Some('='),
            pad_character_optional: false,
            foreign_characters_forbidden: true,
            max_line_length: None,
            line_separator: None,
        }
    }

    /// URL and filename safe `base64url` (RFC 4648 §5).
    pub fn url_safe() -> Self {
        Self {
            name: "base64url",
            label: "Standard 'base64url' (RFC 4648 §5)",
            description: Some("URL and Filename Safe Alphabet"),
            alphabet: format!("{}-_", ALPHABET_BASE),
            pad_character_optional: true,
            ..Self::standard()
        }
    }

    /// MIME transfer encoding (RFC 2045).
    pub fn rfc2045() -> Self {
        Self {
            name: "rfc2045",
            label: "Transfer encoding for MIME (RFC 2045)",
            foreign_characters_forbidden: false,
            max_line_length: Some(76),
            line_separator: Some("\r\n"),
            ..Self::standard()
        }
    }

    /// Original base64 of Privacy-Enhanced Mail (RFC 1421).
    pub fn rfc1421() -> Self {
        Self {
            name: "rfc1421",
            label: "Original Base64 (RFC 1421)",
            description: Some("Privacy-Enhanced Mail (PEM)"),
            foreign_characters_forbidden: false,
            max_line_length: Some(64),
            line_separator: Some("\r\n"),
            ..Self::standard()
        }
    }

    /// Built-in variants in display order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::standard(),
            Self::url_safe(),
            Self::rfc2045(),
            Self::rfc1421(),
        ]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|variant| variant.name == name)
    }

    /// Checks the descriptor before any codec work.
    ///
    /// The alphabet must hold 64 distinct characters and the pad character
    /// must lie outside it.
    pub fn validate(&self) -> Result<(), ByteEncodingError> {
        let alphabet = self.alphabet_chars();
        if alphabet.len() != 64 {
            return Err(ByteEncodingError::new(format!(
                "Variant '{}' needs an alphabet of 64 characters, got {}",
                self.name,
                alphabet.len()
            )));
        }

        let mut seen = HashSet::with_capacity(64);
        if let Some(&repeated) = alphabet.iter().find(|c| !seen.insert(**c)) {
            return Err(ByteEncodingError::new(format!(
                "Variant '{}' repeats alphabet character '{}'",
                self.name, repeated
            )));
        }

        match self.pad_character {
            Some(pad) if seen.contains(&pad) => Err(ByteEncodingError::new(format!(
                "Variant '{}' uses alphabet character '{}' for padding",
                self.name, pad
            ))),
            _ => Ok(()),
        }
    }

    fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }

    fn emitted_pad(&self) -> Option<char> {
        self.pad_character.filter(|_| !self.pad_character_optional)
    }
}

impl Default for Base64Variant {
    fn default() -> Self {
        Self::standard()
    }
}

/// Encodes bytes 3 at a time into 4 alphabet characters.
pub fn base64_string_from_bytes(
    bytes: &[u8],
    variant: &Base64Variant,
) -> Result<String, ByteEncodingError> {
    variant.validate()?;
    let alphabet = variant.alphabet_chars();
    let pad = variant.emitted_pad();
    let mut string = String::with_capacity((bytes.len() + 2) / 3 * 4);

    for group in bytes.chunks(3) {
        let byte1 = group[0];
        let byte2 = group.get(1).copied();
        let byte3 = group.get(2).copied();

        // Bits 1-6 from byte 1
        string.push(alphabet[usize::from(byte1 >> 2)]);
        // Bits 7-8 from byte 1 joined by bits 1-4 from byte 2
        string.push(alphabet[usize::from(((byte1 & 3) << 4) | (byte2.unwrap_or(0) >> 4))]);

        match byte2 {
            // Bits 5-8 from byte 2 joined by bits 1-2 from byte 3
            Some(byte2) => string.push(
                alphabet[usize::from(((byte2 & 15) << 2) | (byte3.unwrap_or(0) >> 6))],
            ),
            None => string.extend(pad),
        }
        match byte3 {
            // Bits 3-8 from byte 3
            Some(byte3) => string.push(alphabet[usize::from(byte3 & 63)]),
            None => string.extend(pad),
        }
    }

    Ok(match (variant.max_line_length, variant.line_separator) {
        (Some(max), Some(separator)) if max > 0 => {
            crate::codec::chunk(&string, max).join(separator)
        }
        _ => string,
    })
}

/// Decodes base64 text under `variant`.
pub fn bytes_from_base64_string(
    string: &str,
    variant: &Base64Variant,
) -> Result<Vec<u8>, ByteEncodingError> {
    variant.validate()?;
    let alphabet = variant.alphabet_chars();
    let chars: Vec<char> = string.chars().collect();
    let separator: Vec<char> = variant
        .line_separator
        .map(|s| s.chars().collect())
        .unwrap_or_default();

    let mut octets: Vec<u8> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let character = chars[i];

        if !separator.is_empty() && chars[i..].starts_with(&separator) {
            i += separator.len();
            continue;
        }

        if Some(character) != variant.pad_character {
            match alphabet.iter().position(|&c| c == character) {
                Some(octet) => octets.push(octet as u8),
                None if variant.foreign_characters_forbidden => {
                    return Err(ByteEncodingError::new(format!(
                        "Forbidden character '{}' at index {}",
                        character, i
                    )));
                }
                None => {}
            }
        }
        i += 1;
    }

    let padding = (4 - octets.len() % 4) % 4;
    if padding == 3 {
        return Err(ByteEncodingError::new(
            "A single remaining encoded character in the last quadruple or a \
             padding of 3 characters is not allowed",
        ));
    }
    octets.resize(octets.len() + padding, 0);

    let mut bytes = Vec::with_capacity(octets.len() / 4 * 3);
    for quad in octets.chunks_exact(4) {
        // Bits 1-6 from octet 1 joined by bits 1-2 from octet 2
        bytes.push((quad[0] << 2) | (quad[1] >> 4));
        // Bits 3-6 from octet 2 joined by bits 1-4 from octet 3
        bytes.push(((quad[1] & 0b001111) << 4) | (quad[2] >> 2));
        // Bits 5-6 from octet 3 joined by bits 1-6 from octet 4
        bytes.push(((quad[2] & 0b000011) << 6) | quad[3]);
    }
    bytes.truncate(bytes.len() - padding);

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::base64::engine::general_purpose;
    use ::base64::Engine as _;
    use proptest::prelude::*;

    #[test]
    fn test_standard_known_vectors() {
        let variant = Base64Variant::standard();
        let test_cases: Vec<(&[u8], &str)> = vec![
            (&[0x01, 0x02, 0x03], "AQID"),
            (b"", ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foobar", "Zm9vYmFy"),
        ];

        for (bytes, expected) in test_cases {
            assert_eq!(base64_string_from_bytes(bytes, &variant).unwrap(), expected);
            assert_eq!(bytes_from_base64_string(expected, &variant).unwrap(), bytes);
        }
    }

    #[test]
    fn test_url_safe_alphabet_and_optional_padding() {
        let variant = Base64Variant::url_safe();
        assert_eq!(base64_string_from_bytes(&[0xfb, 0xff], &variant).unwrap(), "-_8");
        assert_eq!(bytes_from_base64_string("-_8", &variant).unwrap(), vec![0xfb, 0xff]);
        // Padding may still be present when decoding
        assert_eq!(bytes_from_base64_string("-_8=", &variant).unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_line_wrapping() {
        let bytes = vec![0u8; 60];
        let encoded = base64_string_from_bytes(&bytes, &Base64Variant::rfc2045()).unwrap();
        let lines: Vec<&str> = encoded.split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 76);
        assert_eq!(lines[1].len(), 4);

        let pem = base64_string_from_bytes(&bytes, &Base64Variant::rfc1421()).unwrap();
        assert_eq!(pem.split("\r\n").next().map(str::len), Some(64));

        assert_eq!(
            bytes_from_base64_string(&encoded, &Base64Variant::rfc2045()).unwrap(),
            bytes
        );
    }

    #[test]
    fn test_foreign_characters() {
        let err = bytes_from_base64_string("AQ*D", &Base64Variant::standard()).unwrap_err();
        assert_eq!(err.message, "Forbidden character '*' at index 2");

        let err = bytes_from_base64_string("AQ+D", &Base64Variant::url_safe()).unwrap_err();
        assert!(err.message.contains("'+'"));

        for variant in [Base64Variant::rfc2045(), Base64Variant::rfc1421()] {
            assert_eq!(
                bytes_from_base64_string("AQ*I\nD", &variant).unwrap(),
                vec![0x01, 0x02, 0x03],
                "{}",
                variant.name
            );
        }
    }

    #[test]
    fn test_single_leftover_character_is_rejected_by_every_variant() {
        for variant in Base64Variant::all() {
            let result = bytes_from_base64_string("AQIDB", &variant);
            let err = result.expect_err(variant.name);
            assert!(err.message.contains("single remaining encoded character"));

            assert!(bytes_from_base64_string("B===", &variant).is_err());
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let names: Vec<&str> = Base64Variant::all().iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["base64", "base64url", "rfc2045", "rfc1421"]);
        assert_eq!(Base64Variant::by_name("rfc1421").and_then(|v| v.max_line_length), Some(64));
        assert!(Base64Variant::by_name("base32").is_none());
    }

    #[test]
    fn test_malformed_descriptors_are_rejected() {
        let test_cases = vec![
            (
                Base64Variant {
                    alphabet: "ABC".to_string(),
                    ..Base64Variant::standard()
                },
                "64 characters, got 3",
            ),
            (
                Base64Variant {
                    alphabet: "é".repeat(300),
                    ..Base64Variant::standard()
                },
                "64 characters, got 300",
            ),
            (
                Base64Variant {
                    alphabet: format!("A{}", &Base64Variant::standard().alphabet[..63]),
                    ..Base64Variant::standard()
                },
                "repeats alphabet character 'A'",
            ),
            (
                Base64Variant {
                    pad_character: Some('+'),
                    ..Base64Variant::standard()
                },
                "character '+' for padding",
            ),
        ];

        for (variant, expected) in test_cases {
            let err = base64_string_from_bytes(&[0xff], &variant).unwrap_err();
            assert!(err.message.contains(expected), "{}", err.message);
            assert_eq!(bytes_from_base64_string("/w==", &variant), Err(err));
        }

        for variant in Base64Variant::all() {
            assert_eq!(variant.validate(), Ok(()), "{}", variant.name);
        }
    }

    #[test]
    fn test_descriptor_serialization() {
        let json = serde_json::to_value(Base64Variant::url_safe()).unwrap();
        assert_eq!(json["padCharacter"], "=");
        assert_eq!(json["padCharacterOptional"], true);
        assert_eq!(json["foreignCharactersForbidden"], true);
        assert!(json.get("maxLineLength").is_none());
    }

    proptest! {
        #[test]
        fn test_round_trip_every_variant(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
            for variant in Base64Variant::all() {
                let encoded = base64_string_from_bytes(&bytes, &variant).unwrap();
                prop_assert_eq!(
                    bytes_from_base64_string(&encoded, &variant).unwrap(),
                    bytes.clone()
                );
            }
        }

        #[test]
        fn test_matches_reference_engine(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
            prop_assert_eq!(
                base64_string_from_bytes(&bytes, &Base64Variant::standard()).unwrap(),
                general_purpose::STANDARD.encode(&bytes)
            );
            prop_assert_eq!(
                base64_string_from_bytes(&bytes, &Base64Variant::url_safe()).unwrap(),
                general_purpose::URL_SAFE_NO_PAD.encode(&bytes)
            );
        }
    }
}
