// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::TextEncodingError;

/// Byte encoding used when converting between text and bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 3] = [
        TextEncoding::Utf8,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Utf16Le => "utf16le",
            TextEncoding::Utf16Be => "utf16be",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|encoding| encoding.name() == name)
    }

    /// Slot used by the per-encoding string cache of [`Content`](super::Content).
    pub(crate) fn index(&self) -> usize {
        match self {
            TextEncoding::Utf8 => 0,
            TextEncoding::Utf16Le => 1,
            TextEncoding::Utf16Be => 2,
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Strict decode: malformed input is an error, never replaced.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, TextEncodingError> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| {
                    TextEncodingError::new(format!(
                        "Invalid UTF-8 byte sequence at index {}",
                        e.valid_up_to()
                    ))
                }),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                let units = self.code_units(bytes)?;
                String::from_utf16(&units).map_err(|_| {
                    TextEncodingError::new(format!("Unpaired surrogate in {} input", self.label()))
                })
            }
        }
    }

    /// Lenient decode: malformed sequences become U+FFFD.
    pub fn decode_lossy(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                let (even, rest) = bytes.split_at(bytes.len() - bytes.len() % 2);
                let units: Vec<u16> = even.chunks_exact(2).map(|pair| self.unit(pair)).collect();
                let mut text = String::from_utf16_lossy(&units);
                if !rest.is_empty() {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
        }
    }

    fn code_units(&self, bytes: &[u8]) -> Result<Vec<u16>, TextEncodingError> {
        if bytes.len() % 2 != 0 {
            return Err(TextEncodingError::new(format!(
                "{} input has odd byte length {}",
                self.label(),
                bytes.len()
            )));
        }
        Ok(bytes.chunks_exact(2).map(|pair| self.unit(pair)).collect())
    }

    fn unit(&self, pair: &[u8]) -> u16 {
        match self {
            TextEncoding::Utf16Be => u16::from_be_bytes([pair[0], pair[1]]),
            _ => u16::from_le_bytes([pair[0], pair[1]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_each_encoding() {
        let text = "Grüße 🦀";
        for encoding in TextEncoding::ALL {
            let bytes = encoding.encode(text);
            assert_eq!(encoding.decode(&bytes).unwrap(), text, "{}", encoding.label());
        }
    }

    #[test]
    fn test_utf16_byte_order() {
        assert_eq!(TextEncoding::Utf16Le.encode("A"), vec![0x41, 0x00]);
        assert_eq!(TextEncoding::Utf16Be.encode("A"), vec![0x00, 0x41]);
    }

    #[test]
    fn test_strict_decode_rejects_malformed_input() {
        let err = TextEncoding::Utf8.decode(&[0x61, 0xff, 0x62]).unwrap_err();
        assert!(err.message.contains("index 1"));

        assert!(TextEncoding::Utf16Le.decode(&[0x41]).is_err());
        // Lone high surrogate
        assert!(TextEncoding::Utf16Be.decode(&[0xd8, 0x00]).is_err());
    }

    #[test]
    fn test_lossy_decode_substitutes_replacement_character() {
        assert_eq!(TextEncoding::Utf8.decode_lossy(&[0x61, 0xff]), "a\u{fffd}");
        assert_eq!(TextEncoding::Utf16Le.decode_lossy(&[0x41, 0x00, 0x42]), "A\u{fffd}");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TextEncoding::from_name("utf16be"), Some(TextEncoding::Utf16Be));
        assert_eq!(TextEncoding::from_name("latin1"), None);
    }
}
