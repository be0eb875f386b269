// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Immutable content exchanged between bricks.
//!
//! A [`Content`] value keeps its bytes as the primary representation. Text and
//! code point views are computed on first access and memoized for the lifetime
//! of the value, so handing the same content to several bricks never converts
//! twice. Cloning is cheap: clones share the same storage and caches.

mod text_encoding;

pub use text_encoding::TextEncoding;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::errors::TextEncodingError;

#[derive(Default)]
struct ContentInner {
    bytes: Vec<u8>,
    strings: [OnceLock<Result<String, TextEncodingError>>; 3],
    code_points: OnceLock<Result<Vec<u32>, TextEncodingError>>,
}

/// Immutable, multi-representation unit of data.
///
/// Equality is defined on bytes only: two values holding the same bytes are
/// interchangeable no matter which representation they were built from.
#[derive(Clone, Default)]
pub struct Content(Arc<ContentInner>);

impl Content {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::new(ContentInner {
            bytes: bytes.into(),
            ..Default::default()
        }))
    }

    /// Content from UTF-8 text.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::from_string_with(text, TextEncoding::Utf8)
    }

    pub fn from_string_with(text: impl Into<String>, encoding: TextEncoding) -> Self {
        let text = text.into();
        let inner = ContentInner {
            bytes: encoding.encode(&text),
            ..Default::default()
        };
        // The originating representation is already known, seed its cache slot.
        let _ = inner.strings[encoding.index()].set(Ok(text));
        Self(Arc::new(inner))
    }

    /// Content from Unicode code points, encoded as UTF-8.
    pub fn from_code_points(code_points: &[u32]) -> Result<Self, TextEncodingError> {
        let text = code_points
            .iter()
            .enumerate()
            .map(|(index, &code_point)| {
                char::from_u32(code_point).ok_or_else(|| {
                    TextEncodingError::new(format!(
                        "Invalid code point U+{:X} at index {}",
                        code_point, index
                    ))
                })
            })
            .collect::<Result<String, _>>()?;
        let content = Self::from_string(text);
        let _ = content.0.code_points.set(Ok(code_points.to_vec()));
        Ok(content)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    pub fn len(&self) -> usize {
        self.0.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.bytes.is_empty()
    }

    /// Text view under UTF-8.
    pub fn string(&self) -> Result<&str, TextEncodingError> {
        self.string_with(TextEncoding::Utf8)
    }

    /// Text view under the given encoding, computed once per encoding.
    pub fn string_with(&self, encoding: TextEncoding) -> Result<&str, TextEncodingError> {
        self.0.strings[encoding.index()]
            .get_or_init(|| encoding.decode(&self.0.bytes))
            .as_ref()
            .map(String::as_str)
            .map_err(Clone::clone)
    }

    /// Lenient text view, substituting U+FFFD for malformed sequences.
    pub fn string_lossy(&self, encoding: TextEncoding) -> String {
        match self.string_with(encoding) {
            Ok(text) => text.to_owned(),
            Err(_) => encoding.decode_lossy(&self.0.bytes),
        }
    }

    /// Unicode code points of the UTF-8 text view.
    pub fn code_points(&self) -> Result<&[u32], TextEncodingError> {
        self.0
            .code_points
            .get_or_init(|| {
                self.string()
                    .map(|text| text.chars().map(u32::from).collect())
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// Whether both values share the same storage.
    pub fn ptr_eq(&self, other: &Content) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.bytes == other.0.bytes
    }
}

impl Eq for Content {}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("len", &self.0.bytes.len())
            .field("bytes", &self.0.bytes)
            .finish()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::from_string(text)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_origin_representation() {
        let from_text = Content::from_string("hi");
        let from_bytes = Content::from_bytes(vec![0x68, 0x69]);
        let from_code_points = Content::from_code_points(&[0x68, 0x69]).unwrap();

        assert_eq!(from_text, from_bytes);
        assert_eq!(from_bytes, from_code_points);
        assert_ne!(from_text, Content::from_string("ho"));
    }

    #[test]
    fn test_representations_are_cached() {
        let content = Content::from_bytes("héllo".as_bytes().to_vec());
        let first = content.string().unwrap().as_ptr();
        let second = content.string().unwrap().as_ptr();
        assert_eq!(first, second);
        assert_eq!(content.code_points().unwrap(), &[0x68, 0xe9, 0x6c, 0x6c, 0x6f]);
    }

    #[test]
    fn test_malformed_text_is_an_error_unless_lenient() {
        let content = Content::from_bytes(vec![0x61, 0xc3]);
        assert!(content.string().is_err());
        assert!(content.code_points().is_err());
        assert_eq!(content.string_lossy(TextEncoding::Utf8), "a\u{fffd}");
    }

    #[test]
    fn test_from_string_with_other_encoding() {
        let content = Content::from_string_with("A", TextEncoding::Utf16Be);
        assert_eq!(content.bytes(), &[0x00, 0x41]);
        assert_eq!(content.string_with(TextEncoding::Utf16Be).unwrap(), "A");
        // Same bytes read as UTF-8 give a NUL followed by 'A'
        assert_eq!(content.string().unwrap(), "\u{0}A");
    }

    #[test]
    fn test_invalid_code_point_is_rejected() {
        let err = Content::from_code_points(&[0x41, 0xd800]).unwrap_err();
        assert!(err.message.contains("U+D800"));
        assert!(err.message.contains("index 1"));
    }

    #[test]
    fn test_clones_share_storage() {
        let content = Content::from_string("shared");
        let clone = content.clone();
        assert!(content.ptr_eq(&clone));
        assert!(!content.ptr_eq(&Content::from_string("shared")));
    }
}
