// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta};
use crate::codec::{
    binary_string_from_bytes, bytes_from_binary_string, bytes_from_hex_string, chunk,
    hex_string_from_bytes,
};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, FieldValue, Settings};
use crate::traits::Viewer;

const META: BrickMeta = BrickMeta {
    name: "bytes",
    title: "Bytes",
    category: "View",
    kind: BrickKind::Viewer,
};

/// Shows content as grouped hexadecimal or binary digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesViewer;

#[async_trait]
impl Viewer for BytesViewer {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::enumeration(
                "format",
                "hexadecimal",
                [("hexadecimal", "Hexadecimal"), ("binary", "Binary")],
            )
            .width(6)
            .randomizable(false),
            Field::enumeration(
                "groupBits",
                FieldValue::Number(8),
                [
                    (FieldValue::Null, "None"),
                    (FieldValue::Number(4), "Half-byte"),
                    (FieldValue::Number(8), "Byte"),
                    (FieldValue::Number(16), "2 Bytes"),
                    (FieldValue::Number(32), "4 Bytes"),
                ],
            )
            .label("Group by")
            .width(6)
            .randomizable(false),
        ]
    }

    async fn render(
        &self,
        content: &Content,
        settings: &Settings,
    ) -> Result<String, TransformError> {
        let bytes = content.bytes();
        let (string, char_bits) = match settings.text("format") {
            Some("binary") => (binary_string_from_bytes(bytes), 1),
            _ => (hex_string_from_bytes(bytes), 4),
        };

        match settings.number("groupBits") {
            Some(group_bits) => {
                let group_chars = (group_bits / char_bits).max(1) as usize;
                Ok(chunk(&string, group_chars).join(" "))
            }
            None => Ok(string),
        }
    }

    fn parse(&self, text: &str, settings: &Settings) -> Result<Content, TransformError> {
        let string: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = match settings.text("format") {
            Some("binary") => bytes_from_binary_string(&string)?,
            _ => bytes_from_hex_string(&string)?,
        };
        Ok(Content::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(format: &str, group_bits: FieldValue) -> Settings {
        let mut settings = Settings::new(BytesViewer.fields()).unwrap();
        settings.set_value("format", FieldValue::from(format)).unwrap();
        settings.set_value("groupBits", group_bits).unwrap();
        settings
    }

    #[tokio::test]
    async fn test_render_grouping() {
        let content = Content::from_bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        let test_cases = vec![
            ("hexadecimal", FieldValue::Null, "deadbeef"),
            ("hexadecimal", FieldValue::Number(4), "d e a d b e e f"),
            ("hexadecimal", FieldValue::Number(8), "de ad be ef"),
            ("hexadecimal", FieldValue::Number(16), "dead beef"),
            ("binary", FieldValue::Number(8), "11011110 10101101 10111110 11101111"),
        ];

        for (format, group_bits, expected) in test_cases {
            let settings = settings(format, group_bits);
            assert_eq!(BytesViewer.render(&content, &settings).await.unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_ignores_whitespace() {
        let settings = settings("hexadecimal", FieldValue::Number(8));
        let content = BytesViewer.parse("de ad\nbe\tef", &settings).unwrap();
        assert_eq!(content.bytes(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_parse_rejects_invalid_digits() {
        let settings = settings("hexadecimal", FieldValue::Number(8));
        let err = BytesViewer.parse("de ag", &settings).unwrap_err();
        assert_eq!(err.to_string(), "Invalid hex encoded byte 'ag'");
    }

    #[test]
    fn test_group_bits_outside_choices_is_rejected() {
        let mut settings = Settings::new(BytesViewer.fields()).unwrap();
        assert!(settings.set_value("groupBits", FieldValue::Number(12)).is_err());
        assert_eq!(settings.number("groupBits"), Some(8));
    }
}
