// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "a1z26",
    title: "A1Z26",
    category: "Ciphers",
    kind: BrickKind::Encoder,
};

/// Replaces each latin letter by its position in the alphabet.
///
/// Characters other than latin letters are dropped when encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct A1Z26Encoder;

impl A1Z26Encoder {
    fn encode(text: &str, separator: &str) -> String {
        text.chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| (c.to_ascii_lowercase() as u8 - b'a' + 1).to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn decode(text: &str, separator: &str) -> Result<String, TransformError> {
        text.split(separator)
            .flat_map(str::split_whitespace)
            .map(|token| match token.parse::<u8>() {
                Ok(n @ 1..=26) => Ok(char::from(b'a' + n - 1)),
                _ => Err(TransformError::rejected(format!(
                    "'{}' is not a number between 1 and 26",
                    token
                ))),
            })
            .collect()
    }
}

#[async_trait]
impl Encoder for A1Z26Encoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::text("separator", " ").text_length(Some(1), None)]
    }

    async fn transform(
        &self,
        content: &Content,
        direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError> {
        let separator = settings.text("separator").unwrap_or(" ");
        let text = content.string()?;
        let result = match direction {
            Direction::Encode => Self::encode(text, separator),
            Direction::Decode => Self::decode(text, separator)?,
        };
        Ok(Content::from_string(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pangram() {
        let settings = Settings::new(A1Z26Encoder.fields()).unwrap();
        let content = Content::from_string("thequickbrownfoxjumpsoverthelazydog");
        let expected = "20 8 5 17 21 9 3 11 2 18 15 23 14 6 15 24 10 21 13 16 19 \
                        15 22 5 18 20 8 5 12 1 26 25 4 15 7";

        let encoded = A1Z26Encoder
            .transform(&content, Direction::Encode, &settings)
            .await
            .unwrap();
        assert_eq!(encoded.string().unwrap(), expected);

        let decoded = A1Z26Encoder
            .transform(&encoded, Direction::Decode, &settings)
            .await
            .unwrap();
        assert_eq!(decoded, content);
    }

    #[tokio::test]
    async fn test_decode_rejects_out_of_range_numbers() {
        let settings = Settings::new(A1Z26Encoder.fields()).unwrap();
        let err = A1Z26Encoder
            .transform(&Content::from_string("1 27"), Direction::Decode, &settings)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "'27' is not a number between 1 and 26");
    }
}
