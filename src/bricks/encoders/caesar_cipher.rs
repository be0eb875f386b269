// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "caesar-cipher",
    title: "Caesar cipher",
    category: "Ciphers",
    kind: BrickKind::Encoder,
};

pub(crate) const LATIN_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Shifts every alphabet character by `shift` positions.
///
/// Matching is case-insensitive and the case of each character is kept.
/// Characters outside the alphabet pass through unchanged.
pub(crate) fn shift_text(text: &str, alphabet: &str, shift: i64) -> String {
    let letters: Vec<char> = alphabet.chars().collect();
    let size = letters.len() as i64;
    if size == 0 {
        return text.to_string();
    }

    text.chars()
        .map(|c| {
            let lower = c.to_lowercase().next().unwrap_or(c);
            match letters.iter().position(|&l| l == c || l == lower) {
                Some(index) => {
                    let shifted = letters[(index as i64 + shift).rem_euclid(size) as usize];
                    if c != lower {
                        shifted.to_uppercase().next().unwrap_or(shifted)
                    } else {
                        shifted
                    }
                }
                None => c,
            }
        })
        .collect()
}

/// Shift cipher over a configurable alphabet.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaesarCipherEncoder;

#[async_trait]
impl Encoder for CaesarCipherEncoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::number("shift", 7, Some(-25), Some(25)).width(6),
            Field::text("alphabet", LATIN_ALPHABET)
                .text_length(Some(2), None)
                .width(6)
                .validator(|value| {
                    let text = value.as_text().unwrap_or_default();
                    let mut seen = HashSet::new();
                    match text.chars().find(|c| !seen.insert(*c)) {
                        Some(c) => Err(format!("character '{}' appears more than once", c)),
                        None => Ok(()),
                    }
                }),
        ]
    }

    async fn transform(
        &self,
        content: &Content,
        direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError> {
        let shift = settings.number("shift").unwrap_or(0);
        let alphabet = settings.text("alphabet").unwrap_or(LATIN_ALPHABET);
        let shift = match direction {
            Direction::Encode => shift,
            Direction::Decode => -shift,
        };
        Ok(Content::from_string(shift_text(content.string()?, alphabet, shift)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FieldValue;

    #[test]
    fn test_shift_text() {
        let test_cases = vec![
            ("abc xyz", 3, "def abc"),
            ("Hello, World!", 7, "Olssv, Dvysk!"),
            ("def", -3, "abc"),
            ("abc", 29, "def"),
        ];

        for (input, shift, expected) in test_cases {
            assert_eq!(shift_text(input, LATIN_ALPHABET, shift), expected, "shift {}", shift);
        }
    }

    #[tokio::test]
    async fn test_decode_inverts_encode() {
        let settings = Settings::new(CaesarCipherEncoder.fields()).unwrap();
        let input = Content::from_string("The quick brown fox");

        let encoded = CaesarCipherEncoder
            .transform(&input, Direction::Encode, &settings)
            .await
            .unwrap();
        assert_eq!(encoded.string().unwrap(), "Aol xbpjr iyvdu mve");

        let decoded = CaesarCipherEncoder
            .transform(&encoded, Direction::Decode, &settings)
            .await
            .unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_alphabet_with_repeated_characters_is_rejected() {
        let mut settings = Settings::new(CaesarCipherEncoder.fields()).unwrap();
        let err = settings
            .set_value("alphabet", FieldValue::from("abca"))
            .unwrap_err();
        assert!(err.reason.contains("'a'"));
        assert_eq!(settings.text("alphabet"), Some(LATIN_ALPHABET));
    }
}
