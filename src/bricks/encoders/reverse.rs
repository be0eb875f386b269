// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::Settings;
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "reverse",
    title: "Reverse",
    category: "Transform",
    kind: BrickKind::Encoder,
};

/// Reverses the order of code points.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReverseEncoder;

#[async_trait]
impl Encoder for ReverseEncoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    async fn transform(
        &self,
        content: &Content,
        _direction: Direction,
        _settings: &Settings,
    ) -> Result<Content, TransformError> {
        let mut code_points = content.code_points()?.to_vec();
        code_points.reverse();
        Ok(Content::from_code_points(&code_points)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reverse_keeps_multibyte_characters_intact() {
        let output = ReverseEncoder
            .transform(&Content::from_string("añ🦀"), Direction::Encode, &Settings::default())
            .await
            .unwrap();
        assert_eq!(output.string().unwrap(), "🦀ña");
    }

    #[tokio::test]
    async fn test_reverse_rejects_malformed_text() {
        let result = ReverseEncoder
            .transform(&Content::from_bytes(vec![0xc3]), Direction::Decode, &Settings::default())
            .await;
        assert!(matches!(result, Err(TransformError::TextEncoding(_))));
    }
}
