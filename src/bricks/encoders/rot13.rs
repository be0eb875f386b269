// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::caesar_cipher::{shift_text, LATIN_ALPHABET};
use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::Settings;
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "rot13",
    title: "ROT13",
    category: "Ciphers",
    kind: BrickKind::Encoder,
};

/// ROT13, its own inverse.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rot13Encoder;

#[async_trait]
impl Encoder for Rot13Encoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    async fn transform(
        &self,
        content: &Content,
        _direction: Direction,
        _settings: &Settings,
    ) -> Result<Content, TransformError> {
        Ok(Content::from_string(shift_text(content.string()?, LATIN_ALPHABET, 13)))
    }
}
