// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};

/// A pure, bidirectional transform between two content values.
///
/// Implementations hold no per-instance state: the settings live on the
/// owning [`Brick`](crate::brick::Brick) and are passed in on every call. For
/// inputs an encoder declares reversible,
/// `transform(transform(x, Encode), Decode) == x`.
#[async_trait]
pub trait Encoder: Send + Sync {
    fn meta(&self) -> &'static BrickMeta;

    /// Initial settings fields of a freshly created brick.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    async fn transform(
        &self,
        content: &Content,
        direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError>;

    /// Whether decoding restores the encoded input.
    fn is_reversible(&self) -> bool {
        true
    }
}
