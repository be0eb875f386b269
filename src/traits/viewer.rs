// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::BrickMeta;
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};

/// Terminal bridge between content and an editable text representation.
///
/// Rendering must be idempotent: the same content and settings always produce
/// the same visible text.
#[async_trait]
pub trait Viewer: Send + Sync {
    fn meta(&self) -> &'static BrickMeta;

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    /// Builds the visible representation of `content`.
    async fn render(
        &self,
        content: &Content,
        settings: &Settings,
    ) -> Result<String, TransformError>;

    /// Turns edited visible text back into content.
    fn parse(&self, text: &str, settings: &Settings) -> Result<Content, TransformError>;
}
