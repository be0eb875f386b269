// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta};
use crate::content::{Content, TextEncoding};
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Viewer;

const META: BrickMeta = BrickMeta {
    name: "text",
    title: "Text",
    category: "View",
    kind: BrickKind::Viewer,
};

/// Shows content as text under a selectable encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextViewer;

impl TextViewer {
    fn encoding(settings: &Settings) -> Result<TextEncoding, TransformError> {
        let name = settings.text("encoding").unwrap_or("utf8");
        TextEncoding::from_name(name)
            .ok_or_else(|| TransformError::rejected(format!("Unknown text encoding '{}'", name)))
    }
}

#[async_trait]
impl Viewer for TextViewer {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::enumeration(
            "encoding",
            TextEncoding::Utf8.name(),
            TextEncoding::ALL.map(|encoding| (encoding.name(), encoding.label())),
        )
        .randomizable(false)]
    }

    async fn render(
        &self,
        content: &Content,
        settings: &Settings,
    ) -> Result<String, TransformError> {
        let encoding = Self::encoding(settings)?;
        Ok(content.string_with(encoding)?.to_string())
    }

    fn parse(&self, text: &str, settings: &Settings) -> Result<Content, TransformError> {
        Ok(Content::from_string_with(text, Self::encoding(settings)?))
    }
}
