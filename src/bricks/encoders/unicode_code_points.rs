// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "unicode-code-points",
    title: "Unicode code points",
    category: "Encoding",
    kind: BrickKind::Encoder,
};

/// Writes text as whitespace separated code point numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeCodePointsEncoder;

#[async_trait]
impl Encoder for UnicodeCodePointsEncoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::enumeration(
            "format",
            "hexadecimal",
            [("decimal", "Decimal"), ("hexadecimal", "Hexadecimal")],
        )
        .randomizable(false)]
    }

    async fn transform(
        &self,
        content: &Content,
        direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError> {
        let radix = match settings.text("format") {
            Some("decimal") => 10,
            _ => 16,
        };

        match direction {
            Direction::Encode => {
                let text = content
                    .code_points()?
                    .iter()
                    .map(|&code_point| match radix {
                        10 => code_point.to_string(),
                        _ => format!("{:x}", code_point),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(Content::from_string(text))
            }
            Direction::Decode => {
                let code_points = content
                    .string()?
                    .split_whitespace()
                    .map(|token| {
                        u32::from_str_radix(token, radix).map_err(|_| {
                            TransformError::rejected(format!("Invalid code point '{}'", token))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Content::from_code_points(&code_points)?)
            }
        }
    }
}
