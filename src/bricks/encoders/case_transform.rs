// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "case-transform",
    title: "Case transform",
    category: "Transform",
    kind: BrickKind::Encoder,
};

/// Changes letter case. Lossy, so both directions apply the same mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseTransformEncoder;

#[async_trait]
impl Encoder for CaseTransformEncoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::enumeration(
            "case",
            "lower",
            [("lower", "Lower case"), ("upper", "Upper case"), ("invert", "Invert case")],
        )]
    }

    async fn transform(
        &self,
        content: &Content,
        _direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError> {
        let text = content.string()?;
        let result = match settings.text("case") {
            Some("lower") => text.to_lowercase(),
            Some("upper") => text.to_uppercase(),
            Some("invert") => text
                .chars()
                .flat_map(|c| -> Vec<char> {
                    if c.is_lowercase() {
                        c.to_uppercase().collect()
                    } else {
                        c.to_lowercase().collect()
                    }
                })
                .collect(),
            other => {
                return Err(TransformError::rejected(format!(
                    "Unknown case: {}",
                    other.unwrap_or("none")
                )))
            }
        };
        Ok(Content::from_string(result))
    }

    fn is_reversible(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FieldValue;

    #[tokio::test]
    async fn test_case_modes() {
        let test_cases = vec![
            ("lower", "Hello World", "hello world"),
            ("upper", "Hello World", "HELLO WORLD"),
            ("invert", "Hello World", "hELLO wORLD"),
        ];

        for (case, input, expected) in test_cases {
            let mut settings = Settings::new(CaseTransformEncoder.fields()).unwrap();
            settings.set_value("case", FieldValue::from(case)).unwrap();
            let output = CaseTransformEncoder
                .transform(&Content::from_string(input), Direction::Encode, &settings)
                .await
                .unwrap();
            assert_eq!(output.string().unwrap(), expected, "case '{}'", case);
        }
        assert!(!CaseTransformEncoder.is_reversible());
    }
}
