// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::brick::{BrickKind, BrickMeta, Direction};
use crate::codec::{base64_string_from_bytes, bytes_from_base64_string, Base64Variant};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::{Field, Settings};
use crate::traits::Encoder;

const META: BrickMeta = BrickMeta {
    name: "base64",
    title: "Base64",
    category: "Encoding",
    kind: BrickKind::Encoder,
};

/// Base64 encoder over the built-in codec variants.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64Encoder;

#[async_trait]
impl Encoder for Base64Encoder {
    fn meta(&self) -> &'static BrickMeta {
        &META
    }

    fn fields(&self) -> Vec<Field> {
        let variants = Base64Variant::all();
        vec![Field::enumeration(
            "variant",
            "base64",
            variants.iter().map(|variant| (variant.name, variant.label)),
        )
        .randomizable(false)]
    }

    async fn transform(
        &self,
        content: &Content,
        direction: Direction,
        settings: &Settings,
    ) -> Result<Content, TransformError> {
        let name = settings.text("variant").unwrap_or("base64");
        let variant = Base64Variant::by_name(name)
            .ok_or_else(|| TransformError::rejected(format!("Unknown base64 variant '{}'", name)))?;

        match direction {
            Direction::Encode => {
                let text = base64_string_from_bytes(content.bytes(), &variant)?;
                Ok(Content::from_string(text))
            }
            Direction::Decode => {
                let bytes = bytes_from_base64_string(content.string()?, &variant)?;
                Ok(Content::from_bytes(bytes))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FieldValue;

    #[tokio::test]
    async fn test_encode_and_decode() {
        let settings = Settings::new(Base64Encoder.fields()).unwrap();
        let encoded = Base64Encoder
            .transform(&Content::from_bytes(vec![1, 2, 3]), Direction::Encode, &settings)
            .await
            .unwrap();
        assert_eq!(encoded.string().unwrap(), "AQID");

        let decoded = Base64Encoder
            .transform(&encoded, Direction::Decode, &settings)
            .await
            .unwrap();
        assert_eq!(decoded.bytes(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_variant_setting_selects_alphabet() {
        let mut settings = Settings::new(Base64Encoder.fields()).unwrap();
        settings.set_value("variant", FieldValue::from("base64url")).unwrap();

        let encoded = Base64Encoder
            .transform(&Content::from_bytes(vec![0xfb, 0xff]), Direction::Encode, &settings)
            .await
            .unwrap();
        assert_eq!(encoded.string().unwrap(), "-_8");
    }

    #[tokio::test]
    async fn test_decode_failure_is_a_transform_error() {
        let settings = Settings::new(Base64Encoder.fields()).unwrap();
        let err = Base64Encoder
            .transform(&Content::from_string("A"), Direction::Decode, &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, TransformError::ByteEncoding(_)));
    }
}
