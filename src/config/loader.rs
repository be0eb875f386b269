// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;
use crate::observability::messages::{config::PipeConfigLoaded, StructuredLog};
use crate::settings::FieldValue;

/// Serialized form of a pipe.
///
/// # Example
/// ```yaml
/// items:
///   - brickIdentifier: text
///     content: hello
///   - brickIdentifier: caesar-cipher
///     settingsValues:
///       shift: 3
///   - brickIdentifier: base64
///     reversed: true
///   - brickIdentifier: text
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeConfig {
    pub items: Vec<BrickConfig>,
}

/// One brick of a serialized pipe.
///
/// # Fields
/// * `brick_identifier` - Registry identifier of the brick type
/// * `settings_values` - Field values to apply over the brick's defaults
/// * `reversed` - Swap encode and decode (encoders only)
/// * `content` - Text to replay into this viewer after the pipe is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickConfig {
    pub brick_identifier: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings_values: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reversed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BrickConfig {
    pub fn new(brick_identifier: impl Into<String>) -> Self {
        Self {
            brick_identifier: brick_identifier.into(),
            settings_values: BTreeMap::new(),
            reversed: false,
            content: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }
}

impl PipeConfig {
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigurationError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|err| ConfigurationError::Parse(err.to_string())),
            ConfigFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|err| ConfigurationError::Parse(err.to_string())),
        }
    }

    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigurationError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|err| ConfigurationError::Parse(err.to_string())),
            ConfigFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|err| ConfigurationError::Parse(err.to_string())),
        }
    }
}

pub fn load_pipe_config<P: AsRef<Path>>(path: P) -> Result<PipeConfig, ConfigurationError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|err| ConfigurationError::Load {
        path: display.clone(),
        reason: err.to_string(),
    })?;

    let format = ConfigFormat::from_path(path);
    let config = PipeConfig::parse(&text, format)?;
    PipeConfigLoaded {
        path: &display,
        format: format.name(),
        items: config.items.len(),
    }
    .log();
    Ok(config)
}

pub fn save_pipe_config<P: AsRef<Path>>(
    path: P,
    config: &PipeConfig,
) -> Result<(), ConfigurationError> {
    let path = path.as_ref();
    let text = config.render(ConfigFormat::from_path(path))?;
    fs::write(path, text).map_err(|err| ConfigurationError::Save {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
items:
  - brickIdentifier: text
    content: hello
  - brickIdentifier: caesar-cipher
    settingsValues:
      shift: 3
      alphabet: abc
  - brickIdentifier: base64
    reversed: true
"#;

        let cfg = PipeConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(cfg.items.len(), 3);
        assert_eq!(cfg.items[0].content.as_deref(), Some("hello"));
        assert_eq!(
            cfg.items[1].settings_values.get("shift"),
            Some(&FieldValue::Number(3))
        );
        assert_eq!(
            cfg.items[1].settings_values.get("alphabet"),
            Some(&FieldValue::Text("abc".into()))
        );
        assert!(cfg.items[2].reversed);
        assert!(!cfg.items[1].reversed);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut item = BrickConfig::new("bytes");
        item.settings_values
            .insert("groupBits".to_string(), FieldValue::Null);
        let cfg = PipeConfig {
            items: vec![item, BrickConfig::new("text")],
        };

        let json: serde_json::Value =
            serde_json::from_str(&cfg.render(ConfigFormat::Json).unwrap()).unwrap();
        assert_eq!(json["items"][0]["brickIdentifier"], "bytes");
        assert!(json["items"][0]["settingsValues"]["groupBits"].is_null());
        assert!(json["items"][1].get("settingsValues").is_none());
        assert!(json["items"][1].get("reversed").is_none());
    }

    #[test]
    fn test_format_from_extension() {
        let test_cases = vec![
            ("pipe.json", ConfigFormat::Json),
            ("PIPE.JSON", ConfigFormat::Json),
            ("pipe.yaml", ConfigFormat::Yaml),
            ("pipe.yml", ConfigFormat::Yaml),
            ("pipe", ConfigFormat::Yaml),
        ];

        for (path, expected) in test_cases {
            assert_eq!(ConfigFormat::from_path(Path::new(path)), expected, "{}", path);
        }
    }

    #[test]
    fn test_malformed_documents_are_parse_errors() {
        assert!(matches!(
            PipeConfig::parse("{\"items\": [{}]}", ConfigFormat::Json),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            PipeConfig::parse("items: 7", ConfigFormat::Yaml),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_pipe_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigurationError::Load { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn test_failed_write_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("pipe.yaml");
        let cfg = PipeConfig {
            items: vec![BrickConfig::new("text")],
        };

        let err = save_pipe_config(&path, &cfg).unwrap_err();
        assert!(matches!(err, ConfigurationError::Save { .. }));
        assert!(err.to_string().starts_with("Failed to save pipe to"));
    }

    #[test]
    fn test_save_and_load_through_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let mut item = BrickConfig::new("caesar-cipher");
        item.settings_values
            .insert("shift".to_string(), FieldValue::Number(-4));
        let cfg = PipeConfig { items: vec![item] };

        for name in ["pipe.json", "pipe.yaml"] {
            let path = dir.path().join(name);
            save_pipe_config(&path, &cfg).unwrap();
            assert_eq!(load_pipe_config(&path).unwrap(), cfg);
        }
    }
}
