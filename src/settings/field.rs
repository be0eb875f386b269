// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::errors::InvalidInputError;

/// A settings value as stored, serialized and exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(value) => write!(f, "{}", value),
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Text(value) => write!(f, "'{}'", value),
            FieldValue::Bytes(value) => write!(f, "{} bytes", value.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Kind of a field along with the constraints of its validity predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Enum {
        elements: Vec<FieldValue>,
        labels: Vec<String>,
    },
    Boolean,
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        /// Characters admissible in the value, any when `None`
        whitelist: Option<String>,
    },
    Number {
        min: Option<i64>,
        max: Option<i64>,
    },
    Bytes {
        min_size: Option<usize>,
        max_size: Option<usize>,
    },
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Enum { .. } => "enum",
            FieldKind::Boolean => "boolean",
            FieldKind::Text { .. } => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::Bytes { .. } => "bytes",
        }
    }

    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match (self, value) {
            (FieldKind::Enum { elements, .. }, value) => {
                if elements.contains(value) {
                    Ok(())
                } else {
                    Err(format!("{} is not one of the admissible values", value))
                }
            }
            (FieldKind::Boolean, FieldValue::Boolean(_)) => Ok(()),
            (
                FieldKind::Text {
                    min_length,
                    max_length,
                    whitelist,
                },
                FieldValue::Text(text),
            ) => {
                let length = text.chars().count();
                if let Some(min) = min_length.filter(|min| length < *min) {
                    return Err(format!("must be at least {} characters long", min));
                }
                if let Some(max) = max_length.filter(|max| length > *max) {
                    return Err(format!("must be at most {} characters long", max));
                }
                if let Some(whitelist) = whitelist {
                    if let Some(c) = text.chars().find(|c| !whitelist.contains(*c)) {
                        return Err(format!("character '{}' is not allowed", c));
                    }
                }
                Ok(())
            }
            (FieldKind::Number { min, max }, FieldValue::Number(number)) => {
                if let Some(min) = min.filter(|min| number < min) {
                    return Err(format!("must be greater than or equal to {}", min));
                }
                if let Some(max) = max.filter(|max| number > max) {
                    return Err(format!("must be less than or equal to {}", max));
                }
                Ok(())
            }
            (FieldKind::Bytes { min_size, max_size }, FieldValue::Bytes(bytes)) => {
                if let Some(min) = min_size.filter(|min| bytes.len() < *min) {
                    return Err(format!("must be at least {} bytes long", min));
                }
                if let Some(max) = max_size.filter(|max| bytes.len() > *max) {
                    return Err(format!("must be at most {} bytes long", max));
                }
                Ok(())
            }
            (kind, value) => Err(format!("{} is not a {} value", value, kind.type_name())),
        }
    }

    fn random_value(&self, rng: &mut dyn RngCore) -> Option<FieldValue> {
        match self {
            FieldKind::Enum { elements, .. } if !elements.is_empty() => {
                Some(elements[rng.gen_range(0..elements.len())].clone())
            }
            FieldKind::Boolean => Some(FieldValue::Boolean(rng.gen())),
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
            } if min <= max => Some(FieldValue::Number(rng.gen_range(*min..=*max))),
            FieldKind::Bytes { min_size, max_size } => {
                let min = min_size.unwrap_or(0);
                let max = max_size.unwrap_or(min.max(16)).max(min);
                let mut bytes = vec![0u8; rng.gen_range(min..=max)];
                rng.fill_bytes(&mut bytes);
                Some(FieldValue::Bytes(bytes))
            }
            _ => None,
        }
    }
}

pub type Validator = Arc<dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync>;
pub type Randomizer = Arc<dyn Fn(&mut dyn RngCore) -> FieldValue + Send + Sync>;

/// A typed, validated, optionally randomizable brick parameter.
///
/// The current value always satisfies the field's validity predicate: invalid
/// assignments are rejected and leave the prior value in place.
#[derive(Clone)]
pub struct Field {
    name: String,
    label: Option<String>,
    kind: FieldKind,
    value: FieldValue,
    width: u8,
    randomizable: bool,
    validator: Option<Validator>,
    randomizer: Option<Randomizer>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            value,
            width: 12,
            randomizable: true,
            validator: None,
            randomizer: None,
        }
    }

    /// Enum field over `(element, label)` pairs.
    pub fn enumeration<V: Into<FieldValue>>(
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        options: impl IntoIterator<Item = (V, &'static str)>,
    ) -> Self {
        let (elements, labels): (Vec<FieldValue>, Vec<String>) = options
            .into_iter()
            .map(|(element, label)| (element.into(), label.to_string()))
            .unzip();
        Self::new(name, FieldKind::Enum { elements, labels }, value.into())
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, FieldKind::Boolean, FieldValue::Boolean(value))
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let kind = FieldKind::Text {
            min_length: None,
            max_length: None,
            whitelist: None,
        };
        Self::new(name, kind, FieldValue::Text(value.into())).randomizable(false)
    }

    pub fn number(name: impl Into<String>, value: i64, min: Option<i64>, max: Option<i64>) -> Self {
        Self::new(name, FieldKind::Number { min, max }, FieldValue::Number(value))
    }

    pub fn bytes(name: impl Into<String>, value: Vec<u8>) -> Self {
        let kind = FieldKind::Bytes {
            min_size: None,
            max_size: None,
        };
        Self::new(name, kind, FieldValue::Bytes(value))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    pub fn randomizable(mut self, randomizable: bool) -> Self {
        self.randomizable = randomizable;
        self
    }

    pub fn text_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        if let FieldKind::Text {
            min_length,
            max_length,
            ..
        } = &mut self.kind
        {
            *min_length = min;
            *max_length = max;
        }
        self
    }

    pub fn whitelist(mut self, characters: impl Into<String>) -> Self {
        if let FieldKind::Text { whitelist, .. } = &mut self.kind {
            *whitelist = Some(characters.into());
        }
        self
    }

    /// Extra predicate checked after the kind's own constraints.
    pub fn validator(
        mut self,
        validator: impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Custom randomization rule, replacing the kind's default one.
    pub fn randomizer(
        mut self,
        randomizer: impl Fn(&mut dyn RngCore) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.randomizer = Some(Arc::new(randomizer));
        self.randomizable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_randomizable(&self) -> bool {
        self.randomizable
    }

    pub fn validate(&self, value: &FieldValue) -> Result<(), InvalidInputError> {
        self.kind
            .validate(value)
            .and_then(|_| match &self.validator {
                Some(validator) => validator(value),
                None => Ok(()),
            })
            .map_err(|reason| InvalidInputError::new(&self.name, reason))
    }

    /// Assigns `value` if valid. Returns whether the value actually changed.
    pub fn set_value(&mut self, value: FieldValue) -> Result<bool, InvalidInputError> {
        self.validate(&value)?;
        if self.value == value {
            return Ok(false);
        }
        self.value = value;
        Ok(true)
    }

    /// Draws a random admissible value, `None` when the field has no rule.
    pub fn random_value(&self, rng: &mut dyn RngCore) -> Option<FieldValue> {
        if !self.randomizable {
            return None;
        }
        let candidate = match &self.randomizer {
            Some(randomizer) => Some(randomizer(rng)),
            None => self.kind.random_value(rng),
        };
        candidate.filter(|value| self.validate(value).is_ok())
    }

    /// Field descriptor in the external settings schema.
    pub fn describe(&self) -> FieldDescriptor {
        let (elements, labels) = match &self.kind {
            FieldKind::Enum { elements, labels } => (Some(elements.clone()), Some(labels.clone())),
            _ => (None, None),
        };
        FieldDescriptor {
            name: self.name.clone(),
            label: self.label.clone(),
            field_type: self.kind.type_name(),
            value: self.value.clone(),
            elements,
            labels,
            width: Some(self.width),
            randomizable: self.randomizable,
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("randomizable", &self.randomizable)
            .finish()
    }
}

/// Serializable field schema handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<FieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,
    pub randomizable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_enum_rejects_value_outside_elements() {
        let mut field = Field::enumeration(
            "format",
            "hexadecimal",
            [("hexadecimal", "Hexadecimal"), ("binary", "Binary")],
        );

        let err = field.set_value("octal".into()).unwrap_err();
        assert_eq!(err.field, "format");
        assert_eq!(field.value(), &FieldValue::from("hexadecimal"));

        assert!(field.set_value("binary".into()).unwrap());
        assert!(!field.set_value("binary".into()).unwrap());
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut field = Field::number("shift", 7, Some(-25), Some(25));
        assert!(field.set_value(FieldValue::Text("7".into())).is_err());
        assert!(field.set_value(FieldValue::Number(26)).is_err());
        assert!(field.set_value(FieldValue::Number(-25)).is_ok());
        assert_eq!(field.value().as_number(), Some(-25));
    }

    #[test]
    fn test_text_constraints() {
        let mut field = Field::text("alphabet", "abc")
            .text_length(Some(2), Some(4))
            .whitelist("abcdef");

        assert!(field.set_value("a".into()).is_err());
        assert!(field.set_value("abcde".into()).is_err());
        let err = field.set_value("abz".into()).unwrap_err();
        assert!(err.reason.contains("'z'"));
        assert!(field.set_value("fed".into()).is_ok());
    }

    #[test]
    fn test_custom_validator_runs_after_kind_check() {
        let mut field = Field::number("even", 2, None, None).validator(|value| {
            match value.as_number() {
                Some(n) if n % 2 == 0 => Ok(()),
                _ => Err("must be even".to_string()),
            }
        });

        let err = field.set_value(FieldValue::Number(3)).unwrap_err();
        assert_eq!(err.reason, "must be even");
        assert_eq!(field.value().as_number(), Some(2));
    }

    #[test]
    fn test_random_values_are_admissible() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = Field::number("shift", 0, Some(-3), Some(3));
        for _ in 0..50 {
            let value = field.random_value(&mut rng).unwrap();
            assert!(field.validate(&value).is_ok());
        }

        let fixed = Field::text("label", "x");
        assert!(fixed.random_value(&mut rng).is_none());
    }

    #[test]
    fn test_describe_enum_field() {
        let field = Field::enumeration(
            "groupBits",
            FieldValue::Number(8),
            [(FieldValue::Null, "None"), (FieldValue::Number(8), "Byte")],
        )
        .label("Group by")
        .width(6)
        .randomizable(false);

        let json = serde_json::to_value(field.describe()).unwrap();
        assert_eq!(json["type"], "enum");
        assert_eq!(json["elements"], serde_json::json!([null, 8]));
        assert_eq!(json["labels"], serde_json::json!(["None", "Byte"]));
        assert_eq!(json["width"], 6);
        assert_eq!(json["randomizable"], false);
    }
}
