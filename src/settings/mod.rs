// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed, validated brick parameters.

mod field;

pub use field::{Field, FieldDescriptor, FieldKind, FieldValue, Randomizer, Validator};

use std::collections::{BTreeMap, HashSet};

use rand::RngCore;

use crate::errors::InvalidInputError;

/// Ordered collection of uniquely named fields owned by one brick.
///
/// Every accepted change bumps [`revision`](Settings::revision), which bricks
/// use to invalidate cached transform output.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    fields: Vec<Field>,
    revision: u64,
}

impl Settings {
    pub fn new(fields: Vec<Field>) -> Result<Self, InvalidInputError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name().to_string()) {
                return Err(InvalidInputError::new(field.name(), "duplicate field name"));
            }
            field.validate(field.value())?;
        }
        Ok(Self { fields, revision: 0 })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(Field::value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(FieldValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(FieldValue::as_number)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(FieldValue::as_bool)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Assigns a single value. Returns whether anything changed.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<bool, InvalidInputError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name() == name)
            .ok_or_else(|| InvalidInputError::new(name, "no such field"))?;

        let changed = field.set_value(value)?;
        if changed {
            self.revision += 1;
        }
        Ok(changed)
    }

    /// Assigns several values at once; nothing is applied unless all are valid.
    pub fn apply(
        &mut self,
        values: &BTreeMap<String, FieldValue>,
    ) -> Result<bool, InvalidInputError> {
        for (name, value) in values {
            let field = self
                .field(name)
                .ok_or_else(|| InvalidInputError::new(name, "no such field"))?;
            field.validate(value)?;
        }

        let mut changed = false;
        for (name, value) in values {
            changed |= self.set_value(name, value.clone())?;
        }
        Ok(changed)
    }

    /// Randomizes every randomizable field. Returns whether anything changed.
    pub fn randomize(&mut self, rng: &mut dyn RngCore) -> bool {
        let mut changed = false;
        for field in &mut self.fields {
            if let Some(value) = field.random_value(rng) {
                changed |= field.set_value(value).unwrap_or(false);
            }
        }
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Snapshot of all current values keyed by field name.
    pub fn values(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|field| (field.name().to_string(), field.value().clone()))
            .collect()
    }

    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(Field::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_settings() -> Settings {
        Settings::new(vec![
            Field::number("shift", 7, Some(-25), Some(25)),
            Field::text("alphabet", "abcdefghijklmnopqrstuvwxyz"),
            Field::boolean("strict", true).randomizable(false),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_field_names_are_rejected() {
        let result = Settings::new(vec![Field::boolean("a", true), Field::boolean("a", false)]);
        assert_eq!(result.unwrap_err().reason, "duplicate field name");
    }

    #[test]
    fn test_revision_bumps_only_on_change() {
        let mut settings = sample_settings();
        assert_eq!(settings.revision(), 0);

        assert!(!settings.set_value("shift", FieldValue::Number(7)).unwrap());
        assert_eq!(settings.revision(), 0);

        assert!(settings.set_value("shift", FieldValue::Number(3)).unwrap());
        assert_eq!(settings.revision(), 1);
        assert_eq!(settings.number("shift"), Some(3));
    }

    #[test]
    fn test_rejected_assignment_keeps_state() {
        let mut settings = sample_settings();
        assert!(settings.set_value("shift", FieldValue::Number(99)).is_err());
        assert!(settings.set_value("missing", FieldValue::Null).is_err());
        assert_eq!(settings.number("shift"), Some(7));
        assert_eq!(settings.revision(), 0);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut settings = sample_settings();
        let values = BTreeMap::from([
            ("shift".to_string(), FieldValue::Number(1)),
            ("strict".to_string(), FieldValue::Text("yes".into())),
        ]);

        assert!(settings.apply(&values).is_err());
        assert_eq!(settings.number("shift"), Some(7));

        let values = BTreeMap::from([
            ("shift".to_string(), FieldValue::Number(1)),
            ("strict".to_string(), FieldValue::Boolean(false)),
        ]);
        assert!(settings.apply(&values).unwrap());
        assert_eq!(settings.boolean("strict"), Some(false));
    }

    #[test]
    fn test_randomize_touches_only_randomizable_fields() {
        let mut settings = sample_settings();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            settings.randomize(&mut rng);
        }
        assert_eq!(settings.text("alphabet"), Some("abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(settings.boolean("strict"), Some(true));
        let shift = settings.number("shift").unwrap();
        assert!((-25..=25).contains(&shift));
    }
}
