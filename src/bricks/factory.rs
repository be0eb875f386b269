// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Registry mapping brick identifiers to constructors and metadata.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::brick::{Brick, BrickMeta};
use crate::errors::{ConfigurationError, InvalidInputError};
use crate::observability::messages::{registry::*, StructuredLog};
use crate::traits::{Encoder, Viewer};

use super::encoders::*;
use super::viewers::*;

/// Creates a fresh brick with default settings.
pub type BrickConstructor = fn() -> Result<Brick, InvalidInputError>;

#[derive(Clone, Copy)]
struct Entry {
    meta: BrickMeta,
    constructor: BrickConstructor,
}

#[derive(Default)]
struct Entries {
    ordered: Vec<Entry>,
    index: HashMap<&'static str, usize>,
}

/// Process-wide registry of brick types.
///
/// Identifiers are unique and immutable once registered. The registry is
/// read-mostly after startup; registration takes a write lock, lookups a read
/// lock.
///
/// # Examples
///
/// ```
/// use the_brickyard::bricks::BrickFactory;
///
/// let factory = BrickFactory::with_builtin_bricks()?;
/// let brick = factory.create("base64")?;
/// assert_eq!(brick.meta().title, "Base64");
/// assert_eq!(factory.get_library()[0].name, "text");
/// # Ok::<(), the_brickyard::errors::ConfigurationError>(())
/// ```
#[derive(Default)]
pub struct BrickFactory {
    entries: RwLock<Entries>,
}

static INSTANCE: Mutex<Option<Arc<BrickFactory>>> = Mutex::new(None);

impl BrickFactory {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in brick, in library order.
    pub fn with_builtin_bricks() -> Result<Self, ConfigurationError> {
        let factory = Self::new();
        factory.register_viewer::<TextViewer>()?;
        factory.register_viewer::<BytesViewer>()?;
        factory.register_encoder::<Base64Encoder>()?;
        factory.register_encoder::<A1Z26Encoder>()?;
        factory.register_encoder::<CaesarCipherEncoder>()?;
        factory.register_encoder::<Rot13Encoder>()?;
        factory.register_encoder::<ReverseEncoder>()?;
        factory.register_encoder::<CaseTransformEncoder>()?;
        factory.register_encoder::<UnicodeCodePointsEncoder>()?;
        Ok(factory)
    }

    /// Shared registry, created with the built-in bricks on first access.
    pub fn instance() -> Result<Arc<BrickFactory>, ConfigurationError> {
        let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(factory) = slot.as_ref() {
            return Ok(Arc::clone(factory));
        }
        let factory = Arc::new(Self::with_builtin_bricks()?);
        *slot = Some(Arc::clone(&factory));
        Ok(factory)
    }

    /// Drops the shared registry so the next access rebuilds it.
    pub fn reset_instance() {
        INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Registers a constructor under `meta.name`.
    pub fn register(
        &self,
        meta: BrickMeta,
        constructor: BrickConstructor,
    ) -> Result<(), ConfigurationError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.index.contains_key(meta.name) {
            DuplicateBrickRejected {
                identifier: meta.name,
            }
            .log();
            return Err(ConfigurationError::DuplicateIdentifier {
                identifier: meta.name.to_string(),
            });
        }

        let position = entries.ordered.len();
        entries.ordered.push(Entry { meta, constructor });
        entries.index.insert(meta.name, position);

        BrickRegistered {
            identifier: meta.name,
            kind: meta.kind,
        }
        .log();
        Ok(())
    }

    pub fn register_encoder<E: Encoder + Default + 'static>(
        &self,
    ) -> Result<(), ConfigurationError> {
        let meta = *E::default().meta();
        self.register(meta, || Brick::from_encoder(E::default()))
    }

    pub fn register_viewer<V: Viewer + Default + 'static>(
        &self,
    ) -> Result<(), ConfigurationError> {
        let meta = *V::default().meta();
        self.register(meta, || Brick::from_viewer(V::default()))
    }

    fn entry(&self, identifier: &str) -> Result<Entry, ConfigurationError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .index
            .get(identifier)
            .map(|&position| entries.ordered[position])
            .ok_or_else(|| {
                UnknownBrickRequested { identifier }.log();
                ConfigurationError::UnknownIdentifier {
                    identifier: identifier.to_string(),
                }
            })
    }

    pub fn get_invokable(&self, identifier: &str) -> Result<BrickConstructor, ConfigurationError> {
        self.entry(identifier).map(|entry| entry.constructor)
    }

    /// Static descriptor of a brick type, without instantiating it.
    pub fn get_meta(&self, identifier: &str) -> Result<BrickMeta, ConfigurationError> {
        self.entry(identifier).map(|entry| entry.meta)
    }

    /// Descriptors of every registered brick, in registration order.
    pub fn get_library(&self) -> Vec<BrickMeta> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.ordered.iter().map(|entry| entry.meta).collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.index.contains_key(identifier)
    }

    /// Instantiates the brick registered under `identifier`.
    ///
    /// The brick carries the registered descriptor, so it is saved under the
    /// identifier it was created from.
    pub fn create(&self, identifier: &str) -> Result<Brick, ConfigurationError> {
        let entry = self.entry(identifier)?;
        let mut brick = (entry.constructor)().map_err(|source| {
            ConfigurationError::InvalidSetting {
                brick: identifier.to_string(),
                source,
            }
        })?;
        brick.set_meta(entry.meta);
        Ok(brick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brick::BrickKind;

    #[test]
    fn test_builtin_library_order() {
        let factory = BrickFactory::with_builtin_bricks().unwrap();
        let names: Vec<&str> = factory.get_library().iter().map(|meta| meta.name).collect();
        assert_eq!(
            names,
            vec![
                "text",
                "bytes",
                "base64",
                "a1z26",
                "caesar-cipher",
                "rot13",
                "reverse",
                "case-transform",
                "unicode-code-points",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_first_entry() {
        let factory = BrickFactory::new();
        factory.register_encoder::<ReverseEncoder>().unwrap();

        let duplicate = BrickMeta {
            title: "Another reverse",
            ..*ReverseEncoder.meta()
        };
        let err = factory
            .register(duplicate, || Brick::from_encoder(Rot13Encoder))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateIdentifier {
                identifier: "reverse".to_string()
            }
        );

        assert_eq!(factory.get_library().len(), 1);
        assert_eq!(factory.get_meta("reverse").unwrap().title, "Reverse");
        let brick = factory.create("reverse").unwrap();
        assert_eq!(brick.name(), "reverse");
    }

    #[test]
    fn test_unknown_identifier() {
        let factory = BrickFactory::with_builtin_bricks().unwrap();
        let err = factory.create("enigma").unwrap_err();
        assert_eq!(err.to_string(), "Brick identifier 'enigma' is not registered");
        assert!(factory.get_meta("enigma").is_err());
        assert!(!factory.contains("enigma"));
    }

    #[test]
    fn test_created_brick_carries_registered_identifier() {
        let factory = BrickFactory::new();
        factory
            .register(
                BrickMeta {
                    name: "rot",
                    title: "Rotate by 13",
                    ..*Rot13Encoder.meta()
                },
                || Brick::from_encoder(Rot13Encoder),
            )
            .unwrap();

        let brick = factory.create("rot").unwrap();
        assert_eq!(brick.name(), "rot");
        assert_eq!(brick.meta().title, "Rotate by 13");
        assert_eq!(brick.kind(), BrickKind::Encoder);
        assert!(factory.get_invokable("rot13").is_err());
    }

    #[test]
    fn test_get_meta_does_not_instantiate() {
        let factory = BrickFactory::new();
        factory
            .register(
                BrickMeta {
                    name: "exploding",
                    title: "Exploding",
                    category: "Test",
                    kind: BrickKind::Encoder,
                },
                || Err(InvalidInputError::new("field", "never valid")),
            )
            .unwrap();

        assert_eq!(factory.get_meta("exploding").unwrap().title, "Exploding");
        assert!(matches!(
            factory.create("exploding"),
            Err(ConfigurationError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_shared_instance_is_created_once() {
        let first = BrickFactory::instance().unwrap();
        let second = BrickFactory::instance().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.contains("base64"));
    }
}
