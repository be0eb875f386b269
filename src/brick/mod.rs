// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bricks: the configurable stages of a pipe.
//!
//! A [`Brick`] is a tagged variant over an [`Encoder`] or a [`Viewer`]
//! implementation. The shared capability set (identity, settings, broken
//! state) lives on the brick itself; kind specific operations are reached
//! through [`Brick::encoder`] and [`Brick::viewer`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde::Serialize;

use crate::content::Content;
use crate::errors::{InvalidInputError, TransformError};
use crate::settings::{FieldValue, Settings};
use crate::traits::{Encoder, Viewer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickKind {
    Encoder,
    Viewer,
}

/// Static descriptor of a brick type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrickMeta {
    pub name: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    #[serde(rename = "type")]
    pub kind: BrickKind,
}

/// Role of an encoder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Encode => Direction::Decode,
            Direction::Decode => Direction::Encode,
        }
    }
}

/// Identity of a brick within its pipe, stable across reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BrickId(pub u64);

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrickStatus {
    #[default]
    Ok,
    /// Last operation failed. Cached output from before the failure is kept.
    Broken(TransformError),
}

#[derive(Clone)]
struct TransformCache {
    input: Content,
    direction: Direction,
    revision: u64,
    output: Content,
}

#[derive(Clone)]
struct EncoderState {
    encoder: Arc<dyn Encoder>,
    reversed: bool,
    cache: Option<TransformCache>,
}

#[derive(Clone)]
struct ViewerState {
    viewer: Arc<dyn Viewer>,
    view: Option<String>,
    /// Generation of the most recent render request
    pending_generation: Option<u64>,
}

#[derive(Clone)]
enum Role {
    Encoder(EncoderState),
    Viewer(ViewerState),
}

#[derive(Clone)]
pub struct Brick {
    id: BrickId,
    meta: BrickMeta,
    settings: Settings,
    status: BrickStatus,
    role: Role,
}

impl Brick {
    pub fn from_encoder(encoder: impl Encoder + 'static) -> Result<Self, InvalidInputError> {
        let encoder: Arc<dyn Encoder> = Arc::new(encoder);
        Ok(Self {
            id: BrickId::default(),
            meta: *encoder.meta(),
            settings: Settings::new(encoder.fields())?,
            status: BrickStatus::Ok,
            role: Role::Encoder(EncoderState {
                encoder,
                reversed: false,
                cache: None,
            }),
        })
    }

    pub fn from_viewer(viewer: impl Viewer + 'static) -> Result<Self, InvalidInputError> {
        let viewer: Arc<dyn Viewer> = Arc::new(viewer);
        Ok(Self {
            id: BrickId::default(),
            meta: *viewer.meta(),
            settings: Settings::new(viewer.fields())?,
            status: BrickStatus::Ok,
            role: Role::Viewer(ViewerState {
                viewer,
                view: None,
                pending_generation: None,
            }),
        })
    }

    pub fn id(&self) -> BrickId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BrickId) {
        self.id = id;
    }

    pub fn meta(&self) -> &BrickMeta {
        &self.meta
    }

    /// Takes over the descriptor a registry holds for this brick.
    ///
    /// The kind always follows the brick's role.
    pub(crate) fn set_meta(&mut self, meta: BrickMeta) {
        let kind = self.meta.kind;
        self.meta = BrickMeta { kind, ..meta };
    }

    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    pub fn kind(&self) -> BrickKind {
        self.meta.kind
    }

    pub fn is_encoder(&self) -> bool {
        matches!(self.role, Role::Encoder(_))
    }

    pub fn is_viewer(&self) -> bool {
        matches!(self.role, Role::Viewer(_))
    }

    pub fn encoder(&self) -> Option<&dyn Encoder> {
        match &self.role {
            Role::Encoder(state) => Some(state.encoder.as_ref()),
            Role::Viewer(_) => None,
        }
    }

    pub fn viewer(&self) -> Option<&dyn Viewer> {
        match &self.role {
            Role::Viewer(state) => Some(state.viewer.as_ref()),
            Role::Encoder(_) => None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Assigns a setting. A change invalidates the cached transform output.
    pub fn set_setting(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> Result<bool, InvalidInputError> {
        let changed = self.settings.set_value(name, value)?;
        if changed {
            self.invalidate();
        }
        Ok(changed)
    }

    /// Assigns several settings at once, all or nothing.
    pub fn apply_settings(
        &mut self,
        values: &BTreeMap<String, FieldValue>,
    ) -> Result<bool, InvalidInputError> {
        let changed = self.settings.apply(values)?;
        if changed {
            self.invalidate();
        }
        Ok(changed)
    }

    pub fn randomize_settings(&mut self, rng: &mut dyn RngCore) -> bool {
        let changed = self.settings.randomize(rng);
        if changed {
            self.invalidate();
        }
        changed
    }

    pub fn status(&self) -> &BrickStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&TransformError> {
        match &self.status {
            BrickStatus::Broken(error) => Some(error),
            BrickStatus::Ok => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.error().is_some()
    }

    pub(crate) fn mark_broken(&mut self, error: TransformError) {
        self.status = BrickStatus::Broken(error);
    }

    pub(crate) fn mark_ok(&mut self) {
        self.status = BrickStatus::Ok;
    }

    /// Whether the encoder's encode and decode roles are swapped.
    pub fn is_reversed(&self) -> bool {
        matches!(&self.role, Role::Encoder(state) if state.reversed)
    }

    pub(crate) fn set_reversed(&mut self, reversed: bool) -> bool {
        match &mut self.role {
            Role::Encoder(state) if state.reversed != reversed => {
                state.reversed = reversed;
                state.cache = None;
                true
            }
            _ => false,
        }
    }

    /// Output of the last successful transform.
    pub fn last_output(&self) -> Option<&Content> {
        match &self.role {
            Role::Encoder(state) => state.cache.as_ref().map(|cache| &cache.output),
            Role::Viewer(_) => None,
        }
    }

    /// Text produced by the last applied render.
    pub fn view(&self) -> Option<&str> {
        match &self.role {
            Role::Viewer(state) => state.view.as_deref(),
            Role::Encoder(_) => None,
        }
    }

    fn invalidate(&mut self) {
        if let Role::Encoder(state) = &mut self.role {
            state.cache = None;
        }
    }

    /// Runs the encoder on `input` for the given pipe flow direction.
    ///
    /// A cached output is reused when input, direction and settings revision
    /// all match. Failures mark the brick broken and keep the cache intact.
    pub(crate) async fn run_transform(
        &mut self,
        input: &Content,
        flow: Direction,
    ) -> Option<Result<Content, TransformError>> {
        let Role::Encoder(state) = &mut self.role else {
            return None;
        };
        let direction = if state.reversed { flow.flip() } else { flow };
        let revision = self.settings.revision();

        if let Some(cache) = &state.cache {
            if cache.direction == direction && cache.revision == revision && cache.input == *input {
                self.status = BrickStatus::Ok;
                return Some(Ok(cache.output.clone()));
            }
        }

        let result = state
            .encoder
            .transform(input, direction, &self.settings)
            .await;

        match &result {
            Ok(output) => {
                state.cache = Some(TransformCache {
                    input: input.clone(),
                    direction,
                    revision,
                    output: output.clone(),
                });
                self.status = BrickStatus::Ok;
            }
            Err(error) => self.status = BrickStatus::Broken(error.clone()),
        }
        Some(result)
    }

    pub(crate) fn viewer_handle(&self) -> Option<Arc<dyn Viewer>> {
        match &self.role {
            Role::Viewer(state) => Some(Arc::clone(&state.viewer)),
            Role::Encoder(_) => None,
        }
    }

    pub(crate) fn request_render(&mut self, generation: u64) {
        if let Role::Viewer(state) = &mut self.role {
            state.pending_generation = Some(generation);
        }
    }

    pub(crate) fn pending_generation(&self) -> Option<u64> {
        match &self.role {
            Role::Viewer(state) => state.pending_generation,
            Role::Encoder(_) => None,
        }
    }

    pub(crate) fn set_view(&mut self, view: Option<String>) {
        if let Role::Viewer(state) = &mut self.role {
            state.view = view;
            state.pending_generation = None;
        }
    }
}

impl fmt::Debug for Brick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brick")
            .field("id", &self.id)
            .field("name", &self.meta.name)
            .field("kind", &self.meta.kind)
            .field("status", &self.status)
            .field("reversed", &self.is_reversed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bricks::encoders::{CaesarCipherEncoder, ReverseEncoder};
    use crate::bricks::viewers::TextViewer;

    #[tokio::test]
    async fn test_transform_output_is_cached_per_settings_revision() {
        let mut brick = Brick::from_encoder(CaesarCipherEncoder).unwrap();
        let input = Content::from_string("abc");

        let first = brick.run_transform(&input, Direction::Encode).await.unwrap().unwrap();
        assert_eq!(first.string().unwrap(), "hij");
        assert_eq!(brick.last_output(), Some(&first));

        brick.set_setting("shift", FieldValue::Number(1)).unwrap();
        assert!(brick.last_output().is_none());

        let second = brick.run_transform(&input, Direction::Encode).await.unwrap().unwrap();
        assert_eq!(second.string().unwrap(), "bcd");
    }

    #[tokio::test]
    async fn test_reversed_encoder_swaps_roles() {
        let mut brick = Brick::from_encoder(CaesarCipherEncoder).unwrap();
        assert!(brick.set_reversed(true));
        assert!(!brick.set_reversed(true));

        let output = brick
            .run_transform(&Content::from_string("hij"), Direction::Encode)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(output.string().unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_output() {
        let mut brick = Brick::from_encoder(CaesarCipherEncoder).unwrap();
        let good = brick
            .run_transform(&Content::from_string("abc"), Direction::Encode)
            .await
            .unwrap()
            .unwrap();

        let result = brick
            .run_transform(&Content::from_bytes(vec![0xff]), Direction::Encode)
            .await
            .unwrap();
        assert!(result.is_err());
        assert!(brick.is_broken());
        assert_eq!(brick.last_output(), Some(&good));
    }

    #[tokio::test]
    async fn test_viewer_has_no_transform_capability() {
        let mut brick = Brick::from_viewer(TextViewer).unwrap();
        assert!(brick.encoder().is_none());
        assert!(brick.viewer().is_some());
        assert!(brick.run_transform(&Content::empty(), Direction::Encode).await.is_none());
        assert!(!brick.set_reversed(true));
    }

    #[test]
    fn test_meta_serialization() {
        let brick = Brick::from_encoder(ReverseEncoder).unwrap();
        let json = serde_json::to_value(brick.meta()).unwrap();
        assert_eq!(json["name"], "reverse");
        assert_eq!(json["type"], "encoder");
    }
}
