// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for propagation passes and viewer renders.
//!
//! This module contains message types for logging events related to:
//! * Propagation pass lifecycle (start, completion)
//! * Bricks entering and leaving the broken state
//! * Render outcomes that arrive after being superseded

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::brick::BrickId;
use crate::errors::TransformError;
use crate::observability::messages::StructuredLog;

/// A propagation pass started.
///
/// # Log Level
/// `debug!` - Fires on every edit
pub struct PropagationStarted<'a> {
    pub generation: u64,
    pub trigger: &'a str,
    pub origin_lane: usize,
}

impl Display for PropagationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Propagation pass {} started by {} at lane {}",
            self.generation, self.trigger, self.origin_lane
        )
    }
}

impl StructuredLog for PropagationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            generation = self.generation,
            trigger = self.trigger,
            origin_lane = self.origin_lane,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "propagation",
            span_name = name,
            generation = self.generation,
            trigger = self.trigger,
            origin_lane = self.origin_lane,
        )
    }
}

/// A propagation pass finished, possibly halted at a broken brick.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_brickyard::observability::messages::pipe::PropagationCompleted;
///
/// let msg = PropagationCompleted {
///     generation: 2,
///     visited: 3,
///     broken: 1,
///     renders: 2,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Propagation pass 2 completed: visited=3, broken=1, renders=2"
/// );
/// ```
pub struct PropagationCompleted {
    pub generation: u64,
    pub visited: usize,
    pub broken: usize,
    pub renders: usize,
}

impl Display for PropagationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Propagation pass {} completed: visited={}, broken={}, renders={}",
            self.generation, self.visited, self.broken, self.renders
        )
    }
}

impl StructuredLog for PropagationCompleted {
    fn log(&self) {
        tracing::info!(
            generation = self.generation,
            visited = self.visited,
            broken = self.broken,
            renders = self.renders,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "propagation_completed",
            span_name = name,
            generation = self.generation,
            visited = self.visited,
            broken = self.broken,
        )
    }
}

/// An encoder rejected its input and halted the pass.
///
/// # Log Level
/// `warn!` - Recoverable, attached to the brick
pub struct BrickBroken<'a> {
    pub brick_id: BrickId,
    pub brick: &'a str,
    pub index: usize,
    pub error: &'a TransformError,
}

impl Display for BrickBroken<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Brick '{}' {} at index {} is broken: {}",
            self.brick, self.brick_id, self.index, self.error
        )
    }
}

impl StructuredLog for BrickBroken<'_> {
    fn log(&self) {
        tracing::warn!(
            brick_id = self.brick_id.0,
            brick = self.brick,
            index = self.index,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "brick_broken",
            span_name = name,
            brick_id = self.brick_id.0,
            brick = self.brick,
            index = self.index,
        )
    }
}

/// A previously broken brick produced output again.
///
/// # Log Level
/// `info!` - State change
pub struct BrickRecovered<'a> {
    pub brick_id: BrickId,
    pub brick: &'a str,
}

impl Display for BrickRecovered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Brick '{}' {} recovered", self.brick, self.brick_id)
    }
}

impl StructuredLog for BrickRecovered<'_> {
    fn log(&self) {
        tracing::info!(brick_id = self.brick_id.0, brick = self.brick, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "brick_recovered",
            span_name = name,
            brick_id = self.brick_id.0,
            brick = self.brick,
        )
    }
}

/// A viewer could not parse its edited text.
///
/// # Log Level
/// `warn!` - Surfaced to the caller
pub struct ViewerEditRejected<'a> {
    pub brick_id: BrickId,
    pub brick: &'a str,
    pub error: &'a TransformError,
}

impl Display for ViewerEditRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Edit of viewer '{}' {} rejected: {}",
            self.brick, self.brick_id, self.error
        )
    }
}

impl StructuredLog for ViewerEditRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            brick_id = self.brick_id.0,
            brick = self.brick,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "viewer_edit_rejected",
            span_name = name,
            brick_id = self.brick_id.0,
            brick = self.brick,
        )
    }
}

/// A render outcome arrived for a generation that is no longer current.
///
/// # Log Level
/// `debug!` - Expected under rapid edits
pub struct RenderSuperseded {
    pub brick_id: BrickId,
    pub generation: u64,
    pub pending: Option<u64>,
}

impl Display for RenderSuperseded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.pending {
            Some(pending) => write!(
                f,
                "Discarding render of {} from pass {}, pass {} is pending",
                self.brick_id, self.generation, pending
            ),
            None => write!(
                f,
                "Discarding render of {} from pass {}, nothing is pending",
                self.brick_id, self.generation
            ),
        }
    }
}

impl StructuredLog for RenderSuperseded {
    fn log(&self) {
        tracing::debug!(
            brick_id = self.brick_id.0,
            generation = self.generation,
            pending = ?self.pending,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "render_superseded",
            span_name = name,
            brick_id = self.brick_id.0,
            generation = self.generation,
        )
    }
}

/// A viewer failed to render its lane content.
///
/// # Log Level
/// `warn!` - Recoverable, attached to the viewer
pub struct RenderFailed<'a> {
    pub brick_id: BrickId,
    pub brick: &'a str,
    pub error: &'a TransformError,
}

impl Display for RenderFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Viewer '{}' {} failed to render: {}",
            self.brick, self.brick_id, self.error
        )
    }
}

impl StructuredLog for RenderFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            brick_id = self.brick_id.0,
            brick = self.brick,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "render_failed",
            span_name = name,
            brick_id = self.brick_id.0,
            brick = self.brick,
        )
    }
}
