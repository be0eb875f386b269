// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for brick registry events.

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::brick::BrickKind;
use crate::observability::messages::StructuredLog;

/// A brick type was added to a registry.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct BrickRegistered<'a> {
    pub identifier: &'a str,
    pub kind: BrickKind,
}

impl Display for BrickRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered {:?} brick '{}'", self.kind, self.identifier)
    }
}

impl StructuredLog for BrickRegistered<'_> {
    fn log(&self) {
        tracing::debug!(identifier = self.identifier, kind = ?self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "brick_registered",
            span_name = name,
            identifier = self.identifier,
            kind = ?self.kind,
        )
    }
}

/// A second registration under an existing identifier was refused.
///
/// # Log Level
/// `error!` - Startup configuration defect
///
/// # Example
/// ```
/// use the_brickyard::observability::messages::registry::DuplicateBrickRejected;
///
/// let msg = DuplicateBrickRejected { identifier: "base64" };
/// assert_eq!(msg.to_string(), "Refusing duplicate registration of brick 'base64'");
/// ```
pub struct DuplicateBrickRejected<'a> {
    pub identifier: &'a str,
}

impl Display for DuplicateBrickRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Refusing duplicate registration of brick '{}'",
            self.identifier
        )
    }
}

impl StructuredLog for DuplicateBrickRejected<'_> {
    fn log(&self) {
        tracing::error!(identifier = self.identifier, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "duplicate_brick",
            span_name = name,
            identifier = self.identifier,
        )
    }
}

/// A lookup named an identifier that was never registered.
///
/// # Log Level
/// `warn!` - Usually a stale or hand-edited pipe file
pub struct UnknownBrickRequested<'a> {
    pub identifier: &'a str,
}

impl Display for UnknownBrickRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No brick registered as '{}'", self.identifier)
    }
}

impl StructuredLog for UnknownBrickRequested<'_> {
    fn log(&self) {
        tracing::warn!(identifier = self.identifier, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unknown_brick",
            span_name = name,
            identifier = self.identifier,
        )
    }
}
