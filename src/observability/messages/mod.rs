// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for structured logging.
//!
//! * `config` - pipe file loading and replay
//! * `pipe` - propagation passes, broken bricks and renders
//! * `registry` - brick registration and lookup

use std::fmt::Display;

use tracing::Span;

pub mod config;
pub mod pipe;
pub mod registry;

/// A log message carrying its own structured fields.
pub trait StructuredLog: Display {
    /// Emits the message at its documented level.
    fn log(&self);

    /// Builds a span carrying the message fields.
    fn span(&self, name: &str) -> Span;
}
