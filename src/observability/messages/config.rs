// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipe file loading.

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A pipe document was read and parsed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipeConfigLoaded<'a> {
    pub path: &'a str,
    pub format: &'a str,
    pub items: usize,
}

impl Display for PipeConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} pipe '{}' with {} bricks",
            self.format, self.path, self.items
        )
    }
}

impl StructuredLog for PipeConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            format = self.format,
            items = self.items,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipe_config_loaded",
            span_name = name,
            path = self.path,
            format = self.format,
        )
    }
}

/// Stored viewer content could not be replayed into a rebuilt pipe.
///
/// # Log Level
/// `warn!` - The pipe is still usable, the viewer is marked broken
pub struct ContentReplayFailed<'a> {
    pub brick: &'a str,
    pub index: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for ContentReplayFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not restore content of '{}' at index {}: {}",
            self.brick, self.index, self.error
        )
    }
}

impl StructuredLog for ContentReplayFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            brick = self.brick,
            index = self.index,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "content_replay_failed",
            span_name = name,
            brick = self.brick,
            index = self.index,
        )
    }
}
