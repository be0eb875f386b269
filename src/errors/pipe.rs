// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::brick::{InvalidInputError, TransformError};

/// Errors returned to the caller that triggered a pipe operation.
///
/// Transform failures met while propagating are not reported here; they are
/// attached to the failing brick and listed in the propagation report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipeError {
    #[error("Brick index {index} is out of range for a pipe of {len} bricks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Brick at index {index} is not an encoder")]
    NotAnEncoder { index: usize },

    #[error("Brick at index {index} is not a viewer")]
    NotAViewer { index: usize },

    #[error(transparent)]
    Setting(#[from] InvalidInputError),

    /// No viewer on the source lane shows its current content, so the pipe
    /// cannot be saved without changing it
    #[error("Content of lane {lane} is not shown by any healthy viewer")]
    Unrepresentable { lane: usize },

    /// The viewer could not turn its edited representation into content
    #[error("Edit at brick {index} rejected: {source}")]
    Edit {
        index: usize,
        #[source]
        source: TransformError,
    },
}
