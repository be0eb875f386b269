// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for brick registration and pipe loading.

use thiserror::Error;

use super::brick::InvalidInputError;
use super::pipe::PipeError;

/// Registry or pipe configuration failure.
///
/// Duplicate registrations are fatal at startup, unresolvable identifiers are
/// fatal at load time. Neither is ever ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A brick identifier was registered twice in the same registry
    #[error("Brick identifier '{identifier}' is already registered")]
    DuplicateIdentifier { identifier: String },

    /// A brick identifier could not be resolved through the registry
    #[error("Brick identifier '{identifier}' is not registered")]
    UnknownIdentifier { identifier: String },

    /// A serialized settings value was rejected by the brick's field
    #[error("Invalid setting for brick '{brick}': {source}")]
    InvalidSetting {
        brick: String,
        #[source]
        source: InvalidInputError,
    },

    /// A serialized settings value names a field the brick does not have
    #[error("Brick '{brick}' has no setting named '{field}'")]
    UnknownSetting { brick: String, field: String },

    /// The pipe file could not be read
    #[error("Failed to load pipe from '{path}': {reason}")]
    Load { path: String, reason: String },

    /// The pipe file could not be written
    #[error("Failed to save pipe to '{path}': {reason}")]
    Save { path: String, reason: String },

    /// A resolved brick could not be placed into the pipe
    #[error("Failed to assemble pipe: {0}")]
    Assembly(#[from] PipeError),

    /// The pipe document could not be parsed
    #[error("Failed to parse pipe: {0}")]
    Parse(String),
}
