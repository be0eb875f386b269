// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::codec::{ByteEncodingError, TextEncodingError};

/// An encoder or viewer rejected its input given the current settings.
///
/// The pipe never lets this escape past the brick that produced it; it is
/// stored on the brick as its broken state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{0}")]
    ByteEncoding(#[from] ByteEncodingError),

    #[error("{0}")]
    TextEncoding(#[from] TextEncodingError),

    #[error("{reason}")]
    Rejected { reason: String },
}

impl TransformError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        TransformError::Rejected {
            reason: reason.into(),
        }
    }
}

/// A settings field assignment violated the field's validity predicate.
///
/// Raised before any state is mutated; the field keeps its prior value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for field '{field}': {reason}")]
pub struct InvalidInputError {
    pub field: String,
    pub reason: String,
}

impl InvalidInputError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
