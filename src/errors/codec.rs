// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the codec layer and by content representation conversions.
//!
//! Both are recoverable and only ever reach the caller that triggered the
//! conversion. Inside a pipe they are wrapped in a [`TransformError`] and
//! attached to the brick that produced them.
//!
//! [`TransformError`]: crate::errors::TransformError

use thiserror::Error;

/// Malformed byte representation (hex, binary or base64 input).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ByteEncodingError {
    pub message: String,
}

impl ByteEncodingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Malformed text representation under a given text encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TextEncodingError {
    pub message: String,
}

impl TextEncodingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
