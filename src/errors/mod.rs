// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod brick;
mod codec;
mod config;
mod pipe;

pub use brick::{InvalidInputError, TransformError};
pub use codec::{ByteEncodingError, TextEncodingError};
pub use config::ConfigurationError;
pub use pipe::PipeError;
