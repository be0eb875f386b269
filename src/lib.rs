// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod brick;      // brick kinds, identity and state
pub mod bricks;     // built-in bricks + registry
pub mod codec;      // byte/string codecs
pub mod config;     // serialized pipes
pub mod content;    // immutable content values
pub mod errors;     // error handling
pub mod observability;
pub mod pipe;       // propagation engine
pub mod settings;   // typed brick parameters
pub mod traits;     // encoder and viewer abstractions
