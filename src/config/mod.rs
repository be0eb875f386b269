// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod loader;


pub use builder::PipeBuilder;
pub use loader::{load_pipe_config, save_pipe_config, BrickConfig, ConfigFormat, PipeConfig};
