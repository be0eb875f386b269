// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod encoders;
pub mod factory;
pub mod viewers;

pub use factory::{BrickConstructor, BrickFactory};
