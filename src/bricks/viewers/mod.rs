// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod bytes;
pub mod text;

pub use bytes::BytesViewer;
pub use text::TextViewer;
