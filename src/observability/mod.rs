// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the brick pipeline.
//!
//! Diagnostic output is built from message structs rather than inline format
//! strings. Each message implements `Display` for the human readable line and
//! [`StructuredLog`](messages::StructuredLog) for the structured fields, so the
//! same event renders consistently wherever it is emitted.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::pipe` - propagation passes, broken bricks and renders
//! * `messages::registry` - brick registration and lookup
//! * `messages::config` - pipe file loading
//!
//! # Usage
//!
//! ```rust
//! use the_brickyard::observability::messages::pipe::PropagationStarted;
//! use the_brickyard::observability::messages::StructuredLog;
//!
//! let msg = PropagationStarted {
//!     generation: 3,
//!     trigger: "set_input",
//!     origin_lane: 0,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
