// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::brick::BrickId;
use crate::errors::TransformError;

use super::render::RenderJob;

/// An encoder that halted a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenBrick {
    pub brick_id: BrickId,
    /// Position in the pipe when the pass ran
    pub index: usize,
    pub error: TransformError,
}

/// What a single propagation pass did.
#[derive(Debug, Clone, Default)]
pub struct PropagationReport {
    pub generation: u64,
    /// Lane the pass started from
    pub origin_lane: usize,
    /// Encoders run, in order
    pub visited: Vec<BrickId>,
    pub broken: Vec<BrokenBrick>,
    /// Viewers whose content changed and need to be rendered again
    pub renders: Vec<RenderJob>,
}

impl PropagationReport {
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }

    pub fn render_targets(&self) -> Vec<BrickId> {
        self.renders.iter().map(RenderJob::brick_id).collect()
    }
}
