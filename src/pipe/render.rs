// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::brick::{Brick, BrickId};
use crate::content::Content;
use crate::errors::TransformError;
use crate::settings::Settings;
use crate::traits::Viewer;

/// A detached viewer render.
///
/// The job owns everything it needs, so it can run on another task while the
/// pipe keeps accepting edits. Its outcome is only applied if no later pass
/// has requested a render of the same viewer in the meantime.
#[derive(Clone)]
pub struct RenderJob {
    brick_id: BrickId,
    generation: u64,
    viewer: Arc<dyn Viewer>,
    settings: Settings,
    content: Content,
}

impl RenderJob {
    pub(crate) fn for_brick(brick: &Brick, content: Content, generation: u64) -> Option<Self> {
        Some(Self {
            brick_id: brick.id(),
            generation,
            viewer: brick.viewer_handle()?,
            settings: brick.settings().clone(),
            content,
        })
    }

    pub fn brick_id(&self) -> BrickId {
        self.brick_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub async fn run(self) -> RenderOutcome {
        let result = self.viewer.render(&self.content, &self.settings).await;
        RenderOutcome {
            brick_id: self.brick_id,
            generation: self.generation,
            result,
        }
    }
}

impl fmt::Debug for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderJob")
            .field("brick_id", &self.brick_id)
            .field("viewer", &self.viewer.meta().name)
            .field("generation", &self.generation)
            .field("content", &self.content)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub brick_id: BrickId,
    pub generation: u64,
    pub result: Result<String, TransformError>,
}
