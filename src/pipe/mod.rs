// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered brick sequences and content propagation.
//!
//! A pipe of `n` encoders holds `n + 1` content *lanes*. Encoder `k` sits
//! between lanes `k` and `k + 1`: it encodes lane `k` into lane `k + 1` and
//! decodes the other way. Viewers sit on the lane formed by the encoders in
//! front of them, so `text | base64 | text` has two lanes, the left viewer
//! showing lane 0 and the right viewer lane 1.
//!
//! The lane last written by an edit is the *source lane*. Every pass moves
//! content away from it:
//!
//! * `set_input` and `set_output` write the first or last lane and propagate
//!   forward or backward.
//! * `edit_viewer` writes the viewer's lane and propagates both ways.
//! * A settings change or direction flip on an encoder downstream of the
//!   source lane reruns it forward; one upstream reruns it backward.
//!
//! A failing encoder is marked broken and stops its pass. Lanes past it keep
//! their last good content. Each pass bumps the pipe generation and returns a
//! [`PropagationReport`] whose [`RenderJob`]s refresh the affected viewers.
//! Jobs run detached; [`Pipe::apply_render`] drops outcomes for viewers that
//! have since been asked to render a newer pass.

mod render;
mod report;


pub use render::{RenderJob, RenderOutcome};
pub use report::{BrokenBrick, PropagationReport};

use std::collections::BTreeSet;

use rand::RngCore;

use crate::brick::{Brick, BrickId, Direction};
use crate::config::{BrickConfig, PipeConfig};
use crate::content::Content;
use crate::errors::PipeError;
use crate::observability::messages::{pipe::*, StructuredLog};
use crate::settings::FieldValue;

/// Per pass bookkeeping.
struct Pass {
    report: PropagationReport,
    changed: BTreeSet<usize>,
    /// Viewers to render whether or not their lane changed
    forced: Vec<BrickId>,
}

pub struct Pipe {
    bricks: Vec<Brick>,
    lanes: Vec<Content>,
    source_lane: usize,
    /// Viewer whose edit produced the source lane content
    source_viewer: Option<BrickId>,
    generation: u64,
    next_id: u64,
}

impl Default for Pipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe {
    pub fn new() -> Self {
        Self {
            bricks: Vec::new(),
            lanes: vec![Content::empty()],
            source_lane: 0,
            source_viewer: None,
            generation: 0,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn brick(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    pub fn brick_by_id(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.iter().find(|brick| brick.id() == id)
    }

    pub fn index_of(&self, id: BrickId) -> Option<usize> {
        self.bricks.iter().position(|brick| brick.id() == id)
    }

    /// Content entering the first encoder.
    pub fn input(&self) -> &Content {
        &self.lanes[0]
    }

    /// Content leaving the last encoder.
    pub fn output(&self) -> &Content {
        &self.lanes[self.lanes.len() - 1]
    }

    pub fn lanes(&self) -> &[Content] {
        &self.lanes
    }

    /// Lane seen by the brick at `index`: the number of encoders before it.
    pub fn lane_of(&self, index: usize) -> usize {
        self.bricks
            .iter()
            .take(index)
            .filter(|brick| brick.is_encoder())
            .count()
    }

    pub fn source_lane(&self) -> usize {
        self.source_lane
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bricks currently in broken state, with their positions.
    pub fn broken_bricks(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks
            .iter()
            .enumerate()
            .filter(|(_, brick)| brick.is_broken())
    }

    /// Replaces the pipe input and propagates it forward.
    pub async fn set_input(&mut self, content: Content) -> PropagationReport {
        let mut pass = self.begin("set_input", 0);
        self.source_lane = 0;
        self.source_viewer = None;
        self.write_lane(0, content, &mut pass);
        self.forward(0, &mut pass).await;
        self.finish(pass, None)
    }

    /// Replaces the pipe output and propagates it backward.
    pub async fn set_output(&mut self, content: Content) -> PropagationReport {
        let last = self.lanes.len() - 1;
        let mut pass = self.begin("set_output", last);
        self.source_lane = last;
        self.source_viewer = None;
        self.write_lane(last, content, &mut pass);
        self.backward(last, &mut pass).await;
        self.finish(pass, None)
    }

    /// Applies text typed into the viewer at `index`.
    ///
    /// The parsed content is propagated in both directions. The edited viewer
    /// keeps `text` as its view and is not asked to render again.
    pub async fn edit_viewer(
        &mut self,
        index: usize,
        text: &str,
    ) -> Result<PropagationReport, PipeError> {
        self.check_index(index)?;
        let brick = &self.bricks[index];
        let viewer = brick.viewer().ok_or(PipeError::NotAViewer { index })?;
        let (id, name) = (brick.id(), brick.name());

        let parsed = viewer.parse(text, brick.settings());
        let content = match parsed {
            Ok(content) => content,
            Err(error) => {
                ViewerEditRejected {
                    brick_id: id,
                    brick: name,
                    error: &error,
                }
                .log();
                self.bricks[index].mark_broken(error.clone());
                return Err(PipeError::Edit {
                    index,
                    source: error,
                });
            }
        };

        let lane = self.lane_of(index);
        let mut pass = self.begin("edit_viewer", lane);
        self.source_lane = lane;
        self.source_viewer = Some(id);

        let brick = &mut self.bricks[index];
        brick.mark_ok();
        brick.set_view(Some(text.to_string()));

        self.write_lane(lane, content, &mut pass);
        self.backward(lane, &mut pass).await;
        self.forward(lane, &mut pass).await;
        Ok(self.finish(pass, Some(id)))
    }

    /// Assigns one setting of the brick at `index`.
    pub async fn set_setting(
        &mut self,
        index: usize,
        name: &str,
        value: FieldValue,
    ) -> Result<PropagationReport, PipeError> {
        self.check_index(index)?;
        let changed = self.bricks[index].set_setting(name, value)?;
        Ok(self.settings_changed(index, changed, "set_setting").await)
    }

    pub async fn randomize_settings<R: RngCore>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Result<PropagationReport, PipeError> {
        self.check_index(index)?;
        let changed = self.bricks[index].randomize_settings(rng);
        Ok(self.settings_changed(index, changed, "randomize_settings").await)
    }

    /// Swaps the encode and decode roles of the encoder at `index`.
    pub async fn reverse_brick(&mut self, index: usize) -> Result<PropagationReport, PipeError> {
        self.check_index(index)?;
        let brick = &mut self.bricks[index];
        if !brick.is_encoder() {
            return Err(PipeError::NotAnEncoder { index });
        }
        let reversed = !brick.is_reversed();
        brick.set_reversed(reversed);
        Ok(self.rerun_encoder(index, "reverse_brick").await)
    }

    /// Inserts `brick` so that it ends up at `index`.
    pub async fn insert_brick(
        &mut self,
        index: usize,
        mut brick: Brick,
    ) -> Result<PropagationReport, PipeError> {
        if index > self.bricks.len() {
            return Err(PipeError::IndexOutOfRange {
                index,
                len: self.bricks.len(),
            });
        }
        let id = BrickId(self.next_id);
        self.next_id += 1;
        brick.set_id(id);

        let lane = self.lane_of(index);
        let is_encoder = brick.is_encoder();
        self.bricks.insert(index, brick);

        if !is_encoder {
            let mut pass = self.begin("insert_brick", lane);
            pass.forced.push(id);
            return Ok(self.finish(pass, None));
        }

        self.split_lane(lane);
        let pass = if self.source_lane <= lane {
            let mut pass = self.begin("insert_brick", lane);
            self.forward(lane, &mut pass).await;
            pass
        } else {
            let mut pass = self.begin("insert_brick", lane + 1);
            self.backward(lane + 1, &mut pass).await;
            pass
        };
        Ok(self.finish(pass, None))
    }

    pub async fn push_brick(&mut self, brick: Brick) -> Result<PropagationReport, PipeError> {
        self.insert_brick(self.bricks.len(), brick).await
    }

    /// Removes the brick at `index`, merging the lanes around an encoder.
    pub async fn remove_brick(&mut self, index: usize) -> Result<PropagationReport, PipeError> {
        self.check_index(index)?;
        let lane = self.lane_of(index);
        let brick = self.bricks.remove(index);
        if self.source_viewer == Some(brick.id()) {
            self.source_viewer = None;
        }

        if brick.is_viewer() {
            let pass = self.begin("remove_brick", lane);
            return Ok(self.finish(pass, None));
        }

        let downstream = self.source_lane <= lane;
        let differed = self.merge_lanes(lane);
        let mut pass = self.begin("remove_brick", lane);
        if differed {
            pass.changed.insert(lane);
        }
        if downstream {
            self.forward(lane, &mut pass).await;
        } else {
            self.backward(lane, &mut pass).await;
        }
        Ok(self.finish(pass, None))
    }

    /// Moves the brick at `from` so that it ends up at `to`.
    pub async fn move_brick(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<PropagationReport, PipeError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            let pass = self.begin("move_brick", self.source_lane);
            return Ok(self.finish(pass, None));
        }

        let from_lane = self.lane_of(from);
        let brick = self.bricks.remove(from);
        let id = brick.id();

        if brick.is_viewer() {
            self.bricks.insert(to, brick);
            let mut pass = self.begin("move_brick", self.lane_of(to));
            pass.forced.push(id);
            return Ok(self.finish(pass, None));
        }

        self.merge_lanes(from_lane);
        self.bricks.insert(to, brick);
        self.split_lane(self.lane_of(to));

        let origin = self.source_lane;
        let mut pass = self.begin("move_brick", origin);
        self.backward(origin, &mut pass).await;
        self.forward(origin, &mut pass).await;
        // Lanes were renumbered, so every viewer may show stale content
        pass.changed.extend(0..self.lanes.len());
        Ok(self.finish(pass, self.source_viewer))
    }

    /// Recomputes every lane from the source lane and renders every viewer.
    pub async fn refresh(&mut self) -> PropagationReport {
        let origin = self.source_lane;
        let mut pass = self.begin("refresh", origin);
        self.backward(origin, &mut pass).await;
        self.forward(origin, &mut pass).await;
        pass.changed.extend(0..self.lanes.len());
        self.finish(pass, self.source_viewer)
    }

    /// Applies a finished render. Returns `false` if it was superseded.
    pub fn apply_render(&mut self, outcome: RenderOutcome) -> bool {
        let Some(index) = self.index_of(outcome.brick_id) else {
            RenderSuperseded {
                brick_id: outcome.brick_id,
                generation: outcome.generation,
                pending: None,
            }
            .log();
            return false;
        };

        let brick = &mut self.bricks[index];
        let pending = brick.pending_generation();
        if pending != Some(outcome.generation) {
            RenderSuperseded {
                brick_id: outcome.brick_id,
                generation: outcome.generation,
                pending,
            }
            .log();
            return false;
        }

        match outcome.result {
            Ok(view) => {
                if brick.is_broken() {
                    BrickRecovered {
                        brick_id: brick.id(),
                        brick: brick.name(),
                    }
                    .log();
                }
                brick.mark_ok();
                brick.set_view(Some(view));
            }
            Err(error) => {
                RenderFailed {
                    brick_id: brick.id(),
                    brick: brick.name(),
                    error: &error,
                }
                .log();
                let previous = brick.view().map(str::to_string);
                brick.set_view(previous);
                brick.mark_broken(error);
            }
        }
        true
    }

    /// Runs the report's render jobs in order and applies their outcomes.
    ///
    /// Returns how many were applied.
    pub async fn render_all(&mut self, report: &PropagationReport) -> usize {
        let mut applied = 0;
        for job in report.renders.iter().cloned() {
            let outcome = job.run().await;
            if self.apply_render(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Serializable form of the pipe.
    ///
    /// The source lane is stored as the text of a viewer showing it, so that
    /// loading the config reproduces the lanes. The editing viewer is
    /// preferred. Only viewers that are not broken and have no render pending
    /// qualify. Non-empty source content without such a viewer is an error.
    pub fn to_config(&self) -> Result<PipeConfig, PipeError> {
        let shows_source = |index: usize| {
            let brick = &self.bricks[index];
            brick.is_viewer()
                && !brick.is_broken()
                && brick.pending_generation().is_none()
                && brick.view().is_some()
                && self.lane_of(index) == self.source_lane
        };
        let holder = self
            .source_viewer
            .and_then(|id| self.index_of(id))
            .filter(|&index| shows_source(index))
            .or_else(|| (0..self.bricks.len()).find(|&index| shows_source(index)));

        if holder.is_none() && !self.lanes[self.source_lane].is_empty() {
            return Err(PipeError::Unrepresentable {
                lane: self.source_lane,
            });
        }

        let items = self
            .bricks
            .iter()
            .enumerate()
            .map(|(index, brick)| BrickConfig {
                brick_identifier: brick.name().to_string(),
                settings_values: brick.settings().values(),
                reversed: brick.is_reversed(),
                content: if holder == Some(index) {
                    brick.view().map(str::to_string)
                } else {
                    None
                },
            })
            .collect();

        Ok(PipeConfig { items })
    }

    /// Crate internal hook for config loading.
    pub(crate) fn brick_mut(&mut self, index: usize) -> Option<&mut Brick> {
        self.bricks.get_mut(index)
    }

    fn check_index(&self, index: usize) -> Result<(), PipeError> {
        if index < self.bricks.len() {
            Ok(())
        } else {
            Err(PipeError::IndexOutOfRange {
                index,
                len: self.bricks.len(),
            })
        }
    }

    fn encoder_indices(&self) -> Vec<usize> {
        self.bricks
            .iter()
            .enumerate()
            .filter(|(_, brick)| brick.is_encoder())
            .map(|(index, _)| index)
            .collect()
    }

    async fn settings_changed(
        &mut self,
        index: usize,
        changed: bool,
        trigger: &'static str,
    ) -> PropagationReport {
        if !changed {
            return PropagationReport {
                generation: self.generation,
                origin_lane: self.lane_of(index),
                ..Default::default()
            };
        }
        if self.bricks[index].is_viewer() {
            let mut pass = self.begin(trigger, self.lane_of(index));
            pass.forced.push(self.bricks[index].id());
            return self.finish(pass, None);
        }
        self.rerun_encoder(index, trigger).await
    }

    /// Reruns the encoder at `index` away from the source lane.
    async fn rerun_encoder(&mut self, index: usize, trigger: &'static str) -> PropagationReport {
        let lane = self.lane_of(index);
        let pass = if lane >= self.source_lane {
            let mut pass = self.begin(trigger, lane);
            self.forward(lane, &mut pass).await;
            pass
        } else {
            let mut pass = self.begin(trigger, lane + 1);
            self.backward(lane + 1, &mut pass).await;
            pass
        };
        self.finish(pass, None)
    }

    /// Duplicates `lane` for a newly inserted encoder.
    fn split_lane(&mut self, lane: usize) {
        let duplicate = self.lanes[lane].clone();
        self.lanes.insert(lane + 1, duplicate);
        if self.source_lane > lane {
            self.source_lane += 1;
        }
    }

    /// Joins the lanes around a removed encoder, keeping the side facing the
    /// source lane. Returns whether the dropped side held different content.
    fn merge_lanes(&mut self, lane: usize) -> bool {
        let differed = self.lanes[lane] != self.lanes[lane + 1];
        if self.source_lane <= lane {
            self.lanes.remove(lane + 1);
        } else {
            self.lanes.remove(lane);
            self.source_lane -= 1;
        }
        differed
    }

    fn write_lane(&mut self, lane: usize, content: Content, pass: &mut Pass) {
        if self.lanes[lane] != content {
            self.lanes[lane] = content;
            pass.changed.insert(lane);
        }
    }

    async fn forward(&mut self, from_lane: usize, pass: &mut Pass) {
        let encoders = self.encoder_indices();
        for (ordinal, &index) in encoders.iter().enumerate().skip(from_lane) {
            let input = self.lanes[ordinal].clone();
            if !self.run_encoder(index, &input, Direction::Encode, ordinal + 1, pass).await {
                break;
            }
        }
    }

    async fn backward(&mut self, from_lane: usize, pass: &mut Pass) {
        let encoders = self.encoder_indices();
        for (ordinal, &index) in encoders.iter().enumerate().take(from_lane).rev() {
            let input = self.lanes[ordinal + 1].clone();
            if !self.run_encoder(index, &input, Direction::Decode, ordinal, pass).await {
                break;
            }
        }
    }

    /// Runs one encoder into `target_lane`. Returns whether the pass goes on.
    async fn run_encoder(
        &mut self,
        index: usize,
        input: &Content,
        flow: Direction,
        target_lane: usize,
        pass: &mut Pass,
    ) -> bool {
        let brick = &mut self.bricks[index];
        let was_broken = brick.is_broken();
        let Some(result) = brick.run_transform(input, flow).await else {
            return true;
        };
        pass.report.visited.push(brick.id());

        match result {
            Ok(output) => {
                if was_broken {
                    BrickRecovered {
                        brick_id: brick.id(),
                        brick: brick.name(),
                    }
                    .log();
                }
                if self.lanes[target_lane] != output {
                    self.lanes[target_lane] = output;
                    pass.changed.insert(target_lane);
                }
                true
            }
            Err(error) => {
                BrickBroken {
                    brick_id: brick.id(),
                    brick: brick.name(),
                    index,
                    error: &error,
                }
                .log();
                pass.report.broken.push(BrokenBrick {
                    brick_id: brick.id(),
                    index,
                    error,
                });
                false
            }
        }
    }

    fn begin(&mut self, trigger: &'static str, origin_lane: usize) -> Pass {
        self.generation += 1;
        PropagationStarted {
            generation: self.generation,
            trigger,
            origin_lane,
        }
        .log();
        Pass {
            report: PropagationReport {
                generation: self.generation,
                origin_lane,
                ..Default::default()
            },
            changed: BTreeSet::new(),
            forced: Vec::new(),
        }
    }

    /// Schedules renders for viewers on changed lanes, except `origin`.
    fn finish(&mut self, mut pass: Pass, origin: Option<BrickId>) -> PropagationReport {
        let generation = pass.report.generation;
        let mut lane = 0;
        for brick in &mut self.bricks {
            if brick.is_encoder() {
                lane += 1;
                continue;
            }
            let id = brick.id();
            let due = (pass.changed.contains(&lane) && Some(id) != origin)
                || pass.forced.contains(&id);
            if !due {
                continue;
            }
            brick.request_render(generation);
            if let Some(job) = RenderJob::for_brick(brick, self.lanes[lane].clone(), generation) {
                pass.report.renders.push(job);
            }
        }

        let report = pass.report;
        PropagationCompleted {
            generation,
            visited: report.visited.len(),
            broken: report.broken.len(),
            renders: report.renders.len(),
        }
        .log();
        report
    }
}
