// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::brick::Brick;
use crate::bricks::BrickFactory;
use crate::config::{BrickConfig, PipeConfig};
use crate::errors::{ConfigurationError, InvalidInputError, PipeError};
use crate::observability::messages::{config::ContentReplayFailed, StructuredLog};
use crate::pipe::Pipe;

/// Pipe builder - turns a serialized pipe back into a live one.
///
/// Each identifier is resolved through the registry and its settings are
/// applied over the brick's defaults. Stored viewer content is then replayed
/// as an edit, and every viewer is rendered, so the returned pipe is ready to
/// display. Content its viewer cannot parse does not fail the build; that
/// viewer is left broken with the parse error.
///
/// # Examples
///
/// ```
/// use the_brickyard::bricks::BrickFactory;
/// use the_brickyard::config::{ConfigFormat, PipeBuilder, PipeConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PipeConfig::parse(
///     "items: [{brickIdentifier: text, content: hi}, {brickIdentifier: rot13}]",
///     ConfigFormat::Yaml,
/// )?;
/// let factory = BrickFactory::with_builtin_bricks()?;
/// let pipe = PipeBuilder::from_config(&config, &factory).await?;
///
/// assert_eq!(pipe.output().string()?, "uv");
/// # Ok(())
/// # }
/// ```
pub struct PipeBuilder;

impl PipeBuilder {
    /// Builds and renders a pipe from its serialized form.
    pub async fn from_config(
        cfg: &PipeConfig,
        factory: &BrickFactory,
    ) -> Result<Pipe, ConfigurationError> {
        let bricks = cfg
            .items
            .iter()
            .map(|item| Self::brick_from_config(item, factory))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pipe = Pipe::new();
        for brick in bricks {
            pipe.push_brick(brick).await?;
        }

        // Only the last stored content matters, it becomes the source lane
        let replay = cfg
            .items
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, item)| item.content.as_deref().map(|text| (index, text)));
        let mut rejected = None;
        if let Some((index, text)) = replay {
            if let Err(err) = pipe.edit_viewer(index, text).await {
                ContentReplayFailed {
                    brick: &cfg.items[index].brick_identifier,
                    index,
                    error: &err,
                }
                .log();
                if let PipeError::Edit { index, source } = err {
                    rejected = Some((index, source));
                }
            }
        }

        let report = pipe.refresh().await;
        pipe.render_all(&report).await;

        // The render above clears the status, the replay error stays visible
        if let Some((index, error)) = rejected {
            if let Some(brick) = pipe.brick_mut(index) {
                brick.mark_broken(error);
            }
        }
        Ok(pipe)
    }

    /// Creates one brick and applies its stored settings.
    pub fn brick_from_config(
        item: &BrickConfig,
        factory: &BrickFactory,
    ) -> Result<Brick, ConfigurationError> {
        let identifier = &item.brick_identifier;
        let mut brick = factory.create(identifier)?;

        if let Some(field) = item
            .settings_values
            .keys()
            .find(|name| brick.settings().field(name).is_none())
        {
            return Err(ConfigurationError::UnknownSetting {
                brick: identifier.clone(),
                field: field.clone(),
            });
        }

        brick
            .apply_settings(&item.settings_values)
            .map_err(|source| ConfigurationError::InvalidSetting {
                brick: identifier.clone(),
                source,
            })?;

        if item.reversed && !brick.set_reversed(true) {
            return Err(ConfigurationError::InvalidSetting {
                brick: identifier.clone(),
                source: InvalidInputError::new("reversed", "only encoders can be reversed"),
            });
        }

        if item.content.is_some() && !brick.is_viewer() {
            return Err(ConfigurationError::InvalidSetting {
                brick: identifier.clone(),
                source: InvalidInputError::new("content", "only viewers hold content"),
            });
        }

        Ok(brick)
    }
}
