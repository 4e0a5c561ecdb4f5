// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use isoscape_geom::{RealPoint, SlopeGeometry, TileMetrics, VirtualPoint, to_real};
use isoscape_index::{GridLayout, MapCorners, SpatialIndex};
use isoscape_map::{HeightPolicy, Map, TileFactory};
use isoscape_render::{Renderer, SpriteList};
use isoscape_scene::{DrawOrder, SceneComposer};

use crate::{Collaborator, ConfigError, Engine, EngineConfig};

/// Assembles an [`Engine`] from its configuration and collaborators.
///
/// `D` is the tile payload, `U` the scene object data, `R` the renderer and
/// `P` the height policy. Every collaborator must be supplied before
/// [`build`](Self::build).
pub struct EngineBuilder<D, U, R, P> {
    config: EngineConfig,
    renderer: Option<R>,
    policy: Option<P>,
    factory: Option<Box<dyn TileFactory<D>>>,
    sprite_order: Option<Box<dyn DrawOrder<U>>>,
    text_order: Option<Box<dyn DrawOrder<U>>>,
}

impl<D, U, R, P> core::fmt::Debug for EngineBuilder<D, U, R, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("renderer", &self.renderer.is_some())
            .field("policy", &self.policy.is_some())
            .field("factory", &self.factory.is_some())
            .field("sprite_order", &self.sprite_order.is_some())
            .field("text_order", &self.text_order.is_some())
            .finish()
    }
}

impl<D, U, R, P> EngineBuilder<D, U, R, P>
where
    D: Default,
    R: Renderer<D, U>,
    P: HeightPolicy<D>,
{
    /// Starts a builder with `config` and no collaborators.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            renderer: None,
            policy: None,
            factory: None,
            sprite_order: None,
            text_order: None,
        }
    }

    /// Sets the renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sets the height policy.
    #[must_use]
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the factory the map's tiles are built with.
    #[must_use]
    pub fn tile_factory(mut self, factory: impl TileFactory<D> + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets the draw order of sprite objects.
    #[must_use]
    pub fn sprite_order(mut self, order: impl DrawOrder<U> + 'static) -> Self {
        self.sprite_order = Some(Box::new(order));
        self
    }

    /// Sets the draw order of text objects.
    #[must_use]
    pub fn text_order(mut self, order: impl DrawOrder<U> + 'static) -> Self {
        self.text_order = Some(Box::new(order));
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// The map starts flat, and the viewport is centered on the map's north
    /// corner.
    pub fn build(self) -> Result<Engine<D, U, R, P>, ConfigError> {
        let config = self.config;
        config.validate()?;
        let missing = ConfigError::MissingCollaborator;
        let renderer = self.renderer.ok_or(missing(Collaborator::Renderer))?;
        let policy = self.policy.ok_or(missing(Collaborator::HeightPolicy))?;
        let mut factory = self.factory.ok_or(missing(Collaborator::TileFactory))?;
        let sprite_order = self
            .sprite_order
            .ok_or(missing(Collaborator::SpriteOrder))?;
        let text_order = self.text_order.ok_or(missing(Collaborator::TextOrder))?;

        let metrics = TileMetrics::new(config.tile_width, config.tile_height, config.slope_height);
        let unit = metrics.unit();
        let map = Map::new(
            config.map_width,
            config.map_height,
            config.max_height,
            &mut *factory,
        );
        let corners = MapCorners::for_map(
            unit,
            config.max_height,
            config.map_width,
            config.map_height,
        );
        let layout = GridLayout::new(&corners, config.viewport_width, config.viewport_height);

        let start = config.max_height * unit;
        let center = VirtualPoint::ground(start, start);
        let half = RealPoint::new(config.viewport_width / 2, config.viewport_height / 2);
        let offset = to_real(center) - half;

        tracing::debug!(
            columns = map.columns(),
            rows = map.rows(),
            cells = layout.cell_count(),
            "engine built"
        );

        Ok(Engine {
            scene: SceneComposer::new(config.sprite_capacity, config.text_capacity),
            tile_sprites: SpriteList::with_capacity(config.sprites_per_tile),
            geometry: SlopeGeometry::new(metrics),
            index: SpatialIndex::new(layout),
            metrics,
            map,
            renderer,
            policy,
            sprite_order,
            text_order,
            center,
            offset,
            config,
        })
    }
}
