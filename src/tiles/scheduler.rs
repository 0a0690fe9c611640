//! Tile range computation and load queueing.
//!
//! A pass works in the map's raw (container-centered) frame: the tile range
//! must cover the whole container, not just the active region, since panels
//! over the map still show map underneath.

use crate::core::bounds::Bounds;
use crate::core::config::TileLayerOptions;
use crate::core::geo::{Point, TileCoord};
use crate::events::MapEvent;
use crate::traits::{MapSurface, TileGrid};
use crate::{MapError, Result};

#[cfg(feature = "debug")]
use log;

/// Result of a tile pass
#[derive(Debug, Clone, PartialEq)]
pub enum TileUpdate {
    /// Tiles handed to the grid, nearest to the range center first
    Queued(Vec<TileCoord>),
    /// Every visible tile is already resident
    Idle,
    /// The map zoom moved more than one level away from the tile zoom. The
    /// new tile zoom is recorded; rebuild levels and run another pass.
    ResetRequired { tile_zoom: u8 },
    /// The map zoom is outside the layer's zoom range
    OutOfRange,
}

/// Tracks the tile zoom and loading state of one tile layer
#[derive(Debug, Default, Clone)]
pub struct TileScheduler {
    tile_zoom: Option<u8>,
    loading: bool,
}

impl TileScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_zoom(&self) -> Option<u8> {
        self.tile_zoom
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Tile zoom for a map zoom, or `None` outside the layer's range
    pub fn tile_zoom_for(options: &TileLayerOptions, zoom: f64) -> Option<u8> {
        let rounded = zoom.round();
        if !rounded.is_finite()
            || rounded < options.min_zoom as f64
            || rounded > options.max_zoom as f64
        {
            return None;
        }
        Some(rounded as u8)
    }

    /// Pixel bounds at the tile zoom covering the container
    pub fn tiled_pixel_bounds<M: MapSurface + ?Sized>(map: &M, tile_zoom: u8) -> Bounds {
        let tile_zoom = tile_zoom as f64;
        let scale = map.zoom_scale(map.zoom(), tile_zoom);
        let pixel_center = map.project(&map.center(), tile_zoom).floor();
        let half_size = map.size().divide(scale * 2.0);

        Bounds::new(
            pixel_center.subtract(&half_size),
            pixel_center.add(&half_size),
        )
    }

    /// Inclusive tile index range covering `bounds`
    pub fn pixel_bounds_to_tile_range(bounds: &Bounds, tile_size: f64) -> Bounds {
        Bounds::new(
            bounds.min.divide(tile_size).floor(),
            bounds.max.divide(tile_size).ceil().subtract(&Point::new(1.0, 1.0)),
        )
    }

    /// Runs a pass at `round(map zoom)` whatever the recorded tile zoom,
    /// so a jump of several levels does not ask for a reset
    pub fn reset_view<M, G>(&mut self, map: &M, grid: &mut G) -> Result<TileUpdate>
    where
        M: MapSurface + ?Sized,
        G: TileGrid + ?Sized,
    {
        let previous = self.tile_zoom.take();
        let result = self.update(map, grid);
        if result.is_err() {
            self.tile_zoom = previous;
        }
        result
    }

    /// One tile pass: flags stale tiles and queues the missing visible ones.
    ///
    /// The tile zoom follows `round(map zoom)`. When the map zoom is more than
    /// one level away from the recorded tile zoom, the pass only flags stale
    /// tiles and asks for a reset. Fails without touching the scheduler or
    /// the grid when the computed range is not finite.
    pub fn update<M, G>(&mut self, map: &M, grid: &mut G) -> Result<TileUpdate>
    where
        M: MapSurface + ?Sized,
        G: TileGrid + ?Sized,
    {
        let zoom = map.zoom();
        let Some(target) = Self::tile_zoom_for(grid.options(), zoom) else {
            self.tile_zoom = None;
            return Ok(TileUpdate::OutOfRange);
        };

        let tile_zoom = match self.tile_zoom {
            Some(current) if (zoom - current as f64).abs() > 1.0 => current,
            _ => target,
        };

        let tile_size = grid.options().tile_size as f64;
        let keep_buffer = grid.options().keep_buffer as f64;

        let pixel_bounds = Self::tiled_pixel_bounds(map, tile_zoom);
        let tile_range = Self::pixel_bounds_to_tile_range(&pixel_bounds, tile_size);
        let tile_center = tile_range.center();
        let keep_range = tile_range.expanded(keep_buffer);

        if !tile_range.is_finite() {
            return Err(MapError::UnboundedTileRequest {
                min: tile_range.min,
                max: tile_range.max,
            });
        }

        #[cfg(feature = "debug")]
        if self.tile_zoom.is_some_and(|current| current != tile_zoom) {
            log::debug!("tile zoom follows map zoom {:.2} to {}", zoom, tile_zoom);
        }

        for coords in grid.resident() {
            if coords.z != tile_zoom || !keep_range.contains(&coords.as_point()) {
                grid.set_current(&coords, false);
            }
        }

        if tile_zoom != target {
            #[cfg(feature = "debug")]
            log::debug!(
                "tile zoom {} too far from map zoom {:.2}, resetting to {}",
                tile_zoom,
                zoom,
                target
            );

            self.tile_zoom = Some(target);
            return Ok(TileUpdate::ResetRequired { tile_zoom: target });
        }
        self.tile_zoom = Some(tile_zoom);

        let mut queue = Vec::new();
        for y in tile_range.min.y as i32..=tile_range.max.y as i32 {
            for x in tile_range.min.x as i32..=tile_range.max.x as i32 {
                let coords = TileCoord::new(x, y, tile_zoom);
                if !grid.is_valid_tile(&coords) {
                    continue;
                }

                if grid.is_resident(&coords) {
                    grid.set_current(&coords, true);
                } else {
                    queue.push(coords);
                }
            }
        }

        // Stable, so equidistant tiles keep row-major order
        queue.sort_by(|a, b| {
            a.as_point()
                .distance_to(&tile_center)
                .total_cmp(&b.as_point().distance_to(&tile_center))
        });

        if queue.is_empty() {
            return Ok(TileUpdate::Idle);
        }

        if !self.loading {
            self.loading = true;
            grid.fire(MapEvent::Loading);
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "queued {} tiles at zoom {} around ({:.1}, {:.1})",
            queue.len(),
            tile_zoom,
            tile_center.x,
            tile_center.y
        );

        grid.add_tiles(queue.clone());
        Ok(TileUpdate::Queued(queue))
    }

    /// Called by the host once every queued tile has resolved
    pub fn on_tiles_loaded<G: TileGrid + ?Sized>(&mut self, grid: &mut G) {
        self.loading = false;
        grid.fire(MapEvent::Load);
    }
}
