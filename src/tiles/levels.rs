//! Per-zoom tile containers.
//!
//! Each zoom that has tiles on screen gets a level with its own pixel origin
//! and a scale/translate transform mapping it onto the current view. Levels
//! are always placed against the map's raw center, never the active region's.

use crate::core::geo::{LatLng, Point, TileCoord};
use crate::prelude::{HashMap, HashSet};
use crate::traits::MapSurface;

#[cfg(feature = "debug")]
use log;

#[derive(Debug, Clone, PartialEq)]
pub struct TileLevel {
    pub zoom: u8,
    /// Projected pixel origin of the level at its own zoom
    pub origin: Point,
    /// `None` when the layer has no maximum zoom to stack against
    pub z_index: Option<i32>,
    pub scale: f64,
    pub translation: Point,
}

impl TileLevel {
    fn new(zoom: u8, origin: Point) -> Self {
        Self {
            zoom,
            origin,
            z_index: None,
            scale: 1.0,
            translation: Point::zero(),
        }
    }

    /// Positions the level for a view of `center` at `zoom`
    pub fn set_zoom_transform<M: MapSurface + ?Sized>(
        &mut self,
        map: &M,
        center: &LatLng,
        zoom: f64,
    ) {
        let scale = map.zoom_scale(zoom, self.zoom as f64);
        let pixel_origin = map
            .project(center, zoom)
            .subtract(&map.size().divide(2.0))
            .round();

        self.scale = scale;
        self.translation = self.origin.multiply(scale).subtract(&pixel_origin).round();
    }
}

/// What `update_levels` changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelUpdate {
    /// Levels removed because no resident tile was left at their zoom
    pub dropped: Vec<u8>,
    /// Level created for the tile zoom
    pub created: Option<u8>,
}

#[derive(Debug, Default)]
pub struct TileLevels {
    levels: HashMap<u8, TileLevel>,
    current: Option<u8>,
}

impl TileLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, zoom: u8) -> Option<&TileLevel> {
        self.levels.get(&zoom)
    }

    pub fn current(&self) -> Option<&TileLevel> {
        self.current.and_then(|zoom| self.levels.get(&zoom))
    }

    /// Level zooms, ascending
    pub fn zooms(&self) -> Vec<u8> {
        let mut zooms: Vec<u8> = self.levels.keys().copied().collect();
        zooms.sort_unstable();
        zooms
    }

    /// Brings the level set in line with `tile_zoom`.
    ///
    /// Levels that still hold a resident tile or match the tile zoom are kept
    /// and restacked; the others are dropped. The tile zoom's level is
    /// created if missing.
    pub fn update_levels<M: MapSurface + ?Sized>(
        &mut self,
        map: &M,
        resident: &[TileCoord],
        tile_zoom: Option<u8>,
        max_zoom: u8,
    ) -> LevelUpdate {
        let mut update = LevelUpdate::default();
        let Some(zoom) = tile_zoom else {
            return update;
        };

        let occupied: HashSet<u8> = resident.iter().map(|c| c.z).collect();

        for z in self.zooms() {
            if occupied.contains(&z) || z == zoom {
                if let Some(level) = self.levels.get_mut(&z) {
                    level.z_index = stack_index(max_zoom, zoom, z);
                }
            } else {
                self.levels.remove(&z);
                update.dropped.push(z);
            }
        }

        if !self.levels.contains_key(&zoom) {
            let origin = map
                .project(&map.unproject(&map.pixel_origin(), map.zoom()), zoom as f64)
                .round();
            let mut level = TileLevel::new(zoom, origin);
            level.z_index = (max_zoom > 0).then_some(max_zoom as i32);
            level.set_zoom_transform(map, &map.center(), map.zoom());

            #[cfg(feature = "debug")]
            log::debug!("created tile level {} at origin {:?}", zoom, level.origin);

            self.levels.insert(zoom, level);
            update.created = Some(zoom);
        }

        self.current = Some(zoom);
        update
    }

    /// Re-applies every level's transform for a view of the map's raw center
    pub fn set_zoom_transforms<M: MapSurface + ?Sized>(&mut self, map: &M) {
        let center = map.center();
        let zoom = map.zoom();
        for level in self.levels.values_mut() {
            level.set_zoom_transform(map, &center, zoom);
        }
    }
}

fn stack_index(max_zoom: u8, zoom: u8, level_zoom: u8) -> Option<i32> {
    (max_zoom > 0).then(|| max_zoom as i32 - (zoom as i32 - level_zoom as i32).abs())
}
