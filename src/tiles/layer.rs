use crate::core::config::TileLayerOptions;
use crate::core::geo::TileCoord;
use crate::events::{EventQueue, MapEvent};
use crate::prelude::HashMap;
use crate::traits::TileGrid;

/// State of a resident tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileState {
    /// Inside the visible range or its keep buffer
    pub current: bool,
    pub loaded: bool,
}

/// Headless tile store: records what a pass asked for and tracks load
/// completion, without fetching anything
#[derive(Debug)]
pub struct TileLayer {
    options: TileLayerOptions,
    tiles: HashMap<TileCoord, TileState>,
    batches: Vec<Vec<TileCoord>>,
    events: EventQueue,
}

impl TileLayer {
    pub fn new(options: TileLayerOptions) -> Self {
        Self {
            options,
            tiles: HashMap::default(),
            batches: Vec::new(),
            events: EventQueue::new(),
        }
    }

    pub fn tile(&self, coords: &TileCoord) -> Option<&TileState> {
        self.tiles.get(coords)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Batches received through `add_tiles` since the last drain, oldest first
    pub fn batches(&self) -> &[Vec<TileCoord>] {
        &self.batches
    }

    /// Hands the undrained batches to the fetcher
    pub fn take_batches(&mut self) -> Vec<Vec<TileCoord>> {
        std::mem::take(&mut self.batches)
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn take_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    /// Number of resident tiles still waiting for data
    pub fn pending(&self) -> usize {
        self.tiles.values().filter(|tile| !tile.loaded).count()
    }

    /// Marks one tile loaded; returns `true` once nothing is pending
    pub fn mark_loaded(&mut self, coords: &TileCoord) -> bool {
        if let Some(tile) = self.tiles.get_mut(coords) {
            tile.loaded = true;
        }
        self.pending() == 0
    }

    pub fn complete_all(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.loaded = true;
        }
    }

    /// Removes tiles no longer flagged current and returns them, sorted
    pub fn prune(&mut self) -> Vec<TileCoord> {
        let mut removed: Vec<TileCoord> = self
            .tiles
            .iter()
            .filter(|(_, tile)| !tile.current)
            .map(|(coords, _)| *coords)
            .collect();
        removed.sort_by_key(|c| (c.z, c.y, c.x));

        for coords in &removed {
            self.tiles.remove(coords);
        }
        removed
    }

    /// Wraps the column index into the world, for fetching
    pub fn wrap_coords(&self, coords: &TileCoord) -> TileCoord {
        let n = coords.world_size();
        TileCoord::new(coords.x.rem_euclid(n), coords.y, coords.z)
    }
}

impl TileGrid for TileLayer {
    fn options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Rows outside the world are never valid; columns wrap unless
    /// `no_wrap` is set. With `bounds`, the tile must intersect them.
    fn is_valid_tile(&self, coords: &TileCoord) -> bool {
        let n = coords.world_size();
        if coords.y < 0 || coords.y >= n {
            return false;
        }
        if self.options.no_wrap && (coords.x < 0 || coords.x >= n) {
            return false;
        }

        match &self.options.bounds {
            Some(bounds) => bounds.intersects(&self.wrap_coords(coords).bounds()),
            None => true,
        }
    }

    fn resident(&self) -> Vec<TileCoord> {
        self.tiles.keys().copied().collect()
    }

    fn is_resident(&self, coords: &TileCoord) -> bool {
        self.tiles.contains_key(coords)
    }

    fn set_current(&mut self, coords: &TileCoord, current: bool) {
        if let Some(tile) = self.tiles.get_mut(coords) {
            tile.current = current;
        }
    }

    fn add_tiles(&mut self, batch: Vec<TileCoord>) {
        for coords in &batch {
            self.tiles.insert(
                *coords,
                TileState {
                    current: true,
                    loaded: false,
                },
            );
        }
        self.batches.push(batch);
    }

    fn fire(&mut self, event: MapEvent) {
        self.events.emit(event);
    }
}
