//! Configuration for viewport-aware navigation, tile scheduling and autopan
//!
//! Options can be built from presets (`AreaProfile`), tweaked field by field,
//! or loaded from JSON. Every field has a default, so partial JSON documents
//! are accepted.

use crate::core::constants::{
    DEFAULT_AUTO_PAN_PADDING, DEFAULT_KEEP_BUFFER, DEFAULT_ZOOM_SNAP, TILE_SIZE,
};
use crate::core::geo::{LatLngBounds, Point};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum AreaProfile {
    /// Integer zoom snapping, small keep buffer
    Balanced,
    /// Fractional zoom fitting and a wider keep buffer
    Smooth,
    /// Integer zooms, tiles evicted as soon as they leave the view
    Snappy,
    Custom(AreaOptions),
}

impl AreaProfile {
    pub fn resolve(&self) -> AreaOptions {
        match self {
            Self::Balanced => AreaOptions::default(),
            Self::Smooth => AreaOptions {
                zoom_snap: 0.25,
                tiles: TileLayerOptions {
                    keep_buffer: 4,
                    ..TileLayerOptions::default()
                },
                ..AreaOptions::default()
            },
            Self::Snappy => AreaOptions {
                zoom_snap: 1.0,
                tiles: TileLayerOptions {
                    keep_buffer: 0,
                    ..TileLayerOptions::default()
                },
                ..AreaOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for AreaProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

/// Options consumed by `ActiveArea`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOptions {
    /// Granularity used by `get_bounds_zoom`; `0` disables snapping
    pub zoom_snap: f64,
    pub tiles: TileLayerOptions,
    pub auto_pan: AutoPanOptions,
}

impl Default for AreaOptions {
    fn default() -> Self {
        Self {
            zoom_snap: DEFAULT_ZOOM_SNAP,
            tiles: TileLayerOptions::default(),
            auto_pan: AutoPanOptions::default(),
        }
    }
}

impl AreaOptions {
    /// Parses options from a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_zoom_snap(mut self, zoom_snap: f64) -> Self {
        self.zoom_snap = zoom_snap;
        self
    }

    pub fn with_keep_buffer(mut self, keep_buffer: u32) -> Self {
        self.tiles.keep_buffer = keep_buffer;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Tiles kept around the visible range before they are flagged stale
    pub keep_buffer: u32,
    /// Reject tiles outside the world's longitude range instead of wrapping
    pub no_wrap: bool,
    /// Only tiles intersecting these bounds are loaded
    pub bounds: Option<LatLngBounds>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: 0,
            max_zoom: 18,
            keep_buffer: DEFAULT_KEEP_BUFFER,
            no_wrap: false,
            bounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPanOptions {
    pub auto_pan: bool,
    pub padding: Point,
    /// Overrides `padding` for the top and left edges
    pub padding_top_left: Option<Point>,
    /// Overrides `padding` for the bottom and right edges
    pub padding_bottom_right: Option<Point>,
}

impl Default for AutoPanOptions {
    fn default() -> Self {
        Self {
            auto_pan: true,
            padding: Point::from(DEFAULT_AUTO_PAN_PADDING),
            padding_top_left: None,
            padding_bottom_right: None,
        }
    }
}

impl AutoPanOptions {
    pub fn top_left(&self) -> Point {
        self.padding_top_left.unwrap_or(self.padding)
    }

    pub fn bottom_right(&self) -> Point {
        self.padding_bottom_right.unwrap_or(self.padding)
    }
}
