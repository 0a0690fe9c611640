//! # active-area
//!
//! Viewport-aware navigation for a map surface.
//!
//! A map container often hosts panels or toolbars that cover part of it. This
//! library lets a host designate an active sub-rectangle of the container and
//! makes centering, zoom-around-point, bounds fitting, animated fly-to, tile
//! loading and popup autopan all operate relative to it.
//!
//! The host implements the capability traits in [`traits`]; a headless
//! implementation ([`Viewport`], [`TileLayer`]) ships with the crate.

pub mod animation;
pub mod area;
pub mod core;
pub mod events;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod tiles;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use area::{ActiveArea, ZoomAnchor};

pub use crate::core::{
    bounds::Bounds,
    config::{AreaOptions, AreaProfile, AutoPanOptions, TileLayerOptions},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    region::{ActiveRegion, Length, RegionStyle},
    viewport::Viewport,
};

pub use animation::{FlyToAnimator, FlyToCurve, FrameOutcome, InstantScheduler, ManualScheduler};

pub use events::{EventQueue, MapEvent};

pub use tiles::{TileLayer, TileScheduler, TileUpdate};

pub use traits::{FrameScheduler, FrameToken, MapSurface, TileGrid, ViewOptions};

pub use ui::popup::{PanAdjuster, PopupBox};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Attempted to load an unbounded number of tiles: range {min:?} to {max:?}")]
    UnboundedTileRequest { min: Point, max: Point },

    #[error("Invalid active region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
