//! Prelude module for common active-area types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use active_area::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{AreaOptions, AreaProfile, AutoPanOptions, TileLayerOptions},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    region::{ActiveRegion, Length, RegionStyle},
    viewport::Viewport,
};

pub use crate::area::{ActiveArea, ZoomAnchor};

pub use crate::animation::{
    FlyToAnimator, FrameOutcome, InstantScheduler, ManualScheduler, QueuedFrames,
};

pub use crate::events::{EventQueue, MapEvent};

pub use crate::tiles::{
    levels::{TileLevel, TileLevels},
    TileLayer, TileScheduler, TileUpdate,
};

pub use crate::traits::{FrameScheduler, FrameToken, Lerp, MapSurface, TileGrid, ViewOptions};

pub use crate::ui::popup::{PanAdjuster, PopupBox};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::run_frames;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
