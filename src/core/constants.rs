//! Defaults shared by navigation, tile scheduling and autopan.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Snap zoom levels to these quanta (1 → integer zooms).
pub const DEFAULT_ZOOM_SNAP: f64 = 1.0;

/// Tiles kept around the visible range before they count as stale.
pub const DEFAULT_KEEP_BUFFER: u32 = 2;

/// Default padding between an autopanned popup and the viewport edge.
pub const DEFAULT_AUTO_PAN_PADDING: (f64, f64) = (5.0, 5.0);

/// Curvature of the fly-to zoom-and-pan path.
pub const FLY_TO_RHO: f64 = 1.42;

/// Milliseconds of animation per unit of fly-to path length.
pub const FLY_TO_MS_PER_UNIT: f64 = 800.0;

/// Below this the path parameter's log argument is treated as zero.
pub const FLY_TO_MIN_LOG_ARG: f64 = 1e-9;

/// Value used in place of `ln(0)` so the path length stays finite.
pub const FLY_TO_LOG_FLOOR: f64 = -18.0;
