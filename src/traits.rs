//! Capability traits a map host implements so viewport-aware navigation can
//! drive it.
//!
//! The host owns the map state, the frame loop and the tile store. The
//! traits below are the narrow slices of that state `ActiveArea`,
//! `FlyToAnimator` and `TileScheduler` need; the provided methods are the
//! host's default (container-centered) behavior.

use crate::{
    core::{
        config::TileLayerOptions,
        geo::{LatLng, Point, TileCoord},
    },
    events::MapEvent,
};
use serde::{Deserialize, Serialize};

/// Options shared by `set_view`, `fly_to` and `set_zoom_around`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// `Some(false)` forces an immediate jump
    pub animate: Option<bool>,
    /// Fly-to duration in seconds; derived from the path length when absent
    pub duration: Option<f64>,
    /// Suppress the move-start event when an animation begins
    pub no_move_start: bool,
}

impl ViewOptions {
    pub fn animated(animate: bool) -> Self {
        Self {
            animate: Some(animate),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// Projection, zoom and positioning capabilities of a map host
pub trait MapSurface {
    /// Geographic to projected pixel coordinates at `zoom`
    fn project(&self, lat_lng: &LatLng, zoom: f64) -> Point;

    /// Projected pixel coordinates at `zoom` back to geographic
    fn unproject(&self, point: &Point, zoom: f64) -> LatLng;

    fn zoom(&self) -> f64;

    fn min_zoom(&self) -> f64;

    fn max_zoom(&self) -> f64;

    /// Container size in pixels
    fn size(&self) -> Point;

    /// Geographic point at the container center
    fn center(&self) -> LatLng;

    /// Projected pixel position of the container's top-left corner
    fn pixel_origin(&self) -> Point;

    /// Whether the map has been given an initial view
    fn is_loaded(&self) -> bool {
        true
    }

    /// Whether the environment can render smooth (fractional) animations
    fn any3d(&self) -> bool {
        true
    }

    fn limit_zoom(&self, zoom: f64) -> f64 {
        zoom.min(self.max_zoom()).max(self.min_zoom())
    }

    /// Scale factor between two zoom levels
    fn zoom_scale(&self, to_zoom: f64, from_zoom: f64) -> f64 {
        2_f64.powf(to_zoom - from_zoom)
    }

    /// Zoom level reached by scaling `from_zoom` by `scale`
    fn scale_zoom(&self, scale: f64, from_zoom: f64) -> f64 {
        let zoom = from_zoom + scale.log2();
        if zoom.is_nan() {
            f64::INFINITY
        } else {
            zoom
        }
    }

    fn container_point_to_lat_lng(&self, point: &Point) -> LatLng {
        self.unproject(&point.add(&self.pixel_origin()), self.zoom())
    }

    fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng, self.zoom())
            .subtract(&self.pixel_origin())
    }

    /// Positions the container center on `center` at `zoom`
    fn set_view(&mut self, center: LatLng, zoom: f64, options: &ViewOptions);

    /// Zooms keeping the geographic point under `anchor` (container pixels)
    /// fixed, scaling around the container center
    fn set_zoom_around(&mut self, anchor: Point, zoom: f64, options: &ViewOptions) {
        let scale = self.zoom_scale(zoom, self.zoom());
        let view_half = self.size().divide(2.0);
        let center_offset = anchor.subtract(&view_half).multiply(1.0 - 1.0 / scale);
        let new_center = self.container_point_to_lat_lng(&view_half.add(&center_offset));
        self.set_view(new_center, zoom, options);
    }

    /// Moves without animation bookkeeping; fires `move`
    fn move_to(&mut self, center: LatLng, zoom: f64, fly_to: bool);

    fn move_start(&mut self, zoom_changed: bool, no_move_start: bool);

    fn move_end(&mut self, zoom_changed: bool);

    /// Pans the view by a container pixel offset
    fn pan_by(&mut self, offset: Point);

    /// Stops any pan animation the host is running
    fn stop_pan(&mut self) {}

    fn fire(&mut self, event: MapEvent);
}

/// Identifies the trajectory a requested frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    pub epoch: u64,
}

/// Animation tick source of the host
pub trait FrameScheduler {
    /// Monotonic time in milliseconds
    fn now_ms(&self) -> f64;

    /// Asks the host to call back on its next animation tick with `token`
    fn request_frame(&mut self, token: FrameToken);
}

/// Resident tile store of a tile layer
pub trait TileGrid {
    fn options(&self) -> &TileLayerOptions;

    /// Wrap-around and bounds policy for tile coordinates
    fn is_valid_tile(&self, coords: &TileCoord) -> bool;

    /// Coordinates of every resident tile
    fn resident(&self) -> Vec<TileCoord>;

    fn is_resident(&self, coords: &TileCoord) -> bool;

    /// Marks a resident tile as current or stale
    fn set_current(&mut self, coords: &TileCoord, current: bool);

    /// Receives newly queued tiles as one batch, nearest first
    fn add_tiles(&mut self, batch: Vec<TileCoord>);

    fn fire(&mut self, event: MapEvent);
}

/// Linear interpolation
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(2.0_f64.lerp(&4.0, 0.5), 3.0);
        assert_eq!(
            Point::new(0.0, 10.0).lerp(&Point::new(10.0, 0.0), 0.25),
            Point::new(2.5, 7.5)
        );
    }

    #[test]
    fn test_view_options_builders() {
        let options = ViewOptions::animated(false).with_duration(2.0);
        assert_eq!(options.animate, Some(false));
        assert_eq!(options.duration, Some(2.0));
        assert!(!options.no_move_start);
    }
}
