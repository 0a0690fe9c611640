//! Viewport-aware navigation over a map host.
//!
//! `ActiveArea` wraps a `MapSurface` and re-expresses centering, zooming and
//! fitting relative to the configured active region. Without a region every
//! operation falls through to the host's own container-centered behavior.

use crate::animation::{FlyToAnimator, FrameOutcome, QueuedFrames};
use crate::core::bounds::Bounds;
use crate::core::config::AreaOptions;
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::region::{ActiveRegion, RegionStyle};
use crate::events::MapEvent;
use crate::tiles::{TileScheduler, TileUpdate};
use crate::traits::{FrameScheduler, FrameToken, MapSurface, TileGrid, ViewOptions};
use crate::ui::popup::{PanAdjuster, PopupBox};
use crate::Result;

#[cfg(feature = "debug")]
use log;

/// The fixed point of `set_zoom_around`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomAnchor {
    /// Container pixel coordinates
    Point(Point),
    LatLng(LatLng),
}

impl From<Point> for ZoomAnchor {
    fn from(point: Point) -> Self {
        ZoomAnchor::Point(point)
    }
}

impl From<LatLng> for ZoomAnchor {
    fn from(lat_lng: LatLng) -> Self {
        ZoomAnchor::LatLng(lat_lng)
    }
}

/// A map host with an optional active region
#[derive(Debug)]
pub struct ActiveArea<M, S> {
    map: M,
    scheduler: S,
    region: Option<ActiveRegion>,
    options: AreaOptions,
    animator: FlyToAnimator,
}

impl<M: MapSurface, S: FrameScheduler> ActiveArea<M, S> {
    pub fn new(map: M, scheduler: S, options: AreaOptions) -> Self {
        Self {
            map,
            scheduler,
            region: None,
            options,
            animator: FlyToAnimator::new(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Direct access to the host. Changes made here bypass the region.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn options(&self) -> &AreaOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut AreaOptions {
        &mut self.options
    }

    pub fn region(&self) -> Option<&ActiveRegion> {
        self.region.as_ref()
    }

    pub fn animator(&self) -> &FlyToAnimator {
        &self.animator
    }

    pub fn into_parts(self) -> (M, S) {
        (self.map, self.scheduler)
    }

    /// Installs or restyles the active region.
    ///
    /// Fields set in `style` replace those of an existing region. With
    /// `keep_center`, the point at the visual center before the change is put
    /// back at the center of the new region.
    pub fn configure_active_region(&mut self, style: RegionStyle, keep_center: bool, animate: bool) {
        let center = (keep_center && self.map.is_loaded()).then(|| self.get_center(false));

        match self.region.as_mut() {
            Some(region) => region.restyle(style),
            None => self.region = Some(ActiveRegion::new(style)),
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "active region configured: {:?} in container {:?}",
            self.get_viewport_rect(),
            self.map.size()
        );

        self.map.fire(MapEvent::ActiveAreaChange);

        if let Some(center) = center {
            let zoom = self.map.zoom();
            self.set_view(center, Some(zoom), &ViewOptions::animated(animate));
        }
    }

    /// Removes the active region; the host's own behavior applies again
    pub fn clear_active_region(&mut self) {
        if self.region.take().is_some() {
            #[cfg(feature = "debug")]
            log::debug!("active region cleared");

            self.map.fire(MapEvent::ActiveAreaChange);
        }
    }

    /// Active region in container pixels
    pub fn get_viewport_rect(&self) -> Option<Bounds> {
        self.region
            .as_ref()
            .map(|region| region.resolve(self.map.size()))
    }

    /// Active region, or the whole container when none is configured
    pub(crate) fn viewport_or_container(&self) -> Bounds {
        self.get_viewport_rect()
            .unwrap_or_else(|| Bounds::from_origin_and_size(Point::zero(), self.map.size()))
    }

    /// Geographic bounds covered by the active region
    pub fn get_viewport_geo_bounds(&self) -> Option<LatLngBounds> {
        self.get_viewport_rect().map(|rect| {
            LatLngBounds::from_corners(
                self.map.container_point_to_lat_lng(&rect.min),
                self.map.container_point_to_lat_lng(&rect.max),
            )
        })
    }

    /// Container center minus region center
    pub fn get_offset(&self) -> Option<Point> {
        self.get_viewport_rect()
            .map(|rect| self.map.size().divide(2.0).subtract(&rect.center()))
    }

    /// Geographic point at the center of the active region, or the host's
    /// raw center when `without_viewport` is set or no region exists
    pub fn get_center(&self, without_viewport: bool) -> LatLng {
        let center = self.map.center();
        if without_viewport {
            return center;
        }

        match self.get_offset() {
            Some(offset) => {
                let zoom = self.map.zoom();
                let point = self.map.project(&center, zoom).subtract(&offset);
                self.map.unproject(&point, zoom)
            }
            None => center,
        }
    }

    /// Geographic bounds of what the user actually sees
    pub fn get_bounds(&self) -> LatLngBounds {
        if let Some(bounds) = self.get_viewport_geo_bounds() {
            return bounds;
        }

        let zoom = self.map.zoom();
        let half = self.map.size().divide(2.0);
        let center = self.map.project(&self.map.center(), zoom);
        LatLngBounds::from_corners(
            self.map.unproject(&center.subtract(&half), zoom),
            self.map.unproject(&center.add(&half), zoom),
        )
    }

    /// Puts `center` at the center of the active region. `None` keeps the
    /// current zoom; otherwise the zoom is clamped to the host's limits.
    pub fn set_view(&mut self, center: LatLng, zoom: Option<f64>, options: &ViewOptions) {
        self.animator.stop();

        let zoom = match zoom {
            Some(zoom) => self.map.limit_zoom(zoom),
            None => self.map.zoom(),
        };
        let center = self.with_offset(center, zoom);
        self.map.set_view(center, zoom, options);
    }

    /// Raw host center that shows `center` at the region center at `zoom`
    fn with_offset(&self, center: LatLng, zoom: f64) -> LatLng {
        match self.get_offset() {
            Some(offset) => {
                let point = self.map.project(&center, zoom).add(&offset);
                self.map.unproject(&point, zoom)
            }
            None => center,
        }
    }

    /// Animated zoom-and-pan to `target`, centered in the active region.
    ///
    /// Jumps instead when animation is disabled, unsupported by the host, or
    /// the trajectory has no positive duration. Returns the outcome of the
    /// first frame.
    pub fn fly_to(&mut self, target: LatLng, zoom: Option<f64>, options: &ViewOptions) -> FrameOutcome {
        let target_zoom = self.map.limit_zoom(zoom.unwrap_or_else(|| self.map.zoom()));

        if options.animate == Some(false) || !self.map.any3d() {
            return self.jump_to(target, target_zoom, options);
        }

        let adjusted = self.with_offset(target, target_zoom);
        let size = self.viewport_or_container().size();
        let plan = self.animator.plan(
            &self.map,
            self.scheduler.now_ms(),
            adjusted,
            target_zoom,
            size.x.max(size.y),
            options.duration,
        );

        match plan {
            Some(state) => {
                self.map.stop_pan();
                self.animator
                    .start(&mut self.map, &mut self.scheduler, state, options.no_move_start)
            }
            None => self.jump_to(target, target_zoom, options),
        }
    }

    fn jump_to(&mut self, target: LatLng, zoom: f64, options: &ViewOptions) -> FrameOutcome {
        self.set_view(target, Some(zoom), options);
        FrameOutcome::Finished {
            center: self.map.center(),
            zoom: self.map.zoom(),
        }
    }

    /// Host callback for a frame requested through the scheduler
    pub fn on_animation_frame(&mut self, token: FrameToken) -> FrameOutcome {
        self.animator.frame(&mut self.map, &mut self.scheduler, token)
    }

    /// Cancels a running fly-to; frames already requested become stale
    pub fn stop(&mut self) {
        self.animator.stop();
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Zooms keeping the geographic point under `anchor` fixed on screen
    pub fn set_zoom_around(&mut self, anchor: impl Into<ZoomAnchor>, zoom: f64, options: &ViewOptions) {
        let anchor = match anchor.into() {
            ZoomAnchor::Point(point) => point,
            ZoomAnchor::LatLng(lat_lng) => self.map.lat_lng_to_container_point(&lat_lng),
        };

        match self.get_viewport_rect() {
            Some(rect) => {
                let scale = self.map.zoom_scale(zoom, self.map.zoom());
                let view_half = rect.center();
                let center_offset = anchor.subtract(&view_half).multiply(1.0 - 1.0 / scale);
                let new_center = self
                    .map
                    .container_point_to_lat_lng(&view_half.add(&center_offset));
                self.set_view(new_center, Some(zoom), options);
            }
            None => {
                self.animator.stop();
                self.map.set_zoom_around(anchor, zoom, options);
            }
        }
    }

    /// Zoom at which `bounds` fits the active region less `padding`.
    ///
    /// With `inside` the bounds cover the region instead of fitting in it.
    /// The result is snapped to `zoom_snap` (or to integers when the host
    /// cannot render fractional zooms) and clamped to the host's limits.
    pub fn get_bounds_zoom(&self, bounds: &LatLngBounds, inside: bool, padding: Point) -> f64 {
        let zoom = self.map.zoom();
        let zoom = if zoom.is_finite() { zoom } else { 0.0 };
        let min = self.map.min_zoom();
        let max = self.map.max_zoom();

        let size = self.viewport_or_container().size().subtract(&padding);
        let bounds_size = self
            .map
            .project(&bounds.south_east(), zoom)
            .subtract(&self.map.project(&bounds.north_west(), zoom));

        let snap = if self.map.any3d() {
            self.options.zoom_snap
        } else {
            1.0
        };

        let scale_x = size.x / bounds_size.x;
        let scale_y = size.y / bounds_size.y;
        let scale = if inside {
            scale_x.max(scale_y)
        } else {
            scale_x.min(scale_y)
        };

        let mut zoom = self.map.scale_zoom(scale, zoom);

        if snap != 0.0 {
            // Within 1% of a snap level counts as on it
            let fine = snap / 100.0;
            zoom = (zoom / fine).round() * fine;
            zoom = if inside {
                (zoom / snap).ceil() * snap
            } else {
                (zoom / snap).floor() * snap
            };
        }

        zoom.min(max).max(min)
    }

    /// Runs one tile pass for `grid` against the current view
    pub fn update_tiles<T: TileGrid + ?Sized>(
        &self,
        tiles: &mut TileScheduler,
        grid: &mut T,
    ) -> Result<TileUpdate> {
        tiles.update(&self.map, grid)
    }

    /// Pans so that `popup` lies inside the active region, honoring the
    /// configured autopan options. Returns the applied delta.
    pub fn adjust_pan(&mut self, popup: &PopupBox) -> Option<Point> {
        let viewport = self.viewport_or_container();
        PanAdjuster::new(&self.options.auto_pan).adjust(&mut self.map, &viewport, popup)
    }
}

impl<M: MapSurface, S: FrameScheduler + QueuedFrames> ActiveArea<M, S> {
    /// Delivers every frame queued on the scheduler
    pub fn pump_frames(&mut self) -> Vec<FrameOutcome> {
        let tokens = self.scheduler.take_pending();
        tokens
            .into_iter()
            .map(|token| self.on_animation_frame(token))
            .collect()
    }
}
