use crate::core::geo::{LatLng, LatLngBounds, Point, EARTH_RADIUS};
use crate::events::{EventQueue, MapEvent};
use crate::traits::{MapSurface, ViewOptions};
use std::f64::consts::PI;

/// Headless map state: center, zoom and container dimensions.
///
/// This is the default, container-centered host. It knows nothing about
/// active regions; wrap it in an `ActiveArea` for viewport-aware behavior.
#[derive(Debug)]
pub struct Viewport {
    /// The center of the container in geographical coordinates
    center: LatLng,
    /// The current zoom level
    zoom: f64,
    /// The size of the container in pixels
    size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Projected position of the container's top-left corner
    pixel_origin: Point,
    /// Whether an initial view has been set
    loaded: bool,
    /// Whether smooth fractional animation is available
    any3d: bool,
    events: EventQueue,
}

impl Viewport {
    /// Creates a viewport that is already showing `center` at `zoom`
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self::unloaded(size);
        viewport.reset(center, zoom);
        viewport.loaded = true;
        viewport
    }

    /// Creates a viewport without an initial view
    pub fn unloaded(size: Point) -> Self {
        Self {
            center: LatLng::default(),
            zoom: 0.0,
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            pixel_origin: Point::zero(),
            loaded: false,
            any3d: true,
            events: EventQueue::new(),
        }
    }

    /// Sets the zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.limit_zoom(self.zoom);
        self.update_pixel_origin();
        self
    }

    /// Simulates an environment without smooth animation support
    pub fn with_any3d(mut self, any3d: bool) -> Self {
        self.any3d = any3d;
        self
    }

    /// Resizes the container, keeping the center
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Drains emitted events
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    /// Gets the current container bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.container_point_to_lat_lng(&Point::zero());
        let se = self.container_point_to_lat_lng(&self.size);
        LatLngBounds::from_corners(nw, se)
    }

    fn reset(&mut self, center: LatLng, zoom: f64) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), center.lng);
        self.zoom = zoom;
        self.update_pixel_origin();
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = self
            .project(&self.center, self.zoom)
            .subtract(&self.size.divide(2.0));
    }
}

impl MapSurface for Viewport {
    /// Spherical Web Mercator (EPSG:3857) scaled to 256 px tiles
    fn project(&self, lat_lng: &LatLng, zoom: f64) -> Point {
        let scale = 256.0 * 2_f64.powf(zoom);
        let lat = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + lat / 2.0).tan().ln() * EARTH_RADIUS;

        let half_world = PI * EARTH_RADIUS;
        Point::new(
            (x + half_world) / (2.0 * half_world) * scale,
            (half_world - y) / (2.0 * half_world) * scale,
        )
    }

    fn unproject(&self, pixel: &Point, zoom: f64) -> LatLng {
        let scale = 256.0 * 2_f64.powf(zoom);
        let half_world = PI * EARTH_RADIUS;

        let x = pixel.x / scale * (2.0 * half_world) - half_world;
        let y = half_world - pixel.y / scale * (2.0 * half_world);

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn size(&self) -> Point {
        self.size
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn any3d(&self) -> bool {
        self.any3d
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, _options: &ViewOptions) {
        let zoom = self.limit_zoom(zoom);
        let zoom_changed = !self.loaded || zoom != self.zoom;

        self.reset(center, zoom);
        self.loaded = true;

        self.events.emit(MapEvent::MoveStart { zoom_changed });
        self.events.emit(MapEvent::Move {
            center: self.center,
            zoom: self.zoom,
            fly_to: false,
        });
        self.events.emit(MapEvent::MoveEnd {
            center: self.center,
            zoom_changed,
        });
    }

    fn move_to(&mut self, center: LatLng, zoom: f64, fly_to: bool) {
        self.reset(center, zoom);
        self.events.emit(MapEvent::Move {
            center: self.center,
            zoom: self.zoom,
            fly_to,
        });
    }

    fn move_start(&mut self, zoom_changed: bool, no_move_start: bool) {
        if !no_move_start {
            self.events.emit(MapEvent::MoveStart { zoom_changed });
        }
    }

    fn move_end(&mut self, zoom_changed: bool) {
        self.events.emit(MapEvent::MoveEnd {
            center: self.center,
            zoom_changed,
        });
    }

    fn pan_by(&mut self, offset: Point) {
        if offset.is_zero() {
            return;
        }
        let target = self.project(&self.center, self.zoom).add(&offset);
        let center = self.unproject(&target, self.zoom);

        self.events.emit(MapEvent::MoveStart {
            zoom_changed: false,
        });
        self.move_to(center, self.zoom, false);
        self.move_end(false);
    }

    fn fire(&mut self, event: MapEvent) {
        self.events.emit(event);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}
