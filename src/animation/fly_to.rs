//! Zoom-and-pan trajectory for animated navigation.
//!
//! The path is the closed-form "optimal" curve of van Wijk & Nuij: the view
//! zooms out while it travels and back in as it arrives, so the apparent
//! speed stays constant whatever the zoom delta. `FlyToCurve` holds the pure
//! math; `FlyToAnimator` drives one trajectory at a time through the host's
//! frame scheduler and cancels older ones by epoch.

use crate::core::constants::{
    FLY_TO_LOG_FLOOR, FLY_TO_MIN_LOG_ARG, FLY_TO_MS_PER_UNIT, FLY_TO_RHO,
};
use crate::core::geo::{LatLng, Point};
use crate::traits::{FrameScheduler, FrameToken, Lerp, MapSurface};

#[cfg(feature = "debug")]
use log;

/// `1 - (1 - t)^1.5`, fast start with a long settle
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powf(1.5)
}

/// Natural log with `ln(0)` replaced by a finite floor
pub fn guarded_ln(value: f64) -> f64 {
    if value < FLY_TO_MIN_LOG_ARG {
        FLY_TO_LOG_FLOOR
    } else {
        value.ln()
    }
}

/// The closed-form trajectory between two views
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyToCurve {
    /// Visible width at the start
    w0: f64,
    /// Visible width at the end, in start-zoom pixels
    w1: f64,
    /// Distance to travel, in start-zoom pixels
    u1: f64,
    r0: f64,
    /// Total path length in curve units
    length: f64,
}

impl FlyToCurve {
    /// `distance` is clamped to at least one pixel
    pub fn new(w0: f64, w1: f64, distance: f64) -> Self {
        let u1 = distance.max(1.0);
        let r0 = Self::path_param(w0, w1, u1, 0);
        let r1 = Self::path_param(w0, w1, u1, 1);

        Self {
            w0,
            w1,
            u1,
            r0,
            length: (r1 - r0) / FLY_TO_RHO,
        }
    }

    /// `r(i)` for the start (`i = 0`) or end (`i = 1`) of the path
    pub fn path_param(w0: f64, w1: f64, u1: f64, i: usize) -> f64 {
        let rho2 = FLY_TO_RHO * FLY_TO_RHO;
        let (sign, wi) = if i == 0 { (1.0, w0) } else { (-1.0, w1) };

        let numerator = w1 * w1 - w0 * w0 + sign * rho2 * rho2 * u1 * u1;
        let denominator = 2.0 * wi * rho2 * u1;
        let b = numerator / denominator;

        guarded_ln((b * b + 1.0).sqrt() - b)
    }

    /// Path length `S`
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn distance(&self) -> f64 {
        self.u1
    }

    pub fn start_width(&self) -> f64 {
        self.w0
    }

    pub fn end_width(&self) -> f64 {
        self.w1
    }

    /// Duration derived from the path length
    pub fn default_duration_ms(&self) -> f64 {
        FLY_TO_MS_PER_UNIT * self.length
    }

    /// Visible width at path position `s`
    pub fn width_at(&self, s: f64) -> f64 {
        self.w0 * (self.r0.cosh() / (self.r0 + FLY_TO_RHO * s).cosh())
    }

    /// Distance travelled at path position `s`
    pub fn distance_at(&self, s: f64) -> f64 {
        let rho2 = FLY_TO_RHO * FLY_TO_RHO;
        self.w0 * (self.r0.cosh() * (self.r0 + FLY_TO_RHO * s).tanh() - self.r0.sinh()) / rho2
    }
}

/// One in-flight trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub epoch: u64,
    pub start_time: f64,
    /// Milliseconds
    pub duration: f64,
    /// Projected start point, at `z0`
    pub p0: Point,
    /// Projected target point, at `z0`
    pub p1: Point,
    pub z0: f64,
    pub z1: f64,
    /// Exact target the last frame lands on
    pub target: LatLng,
    pub curve: FlyToCurve,
}

/// A point on the trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlySample {
    /// Intermediate view in projected start-zoom pixels
    InFlight { point: Point, zoom: f64 },
    /// Past the end of the trajectory
    Arrived,
}

impl AnimationState {
    pub fn progress(&self, now: f64) -> f64 {
        (now - self.start_time) / self.duration
    }

    pub fn sample<M: MapSurface + ?Sized>(&self, map: &M, now: f64) -> FlySample {
        let t = self.progress(now);
        if t > 1.0 {
            return FlySample::Arrived;
        }

        let s = ease_out(t) * self.curve.length();
        let point = self
            .p0
            .lerp(&self.p1, self.curve.distance_at(s) / self.curve.distance());
        let zoom = map.scale_zoom(self.curve.start_width() / self.curve.width_at(s), self.z0);

        FlySample::InFlight { point, zoom }
    }
}

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The token belongs to a stopped or replaced trajectory
    Stale,
    /// Moved to an intermediate view and requested the next frame
    Moved { center: LatLng, zoom: f64 },
    /// Landed on the target and fired move-end
    Finished { center: LatLng, zoom: f64 },
}

/// Runs at most one fly-to trajectory per map
#[derive(Debug, Default)]
pub struct FlyToAnimator {
    epoch: u64,
    state: Option<AnimationState>,
}

impl FlyToAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    /// Invalidates any in-flight trajectory
    pub fn stop(&mut self) {
        self.epoch += 1;
        if self.state.take().is_some() {
            #[cfg(feature = "debug")]
            log::debug!("fly-to stopped, epoch now {}", self.epoch);
        }
    }

    /// Prepares a trajectory from the map's current view to `target`.
    ///
    /// Returns `None` when the resulting duration is not a positive number,
    /// in which case the caller should jump instead.
    pub fn plan<M: MapSurface + ?Sized>(
        &self,
        map: &M,
        now: f64,
        target: LatLng,
        target_zoom: f64,
        reference_width: f64,
        duration_secs: Option<f64>,
    ) -> Option<AnimationState> {
        let z0 = map.zoom();
        let p0 = map.project(&map.center(), z0);
        let p1 = map.project(&target, z0);

        let w1 = reference_width * map.zoom_scale(z0, target_zoom);
        let curve = FlyToCurve::new(reference_width, w1, p1.distance_to(&p0));

        let duration = match duration_secs {
            Some(secs) => 1000.0 * secs,
            None => curve.default_duration_ms(),
        };
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }

        Some(AnimationState {
            epoch: self.epoch + 1,
            start_time: now,
            duration,
            p0,
            p1,
            z0,
            z1: target_zoom,
            target,
            curve,
        })
    }

    /// Replaces any running trajectory with `state`, fires move-start and
    /// evaluates the first frame immediately.
    pub fn start<M, S>(
        &mut self,
        map: &mut M,
        scheduler: &mut S,
        mut state: AnimationState,
        no_move_start: bool,
    ) -> FrameOutcome
    where
        M: MapSurface + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.stop();
        state.epoch = self.epoch;

        #[cfg(feature = "debug")]
        log::debug!(
            "fly-to start: epoch {}, {:.0} ms, path length {:.3}, zoom {} -> {}",
            state.epoch,
            state.duration,
            state.curve.length(),
            state.z0,
            state.z1
        );

        let token = FrameToken { epoch: state.epoch };
        self.state = Some(state);

        map.move_start(true, no_move_start);
        self.frame(map, scheduler, token)
    }

    /// Advances the trajectory identified by `token`
    pub fn frame<M, S>(&mut self, map: &mut M, scheduler: &mut S, token: FrameToken) -> FrameOutcome
    where
        M: MapSurface + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let Some(state) = self.state.as_ref().filter(|_| token.epoch == self.epoch) else {
            #[cfg(feature = "debug")]
            log::trace!("dropping stale fly-to frame for epoch {}", token.epoch);
            return FrameOutcome::Stale;
        };

        match state.sample(map, scheduler.now_ms()) {
            FlySample::InFlight { point, zoom } => {
                scheduler.request_frame(token);
                let center = map.unproject(&point, state.z0);
                map.move_to(center, zoom, true);
                FrameOutcome::Moved { center, zoom }
            }
            FlySample::Arrived => {
                let (center, zoom) = (state.target, state.z1);
                self.state = None;

                map.move_to(center, zoom, false);
                map.move_end(true);

                #[cfg(feature = "debug")]
                log::debug!("fly-to finished at zoom {}", zoom);

                FrameOutcome::Finished { center, zoom }
            }
        }
    }
}
