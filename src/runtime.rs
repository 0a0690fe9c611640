//! Tokio-driven frame loop
//!
//! Stands in for a display's animation tick when the host has none, e.g. in
//! headless tools and the demo binary.

use crate::animation::QueuedFrames;
use crate::area::ActiveArea;
use crate::traits::{FrameScheduler, MapSurface};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[cfg(feature = "debug")]
use log;

/// Delivers queued frames every `period` until no frame is pending.
/// Returns the number of frames delivered.
pub async fn run_frames<M, S>(area: &mut ActiveArea<M, S>, period: Duration) -> usize
where
    M: MapSurface,
    S: FrameScheduler + QueuedFrames,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut delivered = 0;
    while area.scheduler().has_pending() {
        interval.tick().await;
        delivered += area.pump_frames().len();
    }

    #[cfg(feature = "debug")]
    log::debug!("frame loop idle after {} frames", delivered);

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::InstantScheduler;
    use crate::core::config::AreaOptions;
    use crate::core::geo::{LatLng, Point};
    use crate::core::viewport::Viewport;
    use crate::traits::ViewOptions;

    #[tokio::test]
    async fn test_run_frames_until_flight_ends() {
        let map = Viewport::new(LatLng::new(0.0, 0.0), 4.0, Point::new(800.0, 600.0));
        let mut area = ActiveArea::new(map, InstantScheduler::new(), AreaOptions::default());

        let target = LatLng::new(10.0, 20.0);
        area.fly_to(target, Some(6.0), &ViewOptions::default().with_duration(0.05));

        let frames = run_frames(&mut area, Duration::from_millis(5)).await;
        assert!(frames > 0);
        assert!(!area.is_animating());
        assert_eq!(area.map().zoom(), 6.0);
        assert!(area.get_center(false).approx_eq(&target, 1e-9));
    }
}
