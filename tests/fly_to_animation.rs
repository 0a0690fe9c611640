use active_area::prelude::*;

/// Animated navigation driven through the fake clock
#[cfg(test)]
mod fly_to_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAME_MS: f64 = 16.0;

    fn area() -> ActiveArea<Viewport, ManualScheduler> {
        let map = Viewport::new(LatLng::new(48.8566, 2.3522), 10.0, Point::new(1280.0, 800.0));
        let mut area = ActiveArea::new(map, ManualScheduler::new(), AreaOptions::default());
        area.configure_active_region(RegionStyle::inset_left(360.0), false, false);
        area.map_mut().take_events();
        area
    }

    /// Advances the clock one frame at a time until no frame is pending
    fn run_to_end(area: &mut ActiveArea<Viewport, ManualScheduler>) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        while area.scheduler().has_pending() {
            area.scheduler_mut().advance(FRAME_MS);
            outcomes.extend(area.pump_frames());
            assert!(outcomes.len() < 100_000, "flight never ended");
        }
        outcomes
    }

    #[test]
    fn test_flight_lands_exactly_on_target() {
        let mut area = area();
        let target = LatLng::new(40.7128, -74.006);

        let first = area.fly_to(target, Some(12.0), &ViewOptions::default());
        assert!(matches!(first, FrameOutcome::Moved { .. }));

        let outcomes = run_to_end(&mut area);
        let last = *outcomes.last().unwrap();
        let FrameOutcome::Finished { center, zoom } = last else {
            panic!("flight ended with {last:?}");
        };

        assert_eq!(zoom, 12.0);
        assert_eq!(area.map().zoom(), 12.0);
        assert_eq!(area.map().center(), center);
        assert!(area.get_center(false).approx_eq(&target, 1e-9));
        assert!(!area.is_animating());
    }

    #[test]
    fn test_animate_false_matches_set_view() {
        let target = LatLng::new(52.52, 13.405);

        let mut jumped = area();
        jumped.fly_to(target, Some(11.0), &ViewOptions::animated(false));

        let mut viewed = area();
        viewed.set_view(target, Some(11.0), &ViewOptions::default());

        assert_eq!(jumped.map().center(), viewed.map().center());
        assert_eq!(jumped.map().zoom(), viewed.map().zoom());
        assert_eq!(jumped.scheduler().requested(), 0);
    }

    #[test]
    fn test_no_smooth_rendering_jumps() {
        let map = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(800.0, 600.0)).with_any3d(false);
        let mut area = ActiveArea::new(map, ManualScheduler::new(), AreaOptions::default());

        let target = LatLng::new(10.0, 10.0);
        let outcome = area.fly_to(target, Some(5.0), &ViewOptions::default());

        assert!(matches!(outcome, FrameOutcome::Finished { .. }));
        assert_eq!(area.map().center(), target);
        assert_eq!(area.scheduler().requested(), 0);
    }

    #[test]
    fn test_long_flight_zooms_out_then_in() {
        let mut area = area();
        area.fly_to(LatLng::new(-33.87, 151.21), Some(10.0), &ViewOptions::default());

        let lowest = run_to_end(&mut area)
            .iter()
            .filter_map(|outcome| match outcome {
                FrameOutcome::Moved { zoom, .. } => Some(*zoom),
                _ => None,
            })
            .fold(f64::INFINITY, f64::min);

        assert!(lowest < 6.0, "lowest zoom {lowest}");
        assert_eq!(area.map().zoom(), 10.0);
    }

    #[test]
    fn test_event_sequence() {
        let mut area = area();
        area.fly_to(LatLng::new(41.9, 12.5), Some(9.0), &ViewOptions::default());
        run_to_end(&mut area);

        let events = area.map_mut().take_events();
        assert_eq!(events.first(), Some(&MapEvent::MoveStart { zoom_changed: true }));
        assert!(matches!(
            events.last(),
            Some(MapEvent::MoveEnd {
                zoom_changed: true,
                ..
            })
        ));

        let move_ends = events.iter().filter(|e| e.kind() == "moveend").count();
        assert_eq!(move_ends, 1);

        let intermediate = &events[1..events.len() - 2];
        assert!(!intermediate.is_empty());
        assert!(intermediate
            .iter()
            .all(|e| matches!(e, MapEvent::Move { fly_to: true, .. })));
        assert!(matches!(
            events[events.len() - 2],
            MapEvent::Move { fly_to: false, .. }
        ));
    }

    #[test]
    fn test_no_move_start_option() {
        let mut area = area();
        let options = ViewOptions {
            no_move_start: true,
            ..ViewOptions::default()
        };
        area.fly_to(LatLng::new(41.9, 12.5), Some(9.0), &options);

        let events = area.map_mut().take_events();
        assert!(events.iter().all(|e| e.kind() != "movestart"));
    }

    #[test]
    fn test_explicit_duration() {
        let mut area = area();
        area.fly_to(
            LatLng::new(45.46, 9.19),
            Some(9.0),
            &ViewOptions::default().with_duration(1.0),
        );

        area.scheduler_mut().advance(1000.0);
        assert!(matches!(area.pump_frames().as_slice(), [FrameOutcome::Moved { .. }]));

        area.scheduler_mut().advance(1.0);
        assert!(matches!(
            area.pump_frames().as_slice(),
            [FrameOutcome::Finished { zoom, .. }] if *zoom == 9.0
        ));
        assert!(!area.scheduler().has_pending());
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut area = area();
        let target = LatLng::new(45.46, 9.19);
        let outcome = area.fly_to(target, Some(9.0), &ViewOptions::default().with_duration(0.0));

        assert!(matches!(outcome, FrameOutcome::Finished { .. }));
        assert!(area.get_center(false).approx_eq(&target, 1e-9));
        assert_eq!(area.scheduler().requested(), 0);
    }

    #[test]
    fn test_second_flight_cancels_first() {
        let mut area = area();
        area.fly_to(LatLng::new(41.9, 12.5), Some(9.0), &ViewOptions::default());
        let target = LatLng::new(59.33, 18.07);
        area.fly_to(target, Some(8.0), &ViewOptions::default());

        area.scheduler_mut().advance(FRAME_MS);
        let outcomes = area.pump_frames();
        assert_eq!(outcomes[0], FrameOutcome::Stale);
        assert!(matches!(outcomes[1], FrameOutcome::Moved { .. }));

        run_to_end(&mut area);
        assert!(area.get_center(false).approx_eq(&target, 1e-9));
        assert_eq!(area.map().zoom(), 8.0);
    }

    #[test]
    fn test_stop_leaves_map_untouched() {
        let mut area = area();
        area.fly_to(LatLng::new(41.9, 12.5), Some(9.0), &ViewOptions::default());
        area.stop();

        let center = area.map().center();
        let zoom = area.map().zoom();
        area.map_mut().take_events();

        area.scheduler_mut().advance(FRAME_MS);
        assert_eq!(area.pump_frames(), vec![FrameOutcome::Stale]);
        assert_eq!(area.map().center(), center);
        assert_eq!(area.map().zoom(), zoom);
        assert!(area.map_mut().take_events().is_empty());
        assert!(!area.scheduler().has_pending());
    }

    #[test]
    fn test_target_zoom_is_clamped() {
        let mut area = area();
        area.fly_to(LatLng::new(41.9, 12.5), Some(30.0), &ViewOptions::default());
        run_to_end(&mut area);
        assert_eq!(area.map().zoom(), 18.0);
    }
}
