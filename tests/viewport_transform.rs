use active_area::prelude::*;

/// Centering, fitting and zooming relative to the active region
#[cfg(test)]
mod viewport_transform_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONTAINER: Point = Point { x: 1280.0, y: 800.0 };

    fn area() -> ActiveArea<Viewport, ManualScheduler> {
        let map = Viewport::new(LatLng::new(51.5, -0.12), 8.0, CONTAINER);
        ActiveArea::new(map, ManualScheduler::new(), AreaOptions::default())
    }

    fn styles() -> Vec<RegionStyle> {
        vec![
            RegionStyle::inset_left(360.0),
            RegionStyle::insets(80.0, 0.0, 0.0, 0.0),
            RegionStyle::rect(900.0, 500.0, 300.0, 250.0),
            RegionStyle::from_json_str(r#"{ "right": "10%", "top": 0, "bottom": "20%", "width": "50%" }"#)
                .unwrap(),
        ]
    }

    /// `set_view(get_center())` leaves the map where it is, and `set_view(c)`
    /// puts `c` back out of `get_center()`
    #[test]
    fn test_center_round_trips_for_any_region_and_zoom() {
        for style in styles() {
            for zoom in [2.0, 7.5, 13.0] {
                let mut area = area();
                area.configure_active_region(style.clone(), false, false);

                let target = LatLng::new(35.68, 139.69);
                area.set_view(target, Some(zoom), &ViewOptions::default());
                assert!(
                    area.get_center(false).approx_eq(&target, 1e-9),
                    "{style:?} at zoom {zoom}"
                );

                let raw = area.map().center();
                let visual = area.get_center(false);
                area.set_view(visual, None, &ViewOptions::default());
                assert!(area.map().center().approx_eq(&raw, 1e-9));
            }
        }
    }

    #[test]
    fn test_full_container_region_has_no_effect() {
        let mut area = area();
        let style = RegionStyle {
            width: Some(Length::Percent(100.0)),
            height: Some(Length::Percent(100.0)),
            ..RegionStyle::default()
        };
        area.configure_active_region(style, false, false);

        assert_eq!(area.get_offset(), Some(Point::zero()));
        assert!(area.get_center(false).approx_eq(&area.get_center(true), 1e-9));
    }

    #[test]
    fn test_degenerate_region_falls_back_to_container() {
        let mut area = area();
        area.configure_active_region(RegionStyle::rect(100.0, 100.0, 0.0, 0.0), false, false);

        assert_eq!(
            area.get_viewport_rect(),
            Some(Bounds::from_coords(0.0, 0.0, 1280.0, 800.0))
        );
        assert_eq!(area.get_offset(), Some(Point::zero()));
    }

    #[test]
    fn test_region_follows_container_resize() {
        let mut area = area();
        area.configure_active_region(
            RegionStyle::from_json_str(r#"{ "left": "25%", "top": 0, "right": 0, "bottom": 0 }"#).unwrap(),
            false,
            false,
        );
        assert_eq!(area.get_offset(), Some(Point::new(-160.0, 0.0)));

        area.map_mut().set_size(Point::new(640.0, 400.0));
        assert_eq!(area.get_offset(), Some(Point::new(-80.0, 0.0)));
    }

    #[test]
    fn test_clearing_region_restores_baseline() {
        let mut area = area();
        area.configure_active_region(RegionStyle::inset_left(360.0), false, false);
        assert!(area.get_viewport_geo_bounds().is_some());

        area.clear_active_region();
        assert!(area.get_viewport_geo_bounds().is_none());
        assert_eq!(area.get_center(false), area.map().center());

        let target = LatLng::new(-22.9, -43.2);
        area.set_view(target, Some(9.0), &ViewOptions::default());
        assert_eq!(area.map().center(), target);
    }

    #[test]
    fn test_keep_center_with_animation_flag() {
        let mut area = area();
        let before = area.get_center(false);
        area.configure_active_region(RegionStyle::inset_left(360.0), true, true);

        assert!(area.get_center(false).approx_eq(&before, 1e-9));
        assert_eq!(area.map().zoom(), 8.0);
    }

    #[test]
    fn test_unloaded_map_ignores_keep_center() {
        let map = Viewport::unloaded(CONTAINER);
        let mut area = ActiveArea::new(map, ManualScheduler::new(), AreaOptions::default());
        area.configure_active_region(RegionStyle::inset_left(360.0), true, false);

        assert!(!area.map().is_loaded());
        assert_eq!(area.map().center(), LatLng::default());
    }

    #[test]
    fn test_geo_bounds_match_region_corners() {
        let mut area = area();
        area.configure_active_region(RegionStyle::rect(200.0, 100.0, 400.0, 300.0), false, false);

        let bounds = area.get_viewport_geo_bounds().unwrap();
        let nw = area.map().container_point_to_lat_lng(&Point::new(200.0, 100.0));
        let se = area.map().container_point_to_lat_lng(&Point::new(600.0, 400.0));

        assert!(bounds.north_west().approx_eq(&nw, 1e-9));
        assert!(bounds.south_east().approx_eq(&se, 1e-9));
        assert_eq!(area.get_bounds(), bounds);
    }

    #[test]
    fn test_bounds_zoom_stays_within_limits() {
        let map = Viewport::new(LatLng::new(0.0, 0.0), 6.0, CONTAINER).with_zoom_limits(4.0, 12.0);
        let mut area = ActiveArea::new(map, ManualScheduler::new(), AreaOptions::default());
        area.configure_active_region(RegionStyle::inset_left(360.0), false, false);

        let point = LatLng::new(1.0, 1.0);
        let cases = [
            LatLngBounds::new(point, point),
            LatLngBounds::from_coords(1.0, 1.0, 1.0, 50.0),
            LatLngBounds::from_coords(-80.0, -170.0, 80.0, 170.0),
            LatLngBounds::from_coords(1.0, 1.0, 1.001, 1.001),
        ];
        for bounds in &cases {
            let zoom = area.get_bounds_zoom(bounds, false, Point::zero());
            assert!((4.0..=12.0).contains(&zoom), "{bounds:?} gave {zoom}");
        }
    }

    #[test]
    fn test_fit_then_center_shows_bounds_in_region() {
        let mut area = area();
        area.configure_active_region(RegionStyle::inset_left(360.0), false, false);

        let alps = LatLngBounds::from_coords(44.0, 5.0, 48.0, 16.0);
        let zoom = area.get_bounds_zoom(&alps, false, Point::new(20.0, 20.0));
        area.set_view(alps.center(), Some(zoom), &ViewOptions::default());

        let rect = area.get_viewport_rect().unwrap();
        for corner in [alps.north_west(), alps.south_east()] {
            let point = area.map().lat_lng_to_container_point(&corner);
            assert!(rect.contains(&point), "{corner:?} at {point:?} outside {rect:?}");
        }
    }

    #[test]
    fn test_zoom_around_without_region_uses_container_center() {
        let mut area = area();
        let anchor = Point::new(1000.0, 150.0);
        let before = area.map().container_point_to_lat_lng(&anchor);

        area.set_zoom_around(anchor, 10.0, &ViewOptions::default());
        let after = area.map().container_point_to_lat_lng(&anchor);
        assert!(after.approx_eq(&before, 1e-9));
    }
}
