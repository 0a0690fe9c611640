use crate::core::bounds::Bounds;
use crate::core::config::AutoPanOptions;
use crate::core::geo::Point;
use crate::events::MapEvent;
use crate::traits::MapSurface;
use serde::{Deserialize, Serialize};

#[cfg(feature = "debug")]
use log;

/// Container-pixel box of an open popup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupBox {
    pub left: f64,
    /// Y of the bottom edge
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl PopupBox {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// A popup horizontally centered above `anchor`, its tip `gap` pixels
    /// above the anchor
    pub fn above(anchor: Point, width: f64, height: f64, gap: f64) -> Self {
        Self::new(anchor.x - width / 2.0, anchor.y - gap, width, height)
    }

    pub fn top(&self) -> f64 {
        self.bottom - self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top())
    }
}

/// Keeps popups inside the visible map by panning
#[derive(Debug, Clone, Copy)]
pub struct PanAdjuster<'a> {
    options: &'a AutoPanOptions,
}

impl<'a> PanAdjuster<'a> {
    pub fn new(options: &'a AutoPanOptions) -> Self {
        Self { options }
    }

    /// Pan needed to bring `popup` inside `viewport` with the configured
    /// padding. A popup too large to fit keeps its top-left corner visible.
    pub fn delta(&self, viewport: &Bounds, popup: &PopupBox) -> Point {
        let position = popup.top_left().subtract(&viewport.min);
        let size = viewport.size();
        let padding_tl = self.options.top_left();
        let padding_br = self.options.bottom_right();

        let mut dx = 0.0;
        let mut dy = 0.0;

        if position.x + popup.width + padding_br.x > size.x {
            dx = position.x + popup.width - size.x + padding_br.x;
        }
        if position.x - dx - padding_tl.x < 0.0 {
            dx = position.x - padding_tl.x;
        }
        if position.y + popup.height + padding_br.y > size.y {
            dy = position.y + popup.height - size.y + padding_br.y;
        }
        if position.y - dy - padding_tl.y < 0.0 {
            dy = position.y - padding_tl.y;
        }

        Point::new(dx, dy)
    }

    /// Pans `map` so `popup` is visible. Returns the delta when a pan was
    /// requested.
    pub fn adjust<M: MapSurface + ?Sized>(
        &self,
        map: &mut M,
        viewport: &Bounds,
        popup: &PopupBox,
    ) -> Option<Point> {
        if !self.options.auto_pan {
            return None;
        }
        map.stop_pan();

        let delta = self.delta(viewport, popup);
        if delta.is_zero() {
            return None;
        }

        #[cfg(feature = "debug")]
        log::debug!("autopan by ({:.1}, {:.1})", delta.x, delta.y);

        map.fire(MapEvent::AutoPanStart { delta });
        map.pan_by(delta);
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::core::viewport::Viewport;

    fn region() -> Bounds {
        Bounds::from_coords(300.0, 0.0, 1000.0, 600.0)
    }

    #[test]
    fn test_inside_needs_no_pan() {
        let options = AutoPanOptions::default();
        let popup = PopupBox::new(400.0, 300.0, 200.0, 100.0);
        assert_eq!(PanAdjuster::new(&options).delta(&region(), &popup), Point::zero());
    }

    #[test]
    fn test_right_and_bottom_overflow() {
        let options = AutoPanOptions::default();
        // Right edge at 1000 + 5 padding, bottom edge at 620 + 5 padding
        let popup = PopupBox::new(800.0, 620.0, 200.0, 100.0);
        assert_eq!(
            PanAdjuster::new(&options).delta(&region(), &popup),
            Point::new(5.0, 25.0)
        );
    }

    #[test]
    fn test_popup_under_panel_pans_left_edge_into_region() {
        let options = AutoPanOptions::default();
        let popup = PopupBox::new(250.0, 300.0, 100.0, 50.0);
        assert_eq!(
            PanAdjuster::new(&options).delta(&region(), &popup),
            Point::new(-55.0, 0.0)
        );
    }

    #[test]
    fn test_oversized_popup_favors_left_edge() {
        let options = AutoPanOptions::default();
        let popup = PopupBox::new(350.0, 300.0, 900.0, 50.0);
        // Right correction would be 255; the left edge wins
        assert_eq!(
            PanAdjuster::new(&options).delta(&region(), &popup).x,
            45.0
        );
    }

    #[test]
    fn test_specific_paddings_override_shared() {
        let options = AutoPanOptions {
            padding_top_left: Some(Point::new(20.0, 30.0)),
            ..AutoPanOptions::default()
        };
        let popup = PopupBox::new(310.0, 120.0, 100.0, 100.0);
        assert_eq!(
            PanAdjuster::new(&options).delta(&region(), &popup),
            Point::new(-10.0, -10.0)
        );
    }

    #[test]
    fn test_adjust_fires_and_pans() {
        let mut map = Viewport::new(LatLng::new(0.0, 0.0), 4.0, Point::new(1000.0, 600.0));
        map.take_events();
        let options = AutoPanOptions::default();
        let popup = PopupBox::new(800.0, 620.0, 200.0, 100.0);

        let delta = PanAdjuster::new(&options).adjust(&mut map, &region(), &popup);
        assert_eq!(delta, Some(Point::new(5.0, 25.0)));
        assert_eq!(
            map.take_events().first(),
            Some(&MapEvent::AutoPanStart {
                delta: Point::new(5.0, 25.0)
            })
        );
        assert!(map.center().lng > 0.0);
        assert!(map.center().lat < 0.0);
    }

    #[test]
    fn test_disabled_autopan_is_noop() {
        let mut map = Viewport::default();
        map.take_events();
        let options = AutoPanOptions {
            auto_pan: false,
            ..AutoPanOptions::default()
        };
        let popup = PopupBox::new(-500.0, 0.0, 100.0, 100.0);

        assert_eq!(PanAdjuster::new(&options).adjust(&mut map, &region(), &popup), None);
        assert!(map.take_events().is_empty());
    }
}
