//! The active region: the sub-rectangle of the map container that centering,
//! fitting and autopan treat as the visible map.
//!
//! A region is described the way an absolutely positioned overlay would be
//! (`top`/`left`/`right`/`bottom`/`width`/`height`, in pixels or percent of the
//! container) and resolved against the container size on every query, so
//! container resizes are picked up without reconfiguration.

use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A CSS-like length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "String")]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    pub fn resolve(&self, reference: f64) -> f64 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => reference * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| MapError::InvalidRegion(format!("invalid length `{s}`")))
        };

        if let Some(pct) = s.strip_suffix('%') {
            Ok(Length::Percent(parse(pct)?))
        } else if let Some(px) = s.strip_suffix("px") {
            Ok(Length::Px(parse(px)?))
        } else {
            Ok(Length::Px(parse(s)?))
        }
    }
}

impl From<Length> for String {
    fn from(length: Length) -> String {
        match length {
            Length::Px(px) => format!("{px}px"),
            Length::Percent(pct) => format!("{pct}%"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = MapError;

    fn try_from(repr: LengthRepr) -> Result<Self> {
        match repr {
            LengthRepr::Number(px) => Ok(Length::Px(px)),
            LengthRepr::Text(text) => text.parse(),
        }
    }
}

/// Absolute-positioning description of the active region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionStyle {
    pub top: Option<Length>,
    pub left: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

impl RegionStyle {
    /// A fixed pixel rectangle
    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Some(Length::Px(left)),
            top: Some(Length::Px(top)),
            width: Some(Length::Px(width)),
            height: Some(Length::Px(height)),
            ..Self::default()
        }
    }

    /// Everything but `px` pixels on the left edge, the common side-panel layout
    pub fn inset_left(px: f64) -> Self {
        Self::insets(0.0, 0.0, 0.0, px)
    }

    /// Stretch between the four edges with the given pixel insets
    pub fn insets(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: Some(Length::Px(top)),
            right: Some(Length::Px(right)),
            bottom: Some(Length::Px(bottom)),
            left: Some(Length::Px(left)),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the style to container pixels, as an absolutely positioned
    /// element would be laid out. The result may be degenerate.
    pub fn layout(&self, container: Point) -> Bounds {
        let (x, w) = Self::layout_axis(self.left, self.right, self.width, container.x);
        let (y, h) = Self::layout_axis(self.top, self.bottom, self.height, container.y);
        Bounds::from_origin_and_size(Point::new(x, y), Point::new(w.max(0.0), h.max(0.0)))
    }

    fn layout_axis(
        start: Option<Length>,
        end: Option<Length>,
        extent: Option<Length>,
        container: f64,
    ) -> (f64, f64) {
        let start = start.map(|l| l.resolve(container));
        let end = end.map(|l| l.resolve(container));
        let extent = extent.map(|l| l.resolve(container));

        match (start, end, extent) {
            (Some(s), _, Some(e)) => (s, e),
            (None, Some(t), Some(e)) => (container - t - e, e),
            (Some(s), Some(t), None) => (s, container - s - t),
            (None, None, Some(e)) => (0.0, e),
            // An unsized element with a single anchor has no extent
            (Some(s), None, None) => (s, 0.0),
            (None, Some(t), None) => (container - t, 0.0),
            (None, None, None) => (0.0, 0.0),
        }
    }
}

/// The configured active region of a map container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRegion {
    style: RegionStyle,
}

impl ActiveRegion {
    pub fn new(style: RegionStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RegionStyle {
        &self.style
    }

    /// Merges `style` into the current one; fields left `None` are kept
    pub fn restyle(&mut self, style: RegionStyle) {
        let current = &mut self.style;
        current.top = style.top.or(current.top);
        current.left = style.left.or(current.left);
        current.right = style.right.or(current.right);
        current.bottom = style.bottom.or(current.bottom);
        current.width = style.width.or(current.width);
        current.height = style.height.or(current.height);
    }

    /// Region bounds in container pixels. A zero-width or zero-height layout
    /// falls back to the whole container.
    pub fn resolve(&self, container: Point) -> Bounds {
        let laid_out = self.style.layout(container);
        if laid_out.is_degenerate() {
            Bounds::from_origin_and_size(Point::zero(), container)
        } else {
            laid_out
        }
    }
}
