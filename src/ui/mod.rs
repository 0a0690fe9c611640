pub mod popup;

pub use popup::{PanAdjuster, PopupBox};
