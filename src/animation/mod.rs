pub mod fly_to;
pub mod scheduler;

pub use fly_to::{ease_out, AnimationState, FlySample, FlyToAnimator, FlyToCurve, FrameOutcome};
pub use scheduler::{InstantScheduler, ManualScheduler, QueuedFrames};
