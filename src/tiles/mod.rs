pub mod layer;
pub mod levels;
pub mod scheduler;

// Re-exports for convenience
pub use layer::{TileLayer, TileState};
pub use levels::{LevelUpdate, TileLevel, TileLevels};
pub use scheduler::{TileScheduler, TileUpdate};
