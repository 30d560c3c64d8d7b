pub mod driver;
pub mod scale;

pub use driver::{AnimationDriver, Invalidate};
pub use scale::{ScaleState, ScaleStep};

/// Scale units a single frame advances an icon by
pub const SCALE_STEP: f32 = 0.05;

/// Default pause between two animation frames
pub const DEFAULT_FRAME_MS: u64 = 50;
