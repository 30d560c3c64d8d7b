use super::SCALE_STEP;

/// Outcome of advancing a [`ScaleState`] by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleStep {
    /// Nothing to do, the state is settled
    Idle,
    /// Moved one step toward the target endpoint
    Progressed,
    /// Reached the opposite endpoint; carries the new baseline
    Settled(f32),
}

/// Animation progress of a single tick icon.
///
/// `scale` sweeps from `baseline` toward `baseline + direction` while
/// `direction` is non-zero. Settling snaps `scale` onto the endpoint, which
/// becomes the next baseline, so successive sweeps alternate 0 → 1 → 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleState {
    scale: f32,
    direction: f32,
    baseline: f32,
    /// Frames taken in the current sweep. `scale` is derived from it so the
    /// endpoint is hit without accumulated float drift.
    steps: u32,
}

impl ScaleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn is_idle(&self) -> bool {
        self.direction == 0.0
    }

    /// Begin a sweep toward the opposite endpoint.
    ///
    /// Returns the new direction, or `None` when a sweep is already running.
    pub fn start_updating(&mut self) -> Option<f32> {
        if !self.is_idle() {
            return None;
        }
        self.direction = 1.0 - 2.0 * self.baseline;
        self.steps = 0;
        Some(self.direction)
    }

    /// Advance one frame.
    ///
    /// Settles once the distance from the baseline strictly exceeds 1, so a
    /// full sweep takes 21 frames: frame 20 lands exactly on the endpoint
    /// and does not count as past it.
    pub fn update(&mut self) -> ScaleStep {
        if self.is_idle() {
            return ScaleStep::Idle;
        }

        self.steps += 1;
        self.scale = self.baseline + SCALE_STEP * self.steps as f32 * self.direction;

        if (self.scale - self.baseline).abs() > 1.0 {
            self.scale = self.baseline + self.direction;
            self.direction = 0.0;
            self.baseline = self.scale;
            self.steps = 0;
            return ScaleStep::Settled(self.baseline);
        }
        ScaleStep::Progressed
    }
}
