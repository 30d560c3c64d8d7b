use crate::animation::{ScaleState, ScaleStep};
use crate::surface::Surface;
use crate::ui::theme::Theme;

use super::chain::Direction;
use super::icon;

/// Outcome of advancing a node by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeStep {
    Idle,
    Progressed,
    Settled { index: usize, baseline: f32 },
}

/// One icon in the chain. Links are arena indices owned by [`super::TickChain`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickNode {
    index: usize,
    state: ScaleState,
    next: Option<usize>,
    prev: Option<usize>,
}

impl TickNode {
    pub(super) fn new(index: usize, len: usize) -> Self {
        Self {
            index,
            state: ScaleState::new(),
            next: (index + 1 < len).then_some(index + 1),
            prev: index.checked_sub(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &ScaleState {
        &self.state
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, theme: &Theme) {
        icon::draw_tick(surface, self.index, self.state.scale(), theme);
    }

    pub fn update(&mut self) -> NodeStep {
        match self.state.update() {
            ScaleStep::Idle => NodeStep::Idle,
            ScaleStep::Progressed => NodeStep::Progressed,
            ScaleStep::Settled(baseline) => NodeStep::Settled {
                index: self.index,
                baseline,
            },
        }
    }

    pub fn start_updating(&mut self) -> Option<f32> {
        self.state.start_updating()
    }

    /// Neighbour in `direction`, `None` at a boundary
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => self.next,
            Direction::Backward => self.prev,
        }
    }
}
