use tracing::debug;

use crate::animation::{AnimationDriver, Invalidate};
use crate::surface::Surface;
use crate::tick::{NodeStep, TickChain};
use crate::ui::theme::Theme;

/// Wires taps and redraws to the tick chain.
///
/// A tap starts a sweep on the chain's current node and wakes the driver.
/// A draw runs one animation frame when a frame is due; the frame that
/// settles the node shuts the driver off again.
#[derive(Debug)]
pub struct TickController<I> {
    chain: TickChain,
    driver: AnimationDriver<I>,
    theme: Theme,
}

impl<I: Invalidate> TickController<I> {
    pub fn new(driver: AnimationDriver<I>, theme: Theme) -> Self {
        Self {
            chain: TickChain::new(),
            driver,
            theme,
        }
    }

    pub fn chain(&self) -> &TickChain {
        &self.chain
    }

    pub fn driver(&self) -> &AnimationDriver<I> {
        &self.driver
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Paint the row, then advance the animation by at most one frame.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<NodeStep> {
        surface.clear(self.theme.background);
        self.chain.draw(surface, &self.theme);

        let chain = &mut self.chain;
        let step = self.driver.animate(|| chain.update());
        if let Some(NodeStep::Settled { .. }) = step {
            self.driver.stop();
        }
        step
    }

    /// The frame redraw scheduled by the last animated draw has arrived
    pub fn frame_due(&mut self) {
        self.driver.frame_due();
    }

    /// Handle a primary press. Ignored while the current node is animating.
    pub fn handle_tap(&mut self) -> bool {
        match self.chain.start_updating() {
            Some(direction) => {
                debug!(
                    index = self.chain.current().index(),
                    direction, "tap started sweep"
                );
                self.driver.start();
                true
            }
            None => {
                debug!("tap ignored, sweep in progress");
                false
            }
        }
    }
}
