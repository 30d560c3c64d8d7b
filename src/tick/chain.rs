use std::fmt;

use tracing::debug;

use crate::surface::Surface;
use crate::ui::theme::Theme;

use super::node::{NodeStep, TickNode};
use super::NODES;

/// Traversal sense along the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "→"),
            Self::Backward => write!(f, "←"),
        }
    }
}

/// Fixed row of [`NODES`] tick nodes walked one settle at a time.
///
/// Only the current node reacts to taps. When it settles the cursor moves
/// one node along `direction`; at either end it stays put and the direction
/// reverses, so the next tap sweeps the boundary node back.
#[derive(Debug, Clone)]
pub struct TickChain {
    nodes: [TickNode; NODES],
    current: usize,
    direction: Direction,
}

impl Default for TickChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TickChain {
    pub fn new() -> Self {
        Self {
            nodes: std::array::from_fn(|i| TickNode::new(i, NODES)),
            current: 0,
            direction: Direction::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[TickNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&TickNode> {
        self.nodes.get(index)
    }

    pub fn current(&self) -> &TickNode {
        &self.nodes[self.current]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Draw every node, head to tail
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, theme: &Theme) {
        for node in &self.nodes {
            node.draw(surface, theme);
        }
    }

    pub fn start_updating(&mut self) -> Option<f32> {
        self.nodes[self.current].start_updating()
    }

    /// Advance the current node one frame, moving the cursor on settle.
    pub fn update(&mut self) -> NodeStep {
        let step = self.nodes[self.current].update();
        if let NodeStep::Settled { index, baseline } = step {
            let (next, flipped) = self.step_from(index);
            if flipped {
                self.direction = self.direction.reversed();
            }
            self.current = next;
            debug!(
                index,
                baseline,
                current = self.current,
                direction = %self.direction,
                "tick settled"
            );
        }
        step
    }

    /// Neighbour of `index` in the current direction. At a boundary returns
    /// `index` itself and reports that the direction must flip.
    fn step_from(&self, index: usize) -> (usize, bool) {
        match self.nodes[index].neighbor(self.direction) {
            Some(next) => (next, false),
            None => (index, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sweep(chain: &mut TickChain) -> NodeStep {
        assert!(chain.start_updating().is_some());
        loop {
            match chain.update() {
                NodeStep::Progressed => continue,
                step => return step,
            }
        }
    }

    #[test]
    fn test_chain_links() {
        let chain = TickChain::new();
        assert_eq!(chain.len(), 5);

        let head = chain.node(0).unwrap();
        let tail = chain.node(4).unwrap();
        assert_eq!(head.prev(), None);
        assert_eq!(tail.next(), None);

        for node in &chain.nodes()[..4] {
            let next = node.next().unwrap();
            assert_eq!(next, node.index() + 1);
            assert_eq!(chain.node(next).unwrap().prev(), Some(node.index()));
        }
    }

    #[test]
    fn test_new_chain_starts_at_head() {
        let chain = TickChain::new();
        assert_eq!(chain.current().index(), 0);
        assert_eq!(chain.direction(), Direction::Forward);
        assert!(chain.current().state().is_idle());
    }

    #[test]
    fn test_tap_head_advances_cursor() {
        let mut chain = TickChain::new();
        let step = run_sweep(&mut chain);

        assert_eq!(
            step,
            NodeStep::Settled {
                index: 0,
                baseline: 1.0
            }
        );
        let head = chain.node(0).unwrap().state();
        assert_eq!(head.scale(), 1.0);
        assert_eq!(head.baseline(), 1.0);
        assert_eq!(chain.current().index(), 1);
        assert_eq!(chain.direction(), Direction::Forward);
    }

    #[test]
    fn test_only_current_node_animates() {
        let mut chain = TickChain::new();
        chain.start_updating();
        for _ in 0..5 {
            chain.update();
        }
        for node in &chain.nodes()[1..] {
            assert_eq!(node.state().scale(), 0.0);
            assert!(node.state().is_idle());
        }
    }

    #[test]
    fn test_tail_flips_direction_and_stays() {
        let mut chain = TickChain::new();
        for _ in 0..4 {
            run_sweep(&mut chain);
        }
        assert_eq!(chain.current().index(), 4);
        assert_eq!(chain.direction(), Direction::Forward);

        run_sweep(&mut chain);
        assert_eq!(chain.current().index(), 4);
        assert_eq!(chain.direction(), Direction::Backward);
        assert_eq!(chain.node(4).unwrap().state().baseline(), 1.0);

        // tail sweeps back to 0, then the walk continues inward
        let step = run_sweep(&mut chain);
        assert_eq!(
            step,
            NodeStep::Settled {
                index: 4,
                baseline: 0.0
            }
        );
        assert_eq!(chain.current().index(), 3);
        assert_eq!(chain.direction(), Direction::Backward);
    }

    #[test]
    fn test_head_flips_back_to_forward() {
        let mut chain = TickChain::new();
        // forward across 5 nodes, tail twice, then back down to the head
        for _ in 0..10 {
            run_sweep(&mut chain);
        }
        assert_eq!(chain.current().index(), 0);
        assert_eq!(chain.direction(), Direction::Forward);
        assert_eq!(chain.node(0).unwrap().state().baseline(), 0.0);
    }

    #[test]
    fn test_update_idle_chain_does_not_move() {
        let mut chain = TickChain::new();
        assert_eq!(chain.update(), NodeStep::Idle);
        assert_eq!(chain.current().index(), 0);
    }

    #[test]
    fn test_direction_reverses() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
    }
}
