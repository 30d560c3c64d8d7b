pub mod chain;
pub mod icon;
pub mod node;

pub use chain::{Direction, TickChain};
pub use node::NodeStep;

/// Number of icons in the row
pub const NODES: usize = 5;
