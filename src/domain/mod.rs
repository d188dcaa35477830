//! Domain layer: the node model
//!
//! Arena-backed forest, traversal and display. No I/O, no CLI, no config.

pub mod arena;
pub mod display;
pub mod error;
pub mod iter;

pub use arena::{NodeId, TreeArena, TreeNode};
pub use display::TreeDisplay;
pub use error::{TreeError, TreeResult};
pub use iter::{Ancestors, PostOrderIterator, TreeIterator};
