//! Interval items and the augmented interval tree that indexes them.
//!
//! ## Submodules
//!
//! - [`item`]: [`IntervalItem`], a half-open range with an attached value.
//! - [`tree`]: [`IntervalTree`], an unbalanced BST keyed by start and
//!   annotated with the subtree maximum end.

pub mod item;
pub mod tree;

pub use item::IntervalItem;
pub use tree::{IntervalTree, NodeId, NodeShape, TraverseOrder};
