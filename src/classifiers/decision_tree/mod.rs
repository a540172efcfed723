pub mod builder;
pub mod impurity;
pub mod model;
pub mod node;
pub mod predict;
pub mod splitter;
pub mod stats;

pub use builder::{PURITY_TOLERANCE, TreeBuilder, train};
pub use impurity::{ClassCounts, entropy};
pub use model::Model;
pub use node::{Branch, TreeNode};
pub use predict::Reached;
pub use splitter::{Predicate, Split, split};
pub use stats::ModelStats;
