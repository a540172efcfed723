pub mod classifier;
pub mod decision_tree;

pub use classifier::{BatchPrediction, Classifier, Distribution};
