use crate::classifiers::classifier::{Classifier, Distribution};
use crate::classifiers::decision_tree::impurity::{ClassCounts, distribution, majority_label};
use crate::classifiers::decision_tree::model::Model;
use crate::classifiers::decision_tree::node::TreeNode;
use crate::core::{DtreeError, Record, Result};
use log::warn;

/// Where traversal stopped.
#[derive(Debug, Clone, Copy)]
pub enum Reached<'a> {
    Leaf(&'a TreeNode),
    /// The routed child was missing; answers come from this node's counts.
    DeadEnd(&'a TreeNode),
}

impl<'a> Reached<'a> {
    pub fn node(&self) -> &'a TreeNode {
        match self {
            Reached::Leaf(n) | Reached::DeadEnd(n) => n,
        }
    }

    fn class_counts(&self) -> ClassCounts {
        self.node().class_counts.clone().unwrap_or_default()
    }
}

pub fn descend<'a>(root: &'a TreeNode, record: &Record) -> Reached<'a> {
    let mut node = root;
    loop {
        if node.is_leaf() {
            return Reached::Leaf(node);
        }
        let branch = node.route(record);
        match node.child(branch) {
            Some(next) => node = next,
            None => {
                warn!(
                    "no {branch:?} child under split on '{}', using node counts",
                    node.attribute
                );
                return Reached::DeadEnd(node);
            }
        }
    }
}

impl Model {
    /// Traverse to the node answering for `record`.
    pub fn reach(&self, record: Option<&Record>) -> Result<Reached<'_>> {
        let root = self.root()?;
        let record = record.ok_or_else(|| DtreeError::invalid_input("record is null"))?;
        Ok(descend(root, record))
    }
}

impl Classifier for Model {
    fn classify(&self, record: Option<&Record>) -> Result<String> {
        Ok(match self.reach(record)? {
            Reached::Leaf(node) => node.category.clone(),
            dead_end @ Reached::DeadEnd(_) => majority_label(&dead_end.class_counts()),
        })
    }

    fn class_distribution(&self, record: Option<&Record>) -> Result<Distribution> {
        let reached = self.reach(record)?;
        Ok(distribution(&reached.class_counts()))
    }
}
