use crate::classifiers::decision_tree::impurity::ClassCounts;
use crate::classifiers::decision_tree::splitter::Predicate;
use crate::core::{Record, Value};
use serde::{Deserialize, Deserializer, Serialize};

/// A node of the trained tree.
///
/// Leaves and splits share one shape so the persisted form stays a flat nested
/// object. Leaf-ness is structural: a node without children is a leaf, whatever
/// its `category` holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_branch: Option<Box<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_match: Option<Box<TreeNode>>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_counts: Option<ClassCounts>,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub matched_count: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub no_matched_count: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribute: String,
    /// Unrecognised names decode as `None`; validation rejects them on split nodes.
    #[serde(
        rename = "predicateName",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "known_predicate"
    )]
    pub predicate: Option<Predicate>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub pivot: Value,
}

fn is_zero(v: &usize) -> bool {
    *v == 0
}

fn known_predicate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Predicate>, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|n| n.parse().ok()))
}

/// Which way a record goes at a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Match,
    NoMatch,
}

impl TreeNode {
    pub fn leaf(category: impl Into<String>, class_counts: ClassCounts) -> Self {
        Self {
            category: category.into(),
            class_counts: Some(class_counts),
            ..Self::default()
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn split(
        attribute: impl Into<String>,
        predicate: Predicate,
        pivot: Value,
        class_counts: ClassCounts,
        match_branch: TreeNode,
        matched_count: usize,
        no_match: TreeNode,
        no_matched_count: usize,
    ) -> Self {
        Self {
            match_branch: Some(Box::new(match_branch)),
            no_match: Some(Box::new(no_match)),
            category: String::new(),
            class_counts: Some(class_counts),
            matched_count,
            no_matched_count,
            attribute: attribute.into(),
            predicate: Some(predicate),
            pivot,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.match_branch.is_none() && self.no_match.is_none()
    }

    pub fn child(&self, branch: Branch) -> Option<&TreeNode> {
        match branch {
            Branch::Match => self.match_branch.as_deref(),
            Branch::NoMatch => self.no_match.as_deref(),
        }
    }

    /// Branch that saw more training records; ties go to `Match`.
    pub fn majority_branch(&self) -> Branch {
        if self.matched_count >= self.no_matched_count {
            Branch::Match
        } else {
            Branch::NoMatch
        }
    }

    /// Routing decision for `record` at this split.
    ///
    /// A missing attribute, or a null under a threshold test, follows the
    /// majority branch. Equality compares the raw value, so a null can match a
    /// null pivot.
    pub fn route(&self, record: &Record) -> Branch {
        let Some(value) = record.get(&self.attribute) else {
            return self.majority_branch();
        };
        let passes = match self.predicate.unwrap_or(Predicate::Equal) {
            Predicate::GreaterOrEqual => {
                if value.is_null() {
                    return self.majority_branch();
                }
                value.greater_or_equal(&self.pivot)
            }
            Predicate::Equal => value.equals(&self.pivot),
        };
        if passes { Branch::Match } else { Branch::NoMatch }
    }

    /// `attribute predicate pivot` for splits, the category for leaves.
    pub fn label(&self) -> String {
        if self.is_leaf() {
            return self.category.clone();
        }
        let predicate = self
            .predicate
            .map(|p| p.to_string())
            .unwrap_or_default();
        format!("{} {} {}", self.attribute, predicate, self.pivot)
    }

    /// Depth-first, `Match` before `NoMatch`, yielding each node with its depth.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![(self, 0)],
        }
    }
}

pub struct DepthFirst<'a> {
    stack: Vec<(&'a TreeNode, usize)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (&'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let Some(no_match) = node.no_match.as_deref() {
            self.stack.push((no_match, depth + 1));
        }
        if let Some(matched) = node.match_branch.as_deref() {
            self.stack.push((matched, depth + 1));
        }
        Some((node, depth))
    }
}
