use crate::classifiers::decision_tree::model::Model;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Shape summary of a trained tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Distance from the root (depth 0) to the deepest node.
    pub tree_depth: usize,
    pub total_nodes: usize,
    pub leaf_nodes: usize,
    pub internal_nodes: usize,
    /// Non-empty categories found at leaves.
    pub classes: BTreeSet<String>,
}

impl Model {
    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats::default();
        for (node, depth) in self.nodes() {
            stats.total_nodes += 1;
            stats.tree_depth = stats.tree_depth.max(depth);
            if node.is_leaf() {
                stats.leaf_nodes += 1;
                if !node.category.is_empty() {
                    stats.classes.insert(node.category.clone());
                }
            } else {
                stats.internal_nodes += 1;
            }
        }
        stats
    }
}

impl Display for ModelStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Tree depth: {}", self.tree_depth)?;
        writeln!(f, "Total nodes: {}", self.total_nodes)?;
        writeln!(f, "Leaf nodes: {}", self.leaf_nodes)?;
        writeln!(f, "Internal nodes: {}", self.internal_nodes)?;
        write!(f, "Classes: {}", self.classes.len())?;
        if !self.classes.is_empty() {
            let names: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            write!(f, " ({})", names.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::decision_tree::builder::train;
    use crate::classifiers::decision_tree::impurity::ClassCounts;
    use crate::classifiers::decision_tree::node::TreeNode;
    use crate::core::TreeConfig;
    use crate::record;
    use crate::testing::weather;

    #[test]
    fn simple_tree_has_root_and_two_leaves() {
        let rs = vec![
            record! { "x" => 1.0, "label" => "A" },
            record! { "x" => 2.0, "label" => "B" },
        ];
        let model = train(&rs, &TreeConfig::new("label")).unwrap();
        let stats = model.stats();

        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.leaf_nodes, 2);
        assert_eq!(stats.internal_nodes, 1);
        assert_eq!(stats.tree_depth, 1);
        assert_eq!(stats.classes.len(), 2);
    }

    #[test]
    fn weather_tree_counts_are_consistent() {
        let model = train(&weather(), &TreeConfig::new("Play")).unwrap();
        let stats = model.stats();

        assert!(stats.internal_nodes > 0);
        assert_eq!(stats.total_nodes, stats.leaf_nodes + stats.internal_nodes);
        assert_eq!(stats.leaf_nodes, stats.internal_nodes + 1);
        let classes: Vec<&str> = stats.classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["no", "yes"]);
    }

    #[test]
    fn single_leaf_model() {
        let rs = vec![record! { "label" => "yes" }, record! { "label" => "yes" }];
        let stats = train(&rs, &TreeConfig::new("label")).unwrap().stats();
        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.leaf_nodes, 1);
        assert_eq!(stats.internal_nodes, 0);
        assert_eq!(stats.tree_depth, 0);
    }

    #[test]
    fn empty_categories_are_not_classes() {
        let model = Model::new(TreeNode::leaf("", ClassCounts::new()), TreeConfig::new("l"));
        let stats = model.stats();
        assert_eq!(stats.leaf_nodes, 1);
        assert!(stats.classes.is_empty());
    }

    #[test]
    fn rootless_model_has_zero_stats() {
        let model = Model {
            root: None,
            config: TreeConfig::new("l"),
        };
        assert_eq!(model.stats(), ModelStats::default());
    }

    #[test]
    fn max_depth_bounds_reported_depth() {
        let cfg = TreeConfig::new("Play").with_max_depth(1);
        let stats = train(&weather(), &cfg).unwrap().stats();
        assert!(stats.tree_depth <= 1);
    }

    #[test]
    fn display_lists_classes() {
        let rs = vec![
            record! { "x" => 1.0, "label" => "A" },
            record! { "x" => 2.0, "label" => "B" },
        ];
        let text = train(&rs, &TreeConfig::new("label")).unwrap().stats().to_string();
        assert!(text.contains("Total nodes: 3"));
        assert!(text.ends_with("Classes: 2 (A, B)"));
    }
}
