use crate::classifiers::decision_tree::impurity::{ClassCounts, ValueTally};
use crate::classifiers::decision_tree::model::Model;
use crate::classifiers::decision_tree::node::TreeNode;
use crate::classifiers::decision_tree::splitter::{Predicate, split};
use crate::core::{DtreeError, Record, Result, TreeConfig, Value};
use log::{debug, info};
use rayon::prelude::*;

/// Subsets whose target entropy is at or below this are treated as pure.
pub const PURITY_TOLERANCE: f64 = 1e-5;

/// One `(attribute, predicate, pivot)` split considered during search.
#[derive(Debug, Clone, Copy)]
struct Candidate<'r> {
    attribute: &'r str,
    predicate: Predicate,
    pivot: &'r Value,
}

/// Greedy top-down induction of a binary tree by information gain.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: TreeConfig,
    parallel: bool,
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            parallel: false,
        }
    }

    /// Evaluate candidate gains on the rayon pool. The chosen split is the
    /// same as in serial search.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn fit(&self, records: &[Record]) -> Result<Model> {
        self.check_inputs(records)?;

        let subset: Vec<&Record> = records.iter().collect();
        let root = self.grow(&subset, 0);
        let model = Model::new(root, self.config.clone());

        let stats = model.stats();
        info!(
            "trained tree on {} records: {} nodes, {} leaves, depth {}",
            records.len(),
            stats.total_nodes,
            stats.leaf_nodes,
            stats.tree_depth
        );
        Ok(model)
    }

    fn check_inputs(&self, records: &[Record]) -> Result<()> {
        let target = &self.config.category_attr;
        if records.is_empty() {
            return Err(DtreeError::invalid_input("training set cannot be empty"));
        }
        if target.is_empty() {
            return Err(DtreeError::invalid_input("categoryAttr is required"));
        }
        if !records.iter().any(|r| r.contains_key(target)) {
            return Err(DtreeError::invalid_input(format!(
                "categoryAttr '{target}' not found in any training record"
            )));
        }
        if self.config.max_depth < 0 {
            return Err(DtreeError::invalid_input("maxDepth cannot be negative"));
        }
        if self.config.min_samples < 0 {
            return Err(DtreeError::invalid_input("minSamples cannot be negative"));
        }
        Ok(())
    }

    fn grow(&self, subset: &[&Record], depth: usize) -> TreeNode {
        if subset.is_empty() {
            return TreeNode::leaf("", ClassCounts::new());
        }

        let tally = ValueTally::of(subset, &self.config.category_attr);
        let parent_entropy = tally.entropy();

        if parent_entropy <= PURITY_TOLERANCE
            || self.config.depth_limit_reached(depth)
            || self.config.too_few_samples(subset.len())
        {
            return leaf_from(tally, depth);
        }

        let Some((best, gain)) = self.best_candidate(subset, parent_entropy) else {
            return leaf_from(tally, depth);
        };

        let parts = split(subset, best.attribute, best.predicate, best.pivot);
        debug!(
            "depth {depth}: split {} {} {} (gain {gain:.6}, {}/{})",
            best.attribute,
            best.predicate,
            best.pivot,
            parts.matched.len(),
            parts.unmatched.len()
        );

        let matched = self.grow(&parts.matched, depth + 1);
        let unmatched = self.grow(&parts.unmatched, depth + 1);
        TreeNode::split(
            best.attribute,
            best.predicate,
            best.pivot.clone(),
            tally.into_class_counts(),
            matched,
            parts.matched.len(),
            unmatched,
            parts.unmatched.len(),
        )
    }

    /// Every observed `(attribute, value)` pair in record order, then each
    /// record's attribute order. Repeated pivots are kept.
    fn candidates<'r>(&self, subset: &[&'r Record]) -> Vec<Candidate<'r>> {
        let target = self.config.category_attr.as_str();
        subset
            .iter()
            .flat_map(|&record| record.iter())
            .filter(|(attribute, _)| *attribute != target && !self.config.is_ignored(attribute))
            .map(|(attribute, pivot)| Candidate {
                attribute,
                predicate: Predicate::for_pivot(pivot),
                pivot,
            })
            .collect()
    }

    /// Highest strictly positive gain; the earliest candidate wins ties.
    fn best_candidate<'r>(
        &self,
        subset: &[&'r Record],
        parent_entropy: f64,
    ) -> Option<(Candidate<'r>, f64)> {
        let candidates = self.candidates(subset);
        let target = self.config.category_attr.as_str();
        let gain_of = |c: &Candidate<'r>| {
            split(subset, c.attribute, c.predicate, c.pivot).information_gain(parent_entropy, target)
        };

        let gains: Vec<f64> = if self.parallel {
            candidates.par_iter().map(gain_of).collect()
        } else {
            candidates.iter().map(gain_of).collect()
        };

        let mut best: Option<(Candidate<'r>, f64)> = None;
        for (candidate, gain) in candidates.into_iter().zip(gains) {
            let best_gain = best.map_or(0.0, |(_, g)| g);
            if gain > best_gain {
                best = Some((candidate, gain));
            }
        }
        best
    }
}

fn leaf_from(tally: ValueTally, depth: usize) -> TreeNode {
    let category = tally.most_frequent();
    debug!("depth {depth}: leaf '{category}' over {} records", tally.total());
    TreeNode::leaf(category, tally.into_class_counts())
}

/// Train a tree on `records` with `config`.
pub fn train(records: &[Record], config: &TreeConfig) -> Result<Model> {
    TreeBuilder::new(config.clone()).fit(records)
}
