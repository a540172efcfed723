use crate::classifiers::decision_tree::node::TreeNode;
use crate::core::{DtreeError, Result, TreeConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A trained tree together with the configuration it was trained with.
/// Immutable once built; safe to share between threads for prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub root: Option<TreeNode>,
    pub config: TreeConfig,
}

impl Model {
    pub fn new(root: TreeNode, config: TreeConfig) -> Self {
        Self {
            root: Some(root),
            config,
        }
    }

    pub fn root(&self) -> Result<&TreeNode> {
        self.root
            .as_ref()
            .ok_or_else(|| DtreeError::invalid_model("model has no root node"))
    }

    /// Every node, depth-first with `Match` before `NoMatch`. Empty without a root.
    pub fn nodes(&self) -> impl Iterator<Item = (&TreeNode, usize)> {
        self.root.iter().flat_map(TreeNode::depth_first)
    }

    /// Check configuration and tree invariants, reporting the first violation
    /// in depth-first order.
    pub fn validate(&self) -> Result<()> {
        let root = self.root()?;

        if self.config.category_attr.is_empty() {
            return Err(DtreeError::invalid_model(
                "model config missing categoryAttr",
            ));
        }
        if self.config.max_depth < 0 {
            return Err(DtreeError::invalid_model(
                "model config has negative maxDepth",
            ));
        }
        if self.config.min_samples < 0 {
            return Err(DtreeError::invalid_model(
                "model config has negative minSamples",
            ));
        }

        root.depth_first()
            .try_for_each(|(node, depth)| validate_node(node, depth))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Decode and validate a model.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let model: Model = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

fn validate_node(node: &TreeNode, depth: usize) -> Result<()> {
    let fail = |msg: &str| Err(DtreeError::invalid_model(format!("{msg} (depth {depth})")));

    if node.is_leaf() {
        if node.class_counts.is_none() {
            return fail("leaf node missing classCounts");
        }
        return Ok(());
    }

    if node.match_branch.is_none() || node.no_match.is_none() {
        return fail("internal node missing one or both children");
    }
    if node.attribute.is_empty() {
        return fail("internal node missing attribute");
    }
    if node.predicate.is_none() {
        return fail("internal node missing or unknown predicateName");
    }
    if node.class_counts.is_none() {
        return fail("internal node missing classCounts");
    }
    Ok(())
}
