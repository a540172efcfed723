use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SplitCriterion {
    #[default]
    Entropy,
}

/// Training configuration. Serialized alongside the tree so a loaded model
/// knows which attribute it predicts. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TreeConfig {
    pub category_attr: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_attributes: Vec<String>,

    #[serde(default)]
    pub criterion: SplitCriterion,

    /// 0 means unlimited.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_depth: i64,

    /// Nodes with fewer records than this become leaves. 0 means no limit.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub min_samples: i64,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl TreeConfig {
    pub fn new(category_attr: impl Into<String>) -> Self {
        Self {
            category_attr: category_attr.into(),
            ignored_attributes: Vec::new(),
            criterion: SplitCriterion::Entropy,
            max_depth: 0,
            min_samples: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples(mut self, min_samples: i64) -> Self {
        self.min_samples = min_samples;
        self
    }

    pub fn with_ignored<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, attribute: &str) -> bool {
        self.ignored_attributes.iter().any(|a| a == attribute)
    }

    pub(crate) fn depth_limit_reached(&self, depth: usize) -> bool {
        self.max_depth > 0 && depth as i64 >= self.max_depth
    }

    pub(crate) fn too_few_samples(&self, n: usize) -> bool {
        self.min_samples > 0 && (n as i64) < self.min_samples
    }
}
