use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde_json::{Map, Value};

use crate::core::TreeConfig;
use crate::readers::DataFormat;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Train, apply and inspect binary decision tree classifiers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grow a tree from labelled records and save it as JSON
    Train(TrainArgs),
    /// Classify records with a saved model
    Predict(PredictArgs),
    /// Render a saved model as HTML (and optionally Graphviz DOT)
    Visualize(VisualizeArgs),
    /// Print the shape of a saved model
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Training data file
    #[arg(long = "in", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Input format (csv, jsonl)
    #[arg(long, default_value = "csv", value_name = "FORMAT")]
    pub format: DataFormat,

    /// Attribute holding the class label [default: label]
    #[arg(long, value_name = "NAME")]
    pub label: Option<String>,

    /// Where to write the trained model
    #[arg(long, default_value = "model.json", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Stop splitting at this depth (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<i64>,

    /// Nodes with fewer records become leaves (0 = no limit)
    #[arg(long, value_name = "N")]
    pub min_samples: Option<i64>,

    /// Attribute never used for splitting (repeatable)
    #[arg(long = "ignore", value_name = "ATTR")]
    pub ignored: Vec<String>,

    /// JSON file with a base tree configuration
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override configuration fields (key=value, nested keys with dots)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<KeyValue>,

    /// Evaluate split candidates on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Do not print the model summary
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Records to classify
    #[arg(long = "in", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Saved model
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// Input format (csv, jsonl)
    #[arg(long, default_value = "csv", value_name = "FORMAT")]
    pub format: DataFormat,

    /// Output file (stdout when omitted)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,

    /// Write CSV mirroring the input columns instead of JSONL
    #[arg(long)]
    pub csv: bool,

    /// Include class probabilities
    #[arg(long)]
    pub proba: bool,
}

#[derive(Debug, Args)]
pub struct VisualizeArgs {
    /// Saved model
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    /// HTML output file
    #[arg(long, default_value = "tree.html", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Also write Graphviz DOT here
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub dot: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Saved model
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

const CATEGORY_ATTR: &str = "categoryAttr";
const IGNORED_ATTRIBUTES: &str = "ignoredAttributes";
const MAX_DEPTH: &str = "maxDepth";
const MIN_SAMPLES: &str = "minSamples";
const DEFAULT_LABEL: &str = "label";

impl TrainArgs {
    /// Base file, then explicit flags, then `--param` overrides.
    pub fn tree_config(&self) -> Result<TreeConfig> {
        let mut doc = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str::<Value>(&text)
                    .with_context(|| format!("config {} is not valid JSON", path.display()))?
            }
            None => Value::Object(Map::new()),
        };
        object_mut(&mut doc).context("config file must hold a JSON object")?;

        if let Some(label) = &self.label {
            set_path(&mut doc, CATEGORY_ATTR, Value::from(label.as_str()))?;
        } else if doc.get(CATEGORY_ATTR).is_none() {
            set_path(&mut doc, CATEGORY_ATTR, Value::from(DEFAULT_LABEL))?;
        }
        if let Some(depth) = self.max_depth {
            set_path(&mut doc, MAX_DEPTH, Value::from(depth))?;
        }
        if let Some(min) = self.min_samples {
            set_path(&mut doc, MIN_SAMPLES, Value::from(min))?;
        }
        if !self.ignored.is_empty() {
            set_path(&mut doc, IGNORED_ATTRIBUTES, Value::from(self.ignored.clone()))?;
        }
        apply_overrides(&mut doc, &self.params)?;

        serde_json::from_value(doc).context("invalid tree configuration")
    }
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = object_mut(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    object_mut(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

/// Nulls become empty objects so paths can be created on the fly.
fn object_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

/// JSON literal when it parses, plain string otherwise.
fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SplitCriterion;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dtree").chain(args.iter().copied())).unwrap()
    }

    fn train_args(args: &[&str]) -> TrainArgs {
        let mut full = vec!["train", "--in", "data.csv"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Train(t) => t,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn train_defaults() {
        let args = train_args(&[]);
        assert_eq!(args.format, DataFormat::Csv);
        assert_eq!(args.out, PathBuf::from("model.json"));
        assert!(!args.parallel);
        assert_eq!(args.tree_config().unwrap(), TreeConfig::new("label"));
    }

    #[test]
    fn flags_shape_the_config() {
        let args = train_args(&[
            "--label",
            "Play",
            "--max-depth",
            "3",
            "--min-samples",
            "2",
            "--ignore",
            "id",
            "--ignore",
            "ts",
            "--format",
            "JSONL",
        ]);
        assert_eq!(args.format, DataFormat::Jsonl);
        let cfg = args.tree_config().unwrap();
        assert_eq!(
            cfg,
            TreeConfig::new("Play")
                .with_max_depth(3)
                .with_min_samples(2)
                .with_ignored(["id", "ts"])
        );
    }

    #[test]
    fn params_override_flags_and_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categoryAttr": "target", "maxDepth": 7, "criterion": "entropy"}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = train_args(&["--config", &path, "--max-depth", "4", "--param", "minSamples=5"]);
        let cfg = args.tree_config().unwrap();
        assert_eq!(cfg.category_attr, "target");
        assert_eq!(cfg.max_depth, 4);
        assert_eq!(cfg.min_samples, 5);
        assert_eq!(cfg.criterion, SplitCriterion::Entropy);

        let args = train_args(&["--config", &path, "--param", "maxDepth=1", "--label", "y"]);
        let cfg = args.tree_config().unwrap();
        assert_eq!(cfg.category_attr, "y");
        assert_eq!(cfg.max_depth, 1);
    }

    #[test]
    fn unknown_criterion_is_rejected() {
        let args = train_args(&["--param", "criterion=gini"]);
        assert!(args.tree_config().is_err());
    }

    #[test]
    fn misspelled_param_fails_instead_of_training_unlimited() {
        assert!(train_args(&["--param", "maxdepth=3"]).tree_config().is_err());
        assert!(train_args(&["--param", "min_samples=5"]).tree_config().is_err());
    }

    #[test]
    fn misspelled_key_in_config_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"categoryAttr": "y", "maxDepht": 2}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert!(train_args(&["--config", &path]).tree_config().is_err());
    }

    #[test]
    fn negative_depth_survives_parsing() {
        let cfg = train_args(&["--max-depth=-1"]).tree_config().unwrap();
        assert_eq!(cfg.max_depth, -1);
    }

    #[test]
    fn key_values_parse_json_literals() {
        let kv = parse_key_value("maxDepth=3").unwrap();
        assert_eq!(kv.value, Value::from(3));
        let kv = parse_key_value(" categoryAttr = Play ").unwrap();
        assert_eq!(kv.key, "categoryAttr");
        assert_eq!(kv.value, Value::from("Play"));
        let kv = parse_key_value("ignoredAttributes=[\"a\",\"b\"]").unwrap();
        assert!(kv.value.is_array());
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=1").is_err());
    }

    #[test]
    fn set_path_builds_nested_objects() {
        let mut doc = Value::Null;
        set_path(&mut doc, "a.b.c", Value::from(1)).unwrap();
        assert_eq!(doc["a"]["b"]["c"], Value::from(1));
        assert!(set_path(&mut doc, "a.b.c.d", Value::from(2)).is_err());
        assert!(set_path(&mut doc, "..", Value::from(2)).is_err());
    }

    #[test]
    fn predict_and_visualize_arguments() {
        match parse(&["predict", "--in", "x.jsonl", "--model", "m.json", "--format", "jsonl", "--csv", "--proba"]).command {
            Command::Predict(p) => {
                assert_eq!(p.format, DataFormat::Jsonl);
                assert!(p.csv && p.proba);
                assert!(p.out.is_none());
            }
            other => panic!("expected predict, got {other:?}"),
        }
        match parse(&["visualize", "--model", "m.json"]).command {
            Command::Visualize(v) => {
                assert_eq!(v.out, PathBuf::from("tree.html"));
                assert!(v.dot.is_none());
            }
            other => panic!("expected visualize, got {other:?}"),
        }
    }

    #[test]
    fn predict_requires_a_model() {
        assert!(Cli::try_parse_from(["dtree", "predict", "--in", "x.csv"]).is_err());
    }
}
