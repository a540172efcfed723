//! Subcommand bodies. Each returns what the binary reports to the user.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::classifiers::Classifier;
use crate::classifiers::decision_tree::{Model, ModelStats, TreeBuilder};
use crate::core::TreeConfig;
use crate::readers::read_dataset;
use crate::render;
use crate::ui::cli::args::{PredictArgs, StatsArgs, TrainArgs, VisualizeArgs};
use crate::ui::cli::output::{write_csv, write_jsonl};

#[derive(Debug)]
pub struct TrainReport {
    pub records: usize,
    pub config: TreeConfig,
    pub stats: ModelStats,
}

pub fn train(args: &TrainArgs) -> Result<TrainReport> {
    let config = args.tree_config()?;
    let data = read_dataset(&args.input, args.format)
        .with_context(|| format!("failed to read training data from {}", args.input.display()))?;
    let records = data
        .into_training_set(&config.category_attr)
        .context("training data is not usable")?;

    let model = TreeBuilder::new(config.clone())
        .parallel(args.parallel)
        .fit(&records)
        .context("training failed")?;
    model
        .save_json(&args.out)
        .with_context(|| format!("failed to save model to {}", args.out.display()))?;

    Ok(TrainReport {
        records: records.len(),
        config,
        stats: model.stats(),
    })
}

/// Rows written before stopping; the command fails if that is not every row.
pub fn predict(args: &PredictArgs) -> Result<usize> {
    let model = load_model(&args.model)?;
    let data = read_dataset(&args.input, args.format)
        .with_context(|| format!("failed to read input data from {}", args.input.display()))?;

    let labels = model.predict_batch(data.rows.iter().map(Option::as_ref));
    let probas = args
        .proba
        .then(|| model.predict_proba_batch(data.rows.iter().map(Option::as_ref)));

    let written = probas
        .as_ref()
        .map_or(labels.predictions.len(), |p| {
            p.predictions.len().min(labels.predictions.len())
        });
    let rows = &data.rows[..written];
    let label_slice = &labels.predictions[..written];
    let proba_slice = probas.as_ref().map(|p| &p.predictions[..written]);

    let sink = open_output(args.out.as_deref())?;
    let output = if args.csv {
        write_csv(sink, &data.headers, rows, label_slice, proba_slice)
    } else {
        write_jsonl(sink, rows, label_slice, proba_slice)
    };
    output.context("failed to write predictions")?;

    let failure = labels
        .error
        .or_else(|| probas.and_then(|p| p.error));
    if let Some(err) = failure {
        return Err(err).with_context(|| format!("prediction failed on row {}", written + 1));
    }
    Ok(written)
}

pub fn visualize(args: &VisualizeArgs) -> Result<()> {
    let model = load_model(&args.model)?;
    render::write_html(&model, &args.out)
        .with_context(|| format!("failed to write HTML to {}", args.out.display()))?;
    if let Some(dot) = &args.dot {
        fs::write(dot, render::to_dot(&model))
            .with_context(|| format!("failed to write DOT to {}", dot.display()))?;
    }
    Ok(())
}

pub fn stats(args: &StatsArgs) -> Result<ModelStats> {
    Ok(load_model(&args.model)?.stats())
}

fn load_model(path: &Path) -> Result<Model> {
    Model::load_json(path).with_context(|| format!("failed to load model from {}", path.display()))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("failed to create output file {}", p.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
