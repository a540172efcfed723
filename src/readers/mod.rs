//! Loading tabular records from disk.

mod csv_reader;
mod jsonl_reader;

use crate::core::{DtreeError, Record, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataFormat {
    #[default]
    Csv,
    Jsonl,
}

/// Rows read from a file, plus the column order to mirror on output.
///
/// A row is `None` when the source spelled it as a literal `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Option<Record>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ready for training: every row present and labelled.
    pub fn into_training_set(self, label: &str) -> Result<Vec<Record>> {
        self.rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| match row {
                None => Err(DtreeError::InvalidData(format!("row {} is null", i + 1))),
                Some(r) if !r.contains_key(label) => Err(DtreeError::InvalidData(format!(
                    "missing label '{label}' in row {}",
                    i + 1
                ))),
                Some(r) => Ok(r),
            })
            .collect()
    }
}

pub fn read_dataset(path: impl AsRef<Path>, format: DataFormat) -> Result<Dataset> {
    let reader = BufReader::new(File::open(path)?);
    match format {
        DataFormat::Csv => csv_reader::read(reader),
        DataFormat::Jsonl => jsonl_reader::read(reader),
    }
}
