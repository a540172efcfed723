use crate::core::{DtreeError, Record, Result};
use crate::readers::Dataset;
use log::warn;
use std::io::BufRead;

/// One JSON object per line. Blank lines are skipped, `null` yields a null row.
pub(super) fn read<R: BufRead>(source: R) -> Result<Dataset> {
    let mut rows = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| {
            DtreeError::InvalidData(format!("invalid JSON on line {line_no}: {e}"))
        })?;
        match parsed {
            serde_json::Value::Null => {
                warn!("line {line_no} is null");
                rows.push(None);
            }
            serde_json::Value::Object(map) => {
                let record = Record::try_from(map).map_err(|e| {
                    DtreeError::InvalidData(format!("line {line_no}: {}", e.detail()))
                })?;
                rows.push(Some(record));
            }
            other => {
                return Err(DtreeError::InvalidData(format!(
                    "line {line_no} is not a JSON object: {other}"
                )));
            }
        }
    }

    if rows.is_empty() {
        return Err(DtreeError::InvalidData("JSONL file has no records".into()));
    }
    let headers: Vec<String> = rows
        .iter()
        .flatten()
        .next()
        .map(|r| r.keys().map(str::to_string).collect())
        .unwrap_or_default();
    Ok(Dataset { headers, rows })
}
