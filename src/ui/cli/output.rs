use crate::classifiers::Distribution;
use crate::core::{Record, Result, Value};
use serde_json::Map;
use std::io::Write;

/// One JSON object per line: `input`, `prediction` and, when present, `proba`.
pub(super) fn write_jsonl<W: Write>(
    mut out: W,
    rows: &[Option<Record>],
    labels: &[String],
    probas: Option<&[Distribution]>,
) -> Result<()> {
    for (i, (row, label)) in rows.iter().zip(labels).enumerate() {
        let mut line = Map::new();
        line.insert("input".into(), serde_json::to_value(row)?);
        line.insert("prediction".into(), serde_json::Value::from(label.as_str()));
        if let Some(proba) = probas.and_then(|p| p.get(i)) {
            line.insert("proba".into(), serde_json::to_value(proba)?);
        }
        serde_json::to_writer(&mut out, &line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Input columns in header order, then `prediction` and optionally `proba`
/// (the distribution as a JSON object).
pub(super) fn write_csv<W: Write>(
    out: W,
    headers: &[String],
    rows: &[Option<Record>],
    labels: &[String],
    probas: Option<&[Distribution]>,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.push("prediction");
    if probas.is_some() {
        header_row.push("proba");
    }
    writer.write_record(&header_row)?;

    for (i, (row, label)) in rows.iter().zip(labels).enumerate() {
        let mut cells: Vec<String> = headers
            .iter()
            .map(|h| cell_text(row.as_ref().and_then(|r| r.get(h))))
            .collect();
        cells.push(label.clone());
        if let Some(proba) = probas.and_then(|p| p.get(i)) {
            cells.push(serde_json::to_string(proba)?);
        }
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

/// Absent and null cells are left empty so the file reads back the same way.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => v.to_string(),
    }
}
