use crate::core::{DtreeError, Record, Result, Value};
use crate::readers::Dataset;
use csv::{ReaderBuilder, Trim};
use std::io::Read;

/// Header row first; every data row must be exactly as wide.
pub(super) fn read<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // line 1 is the header
        let line = i + 2;
        if row.len() != headers.len() {
            return Err(DtreeError::InvalidData(format!(
                "row {line} has {} columns but header has {}",
                row.len(),
                headers.len()
            )));
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| (h.as_str(), parse_cell(cell)))
            .collect();
        rows.push(Some(record));
    }

    if rows.is_empty() {
        return Err(DtreeError::InvalidData("CSV file has no data rows".into()));
    }
    Ok(Dataset { headers, rows })
}

fn parse_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(cell.to_string()),
    }
}
