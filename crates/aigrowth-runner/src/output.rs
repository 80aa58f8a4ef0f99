//! CSV datasets built from ordered JSON rows

use std::path::Path;

use aigrowth_common::SweepResult;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// One dataset row; keys keep insertion order
pub type Row = Map<String, Value>;

/// Serialize a record into a row
pub fn to_row<T: Serialize>(record: &T) -> Result<Row> {
    match serde_json::to_value(record)? {
        Value::Object(row) => Ok(row),
        other => bail!("expected a record, got {other}"),
    }
}

/// One row per sweep point; failed points carry the swept value and an `error`
pub fn sweep_rows<T: Serialize>(result: &SweepResult<T>, key: &str) -> Result<Vec<Row>> {
    sweep_rows_with(result, key, |_, output| to_row(output))
}

/// Like [`sweep_rows`] with a custom row builder for successful points
pub fn sweep_rows_with<T>(
    result: &SweepResult<T>,
    key: &str,
    build: impl Fn(f64, &T) -> Result<Row>,
) -> Result<Vec<Row>> {
    result
        .iter()
        .map(|point| match &point.outcome {
            Ok(output) => build(point.value, output),
            Err(err) => {
                let mut row = Row::new();
                row.insert(key.to_string(), Value::from(point.value));
                row.insert("error".to_string(), Value::from(err.to_string()));
                Ok(row)
            }
        })
        .collect()
}

/// Prefix every row with the metadata columns
///
/// Row values win over metadata on key collisions.
pub fn augment_rows(rows: Vec<Row>, metadata: &Row) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            let mut combined = metadata.clone();
            combined.extend(row);
            combined
        })
        .collect()
}

/// Union of row keys in first-seen order
pub fn header(rows: &[Row]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
    }
    fields
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Write rows to `path`, creating parent directories
///
/// Cells for keys a row lacks are left empty.
pub fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    if rows.is_empty() {
        bail!("cannot write an empty dataset to {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let fields = header(rows);
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    writer.write_record(&fields)?;
    for row in rows {
        writer.write_record(fields.iter().map(|field| cell(row.get(field))))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigrowth_common::{DomainError, ModelError, SweepPoint};
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_header_union_in_order() {
        let rows = vec![
            row(json!({"run_id": "r", "delta": 0.01, "t_star": 4.5})),
            row(json!({"run_id": "r", "delta": 0.0, "error": "bad"})),
        ];
        assert_eq!(header(&rows), vec!["run_id", "delta", "t_star", "error"]);
    }

    #[test]
    fn test_augment_puts_metadata_first() {
        let metadata = row(json!({"run_id": "r1", "experiment": "sweep"}));
        let rows = augment_rows(vec![row(json!({"delta": 0.01}))], &metadata);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["run_id", "experiment", "delta"]);
    }

    #[test]
    fn test_sweep_rows_mark_failures() {
        let result = SweepResult::new(vec![
            SweepPoint::new(0.01, Ok(json!({"delta": 0.01, "t_star": 4.5}))),
            SweepPoint::new(
                0.0,
                Err(ModelError::Domain(DomainError::NonPositive {
                    name: "delta",
                    value: 0.0,
                })),
            ),
        ]);
        let rows = sweep_rows(&result, "delta").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].get("error").is_none());
        assert_eq!(rows[1].get("delta"), Some(&json!(0.0)));
        assert!(rows[1]["error"].as_str().unwrap().contains("delta"));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let rows = vec![
            row(json!({"a": 1, "b": "x"})),
            row(json!({"a": 2, "c": true})),
        ];
        write_csv(&path, &rows).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["a,b,c", "1,x,", "2,,true"]);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_csv(&dir.path().join("empty.csv"), &[]).is_err());
    }
}
