//! Small helpers over polars `DataFrame`s shared by every stage: required
//! columns, tolerant drops, cell text and a structural summary for logging.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| PipelineError::missing_column(name))
}

/// Remove the named columns; names not present are ignored. Returns how many went.
pub fn drop_present(df: &mut DataFrame, names: &[&str]) -> Result<usize> {
    let mut dropped = 0;
    for name in names {
        if df.get_column_index(name).is_some() {
            df.drop_in_place(name)?;
            dropped += 1;
        }
    }
    Ok(dropped)
}

/// Plain text of one value: nulls are empty, strings unquoted.
pub fn cell_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

pub fn summarize(df: &DataFrame) -> Vec<ColumnSummary> {
    df.get_columns()
        .iter()
        .map(|c| ColumnSummary {
            name: c.name().to_string(),
            dtype: c.dtype().to_string(),
            non_null: c.len() - c.null_count(),
        })
        .collect()
}

/// Emit the structural summary as tracing events.
pub fn log_summary(df: &DataFrame, label: &str) {
    tracing::info!("{label}: {} rows x {} columns", df.height(), df.width());
    for (i, col) in summarize(df).iter().enumerate() {
        tracing::info!("  {i:>3}  {:<32} {:>10} non-null  {}", col.name, col.non_null, col.dtype);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df![
            "a" => [1i64, 2],
            "b" => [Some("x"), None],
            "c" => [None, Some(0.5f64)],
        ]
        .unwrap()
    }

    #[test]
    fn drop_present_is_tolerant_and_idempotent() {
        let mut df = sample();
        assert_eq!(drop_present(&mut df, &["b", "missing"]).unwrap(), 1);
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["a", "c"]);

        assert_eq!(drop_present(&mut df, &["b", "missing"]).unwrap(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn missing_column_is_named() {
        let df = sample();
        match require_column(&df, "nope") {
            Err(PipelineError::MissingColumn { column }) => assert_eq!(column, "nope"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn summary_counts_non_null() {
        let s = summarize(&sample());
        assert_eq!(s[0].non_null, 2);
        assert_eq!(s[1].non_null, 1);
        assert_eq!(s[2].non_null, 1);
        assert_eq!(s[0].dtype, DataType::Int64.to_string());
    }

    #[test]
    fn cell_text_unquotes_strings_and_blanks_nulls() {
        let df = sample();
        let b = df.column("b").unwrap();
        assert_eq!(cell_text(b.get(0).unwrap()), "x");
        assert_eq!(cell_text(b.get(1).unwrap()), "");
        assert_eq!(cell_text(df.column("a").unwrap().get(1).unwrap()), "2");
    }
}
