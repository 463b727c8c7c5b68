//! Bulk-load a comments CSV into a SQLite table and run the distinct-count
//! aggregates against it.

use crate::config::{Store, DEFAULT_TABLE_NAME};
use crate::csv_io::{read_frame_cfg, DEFAULT_BUFFER_BYTES};
use crate::error::{PipelineError, Result};
use crate::frame::cell_text;
use crate::normalize::PARENT_ID;
use crate::progress::make_row_progress;
use polars::prelude::{AnyValue, DataFrame, DataType};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use serde::Serialize;
use std::path::Path;

pub const COMMENT_ID: &str = "comment_id";

/// Result of [`count_distinct`]. `post_count` counts distinct `parent_id`
/// references among comments, not distinct submissions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DistinctCounts {
    pub post_count: u64,
    pub comment_count: u64,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_affinity(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Null => "",
        DataType::Boolean => " INTEGER",
        t if t.is_integer() => " INTEGER",
        t if t.is_float() => " REAL",
        _ => " TEXT",
    }
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Integer(i64::from(b)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map(Value::Integer).unwrap_or(Value::Real(v as f64)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        other => Value::Text(cell_text(other)),
    }
}

pub fn open_store(store: &Store) -> Result<Connection> {
    let conn = match store {
        Store::File(path) => {
            tracing::debug!("opening relational store {}", path.display());
            Connection::open(path)?
        }
        Store::Memory => Connection::open_in_memory()?,
    };
    Ok(conn)
}

/// Read `source` fully and replace the `comment_table` table in `destination`
/// with its rows. Returns the open connection for follow-up queries.
pub fn load(source: &Path, destination: &Store) -> Result<Connection> {
    load_cfg(source, destination, DEFAULT_TABLE_NAME, DEFAULT_BUFFER_BYTES, false)
}

pub fn load_cfg(
    source: &Path,
    destination: &Store,
    table_name: &str,
    read_buf_bytes: usize,
    progress: bool,
) -> Result<Connection> {
    let frame = read_frame_cfg(source, read_buf_bytes)?;
    let mut conn = open_store(destination)?;
    let n = load_frame(&mut conn, table_name, &frame, progress)?;
    tracing::info!("loaded {n} rows from {} into `{table_name}`", source.display());
    Ok(conn)
}

/// Drop `table_name` if it exists and recreate it from `frame`, preserving
/// column order and row order. Runs in one transaction.
pub fn load_frame(conn: &mut Connection, table_name: &str, frame: &DataFrame, progress: bool) -> Result<usize> {
    let ident = quote_ident(table_name);
    let columns = frame.get_columns();
    let column_defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{}{}", quote_ident(c.name()), sql_affinity(c.dtype())))
        .collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {ident}; CREATE TABLE {ident} ({});",
        column_defs.join(", ")
    ))?;

    let pb = make_row_progress(frame.height() as u64, &format!("Loading {table_name}"), progress);
    {
        let mut stmt = tx.prepare(&format!("INSERT INTO {ident} VALUES ({})", placeholders.join(", ")))?;
        let mut row: Vec<Value> = Vec::with_capacity(columns.len());
        for i in 0..frame.height() {
            row.clear();
            for c in columns {
                row.push(sql_value(c.get(i)?));
            }
            stmt.execute(params_from_iter(row.iter()))?;
            pb.inc(1);
        }
    }
    tx.commit()?;
    pb.finish_and_clear();
    Ok(frame.height())
}

/// Column names of `table_name`, in declaration order.
fn table_columns(conn: &Connection, table_name: &str) -> Result<Vec<String>> {
    let stmt = conn.prepare(&format!("SELECT * FROM {} LIMIT 0", quote_ident(table_name)))?;
    Ok(stmt.column_names().into_iter().map(str::to_string).collect())
}

pub fn count_distinct(conn: &Connection) -> Result<DistinctCounts> {
    count_distinct_in(conn, DEFAULT_TABLE_NAME)
}

/// Both columns must exist: SQLite would otherwise read a double-quoted
/// unknown column as a string literal and count it once.
pub fn count_distinct_in(conn: &Connection, table_name: &str) -> Result<DistinctCounts> {
    let present = table_columns(conn, table_name)?;
    for required in [PARENT_ID, COMMENT_ID] {
        if !present.iter().any(|c| c == required) {
            return Err(PipelineError::missing_column(required));
        }
    }

    let ident = quote_ident(table_name);
    let distinct = |column: &str| -> Result<u64> {
        let sql = format!("SELECT COUNT(DISTINCT {}) FROM {ident}", quote_ident(column));
        let n: i64 = conn.query_row(&sql, [], |r| r.get(0))?;
        Ok(n.max(0) as u64)
    };
    let counts = DistinctCounts {
        post_count: distinct(PARENT_ID)?,
        comment_count: distinct(COMMENT_ID)?,
    };
    tracing::debug!("post_count = {}", counts.post_count);
    tracing::debug!("comment_count = {}", counts.comment_count);
    Ok(counts)
}
