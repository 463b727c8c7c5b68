//! Comment cleaning: drop author flair noise, derive `created_time` (UTC) and
//! `year` from the `created_utc` epoch column.

use crate::csv_io::{read_frame_cfg, DEFAULT_BUFFER_BYTES};
use crate::error::{PipelineError, Result};
use crate::frame::{cell_text, drop_present, require_column};
use crate::timestamp::{epoch_seconds_to_micros, format_timestamp, micros_to_utc, utc_datetime};
use polars::prelude::*;
use std::path::Path;

pub const AUTHOR_FLAIR_COLUMNS: [&str; 4] = [
    "author_flair_text",
    "author_flair_type",
    "author_flair_template_id",
    "author_flair_richtext",
];

pub const CREATED_UTC: &str = "created_utc";
pub const CREATED_TIME: &str = "created_time";
pub const YEAR: &str = "year";

pub fn clean(source: &Path) -> Result<DataFrame> {
    clean_cfg(source, DEFAULT_BUFFER_BYTES)
}

pub fn clean_cfg(source: &Path, read_buf_bytes: usize) -> Result<DataFrame> {
    let comments = read_frame_cfg(source, read_buf_bytes)?;
    tracing::debug!("cleaning {} comment rows from {}", comments.height(), source.display());
    clean_frame(comments)
}

/// Pure core of [`clean`]. Fails on the first row whose `created_utc` is not
/// a usable epoch; no partially derived frame is returned.
pub fn clean_frame(mut comments: DataFrame) -> Result<DataFrame> {
    drop_present(&mut comments, &AUTHOR_FLAIR_COLUMNS)?;
    let micros = epoch_micros(require_column(&comments, CREATED_UTC)?)?;

    match (micros.iter().min().copied(), micros.iter().max().copied()) {
        (Some(earliest), Some(latest)) => {
            if let (Some(e), Some(l)) = (micros_to_utc(earliest), micros_to_utc(latest)) {
                tracing::info!("Earliest time = {}", format_timestamp(e));
                tracing::info!("Latest time = {}", format_timestamp(l));
            }
        }
        _ => tracing::info!("no comments to clean"),
    }

    let created = Series::new(CREATED_TIME.into(), micros).cast(&utc_datetime())?;
    comments.with_column(created)?;
    let cleaned = comments
        .lazy()
        .with_column(col(CREATED_TIME).dt().year().cast(DataType::Int64).alias(YEAR))
        .collect()?;
    Ok(cleaned)
}

/// Every row's epoch in microseconds. Ints, floats and numeric text are
/// accepted; nulls and anything unparseable stop at the offending row.
fn epoch_micros(raw: &Column) -> Result<Vec<i64>> {
    let secs = raw.cast(&DataType::Float64)?;
    let secs = secs.f64()?;
    let mut out = Vec::with_capacity(secs.len());
    for (row, v) in secs.iter().enumerate() {
        match v.and_then(epoch_seconds_to_micros) {
            Some(us) => out.push(us),
            None => {
                return Err(PipelineError::Data {
                    row,
                    column: CREATED_UTC.to_string(),
                    value: cell_text(raw.get(row)?),
                })
            }
        }
    }
    Ok(out)
}
