//! Delimited-file IO: read a whole CSV (optionally `.zst`-compressed) into a
//! polars `DataFrame`, and write a frame back out with a header and no index column.

use crate::error::{PipelineError, Result};
use crate::timestamp::CSV_DATETIME_FORMAT;
use crate::util::{replace_file, temp_sibling};
use polars::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::sync::Arc;
use zstd::stream::read::Decoder;

pub const DEFAULT_BUFFER_BYTES: usize = 256 * 1024;

/// Reddit ids are base36 strings; `1e5` or `0042` must not go through numeric inference.
pub const ID_COLUMNS: [&str; 3] = ["submission_id", "comment_id", "parent_id"];

fn open_source(path: &Path, buf_bytes: usize) -> Result<Box<dyn Read>> {
    let input_err = |source| PipelineError::Input { path: path.to_path_buf(), source };
    let f = File::open(path).map_err(input_err)?;
    let r = BufReader::with_capacity(buf_bytes.max(8 * 1024), f);
    let compressed = path.extension().and_then(|e| e.to_str()) == Some("zst");
    if compressed {
        let mut dec = Decoder::with_buffer(r).map_err(input_err)?;
        dec.window_log_max(31).map_err(input_err)?;
        Ok(Box::new(dec))
    } else {
        Ok(Box::new(r))
    }
}

fn read_source(path: &Path, buf_bytes: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    open_source(path, buf_bytes)?
        .read_to_end(&mut bytes)
        .map_err(|source| PipelineError::Input { path: path.to_path_buf(), source })?;
    Ok(bytes)
}

fn header_names(path: &Path, bytes: &[u8]) -> Result<Vec<String>> {
    let mut rdr = ::csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = rdr
        .headers()
        .map_err(|source| PipelineError::Header { path: path.to_path_buf(), source })?;
    Ok(headers.iter().map(str::to_string).collect())
}

pub fn read_frame(path: &Path) -> Result<DataFrame> {
    read_frame_cfg(path, DEFAULT_BUFFER_BYTES)
}

/// Read the full file into memory. Types are inferred over every row, except
/// for [`ID_COLUMNS`] which stay text. Short rows are padded with nulls; rows
/// with more fields than the header are an error.
pub fn read_frame_cfg(path: &Path, buf_bytes: usize) -> Result<DataFrame> {
    let bytes = read_source(path, buf_bytes)?;

    let mut ids = Schema::default();
    for name in header_names(path, &bytes)? {
        if ID_COLUMNS.contains(&name.as_str()) {
            ids.with_column(name.into(), DataType::String);
        }
    }
    let overwrite = if ids.is_empty() { None } else { Some(Arc::new(ids)) };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(overwrite)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| PipelineError::Csv { path: path.to_path_buf(), source })?;
    tracing::debug!("read {} rows x {} columns from {}", df.height(), df.width(), path.display());
    Ok(df)
}

pub fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    write_frame_cfg(path, df, DEFAULT_BUFFER_BYTES)
}

/// Write header + rows to a temp file beside `path`, then move it into place,
/// so a failure never leaves a half-written file at `path`.
pub fn write_frame_cfg(path: &Path, df: &mut DataFrame, buf_bytes: usize) -> Result<()> {
    let tmp = temp_sibling(path);
    let written = write_rows(&tmp, df, buf_bytes).and_then(|()| replace_file(&tmp, path));
    if let Err(source) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(PipelineError::Output { path: path.to_path_buf(), source });
    }
    Ok(())
}

fn write_rows(path: &Path, df: &mut DataFrame, buf_bytes: usize) -> io::Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::with_capacity(buf_bytes.max(8 * 1024), f);
    CsvWriter::new(&mut w)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.into()))
        .finish(df)
        .map_err(io::Error::other)?;
    w.flush()
}
