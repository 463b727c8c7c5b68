//! Submissions × cleaned comments: normalize `parent_id`, full outer join on
//! `submission_id` = `parent_clean_id`, drop link flair noise, write CSV.

use crate::cleaner::clean_cfg;
use crate::csv_io::{read_frame_cfg, write_frame_cfg, DEFAULT_BUFFER_BYTES};
use crate::error::Result;
use crate::frame::{drop_present, log_summary, require_column};
use crate::join::outer_join;
use crate::normalize::{normalize_comments, PARENT_CLEAN_ID};
use polars::prelude::DataFrame;
use std::path::Path;

pub const SUBMISSION_ID: &str = "submission_id";

pub const LINK_FLAIR_COLUMNS: [&str; 4] = [
    "link_flair_text",
    "link_flair_type",
    "link_flair_template_id",
    "link_flair_richtext",
];

pub fn merge(submissions: &Path, comments: &Path, output: &Path) -> Result<DataFrame> {
    merge_cfg(submissions, comments, output, DEFAULT_BUFFER_BYTES, DEFAULT_BUFFER_BYTES)
}

pub fn merge_cfg(
    submissions: &Path,
    comments: &Path,
    output: &Path,
    read_buf_bytes: usize,
    write_buf_bytes: usize,
) -> Result<DataFrame> {
    let subs = read_frame_cfg(submissions, read_buf_bytes)?;
    let cleaned = clean_cfg(comments, read_buf_bytes)?;
    let mut merged = merge_frames(subs, cleaned)?;

    write_frame_cfg(output, &mut merged, write_buf_bytes)?;
    tracing::info!("Merged data saved to {}", output.display());
    log_summary(&merged, "merged");
    Ok(merged)
}

/// Pure core of [`merge`]: join `submissions` against already-cleaned comments.
pub fn merge_frames(submissions: DataFrame, cleaned_comments: DataFrame) -> Result<DataFrame> {
    require_column(&submissions, SUBMISSION_ID)?;
    let comments = normalize_comments(cleaned_comments)?;
    let mut joined = outer_join(submissions, comments, SUBMISSION_ID, PARENT_CLEAN_ID)?;
    drop_present(&mut joined, &LINK_FLAIR_COLUMNS)?;
    Ok(joined)
}
