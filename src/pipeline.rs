use crate::config::{PipelineOptions, Store};
use crate::loader::{count_distinct_in, load_cfg, DistinctCounts};
use crate::merger::merge_cfg;
use polars::prelude::DataFrame;
use crate::util::init_tracing_once;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct RedditPipeline {
    pub(crate) opts: PipelineOptions,
}

/// What one full run produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub counts: DistinctCounts,
    pub joined_rows: usize,
    pub joined_columns: usize,
    pub output_path: PathBuf,
}

impl Default for RedditPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RedditPipeline {
    pub fn new() -> Self {
        Self { opts: PipelineOptions::default() }
    }

    pub fn with_options(opts: PipelineOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &PipelineOptions { &self.opts }

    // -------- Builder methods --------
    pub fn comments_csv(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_comments_path(path); self }
    pub fn submissions_csv(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_submissions_path(path); self }
    pub fn output_csv(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output_path(path); self }
    pub fn database(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_store(Store::file(path)); self }
    pub fn in_memory_database(mut self) -> Self { self.opts = self.opts.with_store(Store::Memory); self }
    pub fn table_name(mut self, name: impl Into<String>) -> Self { self.opts = self.opts.with_table_name(name); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }

    // -------- Stages --------

    /// Load the comments into the configured store and count distinct parents/comments.
    pub fn load_and_count(&self) -> Result<DistinctCounts> {
        init_tracing_once();
        let o = &self.opts;
        let conn = load_cfg(&o.comments_path, &o.store, &o.table_name, o.read_buffer_bytes, o.progress)?;
        let counts = count_distinct_in(&conn, &o.table_name)?;
        tracing::info!(post_count = counts.post_count, comment_count = counts.comment_count, "distinct counts");
        Ok(counts)
    }

    /// Clean + normalize comments, outer-join with submissions and write the output CSV.
    pub fn merge(&self) -> Result<DataFrame> {
        init_tracing_once();
        let o = &self.opts;
        merge_cfg(&o.submissions_path, &o.comments_path, &o.output_path, o.read_buffer_bytes, o.write_buffer_bytes)
    }

    /// Both stages in order. Any failure aborts the run.
    pub fn run(&self) -> Result<RunReport> {
        let counts = self.load_and_count()?;
        let merged = self.merge()?;
        Ok(RunReport {
            counts,
            joined_rows: merged.height(),
            joined_columns: merged.width(),
            output_path: self.opts.output_path.clone(),
        })
    }
}
