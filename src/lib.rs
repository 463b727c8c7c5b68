mod config;
mod error;
mod frame;
mod timestamp;
mod csv_io;
mod progress;
mod util;

mod loader;
mod cleaner;
mod normalize;
mod join;
mod merger;
mod pipeline;

pub use crate::config::{
    PipelineOptions, Store, DEFAULT_COMMENTS_CSV, DEFAULT_DB_PATH, DEFAULT_OUTPUT_CSV, DEFAULT_SUBMISSIONS_CSV,
    DEFAULT_TABLE_NAME,
};
pub use crate::error::{PipelineError, Result};
pub use crate::frame::{cell_text, drop_present, log_summary, require_column, summarize, ColumnSummary};
pub use crate::pipeline::{RedditPipeline, RunReport};

// Delimited-file IO.
pub use crate::csv_io::{read_frame, read_frame_cfg, write_frame, write_frame_cfg, ID_COLUMNS};

// Epoch helpers.
pub use crate::timestamp::{
    epoch_seconds_to_micros, format_timestamp, micros_to_utc, utc_datetime, CSV_DATETIME_FORMAT,
};

// Stage entry points.
pub use crate::loader::{count_distinct, count_distinct_in, load, load_cfg, load_frame, open_store, DistinctCounts, COMMENT_ID};
pub use crate::cleaner::{clean, clean_cfg, clean_frame, AUTHOR_FLAIR_COLUMNS, CREATED_TIME, CREATED_UTC, YEAR};
pub use crate::normalize::{normalize_comments, parent_clean_expr, PARENT_CLEAN_ID, PARENT_ID, PARENT_KIND_PREFIX};
pub use crate::join::{outer_join, Provenance, MERGE_INDICATOR};
pub use crate::merger::{merge, merge_cfg, merge_frames, LINK_FLAIR_COLUMNS, SUBMISSION_ID};

// Expose tracing init so binaries share the same subscriber setup.
pub use crate::util::init_tracing_once;
