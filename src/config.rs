use std::path::{Path, PathBuf};

pub const DEFAULT_TABLE_NAME: &str = "comment_table";

// Fixed locations of the sample run.
pub const DEFAULT_COMMENTS_CSV: &str = "../data/PoliticalDiscussion_comments_sample.csv";
pub const DEFAULT_SUBMISSIONS_CSV: &str = "../data/PoliticalDiscussion_submissions_sample.csv";
pub const DEFAULT_OUTPUT_CSV: &str = "../data/joined_data.csv";
pub const DEFAULT_DB_PATH: &str = "project_test.db";

/// Where the comments table is bulk-loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Store {
    File(PathBuf),
    /// Private in-memory database, gone when the connection drops.
    Memory,
}

impl Store {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Store::File(path.as_ref().to_path_buf())
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub comments_path: PathBuf,
    pub submissions_path: PathBuf,
    pub output_path: PathBuf,
    pub store: Store,
    pub table_name: String,
    pub progress: bool,               // show row progress while loading

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
    pub write_buffer_bytes: usize,    // BufWriter capacity
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            comments_path: PathBuf::from(DEFAULT_COMMENTS_CSV),
            submissions_path: PathBuf::from(DEFAULT_SUBMISSIONS_CSV),
            output_path: PathBuf::from(DEFAULT_OUTPUT_CSV),
            store: Store::file(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            progress: true,

            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl PipelineOptions {
    pub fn with_comments_path(mut self, path: impl AsRef<Path>) -> Self {
        self.comments_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_submissions_path(mut self, path: impl AsRef<Path>) -> Self {
        self.submissions_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = store;
        self
    }
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    // IO buffers tuning
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
}
