#![allow(dead_code)]

use polars::prelude::DataFrame;
use reddit_join::cell_text;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a CSV file from a header and raw rows (fields written as given).
pub fn write_csv(path: &Path, header: &[&str], rows: &[&[&str]]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut w = csv::Writer::from_path(path).unwrap();
    w.write_record(header).unwrap();
    for r in rows {
        w.write_record(*r).unwrap();
    }
    w.flush().unwrap();
}

/// Write raw text, for inputs the csv writer refuses to produce (ragged rows).
pub fn write_raw(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// Compress an existing file to `<path>.zst`.
pub fn zst_copy(path: &Path) -> PathBuf {
    let out = PathBuf::from(format!("{}.zst", path.display()));
    let raw = fs::read(path).unwrap();
    let f = File::create(&out).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    enc.write_all(&raw).unwrap();
    enc.finish().unwrap();
    out
}

pub struct Corpus {
    pub base: PathBuf,
    pub submissions: PathBuf,
    pub comments: PathBuf,
}

/// Build a tiny corpus under a temp dir:
/// - 2 submissions: s1 (two direct comments), s2 (none). Both carry link flair columns.
/// - 4 comments:
///     c1, c3 reply to s1 (t3_s1)
///     c2 replies to comment c1 (t1_c1) -> normalizes to "c1", matches no submission
///     c4 replies to a submission outside the sample (t3_gone), created in 2021
///   Comments carry author flair columns.
/// `author` and `created_utc` exist on both sides to exercise suffixing.
pub fn make_corpus_basic() -> Corpus {
    let base = tempfile::tempdir().unwrap().into_path();

    let submissions = base.join("data").join("submissions.csv");
    write_csv(
        &submissions,
        &["submission_id", "title", "author", "link_flair_text", "link_flair_type", "created_utc"],
        &[
            &["s1", "Election thread", "alice", "Politics", "text", "1699990000"],
            &["s2", "Quiet post", "bob", "", "text", "1699990100"],
        ],
    );

    let comments = base.join("data").join("comments.csv");
    write_csv(
        &comments,
        &["comment_id", "parent_id", "body", "author", "author_flair_text", "author_flair_type", "created_utc"],
        &[
            &["c1", "t3_s1", "First, commas too", "carol", "Blue", "text", "1700000000"],
            &["c2", "t1_c1", "reply to c1", "dave", "", "text", "1700000100"],
            &["c3", "t3_s1", "Another", "erin", "Red", "richtext", "1700000200"],
            &["c4", "t3_gone", "orphaned", "frank", "", "text", "1609459200"],
        ],
    );

    Corpus { base, submissions, comments }
}

/// Values of one column as plain strings (nulls become "").
pub fn column_strings(df: &DataFrame, name: &str) -> Vec<String> {
    let c = df.column(name).unwrap_or_else(|_| panic!("missing column {name}"));
    (0..c.len()).map(|i| cell_text(c.get(i).unwrap())).collect()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}
