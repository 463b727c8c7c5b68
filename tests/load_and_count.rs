#[path = "common/mod.rs"]
mod common;

use common::*;
use reddit_join::{count_distinct, load, DistinctCounts, PipelineError, Store, DEFAULT_TABLE_NAME};

/// Loads the basic corpus into a file-backed store:
/// - 4 comments, parent ids {t3_s1, t1_c1, t3_gone} -> post_count 3, comment_count 4.
/// - All source columns (flair included) become table columns, in order.
#[test]
fn load_then_count_distinct_parents_and_comments() {
    let corpus = make_corpus_basic();
    let db = corpus.base.join("project_test.db");

    let conn = load(&corpus.comments, &Store::file(&db)).unwrap();
    let counts = count_distinct(&conn).unwrap();
    assert_eq!(counts, DistinctCounts { post_count: 3, comment_count: 4 });

    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {DEFAULT_TABLE_NAME}"), [], |r| r.get(0))
        .unwrap();
    assert!(counts.comment_count <= rows as u64);

    let mut stmt = conn.prepare(&format!("SELECT * FROM {DEFAULT_TABLE_NAME}")).unwrap();
    let names: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
    assert_eq!(
        names,
        vec!["comment_id", "parent_id", "body", "author", "author_flair_text", "author_flair_type", "created_utc"]
    );
}

/// Loading twice into the same database replaces the table wholesale.
#[test]
fn reload_replaces_existing_table() {
    let corpus = make_corpus_basic();
    let db = corpus.base.join("replace.db");

    drop(load(&corpus.comments, &Store::file(&db)).unwrap());

    let smaller = corpus.base.join("data").join("one_comment.csv");
    write_csv(&smaller, &["comment_id", "parent_id"], &[&["c9", "t3_s2"]]);
    let conn = load(&smaller, &Store::file(&db)).unwrap();

    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {DEFAULT_TABLE_NAME}"), [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(
        count_distinct(&conn).unwrap(),
        DistinctCounts { post_count: 1, comment_count: 1 }
    );
}

/// Row order and numeric affinity survive the bulk insert.
#[test]
fn load_preserves_row_order_and_types() {
    let corpus = make_corpus_basic();
    let conn = load(&corpus.comments, &Store::Memory).unwrap();

    let mut stmt = conn
        .prepare(&format!("SELECT comment_id, created_utc FROM {DEFAULT_TABLE_NAME} ORDER BY rowid"))
        .unwrap();
    let got: Vec<(String, i64)> = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(
        got,
        vec![
            ("c1".to_string(), 1_700_000_000),
            ("c2".to_string(), 1_700_000_100),
            ("c3".to_string(), 1_700_000_200),
            ("c4".to_string(), 1_609_459_200),
        ]
    );
}

#[test]
fn load_missing_source_is_input_error() {
    let corpus = make_corpus_basic();
    let err = load(&corpus.base.join("missing.csv"), &Store::Memory).unwrap_err();
    assert!(matches!(err, PipelineError::Input { .. }));
}

/// Counting against a table that lacks `comment_id` reports the missing column
/// rather than counting the quoted name as a constant.
#[test]
fn count_without_required_column_is_missing_column() {
    let corpus = make_corpus_basic();
    let only_parents = corpus.base.join("data").join("parents_only.csv");
    write_csv(&only_parents, &["parent_id"], &[&["t3_s1"], &["t3_s2"]]);
    let conn = load(&only_parents, &Store::Memory).unwrap();
    match count_distinct(&conn) {
        Err(PipelineError::MissingColumn { column }) => assert_eq!(column, "comment_id"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

/// Ids that look numeric (`1e5`, `0042`) are stored as text, unchanged.
#[test]
fn numeric_looking_ids_load_as_text() {
    let corpus = make_corpus_basic();
    let ids = corpus.base.join("data").join("numeric_ids.csv");
    write_csv(&ids, &["comment_id", "parent_id"], &[&["0042", "t3_1e5"], &["1e5", "t1_0042"]]);
    let conn = load(&ids, &Store::Memory).unwrap();

    let mut stmt = conn
        .prepare(&format!("SELECT comment_id FROM {DEFAULT_TABLE_NAME} ORDER BY rowid"))
        .unwrap();
    let got: Vec<String> = stmt.query_map([], |r| r.get(0)).unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(got, vec!["0042", "1e5"]);
}
