//! Full outer join of two frames on a key column pair, with a per-row
//! provenance indicator.
//!
//! Both sides get a row-index marker before the join; a marker that comes out
//! null says the row had no partner on that side. The result is sorted by key
//! (null keys last), then by original left and right row order.

use crate::error::Result;
use crate::frame::require_column;
use ahash::AHashSet;
use polars::prelude::*;

pub const MERGE_INDICATOR: &str = "_merge";
pub const LEFT_SUFFIX: &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";
const JOIN_KEY: &str = "__join_key";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    LeftOnly,
    RightOnly,
    Both,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::LeftOnly => "left_only",
            Provenance::RightOnly => "right_only",
            Provenance::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left_only" => Some(Provenance::LeftOnly),
            "right_only" => Some(Provenance::RightOnly),
            "both" => Some(Provenance::Both),
            _ => None,
        }
    }
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Rename columns present on both sides to `<name>_x` / `<name>_y`, except a
/// key both sides share by name. Returns the renamed originals.
fn suffix_overlaps(left: &mut DataFrame, right: &mut DataFrame, shared_key: Option<&str>) -> Result<Vec<String>> {
    let right_names: AHashSet<String> = names(right).into_iter().collect();
    let overlaps: Vec<String> = names(left)
        .into_iter()
        .filter(|n| right_names.contains(n) && Some(n.as_str()) != shared_key)
        .collect();
    for name in &overlaps {
        left.rename(name, format!("{name}{LEFT_SUFFIX}").into())?;
        right.rename(name, format!("{name}{RIGHT_SUFFIX}").into())?;
    }
    Ok(overlaps)
}

fn after_suffix(name: &str, overlaps: &[String], suffix: &str) -> String {
    if overlaps.iter().any(|o| o == name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}

fn provenance() -> Expr {
    let in_left = col(LEFT_ROW).is_not_null();
    let in_right = col(RIGHT_ROW).is_not_null();
    when(in_left.clone().and(in_right))
        .then(lit(Provenance::Both.as_str()))
        .when(in_left)
        .then(lit(Provenance::LeftOnly.as_str()))
        .otherwise(lit(Provenance::RightOnly.as_str()))
}

/// Every left row and every right row appears at least once; matching pairs
/// produce one row each. Keys are compared as text and null keys never match.
/// Output columns: left columns, right columns, then [`MERGE_INDICATOR`]. When
/// both keys share a name a single coalesced key column is kept.
pub fn outer_join(mut left: DataFrame, mut right: DataFrame, left_key: &str, right_key: &str) -> Result<DataFrame> {
    require_column(&left, left_key)?;
    require_column(&right, right_key)?;
    let shared_key = (left_key == right_key).then_some(left_key);

    let overlaps = suffix_overlaps(&mut left, &mut right, shared_key)?;
    let lk = after_suffix(left_key, &overlaps, LEFT_SUFFIX);
    let rk = after_suffix(right_key, &overlaps, RIGHT_SUFFIX);

    let mut output: Vec<Expr> = names(&left).iter().map(|n| col(n.as_str())).collect();
    output.extend(
        names(&right)
            .iter()
            .filter(|n| shared_key.is_none() || n.as_str() != rk)
            .map(|n| col(n.as_str())),
    );
    output.push(col(MERGE_INDICATOR));

    let (coalesce_keys, sort_key) = match shared_key {
        Some(_) => (JoinCoalesce::CoalesceColumns, col(lk.as_str())),
        None => (JoinCoalesce::KeepColumns, coalesce(&[col(lk.as_str()), col(rk.as_str())])),
    };

    let left = left
        .with_row_index(LEFT_ROW.into(), None)?
        .lazy()
        .with_column(col(lk.as_str()).cast(DataType::String));
    let right = right
        .with_row_index(RIGHT_ROW.into(), None)?
        .lazy()
        .with_column(col(rk.as_str()).cast(DataType::String));

    let joined = left
        .join(
            right,
            [col(lk.as_str())],
            [col(rk.as_str())],
            JoinArgs::new(JoinType::Full).with_coalesce(coalesce_keys),
        )
        .with_columns([sort_key.alias(JOIN_KEY), provenance().alias(MERGE_INDICATOR)])
        .sort([JOIN_KEY, LEFT_ROW, RIGHT_ROW], SortMultipleOptions::default().with_nulls_last(true))
        .select(output)
        .collect()?;
    Ok(joined)
}
