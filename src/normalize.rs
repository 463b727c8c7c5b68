//! Parent-id normalization. Reddit "fullnames" carry a kind prefix
//! (`t1_` comment, `t3_` link, ...); joining against submission ids needs the bare id.

use crate::error::Result;
use crate::frame::require_column;
use polars::prelude::*;

pub const PARENT_ID: &str = "parent_id";
pub const PARENT_CLEAN_ID: &str = "parent_clean_id";

/// Leading kind prefix: lowercase `t`, one or more digits, underscore.
pub const PARENT_KIND_PREFIX: &str = r"^t[0-9]+_";

/// `parent_id` with one leading [`PARENT_KIND_PREFIX`] removed, as text.
/// Nulls stay null.
pub fn parent_clean_expr() -> Expr {
    col(PARENT_ID)
        .cast(DataType::String)
        .str()
        .replace(lit(PARENT_KIND_PREFIX), lit(""), false)
        .alias(PARENT_CLEAN_ID)
}

/// Append (or overwrite) `parent_clean_id` on the cleaned comments.
pub fn normalize_comments(cleaned: DataFrame) -> Result<DataFrame> {
    require_column(&cleaned, PARENT_ID)?;
    Ok(cleaned.lazy().with_column(parent_clean_expr()).collect()?)
}
