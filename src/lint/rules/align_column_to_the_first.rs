use super::items_aligned;
use crate::{
    Result,
    lint::{Finding, RuleContext},
    sql::ClauseKind,
};
use serde_json::Value;

pub const ALIGN_COLUMN_TO_THE_FIRST: &str = "align-column-to-the-first";

/// SELECT-list items that start a line sit in the first item's column.
pub fn align_column_to_the_first(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    Ok(ctx
        .clauses(ClauseKind::Select)
        .flat_map(|clause| {
            items_aligned(
                ctx,
                &clause.items(ctx.tokens),
                false,
                "columns must align to the first column",
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::harness::{check, fixed};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("SELECT\n  a,\n    b,\nc", "SELECT\n  a,\n  b,\n  c")]
    #[case("SELECT a,\n  b", "SELECT a,\n       b")]
    #[case("SELECT\n  a,\n\tb", "SELECT\n  a,\n  b")]
    fn aligns(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(fixed(align_column_to_the_first, sql, Value::Null), expected);
    }

    #[rstest]
    #[case("SELECT\n  a,\n  b")]
    #[case("SELECT a, b")]
    #[case("SELECT a")]
    fn accepts(#[case] sql: &str) {
        assert!(check(align_column_to_the_first, sql, Value::Null).is_empty());
    }
}
