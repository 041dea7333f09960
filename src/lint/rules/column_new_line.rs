use super::items_on_new_lines;
use crate::{
    Result,
    lint::{Finding, RuleContext},
    sql::ClauseKind,
};
use serde_json::Value;

pub const COLUMN_NEW_LINE: &str = "column-new-line";

/// Each SELECT-list item after the first starts on its own line, indented
/// to the first item's column.
pub fn column_new_line(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    Ok(ctx
        .clauses(ClauseKind::Select)
        .flat_map(|clause| {
            items_on_new_lines(
                ctx,
                &clause.items(ctx.tokens),
                false,
                "columns must go on a new line",
            )
        })
        .collect())
}
