use super::items_on_new_lines;
use crate::{
    Result,
    lint::{Finding, RuleContext},
    sql::ClauseKind,
};
use serde_json::Value;

pub const WHERE_CLAUSE_NEW_LINE: &str = "where-clause-new-line";

/// Each `AND` / `OR` joined WHERE predicate after the first starts on its own
/// line, its conjunction in the first predicate's column.
pub fn where_clause_new_line(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    Ok(ctx
        .clauses(ClauseKind::Where)
        .flat_map(|clause| {
            items_on_new_lines(
                ctx,
                &clause.predicates(ctx.tokens),
                true,
                "multiple where clauses must go on a new line",
            )
        })
        .collect())
}
