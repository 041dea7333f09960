use super::items_aligned;
use crate::{
    Result,
    lint::{Finding, RuleContext},
    sql::ClauseKind,
};
use serde_json::Value;

pub const ALIGN_WHERE_CLAUSE_TO_THE_FIRST: &str = "align-where-clause-to-the-first";

/// Conjunctions that start a line sit in the first predicate's column.
pub fn align_where_clause_to_the_first(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    Ok(ctx
        .clauses(ClauseKind::Where)
        .flat_map(|clause| {
            items_aligned(
                ctx,
                &clause.predicates(ctx.tokens),
                true,
                "where clauses must align to the first clause",
            )
        })
        .collect())
}
