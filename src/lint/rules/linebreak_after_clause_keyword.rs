use crate::{
    Result,
    lint::{Finding, RuleContext},
    sql::ClauseKind,
};
use serde_json::Value;

pub const LINEBREAK_AFTER_CLAUSE_KEYWORD: &str = "linebreak-after-clause-keyword";

const CHECKED: [ClauseKind; 3] = [ClauseKind::Select, ClauseKind::From, ClauseKind::Where];

/// SELECT, FROM and WHERE are followed by a line break before their first
/// argument. The fix moves the argument to the next line, indented two
/// spaces past the keyword's line.
pub fn linebreak_after_clause_keyword(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    let mut out = Vec::new();
    for kind in CHECKED {
        for clause in ctx.clauses(kind) {
            let Some(first) = clause.first_argument(ctx.tokens) else {
                continue;
            };
            if ctx.breaks_between(clause.keyword.end - 1, first) {
                continue;
            }
            let keyword = clause.keyword_token(ctx.tokens);
            let indent = ctx.indentation(keyword.start());
            let fix = ctx.replace_gap_before(first, format!("\n{indent}  "));
            out.push(
                Finding::new(
                    format!("a linebreak is required after {kind} keyword"),
                    ctx.location(keyword.start(), clause.keyword_end(ctx.tokens)),
                )
                .with_fix(fix),
            );
        }
    }
    out.sort_by_key(|f| f.location.start.offset);
    Ok(out)
}
