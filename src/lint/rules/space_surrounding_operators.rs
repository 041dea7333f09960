use crate::{
    FixDescription, Result,
    lint::{Finding, RuleContext},
    sql::{Token, TokenKind},
};
use serde_json::Value;

pub const SPACE_SURROUNDING_OPERATORS: &str = "space-surrounding-operators";

/// Binary operators have exactly one space, or a line break, on each side.
pub fn space_surrounding_operators(ctx: &RuleContext, _option: &Value) -> Result<Vec<Finding>> {
    let tokens = ctx.tokens;
    let mut out = Vec::new();
    for (i, op) in tokens.iter().enumerate() {
        if op.kind != TokenKind::Operator || op.text == "::" || !is_binary(tokens, i) {
            continue;
        }
        let mut fixes = Vec::new();
        if let Some(fix) = side_fix(tokens.get(i.wrapping_sub(1)), op.start()) {
            fixes.push(fix);
        }
        let right = tokens.get(i + 1).filter(|t| t.kind != TokenKind::Eof);
        if right.is_some() {
            if let Some(fix) = side_fix(right, op.end()) {
                fixes.push(fix);
            }
        }
        if !fixes.is_empty() {
            out.push(
                Finding::new("a space is required before and after an operator", op.location)
                    .with_fix(fixes),
            );
        }
    }
    Ok(out)
}

/// An operator is binary when its left neighbour is an operand or `)`.
fn is_binary(tokens: &[Token], i: usize) -> bool {
    tokens[..i]
        .iter()
        .rev()
        .find(|t| !t.is_trivia())
        .is_some_and(|t| t.kind.is_operand() || t.is_punct(')'))
}

/// Fix for one side of an operator; `None` when the side is fine.
fn side_fix(neighbour: Option<&Token>, at: usize) -> Option<FixDescription> {
    match neighbour {
        Some(t) if t.kind == TokenKind::Whitespace => {
            (t.text != " " && !t.text.contains('\n'))
                .then(|| FixDescription::replace(t.start(), t.end(), " "))
        }
        Some(_) => Some(FixDescription::insert(at, " ")),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::harness::{check, fixed};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("SELECT a=b FROM t", "SELECT a = b FROM t")]
    #[case("SELECT a  + b", "SELECT a + b")]
    #[case("SELECT a\t<=  1", "SELECT a <= 1")]
    #[case("SELECT (a)*2", "SELECT (a) * 2")]
    #[case("SELECT 'x'||name", "SELECT 'x' || name")]
    fn fixes_spacing(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(fixed(space_surrounding_operators, sql, Value::Null), expected);
    }

    #[rstest]
    #[case("SELECT * FROM t")]
    #[case("SELECT count(*) FROM t")]
    #[case("SELECT t.* FROM t")]
    #[case("SELECT a FROM t WHERE b = -1")]
    #[case("SELECT a::text FROM t")]
    #[case("SELECT a\n  = b")]
    #[case("SELECT a =")]
    fn accepts(#[case] sql: &str) {
        assert!(check(space_surrounding_operators, sql, Value::Null).is_empty());
    }

    #[test]
    fn one_diagnostic_per_operator() {
        let findings = check(space_surrounding_operators, "SELECT a=b", Value::Null);
        assert_eq!(findings.len(), 1);
        let fix = findings[0].fix.as_ref().expect("fix");
        assert_eq!(fix.descriptions().len(), 2);
        assert_eq!(findings[0].location.start.offset, 8);
    }
}
