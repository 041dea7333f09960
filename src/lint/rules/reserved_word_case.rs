use crate::{
    Error, FixDescription, Result,
    lint::{Finding, RuleContext},
    sql::TokenKind,
};
use serde_json::Value;

pub const RESERVED_WORD_CASE: &str = "reserved-word-case";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
}

impl Case {
    fn from_option(option: &Value) -> Result<Self> {
        match option {
            Value::Null => Ok(Case::Upper),
            Value::String(s) if s == "upper" => Ok(Case::Upper),
            Value::String(s) if s == "lower" => Ok(Case::Lower),
            other => Err(Error::RuleOption {
                rule: RESERVED_WORD_CASE,
                reason: format!("expected \"upper\" or \"lower\", got {other}"),
            }),
        }
    }

    fn apply(self, word: &str) -> String {
        match self {
            Case::Upper => word.to_ascii_uppercase(),
            Case::Lower => word.to_ascii_lowercase(),
        }
    }
}

/// Every reserved word is written in the configured case.
pub fn reserved_word_case(ctx: &RuleContext, option: &Value) -> Result<Vec<Finding>> {
    let case = Case::from_option(option)?;
    let message = match case {
        Case::Upper => "reserved word must be uppercase",
        Case::Lower => "reserved word must be lowercase",
    };
    Ok(ctx
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Keyword(_)))
        .filter_map(|t| {
            let expected = case.apply(&t.text);
            (expected != t.text).then(|| {
                Finding::new(message, t.location)
                    .with_fix(FixDescription::replace(t.start(), t.end(), expected))
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::harness::{check, fixed, messages};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn only_keywords_change() {
        assert_eq!(
            fixed(reserved_word_case, "select Id from users", json!("upper")),
            "SELECT Id FROM users"
        );
    }

    #[test]
    fn first_fix_changes_one_keyword() {
        let text = "select Id from users";
        let findings = check(reserved_word_case, text, json!("upper"));
        let first = findings[0].fix.as_ref().expect("fix");
        assert_eq!(
            crate::apply_fixes(text, first.descriptions()).expect("applies"),
            "SELECT Id from users"
        );
    }

    #[rstest]
    #[case("SELECT Id FROM users", json!("upper"), 0)]
    #[case("select Id from users", json!(null), 2)]
    #[case("SELECT Id from users", json!("lower"), 1)]
    #[case("Select 'select' -- select", json!("upper"), 1)]
    fn counts_mismatches(#[case] sql: &str, #[case] option: Value, #[case] expected: usize) {
        assert_eq!(check(reserved_word_case, sql, option).len(), expected);
    }

    #[test]
    fn lower_option() {
        let findings = check(reserved_word_case, "SELECT a", json!("lower"));
        assert_eq!(messages(&findings), vec!["reserved word must be lowercase"]);
        assert_eq!(
            fixed(reserved_word_case, "SELECT a FROM t WHERE x IS NULL", json!("lower")),
            "select a from t where x is null"
        );
    }

    #[test]
    fn rejects_unknown_option() {
        let tokens = crate::sql::tokenize("select 1");
        let ctx = RuleContext::new("select 1", &tokens, &[]);
        assert!(matches!(
            reserved_word_case(&ctx, &json!(["upper"])),
            Err(Error::RuleOption { rule: RESERVED_WORD_CASE, .. })
        ));
    }
}
