//! Rule registry and the context rules read from.
//!
//! A rule is a pure function from the analysed text and its option to the
//! findings it reports. The registry fixes the evaluation order, which is also
//! the tie-break order of diagnostics that start at the same offset.
crate::reexport!(reserved_word_case);
crate::reexport!(space_surrounding_operators);
crate::reexport!(linebreak_after_clause_keyword);
crate::reexport!(column_new_line);
crate::reexport!(align_column_to_the_first);
crate::reexport!(where_clause_new_line);
crate::reexport!(align_where_clause_to_the_first);

use crate::{
    FixDescription, Result,
    lint::Finding,
    sql::{Clause, ClauseKind, Item, Location, Statement, Token, TokenKind},
};
use serde_json::Value;

pub type RuleCheck = fn(&RuleContext, &Value) -> Result<Vec<Finding>>;

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub check: RuleCheck,
}

/// Every rule, in evaluation order.
pub static RULES: [Rule; 7] = [
    Rule {
        name: RESERVED_WORD_CASE,
        check: reserved_word_case,
    },
    Rule {
        name: SPACE_SURROUNDING_OPERATORS,
        check: space_surrounding_operators,
    },
    Rule {
        name: LINEBREAK_AFTER_CLAUSE_KEYWORD,
        check: linebreak_after_clause_keyword,
    },
    Rule {
        name: COLUMN_NEW_LINE,
        check: column_new_line,
    },
    Rule {
        name: ALIGN_COLUMN_TO_THE_FIRST,
        check: align_column_to_the_first,
    },
    Rule {
        name: WHERE_CLAUSE_NEW_LINE,
        check: where_clause_new_line,
    },
    Rule {
        name: ALIGN_WHERE_CLAUSE_TO_THE_FIRST,
        check: align_where_clause_to_the_first,
    },
];

pub fn find_rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.name == name)
}

/// Text, tokens and statements of one lint request.
pub struct RuleContext<'a> {
    pub text: &'a str,
    pub tokens: &'a [Token],
    pub statements: &'a [Statement],
}

impl<'a> RuleContext<'a> {
    pub fn new(text: &'a str, tokens: &'a [Token], statements: &'a [Statement]) -> Self {
        Self {
            text,
            tokens,
            statements,
        }
    }

    /// Clauses of `kind` across all statements and their subqueries.
    pub fn clauses(&self, kind: ClauseKind) -> impl Iterator<Item = &'a Clause> {
        self.statements
            .iter()
            .flat_map(Statement::walk)
            .flat_map(move |s| s.clauses_of(kind))
    }

    pub fn location(&self, start: usize, end: usize) -> Location {
        Location::from_offsets(self.text, start, end)
    }

    pub fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// True if only spaces and tabs precede `offset` on its line.
    pub fn starts_line(&self, offset: usize) -> bool {
        self.text[self.line_start(offset)..offset]
            .chars()
            .all(|c| c == ' ' || c == '\t')
    }

    /// Leading spaces and tabs of the line holding `offset`.
    pub fn indentation(&self, offset: usize) -> &'a str {
        let line = &self.text[self.line_start(offset)..];
        let end = line.find(|c: char| c != ' ' && c != '\t').unwrap_or(line.len());
        &line[..end]
    }

    /// True if a line break occurs in a token strictly between `after` and `before`.
    pub fn breaks_between(&self, after: usize, before: usize) -> bool {
        self.tokens
            .get(after + 1..before)
            .unwrap_or_default()
            .iter()
            .any(|t| t.is_trivia() && t.text.contains('\n'))
    }

    /// Make the gap before token `idx` equal `text`: replace the whitespace
    /// token right before it, or insert when the tokens touch.
    pub fn replace_gap_before(&self, idx: usize, text: String) -> FixDescription {
        let token = &self.tokens[idx];
        match idx.checked_sub(1).map(|i| &self.tokens[i]) {
            Some(prev) if prev.kind == TokenKind::Whitespace => {
                FixDescription::replace(prev.start(), prev.end(), text)
            }
            _ => FixDescription::insert(token.start(), text),
        }
    }
}

/// Token index that begins an item: its separator when `led` is set
/// (`AND x = 1`), else its first token.
pub(crate) fn item_head(item: &Item, led: bool) -> Option<usize> {
    if led { item.separator.or(item.first()) } else { item.first() }
}

/// Shared shape of the two "each item on its own line" rules.
pub(crate) fn items_on_new_lines(
    ctx: &RuleContext,
    items: &[Item],
    led_by_separator: bool,
    message: &str,
) -> Vec<Finding> {
    let Some(first) = items.first().and_then(Item::first) else {
        return Vec::new();
    };
    let column = ctx.tokens[first].location.start.column as usize;
    let mut out = Vec::new();
    for (k, item) in items.iter().enumerate().skip(1) {
        let (Some(sep), Some(head)) = (item.separator, item_head(item, led_by_separator)) else {
            continue;
        };
        let broken = if led_by_separator {
            let prev_last = items[k - 1].tokens.last().copied().unwrap_or(first);
            ctx.breaks_between(prev_last, sep)
        } else {
            ctx.breaks_between(sep, head)
        };
        if broken {
            continue;
        }
        let token = &ctx.tokens[head];
        let fix = ctx.replace_gap_before(head, format!("\n{}", " ".repeat(column)));
        out.push(Finding::new(message, token.location).with_fix(fix));
    }
    out
}

/// Shared shape of the two alignment rules.
pub(crate) fn items_aligned(
    ctx: &RuleContext,
    items: &[Item],
    led_by_separator: bool,
    message: &str,
) -> Vec<Finding> {
    let Some(first) = items.first().and_then(Item::first) else {
        return Vec::new();
    };
    let column = ctx.tokens[first].location.start.column;
    let mut out = Vec::new();
    for item in items.iter().skip(1) {
        let Some(head) = item_head(item, led_by_separator) else {
            continue;
        };
        let token = &ctx.tokens[head];
        if !ctx.starts_line(token.start()) || token.location.start.column == column {
            continue;
        }
        let fix = FixDescription::replace(
            ctx.line_start(token.start()),
            token.start(),
            " ".repeat(column as usize),
        );
        out.push(Finding::new(message, token.location).with_fix(fix));
    }
    out
}

#[cfg(test)]
pub(crate) mod harness {
    use crate::{
        apply_fixes,
        lint::{Finding, RuleCheck, RuleContext},
        sql::{parse_all, tokenize},
    };
    use serde_json::Value;

    /// Run one rule over `text`.
    pub fn check(rule: RuleCheck, text: &str, option: Value) -> Vec<Finding> {
        let tokens = tokenize(text);
        let statements = parse_all(&tokens);
        rule(&RuleContext::new(text, &tokens, &statements), &option).expect("rule succeeds")
    }

    /// Run one rule and apply every fix it proposes.
    pub fn fixed(rule: RuleCheck, text: &str, option: Value) -> String {
        let fixes: Vec<_> = check(rule, text, option)
            .iter()
            .filter_map(|f| f.fix.as_ref())
            .flat_map(|f| f.descriptions().iter().cloned())
            .collect();
        apply_fixes(text, &fixes).expect("fixes apply")
    }

    pub fn messages(findings: &[Finding]) -> Vec<String> {
        findings.iter().map(|f| f.message.clone()).collect()
    }
}
