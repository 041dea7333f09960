//! Error-tolerant statement parser.
//!
//! The parser never fails. It resolves just enough structure for completion
//! and layout rules: statement kind, clause slots and nested `(SELECT ...)`
//! groups. Recovery works by resynchronizing on clause keywords:
//!
//! - a clause ends at its last significant token before the next clause keyword;
//! - a token that cannot continue the current clause (an unbalanced `)`) closes
//!   it, and everything up to the next clause keyword is recorded as skipped;
//! - a statement-head keyword (`UPDATE`, `DELETE`, ...) in the middle of a
//!   statement starts a new statement.
//!
//! Statements are separated by top-level `;` and set operators
//! (`UNION`, `INTERSECT`, `EXCEPT`), so each SELECT of a compound query has its
//! own scope.
use crate::{
    debug,
    sql::{
        keyword::Keyword,
        statement::{Clause, ClauseKind, Statement, StatementKind},
        token::Token,
    },
    trace,
};
use std::ops::Range;

/// Parse the first statement of the token stream.
///
/// Empty or trivia-only input yields an `Unknown` statement without clauses.
pub fn parse(tokens: &[Token]) -> Statement {
    parse_all(tokens)
        .into_iter()
        .next()
        .unwrap_or_else(|| Statement::empty(0..eof_offset(tokens)))
}

/// Parse every statement of the token stream, in source order.
pub fn parse_all(tokens: &[Token]) -> Vec<Statement> {
    Parser::new(tokens).statements()
}

fn eof_offset(tokens: &[Token]) -> usize {
    tokens.last().map(Token::end).unwrap_or(0)
}

struct Parser<'a> {
    tokens: &'a [Token],
    /// Indices of significant (non-trivia, non-EOF) tokens.
    sig: Vec<usize>,
}

/// A clause that is still collecting body tokens.
struct OpenClause {
    kind: ClauseKind,
    keyword: Range<usize>,
    body_start: usize,
    last: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let sig = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_trivia() && !t.is_empty())
            .map(|(i, _)| i)
            .collect();
        Self { tokens, sig }
    }

    fn token(&self, p: usize) -> &'a Token {
        &self.tokens[self.sig[p]]
    }

    fn keyword_at(&self, p: usize) -> Option<Keyword> {
        self.sig.get(p).and_then(|&i| self.tokens[i].keyword())
    }

    fn statements(&self) -> Vec<Statement> {
        let mut out = Vec::new();
        let mut p = 0;
        let mut bounds_start = 0;
        while p < self.sig.len() {
            let end = self.segment_end(p);
            let separated = end < self.sig.len() && self.is_separator(end);
            let bounds_end = match self.sig.get(end) {
                Some(_) => self.token(end).start(),
                None => eof_offset(self.tokens),
            };
            if end > p {
                out.push(self.statement(p..end, bounds_start..bounds_end));
            }
            if separated {
                bounds_start = self.token(end).end();
                p = end + 1;
            } else {
                bounds_start = bounds_end;
                p = end;
            }
        }
        debug!("Parsed {} statement(s)", out.len());
        out
    }

    fn is_separator(&self, p: usize) -> bool {
        let t = self.token(p);
        t.is_punct(';') || t.keyword().is_some_and(Keyword::is_set_operator)
    }

    /// Sig position where the statement starting at `start` ends: a top-level
    /// separator, a statement head that resynchronizes, or the end of input.
    fn segment_end(&self, start: usize) -> usize {
        let mut depth = 0i32;
        for p in start..self.sig.len() {
            let t = self.token(p);
            if t.is_punct('(') {
                depth += 1;
            } else if t.is_punct(')') {
                depth -= 1;
            } else if depth <= 0 {
                if self.is_separator(p) {
                    return p;
                }
                if p > start && self.starts_new_statement(start, p) {
                    return p;
                }
            }
        }
        self.sig.len()
    }

    fn starts_new_statement(&self, head: usize, p: usize) -> bool {
        let Some(kw) = self.keyword_at(p) else {
            return false;
        };
        if !kw.is_statement_head() || kw == Keyword::Select {
            return false;
        }
        let head_kw = self.keyword_at(head);
        let after_on = self.keyword_at(p - 1) == Some(Keyword::On);
        let call = self.sig.get(p + 1).is_some_and(|&i| self.tokens[i].is_punct('('));
        let explained = head_kw == Some(Keyword::Explain) && p == head + 1;
        let upsert = matches!(head_kw, Some(Keyword::Insert | Keyword::Replace)) && kw == Keyword::Update;
        let create = head_kw == Some(Keyword::Create);
        !(after_on || call || explained || upsert || create)
    }

    /// Recognize a clause keyword at sig position `p`, returning its kind and
    /// how many significant tokens the keyword spans.
    fn clause_at(&self, head: usize, p: usize, limit: usize) -> Option<(ClauseKind, usize)> {
        let kw = self.keyword_at(p)?;
        let next = if p + 1 < limit { self.keyword_at(p + 1) } else { None };
        let head_slot =
            p == head || (p == head + 1 && self.keyword_at(head) == Some(Keyword::Explain));
        let with_by = |kind| Some((kind, if next == Some(Keyword::By) { 2 } else { 1 }));

        use ClauseKind as C;
        match kw {
            Keyword::Select => Some((C::Select, 1)),
            Keyword::From => Some((C::From, 1)),
            Keyword::Join => Some((C::Join, 1)),
            Keyword::Left | Keyword::Inner if next == Some(Keyword::Join) => Some((C::Join, 2)),
            Keyword::On => Some((C::On, 1)),
            Keyword::Where => Some((C::Where, 1)),
            Keyword::Group => with_by(C::GroupBy),
            Keyword::Order => with_by(C::OrderBy),
            Keyword::Having => Some((C::Having, 1)),
            Keyword::Limit => Some((C::Limit, 1)),
            Keyword::Offset => Some((C::Offset, 1)),
            Keyword::Into => Some((C::Into, 1)),
            Keyword::Values => Some((C::Values, 1)),
            Keyword::Set => Some((C::Set, 1)),
            Keyword::Insert | Keyword::Replace if head_slot => Some((C::Insert, 1)),
            Keyword::Update if head_slot => Some((C::Update, 1)),
            Keyword::Delete if head_slot => Some((C::Delete, 1)),
            Keyword::Create if head_slot => Some((C::Create, 1)),
            Keyword::Drop if head_slot => Some((C::Drop, 1)),
            Keyword::Explain if head_slot => Some((C::Explain, 1)),
            _ => None,
        }
    }

    /// Sig position of the `)` matching the `(` at `open`, if any before `limit`.
    fn matching_paren(&self, open: usize, limit: usize) -> Option<usize> {
        let mut depth = 0usize;
        for p in open..limit {
            let t = self.token(p);
            if t.is_punct('(') {
                depth += 1;
            } else if t.is_punct(')') {
                depth -= 1;
                if depth == 0 {
                    return Some(p);
                }
            }
        }
        None
    }

    fn statement(&self, range: Range<usize>, bounds: Range<usize>) -> Statement {
        let mut stmt = Statement {
            kind: StatementKind::from_head(self.keyword_at(range.start)),
            tokens: self.sig[range.start]..self.sig[range.end - 1] + 1,
            bounds: bounds.clone(),
            clauses: Vec::new(),
            subqueries: Vec::new(),
            skipped: Vec::new(),
        };
        let mut open: Option<OpenClause> = None;
        let mut depth = 0usize;
        let mut p = range.start;

        while p < range.end {
            let idx = self.sig[p];
            let t = self.token(p);

            if t.is_punct('(') && p + 1 < range.end && self.keyword_at(p + 1) == Some(Keyword::Select) {
                let close = self.matching_paren(p, range.end);
                let inner_end = close.unwrap_or(range.end);
                let sub_bounds = t.end()..close.map(|c| self.token(c).start()).unwrap_or(bounds.end);
                stmt.subqueries.push(self.statement(p + 1..inner_end, sub_bounds));

                let group_end = close.map(|c| c + 1).unwrap_or(range.end);
                match open.as_mut() {
                    Some(clause) => clause.last = Some(self.sig[group_end - 1]),
                    None => stmt.skipped.extend(&self.sig[p..group_end]),
                }
                p = group_end;
                continue;
            }

            if t.is_punct('(') {
                depth += 1;
            } else if t.is_punct(')') {
                if depth == 0 {
                    trace!("Unbalanced ')' at offset {}, closing clause", t.start());
                    Self::close(&mut open, &mut stmt);
                    stmt.skipped.push(idx);
                    p += 1;
                    continue;
                }
                depth -= 1;
            } else if depth == 0 {
                if let Some((kind, len)) = self.clause_at(range.start, p, range.end) {
                    Self::close(&mut open, &mut stmt);
                    let keyword_last = self.sig[p + len - 1];
                    open = Some(OpenClause {
                        kind,
                        keyword: idx..keyword_last + 1,
                        body_start: keyword_last + 1,
                        last: None,
                    });
                    p += len;
                    continue;
                }
            }

            match open.as_mut() {
                Some(clause) => clause.last = Some(idx),
                None => stmt.skipped.push(idx),
            }
            p += 1;
        }

        Self::close(&mut open, &mut stmt);
        stmt
    }

    fn close(open: &mut Option<OpenClause>, stmt: &mut Statement) {
        if let Some(clause) = open.take() {
            let body_end = clause.last.map(|l| l + 1).unwrap_or(clause.body_start);
            stmt.clauses.push(Clause {
                kind: clause.kind,
                keyword: clause.keyword,
                body: clause.body_start..body_end,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenizer::tokenize;
    use rand::Rng;
    use rstest::rstest;

    fn shape(sql: &str) -> (StatementKind, Vec<ClauseKind>) {
        let stmt = parse(&tokenize(sql));
        (stmt.kind, stmt.clauses.iter().map(|c| c.kind).collect())
    }

    fn body(sql: &str, kind: ClauseKind) -> String {
        let tokens = tokenize(sql);
        let stmt = parse(&tokens);
        let clause = stmt.clause(kind).expect("clause present");
        tokens[clause.body.clone()]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }

    #[rstest]
    #[case("SELECT a FROM t WHERE x = 1 GROUP BY a HAVING count(*) > 1 ORDER BY a LIMIT 5 OFFSET 2",
        StatementKind::Select,
        vec![ClauseKind::Select, ClauseKind::From, ClauseKind::Where, ClauseKind::GroupBy,
             ClauseKind::Having, ClauseKind::OrderBy, ClauseKind::Limit, ClauseKind::Offset])]
    #[case("SELECT * FROM a LEFT JOIN b ON a.id = b.id", StatementKind::Select,
        vec![ClauseKind::Select, ClauseKind::From, ClauseKind::Join, ClauseKind::On])]
    #[case("insert into users (id) values (1)", StatementKind::Insert,
        vec![ClauseKind::Insert, ClauseKind::Into, ClauseKind::Values])]
    #[case("UPDATE users SET a = 1 WHERE id = 2", StatementKind::Update,
        vec![ClauseKind::Update, ClauseKind::Set, ClauseKind::Where])]
    #[case("DELETE FROM users WHERE id = 2", StatementKind::Delete,
        vec![ClauseKind::Delete, ClauseKind::From, ClauseKind::Where])]
    #[case("CREATE TABLE t (id int)", StatementKind::Create, vec![ClauseKind::Create])]
    #[case("DROP TABLE t", StatementKind::Drop, vec![ClauseKind::Drop])]
    #[case("EXPLAIN SELECT 1", StatementKind::Explain, vec![ClauseKind::Explain, ClauseKind::Select])]
    #[case("foo bar", StatementKind::Unknown, vec![])]
    #[case("", StatementKind::Unknown, vec![])]
    fn recognizes_statement_shape(
        #[case] sql: &str,
        #[case] kind: StatementKind,
        #[case] clauses: Vec<ClauseKind>,
    ) {
        assert_eq!(shape(sql), (kind, clauses));
    }

    #[test]
    fn truncated_from_keeps_select_list() {
        let (kind, clauses) = shape("SELECT foo, bar FR");
        assert_eq!(kind, StatementKind::Select);
        assert_eq!(clauses, vec![ClauseKind::Select]);
        assert_eq!(body("SELECT foo, bar FR", ClauseKind::Select), "foo, bar FR");
    }

    #[test]
    fn empty_clause_bodies_are_kept() {
        let tokens = tokenize("SELECT a FROM ");
        let stmt = parse(&tokens);
        let from = stmt.clause(ClauseKind::From).unwrap();
        assert!(from.is_empty());
        assert_eq!(from.body.start, from.keyword.end);
    }

    #[test]
    fn group_without_by_is_still_a_clause() {
        let (_, clauses) = shape("SELECT a FROM t GROUP");
        assert_eq!(clauses.last(), Some(&ClauseKind::GroupBy));
    }

    #[test]
    fn unbalanced_paren_skips_to_next_clause() {
        let tokens = tokenize("SELECT a) junk more WHERE b = 1");
        let stmt = parse(&tokens);
        assert_eq!(
            stmt.clauses.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![ClauseKind::Select, ClauseKind::Where]
        );
        let skipped: Vec<_> = stmt.skipped.iter().map(|&i| tokens[i].text.as_str()).collect();
        assert_eq!(skipped, vec![")", "junk", "more"]);
        assert_eq!(body("SELECT a) junk more WHERE b = 1", ClauseKind::Where), "b = 1");
    }

    #[test]
    fn splits_statements_on_semicolons_and_set_operators() {
        let tokens = tokenize("SELECT a FROM x; SELECT b FROM y UNION SELECT c FROM z");
        let stmts = parse_all(&tokens);
        assert_eq!(stmts.len(), 3);
        assert!(stmts.iter().all(|s| s.kind == StatementKind::Select));
        assert!(stmts[0].bounds.end <= stmts[1].bounds.start);
    }

    #[test]
    fn statement_head_resynchronizes() {
        let stmts = parse_all(&tokenize("SELECT a FROM t DELETE FROM u"));
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].kind, StatementKind::Delete);
        // function-call spelling and EXPLAIN targets do not split
        assert_eq!(parse_all(&tokenize("SELECT replace(a, 'x', 'y') FROM t")).len(), 1);
        assert_eq!(parse_all(&tokenize("EXPLAIN DELETE FROM t")).len(), 1);
    }

    #[test]
    fn subqueries_are_parsed_recursively() {
        let sql = "SELECT (SELECT id FROM inner_t) FROM outer_t WHERE x IN (SELECT y FROM z";
        let tokens = tokenize(sql);
        let stmt = parse(&tokens);
        assert_eq!(stmt.subqueries.len(), 2);
        assert!(stmt.subqueries.iter().all(|s| s.kind == StatementKind::Select));
        assert!(stmt.clause(ClauseKind::From).is_some());
        let offset = sql.find("inner_t").unwrap();
        assert!(std::ptr::eq(stmt.innermost(offset), &stmt.subqueries[0]));
        let unclosed = sql.len();
        assert!(std::ptr::eq(stmt.innermost(unclosed), &stmt.subqueries[1]));
    }

    #[test]
    fn clause_indices_never_dangle() {
        let sql = "select a, (select b from c where d) from e join f on g where (h and i) order by";
        let tokens = tokenize(sql);
        for stmt in parse_all(&tokens) {
            for s in stmt.walk() {
                for c in &s.clauses {
                    assert!(c.keyword.end <= tokens.len());
                    assert!(c.body.end <= tokens.len());
                    assert!(c.keyword.end <= c.body.start);
                }
            }
        }
    }

    #[test]
    fn never_panics_on_random_input() {
        const PIECES: &[&str] = &[
            "SELECT", "FROM", "WHERE", "(", ")", ",", ";", "'", "a", "b.", "JOIN", "LEFT", "ON",
            "GROUP", "BY", "UNION", "DELETE", "EXPLAIN", "--", "\n", " ", "=", "é", "/*",
        ];
        let mut rng = rand::rng();
        for _ in 0..500 {
            let sql: String = (0..rng.random_range(0..30))
                .map(|_| PIECES[rng.random_range(0..PIECES.len())])
                .collect::<Vec<_>>()
                .join(" ");
            let tokens = tokenize(&sql);
            let _ = parse(&tokens);
            let _ = parse_all(&tokens);
        }
    }
}
