use crate::{
    sql::{ClauseKind, Keyword, Position, Statement, StatementKind, Token, TokenKind, parse_all, tokenize},
    trace,
};

/// A table named by a FROM / JOIN / INTO / UPDATE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub database: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}

/// The syntactic situation at one cursor offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorContext {
    pub statement_kind: StatementKind,
    /// Clause whose keyword precedes the cursor, if any.
    pub clause: Option<ClauseKind>,
    pub expects_table_ref: bool,
    pub expects_column_ref: bool,
    /// Identifier directly before a `.` that precedes the cursor.
    pub qualifier: Option<String>,
    /// Word text between its start and the cursor.
    pub partial_token: String,
    /// The cursor follows a complete table reference (`FROM users |`).
    pub after_table_ref: bool,
    /// Tables referenced by the enclosing statement, in source order.
    pub tables: Vec<TableRef>,
}

impl CursorContext {
    /// Derive the context for byte `offset` of `text`.
    ///
    /// Returns `None` when the cursor sits inside a string literal or comment.
    pub fn derive(text: &str, offset: usize) -> Option<Self> {
        let offset = Position::locate(text, offset).offset;
        let tokens = tokenize(text);
        Self::from_tokens(&tokens, offset)
    }

    pub fn from_tokens(tokens: &[Token], offset: usize) -> Option<Self> {
        if tokens.iter().any(|t| is_inert_at(t, offset)) {
            trace!("Cursor {offset} is inside a literal or comment");
            return None;
        }

        let (partial_token, partial_start) = match tokens.iter().find(|t| is_word_at(t, offset)) {
            Some(t) => {
                let typed = &t.text[..offset - t.start()];
                (typed.trim_start_matches(['"', '`']).to_string(), t.start())
            }
            None => (String::new(), offset),
        };

        let before: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.end() <= partial_start && !t.is_trivia() && t.kind != TokenKind::Eof)
            .collect();
        let (qualifier, anchor) = match before.as_slice() {
            [.., name, dot] if dot.is_punct('.') && name.end() == dot.start() => match name.ident() {
                Some(q) => (Some(q.to_string()), before.len().checked_sub(3).map(|i| before[i])),
                None => (None, Some(*dot)),
            },
            [.., last] => (None, Some(*last)),
            [] => (None, None),
        };

        let statements = parse_all(tokens);
        let statement = statements
            .iter()
            .rev()
            .find(|s| s.contains(offset))
            .map(|s| s.innermost(offset));

        let clause = statement.and_then(|s| {
            s.clauses
                .iter()
                .rev()
                .find(|c| c.keyword_end(tokens) <= partial_start)
                .map(|c| c.kind)
        });

        let anchor_kw = anchor.and_then(|t| t.keyword());
        let anchor_punct = |c| anchor.is_some_and(|t| t.is_punct(c));

        let expects_table_ref = matches!(
            anchor_kw,
            Some(Keyword::From | Keyword::Join | Keyword::Into | Keyword::Update | Keyword::Table)
        ) || (anchor_punct(',') && clause == Some(ClauseKind::From));

        let after_table_ref = !expects_table_ref
            && qualifier.is_none()
            && clause.is_some_and(ClauseKind::expects_table_ref)
            && anchor.is_some_and(|t| t.kind.is_ident() || t.is_punct(')'));

        let expects_column_ref = !expects_table_ref
            && !after_table_ref
            && (qualifier.is_some()
                || clause.is_some_and(ClauseKind::expects_column_ref)
                || (clause == Some(ClauseKind::Into) && (anchor_punct('(') || anchor_punct(','))));

        Some(Self {
            statement_kind: statement.map(|s| s.kind).unwrap_or(StatementKind::Unknown),
            clause,
            expects_table_ref,
            expects_column_ref,
            qualifier,
            partial_token,
            after_table_ref,
            tables: statement.map(|s| referenced_tables(tokens, s)).unwrap_or_default(),
        })
    }
}

/// Strictly inside a string or comment. Unterminated strings and line
/// comments also swallow the position right after them.
fn is_inert_at(token: &Token, offset: usize) -> bool {
    match token.kind {
        TokenKind::StringLiteral => {
            let closed = token.text.len() >= 2 && token.text.ends_with('\'');
            token.start() < offset && (offset < token.end() || (offset == token.end() && !closed))
        }
        TokenKind::Comment => {
            token.start() < offset
                && (offset < token.end() || (offset == token.end() && token.text.starts_with("--")))
        }
        _ => false,
    }
}

fn is_word_at(token: &Token, offset: usize) -> bool {
    token.start() < offset
        && offset <= token.end()
        && matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_))
}

/// Tables named in the statement's FROM, JOIN, INTO and UPDATE clauses.
///
/// Each comma-separated item is read as `name[.name]* [[AS] alias]`;
/// derived tables are skipped.
pub fn referenced_tables(tokens: &[Token], statement: &Statement) -> Vec<TableRef> {
    let mut out = Vec::new();
    for clause in statement
        .clauses
        .iter()
        .filter(|c| c.kind.expects_table_ref())
    {
        for item in clause.items(tokens) {
            let mut it = item.tokens.iter().map(|&i| &tokens[i]).peekable();
            let mut parts = Vec::new();
            while let Some(name) = it.peek().and_then(|t| t.ident()).map(str::to_string) {
                parts.push(name);
                it.next();
                if !it.peek().is_some_and(|t| t.is_punct('.')) {
                    break;
                }
                it.next();
            }
            let Some(name) = parts.pop() else {
                continue;
            };
            if it.peek().is_some_and(|t| t.is_keyword(Keyword::As)) {
                it.next();
            }
            let alias = it.next().and_then(Token::ident).map(str::to_string);
            out.push(TableRef {
                database: parts.pop(),
                name,
                alias,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at_end(sql: &str) -> CursorContext {
        CursorContext::derive(sql, sql.len()).expect("cursor is not inert")
    }

    #[test]
    fn member_access_after_dot() {
        let ctx = at_end("SELECT * FROM users u WHERE u.");
        assert_eq!(ctx.qualifier.as_deref(), Some("u"));
        assert_eq!(ctx.clause, Some(ClauseKind::Where));
        assert!(ctx.expects_column_ref);
        assert!(!ctx.expects_table_ref);
        assert_eq!(ctx.partial_token, "");
    }

    #[test]
    fn partial_token_after_qualifier() {
        let ctx = at_end("SELECT u.em");
        assert_eq!(ctx.qualifier.as_deref(), Some("u"));
        assert_eq!(ctx.partial_token, "em");
    }

    #[rstest]
    #[case("SELECT * FROM ", true)]
    #[case("SELECT * FROM a, ", true)]
    #[case("SELECT * FROM a JOIN ", true)]
    #[case("INSERT INTO ", true)]
    #[case("UPDATE ", true)]
    #[case("SELECT * FROM a WHERE ", false)]
    #[case("SELECT ", false)]
    fn table_slots(#[case] sql: &str, #[case] expected: bool) {
        assert_eq!(at_end(sql).expects_table_ref, expected);
    }

    #[test]
    fn empty_text_has_no_clause() {
        let ctx = at_end("");
        assert_eq!(ctx.statement_kind, StatementKind::Unknown);
        assert_eq!(ctx.clause, None);
        assert!(!ctx.expects_column_ref && !ctx.expects_table_ref);
    }

    #[test]
    fn after_table_reference() {
        let ctx = at_end("SELECT * FROM users u ");
        assert!(ctx.after_table_ref);
        assert!(!ctx.expects_table_ref && !ctx.expects_column_ref);
    }

    #[test]
    fn collects_tables_and_aliases() {
        let ctx = at_end("SELECT  FROM app.users AS u, orders o LEFT JOIN items WHERE ");
        let tables: Vec<_> = ctx
            .tables
            .iter()
            .map(|t| (t.database.as_deref(), t.name.as_str(), t.alias.as_deref()))
            .collect();
        assert_eq!(
            tables,
            vec![
                (Some("app"), "users", Some("u")),
                (None, "orders", Some("o")),
                (None, "items", None),
            ]
        );
    }

    #[test]
    fn subquery_has_its_own_scope() {
        let sql = "SELECT (SELECT  FROM inner_t) FROM outer_t";
        let ctx = CursorContext::derive(sql, 15).expect("context");
        assert_eq!(ctx.clause, Some(ClauseKind::Select));
        assert_eq!(ctx.tables.len(), 1);
        assert_eq!(ctx.tables[0].name, "inner_t");
    }

    #[rstest]
    #[case("SELECT 'abc", 9)]
    #[case("SELECT 'abc", 11)]
    #[case("SELECT 1 -- note", 16)]
    #[case("SELECT /* x */ 1", 10)]
    fn inert_inside_literals_and_comments(#[case] sql: &str, #[case] offset: usize) {
        assert_eq!(CursorContext::derive(sql, offset), None);
    }
}
