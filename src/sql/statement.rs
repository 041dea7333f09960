//! Coarse statement shape produced by the parser.
//!
//! A `Statement` is a closed set of kinds over an ordered list of clause
//! slots. Clauses only hold token *indices* into the stream the statement was
//! parsed from, so a statement is meaningless without that stream and must be
//! recomputed whenever the text changes.
use crate::sql::{keyword::Keyword, token::Token};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StatementKind {
    #[display("select")]
    Select,
    #[display("insert")]
    Insert,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
    #[display("create")]
    Create,
    #[display("drop")]
    Drop,
    #[display("explain")]
    Explain,
    #[display("unknown")]
    Unknown,
}

impl StatementKind {
    /// Classify a statement by its first significant keyword.
    pub fn from_head(head: Option<Keyword>) -> Self {
        match head {
            Some(Keyword::Select) => Self::Select,
            Some(Keyword::Insert | Keyword::Replace) => Self::Insert,
            Some(Keyword::Update) => Self::Update,
            Some(Keyword::Delete) => Self::Delete,
            Some(Keyword::Create) => Self::Create,
            Some(Keyword::Drop) => Self::Drop,
            Some(Keyword::Explain) => Self::Explain,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ClauseKind {
    #[display("SELECT")]
    Select,
    #[display("FROM")]
    From,
    #[display("JOIN")]
    Join,
    #[display("ON")]
    On,
    #[display("WHERE")]
    Where,
    #[display("GROUP BY")]
    GroupBy,
    #[display("HAVING")]
    Having,
    #[display("ORDER BY")]
    OrderBy,
    #[display("LIMIT")]
    Limit,
    #[display("OFFSET")]
    Offset,
    #[display("INTO")]
    Into,
    #[display("VALUES")]
    Values,
    #[display("SET")]
    Set,
    #[display("INSERT")]
    Insert,
    #[display("UPDATE")]
    Update,
    #[display("DELETE")]
    Delete,
    #[display("CREATE")]
    Create,
    #[display("DROP")]
    Drop,
    #[display("EXPLAIN")]
    Explain,
}

impl ClauseKind {
    /// Clauses whose arguments name tables.
    pub fn expects_table_ref(self) -> bool {
        matches!(
            self,
            ClauseKind::From | ClauseKind::Join | ClauseKind::Into | ClauseKind::Update
        )
    }

    /// Clauses whose arguments are expressions over columns.
    pub fn expects_column_ref(self) -> bool {
        matches!(
            self,
            ClauseKind::Select
                | ClauseKind::Where
                | ClauseKind::On
                | ClauseKind::GroupBy
                | ClauseKind::OrderBy
                | ClauseKind::Having
                | ClauseKind::Set
        )
    }
}

/// One recognized clause: its keyword token(s) and the tokens of its body.
///
/// `body` is trimmed to end after its last significant token; it may be empty
/// (e.g. `SELECT a FROM` has an empty FROM body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub kind: ClauseKind,
    pub keyword: Range<usize>,
    pub body: Range<usize>,
}

/// A separator-delimited piece of a clause body, e.g. one SELECT-list column
/// or one `AND` predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    /// Index of the comma / conjunction that precedes the item.
    pub separator: Option<usize>,
    /// Indices of the item's significant tokens.
    pub tokens: Vec<usize>,
}

impl Item {
    pub fn first(&self) -> Option<usize> {
        self.tokens.first().copied()
    }
}

impl Clause {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Byte offset just past the clause keyword.
    pub fn keyword_end(&self, tokens: &[Token]) -> usize {
        tokens[self.keyword.end - 1].end()
    }

    pub fn keyword_token<'t>(&self, tokens: &'t [Token]) -> &'t Token {
        &tokens[self.keyword.start]
    }

    /// Indices of non-trivia tokens in the body.
    pub fn significant<'t>(&self, tokens: &'t [Token]) -> impl Iterator<Item = usize> + 't {
        self.body.clone().filter(|&i| !tokens[i].is_trivia())
    }

    pub fn first_argument(&self, tokens: &[Token]) -> Option<usize> {
        self.significant(tokens).next()
    }

    /// Split the body at top-level commas.
    pub fn items(&self, tokens: &[Token]) -> Vec<Item> {
        self.split_by(tokens, |t| t.is_punct(','))
    }

    /// Split the body at top-level `AND` / `OR`. The `AND` of
    /// `BETWEEN x AND y` does not separate predicates.
    pub fn predicates(&self, tokens: &[Token]) -> Vec<Item> {
        let mut in_between = false;
        self.split_by(tokens, move |t| match t.keyword() {
            Some(Keyword::Between) => {
                in_between = true;
                false
            }
            Some(Keyword::And) if in_between => {
                in_between = false;
                false
            }
            Some(Keyword::And | Keyword::Or) => true,
            _ => false,
        })
    }

    fn split_by(&self, tokens: &[Token], mut is_separator: impl FnMut(&Token) -> bool) -> Vec<Item> {
        let mut items = vec![Item::default()];
        let mut depth = 0usize;
        for i in self.significant(tokens) {
            let t = &tokens[i];
            if t.is_punct('(') {
                depth += 1;
            } else if t.is_punct(')') {
                depth = depth.saturating_sub(1);
            } else if depth == 0 && is_separator(t) {
                items.push(Item {
                    separator: Some(i),
                    tokens: Vec::new(),
                });
                continue;
            }
            if let Some(item) = items.last_mut() {
                item.tokens.push(i);
            }
        }
        items
    }
}

/// Best-effort structure of one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Token indices from the first to the last significant token.
    pub tokens: Range<usize>,
    /// Byte range of text owned by this statement (separators excluded).
    pub bounds: Range<usize>,
    pub clauses: Vec<Clause>,
    /// Parenthesised `(SELECT ...)` groups, in source order.
    pub subqueries: Vec<Statement>,
    /// Significant tokens that could not be attached to any clause.
    pub skipped: Vec<usize>,
}

impl Statement {
    /// A statement with no tokens, used for empty input.
    pub fn empty(bounds: Range<usize>) -> Self {
        Self {
            kind: StatementKind::Unknown,
            tokens: 0..0,
            bounds,
            clauses: Vec::new(),
            subqueries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn clause(&self, kind: ClauseKind) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.kind == kind)
    }

    pub fn clauses_of(&self, kind: ClauseKind) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(move |c| c.kind == kind)
    }

    /// True if `offset` lies inside this statement's text (ends inclusive).
    pub fn contains(&self, offset: usize) -> bool {
        self.bounds.start <= offset && offset <= self.bounds.end
    }

    /// This statement followed by all nested subqueries, depth-first.
    pub fn walk(&self) -> Vec<&Statement> {
        let mut out = vec![self];
        for sub in &self.subqueries {
            out.extend(sub.walk());
        }
        out
    }

    /// Innermost statement (this one or a nested subquery) containing `offset`.
    pub fn innermost(&self, offset: usize) -> &Statement {
        self.subqueries
            .iter()
            .find(|s| s.contains(offset))
            .map(|s| s.innermost(offset))
            .unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{parser::parse, tokenizer::tokenize};

    fn texts(tokens: &[Token], items: &[Item]) -> Vec<String> {
        items
            .iter()
            .map(|item| {
                item.tokens
                    .iter()
                    .map(|&i| tokens[i].text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn select_items_split_on_top_level_commas() {
        let tokens = tokenize("SELECT a, coalesce(b, c), d FROM t");
        let stmt = parse(&tokens);
        let select = stmt.clause(ClauseKind::Select).unwrap();
        let items = select.items(&tokens);
        assert_eq!(texts(&tokens, &items), vec!["a", "coalesce ( b , c )", "d"]);
        assert!(items[0].separator.is_none());
        assert!(tokens[items[1].separator.unwrap()].is_punct(','));
    }

    #[test]
    fn predicates_ignore_between_and() {
        let tokens = tokenize("SELECT * FROM t WHERE a BETWEEN 1 AND 2 AND b = 1 OR c");
        let stmt = parse(&tokens);
        let where_ = stmt.clause(ClauseKind::Where).unwrap();
        let items = where_.predicates(&tokens);
        assert_eq!(
            texts(&tokens, &items),
            vec!["a BETWEEN 1 AND 2", "b = 1", "c"]
        );
    }

    #[test]
    fn clause_kinds_classify_slots() {
        assert!(ClauseKind::From.expects_table_ref());
        assert!(ClauseKind::Update.expects_table_ref());
        assert!(!ClauseKind::Where.expects_table_ref());
        assert!(ClauseKind::Where.expects_column_ref());
        assert!(!ClauseKind::Limit.expects_column_ref());
        assert_eq!(ClauseKind::GroupBy.to_string(), "GROUP BY");
    }
}
