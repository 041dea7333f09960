//! SQL reserved-word model used by the tokenizer, parser and rules.
//!
//! Every word in this enum is treated as reserved: the tokenizer classifies a
//! word run as `TokenKind::Keyword` whenever its lower-cased text matches one of
//! these variants, regardless of the casing used in the source. The
//! `reserved-word-case` rule relies on that to decide which tokens to inspect.
//!
//! Design notes:
//! - Keywords are matched case-insensitively via `from_lower` using a pre-lower-cased
//!   string slice.
//! - `as_str` provides the canonical lowercase spelling; completion labels use
//!   `upper`.
//! - Adding a variant changes linting behavior (one more word whose case is
//!   checked), so extend `ALL` in the same change.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Show,
    Drop,
    Select,
    Update,
    Create,
    Delete,
    Insert,
    Replace,
    Explain,
    All,
    Distinct,
    As,
    Table,
    Into,
    From,
    Set,
    Left,
    On,
    Inner,
    Join,
    Union,
    Values,
    Exists,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Limit,
    Offset,
    Between,
    In,
    Is,
    Like,
    Contains,
    Not,
    And,
    Or,
    True,
    False,
    Null,
    Intersect,
    Except,
}

impl Keyword {
    /// Every reserved word, in declaration order.
    pub const ALL: [Self; 45] = [
        Keyword::Show,
        Keyword::Drop,
        Keyword::Select,
        Keyword::Update,
        Keyword::Create,
        Keyword::Delete,
        Keyword::Insert,
        Keyword::Replace,
        Keyword::Explain,
        Keyword::All,
        Keyword::Distinct,
        Keyword::As,
        Keyword::Table,
        Keyword::Into,
        Keyword::From,
        Keyword::Set,
        Keyword::Left,
        Keyword::On,
        Keyword::Inner,
        Keyword::Join,
        Keyword::Union,
        Keyword::Values,
        Keyword::Exists,
        Keyword::Where,
        Keyword::Group,
        Keyword::By,
        Keyword::Having,
        Keyword::Order,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Between,
        Keyword::In,
        Keyword::Is,
        Keyword::Like,
        Keyword::Contains,
        Keyword::Not,
        Keyword::And,
        Keyword::Or,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::Intersect,
        Keyword::Except,
    ];

    /// Keywords that begin a statement.
    pub const STATEMENT_HEADS: [Self; 9] = [
        Keyword::Select,
        Keyword::Insert,
        Keyword::Update,
        Keyword::Delete,
        Keyword::Create,
        Keyword::Drop,
        Keyword::Explain,
        Keyword::Replace,
        Keyword::Show,
    ];

    /// Set operators that join two SELECTs into one compound query.
    pub const SET_OPERATORS: [Self; 3] = [Keyword::Union, Keyword::Intersect, Keyword::Except];

    /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    ///
    /// NOTE: The caller is responsible for lower-casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "show" => Show,
            "drop" => Drop,
            "select" => Select,
            "update" => Update,
            "create" => Create,
            "delete" => Delete,
            "insert" => Insert,
            "replace" => Replace,
            "explain" => Explain,
            "all" => All,
            "distinct" => Distinct,
            "as" => As,
            "table" => Table,
            "into" => Into,
            "from" => From,
            "set" => Set,
            "left" => Left,
            "on" => On,
            "inner" => Inner,
            "join" => Join,
            "union" => Union,
            "values" => Values,
            "exists" => Exists,
            "where" => Where,
            "group" => Group,
            "by" => By,
            "having" => Having,
            "order" => Order,
            "asc" => Asc,
            "desc" => Desc,
            "limit" => Limit,
            "offset" => Offset,
            "between" => Between,
            "in" => In,
            "is" => Is,
            "like" => Like,
            "contains" => Contains,
            "not" => Not,
            "and" => And,
            "or" => Or,
            "true" => True,
            "false" => False,
            "null" => Null,
            "intersect" => Intersect,
            "except" => Except,
            _ => return None,
        };
        Some(kw)
    }

    /// Case-insensitive classification for arbitrary input.
    pub fn parse(word: &str) -> Option<Self> {
        Self::from_lower(&word.to_ascii_lowercase())
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Show => "show",
            Drop => "drop",
            Select => "select",
            Update => "update",
            Create => "create",
            Delete => "delete",
            Insert => "insert",
            Replace => "replace",
            Explain => "explain",
            All => "all",
            Distinct => "distinct",
            As => "as",
            Table => "table",
            Into => "into",
            From => "from",
            Set => "set",
            Left => "left",
            On => "on",
            Inner => "inner",
            Join => "join",
            Union => "union",
            Values => "values",
            Exists => "exists",
            Where => "where",
            Group => "group",
            By => "by",
            Having => "having",
            Order => "order",
            Asc => "asc",
            Desc => "desc",
            Limit => "limit",
            Offset => "offset",
            Between => "between",
            In => "in",
            Is => "is",
            Like => "like",
            Contains => "contains",
            Not => "not",
            And => "and",
            Or => "or",
            True => "true",
            False => "false",
            Null => "null",
            Intersect => "intersect",
            Except => "except",
        }
    }

    /// Uppercase spelling, used for completion labels.
    pub fn upper(self) -> String {
        self.as_str().to_ascii_uppercase()
    }

    pub fn is_statement_head(self) -> bool {
        Self::STATEMENT_HEADS.contains(&self)
    }

    pub fn is_set_operator(self) -> bool {
        Self::SET_OPERATORS.contains(&self)
    }

    /// Literal-valued keywords behave like operands in expressions.
    pub fn is_literal(self) -> bool {
        matches!(self, Keyword::True | Keyword::False | Keyword::Null)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_keyword() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_lower(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Keyword::parse("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::parse("WHERE"), Some(Keyword::Where));
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "bar", "outer", "cross", "random", "users"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn statement_heads_and_set_operators() {
        assert!(Keyword::Select.is_statement_head());
        assert!(Keyword::Replace.is_statement_head());
        assert!(!Keyword::From.is_statement_head());
        assert!(Keyword::Union.is_set_operator());
        assert!(!Keyword::Join.is_set_operator());
    }

    #[test]
    fn display_matches_as_str() {
        for kw in Keyword::ALL {
            assert_eq!(kw.to_string(), kw.as_str());
        }
        assert_eq!(Keyword::Select.upper(), "SELECT");
    }
}
