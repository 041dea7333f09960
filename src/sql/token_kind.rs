//! Token kind definitions for the lenient SQL tokenizer.
//!
//! Each `TokenKind` variant represents a lexical class discovered during the
//! scanning phase. The tokenizer never rejects input; anything it cannot
//! classify becomes a single-character `Punctuation` token.
//!
//! Whitespace and comments are kept as tokens (collectively "trivia") so that
//! layout rules can inspect them. Parser and completion views skip them with
//! `is_trivia`.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Recognized reserved word.
    Keyword(Keyword),
    /// Table / alias / column / function name, bare or quoted.
    Identifier,
    /// Comparison, arithmetic or concatenation operator.
    Operator,
    /// Comma, dot, parentheses, semicolon and any unrecognized character.
    Punctuation,
    StringLiteral,
    NumberLiteral,
    /// `-- line` or `/* block */` comment.
    Comment,
    /// A run of whitespace, newlines included.
    Whitespace,
    /// Zero-width end marker.
    Eof,
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Identifier)
    }

    /// Whitespace or comment.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Literals and names: things an operator can act on.
    pub fn is_operand(&self) -> bool {
        match self {
            TokenKind::Identifier | TokenKind::StringLiteral | TokenKind::NumberLiteral => true,
            TokenKind::Keyword(k) => k.is_literal(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert_eq!(tk.keyword(), Some(Keyword::Select));
        assert_eq!(TokenKind::Identifier.keyword(), None);
    }

    #[test]
    fn trivia_classification() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
    }

    #[test]
    fn operand_classification() {
        assert!(TokenKind::Identifier.is_operand());
        assert!(TokenKind::NumberLiteral.is_operand());
        assert!(TokenKind::Keyword(Keyword::Null).is_operand());
        assert!(!TokenKind::Keyword(Keyword::Select).is_operand());
        assert!(!TokenKind::Operator.is_operand());
    }
}
