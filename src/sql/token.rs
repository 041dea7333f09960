//! Token model tying a `TokenKind` to its source text and location.
//!
//! Offsets always refer to the *original* SQL string supplied to the tokenizer,
//! so `&sql[token.start()..token.end()] == token.text` for every token.
use crate::sql::{
    keyword::Keyword,
    location::{Location, Position},
    token_kind::TokenKind,
};

/// A lexical token with its half-open `[start, end)` location.
///
/// Invariants:
/// - `location.end.offset >= location.start.offset`
/// - tokens of one stream are contiguous and strictly increasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            location: Location::new(start, end),
        }
    }

    /// Byte offset of the first character.
    pub const fn start(&self) -> usize {
        self.location.start.offset
    }

    /// Byte offset one past the last character.
    pub const fn end(&self) -> usize {
        self.location.end.offset
    }

    pub fn len(&self) -> usize {
        self.end().saturating_sub(self.start())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the identifier text if this token is an identifier, with
    /// surrounding quotes removed.
    pub fn ident(&self) -> Option<&str> {
        if !self.kind.is_ident() {
            return None;
        }
        let text = self.text.as_str();
        let quoted = ['"', '`']
            .iter()
            .any(|q| text.len() >= 2 && text.starts_with(*q) && text.ends_with(*q));
        Some(if quoted { &text[1..text.len() - 1] } else { text })
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.kind.keyword()
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// True if this is the single-character punctuation `c`.
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    /// True for whitespace containing at least one line break.
    pub fn has_newline(&self) -> bool {
        self.kind == TokenKind::Whitespace && self.text.contains('\n')
    }

    /// Returns true if the cursor (byte offset) lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start() && cursor < self.end()
    }

    /// Convenience: convert to a `(start, end)` tuple.
    pub const fn span(&self) -> (usize, usize) {
        (self.start(), self.end())
    }
}
