use crate::sql::{
    keyword::Keyword, location::Position, token::Token, token_kind::TokenKind,
};
use std::{iter::Peekable, str::CharIndices};

/// Lenient SQL tokenizer producing a flat, gap-free stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for live editing: accepts incomplete / syntactically invalid SQL
///   (e.g. `SELECT FROM`, `WHERE 'unterminated`).
/// - Keeps whitespace and comments as tokens so layout rules can see them.
///
/// Behavior:
/// - Aggregates word runs into identifiers, preserving original case, and
///   lower-cases once to attempt keyword classification.
/// - `'...'` (with `''` escapes) is a string literal; `"..."` and `` `...` ``
///   are quoted identifiers. Unterminated literals and block comments run to
///   the end of input.
/// - Emits multi-character operators (`<=`, `>=`, `<>`, `!=`, `||`, `::`) as
///   one token; every other unclassified character is a one-character
///   `Punctuation` token.
/// - Always ends with a zero-width `Eof` token.
///
/// Guarantees:
/// - Never panics and never returns an error.
/// - Slicing the input by a token's offsets yields its `text`.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(sql);
    let mut out = Vec::new();

    while let Some(c) = scanner.peek() {
        let start = scanner.position();
        let kind = scanner.scan(c);
        let end = scanner.position();
        out.push(Token::new(kind, &sql[start.offset..end.offset], start, end));
    }

    let end = scanner.position();
    out.push(Token::new(TokenKind::Eof, "", end, end));
    out
}

const TWO_CHAR_OPERATORS: [&str; 6] = ["<=", ">=", "<>", "!=", "||", "::"];
const ONE_CHAR_OPERATORS: [char; 8] = ['=', '<', '>', '+', '-', '*', '/', '%'];

struct Scanner<'a> {
    sql: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Scanner<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            chars: sql.char_indices().peekable(),
            line: 0,
            column: 0,
        }
    }

    fn position(&mut self) -> Position {
        let offset = self.chars.peek().map(|(i, _)| *i).unwrap_or(self.sql.len());
        Position::new(self.line, self.column, offset)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1).map(|(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += c.len_utf16() as u32;
        }
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    fn scan(&mut self, c: char) -> TokenKind {
        let next = self.peek_second();
        match c {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            '-' if next == Some('-') => {
                self.eat_while(|c| c != '\n');
                TokenKind::Comment
            }
            '/' if next == Some('*') => {
                self.bump();
                self.bump();
                self.block_comment();
                TokenKind::Comment
            }
            '\'' => {
                self.quoted('\'');
                TokenKind::StringLiteral
            }
            '"' | '`' => {
                self.quoted(c);
                TokenKind::Identifier
            }
            c if c.is_ascii_digit() => {
                self.number();
                TokenKind::NumberLiteral
            }
            '.' if next.is_some_and(|n| n.is_ascii_digit()) => {
                self.number();
                TokenKind::NumberLiteral
            }
            c if c.is_alphabetic() || c == '_' => self.word(),
            _ => self.symbol(c, next),
        }
    }

    fn block_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == '*' && self.peek() == Some('/') {
                self.bump();
                return;
            }
        }
    }

    /// Consume a quoted run; a doubled quote is an escaped quote.
    fn quoted(&mut self, quote: char) {
        self.bump();
        while let Some(c) = self.bump() {
            if c == quote {
                if self.peek() == Some(quote) {
                    self.bump();
                    continue;
                }
                return;
            }
        }
    }

    fn number(&mut self) {
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_none_or(|c| c.is_ascii_digit()) {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let after = self.chars.clone().nth(1).map(|(_, c)| c);
            let signed = self.chars.clone().nth(2).map(|(_, c)| c);
            let exponent = match after {
                Some(d) if d.is_ascii_digit() => true,
                Some('+' | '-') => signed.is_some_and(|d| d.is_ascii_digit()),
                _ => false,
            };
            if exponent {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_while(|c| c.is_ascii_digit());
            }
        }
    }

    fn word(&mut self) -> TokenKind {
        let start = self.position().offset;
        self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let end = self.position().offset;
        let lower = self.sql[start..end].to_ascii_lowercase();
        Keyword::from_lower(&lower)
            .map(TokenKind::Keyword)
            .unwrap_or(TokenKind::Identifier)
    }

    fn symbol(&mut self, c: char, next: Option<char>) -> TokenKind {
        if let Some(n) = next {
            let mut pair = String::with_capacity(2);
            pair.push(c);
            pair.push(n);
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.bump();
                self.bump();
                return TokenKind::Operator;
            }
        }
        self.bump();
        if ONE_CHAR_OPERATORS.contains(&c) {
            TokenKind::Operator
        } else {
            TokenKind::Punctuation
        }
    }
}
