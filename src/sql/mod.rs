//! Lenient SQL tokenization and best-effort statement parsing.
//!
//! This module groups the building blocks every analysis request starts with.
//! Completion and the lint rules both reason about SQL that is usually
//! incomplete while the user types, so neither layer is allowed to fail:
//!
//! Modules:
//! - `keyword`    : The reserved-word set, matched case-insensitively.
//! - `token_kind` : Classification of lexical atoms (keywords, identifiers, trivia, ...).
//! - `location`   : Line / UTF-16 column / byte offset positions.
//! - `token`      : Token struct pairing a `TokenKind` with its text and location.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>` from raw SQL.
//! - `statement`  : Statement kinds, clause slots and clause item splitting.
//! - `parser`     : Recovery-driven parser from tokens to statements.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Preserve original text (casing, whitespace, comments) for display and fixes.
//! 3. Resolve only enough structure to find the cursor's clause and the shape
//!    layout rules inspect.
//!
//! Example:
//! ```rust
//! use sqlhint::sql::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.ident() == Some("my_table")));
//! assert_eq!(parse(&tokens).kind, StatementKind::Select);
//! ```
//!
//! NOTE: This is **not** a full SQL parser and intentionally ignores
//! expression structure, types and dialect details.

pub mod keyword;
pub mod location;
pub mod parser;
pub mod statement;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use location::{Location, Position};
pub use parser::{parse, parse_all};
pub use statement::{Clause, ClauseKind, Item, Statement, StatementKind};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use sqlhint::sql::prelude::*;`
pub mod prelude {
    pub use super::{
        Clause, ClauseKind, Keyword, Location, Position, Statement, StatementKind, Token,
        TokenKind, parse, parse_all, tokenize,
    };
}
