//! Source positions shared by tokens, diagnostics and the editor bridge.
//!
//! A `Position` carries three coordinates at once because consumers address
//! text differently: the editor protocol talks in line/column, rules and fixes
//! in offsets.
//!
//! - `line`   : 0-based line number (lines are separated by `\n`).
//! - `column` : 0-based count of UTF-16 code units since the last `\n`.
//! - `offset` : byte offset into the UTF-8 source.
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub const fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Compute the position of a byte `offset` in `text`.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character resolve to the start of that character.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line = before.matches('\n').count() as u32;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].encode_utf16().count() as u32;
        Self::new(line, column, offset)
    }

    /// Resolve a line/column pair to a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end; lines past the
    /// end of the text clamp to the end of the text.
    pub fn resolve(text: &str, line: u32, column: u32) -> usize {
        let mut line_start = 0;
        for _ in 0..line {
            match text[line_start..].find('\n') {
                Some(i) => line_start += i + 1,
                None => return text.len(),
            }
        }
        let line_end = text[line_start..]
            .find('\n')
            .map(|i| line_start + i)
            .unwrap_or(text.len());

        let mut seen = 0u32;
        for (i, ch) in text[line_start..line_end].char_indices() {
            if seen >= column {
                return line_start + i;
            }
            seen += ch.len_utf16() as u32;
        }
        line_end
    }
}

/// Half-open span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Build a location from byte offsets into `text`.
    pub fn from_offsets(text: &str, start: usize, end: usize) -> Self {
        Self::new(Position::locate(text, start), Position::locate(text, end))
    }

    /// True if the two spans share at least one position. Empty spans
    /// intersect anything that touches them.
    pub fn intersects(&self, other: &Location) -> bool {
        self.start.offset <= other.end.offset && other.start.offset <= self.end.offset
    }
}
