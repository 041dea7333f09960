use crate::sql::Position;

/// Editor cursor: 0-based line and UTF-16 column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    line: u32,
    column: u32,
}

impl Cursor {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Byte offset of the cursor in `text`, clamped to the text.
    pub fn offset_in(&self, text: &str) -> usize {
        Position::resolve(text, self.line, self.column)
    }

    /// Cursor sitting at byte `offset` of `text`.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let pos = Position::locate(text, offset);
        Self::new(pos.line, pos.column)
    }
}
