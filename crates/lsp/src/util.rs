use tower_lsp::lsp_types::Position as LspPosition;
use vtscope_api::Position;
use vtscope_core::util::utf16_col_to_byte_col;

/// Lightweight container for document state
pub struct Document {
    pub content: String,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, version: i32) -> Self {
        Self { content, version }
    }

    /// Convert an LSP position (UTF-16 column) into a byte-column position.
    pub fn position(&self, pos: LspPosition) -> Position {
        let line = self.content.lines().nth(pos.line as usize).unwrap_or("");
        let column = utf16_col_to_byte_col(line, pos.character as usize);
        Position::new(pos.line, column as u32)
    }
}

/// Byte offset of an LSP position in `text`, for applying ranged edits.
pub fn offset_at(text: &str, position: LspPosition) -> usize {
    let mut line = 0;
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while line < position.line as usize {
        let Some(c) = chars.next() else {
            return offset;
        };
        offset += c.len_utf8();
        if c == '\n' {
            line += 1;
        } else if c == '\r' {
            if let Some(next) = chars.next_if_eq(&'\n') {
                offset += next.len_utf8();
            }
            line += 1;
        }
    }

    let mut utf16_count = 0;
    while utf16_count < position.character as usize {
        match chars.next() {
            Some(c) if c != '\n' && c != '\r' => {
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            }
            _ => break,
        }
    }
    offset
}
