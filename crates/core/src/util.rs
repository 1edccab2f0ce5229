/// Convert an editor (UTF-16) column into a byte offset within `line`.
pub fn utf16_col_to_byte_col(line: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte span of the identifier touching `col`, if any.
pub fn word_span(line: &str, col: usize) -> Option<(usize, usize)> {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }

    let start = line[..col]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident(c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(col);

    let end = line[col..]
        .char_indices()
        .find(|&(_, c)| !is_ident(c))
        .map(|(i, _)| i + col)
        .unwrap_or(line.len());

    (start < end).then_some((start, end))
}

/// The identifier touching `col`, if any.
pub fn word_at(line: &str, col: usize) -> Option<&str> {
    word_span(line, col).map(|(start, end)| &line[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_utf16_columns() {
        assert_eq!(utf16_col_to_byte_col("wär.x", 3), 4);
        assert_eq!(utf16_col_to_byte_col("abc", 10), 3);
    }

    #[test]
    fn finds_word_around_cursor() {
        let line = "    projekt.phasen[0]";
        assert_eq!(word_at(line, 6), Some("projekt"));
        assert_eq!(word_at(line, 11), Some("projekt"));
        assert_eq!(word_at(line, 12), Some("phasen"));
        assert_eq!(word_at(line, 0), None);
    }

    #[test]
    fn handles_umlauts() {
        assert_eq!(word_at("x = währung.code", 6), Some("währung"));
    }
}
