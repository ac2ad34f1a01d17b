//! Source positions for diagnostics.

/// Characters of context taken on each side of an offset.
const HALF_WIDTH: usize = 30;

/// 1-based column of a byte offset within its line.
pub fn column(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..offset].chars().count() + 1
}

/// Up to 60 characters of context around `offset`, clipped at line boundaries.
pub fn snippet(text: &str, offset: usize) -> String {
    let offset = offset.min(text.len());
    let before: Vec<(usize, char)> = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| *c != '\n')
        .take(HALF_WIDTH)
        .collect();
    let start = before.last().map_or(offset, |(i, _)| *i);
    let end = text[offset..]
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .take(HALF_WIDTH)
        .last()
        .map_or(offset, |(i, c)| offset + i + c.len_utf8());
    text[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_is_one_based() {
        let text = "abc\ndef";
        assert_eq!(column(text, 0), 1);
        assert_eq!(column(text, 4), 1);
        assert_eq!(column(text, 6), 3);
    }

    #[test]
    fn test_snippet_clips_at_lines() {
        let text = "first line\nCREATE TABLE $oops\nlast";
        let offset = text.find('$').unwrap();
        assert_eq!(snippet(text, offset), "CREATE TABLE $oops");
    }

    #[test]
    fn test_snippet_width() {
        let text = "x".repeat(100);
        assert_eq!(snippet(&text, 50).len(), 60);
    }
}
