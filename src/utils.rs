// Utility functions

/// Joins the lines of `text`, replacing every run of line breaks with `sep`.
pub fn collapse_lines(text: &str, sep: &str) -> String {
    text.lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Collapses internal whitespace runs to single spaces.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_lines_merges_blank_runs() {
        assert_eq!(collapse_lines("a\n\n\nb\nc", "…"), "a…b…c");
        assert_eq!(collapse_lines("single", "…"), "single");
    }

    #[test]
    fn truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("café au lait", 4), "café");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn squash_whitespace_flattens_newlines() {
        assert_eq!(squash_whitespace(" 12  Court St,\n Brooklyn "), "12 Court St, Brooklyn");
    }
}
