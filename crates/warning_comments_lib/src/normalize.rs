//! # Collapsing comment bodies into one searchable line.

/// Characters that end a line inside a comment body.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Collapse a comment body into its canonical single-line text.
///
/// Each line is trimmed, blank lines are dropped and the rest are joined
/// with one space. Nothing but whitespace is removed, so the `*` margins of
/// a block comment stay in the text.
///
/// ```rust
/// use warning_comments_lib::normalize::normalize;
///
/// assert_eq!(normalize(" fixme "), "fixme");
/// assert_eq!(
///     normalize("*\n * TODO: one\n *   two\n"),
///     "* * TODO: one *   two"
/// );
/// ```
pub fn normalize(body: &str) -> String {
    body.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_is_trimmed() {
        assert_eq!(normalize("  any comment\t"), "any comment");
    }

    #[test]
    fn every_line_ending_splits() {
        assert_eq!(normalize("a\r\nb\rc\nd\u{2028}e\u{2029}f"), "a b c d e f");
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(
            normalize("\nTODO undecorated multi-line block (start)\n\n   \n"),
            "TODO undecorated multi-line block (start)"
        );
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(normalize("a   b\n  c"), "a   b c");
    }

    #[test]
    fn block_margins_survive() {
        assert_eq!(
            normalize("* \n *any block comment \n*with (TODO, FIXME's or XXX!) *"),
            "* *any block comment *with (TODO, FIXME's or XXX!) *"
        );
    }

    #[test]
    fn empty_and_blank_bodies() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t\r\n "), "");
    }
}
