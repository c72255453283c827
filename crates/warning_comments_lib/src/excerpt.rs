//! # Word-safe excerpts of comment text for diagnostic messages.
use std::borrow::Cow;

/// The default length, in chars, an excerpt is kept within.
pub const MAX_EXCERPT_LEN: usize = 40;

/// Shorten `text` to whole words that fit within `limit` chars, marking the
/// cut with `...`.
///
/// Text that already fits is returned untouched. Otherwise words are taken
/// from the front for as long as the next one still fits; a first word that
/// is too long on its own leaves nothing but the ellipsis.
///
/// ```rust
/// use warning_comments_lib::excerpt::{excerpt, MAX_EXCERPT_LEN};
///
/// assert_eq!(excerpt("TODO: small", MAX_EXCERPT_LEN), "TODO: small");
/// assert_eq!(
///     excerpt("TODO: something really longer than 40 characters", MAX_EXCERPT_LEN),
///     "TODO: something really longer than 40..."
/// );
/// ```
pub fn excerpt(text: &str, limit: usize) -> Cow<'_, str> {
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }

    let mut shown = String::new();
    let mut shown_len = 0;
    for word in text.split(' ') {
        let word_len = word.chars().count();
        let next_len = if shown.is_empty() {
            word_len
        } else {
            shown_len + 1 + word_len
        };
        if next_len > limit {
            break;
        }
        if !shown.is_empty() {
            shown.push(' ');
        }
        shown.push_str(word);
        shown_len = next_len;
    }
    shown.push_str("...");
    Cow::Owned(shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(text: &str) -> String {
        excerpt(text, MAX_EXCERPT_LEN).into_owned()
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(ex(""), "");
        assert_eq!(ex("fixme"), "fixme");
        let exactly_forty = "a".repeat(40);
        assert_eq!(ex(&exactly_forty), exactly_forty);
        assert!(matches!(
            excerpt("any comment with TODO, FIXME or XXX", MAX_EXCERPT_LEN),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn cuts_between_words() {
        assert_eq!(
            ex("any block comment with TODO, FIXME or XXX"),
            "any block comment with TODO, FIXME or..."
        );
        assert_eq!(
            ex("any block comment with (TODO, FIXME's or XXX!)"),
            "any block comment with (TODO, FIXME's or..."
        );
        assert_eq!(
            ex("* *any block comment *with (TODO, FIXME's or XXX!) *"),
            "* *any block comment *with (TODO,..."
        );
        assert_eq!(
            ex("Comment ending with term followed by punctuation TODO!"),
            "Comment ending with term followed by..."
        );
        assert_eq!(
            ex("/*/*/ TODO decorated single-line comment with multiple decoration characters (start)"),
            "/*/*/ TODO decorated single-line comment..."
        );
    }

    #[test]
    fn first_word_too_long() {
        assert_eq!(
            ex("https://github.com/eslint/eslint/pull/13522#discussion_r470293411 TODO"),
            "..."
        );
    }

    #[test]
    fn stops_at_the_first_word_that_overflows() {
        // A short word after an oversized one is not picked up.
        let text = format!("short {} tiny", "x".repeat(50));
        assert_eq!(ex(&text), "short...");
    }

    #[test]
    fn result_is_whole_words() {
        let text = "one two three four five six seven eight nine ten eleven";
        let shown = ex(text);
        let kept = shown.strip_suffix("...").unwrap();
        assert!(text.starts_with(kept));
        assert!(kept.chars().count() <= MAX_EXCERPT_LEN);
        assert_eq!(text[kept.len()..].chars().next(), Some(' '));
    }

    #[test]
    fn counts_chars_not_bytes() {
        let text = "é".repeat(40);
        assert_eq!(ex(&text), text);
        assert_eq!(excerpt("ééé ééé", 5), "ééé...");
    }

    #[test]
    fn repeated_spaces_are_empty_words() {
        assert_eq!(excerpt("ab  cd ef", 6), "ab  cd...");
    }
}
