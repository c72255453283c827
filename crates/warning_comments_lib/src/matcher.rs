//! # Matching warning terms against canonical comment text.
//!
//! Terms are literals compared without regard to case. A term only matches
//! on a "word edge": if the term begins (or ends) with a word character then
//! the character just before (or after) the occurrence must not be a word
//! character. A term that begins or ends with punctuation, like `todo!` or
//! `!fix`, opts out of the check on that side.
use regex::Regex;
use serde::Deserialize;

/// Where in a comment a term has to appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// The term must open the comment, after any whitespace or decoration.
    #[default]
    Start,
    /// The term may appear anywhere in the comment.
    Anywhere,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Location::Start => "start",
            Location::Anywhere => "anywhere",
        })
    }
}

/// A letter, a digit or an underscore.
///
/// Only decides whether a term's edge gets a `\b`. The boundary itself is
/// regex's Unicode `\w`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build the pattern for one term.
///
/// For [`Location::Start`] the leading run of whitespace and decoration is
/// part of the pattern, so the regex engine settles how much of it to skip
/// when the term itself starts with a decoration char.
fn term_pattern(term: &str, location: Location, decoration: &[char]) -> String {
    let mut pattern = String::from("(?i)");
    match location {
        Location::Start => {
            pattern.push_str(r"^[\s");
            for c in decoration.iter() {
                pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            }
            pattern.push_str("]*");
        }
        Location::Anywhere => {
            if term.chars().next().is_some_and(is_word_char) {
                pattern.push_str(r"\b");
            }
        }
    }
    pattern.push_str(&regex::escape(term));
    if term.chars().next_back().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// One configured term, compiled for a location policy and decoration set.
///
/// ```rust
/// use warning_comments_lib::matcher::{Location, TermMatcher};
///
/// let todo = TermMatcher::new("todo", Location::Start, &['*']).unwrap();
/// assert_eq!(todo.term(), "todo");
/// assert!(todo.is_match("** TODO: box it"));
/// assert!(!todo.is_match("not a TODO"));
/// ```
#[derive(Clone, Debug)]
pub struct TermMatcher {
    term: String,
    /// `None` for the empty term, which never matches.
    regex: Option<Regex>,
}

impl TermMatcher {
    pub fn new(term: &str, location: Location, decoration: &[char]) -> Result<Self, regex::Error> {
        let regex = if term.is_empty() {
            None
        } else {
            Some(Regex::new(&term_pattern(term, location, decoration))?)
        };
        Ok(TermMatcher {
            term: term.to_string(),
            regex,
        })
    }

    /// The term as it was configured.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        let matched = self.regex.as_ref().is_some_and(|regex| regex.is_match(text));
        log::trace!("term {:?} in {text:?}: {matched}", self.term);
        matched
    }

    /// Byte offset where the first match begins. Under [`Location::Start`]
    /// that is the start of the skipped whitespace and decoration.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.regex.as_ref()?.find(text).map(|m| m.start())
    }
}

/// Byte offset of the first occurrence of `term` in `text` that satisfies
/// both edge rules.
///
/// ```rust
/// use warning_comments_lib::matcher::find_anywhere;
///
/// assert_eq!(find_anywhere("TodoMVC, not a todo", "todo"), Some(15));
/// assert_eq!(find_anywhere("TodoMVC", "todo"), None);
/// ```
pub fn find_anywhere(text: &str, term: &str) -> Option<usize> {
    TermMatcher::new(term, Location::Anywhere, &[])
        .ok()?
        .find(text)
}

/// Decide whether `term` occurs in the canonical comment `text` under the
/// given location policy.
///
/// Under [`Location::Start`] any mixture of whitespace and `decoration`
/// characters may come before the term. Scans over many comments should
/// build a [`TermMatcher`] once instead.
///
/// ```rust
/// use warning_comments_lib::matcher::{matches, Location};
///
/// assert!(matches("TODO: something", "todo", Location::Start, &[]));
/// assert!(!matches("any comment with TODO", "todo", Location::Start, &[]));
/// assert!(matches("any fixme or todo", "todo", Location::Anywhere, &[]));
/// assert!(matches("**TODO rest", "*todo", Location::Start, &['*']));
/// ```
pub fn matches(text: &str, term: &str, location: Location, decoration: &[char]) -> bool {
    TermMatcher::new(term, location, decoration).is_ok_and(|matcher| matcher.is_match(text))
}

#[cfg(test)]
mod test_my_assumptions {
    use super::*;

    #[test]
    fn case_folding_covers_the_kelvin_sign() {
        // KELVIN SIGN is three bytes but folds to an ASCII 'k'.
        assert_eq!('\u{212A}'.len_utf8(), 3);
        let re = Regex::new("(?i)k").unwrap();
        assert_eq!(re.find("\u{212A}").map(|m| m.end()), Some(3));
    }

    #[test]
    fn escaped_chars_are_fine_in_a_class() {
        for c in ['*', '-', '^', ']', '\\', '&', '~', '#'] {
            let class = format!("^[{}]$", regex::escape(&c.to_string()));
            assert!(Regex::new(&class).unwrap().is_match(&c.to_string()), "{c}");
        }
    }

    #[test]
    fn whitespace_is_unicode_aware() {
        assert!(Regex::new(r"^\s$").unwrap().is_match("\u{3000}"));
        assert!('\u{3000}'.is_whitespace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anywhere(text: &str, term: &str) -> bool {
        matches(text, term, Location::Anywhere, &[])
    }

    fn start(text: &str, term: &str, decoration: &[char]) -> bool {
        matches(text, term, Location::Start, decoration)
    }

    #[test]
    fn absent_terms_never_match() {
        for location in [Location::Start, Location::Anywhere] {
            assert!(!matches("any comment", "fixme", location, &[]));
            assert!(!matches("", "todo", location, &[]));
            assert!(!matches("tod", "todo", location, &['*']));
        }
    }

    #[test]
    fn case_is_ignored() {
        for text in ["any fixme", "any FIXME", "any fIxMe"] {
            assert!(anywhere(text, "fixme"), "{text}");
            assert!(anywhere(text, "FIXME"), "{text}");
        }
        assert!(start("Todo later", "TODO", &[]));
    }

    #[test]
    fn embedded_in_a_longer_word() {
        assert!(!anywhere(
            "comments containing terms as substrings like TodoMVC",
            "todo"
        ));
        assert!(!anywhere("mytodo", "todo"));
        assert!(!anywhere("todo_list", "todo"));
        assert!(!anywhere("todo2", "todo"));
        assert!(!start("TodoMVC", "todo", &[]));
        assert!(!start("foo", "foo-bar", &[]));
    }

    #[test]
    fn surrounding_punctuation_is_a_boundary() {
        assert!(anywhere("with (TODO, FIXME's or XXX!)", "todo"));
        assert!(anywhere("with (TODO, FIXME's or XXX!)", "fixme"));
        assert!(anywhere("with (TODO, FIXME's or XXX!)", "xxx"));
        assert!(anywhere("eslint one-var: 2", "one"));
        assert!(start("fixme!", "fixme", &[]));
    }

    #[test]
    fn punctuation_in_the_term_skips_that_edge() {
        assert!(anywhere(
            "FIX!term ending with punctuation followed word character",
            "FIX!"
        ));
        assert!(anywhere(
            "Term starting with punctuation preceded word character!FIX",
            "!FIX"
        ));
        assert!(anywhere("ending with term including punctuation TODO!", "todo!"));
        assert!(anywhere("followed by more TODO!!!", "todo!"));
        assert!(anywhere("!!!TODO starting with term preceded by more", "!todo"));
        // The other edge is still checked.
        assert!(!anywhere("FIX!terms", "!term"));
        assert!(!anywhere("xFIX!", "FIX!"));
    }

    #[test]
    fn terms_are_literal() {
        assert!(anywhere("regex [litera|$]", "[litera|$]"));
        assert!(!anywhere("special regex characters don't cause a problem", "[aeiou]"));
        assert!(!anywhere("anything", ".*"));
        assert!(anywhere("a .* b", ".*"));
    }

    #[test]
    fn start_needs_the_opening_content() {
        assert!(!start("any comment with TODO, FIXME or XXX", "todo", &[]));
        assert!(start("TODO: something", "todo", &[]));
        assert!(start("   TODO: something", "todo", &[]));
        assert!(start("eslint one-var: 2", "eslint", &[]));
        assert!(!start("eslint one-var: 2", "one", &[]));
    }

    #[test]
    fn start_skips_decoration() {
        let deco = ['*', '/'];
        assert!(start(
            "/// TODO decorated single-line comment with decoration array",
            "todo",
            &deco
        ));
        assert!(start(
            "/*/*/ TODO decorated single-line comment with multiple decoration characters (start)",
            "todo",
            &deco
        ));
        assert!(!start("/// TODO", "todo", &[]));
        assert!(!start("!TODO", "todo", &['*']));
        assert!(start("!XXX comment starting with no spaces (start)", "!xxx", &[]));
    }

    #[test]
    fn start_backtracks_into_decoration() {
        assert!(start(
            "**TODO term starts with a decoration character",
            "*todo",
            &['*']
        ));
        assert!(start("* * *TODO", "*todo", &['*']));
        assert!(start("***", "**", &['*']));
        assert!(!start("**TODO", "*todo", &[]));
    }

    #[test]
    fn start_checks_the_trailing_edge() {
        assert!(!start("TODOS are fine", "todo", &[]));
        assert!(start("TODO", "todo", &[]));
        assert!(start("todo: x", "todo", &[]));
    }

    #[test]
    fn anywhere_finds_the_first_valid_occurrence() {
        assert_eq!(find_anywhere("todos and todo", "todo"), Some(10));
        assert_eq!(find_anywhere("TODO at zero", "todo"), Some(0));
        assert_eq!(find_anywhere("tail TODO", "todo"), Some(5));
        assert_eq!(
            find_anywhere(
                "https://github.com/eslint/eslint/pull/13522#discussion_r470293411 TODO",
                "todo"
            ),
            Some(66)
        );
    }

    #[test]
    fn empty_term_never_matches() {
        assert!(!anywhere("anything", ""));
        assert!(!start("anything", "", &['*']));
        assert!(!start("", "", &[]));
    }

    #[test]
    fn width_changing_case_variants_do_not_panic() {
        let text = "\u{212A}ey point";
        assert!(anywhere(text, "key"));
        assert!(start(text, "KEY", &[]));
        assert!(!anywhere("\u{212A}", "kk"));
        assert!(!anywhere("ke\u{212A}", "kek!"));
    }

    #[test]
    fn non_ascii_letters_are_word_chars() {
        assert!(!anywhere("tödo todoé", "todo"));
        assert!(anywhere("tödo todo é", "todo"));
    }
}
