//! Directive comments that configure the scan itself.
//!
//! A comment like `/* eslint no-warning-comments: ["error", { "terms": ["todo"] }] */`
//! necessarily spells out the terms being searched for. Reporting it would
//! make the rule impossible to configure inline, so such comments are left
//! alone.
use crate::{
    comment::CommentKind,
    matcher::{self, Location},
};

/// The name a directive uses to refer to this scan.
pub const RULE_NAME: &str = "no-warning-comments";

/// Openers of block directives. Line directives only use `eslint-`.
const BLOCK_DIRECTIVE_PREFIXES: &[&str; 5] =
    &["eslint ", "eslint-", "global ", "globals ", "exported "];

/// Whether the comment is a tool directive rather than prose.
///
/// ```rust
/// use warning_comments_lib::{comment::CommentKind, directive::is_directive};
///
/// assert!(is_directive(CommentKind::Block, "eslint one-var: 2"));
/// assert!(is_directive(CommentKind::Line, " eslint-disable-line"));
/// assert!(!is_directive(CommentKind::Line, "eslint one-var: 2"));
/// ```
pub fn is_directive(kind: CommentKind, body: &str) -> bool {
    let body = body.trim();
    match kind {
        CommentKind::Line => body.starts_with("eslint-"),
        CommentKind::Block => BLOCK_DIRECTIVE_PREFIXES
            .iter()
            .any(|prefix| body.starts_with(prefix)),
    }
}

/// Whether the comment is a directive that names [`RULE_NAME`].
pub fn is_self_directive(kind: CommentKind, body: &str) -> bool {
    is_directive(kind, body) && matcher::matches(body, RULE_NAME, Location::Anywhere, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_directives() {
        for body in [
            "eslint no-warning-comments: 2",
            "eslint-disable no-warning-comments",
            "global foo",
            "globals foo, bar",
            "exported main",
            "\n  eslint semi: 2\n",
        ] {
            assert!(is_directive(CommentKind::Block, body), "{body}");
        }
        for body in ["eslint", "eslintrc", "any block comment", "global"] {
            assert!(!is_directive(CommentKind::Block, body), "{body}");
        }
    }

    #[test]
    fn line_directives() {
        assert!(is_directive(
            CommentKind::Line,
            "eslint-disable-next-line no-warning-comments"
        ));
        assert!(!is_directive(CommentKind::Line, "global foo"));
    }

    #[test]
    fn self_directives_name_the_rule() {
        let body = r#"eslint no-warning-comments: [2, { "terms": ["todo", "fixme", "any other term"], "location": "anywhere" }]"#;
        assert!(is_self_directive(CommentKind::Block, body));
        assert!(!is_self_directive(CommentKind::Block, "eslint one-var: 2"));
        assert!(!is_self_directive(
            CommentKind::Block,
            "eslint plugin/no-warning-commentsx: 2"
        ));
        assert!(!is_self_directive(
            CommentKind::Block,
            "TODO mention no-warning-comments in prose"
        ));
    }
}
