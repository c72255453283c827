//! # Scanning comments for warning terms.
use serde::Serialize;

use crate::{
    comment::RawComment,
    config::Config,
    directive,
    excerpt::{excerpt, MAX_EXCERPT_LEN},
    matcher::TermMatcher,
    normalize::normalize,
};

/// One warning term found in one comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic<L> {
    /// The location of the comment the term was found in.
    pub location: L,
    /// The term as it was configured, not as it was written in the comment.
    pub matched_term: String,
    /// A shortened form of the comment's text.
    pub excerpt: String,
}

impl<L> Diagnostic<L> {
    /// A human readable message for this diagnostic.
    ///
    /// ```rust
    /// use warning_comments_lib::scan::Diagnostic;
    ///
    /// let diagnostic = Diagnostic {
    ///     location: (),
    ///     matched_term: "fixme".to_string(),
    ///     excerpt: "fixme".to_string(),
    /// };
    /// assert_eq!(diagnostic.message(), "Unexpected 'fixme' comment: 'fixme'.");
    /// ```
    pub fn message(&self) -> String {
        format!(
            "Unexpected '{}' comment: '{}'.",
            self.matched_term, self.excerpt
        )
    }
}

/// Compile the configured terms, in configured order.
///
/// A validated [`Config`] has already compiled every term once, so a term
/// is only dropped here if the config skipped validation.
fn term_matchers(config: &Config) -> Vec<TermMatcher> {
    config
        .terms
        .iter()
        .filter_map(
            |term| match TermMatcher::new(term, config.location, &config.decoration) {
                Ok(matcher) => Some(matcher),
                Err(err) => {
                    log::warn!("term {term:?} can't be matched: {err}");
                    None
                }
            },
        )
        .collect()
}

fn check_with<L: Clone>(
    comment: &RawComment<L>,
    config: &Config,
    matchers: &[TermMatcher],
) -> Vec<Diagnostic<L>> {
    if config.skip_self_directives && directive::is_self_directive(comment.kind, &comment.body) {
        log::debug!("skipping self directive {:?}", comment.body);
        return vec![];
    }

    let text = normalize(&comment.body);
    if text.is_empty() {
        return vec![];
    }

    let shown = excerpt(&text, MAX_EXCERPT_LEN);
    matchers
        .iter()
        .filter(|matcher| matcher.is_match(&text))
        .map(|matcher| Diagnostic {
            location: comment.location.clone(),
            matched_term: matcher.term().to_string(),
            excerpt: shown.to_string(),
        })
        .collect()
}

/// Check one comment against every configured term, in configured order.
pub fn check_comment<L: Clone>(comment: &RawComment<L>, config: &Config) -> Vec<Diagnostic<L>> {
    check_with(comment, config, &term_matchers(config))
}

/// Scan comments for warning terms.
///
/// Diagnostics come out in comment order, and within one comment in the
/// order the terms are configured. A term is reported at most once per
/// comment.
///
/// ```rust
/// use warning_comments_lib::{comment::RawComment, config::Config, scan::scan};
///
/// let comments = vec![RawComment::line(" fixme", 1)];
/// let diagnostics = scan(&comments, &Config::default());
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].location, 1);
/// assert_eq!(diagnostics[0].matched_term, "fixme");
/// assert_eq!(diagnostics[0].excerpt, "fixme");
/// ```
pub fn scan<L: Clone>(comments: &[RawComment<L>], config: &Config) -> Vec<Diagnostic<L>> {
    let matchers = term_matchers(config);
    comments
        .iter()
        .flat_map(|comment| check_with(comment, config, &matchers))
        .collect()
}
