//! Pulling comments out of source files.
//!
//! This is the host side of a scan: the scanner itself only ever sees
//! [`RawComment`](crate::comment::RawComment)s, and this module produces them
//! for the languages listed in [`langs`].
use nom::{bytes::complete as bytes, character::complete as character, combinator, IResult, Parser};

pub mod langs;
pub mod source;

/// Eat a whole line and optionally its ending but don't return that ending.
///
/// ```rust
/// use warning_comments_lib::parser::take_to_eol;
///
/// assert_eq!(take_to_eol(" TODO: one\r\nnext"), Ok(("next", " TODO: one")));
/// assert_eq!(take_to_eol("last"), Ok(("", "last")));
/// ```
pub fn take_to_eol(i: &str) -> IResult<&str, &str> {
    let (i, ln) = bytes::take_till(|c| c == '\r' || c == '\n')(i)?;
    let (i, _) = combinator::opt(character::line_ending).parse(i)?;
    Ok((i, ln))
}
