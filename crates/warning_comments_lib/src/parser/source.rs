//! # Lexing comments out of source code.
use super::{langs::CommentStyle, take_to_eol};

use crate::comment::{CommentKind, Position, RawComment};

use nom::{
    branch, bytes::complete as bytes, character::complete as character, combinator, sequence,
    IResult, Parser,
};

#[cfg(test)]
mod test_my_assumptions {
    use super::*;

    #[test]
    fn take_until_needs_the_suffix() {
        let res: IResult<&str, &str> = bytes::take_until("*/")(" never closed");
        assert!(res.is_err());
    }

    #[test]
    fn rest_takes_everything() {
        let res: IResult<&str, &str> = combinator::rest(" never closed");
        assert_eq!(res, Ok(("", " never closed")));
    }
}

/// The comment syntax of one language.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentSyntax {
    /// A list of single comment openers.
    /// Eg. `vec!["--".into()]` for Haskell
    pub singles: Vec<String>,
    /// A list of multiline comment openers and closers.
    /// Eg. `vec![("{-".into(), "-}".into())]` for Haskell
    pub multis: Vec<(String, String)>,
    /// A list of comment borders.
    /// Eg. `vec!['|']` for Haskell
    pub borders: Vec<char>,
    /// Characters that open and close string literals.
    pub quotes: Vec<char>,
    /// Characters that delimit single character literals.
    pub char_literals: Vec<char>,
    /// Characters that delimit regex literals.
    pub regex_literals: Vec<char>,
}

impl CommentSyntax {
    pub fn add_comment_style(&mut self, cs: CommentStyle) {
        match cs {
            CommentStyle::Single(s) => self.singles.push(s),
            CommentStyle::Multi(p, s) => self.multis.push((p, s)),
            CommentStyle::Border(b) => self.borders.push(b),
            CommentStyle::Quote(q) => self.quotes.push(q),
            CommentStyle::CharLiteral(q) => self.char_literals.push(q),
            CommentStyle::RegexLiteral(d) => self.regex_literals.push(d),
        }
    }

    pub fn from_comment_styles(styles: Vec<CommentStyle>) -> Self {
        let mut syntax = CommentSyntax::default();
        styles
            .into_iter()
            .for_each(|style| syntax.add_comment_style(style));
        syntax
    }

    /// All comment openers, longest first, so that eg. Lua's `--[[` wins
    /// over `--`.
    fn openers(&self) -> Vec<Opener<'_>> {
        let mut openers = self
            .singles
            .iter()
            .map(|prefix| Opener::Single(prefix))
            .chain(
                self.multis
                    .iter()
                    .map(|(prefix, suffix)| Opener::Multi(prefix, suffix)),
            )
            .collect::<Vec<_>>();
        openers.sort_by_key(|opener| std::cmp::Reverse(opener.prefix().len()));
        openers
    }
}

#[derive(Clone, Copy, Debug)]
enum Opener<'a> {
    Single(&'a str),
    Multi(&'a str, &'a str),
}

impl<'a> Opener<'a> {
    fn prefix(&self) -> &'a str {
        match *self {
            Opener::Single(prefix) | Opener::Multi(prefix, _) => prefix,
        }
    }

    fn parse<'i>(&self, i: &'i str) -> IResult<&'i str, (CommentKind, &'i str)> {
        match *self {
            Opener::Single(prefix) => {
                let (i, body) = single_line_comment(prefix)(i)?;
                Ok((i, (CommentKind::Line, body)))
            }
            Opener::Multi(prefix, suffix) => {
                let (i, body) = multi_line_comment(prefix, suffix)(i)?;
                Ok((i, (CommentKind::Block, body)))
            }
        }
    }
}

/// Eat a single line comment, returning its body without the prefix or the
/// line ending.
///
/// ```rust
/// use warning_comments_lib::parser::source::*;
///
/// assert_eq!(
///     single_line_comment("//")("// TODO: Here is a comment.\nfn main() {}"),
///     Ok(("fn main() {}", " TODO: Here is a comment."))
/// );
/// ```
pub fn single_line_comment<'p>(prefix: &'p str) -> impl Fn(&str) -> IResult<&str, &str> + 'p {
    move |i| {
        let (i, _) = bytes::tag(prefix)(i)?;
        take_to_eol(i)
    }
}

/// Eat a delimited comment, returning its body without the delimiters. A
/// comment that is never closed runs to the end of the input.
///
/// ```rust
/// use warning_comments_lib::parser::source::*;
///
/// let haskell = multi_line_comment("{-", "-}");
/// assert_eq!(
///     haskell("{- | TODO: List the steps to draw an owl. -}\nmain = pure ()"),
///     Ok(("\nmain = pure ()", " | TODO: List the steps to draw an owl. "))
/// );
/// assert_eq!(haskell("{- open"), Ok(("", " open")));
/// ```
pub fn multi_line_comment<'p>(
    prefix: &'p str,
    suffix: &'p str,
) -> impl Fn(&str) -> IResult<&str, &str> + 'p {
    move |i| {
        let (i, _) = bytes::tag(prefix)(i)?;
        branch::alt((
            sequence::terminated(bytes::take_until(suffix), bytes::tag(suffix)),
            combinator::rest,
        ))
        .parse(i)
    }
}

/// Eat a string literal, honoring backslash escapes, and return its
/// contents. Single quoted literals also end at a line break, since `'` is
/// just as often an apostrophe.
///
/// ```rust
/// use warning_comments_lib::parser::source::*;
///
/// assert_eq!(quoted('"')(r#""a \"// b\"" c"#), Ok((" c", r#"a \"// b\""#)));
/// assert_eq!(quoted('\'')("'don\nt"), Ok(("\nt", "don")));
/// ```
pub fn quoted(quote: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i| {
        let (i, _) = character::char(quote)(i)?;
        let mut escaped = false;
        for (n, c) in i.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return Ok((&i[n + c.len_utf8()..], &i[..n]));
            } else if quote == '\'' && (c == '\n' || c == '\r') {
                return Ok((&i[n..], &i[..n]));
            }
        }
        Ok(("", i))
    }
}

fn no_literal(i: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(i, nom::error::ErrorKind::Char))
}

/// Eat a single character literal and return its contents. Anything that
/// doesn't close right after one char or escape, like a lifetime, fails.
///
/// ```rust
/// use warning_comments_lib::parser::source::*;
///
/// assert_eq!(char_literal('\'')(r#"'"'; s"#), Ok(("; s", "\"")));
/// assert_eq!(char_literal('\'')(r"'\u{7FFF}')"), Ok((")", r"\u{7FFF}")));
/// assert!(char_literal('\'')("'a str").is_err());
/// ```
pub fn char_literal(quote: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i| {
        let (i, _) = character::char(quote)(i)?;
        let (j, c) = character::anychar(i)?;
        let (j, _) = match c {
            '\\' => {
                let (j, _) = character::anychar(j)?;
                bytes::take_till(|c| c == quote || c == '\n' || c == '\r')(j)?
            }
            c if c == quote || c == '\n' || c == '\r' => return Err(no_literal(i)),
            _ => (j, ""),
        };
        let (rest, _) = character::char(quote)(j)?;
        Ok((rest, &i[..i.len() - j.len()]))
    }
}

/// Eat a regex literal and its flags, returning the pattern. The literal
/// must close on the line it opens.
///
/// ```rust
/// use warning_comments_lib::parser::source::*;
///
/// assert_eq!(regex_literal('/')(r#"/"[/]\//g, x"#), Ok((", x", r#""[/]\/"#)));
/// assert!(regex_literal('/')("/ 2\n/ 3").is_err());
/// ```
pub fn regex_literal(delimiter: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i| {
        let (body, _) = character::char(delimiter)(i)?;
        let mut escaped = false;
        let mut in_class = false;
        for (n, c) in body.char_indices() {
            if c == '\n' || c == '\r' {
                break;
            } else if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '[' {
                in_class = true;
            } else if c == ']' {
                in_class = false;
            } else if c == delimiter && !in_class && n > 0 {
                let (rest, _) = character::alpha0(&body[n + c.len_utf8()..])?;
                return Ok((rest, &body[..n]));
            }
        }
        Err(no_literal(i))
    }
}

/// Whether a regex literal can start after the last significant char, as
/// opposed to a division.
fn regex_can_follow(last: Option<char>) -> bool {
    last.is_none_or(|c| "(,=:[!&|?{};+-*%<>~^".contains(c))
}

/// Move a position forward over some consumed text.
fn advance(pos: &mut Position, consumed: &str) {
    for c in consumed.chars() {
        if c == '\n' {
            pos.line += 1;
            pos.column = 1;
        } else {
            pos.column += 1;
        }
    }
}

type Literal = Box<dyn Fn(&str) -> IResult<&str, &str>>;

/// Find every comment in `src`, in source order.
///
/// Each comment's location is the position of its opener.
///
/// ```rust
/// use warning_comments_lib::{
///     comment::{CommentKind, Position},
///     parser::{langs::c_style, source::*},
/// };
///
/// let syntax = CommentSyntax::from_comment_styles(c_style());
/// let found = comments("let a = \"// no\"; // fixme\n/* b */", &syntax);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].kind, CommentKind::Line);
/// assert_eq!(found[0].body, " fixme");
/// assert_eq!(found[0].location, Position::new(1, 18));
/// assert_eq!(found[1].body, " b ");
/// assert_eq!(found[1].location, Position::new(2, 1));
/// ```
pub fn comments(src: &str, syntax: &CommentSyntax) -> Vec<RawComment<Position>> {
    let openers = syntax.openers();
    let mut literals: Vec<Literal> = vec![];
    for q in syntax.char_literals.iter() {
        literals.push(Box::new(char_literal(*q)));
    }
    for q in syntax.quotes.iter() {
        literals.push(Box::new(quoted(*q)));
    }
    let regexes = syntax
        .regex_literals
        .iter()
        .map(|d| regex_literal(*d))
        .collect::<Vec<_>>();

    let mut found = vec![];
    let mut pos = Position::new(1, 1);
    // The last char outside of comments that wasn't whitespace.
    let mut last = None;
    let mut i = src;
    'lexing: while let Some(c) = i.chars().next() {
        for opener in openers.iter() {
            if let Ok((j, (kind, body))) = opener.parse(i) {
                found.push(RawComment {
                    kind,
                    body: body.to_string(),
                    location: pos,
                });
                advance(&mut pos, &i[..i.len() - j.len()]);
                i = j;
                continue 'lexing;
            }
        }

        let literal = literals.iter().find_map(|literal| literal(i).ok()).or_else(|| {
            regex_can_follow(last)
                .then(|| regexes.iter().find_map(|regex| regex(i).ok()))
                .flatten()
        });
        if let Some((j, _)) = literal {
            let consumed = &i[..i.len() - j.len()];
            advance(&mut pos, consumed);
            last = consumed.chars().next_back();
            i = j;
            continue 'lexing;
        }

        let (consumed, j) = i.split_at(c.len_utf8());
        advance(&mut pos, consumed);
        if !c.is_whitespace() {
            last = Some(c);
        }
        i = j;
    }

    log::trace!("lexed {} comments", found.len());
    found
}
