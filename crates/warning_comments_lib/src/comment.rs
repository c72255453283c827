//! Comments as they are handed to the scanner.
use serde::Serialize;

/// Whether a comment was written with a line opener (eg. `//`) or as a
/// delimited block (eg. `/* ... */`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    Line,
    Block,
}

/// A 1-based line and column in a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One comment token, without its delimiters.
///
/// The location is opaque to the scanner. It is only ever cloned into the
/// diagnostics produced for this comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawComment<L> {
    pub kind: CommentKind,
    pub body: String,
    pub location: L,
}

impl<L> RawComment<L> {
    pub fn line(body: impl Into<String>, location: L) -> Self {
        RawComment {
            kind: CommentKind::Line,
            body: body.into(),
            location,
        }
    }

    pub fn block(body: impl Into<String>, location: L) -> Self {
        RawComment {
            kind: CommentKind::Block,
            body: body.into(),
            location,
        }
    }
}
