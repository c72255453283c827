//! Find warning terms like `TODO`, `FIXME` and `XXX` left in source comments.
//!
//! The heart of the crate is [`scan::scan`], which takes comments that were
//! already lexed (see [`comment::RawComment`]) and a [`config::Config`], and
//! returns one [`scan::Diagnostic`] per matching (comment, term) pair. The
//! [`parser`] and [`finder`] modules feed it comments from files on disk.
use snafu::prelude::*;
use std::{borrow::Cow, sync::LazyLock};

pub mod comment;
pub mod config;
pub mod directive;
pub mod excerpt;
pub mod finder;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod scan;
pub mod utils;

static CHAN: LazyLock<(
    async_channel::Sender<Message>,
    async_channel::Receiver<Message>,
)> = LazyLock::new(async_channel::unbounded);

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("Could not read {path:?}: {source}"))]
    ReadFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Command failed: {cmd} {status}"))]
    Command {
        cmd: Cow<'static, str>,
        status: std::process::ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[snafu(display("Rg output was not UTF-8: {source}"))]
    RgUtf8 { source: std::str::Utf8Error },

    #[snafu(display("Rg parse error: {source}"))]
    ParseRg {
        source: nom::Err<nom::error::Error<String>>,
    },

    #[snafu(display("Invalid config {path}: {source}"))]
    ConfigJson {
        path: String,
        source: serde_json::Error,
    },

    #[snafu(display("Decoration {entry:?} must be a single non-whitespace character"))]
    InvalidDecoration { entry: String },

    #[snafu(display("Decoration {decoration:?} is listed more than once"))]
    DuplicateDecoration { decoration: char },

    #[snafu(display("Terms must not be empty"))]
    EmptyTerm,

    #[snafu(display("Term {term:?} can't be matched: {source}"))]
    TermPattern { term: String, source: regex::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An external progress message sent while scanning files.
pub enum Message {
    Error(Error),

    FindingFiles,
    FoundFiles {
        count: usize,
    },

    UnsupportedFile {
        path: std::path::PathBuf,
    },
    ScannedFile {
        path: std::path::PathBuf,
        comments: usize,
        diagnostics: usize,
    },
    FoundWarnings {
        files: usize,
        total: usize,
    },

    Goodbye,
}

impl Message {
    /// Send a status message to the outside world.
    pub fn send(self) {
        // Only fails if the channel is closed, and we hold the receiver.
        let _ = CHAN.0.try_send(self);
    }

    /// Get a clone of the status message receiver.
    pub fn receiver() -> async_channel::Receiver<Message> {
        CHAN.1.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_arrive_in_order() {
        let recv = Message::receiver();
        // Other tests may be sending too, so only look for ours.
        Message::FoundFiles { count: 7357 }.send();
        Message::FoundWarnings {
            files: 7357,
            total: 1,
        }
        .send();
        let mut ours = vec![];
        while let Ok(msg) = recv.try_recv() {
            match msg {
                Message::FoundFiles { count: 7357 } => ours.push("files"),
                Message::FoundWarnings { files: 7357, .. } => ours.push("warnings"),
                _ => {}
            }
        }
        assert_eq!(ours, vec!["files", "warnings"]);
    }

    #[test]
    fn errors_display() {
        let err = Error::InvalidDecoration {
            entry: "**".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Decoration \"**\" must be a single non-whitespace character"
        );
    }
}
