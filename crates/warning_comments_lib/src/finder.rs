//! Finding source files and scanning their comments.
pub mod parse;

use std::path::{Path, PathBuf};

use futures::{stream, StreamExt};
use serde::Serialize;
use snafu::ResultExt;

use crate::{
    comment::{Position, RawComment},
    config::Config,
    parser::{langs, source},
    scan::{self, Diagnostic},
    utils, Error, Message, ParseRgSnafu, ReadFileSnafu, RgUtf8Snafu,
};

/// How many files are read at once.
const CONCURRENT_READS: usize = 16;

pub struct FileSearcher;

impl FileSearcher {
    /// Find the files under the given paths, honoring ignore files and the
    /// exclude globs.
    pub async fn find(paths: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, Error> {
        Message::FindingFiles.send();
        let output = utils::get_rg_files_output(paths, excludes).await?;
        let mut files = parse_files_output(&output)?;
        files.sort();
        files.dedup();
        Message::FoundFiles { count: files.len() }.send();
        Ok(files)
    }
}

/// Parse the output of `rg --files` into a list of paths.
pub(crate) fn parse_files_output(output: &[u8]) -> Result<Vec<PathBuf>, Error> {
    let rg_output = std::str::from_utf8(output).context(RgUtf8Snafu)?;
    let (_, files) = parse::parse_file_list(rg_output)
        .map_err(|e| e.to_owned())
        .context(ParseRgSnafu)?;
    Ok(files.into_iter().map(PathBuf::from).collect())
}

/// The warnings found in one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: String,
    pub diagnostics: Vec<Diagnostic<Position>>,
}

/// Lex `src` as the given language and scan its comments.
///
/// With `language_borders` the language's conventional border characters
/// are added to the configured decoration.
///
/// ```rust
/// use warning_comments_lib::{
///     config::Config,
///     finder::scan_source,
///     parser::langs::language_for_extension,
/// };
///
/// let rust = language_for_extension("rs").unwrap();
/// let found = scan_source("fn main() {} // TODO: say hi\n", &rust, &Config::default(), false);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].location.column, 14);
/// assert_eq!(found[0].excerpt, "TODO: say hi");
/// ```
pub fn scan_source(
    src: &str,
    language: &langs::SupportedLanguage,
    config: &Config,
    language_borders: bool,
) -> Vec<Diagnostic<Position>> {
    let syntax = language.as_comment_syntax();
    let comments = source::comments(src, &syntax);
    scan_comments(&comments, syntax, config, language_borders)
}

fn scan_comments(
    comments: &[RawComment<Position>],
    syntax: source::CommentSyntax,
    config: &Config,
    language_borders: bool,
) -> Vec<Diagnostic<Position>> {
    if language_borders {
        let config = config.clone().with_extra_decoration(syntax.borders);
        scan::scan(comments, &config)
    } else {
        scan::scan(comments, config)
    }
}

/// Read and scan one file. Returns `None` for files in languages we don't
/// know, or that aren't UTF-8.
pub async fn scan_file(
    path: &Path,
    config: &Config,
    language_borders: bool,
) -> Result<Option<FileReport>, Error> {
    let language = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(langs::language_for_extension);
    let Some(language) = language else {
        Message::UnsupportedFile {
            path: path.to_path_buf(),
        }
        .send();
        return Ok(None);
    };

    log::trace!("Reading {path:?} as {}", language.name);
    let bytes = tokio::fs::read(path).await.context(ReadFileSnafu { path })?;
    let Ok(src) = String::from_utf8(bytes) else {
        log::warn!("skipping {path:?}, it is not UTF-8");
        return Ok(None);
    };

    let syntax = language.as_comment_syntax();
    let comments = source::comments(&src, &syntax);
    let diagnostics = scan_comments(&comments, syntax, config, language_borders);
    Message::ScannedFile {
        path: path.to_path_buf(),
        comments: comments.len(),
        diagnostics: diagnostics.len(),
    }
    .send();

    Ok(Some(FileReport {
        path: path.to_path_buf(),
        language: language.name,
        diagnostics,
    }))
}

/// Scan every file in `files`, keeping their order. Files without any
/// warnings are left out of the result.
///
/// A file that can't be read is reported with [`Message::Error`] and
/// skipped, so one bad file doesn't lose the rest of the scan.
pub async fn scan_files(
    files: &[PathBuf],
    config: &Config,
    language_borders: bool,
) -> Vec<FileReport> {
    let scans: Vec<_> = files
        .iter()
        .map(|path| scan_file(path, config, language_borders))
        .collect();
    let results = stream::iter(scans)
        .buffered(CONCURRENT_READS)
        .collect::<Vec<_>>()
        .await;

    let mut reports = vec![];
    for result in results.into_iter() {
        match result {
            Ok(Some(report)) if !report.diagnostics.is_empty() => reports.push(report),
            Ok(_) => {}
            Err(err) => Message::Error(err).send(),
        }
    }

    Message::FoundWarnings {
        files: reports.len(),
        total: reports.iter().map(|r| r.diagnostics.len()).sum(),
    }
    .send();
    reports
}

/// Find the files under `paths` and scan them all.
pub async fn scan_paths(
    paths: &[String],
    excludes: &[String],
    config: &Config,
    language_borders: bool,
) -> Result<Vec<FileReport>, Error> {
    let files = FileSearcher::find(paths, excludes).await?;
    Ok(scan_files(&files, config, language_borders).await)
}
