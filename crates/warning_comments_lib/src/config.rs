//! Scan configuration.
//!
//! A [`Config`] is an immutable value that is built once (from defaults, a
//! JSON file, or the command line) and then passed by reference to every
//! scan. Validation happens here, while building it, so the scanner itself
//! can trust every value it is given.
use std::path::Path;

use serde::Deserialize;
use snafu::{ensure, OptionExt, ResultExt};

use crate::{
    matcher::{Location, TermMatcher},
    ConfigJsonSnafu, DuplicateDecorationSnafu, EmptyTermSnafu, InvalidDecorationSnafu,
    ReadFileSnafu, Result, TermPatternSnafu,
};

/// Terms reported when none are configured.
pub const DEFAULT_TERMS: &[&str; 3] = &["todo", "fixme", "xxx"];

/// Everything a scan needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Warning terms, in the order their diagnostics are reported.
    pub terms: Vec<String>,
    /// Where in a comment a term must appear.
    pub location: Location,
    /// Characters that may pad a comment before a term, eg. `*` for boxed
    /// comments. Only consulted for [`Location::Start`].
    pub decoration: Vec<char>,
    /// Don't report directive comments that configure this scan, like
    /// `/* eslint no-warning-comments: [2, { "terms": ["todo"] }] */`.
    pub skip_self_directives: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            terms: DEFAULT_TERMS.iter().map(|t| t.to_string()).collect(),
            location: Location::default(),
            decoration: vec![],
            skip_self_directives: true,
        }
    }
}

/// The on-disk shape of a [`Config`], before validation.
///
/// ```rust
/// use warning_comments_lib::{config::ConfigFile, matcher::Location};
///
/// let file: ConfigFile =
///     serde_json::from_str(r#"{ "location": "anywhere", "decoration": ["*"] }"#).unwrap();
/// let config = file.validate().unwrap();
/// assert_eq!(config.terms, vec!["todo", "fixme", "xxx"]);
/// assert_eq!(config.location, Location::Anywhere);
/// assert_eq!(config.decoration, vec!['*']);
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub terms: Vec<String>,
    pub location: Location,
    pub decoration: Vec<String>,
    pub skip_self_directives: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = Config::default();
        ConfigFile {
            terms: config.terms,
            location: config.location,
            decoration: vec![],
            skip_self_directives: config.skip_self_directives,
        }
    }
}

/// Parse one decoration entry, which must be a single non-whitespace char.
pub fn decoration_char(entry: &str) -> Result<char> {
    let mut chars = entry.chars();
    let c = chars.next().context(InvalidDecorationSnafu { entry })?;
    ensure!(
        chars.next().is_none() && !c.is_whitespace(),
        InvalidDecorationSnafu { entry }
    );
    Ok(c)
}

impl ConfigFile {
    /// Check every field and produce the [`Config`] a scan runs with.
    pub fn validate(self) -> Result<Config> {
        for term in self.terms.iter() {
            ensure!(!term.is_empty(), EmptyTermSnafu);
        }

        let mut decoration = vec![];
        for entry in self.decoration.iter() {
            let c = decoration_char(entry)?;
            ensure!(
                !decoration.contains(&c),
                DuplicateDecorationSnafu { decoration: c }
            );
            decoration.push(c);
        }

        for term in self.terms.iter() {
            TermMatcher::new(term, self.location, &decoration)
                .context(TermPatternSnafu { term })?;
        }

        Ok(Config {
            terms: self.terms,
            location: self.location,
            decoration,
            skip_self_directives: self.skip_self_directives,
        })
    }
}

impl Config {
    /// Parse and validate a JSON configuration.
    ///
    /// ```rust
    /// use warning_comments_lib::config::Config;
    ///
    /// let config = Config::from_json_str(r#"{ "terms": ["FIXME", "hack"] }"#).unwrap();
    /// assert_eq!(config.terms, vec!["FIXME", "hack"]);
    ///
    /// assert!(Config::from_json_str(r#"{ "decoration": ["**"] }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Config> {
        let file: ConfigFile = serde_json::from_str(json).context(ConfigJsonSnafu {
            path: "<inline>".to_string(),
        })?;
        file.validate()
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let json = std::fs::read_to_string(path).context(ReadFileSnafu {
            path: path.to_path_buf(),
        })?;
        let file: ConfigFile = serde_json::from_str(&json).context(ConfigJsonSnafu {
            path: path.display().to_string(),
        })?;
        file.validate()
    }

    /// Add decoration characters that aren't already present.
    pub fn with_extra_decoration(mut self, extra: impl IntoIterator<Item = char>) -> Self {
        for c in extra {
            if !self.decoration.contains(&c) {
                self.decoration.push(c);
            }
        }
        self
    }
}
