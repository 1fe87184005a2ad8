//! Path expressions and resource locators
//!
//! A path expression is what the user types: a path, optionally with a
//! wildcard, optionally followed by a `[N]` structure index. Expanding it
//! yields one locator per matched file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{BrowseError, LoadError};
use crate::state::listing::glob_paths;

const FILE_SCHEME: &str = "file://";

/// One loadable resource: a concrete file and an optional structure index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator {
    pub filesystem_path: PathBuf,
    /// Which structure of the file to load; None means the first array
    pub sub_index: Option<usize>,
}

impl ResourceLocator {
    pub fn new(filesystem_path: impl Into<PathBuf>, sub_index: Option<usize>) -> Self {
        Self {
            filesystem_path: filesystem_path.into(),
            sub_index,
        }
    }

    /// Parse a single resource string such as `file:///data/a.xml[1]`.
    ///
    /// No wildcard expansion happens here. Only local files are accepted.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let path = match text.strip_prefix(FILE_SCHEME) {
            Some(rest) => rest,
            None if text.contains("://") => return Err(LoadError::NotLocal(text.to_string())),
            None => text,
        };
        let (path, sub_index) = split_sub_index(path);
        Ok(Self::new(path, sub_index))
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filesystem_path.display())?;
        if let Some(index) = self.sub_index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// Outcome of trying to load from a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadAttempt {
    /// The expression matched these resources
    Loaded(Vec<ResourceLocator>),
    /// The expression names a directory; browse it instead
    IsDirectory,
    /// Nothing matched
    NoMatch,
}

/// Split a trailing `[N]` off an expression.
///
/// Brackets that do not hold a plain index are left in place, so glob
/// character classes like `img[ab]` survive.
pub fn split_sub_index(expression: &str) -> (&str, Option<usize>) {
    let Some(body) = expression.strip_suffix(']') else {
        return (expression, None);
    };
    let Some(open) = body.rfind('[') else {
        return (expression, None);
    };
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return (expression, None);
    }
    match digits.parse::<usize>() {
        Ok(index) => (&body[..open], Some(index)),
        Err(_) => (expression, None),
    }
}

/// Classify a path expression and expand it.
///
/// A single trailing `*` is stripped first (so `dir/*` names `dir`).
/// Matches come back in glob enumeration order, each carrying the same
/// structure index.
pub fn resolve(expression: &str) -> Result<LoadAttempt, BrowseError> {
    let stripped = expression.strip_suffix('*').unwrap_or(expression);
    if stripped.is_empty() {
        return Ok(LoadAttempt::NoMatch);
    }

    if Path::new(stripped).is_dir() {
        return Ok(LoadAttempt::IsDirectory);
    }

    log::debug!("Opening files matched by {}", stripped);
    let (pattern, sub_index) = split_sub_index(stripped);
    let locators: Vec<ResourceLocator> = glob_paths(pattern)?
        .into_iter()
        .map(|path| ResourceLocator::new(path, sub_index))
        .collect();

    if locators.is_empty() {
        Ok(LoadAttempt::NoMatch)
    } else {
        Ok(LoadAttempt::Loaded(locators))
    }
}

/// Expand a path expression into locators.
///
/// Returns an empty list when the expression names a directory; use
/// `resolve` to tell that apart from no match.
pub fn expand(expression: &str) -> Result<Vec<ResourceLocator>, BrowseError> {
    match resolve(expression)? {
        LoadAttempt::Loaded(locators) => Ok(locators),
        LoadAttempt::IsDirectory | LoadAttempt::NoMatch => Ok(Vec::new()),
    }
}
