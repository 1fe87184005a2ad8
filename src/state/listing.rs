//! Directory listings
//!
//! A listing is built fresh from a `<dir>/<glob>` pattern every time the
//! browser navigates or refreshes. Nothing is cached between listings.

use std::path::{Component, Path, PathBuf};
use tokio::task;

use super::entry::{EntryKind, FileEntry};
use crate::error::BrowseError;

/// Wildcard used when a pattern names a directory
pub const MATCH_ALL: &str = "*";

/// A directory listing ready for the table layer
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryListing {
    /// The `<dir>/<glob>` pattern being shown
    pub pattern: String,
    /// Absolute directory the pattern was expanded in
    pub directory: PathBuf,
    /// Parent entry first, then matches sorted by name (case-insensitive)
    pub entries: Vec<FileEntry>,
}

impl DirectoryListing {
    /// The synthetic `<dir>/..` entry
    pub fn parent(&self) -> &FileEntry {
        &self.entries[0]
    }

    /// Entries matched by the glob, without the parent entry
    pub fn matches(&self) -> &[FileEntry] {
        &self.entries[1..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a pattern into its directory and glob parts.
///
/// A pattern naming an existing directory (or ending in a separator)
/// has no glob part.
fn split_pattern(pattern: &str) -> (PathBuf, Option<String>) {
    let path = Path::new(pattern);
    if path.is_dir() || pattern.ends_with(std::path::MAIN_SEPARATOR) {
        return (path.to_path_buf(), None);
    }

    let dirname = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let globname = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty());
    (dirname, globname)
}

/// Make a path absolute and fold `.` and `..` lexically
pub fn absolute_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Expand a glob, skipping matches that cannot be read.
///
/// Hidden files only match a pattern that spells out the leading dot.
pub(crate) fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>, BrowseError> {
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let paths = glob::glob_with(pattern, options)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("skipping unreadable match: {}", e);
                None
            }
        })
        .collect();
    Ok(paths)
}

/// List the entries matched by `pattern`.
///
/// `pattern` is either a directory (listed with `*`) or `<dir>/<glob>`.
/// Fails with `InvalidDirectory` when the directory part does not exist.
/// Entries that fail to stat are kept with zeroed attributes.
pub fn list_directory(pattern: &str) -> Result<DirectoryListing, BrowseError> {
    log::debug!("path: {}", pattern);
    let (dirname, globname) = split_pattern(pattern);
    let directory = absolute_path(&dirname);

    if !directory.is_dir() {
        return Err(BrowseError::InvalidDirectory(directory));
    }

    let globname = globname.unwrap_or_else(|| MATCH_ALL.to_string());
    let dir_text = directory.to_string_lossy();
    let escaped = glob::Pattern::escape(&dir_text);
    let full_pattern = Path::new(&escaped).join(&globname);
    let full_pattern = full_pattern.to_string_lossy().into_owned();

    log::debug!("globbing path: {}", full_pattern);
    let mut entries: Vec<FileEntry> = glob_paths(&full_pattern)?
        .iter()
        .map(|path| FileEntry::from_path(path))
        .collect();

    // Stable: ties keep enumeration order
    entries.sort_by_key(|entry| entry.name.to_lowercase());

    let parent = FileEntry::from_path(&directory.join("..")).with_kind(EntryKind::Directory);
    entries.insert(0, parent);

    Ok(DirectoryListing {
        pattern: directory.join(&globname).to_string_lossy().into_owned(),
        directory,
        entries,
    })
}

/// Run `list_directory` on the blocking pool
pub async fn list_directory_async(pattern: String) -> Result<DirectoryListing, BrowseError> {
    task::spawn_blocking(move || list_directory(&pattern))
        .await
        .map_err(|e| BrowseError::Task(e.to_string()))?
}
