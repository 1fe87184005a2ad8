//! File entries shown in the browser table
//!
//! These structs represent one filesystem path with its stat-derived
//! attributes, as consumed by the table-rendering layer.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Extension (lowercase, without the dot) of recognized data labels
pub const DATA_FILE_EXTENSION: &str = "xml";

/// Placeholder rendered for attributes of an entry that failed to stat
pub const NOT_AVAILABLE: &str = "N/A";

/// Classification of a listed path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    SymbolicLink,
    RecognizedDataFile,
}

/// Display tag attached to an entry by the table layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryIcon {
    Folder,
    Data,
    File,
}

impl EntryIcon {
    /// Pick the icon for an entry kind
    pub fn for_kind(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => EntryIcon::Folder,
            EntryKind::RecognizedDataFile => EntryIcon::Data,
            EntryKind::File | EntryKind::SymbolicLink => EntryIcon::File,
        }
    }

    /// Short name used in textual tables
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryIcon::Folder => "dir",
            EntryIcon::Data => "data",
            EntryIcon::File => "file",
        }
    }
}

/// Classify a path.
///
/// Directory-ness wins over link-ness, and the extension is only
/// consulted for paths that are neither.
pub fn classify(path: &Path) -> EntryKind {
    if path.is_dir() {
        EntryKind::Directory
    } else if path.is_symlink() {
        EntryKind::SymbolicLink
    } else if has_data_extension(path) {
        EntryKind::RecognizedDataFile
    } else {
        EntryKind::File
    }
}

fn has_data_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DATA_FILE_EXTENSION))
        .unwrap_or(false)
}

/// Last path segment, keeping `..` (which `Path::file_name` drops)
fn last_segment(path: &Path) -> String {
    path.components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Represents a single row of a directory listing
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// Last path segment (e.g., "image_0001.xml" or "..")
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes, 0 when the stat failed
    pub size_bytes: u64,
    /// Platform permission bits, 0 when the stat failed
    pub mode: u32,
    /// Last modification as a Unix timestamp, 0 when the stat failed
    pub modified_time: i64,
    /// False when the entry could not be stat'ed
    pub stat_ok: bool,
    /// Annotation set by the table layer; carries no meaning for the core
    pub icon: Option<EntryIcon>,
}

impl FileEntry {
    /// Build an entry from a path, stat'ing it.
    ///
    /// A failed stat never propagates: the entry is returned with zeroed
    /// size, mode and time and `stat_ok` cleared.
    pub fn from_path(path: &Path) -> Self {
        let kind = classify(path);
        let mut entry = FileEntry {
            path: path.to_path_buf(),
            name: last_segment(path),
            kind,
            size_bytes: 0,
            mode: 0,
            modified_time: 0,
            stat_ok: false,
            icon: None,
        };

        match std::fs::metadata(path) {
            Ok(meta) => {
                entry.size_bytes = meta.len();
                entry.mode = mode_bits(&meta);
                entry.modified_time = meta
                    .modified()
                    .map(|t| DateTime::<Utc>::from(t).timestamp())
                    .unwrap_or(0);
                entry.stat_ok = true;
            }
            Err(e) => {
                log::debug!("stat failed for {}: {}", path.display(), e);
            }
        }

        entry
    }

    /// Force the classification (used for the synthetic parent entry)
    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a display icon
    pub fn with_icon(mut self, icon: EntryIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn size_text(&self) -> String {
        if self.stat_ok {
            self.size_bytes.to_string()
        } else {
            NOT_AVAILABLE.to_string()
        }
    }

    /// Permission bits in octal, e.g. `0o100644`
    pub fn mode_text(&self) -> String {
        if self.stat_ok {
            format!("0o{:o}", self.mode)
        } else {
            NOT_AVAILABLE.to_string()
        }
    }

    /// Modification time in local time, ctime style
    pub fn modified_text(&self) -> String {
        if !self.stat_ok {
            return NOT_AVAILABLE.to_string();
        }
        match Local.timestamp_opt(self.modified_time, 0).single() {
            Some(dt) => dt.format("%a %b %e %H:%M:%S %Y").to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Render one column attribute by name, as configured in the settings
    pub fn column_text(&self, attribute: &str) -> String {
        match attribute {
            "icon" => self
                .icon
                .unwrap_or_else(|| EntryIcon::for_kind(self.kind))
                .as_str()
                .to_string(),
            "name" => self.name.clone(),
            "path" => self.path.display().to_string(),
            "size" => self.size_text(),
            "mode" => self.mode_text(),
            "modified" => self.modified_text(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Drag-and-drop payload for this entry
    pub fn drag_url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_bits(meta: &Metadata) -> u32 {
    match (meta.is_dir(), meta.permissions().readonly()) {
        (true, _) => 0o40755,
        (false, true) => 0o100444,
        (false, false) => 0o100644,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_classify_directory_named_like_data() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("data.xml");
        fs::create_dir(&sub).unwrap();

        assert_eq!(classify(&sub), EntryKind::Directory);
    }

    #[test]
    fn test_classify_extension_case_insensitive() {
        let dir = tempdir().unwrap();
        let upper = dir.path().join("LABEL.XML");
        let plain = dir.path().join("notes.txt");
        fs::write(&upper, b"<Product/>").unwrap();
        fs::write(&plain, b"hello").unwrap();

        assert_eq!(classify(&upper), EntryKind::RecognizedDataFile);
        assert_eq!(classify(&plain), EntryKind::File);
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_links() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.xml");
        fs::write(&target, b"<Product/>").unwrap();
        let link = dir.path().join("link.xml");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let dir_link = dir.path().join("dirlink");
        std::os::unix::fs::symlink(dir.path(), &dir_link).unwrap();

        // A link to a file is a link even with a data extension
        assert_eq!(classify(&link), EntryKind::SymbolicLink);
        // A link to a directory is a directory
        assert_eq!(classify(&dir_link), EntryKind::Directory);
    }

    #[test]
    fn test_from_path_stats_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.xml");
        fs::write(&path, b"12345").unwrap();

        let entry = FileEntry::from_path(&path);
        assert!(entry.stat_ok);
        assert_eq!(entry.name, "a.xml");
        assert_eq!(entry.size_bytes, 5);
        assert_eq!(entry.size_text(), "5");
        assert!(entry.mode_text().starts_with("0o"));
        assert!(entry.modified_time > 0);
        assert_ne!(entry.modified_text(), NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_path_is_zeroed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.xml");

        let entry = FileEntry::from_path(&path);
        assert!(!entry.stat_ok);
        assert_eq!(entry.size_bytes, 0);
        assert_eq!(entry.mode, 0);
        assert_eq!(entry.modified_time, 0);
        assert_eq!(entry.size_text(), NOT_AVAILABLE);
        assert_eq!(entry.mode_text(), NOT_AVAILABLE);
        assert_eq!(entry.modified_text(), NOT_AVAILABLE);
        assert_eq!(entry.kind, EntryKind::RecognizedDataFile);
    }

    #[test]
    fn test_parent_segment_name() {
        let dir = tempdir().unwrap();
        let entry = FileEntry::from_path(&dir.path().join(".."));
        assert_eq!(entry.name, "..");
        assert!(entry.is_dir());
    }

    #[test]
    fn test_column_text_and_drag_url() {
        let entry = FileEntry {
            path: PathBuf::from("/data/img.xml"),
            name: "img.xml".to_string(),
            kind: EntryKind::RecognizedDataFile,
            size_bytes: 10,
            mode: 0o100644,
            modified_time: 0,
            stat_ok: true,
            icon: None,
        };

        assert_eq!(entry.column_text("icon"), "data");
        assert_eq!(entry.column_text("mode"), "0o100644");
        assert_eq!(entry.column_text("bogus"), NOT_AVAILABLE);
        assert_eq!(entry.drag_url(), "file:///data/img.xml");

        let tagged = entry.with_icon(EntryIcon::File);
        assert_eq!(tagged.column_text("icon"), "file");
    }
}
