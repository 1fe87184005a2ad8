//! Headless file browser
//!
//! `Browser` keeps the current pattern and listing, and turns text-box
//! submissions, double-clicks and load requests into listings or loads.
//! The label reader, the data sink and the settings are all passed in.

use std::path::{Path, PathBuf};

use crate::error::BrowseError;
use crate::pds4::locator::{resolve, LoadAttempt, ResourceLocator};
use crate::pds4::loader::{BatchReport, DataSink, LabelHandler};
use crate::pds4::structure::StructureReader;
use crate::state::entry::{EntryIcon, FileEntry};
use crate::state::listing::{list_directory, DirectoryListing, MATCH_ALL};
use crate::state::settings::BrowserSettings;

pub struct Browser<R: StructureReader, S: DataSink> {
    settings: BrowserSettings,
    handler: LabelHandler<R>,
    sink: S,
    /// Pattern of the current listing, `<dir>/<glob>`
    curpath: String,
    listing: Option<DirectoryListing>,
    last_report: BatchReport,
}

impl<R: StructureReader, S: DataSink> Browser<R, S> {
    pub fn new(settings: BrowserSettings, reader: R, sink: S) -> Self {
        let curpath = settings.initial_pattern();
        Self {
            settings,
            handler: LabelHandler::new(reader),
            sink,
            curpath,
            listing: None,
            last_report: BatchReport::default(),
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn current_pattern(&self) -> &str {
        &self.curpath
    }

    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    /// Report of the most recent load
    pub fn last_report(&self) -> &BatchReport {
        &self.last_report
    }

    /// List the starting directory
    pub fn start(&mut self) -> Result<&DirectoryListing, BrowseError> {
        let path = self.curpath.clone();
        self.browse(&path)
    }

    /// Replace the listing with the entries matched by `path`
    pub fn browse(&mut self, path: &str) -> Result<&DirectoryListing, BrowseError> {
        let mut listing = list_directory(path)?;
        listing.entries = listing
            .entries
            .into_iter()
            .map(|entry| {
                let icon = EntryIcon::for_kind(entry.kind);
                entry.with_icon(icon)
            })
            .collect();

        let n_rows = listing.len();
        if self.settings.should_resize_columns(n_rows) {
            log::debug!("Resized columns for {} row(s)", n_rows);
        }

        self.curpath = listing.pattern.clone();
        Ok(self.listing.insert(listing))
    }

    pub fn refresh(&mut self) -> Result<&DirectoryListing, BrowseError> {
        let path = self.curpath.clone();
        self.browse(&path)
    }

    /// Load whatever `expression` matches.
    ///
    /// Nothing is loaded when it names a directory; the caller decides
    /// whether to browse instead.
    pub fn open_files(&mut self, expression: &str) -> Result<LoadAttempt, BrowseError> {
        let attempt = resolve(expression)?;
        match &attempt {
            LoadAttempt::Loaded(locators) => {
                self.last_report = self.load_paths(locators);
            }
            LoadAttempt::NoMatch => log::info!("No files matched {}", expression),
            LoadAttempt::IsDirectory => {}
        }
        Ok(attempt)
    }

    /// Text-box submit: load matching files, or browse a directory
    pub fn activate(&mut self, text: &str) -> Result<LoadAttempt, BrowseError> {
        let text = text.trim();
        let attempt = self.open_files(text)?;
        if attempt == LoadAttempt::IsDirectory {
            self.browse(text)?;
        }
        Ok(attempt)
    }

    /// Double-click on a path
    pub fn open_file(&mut self, path: &str) -> Result<(), BrowseError> {
        log::debug!("path: {}", path);
        let path = if path == ".." {
            let (curdir, curglob) = self.current_parts();
            curdir.join("..").join(curglob)
        } else {
            PathBuf::from(path)
        };

        if path.is_dir() {
            self.browse(&path.join(MATCH_ALL).to_string_lossy())?;
        } else if path.exists() {
            self.last_report = self.load_paths(&[ResourceLocator::new(path, None)]);
        } else {
            self.browse(&path.to_string_lossy())?;
        }
        Ok(())
    }

    /// Load button: the text box first, then the table selection.
    ///
    /// A single selected directory is browsed into; otherwise the
    /// selected regular files are loaded.
    pub fn load_selection(
        &mut self,
        text: &str,
        selected: &[FileEntry],
    ) -> Result<(), BrowseError> {
        if let LoadAttempt::Loaded(_) = self.open_files(text.trim())? {
            return Ok(());
        }

        if let [only] = selected {
            if only.path.is_dir() {
                let pattern = only.path.join(MATCH_ALL);
                self.browse(&pattern.to_string_lossy())?;
                return Ok(());
            }
        }

        let locators: Vec<ResourceLocator> = selected
            .iter()
            .filter(|entry| entry.path.is_file())
            .map(|entry| ResourceLocator::new(entry.path.clone(), None))
            .collect();
        log::debug!("Loading {} selected file(s)", locators.len());
        self.last_report = self.load_paths(&locators);
        Ok(())
    }

    /// Load each resource into the sink; failures are kept per file
    pub fn load_paths(&mut self, locators: &[ResourceLocator]) -> BatchReport {
        self.handler.load_batch(locators, &mut self.sink)
    }

    fn current_parts(&self) -> (PathBuf, String) {
        let current = Path::new(&self.curpath);
        let dir = current.parent().map(Path::to_path_buf).unwrap_or_default();
        let glob = current
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| MATCH_ALL.to_string());
        (dir, glob)
    }
}

/// Drag payload for the selected entries
pub fn drag_urls(selected: &[FileEntry]) -> Vec<String> {
    let urls: Vec<String> = selected.iter().map(FileEntry::drag_url).collect();
    log::info!("urls: {:?}", urls);
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pds4::loader::tests::{image_structure, RecordingSink};
    use crate::pds4::loader::LoadedData;
    use crate::pds4::structure::MemoryReader;
    use crate::state::entry::EntryKind;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
        browser: Browser<MemoryReader, RecordingSink>,
    }

    /// data1.xml and data2.xml are images, bad.xml has no arrays
    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let mut reader = MemoryReader::new();
        for name in ["data1.xml", "data2.xml", "bad.xml", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.xml"), b"x").unwrap();

        reader.insert(dir.path().join("data1.xml"), vec![image_structure("A")]);
        reader.insert(dir.path().join("data2.xml"), vec![image_structure("B")]);
        reader.insert(dir.path().join("bad.xml"), vec![]);

        let mut settings = BrowserSettings::default();
        settings.home_path = Some(dir.path().to_path_buf());
        let browser = Browser::new(settings, reader, RecordingSink::default());
        Fixture { dir, browser }
    }

    fn text(dir: &TempDir, tail: &str) -> String {
        format!("{}/{}", dir.path().display(), tail)
    }

    #[test]
    fn test_start_lists_home() {
        let mut f = fixture();
        let listing = f.browser.start().unwrap();
        let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "bad.xml", "data1.xml", "data2.xml", "notes.txt", "sub"]);
        assert_eq!(listing.entries[1].icon, Some(EntryIcon::Data));
        assert_eq!(listing.entries[4].icon, Some(EntryIcon::File));
        assert_eq!(listing.entries[5].icon, Some(EntryIcon::Folder));
    }

    #[test]
    fn test_activate_loads_batch() {
        let mut f = fixture();
        let attempt = f.browser.activate(&text(&f.dir, "*.xml")).unwrap();

        let LoadAttempt::Loaded(locators) = attempt else {
            panic!("expected a load");
        };
        assert_eq!(locators.len(), 3);
        // bad.xml fails on its own without stopping the others
        assert_eq!(f.browser.last_report().loaded.len(), 2);
        assert_eq!(f.browser.last_report().failed.len(), 1);
        assert_eq!(f.browser.sink().received.len(), 2);
        assert!(matches!(f.browser.sink().received[0].1, LoadedData::Image(_)));
    }

    #[test]
    fn test_activate_browses_directory() {
        let mut f = fixture();
        let attempt = f.browser.activate(&text(&f.dir, "sub/*")).unwrap();

        assert_eq!(attempt, LoadAttempt::IsDirectory);
        let listing = f.browser.listing().unwrap();
        assert_eq!(listing.directory, f.dir.path().join("sub"));
        assert_eq!(listing.matches()[0].name, "inner.xml");
        assert!(f.browser.sink().received.is_empty());
    }

    #[test]
    fn test_activate_invalid_directory() {
        let mut f = fixture();
        let result = f.browser.activate(&text(&f.dir, "missing/"));
        assert!(result.is_ok());

        let result = f.browser.browse(&text(&f.dir, "missing/*"));
        assert!(matches!(result, Err(BrowseError::InvalidDirectory(_))));
    }

    #[test]
    fn test_open_parent_and_refresh() {
        let mut f = fixture();
        f.browser.browse(&text(&f.dir, "sub/*")).unwrap();

        f.browser.open_file("..").unwrap();
        assert_eq!(f.browser.listing().unwrap().directory, f.dir.path());

        fs::write(f.dir.path().join("late.xml"), b"x").unwrap();
        let refreshed = f.browser.refresh().unwrap();
        assert!(refreshed.entries.iter().any(|e| e.name == "late.xml"));
    }

    #[test]
    fn test_open_file_loads_or_browses() {
        let mut f = fixture();
        f.browser.open_file(&text(&f.dir, "data2.xml")).unwrap();
        assert_eq!(f.browser.sink().received.len(), 1);

        f.browser.open_file(&text(&f.dir, "sub")).unwrap();
        assert_eq!(f.browser.listing().unwrap().directory, f.dir.path().join("sub"));
    }

    #[test]
    fn test_load_selection() {
        let mut f = fixture();
        let listing = f.browser.start().unwrap().clone();

        // A lone directory is browsed into
        let sub: Vec<FileEntry> = listing
            .entries
            .iter()
            .filter(|e| e.name == "sub")
            .cloned()
            .collect();
        f.browser.load_selection(&text(&f.dir, "*"), &sub).unwrap();
        assert_eq!(f.browser.listing().unwrap().directory, f.dir.path().join("sub"));

        // Directories are dropped from a mixed selection
        let mixed: Vec<FileEntry> = listing
            .entries
            .iter()
            .filter(|e| e.name == "data1.xml" || e.kind == EntryKind::Directory)
            .cloned()
            .collect();
        f.browser.load_selection("", &mixed).unwrap();
        assert_eq!(f.browser.last_report().loaded.len(), 1);
        assert_eq!(f.browser.sink().received.len(), 1);
    }

    #[test]
    fn test_drag_urls() {
        let mut f = fixture();
        let listing = f.browser.start().unwrap();
        let urls = drag_urls(&listing.entries[2..3]);
        assert_eq!(urls, vec![format!("file://{}", f.dir.path().join("data1.xml").display())]);
    }
}
