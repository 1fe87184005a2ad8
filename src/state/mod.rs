//! State for the file browser
//!
//! This module handles:
//! - File entries and their classification (entry.rs)
//! - Directory listings built from a path pattern (listing.rs)
//! - Browser preferences (settings.rs)

pub mod entry;
pub mod listing;
pub mod settings;

pub use entry::{classify, EntryIcon, EntryKind, FileEntry};
pub use listing::{list_directory, list_directory_async, DirectoryListing};
pub use settings::{BrowserSettings, Column};
