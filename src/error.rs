//! Error types for browsing and loading
//!
//! Browse errors are surfaced to the user immediately. Load errors are
//! reported per file so a batch keeps going past a bad file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing a directory listing or expanding a path
#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("Not a valid path: {}", .0.display())]
    InvalidDirectory(PathBuf),
    #[error("Invalid wildcard pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Listing task failed: {0}")]
    Task(String),
}

/// Errors raised while loading one resource and orienting its data
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Display settings must name exactly one horizontal and one vertical axis")]
    MissingAxisRole,
    #[error("Cannot isolate a 2D plane from {ndim}-dimensional data")]
    UnsupportedRank { ndim: usize },
    #[error("No image found in {0}")]
    NoRecognizedData(String),
    #[error("Structure index {index} out of range ({count} structures)")]
    SubIndexOutOfRange { index: usize, count: usize },
    #[error("File must be local: {0}")]
    NotLocal(String),
    #[error("Display settings reference unknown axis: {0}")]
    MissingAxisArray(String),
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
