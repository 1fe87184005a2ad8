//! File browser core for PDS4 products.
//!
//! Two pieces make up the core:
//! - directory listings with a stable, case-insensitive order and a
//!   synthetic parent entry (`state`)
//! - loading PDS4 arrays and rewriting them into bottom-to-top,
//!   left-to-right raster order for display (`pds4`)
//!
//! `browser::Browser` ties them together the way an interactive file
//! pane uses them. Label parsing and rendering are left to the caller.

pub mod browser;
pub mod error;
pub mod pds4;
pub mod state;

pub use browser::Browser;
pub use error::{BrowseError, LoadError};
