//! PDS4 product loading
//!
//! This module handles:
//! - Expanding path expressions into resource locators
//! - The structure graph a label reader produces
//! - Building display axis descriptors from label metadata
//! - Orienting array data for bottom-to-top, left-to-right display
//! - Dispatching each structure kind to its handler and a sink

pub mod axis;
pub mod loader;
pub mod locator;
pub mod orient;
pub mod structure;

pub use axis::{display_axes, AxisDescriptor, AxisDirection, AxisRole};
pub use loader::{BatchReport, DataSink, LabelHandler, LoadedData, OrientedImage};
pub use locator::{expand, resolve, LoadAttempt, ResourceLocator};
pub use orient::{normalize, normalize_data, ImageData};
pub use structure::{ArrayData, Structure, StructureKind, StructureReader};
