//! PDS4 product loader
//!
//! This module reads a product through a `StructureReader`, picks one
//! structure, and hands the result to a `DataSink`. Arrays are oriented
//! for display on the way; tables pass through as read.

use std::path::Path;

use super::axis::display_axes;
use super::locator::ResourceLocator;
use super::orient::{normalize_data, ImageData};
use super::structure::{Structure, StructureReader, TableStructure};
use crate::error::LoadError;

/// An array oriented for display
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedImage {
    /// Position of the structure within the product
    pub index: usize,
    pub name: String,
    pub data: ImageData,
}

/// What a successful load produces
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedData {
    Image(OrientedImage),
    Table { index: usize, table: TableStructure },
}

/// Destination for loaded data (a viewer channel, a buffer, ...)
pub trait DataSink {
    fn set_data(&mut self, locator: &ResourceLocator, data: LoadedData);
}

/// Outcome of loading several resources
#[derive(Debug, Default)]
pub struct BatchReport {
    pub loaded: Vec<ResourceLocator>,
    pub failed: Vec<(ResourceLocator, LoadError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pick the structure to load.
///
/// With an index, that structure; without, the first array.
pub fn select_structure(
    structures: &[Structure],
    sub_index: Option<usize>,
    path: &Path,
) -> Result<usize, LoadError> {
    match sub_index {
        Some(index) if index < structures.len() => Ok(index),
        Some(index) => Err(LoadError::SubIndexOutOfRange {
            index,
            count: structures.len(),
        }),
        None => structures
            .iter()
            .position(Structure::is_array)
            .ok_or_else(|| LoadError::NoRecognizedData(path.display().to_string())),
    }
}

/// Loads products through a reader
pub struct LabelHandler<R: StructureReader> {
    reader: R,
}

impl<R: StructureReader> LabelHandler<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and convert one resource
    pub fn load(&self, locator: &ResourceLocator) -> Result<LoadedData, LoadError> {
        let path = &locator.filesystem_path;
        let mut structures = self.reader.read(path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;

        let index = select_structure(&structures, locator.sub_index, path)?;
        let kind = structures[index].kind();
        log::debug!("loading {:?} structure {} from {}", kind, index, path.display());

        match structures.swap_remove(index) {
            Structure::Array(array) => {
                let axes = display_axes(&array.meta)?;
                let data = normalize_data(&array.data, &axes)?;
                Ok(LoadedData::Image(OrientedImage {
                    index,
                    name: array.name,
                    data,
                }))
            }
            Structure::Table(table) => {
                log::debug!("table {} has {} record(s)", table.name, table.records());
                Ok(LoadedData::Table { index, table })
            }
        }
    }

    /// Load one resource and hand it to `sink`
    pub fn load_into(
        &self,
        locator: &ResourceLocator,
        sink: &mut dyn DataSink,
    ) -> Result<(), LoadError> {
        let data = self.load(locator)?;
        sink.set_data(locator, data);
        log::info!("loaded {}", locator);
        Ok(())
    }

    /// Load every resource, collecting failures instead of stopping
    pub fn load_batch(
        &self,
        locators: &[ResourceLocator],
        sink: &mut dyn DataSink,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for locator in locators {
            match self.load_into(locator, sink) {
                Ok(()) => report.loaded.push(locator.clone()),
                Err(e) => {
                    log::warn!("failed to load {}: {}", locator, e);
                    report.failed.push((locator.clone(), e));
                }
            }
        }
        if !report.is_clean() {
            log::warn!(
                "{} of {} resource(s) failed to load",
                report.failed.len(),
                locators.len()
            );
        }
        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pds4::structure::{
        ArrayData, ArrayMeta, ArrayStructure, AxisArray, DisplayDirection, MemoryReader,
        TableField,
    };
    use ndarray::{Array, Array2, ArrayD, IxDyn};

    /// Sink that records everything it receives
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub received: Vec<(ResourceLocator, LoadedData)>,
    }

    impl DataSink for RecordingSink {
        fn set_data(&mut self, locator: &ResourceLocator, data: LoadedData) {
            self.received.push((locator.clone(), data));
        }
    }

    /// A 3x4 Line/Sample image displayed left-to-right, top-to-bottom
    pub(crate) fn image_structure(name: &str) -> Structure {
        let data = Array::from_shape_fn((3, 4), |(r, c)| (r * 10 + c) as u16).into_dyn();
        Structure::Array(ArrayStructure {
            name: name.to_string(),
            data: ArrayData::UInt16(data),
            meta: ArrayMeta {
                axis_arrays: vec![
                    AxisArray {
                        axis_name: "Line".to_string(),
                        elements: 3,
                        sequence_number: 1,
                    },
                    AxisArray {
                        axis_name: "Sample".to_string(),
                        elements: 4,
                        sequence_number: 2,
                    },
                ],
                display_direction: Some(DisplayDirection {
                    horizontal_display_axis: "Sample".to_string(),
                    vertical_display_axis: "Line".to_string(),
                    horizontal_display_direction: "Left to Right".to_string(),
                    vertical_display_direction: "Top to Bottom".to_string(),
                }),
            },
        })
    }

    pub(crate) fn table_structure(name: &str) -> Structure {
        Structure::Table(TableStructure {
            name: name.to_string(),
            fields: vec![TableField {
                name: "COUNT".to_string(),
                data: ArrayData::Int32(ArrayD::zeros(IxDyn(&[4]))),
            }],
        })
    }

    fn handler() -> LabelHandler<MemoryReader> {
        let mut reader = MemoryReader::new();
        reader.insert("/p/mixed.xml", vec![table_structure("HEADER"), image_structure("IMG")]);
        reader.insert("/p/tables.xml", vec![table_structure("T1")]);
        let mut no_settings = image_structure("RAW");
        if let Structure::Array(array) = &mut no_settings {
            array.meta.display_direction = None;
        }
        reader.insert("/p/plain.xml", vec![no_settings]);
        LabelHandler::new(reader)
    }

    #[test]
    fn test_first_array_is_default() {
        let loaded = handler().load(&ResourceLocator::new("/p/mixed.xml", None)).unwrap();
        let LoadedData::Image(image) = loaded else {
            panic!("expected an image");
        };
        assert_eq!(image.index, 1);
        assert_eq!(image.name, "IMG");

        // Top-to-bottom data: the raw first line is now the top (last) row
        let ImageData::UInt16(pixels) = image.data else {
            panic!("element type changed");
        };
        let expected: Array2<u16> =
            Array::from_shape_fn((3, 4), |(r, c)| ((2 - r) * 10 + c) as u16);
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_sub_index_selects_table() {
        let loaded = handler().load(&ResourceLocator::new("/p/mixed.xml", Some(0))).unwrap();
        assert!(matches!(
            loaded,
            LoadedData::Table { index: 0, ref table } if table.name == "HEADER"
        ));
    }

    #[test]
    fn test_errors() {
        let h = handler();
        assert!(matches!(
            h.load(&ResourceLocator::new("/p/tables.xml", None)),
            Err(LoadError::NoRecognizedData(_))
        ));
        assert!(matches!(
            h.load(&ResourceLocator::new("/p/mixed.xml", Some(5))),
            Err(LoadError::SubIndexOutOfRange { index: 5, count: 2 })
        ));
        assert!(matches!(
            h.load(&ResourceLocator::new("/p/plain.xml", None)),
            Err(LoadError::MissingAxisRole)
        ));
        assert!(matches!(
            h.load(&ResourceLocator::new("/p/absent.xml", None)),
            Err(LoadError::Read { .. })
        ));
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let h = handler();
        let mut sink = RecordingSink::default();
        let locators = vec![
            ResourceLocator::new("/p/tables.xml", None),
            ResourceLocator::new("/p/mixed.xml", None),
            ResourceLocator::new("/p/plain.xml", None),
            ResourceLocator::new("/p/mixed.xml", Some(0)),
        ];

        let report = h.load_batch(&locators, &mut sink);
        assert_eq!(report.loaded, vec![locators[1].clone(), locators[3].clone()]);
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_clean());
        assert_eq!(sink.received.len(), 2);
    }
}
