//! In-memory object graph produced by a PDS4 label reader
//!
//! Parsing labels is left to the reader implementation. The loader only
//! sees the structures below: typed array data plus the metadata needed
//! to orient it.

use ndarray::ArrayD;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Boxed error returned by label readers
pub type ReaderError = Box<dyn std::error::Error + Send + Sync>;

/// Array element data with its element type preserved
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    UInt8(ArrayD<u8>),
    Int8(ArrayD<i8>),
    UInt16(ArrayD<u16>),
    Int16(ArrayD<i16>),
    UInt32(ArrayD<u32>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

impl ArrayData {
    /// Shape in memory order (first axis slowest)
    pub fn shape(&self) -> &[usize] {
        match self {
            ArrayData::UInt8(arr) => arr.shape(),
            ArrayData::Int8(arr) => arr.shape(),
            ArrayData::UInt16(arr) => arr.shape(),
            ArrayData::Int16(arr) => arr.shape(),
            ArrayData::UInt32(arr) => arr.shape(),
            ArrayData::Int32(arr) => arr.shape(),
            ArrayData::Int64(arr) => arr.shape(),
            ArrayData::Float32(arr) => arr.shape(),
            ArrayData::Float64(arr) => arr.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }
}

/// One `Axis_Array` entry of an array's label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisArray {
    pub axis_name: String,
    pub elements: usize,
    /// 1-based; 1 is the slowest-varying axis
    pub sequence_number: usize,
}

/// The `Display_Direction` block of an array's display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDirection {
    pub horizontal_display_axis: String,
    pub vertical_display_axis: String,
    /// e.g. "Left to Right" or "Right to Left"
    pub horizontal_display_direction: String,
    /// e.g. "Bottom to Top" or "Top to Bottom"
    pub vertical_display_direction: String,
}

/// Label metadata attached to an array
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayMeta {
    pub axis_arrays: Vec<AxisArray>,
    pub display_direction: Option<DisplayDirection>,
}

impl ArrayMeta {
    /// Look up an axis by its `axis_name`
    pub fn get_axis_array(&self, axis_name: &str) -> Option<&AxisArray> {
        self.axis_arrays.iter().find(|axis| axis.axis_name == axis_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStructure {
    pub name: String,
    pub data: ArrayData,
    pub meta: ArrayMeta,
}

/// One field (column) of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub name: String,
    pub data: ArrayData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStructure {
    pub name: String,
    pub fields: Vec<TableField>,
}

impl TableStructure {
    /// Number of records (length of the first field)
    pub fn records(&self) -> usize {
        self.fields
            .first()
            .and_then(|field| field.data.shape().first().copied())
            .unwrap_or(0)
    }
}

/// Kinds of structure a label can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Array,
    Table,
}

/// One data structure of a product
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Array(ArrayStructure),
    Table(TableStructure),
}

impl Structure {
    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Array(_) => StructureKind::Array,
            Structure::Table(_) => StructureKind::Table,
        }
    }

    pub fn is_array(&self) -> bool {
        self.kind() == StructureKind::Array
    }

    pub fn name(&self) -> &str {
        match self {
            Structure::Array(array) => &array.name,
            Structure::Table(table) => &table.name,
        }
    }
}

/// Reads the structures described by a label file
pub trait StructureReader {
    fn read(&self, path: &Path) -> Result<Vec<Structure>, ReaderError>;
}

/// Reader serving pre-parsed products keyed by path
///
/// Useful when labels are parsed elsewhere, and as a test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    products: HashMap<PathBuf, Vec<Structure>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, structures: Vec<Structure>) {
        self.products.insert(path.into(), structures);
    }
}

impl StructureReader for MemoryReader {
    fn read(&self, path: &Path) -> Result<Vec<Structure>, ReaderError> {
        self.products
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no product registered for {}", path.display()).into())
    }
}
