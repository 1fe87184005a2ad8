//! Orientation normalizer
//!
//! The viewer draws row 0 at the bottom and column 0 at the left. Label
//! data is stored last-index-fastest with 1-based axis numbers, and each
//! array declares which axis is horizontal and which way each axis runs.
//! `normalize` turns that into a transpose and up to two flips.
//!
//! Element values pass through untouched; only views are rearranged
//! before the final copy.

use ndarray::{Array2, ArrayView2, ArrayViewD, Axis, Ix2};

use super::axis::{AxisDescriptor, AxisDirection, AxisRole};
use super::structure::ArrayData;
use crate::error::LoadError;

/// A canonically oriented 2D image with its element type preserved
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    UInt8(Array2<u8>),
    Int8(Array2<i8>),
    UInt16(Array2<u16>),
    Int16(Array2<i16>),
    UInt32(Array2<u32>),
    Int32(Array2<i32>),
    Int64(Array2<i64>),
    Float32(Array2<f32>),
    Float64(Array2<f64>),
}

impl ImageData {
    /// Dimensions as (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            ImageData::UInt8(arr) => arr.dim(),
            ImageData::Int8(arr) => arr.dim(),
            ImageData::UInt16(arr) => arr.dim(),
            ImageData::Int16(arr) => arr.dim(),
            ImageData::UInt32(arr) => arr.dim(),
            ImageData::Int32(arr) => arr.dim(),
            ImageData::Int64(arr) => arr.dim(),
            ImageData::Float32(arr) => arr.dim(),
            ImageData::Float64(arr) => arr.dim(),
        }
    }
}

/// Find the single descriptor with `role`
fn find_role(axes: &[AxisDescriptor], role: AxisRole) -> Result<AxisDescriptor, LoadError> {
    let mut found = axes.iter().filter(|axis| axis.role == role);
    match (found.next(), found.next()) {
        (Some(axis), None) => Ok(*axis),
        _ => Err(LoadError::MissingAxisRole),
    }
}

/// Isolate the display plane of `raw`.
///
/// The display axes must be the first two declared axes. Any further
/// axes must have length 1; otherwise there is no single plane to pick.
fn display_plane<'a, T>(
    raw: ArrayViewD<'a, T>,
    horizontal: &AxisDescriptor,
    vertical: &AxisDescriptor,
) -> Result<ArrayView2<'a, T>, LoadError> {
    let ndim = raw.ndim();
    let mut pair = [horizontal.sequence_number, vertical.sequence_number];
    pair.sort_unstable();
    if ndim < 2 || pair != [1, 2] {
        return Err(LoadError::UnsupportedRank { ndim });
    }

    let mut plane = raw;
    while plane.ndim() > 2 {
        let last = Axis(plane.ndim() - 1);
        if plane.len_of(last) != 1 {
            return Err(LoadError::UnsupportedRank { ndim });
        }
        plane = plane.index_axis_move(last, 0);
    }

    plane
        .into_dimensionality::<Ix2>()
        .map_err(|_| LoadError::UnsupportedRank { ndim })
}

/// Rewrite `raw` into bottom-to-top, left-to-right raster order.
///
/// `axes` describe the original data, so feeding the output back in with
/// the same descriptors is not a no-op.
pub fn normalize<T: Clone>(
    raw: ArrayViewD<'_, T>,
    axes: &[AxisDescriptor],
) -> Result<Array2<T>, LoadError> {
    let horizontal = find_role(axes, AxisRole::Horizontal)?;
    let vertical = find_role(axes, AxisRole::Vertical)?;
    if horizontal.sequence_number == vertical.sequence_number {
        return Err(LoadError::MissingAxisRole);
    }

    let plane = display_plane(raw, &horizontal, &vertical)?;

    // Horizontal must end up on memory axis 1 (columns)
    let mut plane = if horizontal.sequence_number == 1 {
        plane.reversed_axes()
    } else {
        plane
    };

    if horizontal.direction == AxisDirection::Decreasing {
        plane.invert_axis(Axis(1));
    }
    if vertical.direction == AxisDirection::Decreasing {
        plane.invert_axis(Axis(0));
    }

    Ok(plane.to_owned())
}

/// `normalize` for each supported element type
pub fn normalize_data(raw: &ArrayData, axes: &[AxisDescriptor]) -> Result<ImageData, LoadError> {
    let image = match raw {
        ArrayData::UInt8(arr) => ImageData::UInt8(normalize(arr.view(), axes)?),
        ArrayData::Int8(arr) => ImageData::Int8(normalize(arr.view(), axes)?),
        ArrayData::UInt16(arr) => ImageData::UInt16(normalize(arr.view(), axes)?),
        ArrayData::Int16(arr) => ImageData::Int16(normalize(arr.view(), axes)?),
        ArrayData::UInt32(arr) => ImageData::UInt32(normalize(arr.view(), axes)?),
        ArrayData::Int32(arr) => ImageData::Int32(normalize(arr.view(), axes)?),
        ArrayData::Int64(arr) => ImageData::Int64(normalize(arr.view(), axes)?),
        ArrayData::Float32(arr) => ImageData::Float32(normalize(arr.view(), axes)?),
        ArrayData::Float64(arr) => ImageData::Float64(normalize(arr.view(), axes)?),
    };
    Ok(image)
}
