//! Display axis descriptors
//!
//! A descriptor ties one declared axis (by sequence number) to its on-screen
//! role and to the direction its index runs in.

use super::structure::{ArrayMeta, AxisArray};
use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    Horizontal,
    Vertical,
}

/// Whether index 0 along an axis is the minimum (Increasing) or the
/// maximum (Decreasing) physical coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    Increasing,
    Decreasing,
}

impl AxisDirection {
    /// Parse a `horizontal_display_direction` value
    pub fn from_horizontal(text: &str) -> Self {
        if text.contains("Right to Left") {
            AxisDirection::Decreasing
        } else {
            AxisDirection::Increasing
        }
    }

    /// Parse a `vertical_display_direction` value.
    /// "Top to Bottom" puts index 0 at the top, the maximum coordinate.
    pub fn from_vertical(text: &str) -> Self {
        if text.contains("Top to Bottom") {
            AxisDirection::Decreasing
        } else {
            AxisDirection::Increasing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisDescriptor {
    /// 1-based position in the label's declared axis order
    pub sequence_number: usize,
    pub role: AxisRole,
    pub direction: AxisDirection,
}

impl AxisDescriptor {
    pub fn new(sequence_number: usize, role: AxisRole, direction: AxisDirection) -> Self {
        Self {
            sequence_number,
            role,
            direction,
        }
    }

    pub fn horizontal(sequence_number: usize, direction: AxisDirection) -> Self {
        Self::new(sequence_number, AxisRole::Horizontal, direction)
    }

    pub fn vertical(sequence_number: usize, direction: AxisDirection) -> Self {
        Self::new(sequence_number, AxisRole::Vertical, direction)
    }
}

fn lookup<'a>(meta: &'a ArrayMeta, axis_name: &str) -> Result<&'a AxisArray, LoadError> {
    meta.get_axis_array(axis_name)
        .ok_or_else(|| LoadError::MissingAxisArray(axis_name.to_string()))
}

/// Build the horizontal and vertical descriptors from an array's
/// `Display_Direction` settings
pub fn display_axes(meta: &ArrayMeta) -> Result<Vec<AxisDescriptor>, LoadError> {
    let settings = meta
        .display_direction
        .as_ref()
        .ok_or(LoadError::MissingAxisRole)?;

    let horizontal = lookup(meta, &settings.horizontal_display_axis)?;
    let vertical = lookup(meta, &settings.vertical_display_axis)?;

    Ok(vec![
        AxisDescriptor::horizontal(
            horizontal.sequence_number,
            AxisDirection::from_horizontal(&settings.horizontal_display_direction),
        ),
        AxisDescriptor::vertical(
            vertical.sequence_number,
            AxisDirection::from_vertical(&settings.vertical_display_direction),
        ),
    ])
}
