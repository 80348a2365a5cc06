//! Geometry primitives shared by the paging and selector state machines

use serde::{Deserialize, Serialize};

/// Direction in which pages are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// One of the two geometry dimensions, relative to the paging direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingAxis {
    /// The dimension pages are laid out and snapped along
    Primary,
    /// The perpendicular dimension, owned by nested content
    Secondary,
}

impl Orientation {
    /// Resolve which on-screen axis a paging axis refers to.
    /// Returns `true` when the axis is the horizontal one.
    pub fn is_horizontal(self, axis: PagingAxis) -> bool {
        matches!(
            (self, axis),
            (Orientation::Horizontal, PagingAxis::Primary)
                | (Orientation::Vertical, PagingAxis::Secondary)
        )
    }

    /// Primary-axis component of a 2-D value
    #[inline]
    pub fn primary(self, x: f32, y: f32) -> f32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }

    /// Cross-axis component of a 2-D value
    #[inline]
    pub fn cross(self, x: f32, y: f32) -> f32 {
        match self {
            Orientation::Horizontal => y,
            Orientation::Vertical => x,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Pointer position in host units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resolved container extents. Either side may be NaN or non-positive
/// before the host's first layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const UNRESOLVED: Size = Size {
        width: f32::NAN,
        height: f32::NAN,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn primary(&self, orientation: Orientation) -> f32 {
        orientation.primary(self.width, self.height)
    }

    pub fn cross(&self, orientation: Orientation) -> f32 {
        orientation.cross(self.width, self.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

/// Treat negative, zero and NaN extents as unresolved (0)
#[inline]
pub fn resolved_extent(value: f32) -> f32 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value
    }
}

/// Per-side padding, clamped to non-negative values at assignment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub bottom: f32,
}

impl Padding {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: clamp_side(left),
            right: clamp_side(right),
            top: clamp_side(top),
            bottom: clamp_side(bottom),
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Re-apply the non-negative clamp, e.g. after deserializing
    pub fn clamped(self) -> Self {
        Self::new(self.left, self.right, self.top, self.bottom)
    }

    /// Total padding along the given axis
    pub fn along(&self, orientation: Orientation, axis: PagingAxis) -> f32 {
        if orientation.is_horizontal(axis) {
            self.left + self.right
        } else {
            self.top + self.bottom
        }
    }
}

fn clamp_side(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Style-writable extent of a child page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Absolute length in host units
    Points(f32),
    /// 100% of the container
    Full,
}

/// Layout the paging machine writes onto each child page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: Extent,
    pub height: Extent,
    pub margin: Padding,
}
