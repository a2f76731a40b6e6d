//! The fixed slot layout of the style property array.
//!
//! Vector4 properties come first, four contiguous slots each (per-edge or
//! per-channel), followed by one slot per scalar property. The layout is
//! fixed at compile time; the enums below are the only way to compute slot
//! indices.

/// A property with four related components: per-edge dimensions, per-corner
/// radii, or rgba color channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorProperty {
    BorderWidth,
    BorderRadius,
    Margin,
    Padding,
    BackgroundColor,
    BorderColor,
    ShadowColor,
}

/// A single scalar property. Dimensions are logical pixels, angles radians,
/// proportions values in the unit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarProperty {
    TranslationX,
    TranslationY,
    Rotation,
    ShadowHOffset,
    ShadowVOffset,
    ShadowBlur,
    ShadowSpread,
    ShadowInset,
    Opacity,
}

/// Component order of per-edge vector properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

pub const VECTOR_COUNT: usize = 7;
pub const SCALAR_COUNT: usize = 9;

const VECTOR_BASE: usize = 0;
const SCALAR_BASE: usize = VECTOR_BASE + VECTOR_COUNT * 4;

/// Total number of float slots in a style.
pub const SLOT_COUNT: usize = SCALAR_BASE + SCALAR_COUNT;

impl VectorProperty {
    /// Index of the property's first slot; the remaining three follow
    /// contiguously.
    pub const fn slot(self) -> usize {
        VECTOR_BASE + self as usize * 4
    }
}

impl ScalarProperty {
    pub const fn slot(self) -> usize {
        SCALAR_BASE + self as usize
    }
}
