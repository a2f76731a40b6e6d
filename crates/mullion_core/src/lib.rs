//! Mullion core geometry
//!
//! Leaf types shared by the styling engine and the decoration renderer:
//! floating-point boxes, integer damage rectangles, 3x3 matrices and the
//! Wayland output transforms. No GPU or style knowledge lives here.

pub mod damage;
pub mod matrix;
pub mod rect;

pub use damage::DamageRegion;
pub use matrix::{Mat3, OutputTransform};
pub use rect::{IntRect, Rect};
