//! Mullion styling engine
//!
//! Per-element stylable properties, time-based transitions between property
//! values, and the derived decoration geometry those properties imply.
//!
//! All stylable properties of an element live in one fixed-layout float
//! array inside [`Style`], so the animation stepper can iterate them
//! uniformly. Property setters stage transition targets; displayed values
//! only change when [`Style::animate`] advances the transitions to a frame
//! timestamp.

pub mod props;
pub mod style;
pub mod transition;
pub mod tree;

pub use props::{Edge, ScalarProperty, VectorProperty, SLOT_COUNT};
pub use style::Style;
pub use transition::{Easing, Transition};
pub use tree::{animate_tree, AnimateTree};
