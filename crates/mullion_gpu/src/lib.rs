//! Mullion decoration renderer
//!
//! Renders window decorations (background, border, shadow, content texture)
//! with a small fixed set of GPU pipelines. Rounded corners and shadow
//! softness come from a 3x3 mesh partition of the unit square plus an
//! analytic smoothstep threshold in the fragment stage, so the result is
//! resolution-independent across output scales and transforms.

pub mod error;
pub mod mesh;
pub mod pipelines;
pub mod render;
pub mod shaders;

pub use error::PipelineError;
pub use pipelines::RenderContext;
pub use render::{ContentTexture, RenderRequest, TextureKind};
