//! Renderer initialization errors.

use thiserror::Error;

/// Failure while building the decoration shader pipelines.
///
/// Initialization is the only fallible part of the renderer; callers that
/// receive an error can fall back to undecorated rendering by not
/// constructing a [`crate::RenderContext`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("shader module `{label}` failed validation: {message}")]
    Shader { label: &'static str, message: String },

    #[error("render pipeline `{label}` failed validation: {message}")]
    Pipeline { label: &'static str, message: String },
}
