//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors raised while building a scene or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSG needs at least two surfaces, got {found}")]
    CsgArity { found: usize },

    #[error("{kind} has a transform that cannot be inverted")]
    SingularTransform { kind: &'static str },

    #[error("Canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: usize, height: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
