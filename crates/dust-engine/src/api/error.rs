//! Error types for the particle simulation and its hosts.
//!
//! Mask sampling running out of attempts is not an error: it is reported
//! as `None` by the sampler and simply shrinks or defers the population.

use std::fmt;

/// Errors that stop rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DustError {
    /// The drawing surface lost its backing context.
    SurfaceUnavailable,
    /// No canvas element with the given id exists in the document.
    CanvasNotFound(String),
    /// The canvas exists but a 2D context could not be obtained.
    ContextUnavailable,
}

impl fmt::Display for DustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DustError::SurfaceUnavailable => write!(f, "Drawing surface is unavailable"),
            DustError::CanvasNotFound(id) => write!(f, "No canvas element with id '{}'", id),
            DustError::ContextUnavailable => write!(f, "Canvas 2D context is unavailable"),
        }
    }
}

impl std::error::Error for DustError {}
