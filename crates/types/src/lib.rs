//! colormap-types: Shared data types for the colormap maker.
//!
//! This crate contains pure data types (colors, color stops, errors) shared
//! by the engine and the host application.

pub mod color;
pub mod error;

// Re-export commonly used types at the crate root for convenience
pub use color::{ColorStop, Rgb};
pub use error::{ColormapError, Result};
