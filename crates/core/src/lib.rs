//! colormap-core: The colormap engine.
//!
//! This crate owns the ordered stop collection and its invariants, the
//! linear RGB interpolation used for rendering and sampling, and the two
//! output formats (interchange JSON and Python source export). It performs
//! no file I/O; hosts read and write the text it produces.

pub mod constants;
mod colormap;
mod export;
mod interchange;
mod interpolate;
pub mod table;

pub use colormap::Colormap;
pub use constants::{
    DEFAULT_COLORMAP_NAME, DEFAULT_RESOLUTION, INTERCHANGE_VERSION, MAX_EXPORT_COLORS,
    MIN_EXPORT_COLORS, POSITION_TOLERANCE,
};
pub use export::SourceExportOptions;
pub use interchange::{InterchangeDocument, Metadata};
pub use interpolate::{sample_positions, Sample};
pub use table::TableRow;

// Re-export types used in the engine signatures for convenience
pub use colormap_types::{ColorStop, ColormapError, Result, Rgb};
