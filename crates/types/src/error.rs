//! Error taxonomy shared by the colormap engine and its hosts.

use thiserror::Error;

/// Why a colormap operation was rejected.
///
/// None of these are fatal: the collection is left unchanged (apart from a
/// color update that precedes a rejected boundary move) and the host decides
/// how to present the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColormapError {
    #[error("A color stop already exists at position {existing:.4} (requested {position:.4})")]
    PositionOccupied { position: f64, existing: f64 },

    #[error("Position {0} is outside the range 0.0 to 1.0")]
    PositionOutOfRange(f64),

    #[error("Stop {0} is a boundary stop and cannot be removed or moved")]
    BoundaryImmutable(usize),

    #[error("Stop index {index} is out of range for {len} stops")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Malformed colormap data: {0}")]
    MalformedInterchange(String),

    #[error("Invalid color {0:?}: expected #RRGGBB")]
    UnparsableColor(String),

    #[error("Invalid color stop list: {0}")]
    InvalidStops(String),

    #[error("Sample count {0} is outside the supported range")]
    InvalidSampleCount(usize),
}

/// Result type alias for colormap operations
pub type Result<T> = std::result::Result<T, ColormapError>;
