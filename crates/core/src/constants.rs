//! Shared constants for the colormap engine

/// Minimum distance between a new stop and any existing stop.
/// This represents 0.1% precision on the normalized 0.0-1.0 axis.
pub const POSITION_TOLERANCE: f64 = 0.001;

/// Canonical sample count for bulk export and the full-resolution view
pub const DEFAULT_RESOLUTION: usize = 512;

/// Smallest sample count accepted by the source export
pub const MIN_EXPORT_COLORS: usize = 16;

/// Largest sample count accepted by the source export
pub const MAX_EXPORT_COLORS: usize = 4096;

/// Version tag written to the metadata block of interchange files
pub const INTERCHANGE_VERSION: &str = "1.0";

/// Name used when the user does not provide one
pub const DEFAULT_COLORMAP_NAME: &str = "custom_colormap";
