//! Colormap Maker: an editor for piecewise-linear color gradients
//!
//! This library provides the host side of the colormap engine:
//! - Edit sessions holding the colormap, the selected stop and file paths
//! - Loading and saving interchange files, writing Python source exports
//! - Application configuration

pub mod config;
pub mod session;

// Re-export commonly used types
pub use colormap_core::{Colormap, ColormapError, Rgb, SourceExportOptions};
pub use config::{AppConfig, ConfigStore};
pub use session::{EditSession, Selection};
