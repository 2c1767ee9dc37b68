//! Edit session: one colormap, its selection and the files it came from.
//!
//! The session is the host side of the engine. It owns interaction state the
//! colormap itself does not track, turns engine rejections into log output,
//! and does all file I/O.

mod selection;

pub use selection::Selection;

use anyhow::{Context, Result};
use colormap_core::{Colormap, ColormapError, InterchangeDocument, Rgb, SourceExportOptions};
use log::{info, warn};
use std::path::{Path, PathBuf};

pub struct EditSession {
    colormap: Colormap,
    selection: Selection,
    name: String,
    path: Option<PathBuf>,
    modified: bool,
}

impl EditSession {
    /// Fresh black-to-white colormap
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            colormap: Colormap::new(),
            selection: Selection::none(),
            name: name.into(),
            path: None,
            modified: false,
        }
    }

    /// Load an interchange file
    pub fn open(path: &Path) -> Result<Self> {
        let mut session = Self::new(String::new());
        session.load(path)?;
        Ok(session)
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn select(&mut self, index: usize) -> Result<(), ColormapError> {
        if index >= self.colormap.len() {
            return Err(ColormapError::IndexOutOfRange {
                index,
                len: self.colormap.len(),
            });
        }
        self.selection.select(index);
        Ok(())
    }

    /// Select the stop closest to a position on the gradient axis
    pub fn select_nearest(&mut self, position: f64) -> usize {
        let index = self.colormap.nearest_stop(position);
        self.selection.select(index);
        index
    }

    /// Add a stop and select it. With no color, the gradient's current color
    /// at that position is used.
    pub fn add_stop(&mut self, position: f64, color: Option<Rgb>) -> Result<usize, ColormapError> {
        let result = match color {
            Some(color) => self.colormap.add_stop(position, color),
            None => self.colormap.add_interpolated_stop(position),
        };
        let index = report(result, "add stop")?;
        self.selection.select(index);
        self.modified = true;
        Ok(index)
    }

    pub fn remove_stop(&mut self, index: usize) -> Result<(), ColormapError> {
        report(self.colormap.remove_stop(index), "remove stop")?;
        self.selection.on_removed(index);
        self.modified = true;
        Ok(())
    }

    /// Remove the selected stop. Nothing selected is not an error.
    pub fn remove_selected(&mut self) -> Result<bool, ColormapError> {
        match self.selection.get() {
            Some(index) => self.remove_stop(index).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn update_stop(
        &mut self,
        index: usize,
        position: Option<f64>,
        color: Option<Rgb>,
    ) -> Result<(), ColormapError> {
        let result = self.colormap.update_stop(index, position, color);
        // A rejected boundary move still applies the color
        if result.is_ok() || (color.is_some() && index < self.colormap.len()) {
            self.modified = true;
        }
        report(result, "update stop")
    }

    /// Move the selected stop by `delta` along the axis, clamped by its neighbors
    pub fn drag_selected(&mut self, delta: f64) -> Result<(), ColormapError> {
        let Some(index) = self.selection.get() else {
            return Ok(());
        };
        let current = self
            .colormap
            .get(index)
            .map(|stop| stop.position)
            .ok_or(ColormapError::IndexOutOfRange {
                index,
                len: self.colormap.len(),
            })?;
        self.update_stop(index, Some(current + delta), None)
    }

    /// Replace the whole colormap with the one stored in `path`
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read colormap {}", path.display()))?;
        let document = InterchangeDocument::parse(&text)
            .with_context(|| format!("Failed to load colormap {}", path.display()))?;
        let colormap = Colormap::from_interchange(&document)
            .with_context(|| format!("Failed to load colormap {}", path.display()))?;

        info!(
            "Loaded colormap '{}' ({} stops) from {}",
            document.metadata.name,
            colormap.len(),
            path.display()
        );
        self.colormap = colormap;
        self.name = document.metadata.name;
        self.selection.clear();
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Save to the file the session was loaded from or last saved to
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Colormap has no file yet, use save_as"))?;
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        let text = self.colormap.to_interchange(&self.name).to_json()?;
        write_file(path, &text)?;

        info!("Saved colormap '{}' to {}", self.name, path.display());
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Write the Python source export
    pub fn export_source(&self, path: &Path, options: &SourceExportOptions) -> Result<()> {
        let text = self
            .colormap
            .to_source_export_with(options)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        write_file(path, &text)?;

        info!(
            "Exported '{}' with {} samples to {}",
            options.name,
            options.num_colors,
            path.display()
        );
        Ok(())
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Log a rejected edit and hand the result back
fn report<T>(result: Result<T, ColormapError>, action: &str) -> Result<T, ColormapError> {
    if let Err(e) = &result {
        warn!("Cannot {}: {}", action, e);
    }
    result
}
