//! One-way export to a Python module for PlotPy / PythonQwt.
//!
//! The module rebuilds the gradient through `EditableColormap` (first and last
//! stop as the base two-color map, the rest via `addColorStop`) and carries
//! precomputed stop tables and a dense sample ramp.

use colormap_types::{ColormapError, Result};
use std::fmt::Write;

use crate::colormap::Colormap;
use crate::constants::{
    DEFAULT_COLORMAP_NAME, DEFAULT_RESOLUTION, MAX_EXPORT_COLORS, MIN_EXPORT_COLORS,
};
use crate::interpolate::sample_positions;

/// Positions per line in the `get_positions` block
const POSITIONS_PER_LINE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceExportOptions {
    /// Default argument of the generated `create_colormap`
    pub name: String,
    /// Length of the sampled ramp
    pub num_colors: usize,
}

impl Default for SourceExportOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_COLORMAP_NAME.to_string(),
            num_colors: DEFAULT_RESOLUTION,
        }
    }
}

impl SourceExportOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Colormap {
    /// Python module with the canonical 512-sample ramp
    pub fn to_source_export(&self, name: &str) -> String {
        let options = SourceExportOptions::named(name);
        let mut out = String::new();
        self.write_source(&mut out, &options);
        out
    }

    /// Python module with a custom ramp length
    pub fn to_source_export_with(&self, options: &SourceExportOptions) -> Result<String> {
        if !(MIN_EXPORT_COLORS..=MAX_EXPORT_COLORS).contains(&options.num_colors) {
            return Err(ColormapError::InvalidSampleCount(options.num_colors));
        }
        let mut out = String::new();
        self.write_source(&mut out, options);
        Ok(out)
    }

    // Writing into a String cannot fail, the fmt results are discarded
    fn write_source(&self, out: &mut String, options: &SourceExportOptions) {
        let stops = self.stops();
        let n = options.num_colors;

        out.push_str("from plotpy.widgets.colormap.widget import EditableColormap\n");
        out.push_str("from qwt import QwtLinearColorMap\n");
        out.push_str("import numpy as np\n\n");

        out.push_str("# Color positions and RGB values\n");
        out.push_str("color_positions = [\n");
        for stop in stops {
            let c = stop.color;
            let _ = writeln!(out, "    {:.6},  # ({}, {}, {})", stop.position, c.r, c.g, c.b);
        }
        out.push_str("]\n\n");

        out.push_str("# RGB color values (0-1 scale)\n");
        out.push_str("rgb_colors = [\n");
        for stop in stops {
            let [r, g, b] = stop.color.to_unit();
            let _ = writeln!(out, "    [{:.6}, {:.6}, {:.6}],", r, g, b);
        }
        out.push_str("]\n\n");

        out.push_str("# Create the colormap\n");
        let _ = writeln!(
            out,
            "def create_colormap(name={}):",
            python_string(&options.name)
        );
        out.push_str("    # Create base colormap with first and last color\n");
        let _ = writeln!(out, "    color1_rgb = {}", self.first().color.packed_argb());
        let _ = writeln!(out, "    color2_rgb = {}", self.last().color.packed_argb());
        out.push_str("    colormap = EditableColormap(color1_rgb, color2_rgb, name=name)\n\n");

        out.push_str("    # Add intermediate color stops\n");
        for stop in &stops[1..stops.len() - 1] {
            let _ = writeln!(
                out,
                "    colormap.addColorStop({:.6}, {})",
                stop.position,
                stop.color.packed_argb()
            );
        }
        out.push_str("\n    return colormap\n\n");

        let _ = writeln!(out, "# Full {} RGB values for the colormap", n);
        out.push_str("def get_rgb_array():\n");
        out.push_str("    return np.array([\n");
        for color in self.sample_colors(n) {
            let _ = writeln!(out, "        [{}, {}, {}],", color.r, color.g, color.b);
        }
        out.push_str("    ])\n\n");

        let _ = writeln!(
            out,
            "# {} position values corresponding to the RGB colors (0.0 to 1.0)",
            n
        );
        out.push_str("def get_positions():\n");
        out.push_str("    return np.array([\n");
        for group in sample_positions(n).chunks(POSITIONS_PER_LINE) {
            let line = group
                .iter()
                .map(|p| format!("{:.6}", p))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "        {},", line);
        }
        out.push_str("    ])\n\n");

        out.push_str("# Example usage\n");
        out.push_str("if __name__ == '__main__':\n");
        out.push_str("    colormap = create_colormap()\n");
        out.push_str("    # Use with PlotPy: item.set_color_map(colormap)\n");
        out.push_str("    \n");
        out.push_str("    # Get the RGB array and positions for custom usage\n");
        out.push_str("    rgb_values = get_rgb_array()\n");
        out.push_str("    positions = get_positions()\n");
        out.push_str("    # These can be used for custom color interpolation\n");
        out.push_str("    # Each rgb_values[i] corresponds to positions[i]\n");
    }
}

/// Single-quoted Python literal
fn python_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
