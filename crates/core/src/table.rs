//! Row models for tabular views of stops and samples

use colormap_types::Rgb;

use crate::colormap::Colormap;

/// One table row: index, position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub position: f64,
    pub color: Rgb,
}

impl TableRow {
    /// Position with four decimals, as shown in the tables
    pub fn position_label(&self) -> String {
        format!("{:.4}", self.position)
    }

    pub fn hex_label(&self) -> String {
        self.color.to_hex()
    }

    /// `(r, g, b)`
    pub fn rgb_label(&self) -> String {
        format!("({}, {}, {})", self.color.r, self.color.g, self.color.b)
    }
}

/// Rows for the stop list view
pub fn stop_rows(colormap: &Colormap) -> Vec<TableRow> {
    colormap
        .stops()
        .iter()
        .enumerate()
        .map(|(index, stop)| TableRow {
            index,
            position: stop.position,
            color: stop.color,
        })
        .collect()
}

/// Rows for the dense sample view
pub fn sample_rows(colormap: &Colormap, n: usize) -> Vec<TableRow> {
    colormap
        .sample(n)
        .into_iter()
        .map(|sample| TableRow {
            index: sample.index,
            position: sample.position,
            color: sample.color,
        })
        .collect()
}
