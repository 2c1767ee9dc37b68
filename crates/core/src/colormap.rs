//! Ordered color stop collection and its mutation rules

use colormap_types::{ColorStop, ColormapError, Result, Rgb};
use log::{debug, trace};
use std::cmp::Ordering;

use crate::constants::POSITION_TOLERANCE;

/// A piecewise-linear gradient defined by an ordered list of color stops.
///
/// The first stop always sits at 0.0 and the last at 1.0. Both are pinned:
/// their color can change but they can neither move nor be removed. Every
/// stop in between lies between its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Black at 0.0, white at 1.0
    pub fn new() -> Self {
        Self::with_endpoints(Rgb::BLACK, Rgb::WHITE)
    }

    /// Two-stop colormap with custom boundary colors
    pub fn with_endpoints(first: Rgb, last: Rgb) -> Self {
        Self {
            stops: vec![ColorStop::new(0.0, first), ColorStop::new(1.0, last)],
        }
    }

    /// Build a colormap from a stop list that already satisfies the invariants.
    ///
    /// The list is checked but not re-sorted.
    pub fn from_stops(stops: Vec<ColorStop>) -> Result<Self> {
        let colormap = Self { stops };
        colormap.validate()?;
        Ok(colormap)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: a colormap holds at least two stops
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColorStop> {
        self.stops.get(index)
    }

    pub fn first(&self) -> &ColorStop {
        &self.stops[0]
    }

    pub fn last(&self) -> &ColorStop {
        &self.stops[self.last_index()]
    }

    pub fn last_index(&self) -> usize {
        self.stops.len() - 1
    }

    pub fn is_boundary(&self, index: usize) -> bool {
        index == 0 || index == self.last_index()
    }

    /// Insert a stop and re-sort. Returns the index the stop ended up at.
    pub fn add_stop(&mut self, position: f64, color: Rgb) -> Result<usize> {
        if !position.is_finite() || !(0.0..=1.0).contains(&position) {
            return Err(ColormapError::PositionOutOfRange(position));
        }

        if let Some(existing) = self
            .stops
            .iter()
            .find(|s| (s.position - position).abs() < POSITION_TOLERANCE)
        {
            return Err(ColormapError::PositionOccupied {
                position,
                existing: existing.position,
            });
        }

        self.stops.push(ColorStop::new(position, color));
        self.sort();

        // Positions are unique beyond the tolerance, so exact match is safe
        let index = self
            .stops
            .iter()
            .position(|s| s.position == position)
            .unwrap_or(0);
        debug!("Added stop {} at {:.4} ({})", index, position, color);
        Ok(index)
    }

    /// Insert a stop colored with the gradient's current color at `position`
    pub fn add_interpolated_stop(&mut self, position: f64) -> Result<usize> {
        let color = self.color_at(position);
        self.add_stop(position, color)
    }

    /// Remove a non-boundary stop and return it
    pub fn remove_stop(&mut self, index: usize) -> Result<ColorStop> {
        self.check_index(index)?;
        if self.is_boundary(index) {
            return Err(ColormapError::BoundaryImmutable(index));
        }

        let removed = self.stops.remove(index);
        debug!("Removed stop {} at {:.4}", index, removed.position);
        Ok(removed)
    }

    /// Recolor and/or move a stop.
    ///
    /// The color is applied first and stays applied even when the move is
    /// rejected for a boundary stop. A new position is clamped between the
    /// neighboring stops, so the order never changes.
    pub fn update_stop(
        &mut self,
        index: usize,
        position: Option<f64>,
        color: Option<Rgb>,
    ) -> Result<()> {
        self.check_index(index)?;

        if let Some(color) = color {
            self.stops[index].color = color;
            trace!("Stop {} recolored to {}", index, color);
        }

        let Some(position) = position else {
            return Ok(());
        };

        if self.is_boundary(index) {
            return Err(ColormapError::BoundaryImmutable(index));
        }

        let lower = self.stops[index - 1].position;
        let upper = self.stops[index + 1].position;
        // NaN would poison the ordering, keep the stop where it is
        let clamped = if position.is_nan() {
            self.stops[index].position
        } else {
            position.clamp(lower, upper)
        };

        if clamped != position {
            trace!(
                "Stop {} move to {:.4} clamped to {:.4}",
                index,
                position,
                clamped
            );
        }
        self.stops[index].position = clamped;
        Ok(())
    }

    /// Index of the stop closest to `position`
    pub fn nearest_stop(&self, position: f64) -> usize {
        self.stops
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.position - position).abs();
                let db = (b.position - position).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Midpoint of the widest gap between adjacent stops
    pub fn suggest_new_stop_position(&self) -> f64 {
        self.stops
            .windows(2)
            .map(|pair| (pair[1].position - pair[0].position, pair))
            .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(_, pair)| (pair[0].position + pair[1].position) / 2.0)
            .unwrap_or(0.5)
    }

    /// Check every structural invariant.
    ///
    /// Equal neighboring positions are allowed: a clamped move can land a stop
    /// exactly on its neighbor.
    pub fn validate(&self) -> Result<()> {
        if self.stops.len() < 2 {
            return Err(ColormapError::InvalidStops(format!(
                "expected at least 2 stops, found {}",
                self.stops.len()
            )));
        }

        if let Some((i, stop)) = self
            .stops
            .iter()
            .enumerate()
            .find(|(_, s)| !s.position.is_finite() || !(0.0..=1.0).contains(&s.position))
        {
            return Err(ColormapError::InvalidStops(format!(
                "stop {} has position {} outside 0.0 to 1.0",
                i, stop.position
            )));
        }

        if self.first().position != 0.0 {
            return Err(ColormapError::InvalidStops(format!(
                "first stop must be at 0.0, found {}",
                self.first().position
            )));
        }
        if self.last().position != 1.0 {
            return Err(ColormapError::InvalidStops(format!(
                "last stop must be at 1.0, found {}",
                self.last().position
            )));
        }

        if let Some(i) = self
            .stops
            .windows(2)
            .position(|pair| pair[0].position > pair[1].position)
        {
            return Err(ColormapError::InvalidStops(format!(
                "stops {} and {} are out of order",
                i,
                i + 1
            )));
        }

        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.stops.len() {
            return Err(ColormapError::IndexOutOfRange {
                index,
                len: self.stops.len(),
            });
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.stops.sort_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(Ordering::Equal)
        });
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::new()
    }
}
