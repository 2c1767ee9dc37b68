//! Position-to-color lookup and fixed-size sampling

use colormap_types::Rgb;

use crate::colormap::Colormap;

/// One entry of a sampled color ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub position: f64,
    pub color: Rgb,
}

impl Colormap {
    /// Color of the gradient at `position` (clamped to 0.0..=1.0).
    ///
    /// Channels are interpolated linearly between the bracketing stops and
    /// rounded half away from zero.
    pub fn color_at(&self, position: f64) -> Rgb {
        let stops = self.stops();
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };

        let first = self.first();
        if position <= first.position {
            return first.color;
        }
        let last = self.last();
        if position >= last.position {
            return last.color;
        }

        // First stop at or after `position`; never 0 since position > first
        let hi_index = stops.partition_point(|s| s.position < position);
        let lo = &stops[hi_index - 1];
        let hi = &stops[hi_index];

        let range = hi.position - lo.position;
        if range <= 0.0 {
            return lo.color;
        }
        let factor = (position - lo.position) / range;

        Rgb::new(
            lerp_channel(lo.color.r, hi.color.r, factor),
            lerp_channel(lo.color.g, hi.color.g, factor),
            lerp_channel(lo.color.b, hi.color.b, factor),
        )
    }

    /// `n` evenly spaced samples from 0.0 to 1.0 inclusive.
    ///
    /// Counts below 2 are raised to 2 so both ends are always present.
    pub fn sample(&self, n: usize) -> Vec<Sample> {
        sample_positions(n)
            .into_iter()
            .enumerate()
            .map(|(index, position)| Sample {
                index,
                position,
                color: self.color_at(position),
            })
            .collect()
    }

    /// Colors of `sample(n)` without the positions
    pub fn sample_colors(&self, n: usize) -> Vec<Rgb> {
        sample_positions(n)
            .into_iter()
            .map(|position| self.color_at(position))
            .collect()
    }

    /// Ordered (position, color) pairs for building a native linear gradient
    pub fn gradient_stops(&self) -> Vec<(f64, Rgb)> {
        self.stops()
            .iter()
            .map(|stop| (stop.position, stop.color))
            .collect()
    }
}

/// Positions `i / (n - 1)` for `i` in `0..n`; the ends are exactly 0.0 and 1.0
pub fn sample_positions(n: usize) -> Vec<f64> {
    let n = n.max(2);
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}

fn lerp_channel(from: u8, to: u8, factor: f64) -> u8 {
    let from = from as f64;
    let to = to as f64;
    (from + factor * (to - from)).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RESOLUTION;

    fn rainbow() -> Colormap {
        let mut colormap = Colormap::with_endpoints(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255));
        colormap.add_stop(0.25, Rgb::new(255, 255, 0)).unwrap();
        colormap.add_stop(0.5, Rgb::new(0, 255, 0)).unwrap();
        colormap.add_stop(0.75, Rgb::new(0, 255, 255)).unwrap();
        colormap
    }

    #[test]
    fn test_midpoint_of_black_to_white_rounds_up() {
        let colormap = Colormap::new();
        assert_eq!(colormap.color_at(0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_boundaries_return_stop_colors() {
        let colormap = rainbow();
        assert_eq!(colormap.color_at(0.0), colormap.first().color);
        assert_eq!(colormap.color_at(1.0), colormap.last().color);
        assert_eq!(colormap.color_at(-4.0), colormap.first().color);
        assert_eq!(colormap.color_at(12.0), colormap.last().color);
        assert_eq!(colormap.color_at(f64::NAN), colormap.first().color);
    }

    #[test]
    fn test_exact_stop_positions_return_stop_colors() {
        let colormap = rainbow();
        for stop in colormap.stops() {
            assert_eq!(colormap.color_at(stop.position), stop.color);
        }
    }

    #[test]
    fn test_interpolates_within_segment() {
        let colormap = rainbow();
        // Halfway between yellow (0.25) and green (0.5)
        assert_eq!(colormap.color_at(0.375), Rgb::new(128, 255, 0));
        // A fifth of the way from red to yellow
        assert_eq!(colormap.color_at(0.05), Rgb::new(255, 51, 0));
    }

    #[test]
    fn test_zero_width_segment_does_not_divide_by_zero() {
        let mut colormap = Colormap::new();
        colormap.add_stop(0.3, Rgb::new(255, 0, 0)).unwrap();
        colormap.add_stop(0.7, Rgb::new(0, 0, 255)).unwrap();
        colormap.update_stop(1, Some(0.9), None).unwrap();

        assert_eq!(colormap.color_at(0.7), Rgb::new(255, 0, 0));
        assert_eq!(colormap.color_at(0.8), Rgb::new(85, 85, 255));
    }

    #[test]
    fn test_sample_endpoints_and_length() {
        let colormap = rainbow();
        let samples = colormap.sample(DEFAULT_RESOLUTION);
        assert_eq!(samples.len(), 512);
        assert_eq!(samples[0].position, 0.0);
        assert_eq!(samples[511].position, 1.0);
        assert_eq!(samples[0].color, Rgb::new(255, 0, 0));
        assert_eq!(samples[511].color, Rgb::new(0, 0, 255));
        assert!(samples.iter().enumerate().all(|(i, s)| s.index == i));

        for n in [2, 3, 16, 100, 4096] {
            assert_eq!(colormap.sample(n).len(), n);
        }
        assert_eq!(colormap.sample(0).len(), 2);
    }

    #[test]
    fn test_sample_does_not_mutate() {
        let colormap = rainbow();
        let before = colormap.clone();
        let _ = colormap.sample(64);
        assert_eq!(colormap, before);
    }

    #[test]
    fn test_sample_is_shareable_across_threads() {
        let colormap = std::sync::Arc::new(rainbow());
        let expected = colormap.sample_colors(256);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let colormap = colormap.clone();
                std::thread::spawn(move || colormap.sample_colors(256))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_gradient_stops() {
        let colormap = Colormap::new();
        assert_eq!(
            colormap.gradient_stops(),
            vec![(0.0, Rgb::BLACK), (1.0, Rgb::WHITE)]
        );
    }
}
