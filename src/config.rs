// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

/// Tunables of a sweep.
///
/// `box_margin`, `ray_extension` and `step_tolerance` are absolute and suit
/// inputs with coordinates roughly in the `0..1000` range. The two
/// tolerances used while sweeping are relative to the diagonal of the
/// input sites' extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Padding added on every side of the observed extent before clipping.
    pub box_margin: f64,
    /// Remaining rays get `end = start + ray_extension * direction`.
    pub ray_extension: f64,
    /// Sites within `first_row_tolerance * extent` below the first site are
    /// treated as lying on the first row.
    pub first_row_tolerance: f64,
    /// Circle events and Voronoi vertices closer than
    /// `merge_tolerance * max(extent, 1)` are taken to be the same point.
    pub merge_tolerance: f64,
    /// `continues(h)` steps only once `h` is this far below the next event.
    pub step_tolerance: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            box_margin: 5.0,
            ray_extension: 10.0,
            first_row_tolerance: 1e-9,
            merge_tolerance: 1e-9,
            step_tolerance: 0.005,
        }
    }
}

impl SweepConfig {
    pub fn with_box_margin(mut self, margin: f64) -> Self {
        self.box_margin = margin;
        self
    }

    pub fn with_ray_extension(mut self, extension: f64) -> Self {
        self.ray_extension = extension;
        self
    }

    pub fn with_first_row_tolerance(mut self, tolerance: f64) -> Self {
        self.first_row_tolerance = tolerance;
        self
    }

    pub fn with_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    pub fn with_step_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_override_defaults() {
        let config = SweepConfig::default()
            .with_box_margin(1.0)
            .with_ray_extension(2.0)
            .with_first_row_tolerance(0.0)
            .with_merge_tolerance(1e-6)
            .with_step_tolerance(0.5);
        assert_eq!(config.box_margin, 1.0);
        assert_eq!(config.ray_extension, 2.0);
        assert_eq!(config.first_row_tolerance, 0.0);
        assert_eq!(config.merge_tolerance, 1e-6);
        assert_eq!(config.step_tolerance, 0.5);
        assert_ne!(config, SweepConfig::default());
    }
}
