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

use crate::diagram::Site;
use crate::geometry::{Point2, Vector2, breakpoint_x, parabola_y};

/// Bisector ray traced by a breakpoint of the beachline.
///
/// `left` and `right` are the sites whose arcs lie left and right of the
/// breakpoint; the ray heads in the direction the breakpoint moves as the
/// sweep descends.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub start: Point2<f64>,
    pub end: Option<Point2<f64>>,
    pub left: usize,
    pub right: usize,
    pub left_focus: Point2<f64>,
    pub right_focus: Point2<f64>,
    pub direction: Vector2<f64>,
    /// Supporting line `y = slope * x + intercept` (unused when vertical).
    pub slope: f64,
    pub intercept: f64,
    pub vertical: bool,
    /// Opposite ray on the same bisector line.
    pub neighbour: Option<usize>,
    /// Set on the downward rays between first-row sites, which trace their
    /// bisector from `y = +inf` and so lie ahead of every point on it.
    pub from_infinity: bool,
    /// Voronoi half-edge bounding the left site's cell along this bisector.
    pub half_edge: Option<usize>,
    /// Delaunay half-edge crossing this bisector, awaiting its twin.
    pub tri_half_edge: Option<usize>,
}

impl Edge {
    pub fn new(start: Point2<f64>, left: usize, right: usize, sites: &[Site]) -> Self {
        let l = sites[left].point;
        let r = sites[right].point;

        let slope = (r.x - l.x) / (l.y - r.y);
        Self {
            start,
            end: None,
            left,
            right,
            left_focus: l,
            right_focus: r,
            direction: Vector2::new(r.y - l.y, l.x - r.x),
            slope,
            intercept: start.y - slope * start.x,
            vertical: l.y == r.y,
            neighbour: None,
            from_infinity: false,
            half_edge: None,
            tri_half_edge: None,
        }
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }

    /// `true` unless `p` lies behind `start` along `direction`.
    ///
    /// Points a rounding error behind `start` still count as ahead.
    pub fn is_ahead(&self, p: &Point2<f64>) -> bool {
        if self.from_infinity {
            return true;
        }
        let offset = p - &self.start;
        let scale = 1.0 + self.start.x.abs().max(self.start.y.abs());
        offset.dot(&self.direction) >= -1e-9 * scale * self.direction.norm()
    }

    /// Moves the origin of the ray to `start`, which must lie on its line.
    pub fn restart(&mut self, start: Point2<f64>) {
        self.start = start;
        self.intercept = start.y - self.slope * start.x;
    }

    /// Meeting point of two rays, if both reach it going forward.
    pub fn intersect(&self, other: &Edge) -> Option<Point2<f64>> {
        if self.slope == other.slope || (self.vertical && other.vertical) {
            return None;
        }

        let p = if other.vertical {
            Point2::new(other.start.x, self.y_at(other.start.x))
        } else if self.vertical {
            Point2::new(self.start.x, other.y_at(self.start.x))
        } else {
            let x = (other.intercept - self.intercept) / (self.slope - other.slope);
            Point2::new(x, self.y_at(x))
        };

        (self.is_ahead(&p) && other.is_ahead(&p)).then_some(p)
    }

    /// Current position of the breakpoint for a sweep line at `sweep_y`.
    pub fn render_point(&self, sweep_y: f64) -> Point2<f64> {
        let x = breakpoint_x(&self.left_focus, &self.right_focus, sweep_y);
        Point2::new(x, parabola_y(x, sweep_y, &self.left_focus))
    }

    /// `start + extension * direction`.
    pub fn extended_end(&self, extension: f64) -> Point2<f64> {
        self.start.offset(&self.direction, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(points: &[(f64, f64)]) -> Vec<Site> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Site::new(i + 1, Point2::new(x, y)))
            .collect()
    }

    #[test]
    fn bisector_geometry() {
        let s = sites(&[(2.0, 4.0), (0.0, 0.0)]);
        let start = Point2::new(0.0, 2.5);
        let el = Edge::new(start, 0, 1, &s);
        let er = Edge::new(start, 1, 0, &s);

        assert!(!el.vertical);
        assert_eq!(el.direction, Vector2::new(-4.0, 2.0));
        assert_eq!(er.direction, -el.direction);
        assert!((el.y_at(1.0) - 2.0).abs() < 1e-12);
        assert!((el.x_at(2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_heights_make_vertical_rays() {
        let s = sites(&[(0.0, 0.0), (4.0, 0.0)]);
        let e = Edge::new(Point2::new(2.0, 0.0), 0, 1, &s);
        assert!(e.vertical);
        assert_eq!(e.direction, Vector2::new(0.0, -4.0));
        assert_eq!(e.render_point(-3.0).x, 2.0);
    }

    #[test]
    fn rays_meet_ahead_only() {
        let s = sites(&[(2.0, 4.0), (0.0, 0.0), (4.0, 0.0)]);
        let er = Edge::new(Point2::new(0.0, 2.5), 1, 0, &s);
        let el2 = Edge::new(Point2::new(4.0, 2.5), 0, 2, &s);

        let p = er.intersect(&el2).unwrap();
        assert!((p.x - 2.0).abs() < 1e-12);
        assert!((p.y - 1.5).abs() < 1e-12);

        // The opposite rays point away from each other.
        let el = Edge::new(Point2::new(0.0, 2.5), 0, 1, &s);
        let er2 = Edge::new(Point2::new(4.0, 2.5), 2, 0, &s);
        assert!(el.intersect(&er2).is_none());
    }

    #[test]
    fn parallel_rays_never_meet() {
        let s = sites(&[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)]);
        let a = Edge::new(Point2::new(2.0, 0.0), 0, 1, &s);
        let b = Edge::new(Point2::new(6.0, 0.0), 1, 2, &s);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn vertical_and_slanted_meet() {
        let s = sites(&[(0.0, 0.0), (4.0, 0.0), (2.0, 4.0)]);
        let down = Edge::new(Point2::new(2.0, 3.0), 0, 1, &s);
        // Breakpoint between (4,0) and (2,4), heading down-left.
        let slanted = Edge::new(Point2::new(4.0, 2.5), 2, 1, &s);
        let p = down.intersect(&slanted).unwrap();
        assert_eq!(p.x, 2.0);
        assert!((p.y - 1.5).abs() < 1e-12);
        assert!(slanted.intersect(&down).is_some());

        let below = Edge::new(Point2::new(2.0, 0.0), 0, 1, &s);
        assert!(below.intersect(&slanted).is_none());
    }

    #[test]
    fn rounding_noise_counts_as_ahead() {
        let s = sites(&[(0.0, 0.0), (4.0, 0.0)]);
        let e = Edge::new(Point2::new(2.0, 3.0), 0, 1, &s);
        assert!(e.is_ahead(&Point2::new(2.0, 3.0 + 1e-12)));
        assert!(!e.is_ahead(&Point2::new(2.0, 3.1)));
    }

    #[test]
    fn rays_from_infinity_accept_any_point() {
        let s = sites(&[(0.0, 0.0), (4.0, 0.0)]);
        let mut e = Edge::new(Point2::new(2.0, 0.0), 0, 1, &s);
        e.from_infinity = true;
        assert!(e.is_ahead(&Point2::new(2.0, 50.0)));
    }

    #[test]
    fn restart_keeps_the_supporting_line() {
        let s = sites(&[(2.0, 4.0), (0.0, 0.0)]);
        let mut e = Edge::new(Point2::new(0.0, 2.5), 0, 1, &s);
        e.restart(Point2::new(2.0, 1.5));
        assert_eq!(e.start, Point2::new(2.0, 1.5));
        assert!((e.y_at(0.0) - 2.5).abs() < 1e-12);
    }
}
