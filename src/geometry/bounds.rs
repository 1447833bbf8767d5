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

use num_traits::Float;

use crate::geometry::Point2;

/// Running axis-aligned extent of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T: Float> Bounds<T> {
    /// Bounds containing nothing; the first `include` snaps to that point.
    pub fn empty() -> Self {
        Self {
            min_x: T::max_value(),
            min_y: T::max_value(),
            max_x: T::min_value(),
            max_y: T::min_value(),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        T: 'a,
        I: IntoIterator<Item = &'a Point2<T>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include(p);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn include(&mut self, point: &Point2<T>) {
        if point.y < self.min_y {
            self.min_y = point.y;
        }
        if point.y > self.max_y {
            self.max_y = point.y;
        }
        if point.x < self.min_x {
            self.min_x = point.x;
        }
        if point.x > self.max_x {
            self.max_x = point.x;
        }
    }

    pub fn contains(&self, point: &Point2<T>) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Copy grown by `margin` on every side.
    pub fn padded(&self, margin: T) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Corners in counter-clockwise order starting at `(min_x, min_y)`.
    pub fn corners(&self) -> [Point2<T>; 4] {
        [
            Point2 { x: self.min_x, y: self.min_y },
            Point2 { x: self.max_x, y: self.min_y },
            Point2 { x: self.max_x, y: self.max_y },
            Point2 { x: self.min_x, y: self.max_y },
        ]
    }

    /// `true` when `point` lies on one of the four sides (within `eps`).
    pub fn on_boundary(&self, point: &Point2<T>, eps: T) -> bool {
        let near = |a: T, b: T| (a - b).abs() <= eps;
        let in_x = point.x >= self.min_x - eps && point.x <= self.max_x + eps;
        let in_y = point.y >= self.min_y - eps && point.y <= self.max_y + eps;
        (in_y && (near(point.x, self.min_x) || near(point.x, self.max_x)))
            || (in_x && (near(point.y, self.min_y) || near(point.y, self.max_y)))
    }
}

/// Mapping from plane coordinates into the `[-1, 1]` range of a drawing
/// surface. Passed explicitly by whoever renders a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds<T> {
    pub left: T,
    pub right: T,
    pub lower: T,
    pub upper: T,
}

impl<T: Float> ViewBounds<T> {
    pub fn new(left: T, right: T, lower: T, upper: T) -> Self {
        Self {
            left,
            right,
            lower,
            upper,
        }
    }

    /// View framing `bounds` with `margin` on every side.
    pub fn framing(bounds: &Bounds<T>, margin: T) -> Self {
        let padded = bounds.padded(margin);
        Self::new(padded.min_x, padded.max_x, padded.min_y, padded.max_y)
    }

    pub fn to_screen(&self, point: &Point2<T>) -> (T, T) {
        let two = T::one() + T::one();
        let x = (point.x - self.left) * two / (self.right - self.left) - T::one();
        let y = (point.y - self.lower) * two / (self.upper - self.lower) - T::one();
        (x, y)
    }
}
