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

use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Position of the site in `VoronoiDiagram::sites`.
    Site(usize),
    /// Id of the circle event in the queue's side table.
    Circle(usize),
}

/// Queue entry. `point` is the site itself, or the lowest point of the
/// circle for circle events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub point: Point2<f64>,
    pub kind: EventKind,
}

impl Event {
    pub fn site(point: Point2<f64>, site: usize) -> Self {
        Self {
            point,
            kind: EventKind::Site(site),
        }
    }

    pub fn circle(point: Point2<f64>, id: usize) -> Self {
        Self {
            point,
            kind: EventKind::Circle(id),
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.kind, EventKind::Circle(_))
    }

    /// Processing order: higher `y` first; at equal `y` circle events before
    /// site events, then smaller `x` first.
    pub fn is_greater(&self, other: &Event) -> bool {
        let same_height = self.point.y == other.point.y;
        self.point.y > other.point.y
            || (same_height && self.is_circle() && !other.is_circle())
            || (same_height && self.point.x <= other.point.x)
    }
}

/// A pending arc disappearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEvent {
    /// Bottom of the circle through the three foci; the sweep fires here.
    pub point: Point2<f64>,
    pub radius: f64,
    /// Leaf of the beachline that vanishes.
    pub arc: usize,
    pub deleted: bool,
}

impl CircleEvent {
    /// Center of the circle, i.e. the Voronoi vertex this event creates.
    pub fn center(&self) -> Point2<f64> {
        Point2 {
            x: self.point.x,
            y: self.point.y + self.radius,
        }
    }
}
