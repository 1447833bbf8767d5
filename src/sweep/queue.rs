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
use crate::sweep::event::{CircleEvent, Event};

/// Binary max-heap over [`Event::is_greater`].
///
/// Circle events are kept in a side table so they can be invalidated in
/// place; invalidated entries stay in the heap and are popped like any other.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    elements: Vec<Event>,
    circles: Vec<CircleEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.elements.push(event);
        self.percolate_up(self.elements.len() - 1);
    }

    pub fn push_site(&mut self, point: Point2<f64>, site: usize) {
        self.push(Event::site(point, site));
    }

    /// Queues a circle event with lowest point `point` for `arc`; returns its id.
    pub fn push_circle(&mut self, point: Point2<f64>, radius: f64, arc: usize) -> usize {
        let id = self.circles.len();
        self.circles.push(CircleEvent {
            point,
            radius,
            arc,
            deleted: false,
        });
        self.push(Event::circle(point, id));
        id
    }

    pub fn peek(&self) -> Option<&Event> {
        self.elements.first()
    }

    pub fn pop(&mut self) -> Option<Event> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let top = self.elements.pop();
        self.percolate_down(0);
        top
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn circle(&self, id: usize) -> &CircleEvent {
        &self.circles[id]
    }

    pub fn invalidate(&mut self, id: usize) {
        self.circles[id].deleted = true;
    }

    pub fn is_deleted(&self, id: usize) -> bool {
        self.circles[id].deleted
    }

    fn percolate_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.elements[index].is_greater(&self.elements[parent]) {
                break;
            }
            self.elements.swap(index, parent);
            index = parent;
        }
    }

    fn percolate_down(&mut self, mut index: usize) {
        let len = self.elements.len();
        let mut child = 2 * index + 1;
        while child < len {
            if child + 1 < len && self.elements[child + 1].is_greater(&self.elements[child]) {
                child += 1;
            }
            if self.elements[index].is_greater(&self.elements[child]) {
                return;
            }
            self.elements.swap(index, child);
            index = child;
            child = 2 * index + 1;
        }
    }
}
