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

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex<T> {
    /// Label used by the textual export (`v<index>` / `b<index>`).
    pub index: usize,
    pub point: Point2<T>,
    pub half_edge: Option<usize>, // one outgoing half-edge
    /// Vertex of the padded clipping rectangle.
    pub on_boundary: bool,
}

impl<T> Vertex<T> {
    pub fn new(index: usize, point: Point2<T>) -> Self {
        Self {
            index,
            point,
            half_edge: None,
            on_boundary: false,
        }
    }

    pub fn boundary(index: usize, point: Point2<T>) -> Self {
        Self {
            on_boundary: true,
            ..Self::new(index, point)
        }
    }
}
