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

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    /// Position of the owning site in `VoronoiDiagram::sites` (Voronoi cells).
    pub site: Option<usize>,
    pub outer: Option<usize>,
    pub inner: Option<usize>,
    pub unbounded: bool,
    /// Triangle label in the Delaunay mesh; zero for Voronoi faces.
    pub index: usize,
}

impl Face {
    pub fn for_site(site: usize) -> Self {
        Self {
            site: Some(site),
            ..Self::default()
        }
    }

    pub fn triangle(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn unbounded(index: usize) -> Self {
        Self {
            unbounded: true,
            index,
            ..Self::default()
        }
    }

    /// Any half-edge on this face's boundary.
    pub fn boundary_edge(&self) -> Option<usize> {
        self.outer.or(self.inner)
    }
}
