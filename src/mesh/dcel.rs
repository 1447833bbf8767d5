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
use crate::mesh::{face::Face, half_edge::HalfEdge, vertex::Vertex};

/// Doubly-connected edge list stored in three index arenas.
#[derive(Debug, Clone)]
pub struct Dcel<T> {
    pub vertices: Vec<Vertex<T>>,
    pub faces: Vec<Face>,
    pub half_edges: Vec<HalfEdge>,
}

impl<T: Float> Default for Dcel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Dcel<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            half_edges: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex<T>) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(vertex);
        idx
    }

    pub fn add_face(&mut self, face: Face) -> usize {
        let idx = self.faces.len();
        self.faces.push(face);
        idx
    }

    pub fn add_half_edge(&mut self, half_edge: HalfEdge) -> usize {
        let idx = self.half_edges.len();
        self.half_edges.push(half_edge);
        idx
    }

    /// Pushes `origin -> dest` and its twin `dest -> origin`; returns both
    /// indices in that order.
    pub fn add_edge_pair(&mut self, origin: Option<usize>, dest: Option<usize>) -> (usize, usize) {
        let he = self.add_half_edge(HalfEdge::new(origin, dest));
        let twin = self.add_half_edge(HalfEdge::new(dest, origin));
        self.set_twins(he, twin);
        (he, twin)
    }

    pub fn set_twins(&mut self, a: usize, b: usize) {
        self.half_edges[a].twin = Some(b);
        self.half_edges[b].twin = Some(a);
    }

    /// `a.next = b` and `b.prev = a`.
    pub fn link(&mut self, a: usize, b: usize) {
        self.half_edges[a].next = Some(b);
        self.half_edges[b].prev = Some(a);
    }

    /// Moves both endpoints of the edge through `he` so that `he` starts at `v`.
    pub fn set_origin(&mut self, he: usize, v: usize) {
        self.half_edges[he].origin = Some(v);
        if let Some(t) = self.half_edges[he].twin {
            self.half_edges[t].dest = Some(v);
        }
    }

    /// Records `he` as the outer component of its face unless one is known.
    pub fn claim_outer(&mut self, he: usize) {
        if let Some(f) = self.half_edges[he].face {
            self.faces[f].outer.get_or_insert(he);
        }
    }

    /// Records `he` as the incident edge of its origin unless one is known.
    pub fn claim_origin(&mut self, he: usize) {
        if let Some(v) = self.half_edges[he].origin {
            self.vertices[v].half_edge.get_or_insert(he);
        }
    }

    pub fn twin(&self, he: usize) -> Option<usize> {
        self.half_edges[he].twin
    }

    pub fn next(&self, he: usize) -> Option<usize> {
        self.half_edges[he].next
    }

    pub fn prev(&self, he: usize) -> Option<usize> {
        self.half_edges[he].prev
    }

    pub fn origin_point(&self, he: usize) -> Option<Point2<T>> {
        self.half_edges[he].origin.map(|v| self.vertices[v].point)
    }

    pub fn dest_point(&self, he: usize) -> Option<Point2<T>> {
        self.half_edges[he].dest.map(|v| self.vertices[v].point)
    }

    pub fn live_half_edges(&self) -> impl Iterator<Item = (usize, &HalfEdge)> + '_ {
        self.half_edges.iter().enumerate().filter(|(_, he)| !he.removed)
    }

    pub fn live_half_edge_count(&self) -> usize {
        self.live_half_edges().count()
    }

    /// Vertices that are not on the clipping rectangle.
    pub fn interior_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| !v.on_boundary).count()
    }

    /// Unlinks `he` from its cycle and marks it removed. Face and vertex
    /// references to it are moved to a neighbour or cleared.
    pub fn remove_half_edge(&mut self, he: usize) {
        let next = self.half_edges[he].next;
        let prev = self.half_edges[he].prev;
        if let Some(n) = next {
            self.half_edges[n].prev = prev;
        }
        if let Some(p) = prev {
            self.half_edges[p].next = next;
        }

        let replacement = next.filter(|&n| n != he);
        for face in &mut self.faces {
            if face.outer == Some(he) {
                face.outer = replacement;
            }
            if face.inner == Some(he) {
                face.inner = replacement;
            }
        }
        for vertex in &mut self.vertices {
            if vertex.half_edge == Some(he) {
                vertex.half_edge = None;
            }
        }

        let h = &mut self.half_edges[he];
        h.twin = None;
        h.removed = true;
    }

    /// Gives every vertex without a live incident half-edge the first live
    /// half-edge leaving it, if any.
    pub fn repair_vertex_edges(&mut self) {
        for v in 0..self.vertices.len() {
            let stale = match self.vertices[v].half_edge {
                Some(h) => self.half_edges[h].removed,
                None => true,
            };
            if stale {
                let leaving = self
                    .live_half_edges()
                    .find(|(_, he)| he.origin == Some(v))
                    .map(|(i, _)| i);
                self.vertices[v].half_edge = leaving;
            }
        }
    }
}
