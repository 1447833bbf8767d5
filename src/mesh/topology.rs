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

use crate::error::{Result, VoronoiError};
use crate::mesh::dcel::Dcel;

impl<T: Float> Dcel<T> {
    /// Half-edges met following `next` from `start` until it comes back.
    ///
    /// `None` when the chain breaks, reaches a removed half-edge, or does
    /// not return within as many steps as there are half-edges.
    pub fn face_cycle(&self, start: usize) -> Option<Vec<usize>> {
        let mut cycle = vec![start];
        let mut cur = self.half_edges[start].next?;
        while cur != start {
            if self.half_edges[cur].removed || cycle.len() > self.half_edges.len() {
                return None;
            }
            cycle.push(cur);
            cur = self.half_edges[cur].next?;
        }
        Some(cycle)
    }

    pub fn is_closed_cycle(&self, start: usize) -> bool {
        self.face_cycle(start).is_some()
    }

    /// Boundary cycle of face `f`, from its outer or inner component.
    pub fn face_boundary(&self, f: usize) -> Option<Vec<usize>> {
        self.face_cycle(self.faces[f].boundary_edge()?)
    }

    /// Number of live half-edges leaving vertex `v`.
    pub fn vertex_degree(&self, v: usize) -> usize {
        self.live_half_edges()
            .filter(|(_, he)| he.origin == Some(v))
            .count()
    }

    /// Checks the pairwise link invariants on every live half-edge:
    /// `twin(twin(e)) == e`, `prev(next(e)) == e`, `next(prev(e)) == e`,
    /// and that a successor starts where its predecessor ends.
    pub fn validate_links(&self) -> Result<()> {
        for (i, he) in self.live_half_edges() {
            if let Some(t) = he.twin {
                if self.half_edges[t].twin != Some(i) {
                    return Err(broken(i, "twin of twin is not itself"));
                }
            }
            if let Some(n) = he.next {
                if self.half_edges[n].prev != Some(i) {
                    return Err(broken(i, "prev of next is not itself"));
                }
                let next_origin = self.half_edges[n].origin;
                if he.dest.is_some() && next_origin.is_some() && he.dest != next_origin {
                    return Err(broken(i, "next does not start at dest"));
                }
            }
            if let Some(p) = he.prev {
                if self.half_edges[p].next != Some(i) {
                    return Err(broken(i, "next of prev is not itself"));
                }
            }
        }
        Ok(())
    }

    /// Full check for a finished mesh: links as in [`Self::validate_links`],
    /// and every live half-edge has a twin, a face, both endpoints, and
    /// lies on a closed cycle of half-edges sharing its face.
    pub fn validate_closed(&self) -> Result<()> {
        self.validate_links()?;
        for (i, he) in self.live_half_edges() {
            if he.twin.is_none() {
                return Err(broken(i, "missing twin"));
            }
            if he.origin.is_none() || he.dest.is_none() {
                return Err(broken(i, "missing endpoint"));
            }
            let Some(face) = he.face else {
                return Err(broken(i, "missing face"));
            };
            let Some(cycle) = self.face_cycle(i) else {
                return Err(broken(i, "open cycle"));
            };
            if cycle.iter().any(|&c| self.half_edges[c].face != Some(face)) {
                return Err(broken(i, "cycle mixes faces"));
            }
        }
        Ok(())
    }
}

fn broken(half_edge: usize, reason: &'static str) -> VoronoiError {
    VoronoiError::BrokenTopology { half_edge, reason }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Point2;
    use crate::mesh::{Dcel, Face, Vertex};

    fn make_square_loop(close: bool) -> Dcel<f64> {
        let mut dcel = Dcel::new();
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        for (i, &(x, y)) in corners.iter().enumerate() {
            dcel.add_vertex(Vertex::new(i + 1, Point2::new(x, y)));
        }
        let inside = dcel.add_face(Face::for_site(0));
        let outside = dcel.add_face(Face::unbounded(0));

        let mut inner = Vec::new();
        let mut outer = Vec::new();
        for i in 0..4 {
            let (h, t) = dcel.add_edge_pair(Some(i), Some((i + 1) % 4));
            dcel.half_edges[h].face = Some(inside);
            dcel.half_edges[t].face = Some(outside);
            inner.push(h);
            outer.push(t);
        }
        let last = if close { 4 } else { 3 };
        for i in 0..last {
            dcel.link(inner[i], inner[(i + 1) % 4]);
            dcel.link(outer[(i + 1) % 4], outer[i]);
        }
        dcel.faces[inside].outer = Some(inner[0]);
        dcel.faces[outside].inner = Some(outer[0]);
        dcel
    }

    #[test]
    fn closed_square_validates() {
        let dcel = make_square_loop(true);
        assert!(dcel.validate_closed().is_ok());
        assert_eq!(dcel.face_boundary(0).map(|c| c.len()), Some(4));
        assert_eq!(dcel.face_boundary(1).map(|c| c.len()), Some(4));
        // Each corner starts one inner and one outer half-edge.
        for v in 0..4 {
            assert_eq!(dcel.vertex_degree(v), 2);
        }
    }

    #[test]
    fn open_chain_is_reported() {
        let dcel = make_square_loop(false);
        assert!(dcel.validate_links().is_ok());
        assert!(!dcel.is_closed_cycle(0));
        assert!(dcel.validate_closed().is_err());
    }

    #[test]
    fn broken_twin_is_reported() {
        let mut dcel = make_square_loop(true);
        dcel.half_edges[0].twin = Some(3);
        assert!(matches!(
            dcel.validate_links(),
            Err(crate::error::VoronoiError::BrokenTopology { half_edge: 0, .. })
        ));
    }
}
