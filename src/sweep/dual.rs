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

//! Half-edge bookkeeping shared by the Voronoi and Delaunay meshes: every
//! circle event adds one Voronoi vertex and one Delaunay triangle, and the
//! two are stitched to the bisector rays they share.

use tracing::warn;

use crate::kernel::is_left_turn;
use crate::mesh::{Dcel, Face, HalfEdge};
use crate::sweep::engine::SweepEngine;

impl SweepEngine {
    fn site_face(&self, site: usize) -> Option<usize> {
        self.diagram.sites[site].face
    }

    /// Returns `(out, back)` where `out` leaves `vn` along `edge` and `back`
    /// arrives at `vn`. Reuses the half-edge recorded on the ray if its far
    /// end created one already.
    fn attach_voronoi_edge(&mut self, edge: usize, vn: usize) -> (usize, usize) {
        if let Some(out) = self.edges[edge].half_edge {
            if let Some(back) = self.diagram.voronoi.twin(out) {
                self.diagram.voronoi.set_origin(out, vn);
                return (out, back);
            }
        }

        let left_face = self.site_face(self.edges[edge].left);
        let right_face = self.site_face(self.edges[edge].right);
        let voronoi = &mut self.diagram.voronoi;
        let (out, back) = voronoi.add_edge_pair(Some(vn), None);
        voronoi.half_edges[out].face = left_face;
        voronoi.half_edges[back].face = right_face;
        voronoi.claim_outer(out);
        voronoi.claim_outer(back);

        self.edges[edge].half_edge = Some(out);
        if let Some(nb) = self.edges[edge].neighbour {
            self.edges[nb].half_edge = Some(back);
        }
        (out, back)
    }

    /// Joins the two converging rays and the newly started one at `vn`.
    pub(crate) fn emit_voronoi_vertex(&mut self, vn: usize, left_edge: usize, right_edge: usize, new_edge: usize) {
        let (vn_v1, v1_vn) = self.attach_voronoi_edge(left_edge, vn);
        let (vn_v2, v2_vn) = self.attach_voronoi_edge(right_edge, vn);

        let outer_face = self.site_face(self.edges[left_edge].left);
        let inner_face = self.site_face(self.edges[right_edge].right);
        let voronoi = &mut self.diagram.voronoi;

        let (v3_vn, vn_v3) = voronoi.add_edge_pair(None, Some(vn));
        voronoi.half_edges[vn_v3].face = inner_face;
        voronoi.half_edges[v3_vn].face = outer_face;
        voronoi.claim_outer(vn_v3);
        voronoi.claim_outer(v3_vn);

        voronoi.link(v1_vn, vn_v2);
        voronoi.link(v2_vn, vn_v3);
        voronoi.link(v3_vn, vn_v1);
        for he in [v1_vn, v2_vn, vn_v3] {
            voronoi.claim_origin(he);
        }

        self.edges[new_edge].half_edge = Some(v3_vn);
    }

    /// Adds the Delaunay triangle of the disappearing arc's site and its two
    /// neighbours, counter-clockwise.
    pub(crate) fn emit_triangle(&mut self, [arc_site, left_site, right_site]: [usize; 3], left_edge: usize, right_edge: usize, new_edge: usize) {
        let sites = &self.diagram.sites;
        let (Some(a), Some(l), Some(r)) = (sites[arc_site].tri_vertex, sites[left_site].tri_vertex, sites[right_site].tri_vertex) else {
            warn!(arc_site, left_site, right_site, "triangle corner without a delaunay vertex");
            return;
        };

        let pa = sites[arc_site].point;
        let pl = sites[left_site].point;
        let pr = sites[right_site].point;
        let left_turn = is_left_turn(&pa, &pr, &pl);
        let (v1, v2) = if left_turn { (r, l) } else { (l, r) };

        self.triangle_count += 1;
        let delaunay = &mut self.diagram.delaunay;
        let tri = delaunay.add_face(Face::triangle(self.triangle_count));

        let e1 = delaunay.add_half_edge(HalfEdge::new(Some(a), Some(v1)).with_face(Some(tri)));
        let e2 = delaunay.add_half_edge(HalfEdge::new(Some(v1), Some(v2)).with_face(Some(tri)));
        let e3 = delaunay.add_half_edge(HalfEdge::new(Some(v2), Some(a)).with_face(Some(tri)));
        delaunay.link(e1, e2);
        delaunay.link(e2, e3);
        delaunay.link(e3, e1);
        for e in [e1, e2, e3] {
            delaunay.claim_origin(e);
        }
        delaunay.faces[tri].outer = Some(e1);

        // e1 and e3 touch the arc's site, so they cross the two converging
        // rays; e2 crosses the new one.
        let (first, last) = if left_turn {
            (right_edge, left_edge)
        } else {
            (left_edge, right_edge)
        };
        self.glue_dual(e1, first);
        self.glue_dual(e3, last);
        self.edges[new_edge].tri_half_edge = Some(e2);
    }

    /// Twins `he` with whatever triangle already crosses `edge`, and leaves
    /// `he` for the triangle that will later cross the opposite ray.
    fn glue_dual(&mut self, he: usize, edge: usize) {
        if let Some(t) = self.edges[edge].tri_half_edge {
            self.diagram.delaunay.set_twins(he, t);
        }
        if let Some(nb) = self.edges[edge].neighbour {
            self.edges[nb].tri_half_edge = Some(he);
        }
    }

    /// Gives the triangle edge crossing a leftover ray an outward twin on the
    /// unbounded Delaunay face.
    pub(crate) fn add_hull_edge(&mut self, ray: usize, unbounded: usize) {
        let Some(t) = self.edges[ray].tri_half_edge else {
            return;
        };
        let delaunay = &mut self.diagram.delaunay;
        if delaunay.twin(t).is_some() {
            warn!(ray, "hull edge already has a twin");
            return;
        }

        let (origin, dest) = (delaunay.half_edges[t].origin, delaunay.half_edges[t].dest);
        let h = delaunay.add_half_edge(HalfEdge::new(dest, origin).with_face(Some(unbounded)));
        delaunay.set_twins(t, h);
        delaunay.faces[unbounded].inner.get_or_insert(h);
    }

    /// Links the hull half-edges into one cycle around the triangulation.
    pub(crate) fn close_hull(&mut self, unbounded: usize) {
        let delaunay = &mut self.diagram.delaunay;
        let Some(start) = delaunay.faces[unbounded].inner else {
            return;
        };

        let limit = delaunay.half_edges.len();
        let mut cur = start;
        for _ in 0..=limit {
            let Some(prev) = hull_predecessor(delaunay, cur, unbounded, limit) else {
                warn!(half_edge = cur, "hull walk left the triangulation");
                return;
            };
            delaunay.link(prev, cur);
            cur = prev;
            if cur == start {
                return;
            }
        }
        warn!("hull cycle did not close");
    }
}

/// Hull edge ending where `he` starts, found by turning around `he`'s origin
/// through the triangles.
fn hull_predecessor(dcel: &Dcel<f64>, he: usize, face: usize, limit: usize) -> Option<usize> {
    let mut prev = dcel.twin(he)?;
    for _ in 0..=limit {
        if dcel.half_edges[prev].face == Some(face) {
            return Some(prev);
        }
        prev = dcel.twin(dcel.next(prev)?)?;
    }
    None
}
