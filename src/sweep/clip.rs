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

use tracing::{debug, warn};

use crate::geometry::{Bounds, Point2};
use crate::mesh::{Face, Vertex};
use crate::sweep::edge::Edge;
use crate::sweep::engine::SweepEngine;

/// Where a ray leaves the clipping rectangle along one box edge.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Crossing {
    /// Strictly inside the box edge.
    Inside(Point2<f64>),
    /// At the box edge's origin corner, within tolerance.
    Corner,
}

/// Crossing of `edge` with the axis-aligned box segment `o -> d`, going
/// forward along the ray.
///
/// Hits within `eps` of `o` snap to [`Crossing::Corner`]. Hits within `eps`
/// of `d` are left to the box edge starting at `d`.
fn crossing(edge: &Edge, o: Point2<f64>, d: Point2<f64>, eps: f64) -> Option<Crossing> {
    let dir = edge.direction;
    let within = |v: f64, a: f64, b: f64| v >= a.min(b) - eps && v <= a.max(b) + eps;

    let (hit, inside) = if edge.vertical {
        if o.y != d.y {
            return None;
        }
        let hit = Point2::new(edge.start.x, o.y);
        if (hit.y - edge.start.y) / dir.y <= 0.0 {
            return None;
        }
        (hit, within(hit.x, o.x, d.x))
    } else if o.x == d.x {
        let hit = Point2::new(o.x, edge.y_at(o.x));
        if (hit.x - edge.start.x) / dir.x <= 0.0 {
            return None;
        }
        (hit, within(hit.y, o.y, d.y))
    } else if o.y == d.y {
        let hit = Point2::new(edge.x_at(o.y), o.y);
        if (hit.y - edge.start.y) / dir.y <= 0.0 {
            return None;
        }
        (hit, within(hit.x, o.x, d.x))
    } else {
        return None;
    };

    if !inside {
        None
    } else if hit.distance_to(&o) <= eps {
        Some(Crossing::Corner)
    } else if hit.distance_to(&d) <= eps {
        None
    } else {
        Some(Crossing::Inside(hit))
    }
}

impl SweepEngine {
    /// Drops the zero-length half-edges left by coincident circle events.
    pub(crate) fn clean_zero_length_edges(&mut self) {
        let voronoi = &mut self.diagram.voronoi;
        let doomed: Vec<usize> = voronoi
            .live_half_edges()
            .filter(|(_, he)| he.is_zero_length())
            .map(|(i, _)| i)
            .collect();
        for &he in &doomed {
            voronoi.remove_half_edge(he);
        }
        if !doomed.is_empty() {
            debug!(removed = doomed.len(), "removed zero-length half-edges");
        }
    }

    /// Lays the rectangle around every site and vertex, then cuts each ray
    /// still on the beachline against it.
    pub(crate) fn clip_remaining_rays(&mut self) {
        if self.diagram.sites.is_empty() || self.bounds.is_empty() {
            return;
        }

        let rect = self.bounds.padded(self.config.box_margin);
        self.diagram.clip_box = Some(rect);
        let diagonal = (rect.max_x - rect.min_x).hypot(rect.max_y - rect.min_y);
        let eps = self.config.merge_tolerance * diagonal.max(1.0);

        let unbounded = self.diagram.voronoi.add_face(Face::unbounded(0));
        self.triangle_count += 1;
        let hull_face = self
            .diagram
            .delaunay
            .add_face(Face::unbounded(self.triangle_count));

        self.build_box(&rect, unbounded);

        let mut rays: Vec<usize> = self
            .beachline
            .in_order()
            .into_iter()
            .filter_map(|node| self.beachline.arcs[node].edge)
            .collect();
        rays.extend(self.upward_rays.iter().copied());

        // A ray's start is wherever its breakpoint was created, which can lie
        // far outside the box. Restart it from the vertex its opposite ray
        // reached, or from the midpoint of its sites when none did. Every
        // anchor is read before any ray is cut.
        let anchors: Vec<Option<Point2<f64>>> = rays
            .iter()
            .map(|&ray| {
                let edge = &self.edges[ray];
                let neighbour = &self.edges[edge.neighbour?];
                Some(
                    neighbour
                        .end
                        .unwrap_or_else(|| edge.left_focus.midpoint(&edge.right_focus)),
                )
            })
            .collect();
        for (&ray, anchor) in rays.iter().zip(anchors) {
            if let Some(anchor) = anchor {
                self.edges[ray].restart(anchor);
            }
        }

        for ray in rays {
            self.clip_ray(ray, unbounded, eps);
            self.add_hull_edge(ray, hull_face);
            self.infinite_edges.push(ray);
            let end = self.edges[ray].extended_end(self.config.ray_extension);
            self.edges[ray].end = Some(end);
        }

        self.close_hull(hull_face);
        self.beachline.root = None;
    }

    /// Four corners counter-clockwise from the lower left, with an inner
    /// counter-clockwise loop and an outer clockwise loop on `unbounded`.
    fn build_box(&mut self, rect: &Bounds<f64>, unbounded: usize) {
        let voronoi = &mut self.diagram.voronoi;

        let mut corners = [0; 4];
        for (slot, point) in corners.iter_mut().zip(rect.corners()) {
            self.boundary_vertex_count += 1;
            *slot = voronoi.add_vertex(Vertex::boundary(self.boundary_vertex_count, point));
        }

        let mut box_edges = Vec::with_capacity(8);
        for i in 0..4 {
            let (inner, outer) = voronoi.add_edge_pair(Some(corners[i]), Some(corners[(i + 1) % 4]));
            voronoi.half_edges[outer].face = Some(unbounded);
            voronoi.vertices[corners[i]].half_edge = Some(inner);
            box_edges.push(inner);
            box_edges.push(outer);
        }
        voronoi.faces[unbounded].inner = Some(box_edges[1]);

        for i in 0..4 {
            let j = (i + 1) % 4;
            voronoi.link(box_edges[2 * i], box_edges[2 * j]);
            voronoi.link(box_edges[2 * j + 1], box_edges[2 * i + 1]);
        }

        self.boundary_edges = box_edges;
    }

    /// Ends `ray` on the first inner box edge it crosses, splitting that box
    /// edge unless the crossing is a corner.
    fn clip_ray(&mut self, ray: usize, unbounded: usize, eps: f64) {
        let edge = self.edges[ray].clone();

        let hit = self.boundary_edges.iter().step_by(2).find_map(|&h| {
            let voronoi = &self.diagram.voronoi;
            let (o, d) = (voronoi.origin_point(h)?, voronoi.dest_point(h)?);
            crossing(&edge, o, d, eps).map(|c| (h, c))
        });
        let Some((h, hit)) = hit else {
            warn!(ray, x = edge.start.x, y = edge.start.y, "ray never meets the clipping box");
            return;
        };

        let he = self.ray_half_edge(ray);
        let voronoi = &mut self.diagram.voronoi;
        let Some(he_twin) = voronoi.twin(he) else {
            warn!(ray, "ray half-edge has no twin");
            return;
        };
        let origin = voronoi.half_edges[h].origin;
        let h_prev = voronoi.prev(h);

        match hit {
            Crossing::Inside(point) => {
                self.boundary_vertex_count += 1;
                let b = voronoi.add_vertex(Vertex::boundary(self.boundary_vertex_count, point));

                // o -> b on the cell side, b -> o on the outside.
                let (head, head_twin) = voronoi.add_edge_pair(origin, Some(b));
                voronoi.half_edges[head].face = voronoi.half_edges[he].face;
                voronoi.half_edges[head_twin].face = Some(unbounded);
                if let Some(p) = h_prev {
                    voronoi.link(p, head);
                }
                voronoi.link(head, he);
                if let Some(h_twin) = voronoi.twin(h) {
                    let after = voronoi.next(h_twin);
                    voronoi.link(h_twin, head_twin);
                    if let Some(a) = after {
                        voronoi.link(head_twin, a);
                    }
                }

                // h keeps the b -> d remainder.
                voronoi.set_origin(h, b);
                voronoi.set_origin(he, b);
                voronoi.link(he_twin, h);
                voronoi.half_edges[h].face = voronoi.half_edges[he_twin].face;

                voronoi.vertices[b].half_edge = Some(h);
                if let Some(o) = origin {
                    voronoi.vertices[o].half_edge = Some(head);
                }
                self.boundary_edges.push(head);
                self.boundary_edges.push(head_twin);
            }
            Crossing::Corner => {
                if let Some(o) = origin {
                    voronoi.set_origin(he, o);
                }
                if let Some(p) = h_prev {
                    voronoi.link(p, he);
                    voronoi.half_edges[p].face = voronoi.half_edges[he].face;
                }
                voronoi.link(he_twin, h);
                voronoi.half_edges[h].face = voronoi.half_edges[he_twin].face;
            }
        }
    }

    /// Half-edge running from the box back towards the ray's start, created
    /// if no circle event ever touched this bisector.
    fn ray_half_edge(&mut self, ray: usize) -> usize {
        if let Some(he) = self.edges[ray].half_edge {
            return he;
        }

        let left_face = self.diagram.sites[self.edges[ray].left].face;
        let right_face = self.diagram.sites[self.edges[ray].right].face;
        let voronoi = &mut self.diagram.voronoi;
        let (he, twin) = voronoi.add_edge_pair(None, None);
        voronoi.half_edges[he].face = left_face;
        voronoi.half_edges[twin].face = right_face;
        voronoi.claim_outer(he);
        voronoi.claim_outer(twin);

        self.edges[ray].half_edge = Some(he);
        if let Some(nb) = self.edges[ray].neighbour {
            self.edges[nb].half_edge = Some(twin);
        }
        he
    }

    /// Hands each inner box edge the cell it bounds: the face of the nearest
    /// preceding half-edge that has one, or the only cell when no ray split
    /// the box.
    pub(crate) fn fill_boundary_faces(&mut self) {
        let lone_cell = {
            let mut cells = self.diagram.sites.iter().filter_map(|s| s.face);
            match (cells.next(), cells.next()) {
                (Some(face), None) => Some(face),
                _ => None,
            }
        };

        let voronoi = &mut self.diagram.voronoi;
        let limit = self.boundary_edges.len();
        let inner: Vec<usize> = self.boundary_edges.iter().step_by(2).copied().collect();

        for h in inner {
            if voronoi.half_edges[h].face.is_some() {
                continue;
            }

            let mut face = None;
            let mut cur = voronoi.prev(h);
            for _ in 0..limit {
                let Some(c) = cur.filter(|&c| c != h) else {
                    break;
                };
                if let Some(f) = voronoi.half_edges[c].face {
                    face = Some(f);
                    break;
                }
                cur = voronoi.prev(c);
            }

            if let Some(f) = face.or(lone_cell) {
                voronoi.half_edges[h].face = Some(f);
                voronoi.claim_outer(h);
            }
        }
    }
}
