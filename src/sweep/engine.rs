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

use std::collections::HashSet;

use tracing::{debug, info, trace, warn};

use crate::config::SweepConfig;
use crate::diagram::VoronoiDiagram;
use crate::error::{Result, VoronoiError};
use crate::geometry::{Bounds, Point2, parabola_y};
use crate::mesh::{Face, Vertex};
use crate::sweep::beachline::Beachline;
use crate::sweep::edge::Edge;
use crate::sweep::event::EventKind;
use crate::sweep::queue::EventQueue;

/// Fortune's sweep over the sites of a [`VoronoiDiagram`], filling its
/// Voronoi and Delaunay meshes.
///
/// The engine is either *running* (events remain or post-processing has
/// not happened) or *complete*. It can be driven to completion with
/// [`run`](Self::run) or one event at a time with [`next`](Self::next) and
/// [`continues`](Self::continues).
#[derive(Debug)]
pub struct SweepEngine {
    pub(crate) diagram: VoronoiDiagram,
    pub(crate) config: SweepConfig,
    pub(crate) queue: EventQueue,
    pub(crate) beachline: Beachline,
    pub(crate) edges: Vec<Edge>,
    pub(crate) first_site: Option<usize>,
    pub(crate) sweep_height: f64,
    pub(crate) complete: bool,
    pub(crate) last_vertex: Option<usize>,
    pub(crate) completed_edges: Vec<usize>,
    pub(crate) infinite_edges: Vec<usize>,
    /// Upper halves of first-row bisectors; never part of the beachline.
    pub(crate) upward_rays: Vec<usize>,
    pub(crate) boundary_edges: Vec<usize>,
    pub(crate) bounds: Bounds<f64>,
    /// Diagonal of the input sites' extent; scales the tolerances.
    pub(crate) scale: f64,
    pub(crate) seen: HashSet<(u64, u64)>,
    pub(crate) voronoi_vertex_count: usize,
    pub(crate) boundary_vertex_count: usize,
    pub(crate) triangle_count: usize,
}

impl SweepEngine {
    pub fn new(diagram: VoronoiDiagram, config: SweepConfig) -> Self {
        let mut queue = EventQueue::new();
        for (i, site) in diagram.sites.iter().enumerate() {
            queue.push_site(site.point, i);
        }
        let sweep_height = queue.peek().map_or(f64::MAX, |e| e.point.y);
        let extent = Bounds::from_points(diagram.sites.iter().map(|s| &s.point));
        let scale = if extent.is_empty() {
            0.0
        } else {
            (extent.max_x - extent.min_x).hypot(extent.max_y - extent.min_y)
        };
        debug!(sites = diagram.sites.len(), scale, "queued site events");

        Self {
            diagram,
            config,
            queue,
            beachline: Beachline::new(),
            edges: Vec::new(),
            first_site: None,
            sweep_height,
            complete: false,
            last_vertex: None,
            completed_edges: Vec::new(),
            infinite_edges: Vec::new(),
            upward_rays: Vec::new(),
            boundary_edges: Vec::new(),
            bounds: Bounds::empty(),
            scale,
            seen: HashSet::new(),
            voronoi_vertex_count: 0,
            boundary_vertex_count: 0,
            triangle_count: 0,
        }
    }

    /// Drains the queue, then clips the remaining rays and closes every face.
    /// Calling it again on a complete engine does nothing.
    pub fn run(&mut self) -> Result<()> {
        if self.complete {
            return Ok(());
        }
        while !self.queue.is_empty() {
            self.next()?;
        }

        self.clean_zero_length_edges();
        self.clip_remaining_rays();
        self.fill_boundary_faces();
        self.diagram.voronoi.repair_vertex_edges();
        self.complete = true;

        debug_assert!(
            self.diagram.voronoi.validate_links().is_ok(),
            "voronoi links inconsistent after sweep"
        );
        debug_assert!(
            self.diagram.delaunay.validate_links().is_ok(),
            "delaunay links inconsistent after sweep"
        );

        info!(
            sites = self.diagram.sites.len(),
            vertices = self.voronoi_vertex_count,
            triangles = self.diagram.triangle_count(),
            rays = self.infinite_edges.len(),
            "sweep complete"
        );
        Ok(())
    }

    /// Handles the next queued event, if any. Invalidated circle events are
    /// consumed without effect.
    pub fn next(&mut self) -> Result<()> {
        let Some(event) = self.queue.pop() else {
            return Ok(());
        };
        self.sweep_height = event.point.y;

        match event.kind {
            EventKind::Site(site) => self.handle_site_event(site),
            EventKind::Circle(id) if !self.queue.is_deleted(id) => self.handle_circle_event(id),
            EventKind::Circle(id) => {
                trace!(id, "skipping invalidated circle event");
                Ok(())
            }
        }
    }

    /// Advances one event once the externally paced `height` has passed the
    /// next event's height.
    pub fn continues(&mut self, height: f64) -> Result<()> {
        let tolerance = self.config.step_tolerance;
        let due = self
            .queue
            .peek()
            .is_some_and(|top| height - top.point.y < -tolerance);
        if due { self.next() } else { Ok(()) }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Current sweep-line height.
    pub fn height(&self) -> f64 {
        self.sweep_height
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Bisector segments finalized by circle events.
    pub fn completed_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.completed_edges.iter().map(|&e| &self.edges[e])
    }

    /// Rays left on the beachline at the end, with their clipping-time end.
    pub fn infinite_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.infinite_edges.iter().map(|&e| &self.edges[e])
    }

    pub fn beachline(&self) -> &Beachline {
        &self.beachline
    }

    /// Left-to-right snapshot of the beachline nodes. Empty once complete.
    pub fn in_order(&self) -> Vec<usize> {
        self.beachline.in_order()
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn diagram(&self) -> &VoronoiDiagram {
        &self.diagram
    }

    pub fn into_diagram(self) -> VoronoiDiagram {
        self.diagram
    }

    pub(crate) fn add_edge(&mut self, start: Point2<f64>, left: usize, right: usize) -> usize {
        let idx = self.edges.len();
        self.edges.push(Edge::new(start, left, right, &self.diagram.sites));
        idx
    }

    /// Two rays on one bisector line, heading apart from a common start.
    fn add_edge_pair(&mut self, start: Point2<f64>, left: usize, right: usize) -> (usize, usize) {
        let a = self.add_edge(start, left, right);
        let b = self.add_edge(start, right, left);
        self.edges[a].neighbour = Some(b);
        self.edges[b].neighbour = Some(a);
        (a, b)
    }

    fn handle_site_event(&mut self, site: usize) -> Result<()> {
        let point = self.diagram.sites[site].point;
        debug!(site = self.diagram.sites[site].index, x = point.x, y = point.y, "site event");

        // `+ 0.0` folds -0.0 into 0.0.
        if !self.seen.insert(((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())) {
            warn!(site = self.diagram.sites[site].index, "skipping duplicate site");
            return Ok(());
        }

        self.bounds.include(&point);
        let face = self.diagram.voronoi.add_face(Face::for_site(site));
        let label = self.diagram.sites[site].index;
        let tri = self.diagram.delaunay.add_vertex(Vertex::new(label, point));
        self.diagram.sites[site].face = Some(face);
        self.diagram.sites[site].tri_vertex = Some(tri);

        if self.beachline.is_empty() {
            self.beachline.init(site);
            self.first_site = Some(site);
            return Ok(());
        }

        let a = self
            .beachline
            .find_arc_at_x(point.x, self.sweep_height, &self.edges)?;
        let a_site = self.beachline.arcs[a]
            .site
            .ok_or(VoronoiError::CorruptBeachline { arc: a })?;
        self.invalidate_circle_event(a);

        let first_y = self
            .first_site
            .map_or(point.y, |f| self.diagram.sites[f].point.y);

        if first_y - point.y <= self.config.first_row_tolerance * self.scale {
            self.split_first_row(a, a_site, site);
        } else {
            let a_point = self.diagram.sites[a_site].point;
            let start = Point2::new(point.x, parabola_y(point.x, self.sweep_height, &a_point));
            let (el, er) = self.add_edge_pair(start, a_site, site);

            let [pl, _, pr] = self.beachline.split_arc(a, site, el, er)?;
            self.check_circle_event(pl, true)?;
            self.check_circle_event(pr, true)?;
        }

        trace!(beachline = %self.beachline.describe(&self.edges, &self.diagram.sites));
        Ok(())
    }

    /// Every arc is a vertical ray while the sweep sits on the first row, so
    /// the found arc is split in two by a vertical bisector instead of three.
    fn split_first_row(&mut self, a: usize, a_site: usize, site: usize) {
        let a_point = self.diagram.sites[a_site].point;
        let point = self.diagram.sites[site].point;

        let start = Point2::new((point.x + a_point.x) / 2.0, self.sweep_height);
        let (left, right) = if a_point.x < point.x {
            (a_site, site)
        } else {
            (site, a_site)
        };

        let (down, up) = self.add_edge_pair(start, left, right);
        self.edges[down].from_infinity = true;
        self.beachline.split_row(a, left, right, down);
        self.upward_rays.push(up);
    }

    fn merge_distance(&self) -> f64 {
        self.config.merge_tolerance * self.scale.max(1.0)
    }

    fn near(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        a.distance_to(b) <= self.merge_distance()
    }

    fn invalidate_circle_event(&mut self, arc: usize) {
        if let Some(id) = self.beachline.arcs[arc].circle_event.take() {
            self.queue.invalidate(id);
        }
    }

    /// Queues the disappearance of leaf `arc` if its two bounding breakpoints
    /// converge below the sweep line.
    ///
    /// `split` is set right after a site event and admits an event at the
    /// sweep height. Otherwise such an event is only taken when it completes
    /// the vertex just created, and not for an arc whose breakpoints both
    /// start at that vertex and diverge from it.
    pub(crate) fn check_circle_event(&mut self, arc: usize, split: bool) -> Result<()> {
        let bl = &self.beachline;
        let (Some(lp), Some(rp)) = (bl.left_parent(arc), bl.right_parent(arc)) else {
            return Ok(());
        };
        let (Some(la), Some(ra)) = (bl.closest_left_leaf(lp), bl.closest_right_leaf(rp)) else {
            return Ok(());
        };
        if bl.arcs[la].site == bl.arcs[ra].site {
            return Ok(());
        }

        let le = bl.arcs[lp].edge.ok_or(VoronoiError::CorruptBeachline { arc: lp })?;
        let re = bl.arcs[rp].edge.ok_or(VoronoiError::CorruptBeachline { arc: rp })?;
        let Some(center) = self.edges[le].intersect(&self.edges[re]) else {
            return Ok(());
        };

        let site = bl.arcs[arc].site.ok_or(VoronoiError::CorruptBeachline { arc })?;
        let radius = center.distance_to(&self.diagram.sites[site].point);
        let bottom = center.y - radius;
        let eps = self.merge_distance();
        if bottom > self.sweep_height + eps {
            return Ok(());
        }
        if !split && bottom >= self.sweep_height - eps {
            let completes_last = self
                .last_vertex
                .is_some_and(|v| self.near(&self.diagram.voronoi.vertices[v].point, &center));
            let diverging = self.near(&self.edges[le].start, &center)
                && self.near(&self.edges[re].start, &center);
            if !completes_last || diverging {
                return Ok(());
            }
        }

        self.invalidate_circle_event(arc);
        let id = self
            .queue
            .push_circle(Point2::new(center.x, bottom), radius, arc);
        self.beachline.arcs[arc].circle_event = Some(id);
        trace!(arc, x = center.x, y = bottom, radius, "queued circle event");
        Ok(())
    }

    fn handle_circle_event(&mut self, id: usize) -> Result<()> {
        let event = *self.queue.circle(id);
        let arc = event.arc;

        let bl = &self.beachline;
        let (Some(left_bp), Some(right_bp)) = (bl.left_parent(arc), bl.right_parent(arc)) else {
            return Err(VoronoiError::MissingArc { arc });
        };
        let left_arc = bl
            .closest_left_leaf(left_bp)
            .ok_or(VoronoiError::CorruptBeachline { arc: left_bp })?;
        let right_arc = bl
            .closest_right_leaf(right_bp)
            .ok_or(VoronoiError::CorruptBeachline { arc: right_bp })?;

        // Another event at this same point may still be pending on a
        // neighbour; only events elsewhere are stale.
        for neighbour in [left_arc, right_arc] {
            if let Some(other) = self.beachline.arcs[neighbour].circle_event {
                if !self.near(&self.queue.circle(other).point, &event.point) {
                    self.queue.invalidate(other);
                    self.beachline.arcs[neighbour].circle_event = None;
                }
            }
        }

        let vertex = event.center();
        debug!(x = vertex.x, y = vertex.y, "circle event");

        let site_of = |node: usize| {
            self.beachline.arcs[node]
                .site
                .ok_or(VoronoiError::CorruptBeachline { arc: node })
        };
        let arc_site = site_of(arc)?;
        let left_site = site_of(left_arc)?;
        let right_site = site_of(right_arc)?;

        let edge_of = |node: usize| {
            self.beachline.arcs[node]
                .edge
                .ok_or(VoronoiError::CorruptBeachline { arc: node })
        };
        let left_edge = edge_of(left_bp)?;
        let right_edge = edge_of(right_bp)?;

        self.edges[left_edge].end = Some(vertex);
        self.edges[right_edge].end = Some(vertex);
        self.completed_edges.push(left_edge);
        self.completed_edges.push(right_edge);

        self.bounds.include(&vertex);
        let vn = self.voronoi_vertex_at(vertex);

        let new_edge = self.add_edge(vertex, left_site, right_site);
        self.emit_voronoi_vertex(vn, left_edge, right_edge, new_edge);
        self.emit_triangle([arc_site, left_site, right_site], left_edge, right_edge, new_edge);

        // The breakpoint that survives is the one above the removed parent.
        let higher = if self.beachline.arcs[arc].parent == Some(left_bp) {
            right_bp
        } else {
            left_bp
        };
        self.beachline.arcs[higher].edge = Some(new_edge);
        self.beachline.remove_arc(arc)?;
        self.beachline.arcs[arc].circle_event = None;

        self.check_circle_event(left_arc, false)?;
        self.check_circle_event(right_arc, false)?;
        Ok(())
    }

    /// Voronoi vertex at `point`, reusing the last one when several circle
    /// events meet at (nearly) the same point.
    fn voronoi_vertex_at(&mut self, point: Point2<f64>) -> usize {
        if let Some(last) = self.last_vertex {
            if self.near(&self.diagram.voronoi.vertices[last].point, &point) {
                return last;
            }
        }
        self.voronoi_vertex_count += 1;
        let v = self
            .diagram
            .voronoi
            .add_vertex(Vertex::new(self.voronoi_vertex_count, point));
        self.last_vertex = Some(v);
        v
    }
}
