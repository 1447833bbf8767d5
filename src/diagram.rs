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

use std::path::Path;

use crate::config::SweepConfig;
use crate::error::Result;
use crate::geometry::{Bounds, Point2};
use crate::io::{export, sites};
use crate::mesh::Dcel;
use crate::sweep::SweepEngine;

/// Input point with its 1-based label and the records the sweep creates
/// for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub index: usize,
    pub point: Point2<f64>,
    /// Cell of this site in the Voronoi mesh.
    pub face: Option<usize>,
    /// Vertex of this site in the Delaunay mesh.
    pub tri_vertex: Option<usize>,
}

impl Site {
    pub fn new(index: usize, point: Point2<f64>) -> Self {
        Self {
            index,
            point,
            face: None,
            tri_vertex: None,
        }
    }
}

/// Sites plus the two dual meshes built from them.
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    pub sites: Vec<Site>,
    pub voronoi: Dcel<f64>,
    pub delaunay: Dcel<f64>,
    /// Rectangle the Voronoi mesh was clipped against, once computed.
    pub clip_box: Option<Bounds<f64>>,
}

impl VoronoiDiagram {
    /// Labels sites `1..=n` in input order.
    pub fn from_points(points: &[Point2<f64>]) -> Self {
        let sites = points
            .iter()
            .enumerate()
            .map(|(i, p)| Site::new(i + 1, *p))
            .collect();

        Self {
            sites,
            voronoi: Dcel::new(),
            delaunay: Dcel::new(),
            clip_box: None,
        }
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::from_points(&sites::parse_sites(text)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_points(&sites::read_sites(path)?))
    }

    /// Runs a full sweep over `points`.
    pub fn compute(points: &[Point2<f64>], config: SweepConfig) -> Result<Self> {
        let mut engine = SweepEngine::new(Self::from_points(points), config);
        engine.run()?;
        Ok(engine.into_diagram())
    }

    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.sites.iter().map(|s| s.point)
    }

    /// Voronoi vertices created by circle events (clipping vertices excluded).
    pub fn voronoi_vertex_count(&self) -> usize {
        self.voronoi.interior_vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.delaunay.faces.iter().filter(|f| !f.unbounded).count()
    }

    /// Each Delaunay triangle as positions into `sites`, counter-clockwise.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut site_of_vertex = vec![usize::MAX; self.delaunay.vertices.len()];
        for (i, site) in self.sites.iter().enumerate() {
            if let Some(v) = site.tri_vertex {
                site_of_vertex[v] = i;
            }
        }

        self.delaunay
            .faces
            .iter()
            .filter(|f| !f.unbounded)
            .filter_map(|f| {
                let cycle = self.delaunay.face_cycle(f.outer?)?;
                let corners: Vec<usize> = cycle
                    .iter()
                    .filter_map(|&h| self.delaunay.half_edges[h].origin)
                    .map(|v| site_of_vertex[v])
                    .collect();
                match corners.as_slice() {
                    &[a, b, c] => Some([a, b, c]),
                    _ => None,
                }
            })
            .collect()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::save_diagram(self, path)
    }
}
