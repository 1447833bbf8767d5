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

use fortune::geometry::Point2;
use fortune::io::random_sites;
use fortune::kernel::{circumcenter, orient2d};
use fortune::{SweepConfig, VoronoiDiagram};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_float_sites(seed: u64) -> Vec<Point2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = rng.random_range(3..60);
    (0..n)
        .map(|_| Point2::new(rng.random_range(0.0..100.0_f64), rng.random_range(0.0..100.0_f64)))
        .collect()
}

fn triangle_points(diagram: &VoronoiDiagram) -> Vec<[Point2<f64>; 3]> {
    diagram
        .triangles()
        .into_iter()
        .map(|[a, b, c]| [diagram.sites[a].point, diagram.sites[b].point, diagram.sites[c].point])
        .collect()
}

/// Triangles are counter-clockwise and no site lies inside a circumcircle.
fn assert_delaunay(diagram: &VoronoiDiagram) {
    for [a, b, c] in triangle_points(diagram) {
        assert!(orient2d(&a, &b, &c) > 0.0, "clockwise triangle {a:?} {b:?} {c:?}");
        let center = circumcenter(&a, &b, &c).unwrap();
        let radius = center.distance_to(&a);
        for p in diagram.points() {
            assert!(
                center.distance_to(&p) >= radius - 1e-6,
                "{p:?} inside the circumcircle of {a:?} {b:?} {c:?}"
            );
        }
    }
}

#[test]
fn test_triangles_match_voronoi_vertices() {
    for seed in 0..40 {
        let points = random_float_sites(seed);
        let diagram = VoronoiDiagram::compute(&points, SweepConfig::default()).unwrap();
        assert!(diagram.voronoi.validate_closed().is_ok(), "seed {seed}");
        assert!(diagram.delaunay.validate_closed().is_ok(), "seed {seed}");

        assert_eq!(diagram.triangle_count(), diagram.voronoi_vertex_count(), "seed {seed}");
        assert_eq!(diagram.triangles().len(), diagram.triangle_count(), "seed {seed}");

        let vertices: Vec<Point2<f64>> = diagram
            .voronoi
            .vertices
            .iter()
            .filter(|v| !v.on_boundary)
            .map(|v| v.point)
            .collect();
        for [a, b, c] in triangle_points(&diagram) {
            let center = circumcenter(&a, &b, &c).unwrap();
            assert!(
                vertices.iter().any(|v| v.distance_to(&center) < 1e-6),
                "seed {seed}: no vertex at {center:?}"
            );
        }
        assert_delaunay(&diagram);
    }
}

#[test]
fn test_hull_closes_around_the_triangles() {
    for seed in 100..120 {
        let diagram = VoronoiDiagram::compute(&random_float_sites(seed), SweepConfig::default()).unwrap();
        let hull = diagram
            .delaunay
            .faces
            .iter()
            .position(|f| f.unbounded)
            .unwrap();
        let cycle = diagram.delaunay.face_boundary(hull).unwrap();
        assert!(cycle.len() >= 3, "seed {seed}");

        // Every hull edge backs onto a triangle.
        for &h in &cycle {
            let he = &diagram.delaunay.half_edges[h];
            let twin = he.twin.unwrap();
            assert!(!diagram.delaunay.faces[diagram.delaunay.half_edges[twin].face.unwrap()].unbounded);
        }
    }
}

#[test]
fn test_generated_sites() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.random_range(2..200);
        let points = random_sites(count, &mut rng);
        let diagram = VoronoiDiagram::compute(&points, SweepConfig::default()).unwrap();

        assert!(diagram.voronoi.validate_closed().is_ok(), "seed {seed}");
        assert!(diagram.delaunay.validate_closed().is_ok(), "seed {seed}");
        assert_delaunay(&diagram);

        let rect = diagram.clip_box.unwrap();
        assert!(
            diagram
                .voronoi
                .vertices
                .iter()
                .filter(|v| v.on_boundary)
                .all(|v| rect.on_boundary(&v.point, 1e-9)),
            "seed {seed}"
        );
    }
}
