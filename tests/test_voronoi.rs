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

use approx::assert_abs_diff_eq;
use fortune::geometry::Point2;
use fortune::io::write_diagram;
use fortune::kernel::orient2d;
use fortune::{SweepConfig, SweepEngine, VoronoiDiagram};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn compute(points: &[(f64, f64)]) -> VoronoiDiagram {
    let points: Vec<Point2<f64>> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    VoronoiDiagram::compute(&points, SweepConfig::default()).unwrap()
}

fn interior_points(diagram: &VoronoiDiagram) -> Vec<Point2<f64>> {
    diagram
        .voronoi
        .vertices
        .iter()
        .filter(|v| !v.on_boundary)
        .map(|v| v.point)
        .collect()
}

fn assert_closed(diagram: &VoronoiDiagram) {
    if let Err(err) = diagram.voronoi.validate_closed() {
        panic!("voronoi mesh: {err}");
    }
    if let Err(err) = diagram.delaunay.validate_closed() {
        panic!("delaunay mesh: {err}");
    }
}

/// Number of half-edges around each site's cell.
fn cell_sizes(diagram: &VoronoiDiagram) -> Vec<Option<usize>> {
    diagram
        .sites
        .iter()
        .map(|s| s.face.and_then(|f| diagram.voronoi.face_boundary(f)).map(|c| c.len()))
        .collect()
}

#[test]
fn test_three_sites() {
    let diagram = compute(&[(0.0, 0.0), (4.0, 0.0), (2.0, 4.0)]);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 1);
    let center = interior_points(&diagram)[0];
    assert_abs_diff_eq!(center.x, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(center.y, 1.5, epsilon = 1e-9);
    assert_eq!(diagram.voronoi.vertex_degree(0), 3);

    assert_eq!(diagram.triangle_count(), 1);
    let mut corners = diagram.triangles()[0];
    corners.sort();
    assert_eq!(corners, [0, 1, 2]);

    assert_eq!(cell_sizes(&diagram), vec![Some(4), Some(4), Some(5)]);
}

#[test]
fn test_three_sites_leave_three_rays() {
    let points = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(2.0, 4.0)];
    let mut engine = SweepEngine::new(VoronoiDiagram::from_points(&points), SweepConfig::default());
    engine.run().unwrap();

    assert_eq!(engine.infinite_edges().count(), 3);
    assert_eq!(engine.completed_edges().count(), 2);
    assert!(engine.infinite_edges().all(|e| e.end.is_some()));
    assert!(engine.in_order().is_empty());
}

#[test]
fn test_empty_input() {
    let diagram = compute(&[]);
    assert_eq!(diagram.voronoi_vertex_count(), 0);
    assert_eq!(diagram.triangle_count(), 0);
    assert!(diagram.clip_box.is_none());
    assert!(diagram.voronoi.half_edges.is_empty());
}

#[test]
fn test_single_site_owns_the_box() {
    let diagram = compute(&[(3.0, 3.0)]);
    assert_closed(&diagram);

    let rect = diagram.clip_box.unwrap();
    assert_eq!((rect.min_x, rect.min_y, rect.max_x, rect.max_y), (-2.0, -2.0, 8.0, 8.0));
    assert_eq!(diagram.voronoi_vertex_count(), 0);
    assert_eq!(cell_sizes(&diagram), vec![Some(4)]);
}

#[test]
fn test_two_sites_share_one_bisector() {
    let diagram = compute(&[(0.0, 0.0), (4.0, 2.0)]);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 0);
    assert_eq!(diagram.triangle_count(), 0);
    // Four corners plus the two ends of the bisector.
    assert_eq!(diagram.voronoi.vertices.len(), 6);
    assert_eq!(cell_sizes(&diagram), vec![Some(4), Some(4)]);
}

#[test]
fn test_level_sites_split_by_a_vertical_bisector() {
    let points = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)];
    let mut engine = SweepEngine::new(VoronoiDiagram::from_points(&points), SweepConfig::default());
    engine.run().unwrap();

    assert_eq!(engine.completed_edges().count(), 0);
    assert_eq!(engine.infinite_edges().count(), 2);
    assert!(engine.infinite_edges().all(|e| e.vertical && e.start.x == 2.0));

    let diagram = engine.into_diagram();
    assert_closed(&diagram);
    let crossings: Vec<Point2<f64>> = diagram.voronoi.vertices[4..].iter().map(|v| v.point).collect();
    assert_eq!(crossings, vec![Point2::new(2.0, -5.0), Point2::new(2.0, 5.0)]);
}

#[test]
fn test_square_merges_cocircular_events() {
    let diagram = compute(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 1);
    let center = interior_points(&diagram)[0];
    assert_abs_diff_eq!(center.x, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(center.y, 2.0, epsilon = 1e-9);
    assert_eq!(diagram.voronoi.vertex_degree(0), 4);
    assert_eq!(diagram.triangle_count(), 2);
}

#[test]
fn test_grid() {
    let points: Vec<(f64, f64)> = (0..3)
        .flat_map(|x| (0..3).map(move |y| (10.0 * x as f64, 10.0 * y as f64)))
        .collect();
    let diagram = compute(&points);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 4);
    assert_eq!(diagram.triangle_count(), 8);
    for p in interior_points(&diagram) {
        assert!([5.0, 15.0].contains(&p.x) && [5.0, 15.0].contains(&p.y), "{p:?}");
    }
    assert!(cell_sizes(&diagram).iter().all(|&c| c == Some(4)));
}

#[test]
fn test_duplicate_sites_are_skipped() {
    let diagram = compute(&[(0.0, 0.0), (4.0, 0.0), (2.0, 4.0), (4.0, 0.0)]);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 1);
    assert_eq!(diagram.triangle_count(), 1);
    assert!(diagram.sites[3].face.is_none());
    assert!(diagram.sites[3].tri_vertex.is_none());
    assert_eq!(diagram.delaunay.vertices.len(), 3);
}

#[test]
fn test_collinear_rows_and_columns() {
    for points in [
        vec![(0.0, 5.0), (4.0, 5.0), (8.0, 5.0)],
        vec![(5.0, 0.0), (5.0, 4.0), (5.0, 8.0)],
        vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)],
    ] {
        let diagram = compute(&points);
        assert_closed(&diagram);
        assert_eq!(diagram.voronoi_vertex_count(), 0);
        assert_eq!(diagram.triangle_count(), 0);
        assert!(cell_sizes(&diagram).iter().all(|c| c.is_some()));
    }
}

#[test]
fn test_first_row_then_lower_site() {
    let diagram = compute(&[(0.0, 10.0), (10.0, 10.0), (5.0, 0.0)]);
    assert_closed(&diagram);

    assert_eq!(diagram.voronoi_vertex_count(), 1);
    let center = interior_points(&diagram)[0];
    assert_abs_diff_eq!(center.x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(center.y, 6.25, epsilon = 1e-9);
    assert_eq!(diagram.triangle_count(), 1);
}

#[test]
fn test_clipped_vertices_lie_on_the_box() {
    let diagram = compute(&[(1.0, 7.0), (6.0, 2.0), (9.0, 8.0), (3.0, 3.0), (7.5, 5.5)]);
    assert_closed(&diagram);

    let rect = diagram.clip_box.unwrap();
    for v in diagram.voronoi.vertices.iter().filter(|v| v.on_boundary) {
        assert!(rect.on_boundary(&v.point, 1e-9), "b{} at {:?}", v.index, v.point);
    }
    for v in diagram.voronoi.vertices.iter().filter(|v| !v.on_boundary) {
        assert!(rect.contains(&v.point));
    }
}

#[test]
fn test_cells_wind_around_their_sites() {
    let diagram = compute(&[(1.0, 7.0), (6.0, 2.0), (9.0, 8.0), (3.0, 3.0), (7.5, 5.5), (5.0, 9.5)]);
    assert_closed(&diagram);

    for site in &diagram.sites {
        let cycle = diagram.voronoi.face_boundary(site.face.unwrap()).unwrap();
        let polygon: Vec<Point2<f64>> = cycle
            .iter()
            .map(|&h| diagram.voronoi.origin_point(h).unwrap())
            .collect();
        for (i, a) in polygon.iter().enumerate() {
            let b = &polygon[(i + 1) % polygon.len()];
            assert!(orient2d(a, b, &site.point) > -1e-7, "site {} outside its cell", site.index);
        }
    }
}

#[test]
fn test_second_run_changes_nothing() {
    let points = [Point2::new(1.0, 7.0), Point2::new(6.0, 2.0), Point2::new(9.0, 8.0), Point2::new(3.0, 3.0)];
    let mut engine = SweepEngine::new(VoronoiDiagram::from_points(&points), SweepConfig::default());
    engine.run().unwrap();
    assert!(engine.is_complete());

    let vertices = engine.diagram().voronoi.vertices.len();
    let half_edges = engine.diagram().voronoi.live_half_edge_count();
    let triangles = engine.diagram().triangle_count();

    engine.run().unwrap();
    assert_eq!(engine.diagram().voronoi.vertices.len(), vertices);
    assert_eq!(engine.diagram().voronoi.live_half_edge_count(), half_edges);
    assert_eq!(engine.diagram().triangle_count(), triangles);
}

#[test]
fn test_sweep_is_deterministic() {
    let points = [(1.0, 7.0), (6.0, 2.0), (9.0, 8.0), (3.0, 3.0), (6.0, 0.0), (7.0, 1.0), (5.0, 2.0)];
    let export = |diagram: &VoronoiDiagram| {
        let mut out = Vec::new();
        write_diagram(diagram, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    };
    assert_eq!(export(&compute(&points)), export(&compute(&points)));
}

fn sweep(points: &[(f64, f64)], config: SweepConfig) -> SweepEngine {
    let points: Vec<Point2<f64>> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    let mut engine = SweepEngine::new(VoronoiDiagram::from_points(&points), config);
    engine.run().unwrap();
    engine
}

/// Checks that every ray ends on its own box vertex, that the box gained
/// exactly one vertex per ray not ending on a corner, and that no two
/// clipped rays cross.
fn assert_rays_clipped(engine: &SweepEngine) {
    let diagram = engine.diagram();
    assert_closed(diagram);
    for site in &diagram.sites {
        let face = site.face.unwrap();
        assert!(diagram.voronoi.face_boundary(face).is_some(), "site {} has an open cell", site.index);
    }

    let mesh = &diagram.voronoi;
    let boundary: Vec<usize> = (0..mesh.vertices.len()).filter(|&v| mesh.vertices[v].on_boundary).collect();
    let corners = &boundary[..4];

    let mut ends = HashSet::new();
    let mut segments = Vec::new();
    for ray in engine.infinite_edges() {
        let he = ray.half_edge.expect("ray without a half-edge");
        let end = mesh.half_edges[he].origin.expect("ray never reached the box");
        assert!(mesh.vertices[end].on_boundary);
        let dest = mesh.twin(he).and_then(|t| mesh.half_edges[t].origin);
        assert!(dest.is_some(), "ray half-edge has no far end");
        assert!(ends.insert(end), "two rays share box vertex {end}");
        segments.push((mesh.origin_point(he).unwrap(), mesh.dest_point(he).unwrap()));
    }
    let split = ends.iter().filter(|v| !corners.contains(v)).count();
    assert_eq!(boundary.len(), 4 + split);

    for (i, (a, b)) in segments.iter().enumerate() {
        for (c, d) in &segments[i + 1..] {
            assert!(!properly_cross(a, b, c, d), "rays {a:?}-{b:?} and {c:?}-{d:?} cross");
        }
    }
}

fn properly_cross(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> bool {
    let side = |v: f64| if v > 1e-9 { 1 } else if v < -1e-9 { -1 } else { 0 };
    let (o1, o2) = (side(orient2d(a, b, c)), side(orient2d(a, b, d)));
    let (o3, o4) = (side(orient2d(c, d, a)), side(orient2d(c, d, b)));
    o1 * o2 < 0 && o3 * o4 < 0
}

#[test]
fn test_ray_through_a_box_corner() {
    // One bisector leaves exactly through the lower right corner.
    let engine = sweep(&[(6.0, 0.0), (7.0, 1.0), (5.0, 2.0)], SweepConfig::default());
    assert_rays_clipped(&engine);
    assert_eq!(engine.infinite_edges().count(), 3);
    let boundary = engine.diagram().voronoi.vertices.iter().filter(|v| v.on_boundary).count();
    assert_eq!(boundary, 6);
}

#[test]
fn test_ray_grazing_a_box_corner() {
    // The bisector meets the box a few ulps away from a corner.
    let config = SweepConfig::default().with_box_margin(5.37);
    assert_rays_clipped(&sweep(&[(7.0, 3.0), (5.0, 1.0)], config));
}

#[test]
fn test_diagonal_rows() {
    let rising: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, i as f64)).collect();
    let falling: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, -(i as f64))).collect();
    let cross = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0)];
    for points in [&rising[..], &falling[..], &cross[..]] {
        assert_rays_clipped(&sweep(points, SweepConfig::default()));
    }
}

#[test]
fn test_small_lattices() {
    for seed in 0..300 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.random_range(2..21);
        let mut points: Vec<(f64, f64)> = Vec::new();
        while points.len() < n {
            let p = (rng.random_range(0..8) as f64, rng.random_range(0..8) as f64);
            if !points.contains(&p) {
                points.push(p);
            }
        }
        for margin in [5.0, 5.37] {
            let config = SweepConfig::default().with_box_margin(margin);
            assert_rays_clipped(&sweep(&points, config));
        }
    }
}
