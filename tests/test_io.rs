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
use std::fs;

use fortune::io::{read_sites, write_diagram, write_voronoi};
use fortune::{SweepConfig, VoronoiDiagram, VoronoiError};

fn three_sites() -> VoronoiDiagram {
    let sites = VoronoiDiagram::from_text("(0, 0) (4, 0) (2, 4)").unwrap();
    let points: Vec<_> = sites.points().collect();
    VoronoiDiagram::compute(&points, SweepConfig::default()).unwrap()
}

fn render(diagram: &VoronoiDiagram) -> String {
    let mut out = Vec::new();
    write_diagram(diagram, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_from_text_labels_sites_in_order() {
    let diagram = VoronoiDiagram::from_text("(0, 0) (4, 0) (2, 4)").unwrap();
    let labels: Vec<usize> = diagram.sites.iter().map(|s| s.index).collect();
    assert_eq!(labels, vec![1, 2, 3]);
    assert!(diagram.voronoi.vertices.is_empty());
}

#[test]
fn test_export_sections() {
    let diagram = three_sites();
    let text = render(&diagram);
    let sections: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(sections.len(), 6);

    let mut vertices = sections[0].lines();
    assert_eq!(vertices.next(), Some("****** Voronoi diagram ******"));
    assert!(vertices.next().unwrap().starts_with("v1 (2, 1.5) "));
    assert!(vertices.next().unwrap().starts_with("b1 (-5, -5) "));

    let cells: Vec<&str> = sections[1].lines().map(|l| l.split(' ').next().unwrap()).collect();
    assert_eq!(cells, vec!["c3", "c1", "c2", "uf"]);
    assert_eq!(sections[2].lines().count(), diagram.voronoi.live_half_edge_count());

    let mut sites = sections[3].lines();
    assert_eq!(sites.next(), Some("****** Delaunay triangulation ******"));
    assert!(sites.next().unwrap().starts_with("v3 (2, 4) "));
    assert!(sites.next().unwrap().starts_with("v1 (0, 0) "));
    assert!(sites.next().unwrap().starts_with("v2 (4, 0) "));

    let faces: Vec<&str> = sections[4].lines().map(|l| l.split(' ').next().unwrap()).collect();
    assert_eq!(faces, vec!["t1", "uf"]);
    assert_eq!(sections[5].lines().count(), diagram.delaunay.live_half_edge_count());

    // Every half-edge of a finished diagram has both endpoints.
    assert!(!text.contains("UK"));
}

#[test]
fn test_voronoi_section_alone() {
    let diagram = three_sites();
    let mut out = Vec::new();
    write_voronoi(&diagram, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(render(&diagram).starts_with(&text));
    assert!(!text.contains("Delaunay"));
}

#[test]
fn test_save_and_reload() {
    let dir = std::env::temp_dir();
    let sites_path = dir.join(format!("fortune-sites-{}.txt", std::process::id()));
    let out_path = dir.join(format!("fortune-diagram-{}.txt", std::process::id()));

    fs::write(&sites_path, "(0, 0)\n(4, 0)\n(2, 4)\n").unwrap();
    let points = read_sites(&sites_path).unwrap();
    let diagram = VoronoiDiagram::compute(&points, SweepConfig::default()).unwrap();
    diagram.save(&out_path).unwrap();

    let saved = fs::read_to_string(&out_path).unwrap();
    assert_eq!(saved, render(&diagram));

    let _ = fs::remove_file(&sites_path);
    let _ = fs::remove_file(&out_path);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("fortune-no-such-file.txt");
    assert!(matches!(read_sites(&path), Err(VoronoiError::Io(_))));
    assert!(matches!(VoronoiDiagram::from_file(&path), Err(VoronoiError::Io(_))));
}
