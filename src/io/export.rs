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

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::diagram::VoronoiDiagram;
use crate::error::Result;
use crate::geometry::Point2;
use crate::mesh::{Dcel, Face};

/// Formats like C's `%g`: six significant digits, trailing zeros dropped,
/// scientific notation below `1e-4` or from `1e6` up.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{value:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_zeros(mantissa), exp.abs())
    } else {
        let decimals = (5 - exp).max(0) as usize;
        strip_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn format_point(p: &Point2<f64>) -> String {
    format!("({}, {})", format_number(p.x), format_number(p.y))
}

/// Names a half-edge by its endpoints, e.g. `e3,4`, `b2,e1` or `eUK,b5`.
/// The prefix letter is `d` for half-edges on an indexed (triangle) face and
/// `e` otherwise; `b` marks a vertex on the clipping rectangle.
pub fn half_edge_token(dcel: &Dcel<f64>, he: usize) -> String {
    let h = &dcel.half_edges[he];
    let kind = match h.face {
        Some(f) if dcel.faces[f].index != 0 => 'd',
        _ => 'e',
    };
    let origin = h.origin.map(|v| &dcel.vertices[v]);
    let dest = h.dest.map(|v| &dcel.vertices[v]);

    let mut token = String::new();
    match origin {
        Some(v) if v.on_boundary => token.push_str(&format!("b{}", v.index)),
        Some(v) => token.push_str(&format!("{kind}{}", v.index)),
        None => token.push_str(&format!("{kind}UK")),
    }
    token.push(',');
    match dest {
        Some(v) if v.on_boundary => token.push_str(&format!("b{}", v.index)),
        Some(v) if origin.is_some_and(|o| o.on_boundary) => token.push_str(&format!("{kind}{}", v.index)),
        Some(v) => token.push_str(&v.index.to_string()),
        None => token.push_str(&format!("{kind}UK")),
    }
    token
}

fn token_or_nil(dcel: &Dcel<f64>, he: Option<usize>) -> String {
    he.map_or_else(|| "nil".to_string(), |h| half_edge_token(dcel, h))
}

/// Writes the Voronoi mesh: vertices, faces, then live half-edges.
pub fn write_voronoi<W: Write>(diagram: &VoronoiDiagram, out: &mut W) -> io::Result<()> {
    let dcel = &diagram.voronoi;
    let cell_label = |face: &Face| face.site.map_or(0, |s| diagram.sites[s].index);

    writeln!(out, "****** Voronoi diagram ******")?;
    for v in &dcel.vertices {
        let prefix = if v.on_boundary { 'b' } else { 'v' };
        writeln!(
            out,
            "{prefix}{} {} {}",
            v.index,
            format_point(&v.point),
            token_or_nil(dcel, v.half_edge)
        )?;
    }
    writeln!(out)?;

    for f in &dcel.faces {
        let name = if f.unbounded {
            "uf".to_string()
        } else {
            format!("c{}", cell_label(f))
        };
        writeln!(out, "{name} {} {}", token_or_nil(dcel, f.outer), token_or_nil(dcel, f.inner))?;
    }
    writeln!(out)?;

    for (i, h) in dcel.live_half_edges() {
        let face = match h.face.map(|f| &dcel.faces[f]) {
            None => " nil ".to_string(),
            Some(f) if f.unbounded => " uf ".to_string(),
            Some(f) => format!(" c{} ", cell_label(f)),
        };
        writeln!(
            out,
            "{}  {}{face}{} {}",
            half_edge_token(dcel, i),
            token_or_nil(dcel, h.twin),
            token_or_nil(dcel, h.next),
            token_or_nil(dcel, h.prev)
        )?;
    }
    Ok(())
}

/// Writes the Delaunay mesh: vertices, triangles, then half-edges with their
/// origin site.
pub fn write_delaunay<W: Write>(diagram: &VoronoiDiagram, out: &mut W) -> io::Result<()> {
    let dcel = &diagram.delaunay;

    writeln!(out, "****** Delaunay triangulation ******")?;
    for v in &dcel.vertices {
        writeln!(
            out,
            "v{} {} {}",
            v.index,
            format_point(&v.point),
            token_or_nil(dcel, v.half_edge)
        )?;
    }
    writeln!(out)?;

    for f in &dcel.faces {
        let name = if f.unbounded {
            "uf".to_string()
        } else {
            format!("t{}", f.index)
        };
        writeln!(out, "{name} {} {}", token_or_nil(dcel, f.outer), token_or_nil(dcel, f.inner))?;
    }
    writeln!(out)?;

    for (i, h) in dcel.live_half_edges() {
        let origin = h
            .origin
            .map_or_else(|| "nil".to_string(), |v| format!("v{}", dcel.vertices[v].index));
        let face = match h.face.map(|f| &dcel.faces[f]) {
            None => " nil ".to_string(),
            Some(f) if f.unbounded => " uf ".to_string(),
            Some(f) => format!(" c{} ", f.index),
        };
        writeln!(
            out,
            "{} {origin} {}{face}{} {}",
            half_edge_token(dcel, i),
            token_or_nil(dcel, h.twin),
            token_or_nil(dcel, h.next),
            token_or_nil(dcel, h.prev)
        )?;
    }
    Ok(())
}

/// Voronoi section, a blank line, then the Delaunay section.
pub fn write_diagram<W: Write>(diagram: &VoronoiDiagram, out: &mut W) -> io::Result<()> {
    write_voronoi(diagram, out)?;
    writeln!(out)?;
    write_delaunay(diagram, out)
}

pub fn save_diagram<P: AsRef<Path>>(diagram: &VoronoiDiagram, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_diagram(diagram, &mut out)?;
    out.flush()?;
    Ok(())
}
