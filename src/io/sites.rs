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

use std::{fs, path::Path};

use rand::Rng;
use tracing::debug;

use crate::error::{Result, VoronoiError};
use crate::geometry::Point2;

/// Reads sites written as parenthesized pairs, e.g. `(1, 2) (3.5, -4)`.
///
/// Text between pairs is ignored, as is anything before the last `(` of a
/// pair. Commas or whitespace separate the two coordinates.
pub fn parse_sites(text: &str) -> Result<Vec<Point2<f64>>> {
    let mut points = Vec::new();
    let mut offset = 0;

    for chunk in text.split(')') {
        let start = offset;
        offset += chunk.len() + 1;
        if chunk.len() <= 1 || chunk.trim().is_empty() {
            continue;
        }

        let open = chunk.rfind('(').ok_or_else(|| VoronoiError::Parse {
            offset: start,
            message: "expected '(' before ')'".to_string(),
        })?;
        let point = parse_pair(&chunk[open + 1..]).map_err(|message| VoronoiError::Parse {
            offset: start + open + 1,
            message,
        })?;
        points.push(point);
    }

    debug!(count = points.len(), "parsed sites");
    Ok(points)
}

pub fn read_sites<P: AsRef<Path>>(path: P) -> Result<Vec<Point2<f64>>> {
    let text = fs::read_to_string(path)?;
    parse_sites(&text)
}

/// `count` sites with integral x in `[0, 1000)` and y equal to their
/// position, so no two share a height.
pub fn random_sites<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Point2<f64>> {
    (0..count)
        .map(|i| Point2::new(rng.random_range(0..1000) as f64, i as f64))
        .collect()
}

fn parse_pair(body: &str) -> std::result::Result<Point2<f64>, String> {
    let body = body.trim_start();
    let end = body
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(body.len());
    let x = parse_number(&body[..end], "x")?;

    let rest = body[end..].trim_start();
    let rest = rest.strip_prefix(',').unwrap_or(rest).trim();
    let y = parse_number(rest, "y")?;

    let point = Point2::new(x, y);
    if !point.is_finite() {
        return Err("coordinates must be finite".to_string());
    }
    Ok(point)
}

fn parse_number(token: &str, axis: &str) -> std::result::Result<f64, String> {
    if token.is_empty() {
        return Err(format!("missing {axis} coordinate"));
    }
    token
        .parse::<f64>()
        .map_err(|_| format!("bad {axis} coordinate '{token}'"))
}
