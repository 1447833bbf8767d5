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

//! Voronoi diagrams and their dual Delaunay triangulations, computed with
//! Fortune's sweep-line algorithm and stored as doubly connected edge lists.
//!
//! ```no_run
//! use fortune::{SweepConfig, VoronoiDiagram, geometry::Point2};
//!
//! let sites = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(2.0, 4.0)];
//! let diagram = VoronoiDiagram::compute(&sites, SweepConfig::default())?;
//! assert_eq!(diagram.triangle_count(), 1);
//! # Ok::<(), fortune::VoronoiError>(())
//! ```

pub mod config;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod sweep;

pub use config::SweepConfig;
pub use diagram::{Site, VoronoiDiagram};
pub use error::{Result, VoronoiError};
pub use sweep::SweepEngine;
