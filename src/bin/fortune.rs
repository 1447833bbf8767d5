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

//! Computes the Voronoi diagram and Delaunay triangulation of a site file
//! and writes both meshes as text.
//!
//! Usage:
//!   fortune sites.txt                     Write sites.txt's diagram to diagram.txt
//!   fortune sites.txt -o out.txt          Choose the output file
//!   fortune --random 500 --seed 3         Use generated sites instead
//!
//! Set `RUST_LOG=fortune=debug` to follow the sweep event by event.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fortune::io::{random_sites, read_sites};
use fortune::{SweepConfig, VoronoiDiagram};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "fortune")]
#[command(about = "Voronoi diagram and Delaunay triangulation via Fortune's sweep")]
struct Args {
    /// File of sites written as "(x, y)" pairs
    #[arg(required_unless_present = "random")]
    sites: Option<PathBuf>,

    /// Where to write the diagram
    #[arg(short, long, default_value = "diagram.txt")]
    output: PathBuf,

    /// Generate this many random sites instead of reading a file
    #[arg(long, conflicts_with = "sites")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Padding around the sites and vertices before clipping
    #[arg(long, default_value_t = SweepConfig::default().box_margin)]
    margin: f64,

    /// Height band below the first site treated as the first row, as a
    /// fraction of the site extent
    #[arg(long, default_value_t = SweepConfig::default().first_row_tolerance)]
    first_row_tolerance: f64,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run(args: &Args) -> fortune::Result<VoronoiDiagram> {
    let points = match (&args.sites, args.random) {
        (_, Some(count)) => random_sites(count, &mut StdRng::seed_from_u64(args.seed)),
        (Some(path), None) => read_sites(path)?,
        (None, None) => Vec::new(),
    };

    let config = SweepConfig::default()
        .with_box_margin(args.margin)
        .with_first_row_tolerance(args.first_row_tolerance);
    let diagram = VoronoiDiagram::compute(&points, config)?;
    diagram.save(&args.output)?;
    Ok(diagram)
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(diagram) => {
            println!(
                "{} sites, {} Voronoi vertices, {} triangles -> {}",
                diagram.sites.len(),
                diagram.voronoi_vertex_count(),
                diagram.triangle_count(),
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("fortune: {err}");
            ExitCode::FAILURE
        }
    }
}
