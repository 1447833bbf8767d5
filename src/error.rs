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

use thiserror::Error;

/// Errors produced while reading sites, sweeping, or writing a diagram.
#[derive(Debug, Error)]
pub enum VoronoiError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed site near byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// An internal beachline node was found without the breakpoint edge it
    /// must own.
    #[error("beachline node {arc} is internal but owns no edge")]
    CorruptBeachline { arc: usize },

    #[error("circle event squeezes arc {arc}, which lacks a neighbour on one side")]
    MissingArc { arc: usize },

    #[error("half-edge {half_edge}: {reason}")]
    BrokenTopology {
        half_edge: usize,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
