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

/// Directed half of a mesh edge. Every link is an index into the owning
/// [`Dcel`](super::dcel::Dcel) arena; `None` marks a link not (yet) known.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: Option<usize>,
    pub dest: Option<usize>,
    pub twin: Option<usize>,
    pub face: Option<usize>,
    pub next: Option<usize>,
    pub prev: Option<usize>,
    pub removed: bool, // zero-length artifacts are unlinked, not erased
}

impl HalfEdge {
    pub fn new(origin: Option<usize>, dest: Option<usize>) -> Self {
        Self {
            origin,
            dest,
            ..Self::default()
        }
    }

    pub fn with_face(mut self, face: Option<usize>) -> Self {
        self.face = face;
        self
    }

    /// Both endpoints known and identical.
    pub fn is_zero_length(&self) -> bool {
        self.origin.is_some() && self.origin == self.dest
    }
}
