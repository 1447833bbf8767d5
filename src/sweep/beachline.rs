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

//! Beachline status structure.
//!
//! A red-black tree whose leaves are arcs (one focus each) and whose internal
//! nodes are breakpoints (one bisector edge each). In-order leaf order is the
//! left-to-right order of the arcs at the current sweep height. Every
//! internal node has exactly two children; leaves play the role of the black
//! nil nodes of a textbook red-black tree.

use std::fmt::Write as _;

use crate::diagram::Site;
use crate::error::{Result, VoronoiError};
use crate::geometry::breakpoint_x;
use crate::sweep::edge::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub site: Option<usize>,
    pub edge: Option<usize>,
    pub circle_event: Option<usize>,
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub leaf: bool,
    pub color: Color,
}

impl Arc {
    pub fn leaf(site: usize) -> Self {
        Self {
            site: Some(site),
            edge: None,
            circle_event: None,
            parent: None,
            left: None,
            right: None,
            leaf: true,
            color: Color::Black,
        }
    }

    pub fn breakpoint(edge: usize) -> Self {
        Self {
            site: None,
            edge: Some(edge),
            leaf: false,
            color: Color::Red,
            ..Self::leaf(usize::MAX)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Beachline {
    pub arcs: Vec<Arc>,
    pub root: Option<usize>,
}

impl Beachline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn add(&mut self, arc: Arc) -> usize {
        let idx = self.arcs.len();
        self.arcs.push(arc);
        idx
    }

    /// Makes a single leaf for `site` the whole tree.
    pub fn init(&mut self, site: usize) -> usize {
        let leaf = self.add(Arc::leaf(site));
        self.root = Some(leaf);
        leaf
    }

    pub fn set_left(&mut self, parent: usize, child: usize) {
        self.arcs[child].parent = Some(parent);
        self.arcs[parent].left = Some(child);
    }

    pub fn set_right(&mut self, parent: usize, child: usize) {
        self.arcs[child].parent = Some(parent);
        self.arcs[parent].right = Some(child);
    }

    pub fn color_of(&self, node: Option<usize>) -> Color {
        node.map_or(Color::Black, |n| self.arcs[n].color)
    }

    fn set_color(&mut self, node: Option<usize>, color: Color) {
        if let Some(n) = node {
            self.arcs[n].color = color;
        }
    }

    /// Leaf whose arc lies above abscissa `x` at sweep height `sweep_y`.
    pub fn find_arc_at_x(&self, x: f64, sweep_y: f64, edges: &[Edge]) -> Result<usize> {
        let mut node = self.root.ok_or(VoronoiError::CorruptBeachline { arc: usize::MAX })?;
        while !self.arcs[node].leaf {
            let edge = self.arcs[node]
                .edge
                .map(|e| &edges[e])
                .ok_or(VoronoiError::CorruptBeachline { arc: node })?;

            let go_left = if edge.vertical {
                x < edge.start.x
            } else {
                x < breakpoint_x(&edge.left_focus, &edge.right_focus, sweep_y)
            };
            let child = if go_left {
                self.arcs[node].left
            } else {
                self.arcs[node].right
            };
            node = child.ok_or(VoronoiError::CorruptBeachline { arc: node })?;
        }
        Ok(node)
    }

    /// Nearest ancestor having `node` in its right subtree: the breakpoint
    /// bounding the arc on its left.
    pub fn left_parent(&self, mut node: usize) -> Option<usize> {
        let mut parent = self.arcs[node].parent;
        while let Some(p) = parent {
            if self.arcs[p].left != Some(node) {
                break;
            }
            node = p;
            parent = self.arcs[p].parent;
        }
        parent
    }

    /// Nearest ancestor having `node` in its left subtree.
    pub fn right_parent(&self, mut node: usize) -> Option<usize> {
        let mut parent = self.arcs[node].parent;
        while let Some(p) = parent {
            if self.arcs[p].right != Some(node) {
                break;
            }
            node = p;
            parent = self.arcs[p].parent;
        }
        parent
    }

    /// Rightmost leaf of the left subtree of breakpoint `node`.
    pub fn closest_left_leaf(&self, node: usize) -> Option<usize> {
        let mut child = self.arcs[node].left;
        while let Some(c) = child {
            if self.arcs[c].leaf {
                break;
            }
            child = self.arcs[c].right;
        }
        child
    }

    /// Leftmost leaf of the right subtree of breakpoint `node`.
    pub fn closest_right_leaf(&self, node: usize) -> Option<usize> {
        let mut child = self.arcs[node].right;
        while let Some(c) = child {
            if self.arcs[c].leaf {
                break;
            }
            child = self.arcs[c].left;
        }
        child
    }

    /// Arcs immediately left and right of leaf `arc`.
    pub fn neighbours(&self, arc: usize) -> (Option<usize>, Option<usize>) {
        let left = self.left_parent(arc).and_then(|p| self.closest_left_leaf(p));
        let right = self.right_parent(arc).and_then(|p| self.closest_right_leaf(p));
        (left, right)
    }

    /// Splits leaf `arc` (focus `old`) by a new focus below it into
    /// `old | new | old`, with breakpoints `el` (left) and `er` (right).
    ///
    /// `arc` becomes the breakpoint owning `er`. Returns the three new
    /// leaves, left to right.
    pub fn split_arc(&mut self, arc: usize, new_site: usize, el: usize, er: usize) -> Result<[usize; 3]> {
        let old_site = self.arcs[arc]
            .site
            .filter(|_| self.arcs[arc].leaf)
            .ok_or(VoronoiError::CorruptBeachline { arc })?;

        let pl = self.add(Arc::leaf(old_site));
        let pm = self.add(Arc::leaf(new_site));
        let pr = self.add(Arc::leaf(old_site));
        let el_node = self.add(Arc::breakpoint(el));

        let node = &mut self.arcs[arc];
        node.site = None;
        node.edge = Some(er);
        node.leaf = false;
        node.color = Color::Red;
        node.circle_event = None;

        self.set_right(arc, pr);
        self.set_left(arc, el_node);
        self.set_left(el_node, pl);
        self.set_right(el_node, pm);

        self.fix_after_insert(arc);
        self.fix_after_insert(el_node);
        Ok([pl, pm, pr])
    }

    /// Turns leaf `arc` into the breakpoint owning `edge`, with leaves for
    /// `left_site` and `right_site` below it. Used while every arc is still a
    /// vertical ray on the first row.
    pub fn split_row(&mut self, arc: usize, left_site: usize, right_site: usize, edge: usize) -> [usize; 2] {
        let l = self.add(Arc::leaf(left_site));
        let r = self.add(Arc::leaf(right_site));

        let is_root = self.root == Some(arc);
        let node = &mut self.arcs[arc];
        node.site = None;
        node.edge = Some(edge);
        node.leaf = false;
        node.circle_event = None;
        if !is_root {
            node.color = Color::Red;
        }

        self.set_left(arc, l);
        self.set_right(arc, r);
        self.fix_after_insert(arc);
        [l, r]
    }

    /// Removes leaf `arc` together with its parent breakpoint; the sibling
    /// takes the parent's place. Returns the promoted sibling.
    pub fn remove_arc(&mut self, arc: usize) -> Result<usize> {
        let parent = self.arcs[arc]
            .parent
            .ok_or(VoronoiError::MissingArc { arc })?;
        let sibling = if self.arcs[parent].left == Some(arc) {
            self.arcs[parent].right
        } else {
            self.arcs[parent].left
        }
        .ok_or(VoronoiError::CorruptBeachline { arc: parent })?;

        let grandparent = self.arcs[parent].parent;
        self.replace_parents_child(grandparent, parent, sibling);

        if self.arcs[parent].color == Color::Black {
            self.fix_after_delete(sibling);
        }

        for detached in [arc, parent] {
            let node = &mut self.arcs[detached];
            node.parent = None;
            node.left = None;
            node.right = None;
        }
        Ok(sibling)
    }

    fn rotate_right(&mut self, node: usize) {
        let parent = self.arcs[node].parent;
        let Some(left) = self.arcs[node].left else {
            return;
        };

        self.arcs[node].left = self.arcs[left].right;
        if let Some(lr) = self.arcs[left].right {
            self.arcs[lr].parent = Some(node);
        }

        self.arcs[left].right = Some(node);
        self.arcs[node].parent = Some(left);

        self.replace_parents_child(parent, node, left);
    }

    fn rotate_left(&mut self, node: usize) {
        let parent = self.arcs[node].parent;
        let Some(right) = self.arcs[node].right else {
            return;
        };

        self.arcs[node].right = self.arcs[right].left;
        if let Some(rl) = self.arcs[right].left {
            self.arcs[rl].parent = Some(node);
        }

        self.arcs[right].left = Some(node);
        self.arcs[node].parent = Some(right);

        self.replace_parents_child(parent, node, right);
    }

    fn replace_parents_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if self.arcs[p].left == Some(old) {
                    self.arcs[p].left = Some(new);
                } else if self.arcs[p].right == Some(old) {
                    self.arcs[p].right = Some(new);
                }
            }
        }
        self.arcs[new].parent = parent;
    }

    fn sibling(&self, node: usize) -> Option<usize> {
        let parent = self.arcs[node].parent?;
        if self.arcs[parent].left == Some(node) {
            self.arcs[parent].right
        } else {
            self.arcs[parent].left
        }
    }

    fn fix_after_insert(&mut self, node: usize) {
        let Some(parent) = self.arcs[node].parent else {
            self.arcs[node].color = Color::Black;
            return;
        };
        if self.arcs[parent].color == Color::Black {
            return;
        }
        let Some(grandparent) = self.arcs[parent].parent else {
            self.arcs[parent].color = Color::Black;
            return;
        };

        let uncle = self.sibling(parent);
        if self.color_of(uncle) == Color::Red {
            self.arcs[parent].color = Color::Black;
            self.arcs[grandparent].color = Color::Red;
            self.set_color(uncle, Color::Black);
            self.fix_after_insert(grandparent);
            return;
        }

        let mut parent = parent;
        if self.arcs[grandparent].left == Some(parent) {
            if self.arcs[parent].right == Some(node) {
                self.rotate_left(parent);
                parent = node;
            }
            self.rotate_right(grandparent);
        } else {
            if self.arcs[parent].left == Some(node) {
                self.rotate_right(parent);
                parent = node;
            }
            self.rotate_left(grandparent);
        }
        self.arcs[parent].color = Color::Black;
        self.arcs[grandparent].color = Color::Red;
    }

    fn fix_after_delete(&mut self, node: usize) {
        if self.root == Some(node) || self.arcs[node].color == Color::Red {
            self.arcs[node].color = Color::Black;
            return;
        }
        let Some(parent) = self.arcs[node].parent else {
            return;
        };
        let is_left = self.arcs[parent].left == Some(node);
        let other = |bl: &Self| {
            if is_left {
                bl.arcs[parent].right
            } else {
                bl.arcs[parent].left
            }
        };

        let mut sibling = other(self);
        if self.color_of(sibling) == Color::Red {
            self.set_color(sibling, Color::Black);
            self.arcs[parent].color = Color::Red;
            if is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            sibling = other(self);
        }
        let Some(s) = sibling else {
            return;
        };

        let (s_left, s_right) = (self.arcs[s].left, self.arcs[s].right);
        if self.color_of(s_left) == Color::Black && self.color_of(s_right) == Color::Black {
            self.arcs[s].color = Color::Red;
            if self.arcs[parent].color == Color::Red {
                self.arcs[parent].color = Color::Black;
            } else {
                self.fix_after_delete(parent);
            }
            return;
        }

        let mut s = s;
        if is_left && self.color_of(s_right) == Color::Black {
            self.set_color(s_left, Color::Black);
            self.arcs[s].color = Color::Red;
            self.rotate_right(s);
            let Some(new_s) = self.arcs[parent].right else {
                return;
            };
            s = new_s;
        } else if !is_left && self.color_of(s_left) == Color::Black {
            self.set_color(s_right, Color::Black);
            self.arcs[s].color = Color::Red;
            self.rotate_left(s);
            let Some(new_s) = self.arcs[parent].left else {
                return;
            };
            s = new_s;
        }

        self.arcs[s].color = self.arcs[parent].color;
        self.arcs[parent].color = Color::Black;
        if is_left {
            self.set_color(self.arcs[s].right, Color::Black);
            self.rotate_left(parent);
        } else {
            self.set_color(self.arcs[s].left, Color::Black);
            self.rotate_right(parent);
        }
    }

    /// Every node in in-order (leaves and breakpoints interleaved).
    pub fn in_order(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut cur = self.root;
        while cur.is_some() || !stack.is_empty() {
            while let Some(n) = cur {
                stack.push(n);
                cur = self.arcs[n].left;
            }
            let Some(n) = stack.pop() else { break };
            out.push(n);
            cur = self.arcs[n].right;
        }
        out
    }

    /// Leaves only, left to right.
    pub fn leaves(&self) -> Vec<usize> {
        self.in_order()
            .into_iter()
            .filter(|&n| self.arcs[n].leaf)
            .collect()
    }

    /// Black height of the tree, or `None` if a red-black or structural
    /// invariant is violated.
    pub fn black_height(&self) -> Option<usize> {
        let Some(root) = self.root else {
            return Some(0);
        };
        if self.arcs[root].color != Color::Black || self.arcs[root].parent.is_some() {
            return None;
        }
        self.subtree_black_height(root)
    }

    fn subtree_black_height(&self, node: usize) -> Option<usize> {
        let arc = &self.arcs[node];
        let own = usize::from(arc.color == Color::Black);
        if arc.leaf {
            let bare = arc.left.is_none() && arc.right.is_none() && arc.site.is_some();
            return (bare && arc.color == Color::Black).then_some(1);
        }

        let (l, r) = (arc.left?, arc.right?);
        if arc.edge.is_none() || self.arcs[l].parent != Some(node) || self.arcs[r].parent != Some(node) {
            return None;
        }
        if arc.color == Color::Red
            && (self.arcs[l].color == Color::Red || self.arcs[r].color == Color::Red)
        {
            return None;
        }

        let hl = self.subtree_black_height(l)?;
        let hr = self.subtree_black_height(r)?;
        (hl == hr).then_some(hl + own)
    }

    /// One-line dump: `P<i>` per arc and `<l, r>` per breakpoint.
    pub fn describe(&self, edges: &[Edge], sites: &[Site]) -> String {
        let mut out = String::new();
        for n in self.in_order() {
            let arc = &self.arcs[n];
            if let Some(e) = arc.edge {
                let edge = &edges[e];
                let _ = write!(out, "<{}, {}> ", sites[edge.left].index, sites[edge.right].index);
            } else if let Some(s) = arc.site {
                let _ = write!(out, "P{} ", sites[s].index);
            }
        }
        out.trim_end().to_string()
    }
}
