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

//! Parabolic arcs of the beachline.
//!
//! The sweep line moves from large `y` towards small `y`; every processed site
//! is a focus above the directrix `y = sweep_y`.

use num_traits::Float;

use crate::geometry::Point2;

/// Height of the parabola with the given focus and directrix `y = sweep_y`
/// at abscissa `x`.
///
/// A focus lying on the directrix degenerates into a vertical ray; its
/// height is reported as the focus height.
pub fn parabola_y<T: Float>(x: T, sweep_y: T, focus: &Point2<T>) -> T {
    let two = T::one() + T::one();
    let d = two * (focus.y - sweep_y);
    if d == T::zero() {
        return focus.y;
    }

    let dx = x - focus.x;
    (dx * dx + focus.y * focus.y - sweep_y * sweep_y) / d
}

/// Abscissa of the breakpoint between the arc of `left` and the arc of
/// `right` (in beachline order) at the given sweep height.
///
/// Equating both parabolas gives a quadratic; the greater root is the
/// breakpoint when `left.y < right.y`, the lesser one otherwise.
pub fn breakpoint_x<T: Float>(left: &Point2<T>, right: &Point2<T>, sweep_y: T) -> T {
    let two = T::one() + T::one();
    let four = two + two;

    // Foci on the sweep line are vertical rays at their own x.
    if left.y == sweep_y && right.y == sweep_y {
        return (left.x + right.x) / two;
    }
    if left.y == sweep_y {
        return left.x;
    }
    if right.y == sweep_y {
        return right.x;
    }
    if left.y == right.y {
        return (left.x + right.x) / two;
    }

    let dl = T::one() / (two * (left.y - sweep_y));
    let dr = T::one() / (two * (right.y - sweep_y));

    let a = dl - dr;
    let b = -two * dl * left.x + two * dr * right.x;
    let c = dl * (left.x * left.x + left.y * left.y - sweep_y * sweep_y)
        - dr * (right.x * right.x + right.y * right.y - sweep_y * sweep_y);

    let discriminant = (b * b - four * a * c).max(T::zero()).sqrt();
    let x1 = (-b + discriminant) / (two * a);
    let x2 = (-b - discriminant) / (two * a);

    if left.y < right.y {
        x1.max(x2)
    } else {
        x1.min(x2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn parabola_is_equidistant() {
        let focus = p(2.0, 4.0);
        let sweep = 0.0;
        for x in [-3.0, 0.0, 1.5, 2.0, 7.25] {
            let y = parabola_y(x, sweep, &focus);
            let on = p(x, y);
            assert!((on.distance_to(&focus) - (y - sweep)).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_focus_on_directrix() {
        assert_eq!(parabola_y(10.0, 3.0, &p(1.0, 3.0)), 3.0);
        assert_eq!(breakpoint_x(&p(0.0, 1.0), &p(4.0, 0.0), 0.0), 4.0);
        assert_eq!(breakpoint_x(&p(0.0, 0.0), &p(4.0, 1.0), 0.0), 0.0);
        assert_eq!(breakpoint_x(&p(0.0, 0.0), &p(4.0, 0.0), 0.0), 2.0);
    }

    #[test]
    fn equal_heights_meet_halfway() {
        assert_eq!(breakpoint_x(&p(0.0, 5.0), &p(4.0, 5.0), 1.0), 2.0);
    }

    #[test]
    fn breakpoint_lies_on_both_parabolas() {
        let left = p(0.0, 5.0);
        let right = p(3.0, 2.0);
        let sweep = 0.5;

        let x = breakpoint_x(&left, &right, sweep);
        let yl = parabola_y(x, sweep, &left);
        let yr = parabola_y(x, sweep, &right);
        assert!((yl - yr).abs() < 1e-9);

        // The narrow arc of `right` sits between both intersections.
        let x_swapped = breakpoint_x(&right, &left, sweep);
        assert!(x < right.x && right.x < x_swapped);
        let ys = parabola_y(x_swapped, sweep, &left);
        assert!((ys - parabola_y(x_swapped, sweep, &right)).abs() < 1e-9);
    }
}
