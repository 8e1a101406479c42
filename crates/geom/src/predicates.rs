//! Exact orientation and containment tests.
//!
//! Containment is exclusive everywhere: a point on the boundary of a triangle
//! or of a polygon is inside neither. Two triangles sharing an edge therefore
//! never both claim a point of that edge.

use crate::{Point, Vector};

use core::cmp::Ordering;

/// `a.x * b.y - a.y * b.x`.
///
/// Twice the signed area of the triangle `(origin, a, b)`, positive when `b`
/// is counter-clockwise from `a`.
#[inline]
pub fn cross_product(a: Vector, b: Vector) -> i64 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn dot_product(a: Vector, b: Vector) -> i64 {
    a.x * b.x + a.y * b.y
}

/// Turn direction of `a -> b -> c`: positive for a left (counter-clockwise)
/// turn, negative for a right turn and zero if the points are collinear.
///
/// This is also twice the signed area of the triangle `abc`.
#[inline]
pub fn orient(a: &Point, b: &Point, c: &Point) -> i64 {
    cross_product(*b - *a, *c - *b)
}

/// Returns true if `p` is strictly inside the triangle `abc`, whatever the
/// orientation of the triangle.
pub fn point_in_triangle(p: &Point, a: &Point, b: &Point, c: &Point) -> bool {
    let d1 = orient(a, b, p).signum();
    let d2 = orient(b, c, p).signum();
    let d3 = orient(c, a, p).signum();

    d1 != 0 && d1 == d2 && d2 == d3
}

/// Returns true if `p` lies on the closed segment `ab`.
pub fn point_on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    if orient(a, b, p) != 0 {
        return false;
    }

    a.x().min(b.x()) <= p.x()
        && p.x() <= a.x().max(b.x())
        && a.y().min(b.y()) <= p.y()
        && p.y() <= a.y().max(b.y())
}

/// Calls `cb` with each edge of the closed polygon described by `chain`,
/// including the edge from the last point back to the first one.
fn for_each_edge<'l, I, F>(chain: I, mut cb: F)
where
    I: IntoIterator<Item = &'l Point>,
    F: FnMut(&Point, &Point),
{
    let mut iter = chain.into_iter();
    let first = match iter.next() {
        Some(p) => *p,
        None => return,
    };

    let mut prev = first;
    for p in iter {
        cb(&prev, p);
        prev = *p;
    }
    cb(&prev, &first);
}

/// Returns true if `p` is on one of the edges of the closed polygon.
pub fn point_on_polygon_boundary<'l, I>(chain: I, p: &Point) -> bool
where
    I: IntoIterator<Item = &'l Point>,
{
    let mut on_boundary = false;
    for_each_edge(chain, |a, b| {
        on_boundary |= point_on_segment(p, a, b);
    });

    on_boundary
}

/// Winding number of the closed polygon around `p`.
///
/// Edges are half-open in `y` (an upward edge includes its lower endpoint and
/// excludes its upper one, and conversely), so a horizontal ray through a
/// vertex counts it exactly once. Counter-clockwise contours contribute `+1`.
///
/// The result is meaningless when `p` is on the boundary.
pub fn winding_number<'l, I>(chain: I, p: &Point) -> i32
where
    I: IntoIterator<Item = &'l Point>,
{
    let mut winding = 0;
    for_each_edge(chain, |a, b| {
        if a.y() <= p.y() {
            if b.y() > p.y() && orient(a, b, p) > 0 {
                winding += 1;
            }
        } else if b.y() <= p.y() && orient(a, b, p) < 0 {
            winding -= 1;
        }
    });

    winding
}

/// Returns true if `p` is strictly inside the closed polygon described by
/// `chain`.
///
/// Points on the boundary are outside. The interior is the set of points with
/// a non-zero winding number, which is the usual interior for simple polygons.
pub fn point_in_polygon<'l, I>(chain: I, p: &Point) -> bool
where
    I: IntoIterator<Item = &'l Point> + Clone,
{
    if point_on_polygon_boundary(chain.clone(), p) {
        return false;
    }

    winding_number(chain, p) != 0
}

/// Twice the signed area of the closed polygon, positive if it is oriented
/// counter-clockwise.
pub fn signed_area2<'l, I>(chain: I) -> i128
where
    I: IntoIterator<Item = &'l Point>,
{
    let mut iter = chain.into_iter();
    let origin = match iter.next() {
        Some(p) => *p,
        None => return 0,
    };

    let mut area: i128 = 0;
    let mut prev = origin;
    for p in iter {
        area += cross_product(prev - origin, *p - origin) as i128;
        prev = *p;
    }

    area
}

// 0 for directions in [0, pi), 1 for [pi, 2pi), relative to `reference`.
#[inline]
fn half_plane(reference: Vector, v: Vector) -> u8 {
    let c = cross_product(reference, v);
    if c > 0 || (c == 0 && dot_product(reference, v) > 0) {
        0
    } else {
        1
    }
}

/// Compares the counter-clockwise angles of `a` and `b` measured from
/// `reference`. A direction equal to `reference` has the smallest angle.
///
/// None of the vectors may be zero.
pub fn compare_angles_from(reference: Vector, a: Vector, b: Vector) -> Ordering {
    let ha = half_plane(reference, a);
    let hb = half_plane(reference, b);
    if ha != hb {
        return ha.cmp(&hb);
    }

    0.cmp(&cross_product(a, b))
}

/// Compares the counter-clockwise angles of `a` and `b` measured from the
/// positive x axis.
#[inline]
pub fn compare_angles(a: Vector, b: Vector) -> Ordering {
    compare_angles_from(Vector::new(1, 0), a, b)
}

#[cfg(test)]
use crate::{point, vector};

#[cfg(test)]
fn square() -> [Point; 4] {
    [point(0, 0), point(10, 0), point(10, 10), point(0, 10)]
}

#[test]
fn cross_product_sign_convention() {
    assert_eq!(cross_product(vector(1, 0), vector(0, 1)), 1);
    assert_eq!(cross_product(vector(0, 1), vector(1, 0)), -1);
    assert_eq!(cross_product(vector(3, 3), vector(-2, -2)), 0);
}

#[test]
fn triangle_containment_is_exclusive() {
    let (a, b, c) = (point(0, 0), point(10, 0), point(0, 10));

    assert!(point_in_triangle(&point(2, 2), &a, &b, &c));
    // The orientation of the triangle doesn't matter.
    assert!(point_in_triangle(&point(2, 2), &a, &c, &b));
    assert!(!point_in_triangle(&point(5, 5), &a, &b, &c));
    assert!(!point_in_triangle(&point(5, 0), &a, &b, &c));
    assert!(!point_in_triangle(&a, &a, &b, &c));
    assert!(!point_in_triangle(&point(8, 8), &a, &b, &c));

    // Degenerate triangles contain nothing.
    let d = point(20, 0);
    assert!(!point_in_triangle(&point(5, 0), &a, &b, &d));
}

#[test]
fn square_containment() {
    let square = square();

    assert!(point_in_polygon(&square, &point(5, 5)));
    assert!(!point_in_polygon(&square, &point(15, 15)));

    for boundary in &[point(0, 0), point(5, 0), point(10, 5), point(10, 10), point(0, 7)] {
        assert!(!point_in_polygon(&square, boundary));
        assert!(point_on_polygon_boundary(&square, boundary));
    }

    // Rays going through vertices.
    assert!(!point_in_polygon(&square, &point(-5, 0)));
    assert!(!point_in_polygon(&square, &point(-5, 10)));
    assert!(point_in_polygon(&square, &point(1, 9)));
}

#[test]
fn winding_numbers() {
    let ccw = square();
    let mut cw = square();
    cw.reverse();

    assert_eq!(winding_number(&ccw, &point(5, 5)), 1);
    assert_eq!(winding_number(&cw, &point(5, 5)), -1);
    assert_eq!(winding_number(&ccw, &point(50, 5)), 0);

    // A diamond, rays through the left and right corners.
    let diamond = [point(0, -5), point(5, 0), point(0, 5), point(-5, 0)];
    assert_eq!(winding_number(&diamond, &point(0, 0)), 1);
    assert_eq!(winding_number(&diamond, &point(-10, 0)), 0);
    assert_eq!(winding_number(&diamond, &point(10, 0)), 0);
}

#[test]
fn polygon_area() {
    let square = square();
    assert_eq!(signed_area2(&square), 200);

    let mut reversed = square;
    reversed.reverse();
    assert_eq!(signed_area2(&reversed), -200);

    assert_eq!(signed_area2(&[point(0, 0), point(5, 5), point(10, 10)]), 0);
    assert_eq!(signed_area2(&[] as &[Point]), 0);
}

#[test]
fn angular_order() {
    use core::cmp::Ordering::*;

    let east = vector(1, 0);
    let north = vector(0, 3);
    let west = vector(-2, 0);
    let south = vector(0, -1);

    assert_eq!(compare_angles(east, north), Less);
    assert_eq!(compare_angles(north, west), Less);
    assert_eq!(compare_angles(west, south), Less);
    assert_eq!(compare_angles(south, east), Greater);
    assert_eq!(compare_angles(vector(2, 2), vector(5, 5)), Equal);

    // Measured from the west, north is three quarters of a turn away.
    assert_eq!(compare_angles_from(west, south, north), Less);
    assert_eq!(compare_angles_from(west, west, south), Less);
    assert_eq!(compare_angles_from(west, east, north), Less);
}
