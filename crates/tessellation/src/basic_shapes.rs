use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::shape::Shape;
use polytess_geom::predicates::{orient, point_in_triangle, point_on_segment, signed_area2};
use polytess_geom::Point;

use alloc::vec::Vec;

/// Collects a closed contour without its repeated points, oriented
/// counter-clockwise.
///
/// Contours that don't enclose anything are reported and `None` is returned.
pub(crate) fn ccw_ring<'l, I>(chain: I, diagnostics: &mut dyn Diagnostics) -> Option<Vec<Point>>
where
    I: IntoIterator<Item = &'l Point>,
{
    let mut ring: Vec<Point> = chain.into_iter().copied().collect();
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    let area = signed_area2(&ring);
    if ring.len() < 3 || area == 0 {
        diagnostics.report(Diagnostic::DroppedContour {
            chain: ring.first().map_or(0, |p| p.chain),
            points: ring.len(),
        });
        return None;
    }

    if area < 0 {
        ring.reverse();
    }

    Some(ring)
}

/// Returns true if every vertex of the counter-clockwise ring turns left or
/// goes straight.
pub(crate) fn is_convex(ring: &[Point]) -> bool {
    let n = ring.len();
    (0..n).all(|i| orient(&ring[(i + n - 1) % n], &ring[i], &ring[(i + 1) % n]) >= 0)
}

/// Fan triangulation of a convex polygon.
///
/// Returns the number of triangles generated, zero-area ones included.
pub fn fill_convex_polygon<'l, I>(
    polygon: I,
    shape: &mut Shape,
    diagnostics: &mut dyn Diagnostics,
) -> usize
where
    I: IntoIterator<Item = &'l Point>,
{
    let ring = match ccw_ring(polygon, diagnostics) {
        Some(ring) => ring,
        None => return 0,
    };

    for i in 1..(ring.len() - 1) {
        shape.push_triangle(ring[0], ring[i], ring[i + 1], diagnostics);
    }

    ring.len() - 2
}

/// Triangulates a simple polygon by repeatedly cutting off ears.
///
/// This is quadratic in the number of vertices and only used for the pieces
/// that the monotone triangulation can't handle. Returns the number of
/// triangles generated, zero-area ones included.
pub fn ear_clip<'l, I>(polygon: I, shape: &mut Shape, diagnostics: &mut dyn Diagnostics) -> usize
where
    I: IntoIterator<Item = &'l Point>,
{
    let mut ring = match ccw_ring(polygon, diagnostics) {
        Some(ring) => ring,
        None => return 0,
    };

    let mut count = 0;
    while ring.len() > 3 {
        let n = ring.len();
        let clip = match find_ear(&ring) {
            Some(i) => i,
            // Flat vertices can always go, they only produce an empty triangle.
            None => match (0..n).find(|&i| {
                orient(&ring[(i + n - 1) % n], &ring[i], &ring[(i + 1) % n]) == 0
            }) {
                Some(i) => i,
                None => {
                    diagnostics.report(Diagnostic::EarClippingStalled { remaining: n });
                    return count;
                }
            },
        };

        shape.push_triangle(
            ring[(clip + n - 1) % n],
            ring[clip],
            ring[(clip + 1) % n],
            diagnostics,
        );
        ring.remove(clip);
        count += 1;
    }

    shape.push_triangle(ring[0], ring[1], ring[2], diagnostics);

    count + 1
}

fn find_ear(ring: &[Point]) -> Option<usize> {
    let n = ring.len();
    (0..n).find(|&i| {
        let a = &ring[(i + n - 1) % n];
        let b = &ring[i];
        let c = &ring[(i + 1) % n];
        if orient(a, b, c) <= 0 {
            return false;
        }

        !ring.iter().any(|p| {
            if p == a || p == b || p == c {
                return false;
            }

            point_in_triangle(p, a, b, c) || point_on_segment(p, a, c)
        })
    })
}

#[cfg(test)]
use polytess_geom::{point, FillRule};

#[cfg(test)]
fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| point(x, y)).collect()
}

#[test]
fn convex_fan() {
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    // Clockwise on purpose.
    let hexagon = points(&[(0, 0), (-2, 4), (0, 8), (4, 8), (6, 4), (4, 0)]);

    let count = fill_convex_polygon(&hexagon, &mut shape, &mut ());

    assert_eq!(count, 4);
    assert_eq!(shape.interior().len(), 4);
    assert_eq!(shape.area2(), -signed_area2(&hexagon));
    assert!(shape.interior().iter().all(|t| t.signed_area2() > 0));
}

#[test]
fn ear_clipping() {
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    // A spiral-ish polygon that isn't monotone in any direction.
    let polygon = points(&[
        (0, 0),
        (10, 0),
        (10, 10),
        (2, 10),
        (2, 4),
        (6, 4),
        (6, 6),
        (4, 6),
        (4, 8),
        (8, 8),
        (8, 2),
        (0, 2),
    ]);
    let area = signed_area2(&polygon);
    assert!(area > 0);

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let count = ear_clip(&polygon, &mut shape, &mut diagnostics);

    assert_eq!(count, polygon.len() - 2);
    assert_eq!(shape.area2(), area);
    assert!(diagnostics.is_empty());
}

#[test]
fn flat_contours_are_dropped() {
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let line = points(&[(0, 0), (5, 5), (10, 10), (5, 5)]);
    assert_eq!(ear_clip(&line, &mut shape, &mut diagnostics), 0);
    assert_eq!(fill_convex_polygon(&line[..2], &mut shape, &mut diagnostics), 0);

    assert!(shape.interior().is_empty());
    assert_eq!(diagnostics.len(), 2);
}
