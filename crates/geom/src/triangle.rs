use crate::predicates::{orient, point_in_triangle};
use crate::Point;

/// A triangle defined by three points `a`, `b` and `c`.
///
/// Triangles are plain values: the points are copied in and can't be
/// modified afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
}

impl Triangle {
    #[inline]
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Triangle { a, b, c }
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    #[inline]
    pub fn c(&self) -> Point {
        self.c
    }

    #[inline]
    pub fn points(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Twice the signed area, positive for counter-clockwise triangles.
    #[inline]
    pub fn signed_area2(&self) -> i64 {
        orient(&self.a, &self.b, &self.c)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.signed_area2() == 0
    }

    /// The same triangle, oriented counter-clockwise.
    pub fn to_ccw(&self) -> Self {
        if self.signed_area2() < 0 {
            Triangle::new(self.a, self.c, self.b)
        } else {
            *self
        }
    }

    /// Whether `p` is strictly inside the triangle.
    #[inline]
    pub fn contains_point(&self, p: &Point) -> bool {
        point_in_triangle(p, &self.a, &self.b, &self.c)
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn orientation() {
    let t = Triangle::new(point(0, 0), point(0, 4), point(3, 0));
    assert_eq!(t.signed_area2(), -12);

    let ccw = t.to_ccw();
    assert_eq!(ccw.signed_area2(), 12);
    assert_eq!(ccw.points(), [point(0, 0), point(3, 0), point(0, 4)]);
    assert_eq!(ccw.to_ccw(), ccw);

    assert!(Triangle::new(point(0, 0), point(1, 1), point(2, 2)).is_degenerate());
}

#[test]
fn contains_point() {
    let t = Triangle::new(point(0, 0), point(6, 0), point(0, 6));
    assert!(t.contains_point(&point(1, 1)));
    assert!(!t.contains_point(&point(3, 3)));
    assert!(!t.contains_point(&point(6, 0)));
}
