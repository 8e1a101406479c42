use crate::predicates::{cross_product, dot_product, orient};
use crate::Point;

use arrayvec::ArrayVec;
use core::cmp::Ordering;

/// An exact rational coordinate, `num / den` with `den > 0`.
///
/// Returned by the sweep queries of [`Edge`]. Intercepts are totally ordered
/// and can be compared with integer coordinates without rounding.
#[derive(Copy, Clone, Debug)]
pub struct Intercept {
    num: i64,
    den: i64,
}

impl Intercept {
    #[inline]
    pub const fn from_int(v: i32) -> Self {
        Intercept {
            num: v as i64,
            den: 1,
        }
    }

    fn new(num: i64, den: i64) -> Self {
        debug_assert!(den != 0);
        if den < 0 {
            Intercept {
                num: -num,
                den: -den,
            }
        } else {
            Intercept { num, den }
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.num % self.den == 0
    }

    /// Compares with an integer coordinate.
    #[inline]
    pub fn cmp_int(&self, v: i32) -> Ordering {
        self.num.cmp(&(v as i64 * self.den))
    }

    /// Rounds half toward positive infinity.
    #[inline]
    pub fn round(&self) -> i32 {
        (2 * self.num + self.den).div_euclid(2 * self.den) as i32
    }
}

impl PartialEq for Intercept {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Intercept {}

impl Ord for Intercept {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as i128 * other.den as i128;
        let rhs = other.num as i128 * self.den as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Intercept {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Round half toward positive infinity, `den > 0`.
#[inline]
fn round_rational(num: i128, den: i128) -> i32 {
    (2 * num + den).div_euclid(2 * den) as i32
}

/// A directed segment.
///
/// `index` identifies the input edge this segment was cut from, so that the
/// pieces of a split edge can be traced back to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    pub index: u32,
}

impl Edge {
    #[inline]
    pub fn new(from: Point, to: Point, index: u32) -> Self {
        Edge { from, to, index }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.from.y() == self.to.y()
    }

    /// The endpoint that comes first in sweep order.
    #[inline]
    pub fn lower(&self) -> Point {
        self.from.min(self.to)
    }

    /// The endpoint that comes last in sweep order.
    #[inline]
    pub fn upper(&self) -> Point {
        self.from.max(self.to)
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Edge::new(self.to, self.from, self.index)
    }

    /// Squared length.
    #[inline]
    pub fn square_length(&self) -> i64 {
        let v = self.to - self.from;
        dot_product(v, v)
    }

    /// Where the edge crosses the horizontal line at `y`, if it spans it.
    ///
    /// A horizontal edge lying on the line intercepts it at its right-most
    /// endpoint.
    pub fn y_intersect(&self, y: i32) -> Option<Intercept> {
        let (a, b) = (self.from, self.to);
        if y < a.y().min(b.y()) || y > a.y().max(b.y()) {
            return None;
        }

        if a.y() == b.y() {
            return Some(Intercept::from_int(a.x().max(b.x())));
        }

        let dy = b.y() as i64 - a.y() as i64;
        let dx = b.x() as i64 - a.x() as i64;
        let num = a.x() as i64 * dy + (y as i64 - a.y() as i64) * dx;

        Some(Intercept::new(num, dy))
    }

    /// Where the edge crosses the vertical line at `x`, if it spans it.
    ///
    /// A vertical edge lying on the line intercepts it at its top-most
    /// endpoint.
    pub fn x_intersect(&self, x: i32) -> Option<Intercept> {
        let (a, b) = (self.from, self.to);
        if x < a.x().min(b.x()) || x > a.x().max(b.x()) {
            return None;
        }

        if a.x() == b.x() {
            return Some(Intercept::from_int(a.y().max(b.y())));
        }

        let dx = b.x() as i64 - a.x() as i64;
        let dy = b.y() as i64 - a.y() as i64;
        let num = a.y() as i64 * dx + (x as i64 - a.x() as i64) * dy;

        Some(Intercept::new(num, dx))
    }

    /// Whether the two edges cross at a single point interior to both.
    ///
    /// Touching at an endpoint and collinear overlaps don't count.
    pub fn edge_intersect(&self, other: &Edge) -> bool {
        let o1 = orient(&self.from, &self.to, &other.from).signum();
        let o2 = orient(&self.from, &self.to, &other.to).signum();
        let o3 = orient(&other.from, &other.to, &self.from).signum();
        let o4 = orient(&other.from, &other.to, &self.to).signum();

        o1 * o2 < 0 && o3 * o4 < 0
    }

    /// The crossing point of two edges that intersect as defined by
    /// `edge_intersect`.
    ///
    /// The exact intersection is rounded to the integer grid, half toward
    /// positive infinity on each axis, so the result doesn't depend on the
    /// order of the edges.
    pub fn intersection(&self, other: &Edge) -> Option<Point> {
        if !self.edge_intersect(other) {
            return None;
        }

        let r = self.to - self.from;
        let s = other.to - other.from;
        let mut den = cross_product(r, s) as i128;
        let mut t = cross_product(other.from - self.from, s) as i128;
        if den < 0 {
            den = -den;
            t = -t;
        }

        let x = self.from.x() as i128 * den + r.x as i128 * t;
        let y = self.from.y() as i128 * den + r.y as i128 * t;

        Some(Point::new(round_rational(x, den), round_rational(y, den)))
    }

    /// Whether `p` is on the edge, excluding the endpoints.
    pub fn contains_point_strictly(&self, p: &Point) -> bool {
        if orient(&self.from, &self.to, p) != 0 {
            return false;
        }

        let d = self.to - self.from;
        dot_product(*p - self.from, d) > 0 && dot_product(*p - self.to, d) < 0
    }

    /// Whether the bounding boxes of the two edges overlap, boundaries
    /// included.
    #[inline]
    pub fn bounding_boxes_overlap(&self, other: &Edge) -> bool {
        let (a, b, c, d) = (self.from, self.to, other.from, other.to);
        a.x().max(b.x()) >= c.x().min(d.x())
            && c.x().max(d.x()) >= a.x().min(b.x())
            && a.y().max(b.y()) >= c.y().min(d.y())
            && c.y().max(d.y()) >= a.y().min(b.y())
    }

    /// The points at which this edge must be cut so that it neither crosses
    /// nor overlaps `other`.
    ///
    /// This is either the crossing point of the two edges, unless it rounds to
    /// one of this edge's endpoints, or the endpoints of `other` that lie
    /// strictly inside this edge (T junctions and collinear overlaps).
    pub fn split_points(&self, other: &Edge) -> ArrayVec<Point, 2> {
        let mut points = ArrayVec::new();
        if self.is_degenerate() || !self.bounding_boxes_overlap(other) {
            return points;
        }

        if let Some(p) = self.intersection(other) {
            if p != self.from && p != self.to {
                points.push(p);
            }
            return points;
        }

        if self.contains_point_strictly(&other.from) {
            points.push(Point::new(other.from.x(), other.from.y()));
        }
        if other.to != other.from && self.contains_point_strictly(&other.to) {
            points.push(Point::new(other.to.x(), other.to.y()));
        }

        points
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn horizontal_queries() {
    let e = Edge::new(point(0, 0), point(10, 20), 0);

    assert_eq!(e.y_intersect(10), Some(Intercept::from_int(5)));
    assert_eq!(e.y_intersect(-1), None);
    assert_eq!(e.y_intersect(21), None);

    let third = e.y_intersect(5).unwrap();
    assert!(!third.is_integer());
    assert_eq!(third.cmp_int(2), Ordering::Greater);
    assert_eq!(third.cmp_int(3), Ordering::Less);
    assert_eq!(third.round(), 3);

    // Direction doesn't matter.
    assert_eq!(e.reversed().y_intersect(5), Some(third));

    let flat = Edge::new(point(8, 3), point(2, 3), 1);
    assert_eq!(flat.y_intersect(3), Some(Intercept::from_int(8)));
    assert_eq!(flat.y_intersect(4), None);
}

#[test]
fn vertical_queries() {
    let e = Edge::new(point(0, 0), point(20, 10), 0);
    assert_eq!(e.x_intersect(10), Some(Intercept::from_int(5)));
    assert_eq!(e.x_intersect(30), None);

    let vertical = Edge::new(point(4, 9), point(4, -1), 0);
    assert_eq!(vertical.x_intersect(4), Some(Intercept::from_int(9)));
}

#[test]
fn rounding_half_up() {
    assert_eq!(round_rational(5, 2), 3);
    assert_eq!(round_rational(-5, 2), -2);
    assert_eq!(round_rational(7, 3), 2);
    assert_eq!(round_rational(-7, 3), -2);
    assert_eq!(Intercept::new(5, -2).round(), -2);
}

#[test]
fn strict_intersections() {
    let a = Edge::new(point(0, 0), point(10, 10), 0);
    let b = Edge::new(point(10, 0), point(0, 10), 1);
    assert!(a.edge_intersect(&b));
    assert_eq!(a.intersection(&b), Some(point(5, 5)));

    // Shared endpoint.
    let c = Edge::new(point(10, 10), point(20, 0), 2);
    assert!(!a.edge_intersect(&c));

    // T junction.
    let d = Edge::new(point(5, 5), point(10, 0), 3);
    assert!(!a.edge_intersect(&d));

    // Collinear overlap.
    let e = Edge::new(point(5, 5), point(15, 15), 4);
    assert!(!a.edge_intersect(&e));
}

#[test]
fn intersection_is_symmetric() {
    let a = Edge::new(point(0, 0), point(3, 1), 0);
    let b = Edge::new(point(0, 1), point(4, 0), 1);
    let p = a.intersection(&b).unwrap();
    assert_eq!(b.intersection(&a), Some(p));
    assert_eq!(a.reversed().intersection(&b), Some(p));
    // Exact intersection at (12/7, 4/7).
    assert_eq!(p, point(2, 1));
}

#[test]
fn split_points() {
    let a = Edge::new(point(0, 0), point(10, 0), 0);

    let crossing = Edge::new(point(4, -3), point(4, 3), 1);
    assert_eq!(a.split_points(&crossing).as_slice(), &[point(4, 0)]);

    let t_junction = Edge::new(point(6, 0), point(6, 8), 2);
    assert_eq!(a.split_points(&t_junction).as_slice(), &[point(6, 0)]);
    assert!(t_junction.split_points(&a).is_empty());

    let overlap = Edge::new(point(2, 0), point(15, 0), 3);
    assert_eq!(a.split_points(&overlap).as_slice(), &[point(2, 0)]);
    assert_eq!(overlap.split_points(&a).as_slice(), &[point(10, 0)]);

    let inside = Edge::new(point(7, 0), point(3, 0), 4);
    assert_eq!(a.split_points(&inside).as_slice(), &[point(7, 0), point(3, 0)]);

    let disjoint = Edge::new(point(0, 1), point(10, 1), 5);
    assert!(a.split_points(&disjoint).is_empty());
}
