use crate::predicates::signed_area2;
use crate::{Edge, Point};

use alloc::vec::Vec;

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
///
/// The numeric codes (`EvenOdd = 0`, `NonZero = 1`) are the ones used by the
/// shape descriptions the paths are read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd = 0,
    NonZero = 1,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FillRule::EvenOdd),
            1 => Some(FillRule::NonZero),
            _ => None,
        }
    }
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::EvenOdd
    }
}

/// A polyline, as produced by the path parsers.
///
/// Open paths are implicitly closed when filled: [`Path::edges`] always
/// includes the edge from the last point back to the first one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Path {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Path { points, closed }
    }

    /// A closed path from a list of coordinates. Each point's index is its
    /// position in the list.
    pub fn polygon(coords: &[(i32, i32)]) -> Self {
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::with_index(x, y, i as u32))
            .collect();

        Path {
            points,
            closed: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<Point> {
        self.points.iter()
    }

    /// Iterates over the edges of the path, closing edge included.
    ///
    /// Edge `i` goes from point `i` to point `i + 1` and has index
    /// `first_index + i`.
    pub fn edges(&self, first_index: u32) -> impl Iterator<Item = Edge> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| {
            Edge::new(
                self.points[i],
                self.points[(i + 1) % n],
                first_index + i as u32,
            )
        })
    }

    /// Twice the signed area enclosed by the path.
    #[inline]
    pub fn signed_area2(&self) -> i128 {
        signed_area2(&self.points)
    }

    /// Removes consecutive duplicate points, including a last point equal to
    /// the first one.
    pub fn dedup(&mut self) {
        self.points.dedup();
        while self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = &'l Point;
    type IntoIter = core::slice::Iter<'l, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[test]
fn fill_rule_codes() {
    assert_eq!(FillRule::from_code(0), Some(FillRule::EvenOdd));
    assert_eq!(FillRule::from_code(1), Some(FillRule::NonZero));
    assert_eq!(FillRule::from_code(2), None);
    assert_eq!(FillRule::NonZero.code(), 1);

    assert!(FillRule::EvenOdd.is_in(-1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_out(0));
}

#[test]
fn edges_are_closed() {
    let path = Path::polygon(&[(0, 0), (4, 0), (4, 4)]);
    let edges: Vec<Edge> = path.edges(10).collect();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[2].from, Point::new(4, 4));
    assert_eq!(edges[2].to, Point::new(0, 0));
    assert_eq!(edges[2].index, 12);
    assert_eq!(path.points[1].index, 1);

    assert_eq!(Path::polygon(&[(1, 1)]).edges(0).count(), 0);
}

#[test]
fn dedup() {
    let mut path = Path::polygon(&[(0, 0), (0, 0), (4, 0), (4, 4), (4, 4), (0, 0)]);
    path.dedup();
    assert_eq!(path, Path::polygon(&[(0, 0), (4, 0), (4, 4)]));
    assert_eq!(path.signed_area2(), 16);
}
