use crate::{vector, Vector};

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Mul, Sub};

/// An integer 2D position tagged with its origin.
///
/// `index` is the position of the point in the path it was read from, or
/// [`Point::SYNTHESIZED`] for vertices created by the tessellator (for example
/// at the crossing of two edges). `chain` identifies the contour the point
/// belongs to once the intersections have been resolved.
///
/// Equality, hashing and ordering only look at the coordinates. The order is
/// the sweep order: `y` first, then `x`.
///
/// The coordinates can be read through [`Point::x`] and [`Point::y`] but can
/// only be set at construction.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Point {
    x: i32,
    y: i32,
    pub index: u32,
    pub chain: u32,
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

impl Point {
    /// Index of the points that don't come from an input path.
    pub const SYNTHESIZED: u32 = u32::MAX;

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point {
            x,
            y,
            index: Self::SYNTHESIZED,
            chain: 0,
        }
    }

    #[inline]
    pub const fn with_index(x: i32, y: i32, index: u32) -> Self {
        Point {
            x,
            y,
            index,
            chain: 0,
        }
    }

    #[inline]
    pub const fn with_chain(mut self, chain: u32) -> Self {
        self.chain = chain;
        self
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn is_synthesized(&self) -> bool {
        self.index == Self::SYNTHESIZED
    }

    /// The position as a vector from the origin.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        vector(self.x as i64, self.y as i64)
    }

    /// Dot product of the two positions seen as vectors.
    #[inline]
    pub fn dot(&self, other: &Point) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
    }

    /// Same coordinates, ignoring the index and the chain.
    #[inline]
    pub fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Point) -> bool {
        self.same_position(other)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl Ord for Point {
    #[inline]
    fn cmp(&self, other: &Point) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    #[inline]
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Sub for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, other: Point) -> Vector {
        vector(
            self.x as i64 - other.x as i64,
            self.y as i64 - other.y as i64,
        )
    }
}

/// Component-wise sum. The result is a synthesized point.
impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Scales the coordinates. The index and the chain are preserved.
impl Mul<i32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, s: i32) -> Point {
        Point {
            x: self.x * s,
            y: self.y * s,
            ..self
        }
    }
}

#[test]
fn sweep_order() {
    let mut points = [point(3, 1), point(0, 2), point(-1, 1), point(5, 0)];
    points.sort();
    assert_eq!(
        points,
        [point(5, 0), point(-1, 1), point(3, 1), point(0, 2)]
    );
}

#[test]
fn equality_ignores_index_and_chain() {
    let a = Point::with_index(4, 7, 2).with_chain(3);
    let b = point(4, 7);
    assert_eq!(a, b);
    assert!(b.is_synthesized());
    assert!(!a.is_synthesized());
    assert_ne!(a, point(7, 4));
}

#[test]
fn arithmetic() {
    let a = point(3, -2);
    let b = point(1, 5);
    assert_eq!(a - b, vector(2, -7));
    assert_eq!(a + b, point(4, 3));
    assert_eq!(a * 2, point(6, -4));
    assert_eq!(a.dot(&b), 3 - 10);
}
