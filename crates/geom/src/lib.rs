#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Integer geometry for the polytess crates.
//!
//! All coordinates are `i32` and every predicate is evaluated exactly, with
//! `i64` (orientation, dot products) or `i128` (intersections, rational
//! comparisons) intermediates. There is no tolerance threshold anywhere: two
//! points are equal if and only if their coordinates are equal, and a point
//! is on a segment only if it is exactly on it.
//!
//! Coordinates must stay within `[-MAX_COORDINATE, MAX_COORDINATE]` for the
//! arithmetic to be overflow-free.
//!
//! # Sweep order
//!
//! Points are totally ordered by `y` and then by `x`. This is the order in
//! which the sweep-line algorithms of `polytess_tessellation` visit vertices,
//! and it is the `Ord` implementation of [`Point`].
//!
//! # Orientation
//!
//! The y axis points up: `cross_product(vector(1, 0), vector(0, 1)) == 1` and
//! a positive cross product is a counter-clockwise turn.
//!
//! ```
//! use polytess_geom::{point, predicates::orient};
//!
//! assert!(orient(&point(0, 0), &point(10, 0), &point(10, 10)) > 0);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod chain;
mod cyclic;
mod edge;
mod path;
mod point;
pub mod predicates;
mod triangle;

#[doc(inline)]
pub use crate::chain::{chain_iter, ChainIter};
#[doc(inline)]
pub use crate::cyclic::CyclicEdgeLength;
#[doc(inline)]
pub use crate::edge::{Edge, Intercept};
#[doc(inline)]
pub use crate::path::{FillRule, Path};
#[doc(inline)]
pub use crate::point::{point, Point};
#[doc(inline)]
pub use crate::predicates::cross_product;
#[doc(inline)]
pub use crate::triangle::Triangle;

/// Largest absolute value accepted for a coordinate.
///
/// Differences of coordinates fit in 31 bits and their products in 62 bits,
/// which keeps every orientation test within `i64`.
pub const MAX_COORDINATE: i32 = 1 << 29;

/// A difference between two points, widened to `i64`.
pub type Vector = euclid::default::Vector2D<i64>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: i64, y: i64) -> Vector {
    Vector::new(x, y)
}

/// Returns true if both coordinates are within the supported range.
#[inline]
pub fn is_in_range(x: i32, y: i32) -> bool {
    let range = -MAX_COORDINATE..=MAX_COORDINATE;
    range.contains(&x) && range.contains(&y)
}
