#![deny(bare_trait_objects)]

//! Exact fill tessellation of integer polygons.
//!
//! # Crates
//!
//! This meta-crate (`polytess`) reexports the following sub-crates for convenience:
//!
//! * **polytess_tessellation** - The fill tessellator and its building blocks.
//! * **polytess_geom** - Integer points, edges and exact orientation predicates.
//! * **polytess_extra** - Reference shapes and debugging tools.
//!
//! Each `polytess_<name>` crate is reexported as a `<name>` module in `polytess`. For example:
//!
//! ```ignore
//! extern crate polytess_tessellation;
//! use polytess_tessellation::FillTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate polytess;
//! use polytess::tessellation::FillTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! When using the main crate `polytess`, the `polytess_extra` dependency is disabled by
//! default. It can be added with the feature flag `extra`.
//!
//! # Example
//!
//! Paths are lists of integer coordinates and are implicitly closed. They may cross
//! themselves and each other: the crossings are resolved before the triangulation.
//!
//! ```
//! use polytess::geom::{FillRule, Path};
//! use polytess::tessellation::{Diagnostic, FillOptions, FillTessellator, Shape};
//!
//! // Two overlapping squares.
//! let paths = [
//!     Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
//!     Path::polygon(&[(5, 5), (15, 5), (15, 15), (5, 15)]),
//! ];
//!
//! let mut shape = Shape::new(0, FillRule::NonZero);
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! FillTessellator::new()
//!     .tessellate(&paths, &FillOptions::default(), &mut shape, &mut diagnostics)
//!     .unwrap();
//!
//! // The triangles cover the union of the squares, once.
//! assert_eq!(shape.area2(), 2 * 175);
//!
//! for triangle in shape.interior() {
//!     let [a, b, c] = triangle.points();
//!     println!("({}, {}) ({}, {}) ({}, {})", a.x(), a.y(), b.x(), b.y(), c.x(), c.y());
//! }
//! ```
//!
//! # Lower level building blocks
//!
//! The stages of the fill tessellator can be used on their own:
//!
//! * [`split_intersecting_paths`](tessellation::split_intersecting_paths) turns arbitrary
//!   paths into contours that don't cross.
//! * [`tessellate_path`](tessellation::tessellate_path) and
//!   [`tessellate_path_simple`](tessellation::tessellate_path_simple) triangulate a single
//!   simple contour.
//! * [`triangulate_monotone`](tessellation::triangulate_monotone) triangulates a y-monotone
//!   contour in linear time.

pub extern crate polytess_tessellation;
#[cfg(feature = "extra")]
pub extern crate polytess_extra;

#[cfg(feature = "extra")]
pub use polytess_extra as extra;
pub use polytess_tessellation as tessellation;
pub use tessellation::geom;
