#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Fill tessellation of integer polygons.
//!
//! This crate is reexported in [polytess](https://docs.rs/polytess/).
//!
//! ## Overview
//!
//! The most interesting types and functions of this crate are:
//!
//! * [FillTessellator](struct.FillTessellator.html) - Runs the whole pipeline for a set of
//!   paths and populates a [Shape](struct.Shape.html).
//! * [split_intersecting_paths](fn.split_intersecting_paths.html) - Resolves crossings between
//!   and within paths.
//! * [tessellate_path](fn.tessellate_path.html),
//!   [tessellate_path_simple](fn.tessellate_path_simple.html) and
//!   [triangulate_monotone](fn.triangulate_monotone.html) - Triangulate a single simple contour.
//! * [Diagnostics](trait.Diagnostics.html) - Receives the degenerate cases the tessellator
//!   recovered from.
//!
//! ## The tessellation pipeline
//!
//! 1. **Splitting.** The input paths may cross themselves and each other. Every crossing is
//!    computed exactly (and rounded to the integer grid when it isn't a lattice point), the
//!    edges are split there and the pieces are reassembled into simple contours, each tagged
//!    with a chain id.
//! 2. **Classification.** The winding numbers on both sides of every edge are computed with
//!    the exact winding number of the middle of the edge. Edges that don't separate a filled
//!    area from an unfilled one, according to the shape's fill rule, are discarded and the
//!    others are traced into contours with the filled area on their left. Those contours
//!    are grouped into outer boundaries and their holes.
//! 3. **Monotone decomposition.** Each outer boundary and its holes are swept in `y` then `x`
//!    order. Vertices are classified as start, end, split, merge or regular vertices and
//!    diagonals are added to break the polygon into y-monotone pieces.
//! 4. **Triangulation.** Each monotone piece is triangulated with the classic stack based
//!    algorithm, in linear time.
//!
//! All of the arithmetic is exact. Degenerate situations (duplicate points, collinear
//! vertices, zero-area triangles created by rounding intersections) never cause a failure:
//! the offending triangles or contours are dropped and reported to a
//! [Diagnostics](trait.Diagnostics.html) implementation provided by the caller.
//!
//! ## Example
//!
//! ```
//! use polytess_tessellation::{FillOptions, FillTessellator, LogDiagnostics, Shape};
//! use polytess_tessellation::geom::{FillRule, Path};
//!
//! let square = Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
//!
//! let mut shape = Shape::new(0, FillRule::NonZero);
//! let mut tessellator = FillTessellator::new();
//! tessellator
//!     .tessellate(&[square], &FillOptions::default(), &mut shape, &mut LogDiagnostics)
//!     .unwrap();
//!
//! assert_eq!(shape.interior().len(), 2);
//! assert_eq!(shape.area2(), 200);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use polytess_geom as geom;

#[cfg(test)]
use polytess_extra as extra;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod basic_shapes;
mod connection;
mod diagnostics;
mod error;
mod fill;
mod monotone;
mod shape;
mod split;
mod winding;

#[cfg(test)]
mod fill_tests;

#[doc(inline)]
pub use crate::basic_shapes::{ear_clip, fill_convex_polygon};

#[doc(inline)]
pub use crate::diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::monotone::triangulate_monotone;

#[doc(inline)]
pub use crate::shape::{Graphic, Rgba, Shape};

#[doc(inline)]
pub use crate::split::{split_intersecting_paths, split_intersecting_paths_with_limit};

#[doc(inline)]
pub use crate::winding::{classify_contours, fill_boundary, ContourGroup};

pub use crate::geom::{FillRule, Point, Triangle};

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Whether to resolve the intersections between and within the input paths.
    ///
    /// If set to `false`, the paths are assumed to be simple and to not cross each
    /// other. They are only cleaned up (repeated points removed) before the fill rule
    /// is applied. Do not set this to `false` if the paths may have intersecting or
    /// partially overlapping edges, the output would overlap itself.
    ///
    /// Default value: `true`.
    pub handle_intersections: bool,

    /// Maximum number of splitting passes.
    ///
    /// Rounding a crossing to the integer grid moves the edges slightly, which can
    /// create new crossings. They are found by running another pass, until a pass
    /// doesn't find anything or this limit is reached.
    ///
    /// Default value: `FillOptions::DEFAULT_MAX_SPLIT_PASSES`.
    pub max_split_passes: u32,

    /// Triangulate contours without holes that are already convex or monotone
    /// directly, without running the monotone decomposition.
    ///
    /// Default value: `true`.
    pub simple_fast_path: bool,
}

impl FillOptions {
    /// Default maximum number of splitting passes.
    pub const DEFAULT_MAX_SPLIT_PASSES: u32 = 16;

    pub const DEFAULT: Self = FillOptions {
        handle_intersections: true,
        max_split_passes: Self::DEFAULT_MAX_SPLIT_PASSES,
        simple_fast_path: true,
    };

    #[inline]
    pub const fn with_intersections(mut self, intersections: bool) -> Self {
        self.handle_intersections = intersections;
        self
    }

    #[inline]
    pub const fn with_max_split_passes(mut self, passes: u32) -> Self {
        self.max_split_passes = passes;
        self
    }

    #[inline]
    pub const fn with_simple_fast_path(mut self, enabled: bool) -> Self {
        self.simple_fast_path = enabled;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn fill_options() {
    let options = FillOptions::default()
        .with_intersections(false)
        .with_max_split_passes(3);

    assert!(!options.handle_intersections);
    assert_eq!(options.max_split_passes, 3);
    assert!(options.simple_fast_path);
    assert_eq!(FillOptions::DEFAULT.max_split_passes, 16);
}
