use crate::basic_shapes::{ccw_ring, fill_convex_polygon, is_convex};
use crate::connection::monotone_faces;
use crate::diagnostics::Diagnostics;
use crate::monotone::{is_y_monotone, monotone_diagonals, triangulate_monotone, Polygon};
use crate::shape::Shape;
use crate::split::{clean_paths, split_intersecting_paths_with_limit};
use crate::winding::{classify_contours, fill_boundary};
use crate::{FillOptions, TessellationError, TessellationResult};
use polytess_geom::{chain_iter, is_in_range, ChainIter, Path, Point};

use alloc::vec::Vec;

macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            log::trace!(target: "polytess::fill", $fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            log::trace!(target: "polytess::fill", $fmt, $($arg)*);
        }
    );
}

/// Triangulates a simple contour.
///
/// The vertices are classified in sweep order, the contour is split into
/// monotone pieces and each piece is triangulated with
/// [`triangulate_monotone`]. The triangles are added to `shape`.
///
/// Returns the number of triangles generated.
pub fn tessellate_path<'l, I>(path: I, shape: &mut Shape, diagnostics: &mut dyn Diagnostics) -> usize
where
    I: IntoIterator<Item = &'l Point> + Clone,
{
    tessellate_polygon(path, &[], shape, diagnostics)
}

/// Triangulates the area between an outer contour and its holes.
///
/// The contours must not cross each other, and the holes must be inside of
/// the outer contour. They may touch at shared vertices. Their orientations
/// don't matter.
///
/// Returns the number of triangles generated.
pub fn tessellate_polygon<'l, I>(
    outer: I,
    holes: &[I],
    shape: &mut Shape,
    diagnostics: &mut dyn Diagnostics,
) -> usize
where
    I: IntoIterator<Item = &'l Point> + Clone,
{
    let mut polygon = Polygon::new();
    if !polygon.add_ring(outer, false, diagnostics) {
        return 0;
    }
    for hole in holes {
        polygon.add_ring(hole.clone(), true, diagnostics);
    }

    let diagonals = monotone_diagonals(&polygon, diagnostics);
    let faces = monotone_faces(&polygon, &diagonals, diagnostics);

    faces
        .iter()
        .map(|face| triangulate_monotone(face, shape, diagnostics))
        .sum()
}

/// Triangulates a simple contour, skipping the monotone decomposition when
/// it isn't needed.
///
/// Convex contours are triangulated as a fan and monotone ones are passed
/// directly to [`triangulate_monotone`]. Other contours go through
/// [`tessellate_path`].
///
/// Returns the number of triangles generated.
pub fn tessellate_path_simple<'l, I>(
    path: I,
    shape: &mut Shape,
    diagnostics: &mut dyn Diagnostics,
) -> usize
where
    I: IntoIterator<Item = &'l Point>,
{
    let ring = match ccw_ring(path, diagnostics) {
        Some(ring) => ring,
        None => return 0,
    };

    if !is_y_monotone(&ring) {
        return tessellate_path(&ring, shape, diagnostics);
    }

    if is_convex(&ring) {
        fill_convex_polygon(&ring, shape, diagnostics)
    } else {
        triangulate_monotone(&ring, shape, diagnostics)
    }
}

/// A fill tessellator for integer paths.
///
/// The tessellator runs the whole pipeline for one shape at a time:
///
/// 1. The intersections between and within the paths are resolved (see
///    [`split_intersecting_paths`](crate::split_intersecting_paths)).
/// 2. The fill rule of the shape is applied to the resulting edges, which
///    gives the boundary of the filled area (see
///    [`fill_boundary`](crate::fill_boundary)).
/// 3. The boundary contours are grouped into regions, each made of an outer
///    contour and its holes (see [`classify_contours`](crate::classify_contours)).
/// 4. Each filled region is triangulated.
///
/// The shape's outline receives the boundary contours, counter-clockwise
/// around the filled area and clockwise around holes, tagged with their
/// chain ids, and its interior receives the triangles. A shape can only be tessellated
/// once.
///
/// # Example
///
/// ```
/// use polytess_tessellation::{Diagnostic, FillOptions, FillTessellator, Shape};
/// use polytess_tessellation::geom::{FillRule, Path};
///
/// // A self-intersecting "figure eight".
/// let path = Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
///
/// let mut shape = Shape::new(1, FillRule::NonZero);
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let mut tessellator = FillTessellator::new();
///
/// let result = tessellator.tessellate(
///     &[path],
///     &FillOptions::default(),
///     &mut shape,
///     &mut diagnostics,
/// );
///
/// assert!(result.is_ok());
/// // Two lobes, one triangle each.
/// assert_eq!(shape.chain_count(), 2);
/// assert_eq!(shape.interior().len(), 2);
/// ```
pub struct FillTessellator {
    log: bool,
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl FillTessellator {
    /// Constructor.
    pub fn new() -> Self {
        #[cfg(all(debug_assertions, feature = "std"))]
        let log = std::env::var("POLYTESS_FORCE_LOGGING").is_ok();
        #[cfg(not(all(debug_assertions, feature = "std")))]
        let log = false;

        FillTessellator { log }
    }

    /// Enable/disable some verbose logging during the tessellation, for
    /// debugging purposes.
    ///
    /// The messages are emitted at the trace level with the `polytess::fill`
    /// target.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(all(debug_assertions, feature = "std"))]
        let forced = std::env::var("POLYTESS_FORCE_LOGGING").is_ok();

        #[cfg(not(all(debug_assertions, feature = "std")))]
        let forced = false;

        self.log = is_enabled || forced;
    }

    /// Compute the tessellation of a set of paths into `shape`.
    ///
    /// Paths are implicitly closed. Degenerate situations are reported to
    /// `diagnostics` and never cause a failure. If an error is returned, the
    /// shape is left untouched.
    pub fn tessellate(
        &mut self,
        paths: &[Path],
        options: &FillOptions,
        shape: &mut Shape,
        diagnostics: &mut dyn Diagnostics,
    ) -> TessellationResult {
        if shape.is_tessellated() {
            return Err(TessellationError::ShapeAlreadyTessellated { id: shape.id });
        }

        if let Some(p) = paths
            .iter()
            .flat_map(|path| path.iter())
            .find(|p| !is_in_range(p.x(), p.y()))
        {
            tess_log!(self, "Tessellation failed: ({}, {}) is out of range.", p.x(), p.y());
            return Err(TessellationError::CoordinateOutOfRange { x: p.x(), y: p.y() });
        }

        let contours = if options.handle_intersections {
            split_intersecting_paths_with_limit(paths, options.max_split_passes, diagnostics)
        } else {
            clean_paths(paths, diagnostics)
        };

        let boundary = fill_boundary(&contours, shape.winding);

        tess_log!(
            self,
            "shape #{}: {} paths, {} contours, {} on the boundary",
            shape.id,
            paths.len(),
            contours.len(),
            boundary.len()
        );

        let outline: Vec<Point> = boundary
            .iter()
            .flat_map(|contour| contour.points.iter().copied())
            .collect();

        let groups = classify_contours(&outline, shape.winding, diagnostics);

        for group in &groups {
            tess_log!(
                self,
                "region of contour #{} with {} holes",
                group.outer,
                group.holes.len()
            );

            let outer = chain_iter(&outline, group.outer);
            let count = if group.holes.is_empty() && options.simple_fast_path {
                tessellate_path_simple(outer, shape, diagnostics)
            } else {
                let holes: Vec<ChainIter> = group
                    .holes
                    .iter()
                    .map(|&hole| chain_iter(&outline, hole))
                    .collect();
                tessellate_polygon(outer, &holes, shape, diagnostics)
            };

            tess_log!(self, " -> {} triangles", count);
        }

        tess_log!(
            self,
            "shape #{}: {} triangles, area {}",
            shape.id,
            shape.interior().len(),
            shape.area2()
        );

        shape.set_tessellated(outline);

        Ok(())
    }
}
