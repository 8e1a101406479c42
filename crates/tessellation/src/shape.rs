use crate::diagnostics::{Diagnostic, Diagnostics};
use polytess_geom::{chain_iter, ChainIter, FillRule, Point, Triangle};

use alloc::vec::Vec;

/// An 8 bits per channel color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Self = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Self = Rgba::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

/// Fill and stroke attributes of a shape.
///
/// They are carried along for the renderer and play no part in the
/// tessellation. `filled0` and `filled1` select the fills on either side of
/// the outline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Graphic {
    pub filled0: bool,
    pub filled1: bool,
    pub stroked: bool,
    pub color0: Rgba,
    pub color1: Rgba,
    pub stroke_color: Rgba,
}

impl Graphic {
    pub const fn fill(color: Rgba) -> Self {
        Graphic {
            filled0: true,
            filled1: false,
            stroked: false,
            color0: color,
            color1: Rgba::TRANSPARENT,
            stroke_color: Rgba::TRANSPARENT,
        }
    }
}

/// A fill region: the outline it was built from and the triangles covering
/// its interior.
///
/// A shape is created empty with its fill rule and attributes, populated once
/// by [`FillTessellator::tessellate`](crate::FillTessellator::tessellate) and
/// read-only afterwards.
///
/// The outline holds the points of all the contours back to back. The points
/// of each contour are tagged with its chain id and can be iterated over with
/// [`Shape::chain`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Shape {
    pub(crate) interior: Vec<Triangle>,
    pub(crate) outline: Vec<Point>,
    pub graphic: Graphic,
    pub closed: bool,
    pub winding: FillRule,
    pub id: u32,
    tessellated: bool,
}

impl Shape {
    pub fn new(id: u32, winding: FillRule) -> Self {
        Shape {
            interior: Vec::new(),
            outline: Vec::new(),
            graphic: Graphic::default(),
            closed: true,
            winding,
            id,
            tessellated: false,
        }
    }

    pub fn with_graphic(mut self, graphic: Graphic) -> Self {
        self.graphic = graphic;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    #[inline]
    pub fn interior(&self) -> &[Triangle] {
        &self.interior
    }

    #[inline]
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    /// The points of one contour of the outline.
    #[inline]
    pub fn chain(&self, chain: u32) -> ChainIter {
        chain_iter(&self.outline, chain)
    }

    /// Number of contours in the outline.
    pub fn chain_count(&self) -> u32 {
        self.outline.iter().map(|p| p.chain + 1).max().unwrap_or(0)
    }

    /// Whether the shape has been populated by the fill tessellator.
    #[inline]
    pub fn is_tessellated(&self) -> bool {
        self.tessellated
    }

    /// Twice the area covered by the triangles.
    pub fn area2(&self) -> i128 {
        self.interior
            .iter()
            .map(|t| t.signed_area2() as i128)
            .sum()
    }

    /// Adds a triangle to the interior, oriented counter-clockwise.
    ///
    /// Zero-area triangles are reported and dropped.
    pub(crate) fn push_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        diagnostics: &mut dyn Diagnostics,
    ) -> bool {
        let triangle = Triangle::new(a, b, c);
        if triangle.is_degenerate() {
            diagnostics.report(Diagnostic::DegenerateTriangle { a, b, c });
            return false;
        }

        self.interior.push(triangle.to_ccw());
        true
    }

    pub(crate) fn set_tessellated(&mut self, outline: Vec<Point>) {
        self.outline = outline;
        self.tessellated = true;
    }
}

#[test]
fn chains() {
    use polytess_geom::point;

    let mut shape = Shape::new(3, FillRule::NonZero).with_graphic(Graphic::fill(Rgba::BLACK));
    assert_eq!(shape.chain_count(), 0);
    assert!(!shape.is_tessellated());

    shape.set_tessellated(alloc::vec![
        point(0, 0).with_chain(0),
        point(1, 0).with_chain(0),
        point(5, 5).with_chain(1),
        point(1, 1).with_chain(0),
    ]);

    assert!(shape.is_tessellated());
    assert_eq!(shape.chain_count(), 2);
    assert_eq!(shape.chain(0).count(), 3);
    assert_eq!(shape.chain(1).next(), Some(&point(5, 5)));
    assert_eq!(shape.graphic.color0, Rgba::BLACK);
}

#[test]
fn degenerate_triangles_are_dropped() {
    use polytess_geom::point;

    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let mut diagnostics: alloc::vec::Vec<Diagnostic> = alloc::vec::Vec::new();

    assert!(shape.push_triangle(point(0, 0), point(0, 4), point(4, 0), &mut diagnostics));
    assert!(!shape.push_triangle(point(0, 0), point(2, 2), point(4, 4), &mut diagnostics));

    assert_eq!(shape.interior().len(), 1);
    assert_eq!(shape.interior()[0].signed_area2(), 16);
    assert_eq!(shape.area2(), 16);
    assert_eq!(diagnostics.len(), 1);
}
