//! Monotone decomposition and triangulation.

use crate::basic_shapes::{ccw_ring, ear_clip};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::shape::Shape;
use polytess_geom::predicates::{cross_product, orient};
use polytess_geom::{CyclicEdgeLength, Edge, Intercept, Point};

use alloc::vec::Vec;
use core::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn is_right(self) -> bool {
        self == Side::Right
    }
}

/// The role of a polygon vertex in the sweep.
///
/// "Above" and "below" refer to the sweep order: a point is above another one
/// if it comes after it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum VertexType {
    /// Both neighbors are above and the interior angle is convex.
    Start,
    /// Both neighbors are below and the interior angle is convex.
    End,
    /// Both neighbors are above and the interior angle is reflex.
    Split,
    /// Both neighbors are below and the interior angle is reflex.
    Merge,
    /// One neighbor above and one below. The side tells which boundary of the
    /// interior the vertex is on.
    Regular(Side),
}

/// Classifies `current`, given its neighbors in counter-clockwise order around
/// the interior (counter-clockwise along outer boundaries, clockwise along
/// holes).
pub(crate) fn classify_vertex(prev: &Point, current: &Point, next: &Point) -> VertexType {
    let convex = orient(prev, current, next) >= 0;
    match (prev > current, next > current) {
        (true, true) if convex => VertexType::Start,
        (true, true) => VertexType::Split,
        (false, false) if convex => VertexType::End,
        (false, false) => VertexType::Merge,
        (true, false) => VertexType::Regular(Side::Left),
        (false, true) => VertexType::Regular(Side::Right),
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct PolygonVertex {
    pub pos: Point,
    pub ring: usize,
    pub local: u32,
    pub prev: usize,
    pub next: usize,
}

/// An outer boundary and its holes, as one array of linked vertices.
///
/// The first ring is the outer boundary, oriented counter-clockwise. The
/// other rings are holes, oriented clockwise. Either way the interior is on
/// the left of every edge.
pub(crate) struct Polygon {
    pub vertices: Vec<PolygonVertex>,
    pub ring_lens: Vec<u32>,
}

impl Polygon {
    pub fn new() -> Self {
        Polygon {
            vertices: Vec::new(),
            ring_lens: Vec::new(),
        }
    }

    /// Returns false if the ring doesn't enclose anything and was dropped.
    pub fn add_ring<'l, I>(&mut self, points: I, hole: bool, diagnostics: &mut dyn Diagnostics) -> bool
    where
        I: IntoIterator<Item = &'l Point>,
    {
        let mut ring = match ccw_ring(points, diagnostics) {
            Some(ring) => ring,
            None => return false,
        };

        if hole {
            ring.reverse();
        }

        let ring_idx = self.ring_lens.len();
        let first = self.vertices.len();
        let n = ring.len();
        for (i, pos) in ring.into_iter().enumerate() {
            self.vertices.push(PolygonVertex {
                pos,
                ring: ring_idx,
                local: i as u32,
                prev: first + (i + n - 1) % n,
                next: first + (i + 1) % n,
            });
        }
        self.ring_lens.push(n as u32);

        true
    }

    #[inline]
    pub fn position(&self, vertex: usize) -> Point {
        self.vertices[vertex].pos
    }
}

/// An edge crossing the sweep line with the interior on its right.
#[derive(Copy, Clone, Debug)]
struct ActiveEdge {
    lower: usize,
    upper: usize,
    helper: usize,
}

/// Computes the diagonals that split the polygon into y-monotone pieces.
///
/// The pairs are vertex indices in `polygon.vertices`.
#[cfg_attr(feature = "profiling", inline(never))]
pub(crate) fn monotone_diagonals(
    polygon: &Polygon,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<(usize, usize)> {
    let types = polygon
        .vertices
        .iter()
        .map(|v| classify_vertex(&polygon.position(v.prev), &v.pos, &polygon.position(v.next)))
        .collect();

    let mut sweep = Decomposition {
        polygon,
        types,
        active: Vec::new(),
        diagonals: Vec::new(),
    };

    let mut order: Vec<usize> = (0..polygon.vertices.len()).collect();
    order.sort_by(|&a, &b| polygon.position(a).cmp(&polygon.position(b)).then(a.cmp(&b)));

    for vertex in order {
        sweep.vertex(vertex, diagnostics);
    }

    sweep.diagonals
}

struct Decomposition<'l> {
    polygon: &'l Polygon,
    types: Vec<VertexType>,
    active: Vec<ActiveEdge>,
    diagonals: Vec<(usize, usize)>,
}

impl<'l> Decomposition<'l> {
    fn vertex(&mut self, v: usize, diagnostics: &mut dyn Diagnostics) {
        let PolygonVertex { prev, next, .. } = self.polygon.vertices[v];

        log::trace!(
            "{:?} vertex {} at {:?}",
            self.types[v],
            v,
            self.polygon.position(v)
        );

        match self.types[v] {
            VertexType::Start => {
                self.insert(v, prev);
            }
            VertexType::End => {
                self.end_edge(v, next, diagnostics);
            }
            VertexType::Split => {
                if let Some(left) = self.find_left(v, diagnostics) {
                    let helper = self.active[left].helper;
                    self.add_diagonal(v, helper, diagnostics);
                    self.active[left].helper = v;
                }
                self.insert(v, prev);
            }
            VertexType::Merge => {
                self.end_edge(v, next, diagnostics);
                self.connect_left(v, diagnostics);
            }
            VertexType::Regular(Side::Left) => {
                self.end_edge(v, next, diagnostics);
                self.insert(v, prev);
            }
            VertexType::Regular(Side::Right) => {
                self.connect_left(v, diagnostics);
            }
        }
    }

    fn insert(&mut self, lower: usize, upper: usize) {
        self.active.push(ActiveEdge {
            lower,
            upper,
            helper: lower,
        });
    }

    // Removes the edge going from `v` down to `lower`.
    fn end_edge(&mut self, v: usize, lower: usize, diagnostics: &mut dyn Diagnostics) {
        let idx = self
            .active
            .iter()
            .position(|e| e.lower == lower && e.upper == v);

        match idx {
            Some(idx) => {
                let edge = self.active.remove(idx);
                if self.types[edge.helper] == VertexType::Merge {
                    self.add_diagonal(v, edge.helper, diagnostics);
                }
            }
            None => {
                diagnostics.report(Diagnostic::UnmatchedEdge {
                    at: self.polygon.position(v),
                });
            }
        }
    }

    fn connect_left(&mut self, v: usize, diagnostics: &mut dyn Diagnostics) {
        if let Some(left) = self.find_left(v, diagnostics) {
            let helper = self.active[left].helper;
            if self.types[helper] == VertexType::Merge {
                self.add_diagonal(v, helper, diagnostics);
            }
            self.active[left].helper = v;
        }
    }

    /// The active edge directly on the left of `v`.
    fn find_left(&self, v: usize, diagnostics: &mut dyn Diagnostics) -> Option<usize> {
        let p = self.polygon.position(v);

        let mut best: Option<(usize, Intercept)> = None;
        for (idx, e) in self.active.iter().enumerate() {
            if e.lower == v || e.upper == v {
                continue;
            }

            let edge = Edge::new(
                self.polygon.position(e.lower),
                self.polygon.position(e.upper),
                0,
            );

            let x = match edge.y_intersect(p.y()) {
                Some(x) => x,
                None => continue,
            };

            // Vertices of other rings can share the position of `v`, hence
            // the edges passing exactly through it are candidates.
            if x.cmp_int(p.x()) == Ordering::Greater {
                continue;
            }

            best = match best {
                Some((b, bx)) if self.compare_left(idx, x, b, bx) != Ordering::Greater => {
                    Some((b, bx))
                }
                _ => Some((idx, x)),
            };
        }

        if best.is_none() {
            diagnostics.report(Diagnostic::MissingLeftEdge { at: p });
        }

        best.map(|(idx, _)| idx)
    }

    // Greater if edge `a` is closer to the sweep position than edge `b`.
    fn compare_left(&self, a: usize, ax: Intercept, b: usize, bx: Intercept) -> Ordering {
        let direction = |e: &ActiveEdge| self.polygon.position(e.upper) - self.polygon.position(e.lower);
        let (ea, eb) = (&self.active[a], &self.active[b]);

        // On a tie, the edge that leans the most to the right above the sweep
        // line is the closest.
        ax.cmp(&bx)
            .then_with(|| cross_product(direction(ea), direction(eb)).cmp(&0))
            .then_with(|| eb.lower.cmp(&ea.lower))
    }

    fn add_diagonal(&mut self, a: usize, b: usize, diagnostics: &mut dyn Diagnostics) {
        let (va, vb) = (self.polygon.vertices[a], self.polygon.vertices[b]);
        if va.pos == vb.pos {
            // Rings touching at this position are already connected.
            return;
        }

        if va.ring == vb.ring {
            let edge = CyclicEdgeLength::new(va.local, vb.local, self.polygon.ring_lens[va.ring]);
            if edge.is_degenerate() {
                diagnostics.report(Diagnostic::DegenerateEdge {
                    a: edge.a,
                    b: edge.b,
                    len: edge.len,
                });
                return;
            }
        }

        let key = (a.min(b), a.max(b));
        if self.diagonals.contains(&key) {
            return;
        }

        log::trace!("diagonal {:?} -> {:?}", va.pos, vb.pos);
        self.diagonals.push(key);
    }
}

/// Returns true if the counter-clockwise ring goes up once and down once in
/// sweep order.
pub(crate) fn is_y_monotone(ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return true;
    }

    let mut maxima = 0;
    let mut minima = 0;
    for i in 0..n {
        let prev = &ring[(i + n - 1) % n];
        let current = &ring[i];
        let next = &ring[(i + 1) % n];
        if current == prev || current == next {
            return false;
        }
        if current > prev && current > next {
            maxima += 1;
        }
        if current < prev && current < next {
            minima += 1;
        }
    }

    maxima == 1 && minima == 1
}

/// Helper class that generates a triangulation from a sequence of vertices
/// describing a monotone polygon.
///
/// The vertices are provided in sweep order with the side of the polygon they
/// belong to, starting with the lowest one (`begin`) and ending with the
/// highest one (`end`).
pub(crate) struct MonotoneTessellator {
    stack: Vec<MonotoneVertex>,
    previous: MonotoneVertex,
    triangles: Vec<[Point; 3]>,
}

#[derive(Copy, Clone, Debug)]
struct MonotoneVertex {
    pos: Point,
    side: Side,
}

impl MonotoneTessellator {
    pub fn new() -> Self {
        MonotoneTessellator {
            stack: Vec::new(),
            triangles: Vec::new(),
            // Some placeholder value that will be replaced right away.
            previous: MonotoneVertex {
                pos: Point::new(0, 0),
                side: Side::Left,
            },
        }
    }

    pub fn begin(&mut self, pos: Point) {
        let first = MonotoneVertex {
            pos,
            side: Side::Left,
        };
        self.previous = first;

        self.triangles.clear();
        self.stack.clear();
        self.stack.push(first);
    }

    #[inline]
    pub fn vertex(&mut self, pos: Point, side: Side) {
        self.monotone_vertex(MonotoneVertex { pos, side });
    }

    fn monotone_vertex(&mut self, current: MonotoneVertex) {
        debug_assert!(current.pos >= self.previous.pos);
        debug_assert!(!self.stack.is_empty());

        if current.side != self.previous.side {
            for i in 0..(self.stack.len() - 1) {
                let a = self.stack[i].pos;
                let b = self.stack[i + 1].pos;
                self.triangles.push([a, b, current.pos]);
            }
            self.stack.clear();
            self.stack.push(self.previous);
        } else {
            let mut last_popped = self.stack.pop();
            while let Some(a) = last_popped {
                let b = match self.stack.last() {
                    Some(b) => *b,
                    None => break,
                };

                let turn = orient(&b.pos, &a.pos, &current.pos);
                let convex = if current.side.is_right() {
                    turn > 0
                } else {
                    turn < 0
                };

                if !convex {
                    break;
                }

                self.triangles.push([b.pos, a.pos, current.pos]);
                last_popped = self.stack.pop();
            }
            if let Some(item) = last_popped {
                self.stack.push(item);
            }
        }

        self.stack.push(current);
        self.previous = current;
    }

    pub fn end(&mut self, pos: Point) {
        let side = self.previous.side.opposite();
        self.vertex(pos, side);
        self.stack.clear();
    }

    /// Moves the triangles to the shape. Returns how many were generated.
    pub fn flush(&mut self, shape: &mut Shape, diagnostics: &mut dyn Diagnostics) -> usize {
        let count = self.triangles.len();
        for &[a, b, c] in &self.triangles {
            shape.push_triangle(a, b, c, diagnostics);
        }
        self.triangles.clear();

        count
    }
}

/// Triangulates a y-monotone polygon.
///
/// The two chains going from the lowest to the highest vertex are merged in
/// sweep order and the vertices are processed with a stack, in linear time. A
/// polygon of `n` vertices generates `n - 2` triangles, which is the returned
/// value. The triangles are added to the shape counter-clockwise and the ones
/// with no area are dropped.
///
/// The orientation of the chain doesn't matter. If it turns out to not be
/// monotone, the polygon is reported and triangulated by ear clipping.
pub fn triangulate_monotone<'l, I>(
    chain: I,
    shape: &mut Shape,
    diagnostics: &mut dyn Diagnostics,
) -> usize
where
    I: IntoIterator<Item = &'l Point>,
{
    let ring = match ccw_ring(chain, diagnostics) {
        Some(ring) => ring,
        None => return 0,
    };

    if !is_y_monotone(&ring) {
        diagnostics.report(Diagnostic::NonMonotoneFace {
            vertices: ring.len(),
        });
        return ear_clip(&ring, shape, diagnostics);
    }

    let n = ring.len();
    let mut min = 0;
    let mut max = 0;
    for i in 1..n {
        if ring[i] < ring[min] {
            min = i;
        }
        if ring[i] > ring[max] {
            max = i;
        }
    }

    // Counter-clockwise from the bottom is up the right side.
    let right = (1..n)
        .map(|k| (min + k) % n)
        .take_while(|&i| i != max)
        .map(|i| ring[i]);
    let left = (1..n)
        .map(|k| (min + n - k) % n)
        .take_while(|&i| i != max)
        .map(|i| ring[i]);

    let mut tess = MonotoneTessellator::new();
    tess.begin(ring[min]);

    let mut right = right.peekable();
    let mut left = left.peekable();
    loop {
        let side = match (right.peek(), left.peek()) {
            (Some(r), Some(l)) if r <= l => Side::Right,
            (Some(_), None) => Side::Right,
            (_, Some(_)) => Side::Left,
            (None, None) => break,
        };

        let next = if side.is_right() { right.next() } else { left.next() };
        if let Some(pos) = next {
            tess.vertex(pos, side);
        }
    }

    tess.end(ring[max]);
    tess.flush(shape, diagnostics)
}

#[cfg(test)]
use polytess_geom::{point, FillRule};

#[cfg(test)]
fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| point(x, y)).collect()
}

#[test]
fn vertex_classification() {
    let (p, c, n) = (point(-1, 1), point(0, 0), point(1, 1));
    // Left turn, the interior is above.
    assert_eq!(classify_vertex(&p, &c, &n), VertexType::Start);
    assert_eq!(classify_vertex(&n, &c, &p), VertexType::Split);

    let (p, c, n) = (point(1, -1), point(0, 0), point(-1, -1));
    assert_eq!(classify_vertex(&p, &c, &n), VertexType::End);
    assert_eq!(classify_vertex(&n, &c, &p), VertexType::Merge);

    let (p, c, n) = (point(0, 1), point(0, 0), point(0, -1));
    assert_eq!(classify_vertex(&p, &c, &n), VertexType::Regular(Side::Left));
    assert_eq!(classify_vertex(&n, &c, &p), VertexType::Regular(Side::Right));

    // Ties on y are broken by x.
    let (p, c, n) = (point(5, 0), point(0, 0), point(0, 5));
    assert_eq!(classify_vertex(&p, &c, &n), VertexType::Split);
    assert_eq!(classify_vertex(&n, &c, &p), VertexType::Start);
}

#[test]
fn monotone_chains() {
    assert!(is_y_monotone(&points(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    assert!(is_y_monotone(&points(&[(0, 0), (4, 3), (2, 6), (5, 9), (-3, 5)])));

    // A notch in the top edge.
    let notch = points(&[(0, 0), (10, 0), (10, 10), (5, 5), (0, 10)]);
    assert!(!is_y_monotone(&notch));
}

#[test]
fn merge_vertex_gets_a_diagonal() {
    // Counter-clockwise, with a notch in the bottom edge. Its tip is a merge
    // vertex.
    let mut polygon = Polygon::new();
    let notch = points(&[(0, 0), (5, 5), (10, 0), (10, 10), (0, 10)]);
    assert!(polygon.add_ring(&notch, false, &mut ()));

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let diagonals = monotone_diagonals(&polygon, &mut diagnostics);

    assert_eq!(diagonals.len(), 1);
    let (a, b) = diagonals[0];
    let mut ends = [polygon.position(a), polygon.position(b)];
    ends.sort();
    assert_eq!(ends, [point(5, 5), point(0, 10)]);
    assert!(diagnostics.is_empty());
}

#[test]
fn split_vertex_gets_a_diagonal() {
    // Counter-clockwise, with a notch in the top edge. Its tip is a split
    // vertex.
    let mut polygon = Polygon::new();
    let notch = points(&[(0, 0), (10, 0), (10, 10), (5, 5), (0, 10)]);
    assert!(polygon.add_ring(&notch, false, &mut ()));

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let diagonals = monotone_diagonals(&polygon, &mut diagnostics);

    assert_eq!(diagonals.len(), 1);
    let (a, b) = diagonals[0];
    let mut ends = [polygon.position(a), polygon.position(b)];
    ends.sort();
    assert_eq!(ends, [point(10, 0), point(5, 5)]);
    assert!(diagnostics.is_empty());
}

#[test]
fn monotone_triangulation() {
    // Both chains have vertices.
    let polygon = points(&[(0, 0), (1, 1), (1, 4), (0, 5), (-1, 3), (-2, 2)]);
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    assert_eq!(triangulate_monotone(&polygon, &mut shape, &mut ()), 4);
    assert_eq!(shape.area2(), polytess_geom::predicates::signed_area2(&polygon));

    // All of the vertices on the right side, with reflex turns.
    let polygon = points(&[(0, 0), (1, 1), (3, 2), (1, 3), (1, 4), (4, 5), (0, 6)]);
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    assert_eq!(triangulate_monotone(&polygon, &mut shape, &mut ()), 5);
    assert_eq!(shape.area2(), polytess_geom::predicates::signed_area2(&polygon));

    // All of the vertices on the left side, given clockwise.
    let polygon = points(&[(0, 0), (-1, 1), (-3, 2), (-1, 3), (-1, 4), (-4, 5), (0, 6)]);
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    assert_eq!(triangulate_monotone(&polygon, &mut shape, &mut ()), 5);
    assert_eq!(shape.area2(), -polytess_geom::predicates::signed_area2(&polygon));

    assert!(shape.interior().iter().all(|t| t.signed_area2() > 0));
}

#[test]
fn non_monotone_falls_back_to_ear_clipping() {
    let notch = points(&[(0, 0), (10, 0), (10, 10), (5, 5), (0, 10)]);
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    assert_eq!(triangulate_monotone(&notch, &mut shape, &mut diagnostics), 3);
    assert_eq!(shape.area2(), 150);
    assert_eq!(diagnostics, [Diagnostic::NonMonotoneFace { vertices: 5 }]);
}
