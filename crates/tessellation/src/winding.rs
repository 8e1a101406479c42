//! Classification of the contours according to the fill rule.
//!
//! Once the intersections are resolved, contours only meet at shared vertices
//! or along identical edges. Overlapping contours aren't necessarily nested,
//! so the fill rule is first applied to each edge: an edge is kept if the
//! fill rule gives different verdicts on its two sides, and the kept edges
//! are traced again into contours that are either nested or disjoint.
//!
//! The winding number just inside one of those contours is its own
//! orientation plus the orientations of the contours containing it, which
//! tells outer boundaries and holes apart.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::split::contours_from_edges;
use polytess_geom::predicates::{
    point_in_polygon, point_on_polygon_boundary, signed_area2, winding_number,
};
use polytess_geom::{ChainIter, Edge, FillRule, Path, Point};

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Range;

/// A filled region: an outer boundary and the holes directly inside of it,
/// identified by their chain ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContourGroup {
    pub outer: u32,
    pub holes: Vec<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Role {
    Outer,
    Hole,
    Ignored,
}

/// Returns the boundary of the area filled by `contours` under `fill_rule`.
///
/// The contours must not cross each other; they may share vertices and
/// identical edges, as in the output of
/// [`split_intersecting_paths`](crate::split_intersecting_paths). The
/// returned contours have the filled area on their left: outer boundaries
/// are counter-clockwise and holes clockwise. No two of them share an edge.
#[cfg_attr(feature = "profiling", inline(never))]
pub fn fill_boundary(contours: &[Path], fill_rule: FillRule) -> Vec<Path> {
    // Net number of edges along each segment, from its lower end to its
    // upper end in sweep order.
    let mut segments: BTreeMap<(Point, Point), i32> = BTreeMap::new();
    for contour in contours {
        for edge in contour.edges(0) {
            match edge.from.cmp(&edge.to) {
                Ordering::Less => *segments.entry((edge.from, edge.to)).or_insert(0) += 1,
                Ordering::Greater => *segments.entry((edge.to, edge.from)).or_insert(0) -= 1,
                Ordering::Equal => {}
            }
        }
    }

    // Doubled coordinates put the middle of every segment on the grid.
    let doubled: Vec<Vec<Point>> = contours
        .iter()
        .map(|contour| contour.iter().map(|p| *p * 2).collect())
        .collect();

    let mut edges: Vec<Edge> = Vec::new();
    for (&(lower, upper), &count) in &segments {
        if count == 0 {
            continue;
        }

        // The edges through the middle don't count and the vertices on the
        // ray are seen from slightly above. That is the winding number above
        // a horizontal segment, on its left, and the one on the right of any
        // other segment.
        let mid = lower + upper;
        let winding: i32 = doubled.iter().map(|c| winding_number(c, &mid)).sum();
        let (left, right) = if lower.y() == upper.y() {
            (winding, winding - count)
        } else {
            (winding + count, winding)
        };

        match (fill_rule.is_in(left), fill_rule.is_in(right)) {
            (true, false) => edges.push(Edge::new(lower, upper, edges.len() as u32)),
            (false, true) => edges.push(Edge::new(upper, lower, edges.len() as u32)),
            _ => {}
        }
    }

    log::debug!(
        "{} of {} segments are on the boundary of the filled area",
        edges.len(),
        segments.len()
    );

    contours_from_edges(&edges)
}

/// Groups the contours of `outline` into filled regions.
///
/// `outline` holds the points of non-crossing contours, each tagged with its
/// chain id. Contours with no area, and holes outside of every filled region,
/// are reported and ignored.
#[cfg_attr(feature = "profiling", inline(never))]
pub fn classify_contours(
    outline: &[Point],
    fill_rule: FillRule,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<ContourGroup> {
    let ranges = chain_ranges(outline);
    let chain = |c: usize| ChainIter::with_range(outline, ranges[c].start, ranges[c].end, c as u32);
    let count = ranges.len();

    let areas: Vec<i128> = (0..count).map(|c| signed_area2(chain(c))).collect();
    for c in 0..count {
        if areas[c] == 0 && !ranges[c].is_empty() {
            diagnostics.report(Diagnostic::DroppedContour {
                chain: c as u32,
                points: chain(c).count(),
            });
        }
    }

    let live: Vec<usize> = (0..count).filter(|&c| areas[c] != 0).collect();

    let mut containers: Vec<Vec<usize>> = vec![Vec::new(); count];
    for &inner in &live {
        for &outer in &live {
            if inner != outer && contains(chain(outer), chain(inner)) {
                containers[inner].push(outer);
            }
        }
    }

    let mut roles = vec![Role::Ignored; count];
    for &c in &live {
        let outside: i32 = containers[c]
            .iter()
            .map(|&m| areas[m].signum() as i32)
            .sum();
        let inside = outside + areas[c].signum() as i32;

        roles[c] = match (fill_rule.is_in(inside), fill_rule.is_in(outside)) {
            (true, false) => Role::Outer,
            (false, true) => Role::Hole,
            _ => Role::Ignored,
        };

        log::trace!(
            "contour #{}: winding {} inside, {} outside, {:?}",
            c,
            inside,
            outside,
            roles[c]
        );
    }

    let mut groups: Vec<ContourGroup> = Vec::new();
    let mut group_of = vec![None; count];
    for &c in &live {
        if roles[c] == Role::Outer {
            group_of[c] = Some(groups.len());
            groups.push(ContourGroup {
                outer: c as u32,
                holes: Vec::new(),
            });
        }
    }

    for &c in &live {
        if roles[c] != Role::Hole {
            continue;
        }

        let parent = containers[c]
            .iter()
            .copied()
            .filter(|&m| roles[m] == Role::Outer)
            .min_by_key(|&m| (areas[m].abs(), m));

        match parent.and_then(|m| group_of[m]) {
            Some(group) => groups[group].holes.push(c as u32),
            None => {
                diagnostics.report(Diagnostic::DroppedContour {
                    chain: c as u32,
                    points: chain(c).count(),
                });
            }
        }
    }

    groups
}

/// The range of the store covered by each chain, indexed by chain id.
fn chain_ranges(outline: &[Point]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (i, p) in outline.iter().enumerate() {
        let c = p.chain as usize;
        if ranges.len() <= c {
            ranges.resize(c + 1, 0..0);
        }

        let range = &mut ranges[c];
        if range.is_empty() {
            *range = i..(i + 1);
        } else {
            range.end = i + 1;
        }
    }

    ranges
}

/// Whether the contour `inner` is inside of `outer`, assuming they don't
/// cross.
fn contains(outer: ChainIter, inner: ChainIter) -> bool {
    for p in inner.clone() {
        if !point_on_polygon_boundary(outer.clone(), p) {
            return point_in_polygon(outer, p);
        }
    }

    // All of the vertices are on the boundary of `outer`. Look at the middle
    // of the edges instead, with doubled coordinates to stay on the grid.
    let doubled: Vec<Point> = outer.map(|p| *p * 2).collect();
    let inner: Vec<Point> = inner.copied().collect();
    let n = inner.len();
    for i in 0..n {
        let mid = inner[i] + inner[(i + 1) % n];
        if !point_on_polygon_boundary(&doubled, &mid) {
            return point_in_polygon(&doubled, &mid);
        }
    }

    false
}

#[cfg(test)]
use polytess_geom::point;

#[cfg(test)]
fn outline(contours: &[&[(i32, i32)]]) -> Vec<Point> {
    let mut points = Vec::new();
    for (c, contour) in contours.iter().enumerate() {
        for &(x, y) in contour.iter() {
            points.push(point(x, y).with_chain(c as u32));
        }
    }

    points
}

#[cfg(test)]
const OUTER: &[(i32, i32)] = &[(0, 0), (30, 0), (30, 30), (0, 30)];
#[cfg(test)]
const INNER_CCW: &[(i32, i32)] = &[(10, 10), (20, 10), (20, 20), (10, 20)];
#[cfg(test)]
const INNER_CW: &[(i32, i32)] = &[(10, 10), (10, 20), (20, 20), (20, 10)];

#[test]
fn nested_squares_even_odd() {
    let points = outline(&[OUTER, INNER_CCW]);
    let groups = classify_contours(&points, FillRule::EvenOdd, &mut ());

    assert_eq!(
        groups,
        [ContourGroup {
            outer: 0,
            holes: vec![1]
        }]
    );
}

#[test]
fn nested_squares_non_zero() {
    // Same orientation: the inner square is filled twice and isn't a boundary.
    let points = outline(&[OUTER, INNER_CCW]);
    let groups = classify_contours(&points, FillRule::NonZero, &mut ());
    assert_eq!(
        groups,
        [ContourGroup {
            outer: 0,
            holes: vec![]
        }]
    );

    // Opposite orientation: winding number zero inside, it is a hole.
    let points = outline(&[OUTER, INNER_CW]);
    let groups = classify_contours(&points, FillRule::NonZero, &mut ());
    assert_eq!(
        groups,
        [ContourGroup {
            outer: 0,
            holes: vec![1]
        }]
    );
}

#[test]
fn islands() {
    let island: &[(i32, i32)] = &[(12, 12), (18, 12), (18, 18), (12, 18)];
    let points = outline(&[OUTER, INNER_CCW, island]);
    let groups = classify_contours(&points, FillRule::EvenOdd, &mut ());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].holes, [1]);
    assert_eq!(groups[1].outer, 2);
    assert!(groups[1].holes.is_empty());
}

#[test]
fn flat_contours_are_reported() {
    let flat: &[(i32, i32)] = &[(40, 0), (50, 0), (60, 0)];
    let points = outline(&[OUTER, flat]);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let groups = classify_contours(&points, FillRule::EvenOdd, &mut diagnostics);

    assert_eq!(groups.len(), 1);
    assert_eq!(
        diagnostics,
        [Diagnostic::DroppedContour {
            chain: 1,
            points: 3
        }]
    );
}

#[cfg(test)]
use crate::split::split_intersecting_paths;

#[cfg(test)]
fn coords(path: &Path) -> Vec<(i32, i32)> {
    path.points.iter().map(|p| (p.x(), p.y())).collect()
}

#[test]
fn boundary_of_a_single_contour() {
    // Clockwise input, the boundary has the filled area on its left.
    let square = Path::polygon(&[(0, 0), (0, 10), (10, 10), (10, 0)]);
    for &fill_rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let boundary = fill_boundary(&[square.clone()], fill_rule);
        assert_eq!(boundary.len(), 1);
        assert_eq!(coords(&boundary[0]), [(0, 0), (10, 0), (10, 10), (0, 10)]);
    }
}

#[test]
fn shared_edges_are_removed() {
    // A triangle on top of the square, their shared edge going in opposite
    // directions.
    let contours = [
        Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
        Path::polygon(&[(0, 10), (10, 10), (0, 20)]),
    ];

    for &fill_rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let boundary = fill_boundary(&contours, fill_rule);
        assert_eq!(boundary.len(), 1);
        assert_eq!(
            coords(&boundary[0]),
            [(0, 0), (10, 0), (10, 10), (0, 20), (0, 10)]
        );
    }
}

#[test]
fn same_direction_overlap() {
    // The left half of the square is covered twice.
    let paths = [
        Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
        Path::polygon(&[(0, 0), (5, 0), (5, 10), (0, 10)]),
    ];
    let contours = split_intersecting_paths(&paths, &mut ());

    let boundary = fill_boundary(&contours, FillRule::EvenOdd);
    assert_eq!(boundary.len(), 1);
    assert_eq!(coords(&boundary[0]), [(5, 0), (10, 0), (10, 10), (5, 10)]);

    let boundary = fill_boundary(&contours, FillRule::NonZero);
    assert_eq!(boundary.len(), 1);
    assert_eq!(boundary[0].signed_area2(), 200);
}

#[test]
fn hole_touching_the_outer_edge() {
    let paths = [
        Path::polygon(&[(0, 0), (20, 0), (20, 20), (0, 20)]),
        Path::polygon(&[(10, 5), (10, 15), (20, 15), (20, 5)]),
    ];
    let contours = split_intersecting_paths(&paths, &mut ());

    // The hole becomes a notch.
    let boundary = fill_boundary(&contours, FillRule::EvenOdd);
    assert_eq!(boundary.len(), 1);
    assert_eq!(boundary[0].len(), 8);
    assert_eq!(boundary[0].signed_area2(), 2 * (400 - 100));
}
