//! Resolution of self-intersections.
//!
//! The input paths are turned into a set of simple contours that don't cross
//! each other:
//!
//! 1. Every edge is split at the points where it crosses or touches another
//!    edge. Crossing points are rounded to the integer grid, which can create
//!    new crossings, so this is repeated until nothing changes.
//! 2. The pieces form a directed graph over the unique positions. Pairs of
//!    opposite edges cancel out.
//! 3. At each vertex, incoming and outgoing edges are paired without crossing
//!    each other, and the contours are traced by following the pairs. A
//!    contour that goes through the same vertex twice is cut there.
//!
//! Edge directions are preserved, so the winding number of every point not on
//! an edge is the same as with the input paths.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::FillOptions;
use polytess_geom::predicates::{compare_angles, dot_product};
use polytess_geom::{Edge, Path, Point, Vector};

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

/// Splits the paths into simple contours that only meet at shared vertices.
///
/// The result is deterministic and doesn't depend on the order of the input
/// paths. Each returned path is closed, starts at its lowest point in sweep
/// order and has its points tagged with its position in the returned list as
/// chain id. Applying the function to its own output returns the same
/// contours.
pub fn split_intersecting_paths(paths: &[Path], diagnostics: &mut dyn Diagnostics) -> Vec<Path> {
    split_intersecting_paths_with_limit(paths, FillOptions::DEFAULT_MAX_SPLIT_PASSES, diagnostics)
}

/// Same as `split_intersecting_paths` with a custom limit for the number of
/// splitting passes.
pub fn split_intersecting_paths_with_limit(
    paths: &[Path],
    max_passes: u32,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<Path> {
    let paths = clean_paths(paths, diagnostics);

    let mut edges = Vec::new();
    for path in &paths {
        let first = edges.len() as u32;
        edges.extend(path.edges(first));
    }

    split_edges(&mut edges, max_passes, diagnostics);

    let contours = contours_from_edges(&edges);

    log::debug!(
        "split {} paths ({} edges) into {} contours",
        paths.len(),
        edges.len(),
        contours.len()
    );

    contours
}

/// Traces the closed contours formed by a set of edges that don't cross.
///
/// Opposite edges cancel out. The contours are in canonical order and their
/// points are tagged with their position in the returned list as chain id.
pub(crate) fn contours_from_edges(edges: &[Edge]) -> Vec<Path> {
    let graph = EdgeGraph::new(edges);

    graph
        .trace_contours()
        .into_iter()
        .enumerate()
        .map(|(chain, nodes)| {
            let points = nodes
                .iter()
                .map(|&n| graph.positions[n].with_chain(chain as u32))
                .collect();
            Path::new(points, true)
        })
        .collect()
}

/// Removes repeated points and drops the paths that can't enclose anything.
pub(crate) fn clean_paths(paths: &[Path], diagnostics: &mut dyn Diagnostics) -> Vec<Path> {
    let mut result = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let mut path = path.clone();
        path.dedup();
        if path.len() < 3 {
            diagnostics.report(Diagnostic::DroppedContour {
                chain: i as u32,
                points: path.len(),
            });
            continue;
        }
        result.push(path);
    }

    result
}

/// Splits the edges until none of them cross or overlap.
#[cfg_attr(feature = "profiling", inline(never))]
fn split_edges(edges: &mut Vec<Edge>, max_passes: u32, diagnostics: &mut dyn Diagnostics) {
    for pass in 0..max_passes {
        let splits = match find_splits(edges) {
            Some(splits) => splits,
            None => return,
        };

        let mut result = Vec::with_capacity(edges.len() * 2);
        for (edge, mut points) in edges.iter().zip(splits) {
            if points.is_empty() {
                result.push(*edge);
                continue;
            }

            let d = edge.to - edge.from;
            points.sort_by(|a, b| {
                let da = dot_product(*a - edge.from, d);
                let db = dot_product(*b - edge.from, d);
                da.cmp(&db).then(a.cmp(b))
            });

            let mut from = edge.from;
            for p in points {
                if p == from || p == edge.to {
                    continue;
                }
                result.push(Edge::new(from, p, edge.index));
                from = p;
            }
            result.push(Edge::new(from, edge.to, edge.index));
        }

        log::trace!(
            "split pass {}: {} edges -> {}",
            pass,
            edges.len(),
            result.len()
        );
        *edges = result;
    }

    // The last pass may have been enough.
    if find_splits(edges).is_some() {
        diagnostics.report(Diagnostic::SplitPassLimit { passes: max_passes });
    }
}

/// The points at which each edge must be split, or `None` if no edge crosses
/// or overlaps another one.
fn find_splits(edges: &[Edge]) -> Option<Vec<Vec<Point>>> {
    let mut splits: Vec<Vec<Point>> = vec![Vec::new(); edges.len()];
    let mut found = false;

    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (a, b) = (&edges[i], &edges[j]);
            if !a.bounding_boxes_overlap(b) {
                continue;
            }

            for p in a.split_points(b) {
                splits[i].push(p);
                found = true;
            }
            for p in b.split_points(a) {
                splits[j].push(p);
                found = true;
            }
        }
    }

    if found {
        Some(splits)
    } else {
        None
    }
}

#[derive(Copy, Clone, Debug)]
struct EdgeEnd {
    edge: usize,
    incoming: bool,
    // Points away from the vertex.
    direction: Vector,
}

/// Directed edges over unique positions.
struct EdgeGraph {
    positions: Vec<Point>,
    edges: Vec<(usize, usize)>,
}

impl EdgeGraph {
    fn new(edges: &[Edge]) -> Self {
        let mut ids: BTreeMap<Point, usize> = BTreeMap::new();
        let mut positions = Vec::new();
        let mut node = |p: Point| -> usize {
            *ids.entry(p).or_insert_with(|| {
                positions.push(p);
                positions.len() - 1
            })
        };

        // Net number of edges between each ordered pair of nodes.
        let mut counts: BTreeMap<(usize, usize), u32> = BTreeMap::new();
        for edge in edges {
            let (u, v) = (node(edge.from), node(edge.to));
            if u == v {
                continue;
            }

            match counts.get_mut(&(v, u)) {
                Some(count) if *count > 0 => *count -= 1,
                _ => *counts.entry((u, v)).or_insert(0) += 1,
            }
        }

        let mut directed = Vec::new();
        for (&key, &count) in &counts {
            for _ in 0..count {
                directed.push(key);
            }
        }

        EdgeGraph {
            positions,
            edges: directed,
        }
    }

    /// For each edge, the edge that follows it in its contour.
    fn successors(&self) -> Vec<Option<usize>> {
        let mut ends: Vec<Vec<EdgeEnd>> = vec![Vec::new(); self.positions.len()];
        for (i, &(u, v)) in self.edges.iter().enumerate() {
            ends[u].push(EdgeEnd {
                edge: i,
                incoming: false,
                direction: self.positions[v] - self.positions[u],
            });
            ends[v].push(EdgeEnd {
                edge: i,
                incoming: true,
                direction: self.positions[u] - self.positions[v],
            });
        }

        let mut next = vec![None; self.edges.len()];
        for node_ends in &mut ends {
            // Clockwise.
            node_ends.sort_by(|a, b| {
                compare_angles(b.direction, a.direction)
                    .then(a.incoming.cmp(&b.incoming))
                    .then(a.edge.cmp(&b.edge))
            });
            pair_edges(node_ends, &mut next);
        }

        next
    }

    /// Rotates a closed walk so that its sequence of positions is the smallest
    /// of all its rotations. Cutting the walk into loops then gives the same
    /// loops whatever edge the walk was traced from.
    fn rotate_to_lowest(&self, cycle: &mut Vec<usize>) {
        let n = cycle.len();
        let lowest = match cycle.iter().map(|&node| self.positions[node]).min() {
            Some(p) => p,
            None => return,
        };

        let positions = &self.positions;
        let nodes: &[usize] = &cycle[..];
        let rotation = |start: usize| (0..n).map(move |k| positions[nodes[(start + k) % n]]);

        let mut best = None;
        for start in 0..n {
            if positions[nodes[start]] != lowest {
                continue;
            }
            best = match best {
                Some(b) if !rotation(start).lt(rotation(b)) => Some(b),
                _ => Some(start),
            };
        }

        if let Some(start) = best {
            cycle.rotate_left(start);
        }
    }

    /// Returns the contours as lists of node ids, in canonical order.
    fn trace_contours(&self) -> Vec<Vec<usize>> {
        let next = self.successors();
        let mut visited = vec![false; self.edges.len()];
        let mut contours = Vec::new();

        for first in 0..self.edges.len() {
            if visited[first] {
                continue;
            }

            let mut cycle = Vec::new();
            let mut edge = first;
            while !visited[edge] {
                visited[edge] = true;
                cycle.push(self.edges[edge].0);
                match next[edge] {
                    Some(n) => edge = n,
                    None => break,
                }
            }

            self.rotate_to_lowest(&mut cycle);
            cut_cycle(&cycle, &mut contours);
        }

        contours.retain(|c| c.len() >= 3);

        for contour in &mut contours {
            let mut start = 0;
            for (i, &n) in contour.iter().enumerate() {
                if self.positions[n] < self.positions[contour[start]] {
                    start = i;
                }
            }
            contour.rotate_left(start);
        }

        let positions = &self.positions;
        contours.sort_by(|a, b| {
            a.iter()
                .map(|&n| positions[n])
                .cmp(b.iter().map(|&n| positions[n]))
        });

        contours
    }
}

/// Pairs the incoming and outgoing edges around a vertex.
///
/// `ends` is in clockwise order. Incoming edges are opening brackets and
/// outgoing edges closing ones; matching brackets never cross, and starting
/// right after the lowest prefix sum every closing bracket has a match.
fn pair_edges(ends: &[EdgeEnd], next: &mut [Option<usize>]) {
    let mut sum = 0;
    let mut min = 0;
    let mut start = 0;
    for (i, end) in ends.iter().enumerate() {
        sum += if end.incoming { 1 } else { -1 };
        if sum < min {
            min = sum;
            start = i + 1;
        }
    }

    let mut open = Vec::new();
    for k in 0..ends.len() {
        let end = &ends[(start + k) % ends.len()];
        if end.incoming {
            open.push(end.edge);
        } else if let Some(incoming) = open.pop() {
            next[incoming] = Some(end.edge);
        }
    }
}

/// Splits a closed walk into loops that don't repeat vertices.
fn cut_cycle(cycle: &[usize], contours: &mut Vec<Vec<usize>>) {
    let mut stack: Vec<usize> = Vec::with_capacity(cycle.len());
    for &node in cycle {
        if let Some(pos) = stack.iter().position(|&n| n == node) {
            contours.push(stack.split_off(pos));
        }
        stack.push(node);
    }

    if !stack.is_empty() {
        contours.push(stack);
    }
}

#[cfg(test)]
fn coords(path: &Path) -> Vec<(i32, i32)> {
    path.points.iter().map(|p| (p.x(), p.y())).collect()
}

#[test]
fn simple_paths_are_preserved() {
    let square = Path::polygon(&[(10, 0), (10, 10), (0, 10), (0, 0)]);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let result = split_intersecting_paths(&[square], &mut diagnostics);

    assert_eq!(result.len(), 1);
    assert_eq!(coords(&result[0]), [(0, 0), (10, 0), (10, 10), (0, 10)]);
    assert!(result[0].points.iter().all(|p| p.chain == 0));
    assert!(diagnostics.is_empty());
}

#[test]
fn figure_eight() {
    let path = Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
    let result = split_intersecting_paths(&[path], &mut ());

    assert_eq!(result.len(), 2);
    assert_eq!(coords(&result[0]), [(0, 0), (5, 5), (0, 10)]);
    assert_eq!(coords(&result[1]), [(10, 0), (5, 5), (10, 10)]);
    assert!(result[1].points.iter().all(|p| p.chain == 1));
    assert!(result[1].points[1].is_synthesized());

    // The two lobes wind in opposite directions.
    assert!(result[0].signed_area2() > 0);
    assert!(result[1].signed_area2() < 0);
}

#[test]
fn idempotent() {
    let inputs = [
        alloc::vec![Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)])],
        alloc::vec![
            Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
            Path::polygon(&[(5, 5), (15, 5), (15, 15), (5, 15)]),
        ],
        alloc::vec![Path::polygon(&[(0, 0), (7, 3), (1, 6), (6, 1), (4, 7), (3, 0)])],
        alloc::vec![
            Path::polygon(&[(0, 0), (20, 0), (20, 20), (0, 20)]),
            Path::polygon(&[(0, 5), (20, 5), (20, 10), (0, 10)]),
        ],
    ];

    for paths in &inputs {
        let once = split_intersecting_paths(paths, &mut ());
        let twice = split_intersecting_paths(&once, &mut ());
        assert_eq!(once, twice);
        for (i, path) in twice.iter().enumerate() {
            assert!(path.points.iter().all(|p| p.chain == i as u32));
        }
    }
}

#[test]
fn opposite_edges_cancel() {
    // A square with a spike going out and back along the same line.
    let path = Path::polygon(&[(0, 0), (10, 0), (20, 0), (10, 0), (10, 10), (0, 10)]);
    let result = split_intersecting_paths(&[path], &mut ());

    assert_eq!(result.len(), 1);
    assert_eq!(coords(&result[0]), [(0, 0), (10, 0), (10, 10), (0, 10)]);
}

#[test]
fn degenerate_paths_are_dropped() {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let paths = [
        Path::polygon(&[(0, 0), (0, 0), (5, 5)]),
        Path::polygon(&[(0, 0), (4, 0), (0, 4)]),
    ];
    let result = split_intersecting_paths(&paths, &mut diagnostics);

    assert_eq!(result.len(), 1);
    assert_eq!(
        diagnostics,
        [Diagnostic::DroppedContour {
            chain: 0,
            points: 2
        }]
    );
}

#[test]
fn pass_limit() {
    let path = Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let result = split_intersecting_paths_with_limit(&[path], 0, &mut diagnostics);

    assert_eq!(diagnostics, [Diagnostic::SplitPassLimit { passes: 0 }]);
    // Nothing was split, the figure eight is traced as one contour.
    assert_eq!(result.len(), 1);
}

#[test]
fn last_pass_resolves_everything() {
    let path = Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)]);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let result = split_intersecting_paths_with_limit(&[path], 1, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(result.len(), 2);
}
