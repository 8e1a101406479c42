//! Partition of a polygon into faces along its diagonals.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::monotone::Polygon;
use polytess_geom::predicates::{compare_angles_from, signed_area2};
use polytess_geom::Point;

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

/// Cuts the polygon along the diagonals and returns the resulting faces,
/// counter-clockwise.
///
/// The boundary edges are only walked in their own direction (the interior
/// is on their left) and the diagonals in both directions. Vertices sharing a
/// position, such as a hole touching the outer boundary, are merged into one
/// node. At each node the walk takes the outgoing edge that turns the most to
/// the left, which keeps every face on the left of its edges.
#[cfg_attr(feature = "profiling", inline(never))]
pub(crate) fn monotone_faces(
    polygon: &Polygon,
    diagonals: &[(usize, usize)],
    diagnostics: &mut dyn Diagnostics,
) -> Vec<Vec<Point>> {
    let mut ids: BTreeMap<Point, usize> = BTreeMap::new();
    let mut positions = Vec::new();
    let nodes: Vec<usize> = polygon
        .vertices
        .iter()
        .map(|v| {
            *ids.entry(v.pos).or_insert_with(|| {
                positions.push(v.pos);
                positions.len() - 1
            })
        })
        .collect();

    let mut half_edges: Vec<(usize, usize)> = polygon
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (nodes[i], nodes[v.next]))
        .collect();
    for &(a, b) in diagonals {
        half_edges.push((nodes[a], nodes[b]));
        half_edges.push((nodes[b], nodes[a]));
    }

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); positions.len()];
    for (i, &(from, _)) in half_edges.iter().enumerate() {
        outgoing[from].push(i);
    }

    let next: Vec<Option<usize>> = half_edges
        .iter()
        .map(|&(from, to)| {
            let back = positions[from] - positions[to];
            outgoing[to].iter().copied().max_by(|&a, &b| {
                let da = positions[half_edges[a].1] - positions[to];
                let db = positions[half_edges[b].1] - positions[to];
                compare_angles_from(back, da, db).then(b.cmp(&a))
            })
        })
        .collect();

    let mut visited = vec![false; half_edges.len()];
    let mut faces = Vec::new();
    for first in 0..half_edges.len() {
        if visited[first] {
            continue;
        }

        let mut face = Vec::new();
        let mut closed = false;
        let mut edge = first;
        while !visited[edge] {
            visited[edge] = true;
            face.push(positions[half_edges[edge].0]);
            match next[edge] {
                Some(n) if n == first => {
                    closed = true;
                    break;
                }
                Some(n) => edge = n,
                None => break,
            }
        }

        if !closed {
            diagnostics.report(Diagnostic::OpenFace {
                at: positions[half_edges[first].0],
            });
            continue;
        }

        if signed_area2(&face) <= 0 {
            log::debug!("skipping a face of {} vertices with no area", face.len());
            continue;
        }

        faces.push(face);
    }

    log::debug!(
        "{} diagonals, {} monotone faces",
        diagonals.len(),
        faces.len()
    );

    faces
}

#[cfg(test)]
use crate::monotone::monotone_diagonals;
#[cfg(test)]
use polytess_geom::point;

#[cfg(test)]
fn ring(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| point(x, y)).collect()
}

#[test]
fn square_with_diagonal() {
    let mut polygon = Polygon::new();
    polygon.add_ring(&ring(&[(0, 0), (10, 0), (10, 10), (0, 10)]), false, &mut ());

    let faces = monotone_faces(&polygon, &[(1, 3)], &mut ());

    assert_eq!(faces.len(), 2);
    assert!(faces.iter().all(|f| f.len() == 3));
    let total: i128 = faces.iter().map(|f| signed_area2(f)).sum();
    assert_eq!(total, 200);
}

#[test]
fn hole_is_connected_by_diagonals() {
    let mut polygon = Polygon::new();
    polygon.add_ring(&ring(&[(0, 0), (30, 0), (30, 30), (0, 30)]), false, &mut ());
    polygon.add_ring(&ring(&[(10, 10), (20, 10), (20, 20), (10, 20)]), true, &mut ());

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let diagonals = monotone_diagonals(&polygon, &mut diagnostics);
    // One diagonal below the hole (split vertex) and one above (merge vertex).
    assert_eq!(diagonals.len(), 2);

    let faces = monotone_faces(&polygon, &diagonals, &mut diagnostics);
    assert_eq!(faces.len(), 2);
    let total: i128 = faces.iter().map(|f| signed_area2(f)).sum();
    assert_eq!(total, 2 * (900 - 100));
    assert!(diagnostics.is_empty());
}
