//! A few reference shapes used in tests and benchmarks.
//!
//! All of the polygons are given counter-clockwise unless stated otherwise.

use crate::geom::Path;

/// An axis-aligned square with its lower-left corner at the origin.
pub fn square(size: i32) -> Path {
    Path::polygon(&[(0, 0), (size, 0), (size, size), (0, size)])
}

/// A rectangle given by its lower-left and upper-right corners.
pub fn rectangle(min: (i32, i32), max: (i32, i32)) -> Path {
    Path::polygon(&[min, (max.0, min.1), max, (min.0, max.1)])
}

/// A self-intersecting quadrilateral. Its two lobes wind in opposite
/// directions and meet at `(5, 5)`.
pub fn figure_eight() -> Path {
    Path::polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)])
}

/// A 30x30 square with a clockwise 10x10 hole in the middle.
pub fn square_with_hole() -> Vec<Path> {
    vec![
        square(30),
        Path::polygon(&[(10, 10), (10, 20), (20, 20), (20, 10)]),
    ]
}

/// Two counter-clockwise 10x10 squares overlapping on a 5x5 square.
pub fn overlapping_squares() -> Vec<Path> {
    vec![square(10), rectangle((5, 5), (15, 15))]
}

/// A comb with `teeth` teeth pointing up.
///
/// The base is 5 units high and each tooth is 2 units wide and 5 units high,
/// with 2 units of space between them. The shape isn't monotone as soon as it
/// has two teeth.
pub fn comb(teeth: u32) -> Path {
    let t = teeth.max(1) as i32;
    let right = 4 * t - 2;

    let mut coords = vec![(0, 0), (right, 0), (right, 10)];
    for i in (1..t).rev() {
        let x = 4 * i;
        coords.push((x, 10));
        coords.push((x, 5));
        coords.push((x - 2, 5));
        coords.push((x - 2, 10));
    }
    coords.push((0, 10));

    Path::polygon(&coords)
}

/// A star drawn in a single stroke, so that its edges cross each other. The
/// center is covered twice.
///
/// The number of branches is rounded up to an odd number, at least 5.
pub fn star(branches: u32, radius: i32) -> Path {
    let n = (branches.max(5) | 1) as usize;
    let outer: Vec<(i32, i32)> = (0..n)
        .map(|i| {
            let angle = i as f64 * core::f64::consts::PI * 2.0 / n as f64;
            let x = (angle.sin() * radius as f64).round() as i32;
            let y = (angle.cos() * radius as f64).round() as i32;
            (x, y)
        })
        .collect();

    // Skip every other branch tip.
    let step = n / 2;
    let coords: Vec<(i32, i32)> = (0..n).map(|i| outer[(i * step) % n]).collect();

    Path::polygon(&coords)
}

/// Counter-clockwise squares with a notch in their top and bottom edges.
///
/// The tip of the bottom notch is a merge vertex and the tip of the top one a
/// split vertex.
pub fn notches() -> Vec<Path> {
    vec![
        Path::polygon(&[(0, 0), (5, 5), (10, 0), (10, 10), (0, 10)]),
        Path::polygon(&[(20, 0), (30, 0), (30, 10), (25, 5), (20, 10)]),
    ]
}

#[test]
fn comb_area() {
    assert_eq!(comb(1).len(), 4);
    assert_eq!(comb(1).signed_area2(), 2 * 20);

    for teeth in 2..6 {
        let path = comb(teeth);
        assert_eq!(path.len(), 4 * teeth as usize);
        assert_eq!(path.signed_area2(), 60 * teeth as i128 - 20);
    }
}

#[test]
fn reference_shapes_are_counter_clockwise() {
    assert_eq!(square(10).signed_area2(), 200);
    assert_eq!(rectangle((5, 5), (15, 15)).signed_area2(), 200);
    assert!(notches().iter().all(|p| p.signed_area2() > 0));

    let hole = &square_with_hole()[1];
    assert_eq!(hole.signed_area2(), -200);
}

#[test]
fn star_shape() {
    let star = star(5, 100);
    assert_eq!(star.len(), 5);
    assert_eq!(star.points[0].y(), 100);
}
