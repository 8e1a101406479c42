use crate::extra::debugging::find_reduced_test_case;
use crate::extra::shapes;
use crate::geom::predicates::{orient, signed_area2, winding_number};
use crate::geom::{point, FillRule, Path, Point, Triangle, MAX_COORDINATE};
use crate::{Diagnostic, FillOptions, FillTessellator, Shape, TessellationError};

use alloc::vec::Vec;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tessellate(paths: &[Path], fill_rule: FillRule, log: bool) -> (Shape, Vec<Diagnostic>) {
    let mut shape = Shape::new(0, fill_rule);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut tess = FillTessellator::new();
    tess.set_logging(log);
    let result = tess.tessellate(paths, &FillOptions::default(), &mut shape, &mut diagnostics);
    assert_eq!(result, Ok(()));

    (shape, diagnostics)
}

// Whether a line through one of the edges of `a` has all of `b` on its
// outer side.
fn separated_by_an_edge(a: &Triangle, b: &Triangle) -> bool {
    let (pa, pb) = (a.points(), b.points());
    (0..3).any(|i| {
        let (p, q) = (&pa[i], &pa[(i + 1) % 3]);
        pb.iter().all(|r| orient(p, q, r) <= 0)
    })
}

/// Returns two counter-clockwise triangles with overlapping interiors, if any.
fn find_overlap(triangles: &[Triangle]) -> Option<(Triangle, Triangle)> {
    for (i, a) in triangles.iter().enumerate() {
        for b in &triangles[(i + 1)..] {
            if !separated_by_an_edge(a, b) && !separated_by_an_edge(b, a) {
                return Some((*a, *b));
            }
        }
    }

    None
}

/// Twice the area enclosed by the outline of a shape.
fn outline_area2(shape: &Shape) -> i128 {
    (0..shape.chain_count())
        .map(|c| signed_area2(shape.chain(c)))
        .sum()
}

/// Twice the number of cells of the integer grid that are filled. That is
/// the exact area for paths made of horizontal and vertical edges.
fn grid_area2(paths: &[Path], fill_rule: FillRule) -> i128 {
    let points = || paths.iter().flat_map(|path| path.iter());
    if points().next().is_none() {
        return 0;
    }

    let min_x = points().map(|p| p.x()).min().unwrap();
    let max_x = points().map(|p| p.x()).max().unwrap();
    let min_y = points().map(|p| p.y()).min().unwrap();
    let max_y = points().map(|p| p.y()).max().unwrap();

    let doubled: Vec<Vec<Point>> = paths
        .iter()
        .map(|path| path.iter().map(|p| *p * 2).collect())
        .collect();

    let mut cells = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let center = point(2 * x + 1, 2 * y + 1);
            let winding: i32 = doubled.iter().map(|path| winding_number(path, &center)).sum();
            if fill_rule.is_in(winding) {
                cells += 1;
            }
        }
    }

    2 * cells
}

fn check_shape(paths: &[Path], fill_rule: FillRule, expected_area2: Option<i128>) -> bool {
    let (shape, _) = tessellate(paths, fill_rule, false);
    let ccw = shape.interior().iter().all(|t| t.signed_area2() > 0);
    ccw && find_overlap(shape.interior()).is_none()
        && outline_area2(&shape) == shape.area2()
        && expected_area2.map_or(true, |area| shape.area2() == area)
}

fn test_paths(paths: &[Path], fill_rule: FillRule, expected_area2: Option<i128>) -> Shape {
    init_logging();

    let find_test_case = std::env::var("POLYTESS_REDUCED_TESTCASE").is_ok();
    if find_test_case {
        let res = std::panic::catch_unwind(|| check_shape(paths, fill_rule, expected_area2));
        if !matches!(res, Ok(true)) {
            find_reduced_test_case(paths, &|paths: &[Path]| {
                !check_shape(paths, fill_rule, expected_area2)
            });
            panic!("Reduced test case found.");
        }
    }

    let (shape, diagnostics) = tessellate(paths, fill_rule, false);

    for diagnostic in &diagnostics {
        log::info!("{}", diagnostic);
    }

    for triangle in shape.interior() {
        assert!(
            triangle.signed_area2() > 0,
            "{:?} is not counter-clockwise",
            triangle
        );
    }

    if let Some((a, b)) = find_overlap(shape.interior()) {
        panic!("{:?} and {:?} overlap", a, b);
    }

    // The triangles cover the inside of the outline.
    assert_eq!(shape.area2(), outline_area2(&shape));

    if let Some(area) = expected_area2 {
        assert_eq!(shape.area2(), area);
    }

    assert!(shape.is_tessellated());

    shape
}

fn test_both_rules(paths: &[Path], expected_area2: i128) {
    test_paths(paths, FillRule::EvenOdd, Some(expected_area2));
    test_paths(paths, FillRule::NonZero, Some(expected_area2));
}

#[test]
fn test_simple_square() {
    let shape = test_paths(&[shapes::square(10)], FillRule::EvenOdd, Some(200));
    assert_eq!(shape.interior().len(), 2);
    assert_eq!(shape.chain_count(), 1);
    assert_eq!(shape.outline().len(), 4);
}

#[test]
fn test_square_orientation() {
    let mut square = shapes::square(10);
    square.reverse();
    test_both_rules(&[square], 200);
}

#[test]
fn test_simple_triangle() {
    let triangle = Path::polygon(&[(0, 0), (10, 3), (4, 9)]);
    let shape = test_paths(&[triangle.clone()], FillRule::NonZero, Some(triangle.signed_area2()));
    assert_eq!(shape.interior().len(), 1);
}

#[test]
fn test_convex_polygons() {
    let hexagon = Path::polygon(&[(0, 0), (4, -2), (8, 0), (8, 4), (4, 6), (0, 4)]);
    let shape = test_paths(&[hexagon.clone()], FillRule::EvenOdd, Some(hexagon.signed_area2()));
    assert_eq!(shape.interior().len(), 4);
}

#[test]
fn test_disjoint_squares() {
    let paths = [
        shapes::rectangle((0, 0), (10, 10)),
        shapes::rectangle((20, 0), (30, 10)),
    ];

    let shape = test_paths(&paths, FillRule::EvenOdd, Some(400));
    assert_eq!(shape.interior().len(), 4);
    assert_eq!(shape.chain_count(), 2);
}

#[test]
fn test_figure_eight() {
    let paths = [shapes::figure_eight()];

    for &fill_rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let shape = test_paths(&paths, fill_rule, Some(100));
        assert_eq!(shape.interior().len(), 2);
        assert_eq!(shape.chain_count(), 2);
        assert_eq!(shape.chain(0).count(), 3);
        assert_eq!(shape.chain(1).count(), 3);

        // The crossing is a new vertex shared by both lobes.
        let center: Vec<&Point> = shape
            .outline()
            .iter()
            .filter(|p| **p == point(5, 5))
            .collect();
        assert_eq!(center.len(), 2);
        assert!(center.iter().all(|p| p.is_synthesized()));
    }
}

#[test]
fn test_square_with_hole() {
    let paths = shapes::square_with_hole();
    test_both_rules(&paths, 2 * (900 - 100));

    let (shape, _) = tessellate(&paths, FillRule::EvenOdd, false);
    assert!(shape.interior().len() <= 8);
}

#[test]
fn test_nested_squares_same_orientation() {
    let paths = [shapes::square(30), shapes::rectangle((10, 10), (20, 20))];

    // The inner square is covered twice.
    test_paths(&paths, FillRule::EvenOdd, Some(2 * (900 - 100)));
    test_paths(&paths, FillRule::NonZero, Some(2 * 900));
}

#[test]
fn test_overlapping_squares() {
    let paths = shapes::overlapping_squares();

    test_paths(&paths, FillRule::NonZero, Some(2 * 175));
    test_paths(&paths, FillRule::EvenOdd, Some(2 * 150));
}

#[test]
fn test_notches() {
    let paths = shapes::notches();
    let shape = test_paths(&paths, FillRule::EvenOdd, Some(2 * 150));
    assert_eq!(shape.chain_count(), 2);
}

#[test]
fn test_comb() {
    for teeth in 1..6 {
        let comb = shapes::comb(teeth);
        let n = comb.len();
        test_both_rules(&[comb.clone()], comb.signed_area2());

        let (shape, _) = tessellate(&[comb], FillRule::EvenOdd, false);
        assert!(shape.interior().len() <= n - 2);
    }
}

#[test]
fn test_comb_without_fast_path() {
    let comb = shapes::comb(4);
    let mut shape = Shape::new(3, FillRule::NonZero);
    let options = FillOptions::default().with_simple_fast_path(false);

    FillTessellator::new()
        .tessellate(&[comb.clone()], &options, &mut shape, &mut ())
        .unwrap();

    assert_eq!(shape.area2(), comb.signed_area2());
}

#[test]
fn test_star() {
    let star = [shapes::star(5, 1000)];

    let non_zero = test_paths(&star, FillRule::NonZero, None);
    let even_odd = test_paths(&star, FillRule::EvenOdd, None);

    // The center of the star is only filled with the non-zero rule.
    assert!(even_odd.area2() > 0);
    assert!(non_zero.area2() > even_odd.area2());
}

#[test]
fn test_self_overlapping_polygon() {
    // Two lobes of the path cover the same area, along a shared edge.
    let path = [Path::polygon(&[
        (0, 6),
        (29, 26),
        (12, 29),
        (20, 19),
        (26, 27),
        (1, 27),
        (33, 23),
    ])];

    let even_odd = test_paths(&path, FillRule::EvenOdd, None);
    let non_zero = test_paths(&path, FillRule::NonZero, None);

    assert!(even_odd.area2() > 0);
    assert!(non_zero.area2() > even_odd.area2());
}

fn reversed(mut path: Path) -> Path {
    path.reverse();
    path
}

#[test]
fn test_hole_on_the_outer_edge() {
    // Both clockwise, the small rectangle touches the right side of the big
    // one.
    let paths = [
        Path::polygon(&[(16, 21), (20, 21), (20, 19), (16, 19)]),
        Path::polygon(&[(3, 26), (20, 26), (20, 10), (3, 10)]),
    ];

    let shape = test_paths(&paths, FillRule::EvenOdd, Some(2 * (17 * 16 - 4 * 2)));
    assert_eq!(shape.chain_count(), 1);
    test_paths(&paths, FillRule::NonZero, Some(2 * 17 * 16));

    // Opposite orientations.
    let paths = [reversed(paths[0].clone()), paths[1].clone()];
    test_both_rules(&paths, 2 * (17 * 16 - 4 * 2));
}

#[test]
fn test_hole_sharing_an_edge() {
    let paths = [
        shapes::rectangle((0, 0), (20, 20)),
        reversed(shapes::rectangle((10, 5), (20, 15))),
    ];
    test_both_rules(&paths, 2 * (400 - 100));

    // The hole fills the whole top of the square.
    let paths = [
        shapes::rectangle((0, 0), (20, 20)),
        reversed(shapes::rectangle((0, 10), (20, 20))),
    ];
    let shape = test_paths(&paths, FillRule::EvenOdd, Some(2 * 200));
    assert_eq!(shape.chain_count(), 1);
}

#[test]
fn test_rectangles() {
    let cases = [
        alloc::vec![
            shapes::rectangle((0, 0), (10, 10)),
            shapes::rectangle((10, 10), (20, 20)),
        ],
        alloc::vec![
            shapes::rectangle((0, 10), (30, 20)),
            shapes::rectangle((10, 0), (20, 30)),
        ],
        alloc::vec![
            shapes::rectangle((0, 0), (10, 10)),
            shapes::rectangle((0, 0), (10, 5)),
        ],
        alloc::vec![
            shapes::rectangle((0, 0), (10, 10)),
            reversed(shapes::rectangle((5, 3), (15, 8))),
            shapes::rectangle((2, -4), (7, 12)),
        ],
        alloc::vec![
            shapes::rectangle((0, 0), (12, 12)),
            shapes::rectangle((3, 3), (9, 9)),
            reversed(shapes::rectangle((6, 0), (12, 6))),
        ],
    ];

    for paths in &cases {
        for &fill_rule in &[FillRule::EvenOdd, FillRule::NonZero] {
            test_paths(paths, fill_rule, Some(grid_area2(paths, fill_rule)));
        }
    }
}

#[test]
fn test_grid_area() {
    assert_eq!(grid_area2(&[shapes::square(10)], FillRule::EvenOdd), 200);
    assert_eq!(grid_area2(&shapes::square_with_hole(), FillRule::NonZero), 1600);

    let paths = shapes::overlapping_squares();
    assert_eq!(grid_area2(&paths, FillRule::EvenOdd), 2 * 150);
    assert_eq!(grid_area2(&paths, FillRule::NonZero), 2 * 175);
}

#[test]
fn test_without_intersections() {
    let options = FillOptions::default().with_intersections(false);
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    FillTessellator::new()
        .tessellate(
            &shapes::square_with_hole(),
            &options,
            &mut shape,
            &mut diagnostics,
        )
        .unwrap();

    assert_eq!(shape.area2(), 2 * (900 - 100));
    assert_eq!(shape.chain_count(), 2);
}

#[test]
fn test_flat_path() {
    let line = [Path::polygon(&[(0, 0), (5, 5), (10, 10)])];
    let shape = test_paths(&line, FillRule::NonZero, Some(0));
    assert!(shape.interior().is_empty());
}

#[test]
fn test_empty_input() {
    let shape = test_paths(&[], FillRule::NonZero, Some(0));
    assert!(shape.interior().is_empty());
    assert_eq!(shape.chain_count(), 0);
}

#[test]
fn test_already_tessellated() {
    let mut shape = Shape::new(12, FillRule::EvenOdd);
    let mut tess = FillTessellator::new();
    let paths = [shapes::square(10)];

    assert_eq!(
        tess.tessellate(&paths, &FillOptions::default(), &mut shape, &mut ()),
        Ok(())
    );
    assert_eq!(
        tess.tessellate(&paths, &FillOptions::default(), &mut shape, &mut ()),
        Err(TessellationError::ShapeAlreadyTessellated { id: 12 })
    );
    assert_eq!(shape.interior().len(), 2);
}

#[test]
fn test_coordinate_out_of_range() {
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let paths = [Path::polygon(&[(0, 0), (MAX_COORDINATE + 1, 0), (0, 10)])];

    assert_eq!(
        FillTessellator::new().tessellate(&paths, &FillOptions::default(), &mut shape, &mut ()),
        Err(TessellationError::CoordinateOutOfRange {
            x: MAX_COORDINATE + 1,
            y: 0
        })
    );
    assert!(!shape.is_tessellated());
    assert!(shape.interior().is_empty());
    assert!(shape.outline().is_empty());

    // The boundary of the range is fine.
    let mut shape = Shape::new(0, FillRule::EvenOdd);
    let paths = [Path::polygon(&[
        (-MAX_COORDINATE, -MAX_COORDINATE),
        (MAX_COORDINATE, -MAX_COORDINATE),
        (MAX_COORDINATE, MAX_COORDINATE),
    ])];
    assert_eq!(
        FillTessellator::new().tessellate(&paths, &FillOptions::default(), &mut shape, &mut ()),
        Ok(())
    );
    assert_eq!(shape.interior().len(), 1);
}

#[test]
fn test_logging() {
    init_logging();
    let (shape, _) = tessellate(&shapes::overlapping_squares(), FillRule::EvenOdd, true);
    assert_eq!(shape.area2(), 2 * 150);
}
