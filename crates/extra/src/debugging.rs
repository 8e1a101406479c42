//! Helpers to turn a failing tessellation into a small test case.

use crate::geom::{Path, Point};

use std::panic;

pub type Polygons = Vec<Vec<Point>>;
pub type PolygonsRef<'a> = &'a [Vec<Point>];

pub fn paths_to_polygons(paths: &[Path]) -> Polygons {
    paths.iter().map(|path| path.points.clone()).collect()
}

pub fn polygons_to_paths(polygons: PolygonsRef) -> Vec<Path> {
    polygons
        .iter()
        .map(|points| Path::new(points.clone(), true))
        .collect()
}

/// Removes paths and vertices from `paths` as long as `cb` keeps failing
/// (returning true or panicking), and prints the result as a test.
pub fn find_reduced_test_case<F>(paths: &[Path], cb: &F) -> Vec<Path>
where
    F: Fn(&[Path]) -> bool + panic::UnwindSafe + panic::RefUnwindSafe,
{
    let mut polygons = paths_to_polygons(paths);

    println!(" -- removing paths...");

    polygons = find_reduced_test_case_sp(polygons, cb);

    println!(" -- removing vertices...");

    for p in 0..polygons.len() {
        let mut v = 0;
        loop {
            if v >= polygons[p].len() || polygons[p].len() <= 3 {
                break;
            }

            let mut cloned = polygons.clone();
            cloned[p].remove(v);

            if fails(&cloned, cb) {
                polygons = cloned;
                continue;
            }

            v += 1;
        }
    }

    println!(" ----------- reduced test case: -----------\n\n");
    println!("#[test]");
    println!("fn reduced_test_case() {{");
    println!("    let paths = [");
    for poly in &polygons {
        let coords: Vec<String> = poly
            .iter()
            .map(|p| format!("({}, {})", p.x(), p.y()))
            .collect();
        println!("        Path::polygon(&[{}]),", coords.join(", "));
    }
    println!("    ];\n");
    println!("    test_paths(&paths);");
    println!("}}\n\n");

    polygons_to_paths(&polygons)
}

fn fails<F>(polygons: PolygonsRef, cb: &F) -> bool
where
    F: Fn(&[Path]) -> bool + panic::UnwindSafe + panic::RefUnwindSafe,
{
    let paths = polygons_to_paths(polygons);
    panic::catch_unwind(|| cb(&paths)).unwrap_or(true)
}

fn find_reduced_test_case_sp<F>(mut polygons: Polygons, cb: &F) -> Polygons
where
    F: Fn(&[Path]) -> bool + panic::UnwindSafe + panic::RefUnwindSafe,
{
    let mut i = 0;
    loop {
        if i >= polygons.len() {
            return polygons;
        }

        let mut cloned = polygons.clone();
        cloned.remove(i);

        if fails(&cloned, cb) {
            polygons = cloned;
            continue;
        }

        i += 1;
    }
}

#[test]
fn reduce_to_the_failing_path() {
    let paths = [
        Path::polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
        Path::polygon(&[(20, 0), (30, 0), (25, 7), (30, 10), (20, 10)]),
    ];

    // Fails whenever a path has a vertex at (25, 7).
    let reduced = find_reduced_test_case(&paths, &|paths: &[Path]| {
        paths
            .iter()
            .any(|path| path.points.iter().any(|p| p.x() == 25 && p.y() == 7))
    });

    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced[0].len(), 3);
    assert!(reduced[0].points.iter().any(|p| p.x() == 25 && p.y() == 7));
}
