extern crate polytess;
#[macro_use]
extern crate bencher;

use polytess::extra::shapes;
use polytess::geom::{FillRule, Path, Point};
use polytess::tessellation::{split_intersecting_paths, tessellate_path, triangulate_monotone};
use polytess::tessellation::{FillOptions, FillTessellator, Shape};

use bencher::Bencher;

const N: usize = 100;

fn grid_of_stars() -> Vec<Path> {
    let mut paths = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            let star = shapes::star(7, 400);
            let (dx, dy) = (i * 600, j * 600);
            let points = star
                .iter()
                .map(|p| Point::with_index(p.x() + dx, p.y() + dy, p.index))
                .collect();
            paths.push(Path::new(points, true));
        }
    }

    paths
}

fn fill_comb(bench: &mut Bencher) {
    let paths = [shapes::comb(200)];
    let options = FillOptions::default();
    let mut tess = FillTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut shape = Shape::new(0, FillRule::EvenOdd);
            tess.tessellate(&paths, &options, &mut shape, &mut ()).unwrap();
        }
    })
}

fn fill_comb_no_intersection(bench: &mut Bencher) {
    let paths = [shapes::comb(200)];
    let options = FillOptions::default().with_intersections(false);
    let mut tess = FillTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut shape = Shape::new(0, FillRule::EvenOdd);
            tess.tessellate(&paths, &options, &mut shape, &mut ()).unwrap();
        }
    })
}

fn fill_stars(bench: &mut Bencher) {
    let paths = grid_of_stars();
    let options = FillOptions::default();
    let mut tess = FillTessellator::new();

    bench.iter(|| {
        let mut shape = Shape::new(0, FillRule::NonZero);
        tess.tessellate(&paths, &options, &mut shape, &mut ()).unwrap();
    })
}

fn split_stars(bench: &mut Bencher) {
    let paths = grid_of_stars();

    bench.iter(|| {
        split_intersecting_paths(&paths, &mut ());
    })
}

fn monotone_decomposition(bench: &mut Bencher) {
    let comb = shapes::comb(200);

    bench.iter(|| {
        for _ in 0..N {
            let mut shape = Shape::new(0, FillRule::EvenOdd);
            tessellate_path(&comb, &mut shape, &mut ());
        }
    })
}

fn monotone_triangulation(bench: &mut Bencher) {
    // A zig-zag going up on both sides.
    let mut coords = Vec::new();
    for i in 0..500 {
        coords.push((1000 + (i % 2) * 10, i * 10));
    }
    for i in (0..500).rev() {
        coords.push((-(i % 2) * 10, i * 10 + 5));
    }
    let polygon = Path::polygon(&coords);

    bench.iter(|| {
        for _ in 0..N {
            let mut shape = Shape::new(0, FillRule::EvenOdd);
            triangulate_monotone(&polygon, &mut shape, &mut ());
        }
    })
}

benchmark_group!(fill_tess,
  fill_comb,
  fill_comb_no_intersection,
  fill_stars
);

benchmark_group!(stages,
  split_stars,
  monotone_decomposition,
  monotone_triangulation
);

benchmark_main!(fill_tess, stages);
