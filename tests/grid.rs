use gridquad::callbacks::{FileWriterCallback, SimpleCallback};
use gridquad::grid::{self, Grid};
use gridquad::print::format_matrix;
use gridquad::*;

use std::fs::read_to_string;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

// a function that is cheap but not symmetric in its arguments
fn saddle(x: f64, y: f64) -> f64 {
    x * x - 2.0 * y * y + 0.5 * x * y
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

#[test]
fn sequential_and_concurrent_agree() {
    let x = linspace(-2.0, 2.0, 31);
    let y = linspace(-1.0, 3.0, 17);

    let reference = grid::sample(&x, &y, saddle, 1);

    for concurrency in 2..=8 {
        let grid = grid::sample(&x, &y, saddle, concurrency);
        assert_eq!(grid.dims(), (31, 17));

        for r in 0..17 {
            for c in 0..31 {
                assert_eq!(grid.z(c, r), reference.z(c, r));
            }
        }
    }
}

#[test]
fn values_and_coordinates() {
    let x = vec![0.5, 1.5, 4.0];
    let y = vec![-1.0, 2.0];
    let grid = grid::sample(&x, &y, saddle, 3);

    for (c, &xc) in x.iter().enumerate() {
        assert_eq!(grid.x(c), xc);
    }

    for (r, &yr) in y.iter().enumerate() {
        assert_eq!(grid.y(r), yr);
    }

    for c in 0..x.len() {
        for r in 0..y.len() {
            assert_eq!(grid.z(c, r), saddle(x[c], y[r]));
        }
    }
}

#[test]
fn coordinates_are_copied() {
    let mut x = vec![1.0, 2.0];
    let mut y = vec![3.0];
    let grid = grid::sample(&x, &y, |x, y| x + y, 2);

    x[0] = 100.0;
    y[0] = -100.0;

    assert_eq!(grid.x_locations(), &[1.0, 2.0]);
    assert_eq!(grid.y_locations(), &[3.0]);
    assert_eq!(grid.z(0, 0), 4.0);
}

#[test]
fn empty_coordinates() {
    let calls = AtomicUsize::new(0);
    let count = |_: f64, _: f64| {
        calls.fetch_add(1, Ordering::SeqCst);
        1.0
    };

    for &concurrency in &[0, 1, 4] {
        let no_columns = grid::sample(&[], &[1.0, 2.0], count, concurrency);
        assert_eq!(no_columns.dims(), (0, 2));

        let no_rows = grid::sample(&[1.0, 2.0, 3.0], &[], count, concurrency);
        assert_eq!(no_rows.dims(), (3, 0));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn every_cell_evaluated_once() {
    let calls = AtomicUsize::new(0);
    let x = linspace(0.0, 1.0, 20);
    let y = linspace(0.0, 1.0, 25);

    let _ = grid::sample(
        &x,
        &y,
        |x, y| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * y
        },
        6,
    );

    assert_eq!(calls.load(Ordering::SeqCst), 500);
}

#[test]
fn single_precision() {
    let grid: Grid<f32> = grid::sample(&[1.0f32, 2.0], &[3.0f32], |x, y| x * y, 2);
    assert_eq!(grid.z(1, 0), 6.0);
}

#[test]
fn report_written_to_file() {
    let file = NamedTempFile::new().unwrap();
    let callback = FileWriterCallback::new(file.path());
    let x = linspace(0.0, 1.0, 10);
    let y = linspace(0.0, 1.0, 7);

    let _ = grid::sample_with_callback(&x, &y, saddle, 3, &callback);

    let report: SamplingReport = serde_json::from_str(&read_to_string(file.path()).unwrap())
        .expect("Unable to deserialize report from json.");

    assert_eq!(report.rows(), 7);
    assert_eq!(report.cols(), 10);
    assert_eq!(report.workers(), 3);
    assert_eq!(report.evaluations(), 70);
}

#[test]
fn simple_callback_does_not_change_result() {
    let x = linspace(0.0, 1.0, 4);
    let grid = grid::sample_with_callback(&x, &x, saddle, 1, &SimpleCallback {});

    assert_eq!(grid, grid::sample(&x, &x, saddle, 1));
}

#[test]
fn grid_prints_like_its_matrix() {
    let grid = grid::sample(&[1.0, 2.0], &[10.0, 20.0], |x, y| x * y, 2);

    assert_eq!(format_matrix("z", &grid), "z:\n⎡10  20⎤\n⎣20  40⎦");
    assert_eq!(format_matrix("z", &grid), format_matrix("z", grid.data()));
}
