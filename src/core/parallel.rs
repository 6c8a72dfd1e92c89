//! Parallel evaluation of a function over a two-dimensional index range.
use crossbeam as cb;
use crossbeam::channel;
use std::panic;

/// Evaluates `f(i, j)` for every `i` in `0..rows` and `j` in `0..cols`.
///
/// The values are returned in row-major order, i.e. the value for `(i, j)` is stored at index
/// `i * cols + j`, together with the number of evaluations each worker performed.
///
/// With `workers <= 1` everything is evaluated on the calling thread in row-major order. Otherwise
/// exactly `workers` threads are spawned which share a single work queue. The calling thread
/// enqueues all index pairs in row-major order and closes the queue afterwards, the workers take
/// pairs from the queue until it is exhausted. Every pair is evaluated exactly once, but there is
/// no guarantee about the order of the evaluations. Finished values travel back over a second
/// bounded queue and are stored in place by the calling thread, so at most `workers` of them are
/// held outside the result at any time. This function blocks until all workers have finished.
/// If `f` panics on a worker, the panic is resumed on the calling thread.
pub fn map_2d<T, F>(rows: usize, cols: usize, workers: usize, f: F) -> (Vec<T>, Vec<usize>)
where
    T: Copy + Default + Send,
    F: Fn(usize, usize) -> T + Sync,
{
    if workers <= 1 {
        let values = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();

        return (values, vec![rows * cols]);
    }

    let (sender, receiver) = channel::bounded::<(usize, usize)>(workers);
    let (result_sender, results) = channel::bounded::<(usize, T)>(workers);
    let mut values = vec![T::default(); rows * cols];
    let f = &f;

    let per_worker = cb::thread::scope(|s| {
        let handles = (0..workers)
            .map(|_| {
                let receiver = receiver.clone();
                let result_sender = result_sender.clone();

                s.spawn(move |_| {
                    let mut calls = 0;

                    for (i, j) in receiver.iter() {
                        if result_sender.send((i * cols + j, f(i, j))).is_err() {
                            break;
                        }
                        calls += 1;
                    }

                    calls
                })
            })
            .collect::<Vec<_>>();

        // only the workers may hold these ends, otherwise the loops below could block forever
        // after all of them died
        drop(receiver);
        drop(result_sender);

        let mut cells = (0..rows).flat_map(|i| (0..cols).map(move |j| (i, j)));
        let mut next = cells.next();

        // store finished cells while enqueueing, so that neither channel fills up for good
        while let Some(cell) = next {
            let open = channel::select! {
                send(sender, cell) -> res => res.map(|()| next = cells.next()).is_ok(),
                recv(results) -> msg => msg.map(|(index, value)| values[index] = value).is_ok(),
            };

            if !open {
                break;
            }
        }

        // closing the queue lets the workers drain it and stop
        drop(sender);

        for (index, value) in results.iter() {
            values[index] = value;
        }

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|err| panic::resume_unwind(err));

    (values, per_worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cell(i: usize, j: usize) -> f64 {
        (i as f64).sin() * 10.0 + (j as f64).sqrt()
    }

    #[test]
    fn test_sequential_row_major() {
        let (values, per_worker) = map_2d(2, 3, 1, |i, j| (10 * i + j) as u32);

        assert_eq!(values, vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(per_worker, vec![6]);
    }

    #[test]
    fn test_concurrent_matches_sequential() {
        let (sequential, _) = map_2d(17, 23, 1, cell);

        for workers in 2..6 {
            let (concurrent, per_worker) = map_2d(17, 23, workers, cell);

            assert_eq!(concurrent, sequential);
            assert_eq!(per_worker.len(), workers);
            assert_eq!(per_worker.iter().sum::<usize>(), 17 * 23);
        }
    }

    #[test]
    fn test_every_cell_evaluated_once() {
        let calls = AtomicUsize::new(0);
        let (values, _) = map_2d(9, 11, 4, |i, j| {
            calls.fetch_add(1, Ordering::SeqCst);
            i * 11 + j
        });

        assert_eq!(calls.load(Ordering::SeqCst), 99);
        assert!(values.iter().enumerate().all(|(index, &v)| index == v));
    }

    #[test]
    fn test_empty_range() {
        let calls = AtomicUsize::new(0);

        for &(rows, cols) in &[(0, 5), (5, 0), (0, 0)] {
            for &workers in &[1, 3] {
                let (values, per_worker) = map_2d(rows, cols, workers, |_, _| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    1.0
                });

                assert!(values.is_empty());
                assert_eq!(per_worker.iter().sum::<usize>(), 0);
            }
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_more_workers_than_cells() {
        let (values, per_worker) = map_2d(1, 2, 8, |_, j| j as f64);

        assert_eq!(values, vec![0.0, 1.0]);
        assert_eq!(per_worker.len(), 8);
        assert_eq!(per_worker.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_many_cells_through_bounded_queues() {
        // far more cells than both queues can hold at once
        let (values, per_worker) = map_2d(64, 64, 2, |i, j| {
            if (i + j) % 97 == 0 {
                std::thread::yield_now();
            }
            (i * 64 + j) as u64
        });

        assert!(values.iter().enumerate().all(|(index, &v)| index as u64 == v));
        assert_eq!(per_worker.iter().sum::<usize>(), 64 * 64);
    }

    #[test]
    #[should_panic(expected = "bad cell")]
    fn test_worker_panic_propagates() {
        let _ = map_2d(4, 4, 3, |i, j| {
            if i == 2 && j == 3 {
                panic!("bad cell");
            }
            0.0
        });
    }
}
