//! Grid execution backends
//!
//! Every per-pixel phase of the pipeline (initial labeling, each
//! refinement iteration, reconstruction) is embarrassingly parallel given
//! a fully-settled input buffer. [`Executor`] is the capability that runs
//! such a phase over a row-major grid: the numeric kernels are written
//! once and dispatched either sequentially (the scalar reference) or
//! across a thread pool.
//!
//! # Parity contract
//!
//! Both backends run the *same* kernel with the same per-pixel float
//! sequence, so their outputs are bit-identical -- there is no tolerance
//! band between the built-in backends, and the parity tests assert exact
//! equality. Phases are separated by full-buffer barriers: an executor
//! call returns only when every row is complete, and iterative phases
//! ping-pong between two buffers rather than mutating in place.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A backend that runs a per-row kernel over a row-major grid.
///
/// The kernel receives a mutable scratch value (created per worker via the
/// factory, reused across that worker's rows), the row index, and the
/// row's output slice. Rows must be independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Executor {
    /// Sequential reference backend. One scratch, rows in order.
    #[default]
    Scalar,
    /// Rayon-backed parallel backend. One scratch per worker thread.
    #[cfg(feature = "parallel")]
    Parallel,
}

impl Executor {
    /// The fastest available backend: parallel when the `parallel` feature
    /// is enabled, otherwise the scalar reference.
    pub fn preferred() -> Self {
        #[cfg(feature = "parallel")]
        {
            Executor::Parallel
        }
        #[cfg(not(feature = "parallel"))]
        {
            Executor::Scalar
        }
    }

    /// Fill `out` by running `kernel` once per row of `row_len` items.
    ///
    /// `out.len()` must be a multiple of `row_len`. The call returns only
    /// after every row has been written (the inter-phase barrier).
    pub fn fill_rows<T, S, M, F>(self, out: &mut [T], row_len: usize, make_scratch: M, kernel: F)
    where
        T: Send,
        M: Fn() -> S + Sync + Send,
        F: Fn(&mut S, usize, &mut [T]) + Sync + Send,
    {
        debug_assert!(row_len > 0 && out.len() % row_len == 0);
        match self {
            Executor::Scalar => {
                let mut scratch = make_scratch();
                for (y, row) in out.chunks_mut(row_len).enumerate() {
                    kernel(&mut scratch, y, row);
                }
            }
            #[cfg(feature = "parallel")]
            Executor::Parallel => {
                out.par_chunks_mut(row_len)
                    .enumerate()
                    .for_each_init(&make_scratch, |scratch, (y, row)| kernel(scratch, y, row));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: usize, height: usize, exec: Executor) -> Vec<u32> {
        let mut out = vec![0u32; width * height];
        exec.fill_rows(
            &mut out,
            width,
            || (),
            |_, y, row| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = ((x + y) % 2) as u32;
                }
            },
        );
        out
    }

    #[test]
    fn test_scalar_fills_every_row() {
        let out = checker(3, 2, Executor::Scalar);
        assert_eq!(out, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_scratch_reused_across_rows() {
        // Scalar backend must carry one scratch across all rows.
        let mut out = vec![0u32; 4 * 3];
        Executor::Scalar.fill_rows(
            &mut out,
            4,
            || 0u32,
            |seen, _, row| {
                *seen += 1;
                row.fill(*seen);
            },
        );
        assert_eq!(out[0], 1);
        assert_eq!(out[8], 3);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_backends_agree_exactly() {
        let scalar = checker(33, 17, Executor::Scalar);
        let parallel = checker(33, 17, Executor::Parallel);
        assert_eq!(scalar, parallel);
    }
}
