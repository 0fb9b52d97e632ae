//! Evaluation of a table at observation points.
//!
//! ```rust
//! use ndtable::{evaluate, Extrap, Grid, Interp};
//!
//! let x = [0.0_f64, 1.0, 2.0];
//! let grid = Grid::new(&[3], &[10.0, 20.0, 40.0], &[&x[..]]).unwrap();
//!
//! assert_eq!(evaluate(&grid, &[1.5], Interp::Linear, Extrap::Hold).unwrap(), 30.0);
//! assert_eq!(evaluate(&grid, &[3.0], Interp::Linear, Extrap::Hold).unwrap(), 40.0);
//! assert_eq!(evaluate(&grid, &[3.0], Interp::Linear, Extrap::Linear).unwrap(), 60.0);
//! assert!(evaluate(&grid, &[3.0], Interp::Linear, Extrap::None).is_err());
//! ```
use num_traits::Float;
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::extrap::extrapolate;
use crate::grid::{Grid, MAX_NDIMS};
use crate::locate::{locate, Bracket};
use crate::method::{Extrap, Interp, Methods};
use crate::multicubic::interp_recursive;
use crate::multilinear::{blend, Stencil};
use crate::nearest;

/// Evaluate the table at one point.
///
/// # Errors
/// * `InvalidDimension` if the point does not have one coordinate per dimension
/// * `OutOfRange` if a coordinate is outside the grid and `extrap` is `None`
pub fn evaluate<T: Float>(
    grid: &Grid<T>,
    point: &[T],
    interp: Interp,
    extrap: Extrap,
) -> TableResult<T> {
    Evaluator::new(grid, Methods::new(interp, extrap)).eval_one(point)
}

/// Directional derivative of the table at `point` along `delta`,
/// estimated by a forward difference:
/// `(f(point + delta) - f(point)) / |delta|`.
///
/// A zero-length `delta` gives a derivative of zero.
///
/// # Errors
/// * `InvalidDimension` if `point` or `delta` do not match the table's dimensions
/// * Any error from evaluating either point
pub fn evaluate_derivative<T: Float>(
    grid: &Grid<T>,
    point: &[T],
    delta: &[T],
    interp: Interp,
    extrap: Extrap,
) -> TableResult<T> {
    Evaluator::new(grid, Methods::new(interp, extrap)).derivative(point, delta)
}

/// A table paired with the methods used to evaluate it.
///
/// Evaluation only reads the table, so one evaluator can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a, T> {
    grid: &'a Grid<T>,
    methods: Methods,
}

impl<'a, T: Float> Evaluator<'a, T> {
    pub fn new(grid: &'a Grid<T>, methods: Methods) -> Self {
        Self { grid, methods }
    }

    pub fn grid(&self) -> &'a Grid<T> {
        self.grid
    }

    pub fn methods(&self) -> Methods {
        self.methods
    }

    /// Interpolate the value at a point,
    /// using fixed-size intermediate storage of O(MAX_NDIMS) and no allocation.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the table
    ///   * If a coordinate is outside the grid under `Extrap::None`
    #[inline]
    pub fn eval_one(&self, x: &[T]) -> TableResult<T> {
        let ndims = self.grid.ndims();
        if x.len() != ndims {
            return Err(TableError::dimension(format!(
                "point has {} coordinates, table has {ndims} dimensions",
                x.len()
            )));
        }

        // NaN is never outside the grid, and selecting methods would hide it
        if x.iter().any(|v| v.is_nan()) {
            return Ok(T::nan());
        }

        let Methods { interp, extrap } = self.methods;

        // Locate and apply the extrapolation policy on every dimension
        // before combining, so a rejected coordinate fails fast.
        let mut store = [Bracket::degenerate(); MAX_NDIMS];
        let brackets = &mut store[..ndims];
        for (i, b) in brackets.iter_mut().enumerate() {
            *b = extrapolate(locate(self.grid.scale(i), x[i]), extrap, i, x[i])?;
        }

        if interp.is_cubic() {
            return Ok(interp_recursive(self.grid, brackets, interp, extrap, 0, 0));
        }

        let mut stencils = [Stencil::single(0); MAX_NDIMS];
        for (i, (s, b)) in stencils.iter_mut().zip(brackets.iter()).enumerate() {
            let n = self.grid.dims()[i];
            *s = match interp {
                Interp::Hold => nearest::hold(b, n, extrap),
                Interp::Nearest => nearest::nearest(b, n, extrap),
                _ => Stencil::linear(b, n),
            };
        }

        Ok(blend(&stencils[..ndims], self.grid.strides(), self.grid.data()))
    }

    /// Interpolate on a batch of observation points given one slice per dimension,
    /// like `x[dim][sample]`.
    ///
    /// Stops at the first sample that fails; the output for that sample and
    /// every later one is left unspecified. Use `eval_each` to get a result
    /// for every sample instead.
    ///
    /// # Errors
    ///   * `InvalidDimension` if the number of slices does not match the table
    ///     or any slice length does not match `out`
    ///   * `Sample` wrapping the error of the first failing sample
    pub fn eval(&self, x: &[&[T]], out: &mut [T]) -> TableResult<()> {
        self.check_batch(x, out.len())?;

        let ndims = self.grid.ndims();
        let mut tmp = [T::zero(); MAX_NDIMS];
        for i in 0..out.len() {
            (0..ndims).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.eval_one(&tmp[..ndims]).map_err(|e| sample_error(i, e))?;
        }

        Ok(())
    }

    /// Evaluate a batch, allocating for the output for convenience.
    ///
    /// # Errors
    ///   * As for `eval`
    pub fn eval_alloc(&self, x: &[&[T]]) -> TableResult<Vec<T>> {
        let n = x.first().map_or(1, |xx| xx.len());
        let mut out = vec![T::zero(); n];
        self.eval(x, &mut out)?;
        Ok(out)
    }

    /// Evaluate every sample of a batch independently, keeping per-sample results.
    ///
    /// # Errors
    ///   * `InvalidDimension` if the batch itself is malformed
    pub fn eval_each(&self, x: &[&[T]]) -> TableResult<Vec<TableResult<T>>> {
        let n = x.first().map_or(1, |xx| xx.len());
        self.check_batch(x, n)?;
        Ok((0..n).map(|i| self.eval_sample(x, i)).collect())
    }

    /// Directional derivative by forward difference along `delta`.
    ///
    /// # Errors
    ///   * As for `evaluate_derivative`
    pub fn derivative(&self, x: &[T], delta: &[T]) -> TableResult<T> {
        let ndims = self.grid.ndims();
        if delta.len() != x.len() || x.len() != ndims {
            return Err(TableError::dimension(format!(
                "point has {} coordinates and delta {}, table has {ndims} dimensions",
                x.len(),
                delta.len()
            )));
        }

        let mut stepped = [T::zero(); MAX_NDIMS];
        (0..ndims).for_each(|i| stepped[i] = x[i] + delta[i]);

        let f0 = self.eval_one(x)?;
        let f1 = self.eval_one(&stepped[..ndims])?;

        let step = delta.iter().fold(T::zero(), |acc, &d| acc.hypot(d));
        if step == T::zero() {
            return Ok(T::zero());
        }

        Ok((f1 - f0) / step)
    }

    /// Directional derivatives of a batch, with points and steps both given
    /// one slice per dimension, like `x[dim][sample]` and `delta[dim][sample]`.
    ///
    /// Every sample is evaluated independently, as in `eval_each`.
    ///
    /// # Errors
    ///   * `InvalidDimension` if either batch is malformed or their lengths differ
    pub fn derivative_each(
        &self,
        x: &[&[T]],
        delta: &[&[T]],
    ) -> TableResult<Vec<TableResult<T>>> {
        let n = x.first().map_or(1, |xx| xx.len());
        self.check_batch(x, n)?;
        self.check_batch(delta, n)?;

        let ndims = self.grid.ndims();
        let mut p = [T::zero(); MAX_NDIMS];
        let mut d = [T::zero(); MAX_NDIMS];
        Ok((0..n)
            .map(|i| {
                (0..ndims).for_each(|j| {
                    p[j] = x[j][i];
                    d[j] = delta[j][i];
                });
                self.derivative(&p[..ndims], &d[..ndims])
            })
            .collect())
    }

    fn eval_sample(&self, x: &[&[T]], i: usize) -> TableResult<T> {
        let ndims = self.grid.ndims();
        let mut tmp = [T::zero(); MAX_NDIMS];
        (0..ndims).for_each(|j| tmp[j] = x[j][i]);
        self.eval_one(&tmp[..ndims])
    }

    fn check_batch(&self, x: &[&[T]], n: usize) -> TableResult<()> {
        let ndims = self.grid.ndims();
        if x.len() != ndims {
            return Err(TableError::dimension(format!(
                "got {} coordinate arrays, table has {ndims} dimensions",
                x.len()
            )));
        }
        if x.iter().any(|xx| xx.len() != n) {
            return Err(TableError::dimension(format!(
                "coordinate arrays must all have {n} samples"
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "rayon")]
impl<T: Float + Send + Sync> Evaluator<'_, T> {
    /// Parallel version of `eval`.
    ///
    /// Every sample is evaluated, but the reported failure is the one with
    /// the lowest index, exactly as the sequential short-circuit would report.
    ///
    /// # Errors
    ///   * As for `eval`
    pub fn par_eval(&self, x: &[&[T]], out: &mut [T]) -> TableResult<()> {
        use rayon::prelude::*;

        self.check_batch(x, out.len())?;

        let first_failure = out
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, o)| match self.eval_sample(x, i) {
                Ok(v) => {
                    *o = v;
                    None
                }
                Err(e) => Some((i, e)),
            })
            .min_by_key(|(i, _)| *i);

        match first_failure {
            Some((i, e)) => Err(sample_error(i, e)),
            None => Ok(()),
        }
    }
}

fn sample_error(index: usize, source: TableError) -> TableError {
    debug!(index, error = %source, "batch evaluation stopped");
    TableError::Sample {
        index,
        source: Box::new(source),
    }
}
