//! Immutable rectilinear lookup table.
//!
//! ```rust
//! use ndtable::Grid;
//!
//! let x = [0.0_f64, 1.0, 2.0];
//! let y = [10.0_f64, 20.0];
//!
//! // C-style ordering: z(x0, y0), z(x0, y1), z(x1, y0), ...
//! let z = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//!
//! let grid = Grid::new(&[3, 2], &z, &[&x[..], &y[..]]).unwrap();
//! assert_eq!(grid.value_at(&[1, 1]), 4.0);
//! ```
use itertools::Itertools;
use num_traits::Float;
use tracing::debug;

use crate::error::{TableError, TableResult};

/// Upper bound on the number of dimensions of a table.
pub const MAX_NDIMS: usize = 32;

/// Number of values in a table with the given shape.
///
/// # Errors
/// * If the product overflows `usize`
pub fn calculate_numel(dims: &[usize]) -> TableResult<usize> {
    dims.iter()
        .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| TableError::dimension("number of elements overflows"))
}

/// An N-dimensional table of values on a rectilinear grid.
///
/// Owns copies of its breakpoints and values; nothing the caller passed in
/// is aliased after construction. Values use C-style ordering, so the last
/// dimension varies fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    /// Size of each dimension
    dims: Vec<usize>,

    /// Cumulative products of higher dimensions, used for indexing
    strides: Vec<usize>,

    /// Breakpoints per dimension, each of size dims[i]
    scales: Vec<Vec<T>>,

    /// Values at each point, size prod(dims)
    data: Vec<T>,
}

impl<T: Float> Grid<T> {
    /// Build a table, copying the shape, breakpoints and values.
    ///
    /// # Errors
    /// * `InvalidDimension` if there are more than `MAX_NDIMS` dimensions,
    ///   any dimension is empty, or the scales and values do not match `dims`
    /// * `NonMonotonic` if any scale is not finite and strictly increasing,
    ///   or the spacing of two breakpoints overflows
    /// * `AllocationFailure` if storage could not be reserved
    pub fn new(dims: &[usize], data: &[T], scales: &[&[T]]) -> TableResult<Self> {
        let ndims = dims.len();
        if ndims > MAX_NDIMS {
            return Err(TableError::dimension(format!(
                "{ndims} dimensions exceeds maximum ({MAX_NDIMS})"
            )));
        }
        if let Some(dim) = dims.iter().position(|&n| n == 0) {
            return Err(TableError::dimension(format!("dimension {dim} is empty")));
        }
        if scales.len() != ndims {
            return Err(TableError::dimension(format!(
                "expected {ndims} scales, got {}",
                scales.len()
            )));
        }
        for (dim, (scale, &n)) in scales.iter().zip(dims).enumerate() {
            if scale.len() != n {
                return Err(TableError::dimension(format!(
                    "scale {dim} has {} breakpoints, expected {n}",
                    scale.len()
                )));
            }
            let finite = scale.iter().all(|x| x.is_finite());
            // Spacing must also be finite, or offsets within the interval are lost
            let ascending = scale.windows(2).all(|w| w[1] > w[0] && (w[1] - w[0]).is_finite());
            if !(finite && ascending) {
                return Err(TableError::NonMonotonic { dim });
            }
        }
        let numel = calculate_numel(dims)?;
        if data.len() != numel {
            return Err(TableError::dimension(format!(
                "expected {numel} values, got {}",
                data.len()
            )));
        }

        // Reserve everything before copying so a failure leaves nothing behind
        let mut owned_dims = Vec::new();
        owned_dims.try_reserve_exact(ndims)?;
        owned_dims.extend_from_slice(dims);

        let mut strides = Vec::new();
        strides.try_reserve_exact(ndims)?;
        strides.resize(ndims, 1);
        let mut acc = 1;
        for i in (0..ndims).rev() {
            strides[i] = acc;
            acc *= dims[i];
        }

        let mut owned_scales = Vec::new();
        owned_scales.try_reserve_exact(ndims)?;
        for scale in scales {
            let mut s = Vec::new();
            s.try_reserve_exact(scale.len())?;
            s.extend_from_slice(scale);
            owned_scales.push(s);
        }

        let mut owned_data = Vec::new();
        owned_data.try_reserve_exact(numel)?;
        owned_data.extend_from_slice(data);

        debug!(ndims, numel, "constructed table");

        Ok(Self {
            dims: owned_dims,
            strides,
            scales: owned_scales,
            data: owned_data,
        })
    }

    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Distance in `data` between neighbours along each dimension.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Breakpoints of one dimension.
    ///
    /// # Panics
    /// * If `dim >= self.ndims()`
    pub fn scale(&self, dim: usize) -> &[T] {
        &self.scales[dim]
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Position in `data` of a multi-index.
    #[inline]
    pub fn flat_index(&self, loc: &[usize]) -> usize {
        let mut i = 0;
        for j in 0..self.strides.len() {
            i += loc[j] * self.strides[j];
        }
        i
    }

    /// Value stored at a multi-index.
    #[inline]
    pub fn value_at(&self, loc: &[usize]) -> T {
        self.data[self.flat_index(loc)]
    }

    /// Every multi-index of the grid, in the same order as `data`.
    pub fn nodes(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        // A scalar table still has exactly one node
        let scalar = self.dims.is_empty().then(Vec::new);
        let product = (!self.dims.is_empty())
            .then(|| self.dims.iter().map(|&n| 0..n).multi_cartesian_product())
            .into_iter()
            .flatten();
        product.chain(scalar)
    }

    /// Coordinates of a multi-index.
    pub fn coords(&self, loc: &[usize]) -> Vec<T> {
        loc.iter()
            .zip(&self.scales)
            .map(|(&i, scale)| scale[i])
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::linspace;

    #[test]
    fn test_strides_c_order() {
        let x = linspace(0.0, 1.0, 2);
        let y = linspace(0.0, 1.0, 3);
        let z = linspace(0.0, 1.0, 4);
        let vals: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let grid = Grid::new(&[2, 3, 4], &vals, &[&x[..], &y[..], &z[..]]).unwrap();

        assert_eq!(grid.strides(), &[12, 4, 1]);
        assert_eq!(grid.numel(), 24);
        assert_eq!(grid.value_at(&[1, 2, 3]), 23.0);
        assert_eq!(grid.value_at(&[0, 1, 0]), 4.0);

        // Node order matches data order
        grid.nodes()
            .enumerate()
            .for_each(|(i, loc)| assert_eq!(grid.flat_index(&loc), i));
        assert_eq!(grid.nodes().count(), 24);
    }

    #[test]
    fn test_copies_caller_buffers() {
        let mut x = vec![0.0, 1.0, 2.0];
        let mut vals = vec![10.0, 20.0, 40.0];
        let grid = Grid::new(&[3], &vals, &[&x[..]]).unwrap();

        x[0] = -100.0;
        vals[0] = -100.0;
        drop(x);
        drop(vals);

        assert_eq!(grid.scale(0), &[0.0, 1.0, 2.0]);
        assert_eq!(grid.data(), &[10.0, 20.0, 40.0]);
    }

    #[test]
    fn test_scalar_table() {
        let grid = Grid::<f64>::new(&[], &[7.0], &[]).unwrap();
        assert_eq!(grid.ndims(), 0);
        assert_eq!(grid.nodes().collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(grid.value_at(&[]), 7.0);
    }

    #[test]
    fn test_invalid_shapes() {
        let x = [0.0_f64, 1.0];

        // Too many dimensions
        let dims = [1_usize; MAX_NDIMS + 1];
        let scales = vec![&[0.0_f64][..]; MAX_NDIMS + 1];
        assert!(matches!(
            Grid::new(&dims, &[1.0], &scales),
            Err(TableError::InvalidDimension(_))
        ));

        // Maximum is allowed
        let dims = [1_usize; MAX_NDIMS];
        let scales = vec![&[0.0_f64][..]; MAX_NDIMS];
        assert!(Grid::new(&dims, &[1.0], &scales).is_ok());

        // Empty dimension
        let empty: &[f64] = &[];
        assert!(matches!(
            Grid::new(&[0], &[], &[empty]),
            Err(TableError::InvalidDimension(_))
        ));

        // Wrong number of values
        assert!(matches!(
            Grid::new(&[2], &[1.0, 2.0, 3.0], &[&x[..]]),
            Err(TableError::InvalidDimension(_))
        ));

        // Wrong number of scales
        assert!(matches!(
            Grid::new(&[2], &[1.0, 2.0], &[&x[..], &x[..]]),
            Err(TableError::InvalidDimension(_))
        ));

        // Scale length does not match dims
        assert!(matches!(
            Grid::new(&[3], &[1.0, 2.0, 3.0], &[&x[..]]),
            Err(TableError::InvalidDimension(_))
        ));

        // Overflowing element count
        assert!(calculate_numel(&[usize::MAX, 2]).is_err());
        assert_eq!(calculate_numel(&[]).unwrap(), 1);
    }

    #[test]
    fn test_non_monotonic_scales() {
        let y = [0.0_f64, 1.0];
        let vals = [0.0; 6];
        for x in [[0.0_f64, 2.0, 1.0], [0.0, 1.0, 1.0], [0.0, f64::NAN, 1.0]] {
            assert_eq!(
                Grid::new(&[2, 3], &vals, &[&y[..], &x[..]]),
                Err(TableError::NonMonotonic { dim: 1 })
            );
        }
        let x = [f64::NEG_INFINITY, 0.0, 1.0];
        assert!(Grid::new(&[3, 2], &vals, &[&x[..], &y[..]]).is_err());

        // Finite breakpoints whose spacing overflows
        let x = [-1e308, 1e308];
        assert_eq!(
            Grid::new(&[2], &[1.0, 2.0], &[&x[..]]),
            Err(TableError::NonMonotonic { dim: 0 })
        );
        let x = [-1e307, 1e307];
        assert!(Grid::new(&[2], &[1.0, 2.0], &[&x[..]]).is_ok());
    }
}
