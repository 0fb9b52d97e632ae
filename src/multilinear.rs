//! Multilinear interpolation and extrapolation.
//!
//! Each dimension contributes a stencil of one or two nodes. The value at an
//! observation point is reduced one dimension at a time: along each two-node
//! dimension, the already-reduced values at the lower and upper node are
//! combined as `lo + t * (hi - lo)`. Inside the grid this is the usual
//! weighted mean of the 2^ndims cell corners.
//!
//! Offsets outside `[0, 1]` continue the boundary cell linearly, which is how
//! linear extrapolation is expressed. The difference form keeps the result
//! accurate far from the grid, where the corner weights `1 - t` and `t` would
//! cancel each other.
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Repeated_linear_interpolation
use num_traits::Float;

use crate::locate::Bracket;

/// Nodes along one dimension that contribute to a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stencil<T> {
    nodes: [usize; 2],
    /// Normalized position between the two nodes
    offset: T,
    len: usize,
}

impl<T: Float> Stencil<T> {
    /// A single node carrying the whole weight.
    #[inline]
    pub fn single(node: usize) -> Self {
        Self {
            nodes: [node, node],
            offset: T::zero(),
            len: 1,
        }
    }

    /// Linear blend of nodes `k` and `k + 1` at normalized offset `t`.
    #[inline]
    pub fn pair(k: usize, t: T) -> Self {
        Self {
            nodes: [k, k + 1],
            offset: t,
            len: 2,
        }
    }

    /// Two-node linear stencil for a bracket on a dimension with `n` breakpoints.
    #[inline]
    pub fn linear(bracket: &Bracket<T>, n: usize) -> Self {
        if n < 2 {
            Self::single(0)
        } else {
            Self::pair(bracket.index, bracket.offset)
        }
    }
}

/// Combine `vals` over the nodes of the stencils, one stencil per dimension.
///
/// Reads `2^(number of two-node stencils)` values.
#[inline]
pub fn blend<T: Float>(stencils: &[Stencil<T>], strides: &[usize], vals: &[T]) -> T {
    reduce(stencils, strides, vals, 0, 0)
}

/// Reduce dimensions `dim..` with lower dimensions fixed at flat offset `base`.
fn reduce<T: Float>(
    stencils: &[Stencil<T>],
    strides: &[usize],
    vals: &[T],
    dim: usize,
    base: usize,
) -> T {
    let Some(s) = stencils.get(dim) else {
        return vals[base];
    };
    let stride = strides[dim];

    let lo = reduce(stencils, strides, vals, dim + 1, base + s.nodes[0] * stride);
    if s.len == 1 {
        return lo;
    }
    let hi = reduce(stencils, strides, vals, dim + 1, base + s.nodes[1] * stride);

    // Flat segments stay flat at any distance, including infinite offsets
    if hi == lo {
        lo
    } else {
        lo + s.offset * (hi - lo)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use approx::assert_abs_diff_eq;

    /// Constant data is reproduced for any offsets, so the implied
    /// corner weights sum to one
    #[test]
    fn test_constant_data_reproduced() {
        let mut rng = rng_fixed_seed();
        for ndims in 1..=8 {
            let offsets = randn::<f64>(&mut rng, ndims);
            let stencils: Vec<Stencil<f64>> = offsets
                .iter()
                .map(|&t| Stencil::pair(0, 4.0 * t - 2.0))
                .collect();
            let strides: Vec<usize> = (0..ndims).rev().map(|i| 1 << i).collect();
            let vals = vec![0.3; 1 << ndims];

            assert_eq!(blend(&stencils, &strides, &vals), 0.3);
        }
    }

    /// Inside the cell the result matches the weighted mean of the corners
    #[test]
    fn test_matches_corner_weights() {
        let mut rng = rng_fixed_seed();
        let vals = randn::<f64>(&mut rng, 8);
        let t = randn::<f64>(&mut rng, 3);
        let stencils: Vec<Stencil<f64>> = t.iter().map(|&ti| Stencil::pair(0, ti)).collect();

        let mut expected = 0.0;
        for (k, v) in vals.iter().enumerate() {
            let mut w = 1.0;
            for d in 0..3 {
                let upper = (k >> (2 - d)) & 1 == 1;
                w *= if upper { t[d] } else { 1.0 - t[d] };
            }
            expected += w * v;
        }

        assert_abs_diff_eq!(blend(&stencils, &[4, 2, 1], &vals), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_bilinear_center() {
        // (0,0)=0, (0,1)=1, (1,0)=1, (1,1)=2 in C order
        let vals = [0.0_f64, 1.0, 1.0, 2.0];
        let stencils = [Stencil::pair(0, 0.5), Stencil::pair(0, 0.5)];
        assert_eq!(blend(&stencils, &[2, 1], &vals), 1.0);
    }

    #[test]
    fn test_single_node_dims_skip_corners() {
        // 3 x 1 x 2 grid, middle dimension degenerate
        let vals: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let stencils = [
            Stencil::pair(1, 0.25),
            Stencil::single(0),
            Stencil::pair(0, 1.0),
        ];

        // Lower x node 1, upper x node 2, always the upper z node
        let v = blend(&stencils, &[2, 2, 1], &vals);
        assert_abs_diff_eq!(v, 0.75 * 3.0 + 0.25 * 5.0, epsilon = 1e-12);
    }

    /// Far outside the cell, a flat boundary segment stays exactly flat
    /// and a sloped one keeps its slope
    #[test]
    fn test_far_extrapolation() {
        let flat = [0.1_f64, 0.1];
        let sloped = [1.0_f64, 3.0];
        for t in [1e8, 1e12, 1e16, 1e300, -1e16] {
            assert_eq!(blend(&[Stencil::pair(0, t)], &[1], &flat), 0.1);
            assert_eq!(blend(&[Stencil::pair(0, t)], &[1], &sloped), 1.0 + 2.0 * t);
        }
        assert_eq!(blend(&[Stencil::pair(0, f64::INFINITY)], &[1], &flat), 0.1);
        assert_eq!(blend(&[Stencil::pair(0, f64::INFINITY)], &[1], &sloped), f64::INFINITY);
    }
}
