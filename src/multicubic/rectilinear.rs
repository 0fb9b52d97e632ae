//! Recursive evaluation of cubic Hermite interpolation on a rectilinear grid.
//!
//! The interpolant is built one dimension at a time: along dimension `d`,
//! the values at each node of a small window around the bracket are
//! themselves interpolated over the remaining dimensions, then combined
//! by a one-dimensional Hermite spline. The recursion depth is `ndims`,
//! and each level visits at most 6 nodes (Akima) or 4 (monotone methods).
use num_traits::Float;

use super::{node_slope, normalized_hermite_spline};
use crate::grid::Grid;
use crate::locate::{Bracket, Range};
use crate::method::{Extrap, Interp};

/// Largest window of nodes read along one dimension.
const MAX_WINDOW: usize = 6;

/// Interpolate over dimensions `dim..ndims`, with lower dimensions already
/// fixed at the flat offset `base`.
///
/// `brackets` must already have the extrapolation policy applied. Call with
/// `dim = 0` and `base = 0` to evaluate a full point.
pub fn interp_recursive<T: Float>(
    grid: &Grid<T>,
    brackets: &[Bracket<T>],
    method: Interp,
    extrap: Extrap,
    dim: usize,
    base: usize,
) -> T {
    if dim == grid.ndims() {
        return grid.data()[base];
    }

    let n = grid.dims()[dim];
    let stride = grid.strides()[dim];
    if n < 2 {
        return interp_recursive(grid, brackets, method, extrap, dim + 1, base);
    }

    // Nodes needed on each side of the interval to estimate both end slopes
    let bracket = brackets[dim];
    let k = bracket.index;
    let (before, after) = match method {
        Interp::Akima => (2, 3),
        _ => (1, 2),
    };
    let lo = k.saturating_sub(before);
    let hi = (k + after).min(n - 1);

    let xs = &grid.scale(dim)[lo..=hi];
    let mut store = [T::zero(); MAX_WINDOW];
    let ys = &mut store[..xs.len()];
    for (i, y) in ys.iter_mut().enumerate() {
        *y = interp_recursive(grid, brackets, method, extrap, dim + 1, base + (lo + i) * stride);
    }

    interp_segment(method, xs, ys, k - lo, &bracket, extrap)
}

/// Evaluate the Hermite interval starting at window node `j`.
#[inline]
fn interp_segment<T: Float>(
    method: Interp,
    xs: &[T],
    ys: &[T],
    j: usize,
    bracket: &Bracket<T>,
    extrap: Extrap,
) -> T {
    let t = bracket.offset;

    // Exact at the nodes, including clamped extrapolation
    if t == T::zero() {
        return ys[j];
    }
    if t == T::one() {
        return ys[j + 1];
    }

    let h = xs[j + 1] - xs[j];
    let d0 = node_slope(method, xs, ys, j);
    let d1 = node_slope(method, xs, ys, j + 1);

    match (bracket.range, extrap) {
        // Continue the boundary slope outside the grid
        (Range::Below, Extrap::Linear) => continue_slope(ys[j], d0, t * h),
        (Range::Above, Extrap::Linear) => continue_slope(ys[j + 1], d1, (t - T::one()) * h),
        _ => normalized_hermite_spline(t, ys[j], ys[j + 1] - ys[j], d0 * h, d1 * h),
    }
}

/// `y + slope * dx`, staying at `y` for a flat slope even when `dx` is infinite.
#[inline]
fn continue_slope<T: Float>(y: T, slope: T, dx: T) -> T {
    if slope == T::zero() {
        y
    } else {
        y + slope * dx
    }
}
