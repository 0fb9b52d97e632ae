//! Piecewise-constant interpolation: nearest node and hold-lower.
//!
//! Both select a single node along each dimension, so the result is one
//! stored value with no blending. Under linear extrapolation, dimensions
//! outside the grid fall back to the two-node linear stencil instead, which
//! continues the boundary interval from the boundary value.
use num_traits::Float;

use crate::locate::{Bracket, Range};
use crate::method::Extrap;
use crate::multilinear::Stencil;

/// Nearest-node selection. Ties at the midpoint take the upper node.
#[inline]
pub fn nearest<T: Float>(bracket: &Bracket<T>, n: usize, extrap: Extrap) -> Stencil<T> {
    let half = T::one() / (T::one() + T::one());
    select(bracket, n, extrap, half)
}

/// Hold the lower node of the interval. Only the last breakpoint
/// (or a point clamped above the grid) takes the upper node.
#[inline]
pub fn hold<T: Float>(bracket: &Bracket<T>, n: usize, extrap: Extrap) -> Stencil<T> {
    select(bracket, n, extrap, T::one())
}

/// Pick the upper node when the offset reaches `threshold`.
#[inline]
fn select<T: Float>(bracket: &Bracket<T>, n: usize, extrap: Extrap, threshold: T) -> Stencil<T> {
    if n < 2 {
        return Stencil::single(0);
    }
    if bracket.range != Range::Inside && extrap == Extrap::Linear {
        return Stencil::linear(bracket, n);
    }
    if bracket.offset < threshold {
        Stencil::single(bracket.index)
    } else {
        Stencil::single(bracket.index + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extrap::extrapolate;
    use crate::locate::locate;
    use crate::multilinear::blend;

    fn eval(f: fn(&Bracket<f64>, usize, Extrap) -> Stencil<f64>, v: f64, extrap: Extrap) -> f64 {
        let x = [0.0, 1.0, 2.0];
        let y = [10.0, 20.0, 40.0];
        let b = extrapolate(locate(&x, v), extrap, 0, v).unwrap();
        blend(&[f(&b, 3, extrap)], &[1], &y)
    }

    #[test]
    fn test_nearest_1d() {
        assert_eq!(eval(nearest, 0.49, Extrap::Hold), 10.0);
        assert_eq!(eval(nearest, 0.5, Extrap::Hold), 20.0);
        assert_eq!(eval(nearest, 1.7, Extrap::Hold), 40.0);
        assert_eq!(eval(nearest, 2.0, Extrap::Hold), 40.0);
        assert_eq!(eval(nearest, -5.0, Extrap::Hold), 10.0);
        assert_eq!(eval(nearest, 5.0, Extrap::Hold), 40.0);
    }

    #[test]
    fn test_hold_1d() {
        assert_eq!(eval(hold, 0.0, Extrap::Hold), 10.0);
        assert_eq!(eval(hold, 0.99, Extrap::Hold), 10.0);
        assert_eq!(eval(hold, 1.0, Extrap::Hold), 20.0);
        assert_eq!(eval(hold, 1.99, Extrap::Hold), 20.0);
        assert_eq!(eval(hold, 2.0, Extrap::Hold), 40.0);
        assert_eq!(eval(hold, 100.0, Extrap::Hold), 40.0);
    }

    #[test]
    fn test_linear_extrapolation_continues_boundary_interval() {
        // Slope of 20 on the last interval and 10 on the first
        assert_eq!(eval(hold, 3.0, Extrap::Linear), 60.0);
        assert_eq!(eval(nearest, 3.0, Extrap::Linear), 60.0);
        assert_eq!(eval(nearest, -1.0, Extrap::Linear), 0.0);

        // Inside the grid, linear extrapolation has no effect
        assert_eq!(eval(nearest, 0.7, Extrap::Linear), 20.0);
    }

    #[test]
    fn test_degenerate_dimension() {
        let b = locate(&[1.0_f64], 4.0);
        assert_eq!(nearest(&b, 1, Extrap::Linear), Stencil::single(0));
        assert_eq!(hold(&b, 1, Extrap::Hold), Stencil::single(0));
    }
}
