//! Cubic Hermite interpolation with locally estimated slopes.
//!
//! Along each dimension, the interpolant on an interval is the cubic
//! polynomial matching the values and slopes at both ends. The methods
//! differ only in how the slope at each node is estimated from its
//! neighbours:
//! * Akima: weighted average of adjacent secants, damping the influence of
//!   outliers and reducing wobble near abrupt changes
//! * Fritsch-Butland: harmonic-style mean of adjacent secants, zero at
//!   local extrema, so monotone data gives a monotone interpolant
//! * Steffen: limited parabolic estimate, also monotone and guaranteed not
//!   to overshoot within an interval
//!
//! All three reproduce affine data exactly. None of them require solving
//! for coefficients up front; every evaluation reads only a small window
//! of nodes around the observation point along each dimension.
//!
//! References
//! * H. Akima, "A new method of interpolation and smooth curve fitting based
//!   on local procedures", J. ACM 17(4), 1970.
//! * F. N. Fritsch and J. Butland, "A method for constructing local monotone
//!   piecewise cubic interpolants", SIAM J. Sci. Stat. Comput. 5(2), 1984.
//! * M. Steffen, "A simple method for monotonic interpolation in one
//!   dimension", Astron. Astrophys. 239, 1990.
use num_traits::Float;

use crate::method::Interp;

pub mod rectilinear;

pub use rectilinear::interp_recursive;

/// Evaluate a hermite spline function on an interval from x0 to x1,
/// with imposed slopes k0 and k1 at the endpoints, and normalized
/// coordinate t = (x - x0) / (x1 - x0).
///
/// Slopes are w.r.t. the normalized coordinate, i.e. already scaled
/// by the interval width.
#[inline]
pub(crate) fn normalized_hermite_spline<T: Float>(t: T, y0: T, dy: T, k0: T, k1: T) -> T {
    // `a` and `b` are the difference between this function and a linear one going
    // forward or backward with the imposed slopes.
    let a = k0 - dy;
    let b = -k1 + dy;

    let t2 = t * t;
    let t3 = t.powi(3);

    let c1 = dy + a;
    let c2 = b - (a + a);
    let c3 = a - b;

    y0 + (c1 * t) + (c2 * t2) + (c3 * t3)
}

/// Slope estimate at node `j` of a window of nodes.
///
/// The window must either extend far enough around `j` for the method,
/// or end at the true edge of the grid; missing neighbours are treated
/// as the edge of the data.
pub(crate) fn node_slope<T: Float>(method: Interp, xs: &[T], ys: &[T], j: usize) -> T {
    let m = xs.len();
    if m < 2 {
        return T::zero();
    }
    if m == 2 {
        return secant(xs, ys, 0);
    }
    match method {
        Interp::Akima => akima_slope(xs, ys, j),
        Interp::FritschButland | Interp::Steffen if j == 0 => endpoint_slope(
            secant(xs, ys, 0),
            secant(xs, ys, 1),
            xs[1] - xs[0],
            xs[2] - xs[1],
        ),
        Interp::FritschButland | Interp::Steffen if j == m - 1 => endpoint_slope(
            secant(xs, ys, m - 2),
            secant(xs, ys, m - 3),
            xs[m - 1] - xs[m - 2],
            xs[m - 2] - xs[m - 3],
        ),
        Interp::FritschButland => fritsch_butland_slope(secant(xs, ys, j - 1), secant(xs, ys, j)),
        Interp::Steffen => steffen_slope(
            secant(xs, ys, j - 1),
            secant(xs, ys, j),
            xs[j] - xs[j - 1],
            xs[j + 1] - xs[j],
        ),
        // Remaining methods use a central secant
        _ => (secant(xs, ys, j.saturating_sub(1)) + secant(xs, ys, j.min(m - 2)))
            / (T::one() + T::one()),
    }
}

#[inline]
fn secant<T: Float>(xs: &[T], ys: &[T], i: usize) -> T {
    (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
}

/// Sign that is zero at zero, unlike `Float::signum`.
#[inline]
fn sign<T: Float>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Secant `i`, extended past the ends of the window by continuing
/// the difference between the last two secants.
fn akima_secant<T: Float>(xs: &[T], ys: &[T], i: isize) -> T {
    let nsec = xs.len() as isize - 1;
    let two = T::one() + T::one();
    if i < 0 {
        two * akima_secant(xs, ys, i + 1) - akima_secant(xs, ys, i + 2)
    } else if i >= nsec {
        two * akima_secant(xs, ys, i - 1) - akima_secant(xs, ys, i - 2)
    } else {
        secant(xs, ys, i as usize)
    }
}

fn akima_slope<T: Float>(xs: &[T], ys: &[T], j: usize) -> T {
    let j = j as isize;
    let m1 = akima_secant(xs, ys, j - 2);
    let m2 = akima_secant(xs, ys, j - 1);
    let m3 = akima_secant(xs, ys, j);
    let m4 = akima_secant(xs, ys, j + 1);

    let w1 = (m4 - m3).abs();
    let w2 = (m2 - m1).abs();
    if w1 + w2 == T::zero() {
        (m2 + m3) / (T::one() + T::one())
    } else {
        (w1 * m2 + w2 * m3) / (w1 + w2)
    }
}

/// Zero at local extrema, otherwise `3 s0 s1 / (s_max + 2 s_min)` by magnitude.
fn fritsch_butland_slope<T: Float>(s0: T, s1: T) -> T {
    if s0 * s1 <= T::zero() {
        return T::zero();
    }
    let (big, small) = if s0.abs() >= s1.abs() { (s0, s1) } else { (s1, s0) };
    let three = T::one() + T::one() + T::one();
    three * s0 * s1 / (big + small + small)
}

fn steffen_slope<T: Float>(s0: T, s1: T, h0: T, h1: T) -> T {
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let half = T::one() / (T::one() + T::one());
    (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(half * p.abs())
}

/// Three-point one-sided slope at the edge of the data, limited so the
/// end interval keeps the shape of the data.
///
/// `s1`, `h1` are the secant and width of the edge interval, `s2`, `h2` of its neighbour.
fn endpoint_slope<T: Float>(s1: T, s2: T, h1: T, h2: T) -> T {
    let two = T::one() + T::one();
    let three = two + T::one();
    let d = ((two * h1 + h2) * s1 - h1 * s2) / (h1 + h2);

    if sign(d) != sign(s1) {
        T::zero()
    } else if sign(s1) != sign(s2) && d.abs() > three * s1.abs() {
        three * s1
    } else {
        d
    }
}
