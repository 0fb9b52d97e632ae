//! Bisection search of one dimension's breakpoints.
use num_traits::Float;

/// Where a coordinate sits relative to a dimension's breakpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Range {
    Below,
    #[default]
    Inside,
    Above,
}

/// Result of locating a coordinate along one dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bracket<T> {
    /// Lower node of the interval. Always `<= n - 2` when there are two or more breakpoints.
    pub index: usize,
    /// Normalized position `(x - x[index]) / (x[index + 1] - x[index])`.
    /// Outside `[0, 1]` only when `range` is not `Inside`.
    pub offset: T,
    pub range: Range,
}

impl<T: Float> Bracket<T> {
    /// Bracket of a dimension with a single breakpoint, which contributes a constant.
    pub fn degenerate() -> Self {
        Self {
            index: 0,
            offset: T::zero(),
            range: Range::Inside,
        }
    }
}

/// Find the interval of `breakpoints` containing `value`.
///
/// Assumes `breakpoints` is non-empty and strictly increasing.
/// Points outside the breakpoints use the first or last interval, with
/// the offset extrapolated along it.
#[inline]
pub fn locate<T: Float>(breakpoints: &[T], value: T) -> Bracket<T> {
    let n = breakpoints.len();
    if n < 2 {
        return Bracket::degenerate();
    }

    // Bisection search for the largest k with breakpoints[k] <= value.
    //
    // This returns -1 if the point is outside-low
    // and n - 1 if it is at or above the last breakpoint.
    let iloc = breakpoints.partition_point(|x| *x <= value) as isize - 1;

    let dimmax = n - 2; // maximum index for lower corner
    let index = (iloc.max(0) as usize).min(dimmax); // clipped to interior

    let x0 = breakpoints[index];
    let x1 = breakpoints[index + 1];
    let offset = (value - x0) / (x1 - x0);

    let range = if value < breakpoints[0] {
        Range::Below
    } else if value > breakpoints[n - 1] {
        Range::Above
    } else {
        Range::Inside
    };

    Bracket {
        index,
        offset,
        range,
    }
}
