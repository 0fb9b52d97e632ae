//! Per-dimension handling of coordinates outside the breakpoints.
use num_traits::Float;
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::locate::{Bracket, Range};
use crate::method::Extrap;

/// Apply an extrapolation policy to the bracket of dimension `dim`.
///
/// `Hold` clamps the offset onto the boundary node, `Linear` leaves it
/// unclamped so the boundary interval is continued, and `None` rejects
/// the point. Brackets inside the breakpoints pass through unchanged,
/// and the range tag is preserved either way.
///
/// # Errors
/// * `OutOfRange` if the bracket is outside and the policy is `None`
#[inline]
pub fn extrapolate<T: Float>(
    bracket: Bracket<T>,
    policy: Extrap,
    dim: usize,
    value: T,
) -> TableResult<Bracket<T>> {
    match (bracket.range, policy) {
        (Range::Inside, _) | (_, Extrap::Linear) => Ok(bracket),
        (Range::Below, Extrap::Hold) => Ok(Bracket {
            offset: T::zero(),
            ..bracket
        }),
        (Range::Above, Extrap::Hold) => Ok(Bracket {
            offset: T::one(),
            ..bracket
        }),
        (_, Extrap::None) => {
            let value = value.to_f64().unwrap_or(f64::NAN);
            debug!(dim, value, "coordinate outside table with extrapolation disabled");
            Err(TableError::OutOfRange { dim, value })
        }
    }
}
