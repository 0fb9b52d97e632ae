//! Interpolation and extrapolation method selectors.
//!
//! Methods are closed enums inside the crate. The integer codes are the
//! stable values used by the `boundary` layer, and the names are the
//! strings used to select methods from scripting front ends.
use core::fmt;
use core::str::FromStr;

use crate::error::TableError;

/// How values between breakpoints are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interp {
    /// Piecewise constant, holding the lower node of each interval.
    Hold,
    /// Piecewise constant, taking the closer node of each interval.
    Nearest,
    /// Multilinear blend of the 2^ndims cell corners.
    #[default]
    Linear,
    /// Akima cubic Hermite spline.
    Akima,
    /// Monotone cubic Hermite spline with Fritsch-Butland slopes.
    FritschButland,
    /// Monotone cubic Hermite spline with Steffen slopes.
    Steffen,
}

/// What happens to coordinates outside the breakpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Extrap {
    /// Clamp to the boundary node.
    #[default]
    Hold,
    /// Continue the boundary slope.
    Linear,
    /// Fail with `TableError::OutOfRange`.
    None,
}

impl Interp {
    pub const ALL: [Interp; 6] = [
        Interp::Hold,
        Interp::Nearest,
        Interp::Linear,
        Interp::Akima,
        Interp::FritschButland,
        Interp::Steffen,
    ];

    pub fn code(self) -> i32 {
        match self {
            Interp::Hold => 1,
            Interp::Nearest => 2,
            Interp::Linear => 3,
            Interp::Akima => 4,
            Interp::FritschButland => 5,
            Interp::Steffen => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Interp::Hold => "hold",
            Interp::Nearest => "nearest",
            Interp::Linear => "linear",
            Interp::Akima => "akima",
            Interp::FritschButland => "fritsch-butland",
            Interp::Steffen => "steffen",
        }
    }

    /// Whether evaluation goes through the recursive cubic Hermite path.
    pub fn is_cubic(self) -> bool {
        matches!(self, Interp::Akima | Interp::FritschButland | Interp::Steffen)
    }
}

impl Extrap {
    pub const ALL: [Extrap; 3] = [Extrap::Hold, Extrap::Linear, Extrap::None];

    pub fn code(self) -> i32 {
        match self {
            Extrap::Hold => 1,
            Extrap::Linear => 2,
            Extrap::None => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Extrap::Hold => "hold",
            Extrap::Linear => "linear",
            Extrap::None => "none",
        }
    }
}

impl TryFrom<i32> for Interp {
    type Error = TableError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Interp::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| TableError::UnsupportedMethod(format!("interpolation code {code}")))
    }
}

impl TryFrom<i32> for Extrap {
    type Error = TableError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Extrap::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| TableError::UnsupportedMethod(format!("extrapolation code {code}")))
    }
}

impl FromStr for Interp {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interp::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| TableError::UnsupportedMethod(format!("interpolation \"{s}\"")))
    }
}

impl FromStr for Extrap {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extrap::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| TableError::UnsupportedMethod(format!("extrapolation \"{s}\"")))
    }
}

impl fmt::Display for Interp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Extrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpolation and extrapolation pair used for one evaluation call.
///
/// Defaults to linear interpolation with hold extrapolation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Methods {
    pub interp: Interp,
    pub extrap: Extrap,
}

impl Methods {
    pub fn new(interp: Interp, extrap: Extrap) -> Self {
        Self { interp, extrap }
    }

    /// Decode a pair of raw method codes.
    ///
    /// # Errors
    /// * `UnsupportedMethod` if either code is unknown
    pub fn from_codes(interp: i32, extrap: i32) -> Result<Self, TableError> {
        Ok(Self {
            interp: Interp::try_from(interp)?,
            extrap: Extrap::try_from(extrap)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_codes_match_bindings() {
        let codes: Vec<i32> = Interp::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(Interp::try_from(5).unwrap(), Interp::FritschButland);
        assert_eq!(Extrap::try_from(2).unwrap(), Extrap::Linear);
        assert_eq!(Extrap::try_from(3).unwrap(), Extrap::None);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [0, 7, -1, i32::MAX] {
            assert!(matches!(
                Interp::try_from(code),
                Err(TableError::UnsupportedMethod(_))
            ));
        }
        for code in [0, 4] {
            assert!(matches!(
                Extrap::try_from(code),
                Err(TableError::UnsupportedMethod(_))
            ));
        }
        assert!(Methods::from_codes(3, 9).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!("steffen".parse::<Interp>().unwrap(), Interp::Steffen);
        assert_eq!("none".parse::<Extrap>().unwrap(), Extrap::None);
        assert!("cubic".parse::<Interp>().is_err());
        assert_eq!(Interp::FritschButland.to_string(), "fritsch-butland");

        let defaults = Methods::default();
        assert_eq!(defaults, Methods::new(Interp::Linear, Extrap::Hold));
    }
}
