//! N-dimensional lookup tables on rectilinear grids, with selectable
//! interpolation and extrapolation methods and a directional derivative.
//!
//! A [`Grid`] owns its breakpoints (one strictly increasing sequence per
//! dimension) and a flat array of values in C ordering. It is immutable
//! once built, so any number of threads can evaluate it at once.
//!
//! # Methods
//! | Interpolation     | Code | Nodes read per point         |
//! |-------------------|------|------------------------------|
//! | `hold`            | 1    | 1                            |
//! | `nearest`         | 2    | 1                            |
//! | `linear`          | 3    | 2^ndims                      |
//! | `akima`           | 4    | 6^ndims                      |
//! | `fritsch-butland` | 5    | 4^ndims                      |
//! | `steffen`         | 6    | 4^ndims                      |
//!
//! | Extrapolation | Code | Outside the breakpoints           |
//! |---------------|------|-----------------------------------|
//! | `hold`        | 1    | value of the boundary node        |
//! | `linear`      | 2    | boundary slope continued          |
//! | `none`        | 3    | `TableError::OutOfRange`          |
//!
//! Locating a coordinate is a bisection search, log2(dims[i]) per dimension.
//!
//! # Example
//! ```rust
//! use ndtable::{Evaluator, Extrap, Grid, Interp, Methods};
//!
//! // Define a grid
//! let x = [1.0_f64, 2.0, 3.0, 4.0];
//! let y = [0.0_f64, 1.0, 2.0, 3.0];
//!
//! // Values at grid points, z(x0, y0), z(x0, y1), ...
//! let z = [2.0; 16];
//! let grid = Grid::new(&[4, 4], &z, &[&x[..], &y[..]]).unwrap();
//!
//! // Points to interpolate/extrapolate, one array per dimension
//! let xobs = [0.0_f64, 5.0];
//! let yobs = [-1.0, 3.0];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! // Storage for output
//! let mut out = [0.0; 2];
//!
//! // Do interpolation
//! let methods = Methods::new(Interp::Akima, Extrap::Linear);
//! Evaluator::new(&grid, methods).eval(&obs, &mut out).unwrap();
//! assert_eq!(out, [2.0, 2.0]);
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod boundary;
pub mod error;
pub mod evaluate;
pub mod extrap;
pub mod grid;
pub mod locate;
pub mod method;
pub mod multicubic;
pub mod multilinear;
pub mod nearest;
pub mod utils;

pub use error::{TableError, TableResult};
pub use evaluate::{evaluate, evaluate_derivative, Evaluator};
pub use grid::{calculate_numel, Grid, MAX_NDIMS};
pub use locate::{locate, Bracket, Range};
pub use method::{Extrap, Interp, Methods};

#[cfg(test)]
pub(crate) mod testing;
