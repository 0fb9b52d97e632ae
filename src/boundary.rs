//! Flat calling convention for host bindings.
//!
//! Mirrors the shape of a C-style table API: shapes are `i32`, methods are
//! raw integer codes, batches are given one coordinate array per dimension,
//! and evaluation reports a status code instead of an error value. The
//! table itself is an owned handle, so it can only be closed once.
//!
//! ```rust
//! use ndtable::boundary::{close_table, create_table, evaluate, STATUS_OK};
//!
//! let x = [0.0_f64, 1.0, 2.0];
//! let table = create_table(1, &[3], &[10.0, 20.0, 40.0], &[&x[..]]).unwrap();
//!
//! let params = [0.5_f64, 1.5];
//! let mut values = [0.0; 2];
//! let status = evaluate(&table, 1, &[&params[..]], 3, 1, 2, &mut values);
//!
//! assert_eq!(status, STATUS_OK);
//! assert_eq!(values, [15.0, 30.0]);
//! close_table(table);
//! ```
use tracing::warn;

use crate::error::{TableError, TableResult};
use crate::evaluate::Evaluator;
use crate::grid::Grid;
use crate::method::Methods;

/// Evaluation succeeded.
pub const STATUS_OK: i32 = 0;

/// Evaluation failed; see the log for the cause.
pub const STATUS_ERROR: i32 = -1;

/// An open table.
#[derive(Debug)]
pub struct TableHandle {
    grid: Grid<f64>,
}

impl TableHandle {
    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }
}

/// Build a table, copying every input buffer.
///
/// # Errors
/// * `InvalidDimension` if `ndims` is negative or does not match `dims`,
///   or any entry of `dims` is not positive
/// * Any error from `Grid::new`
pub fn create_table(
    ndims: i32,
    dims: &[i32],
    data: &[f64],
    scales: &[&[f64]],
) -> TableResult<TableHandle> {
    let ndims = checked_len(ndims, "ndims")?;
    if dims.len() != ndims {
        return Err(TableError::dimension(format!(
            "ndims is {ndims} but {} dimension sizes were given",
            dims.len()
        )));
    }
    let dims = dims
        .iter()
        .enumerate()
        .map(|(i, &n)| match usize::try_from(n) {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(TableError::dimension(format!("dimension {i} has size {n}"))),
        })
        .collect::<TableResult<Vec<usize>>>()?;

    Ok(TableHandle {
        grid: Grid::new(&dims, data, scales)?,
    })
}

/// Release a table and all of its storage.
pub fn close_table(table: TableHandle) {
    drop(table);
}

/// Evaluate a batch of `nvalues` samples, given `params[dim][sample]`.
///
/// Returns `STATUS_ERROR` at the first failing sample; `values` at and
/// after that sample are unspecified.
pub fn evaluate(
    table: &TableHandle,
    ndims: i32,
    params: &[&[f64]],
    interp_method: i32,
    extrap_method: i32,
    nvalues: i32,
    values: &mut [f64],
) -> i32 {
    let result = (|| {
        let methods = Methods::from_codes(interp_method, extrap_method)?;
        let ndims = checked_len(ndims, "ndims")?;
        let nvalues = checked_len(nvalues, "nvalues")?;
        if params.len() != ndims {
            return Err(TableError::dimension(format!(
                "ndims is {ndims} but {} parameter arrays were given",
                params.len()
            )));
        }
        let out = values.get_mut(..nvalues).ok_or_else(|| {
            TableError::dimension(format!("output holds fewer than {nvalues} values"))
        })?;
        let params = params
            .iter()
            .map(|p| p.get(..nvalues))
            .collect::<Option<Vec<&[f64]>>>()
            .ok_or_else(|| {
                TableError::dimension(format!("parameter arrays hold fewer than {nvalues} values"))
            })?;

        Evaluator::new(&table.grid, methods).eval(&params, out)
    })();

    status(result)
}

/// Directional derivative at one point along `delta_params`.
pub fn evaluate_derivative(
    table: &TableHandle,
    nparams: i32,
    params: &[f64],
    delta_params: &[f64],
    interp_method: i32,
    extrap_method: i32,
    value: &mut f64,
) -> i32 {
    let result = (|| {
        let methods = Methods::from_codes(interp_method, extrap_method)?;
        let nparams = checked_len(nparams, "nparams")?;
        let (params, delta) = match (params.get(..nparams), delta_params.get(..nparams)) {
            (Some(p), Some(d)) => (p, d),
            _ => {
                return Err(TableError::dimension(format!(
                    "parameter arrays hold fewer than {nparams} values"
                )))
            }
        };
        *value = Evaluator::new(&table.grid, methods).derivative(params, delta)?;
        Ok(())
    })();

    status(result)
}

fn checked_len(n: i32, what: &str) -> TableResult<usize> {
    usize::try_from(n).map_err(|_| TableError::dimension(format!("{what} is negative ({n})")))
}

fn status(result: TableResult<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => {
            warn!(error = %e, "table evaluation failed");
            STATUS_ERROR
        }
    }
}
