//! Helpers for building breakpoints and observation points,
//! in the spirit of the scripting-language functions of the same names.
use itertools::Itertools;
use num_traits::Float;

/// `n` evenly spaced values from `start` to `stop`, including both ends.
///
/// `n == 0` gives an empty vector and `n == 1` gives `[start]`.
///
/// # Panics
/// * If the count is not representable in `T`
pub fn linspace<T: Float>(start: T, stop: T, n: usize) -> Vec<T> {
    if n < 2 {
        return vec![start; n];
    }
    let dx: T = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + T::from(i).unwrap() * dx).collect()
}

/// Every combination of the coordinates, as points in C ordering
/// (x0, y0), (x0, y1), ..., (x1, y0), ..., which matches the value
/// ordering of a `Grid` built on the same breakpoints.
pub fn meshgrid<T: Float>(x: Vec<&Vec<T>>) -> Vec<Vec<T>> {
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.into_iter().copied().collect())
        .collect()
}

/// Convert a list of points into one coordinate array per dimension,
/// the layout taken by batch evaluation.
pub fn transpose<T: Float>(points: &[Vec<T>]) -> Vec<Vec<T>> {
    let ndims = points.first().map_or(0, |p| p.len());
    (0..ndims)
        .map(|i| points.iter().map(|p| p[i]).collect())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace_short() {
        assert!(linspace(0.0_f64, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0_f64, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(2.0_f64, 5.0, 4), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_meshgrid_matches_grid_order() {
        let x = vec![0.0, 1.0];
        let y = vec![5.0, 6.0, 7.0];
        let pts = meshgrid(vec![&x, &y]);
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[1], vec![0.0, 6.0]);
        assert_eq!(pts[3], vec![1.0, 5.0]);

        let cols = transpose(&pts);
        assert_eq!(cols[0], vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(cols[1], vec![5.0, 6.0, 7.0, 5.0, 6.0, 7.0]);
    }
}
