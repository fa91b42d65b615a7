//! Sample statistics over slices and sample matrices.
//!
//! Population moments use `ddof = 0`; sample covariance and standard errors
//! use `ddof = 1`. Empty inputs produce `NaN`.

use super::linalg::Matrix;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (`ddof = 0`).
pub fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (`ddof = 0`).
///
/// # Examples
/// ```
/// use basket_core::math::stats::population_std;
///
/// let std = population_std(&[1.0, 3.0]);
/// assert!((std - 1.0).abs() < 1e-15);
/// ```
pub fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Standard error of the mean, `s / sqrt(n)` with `s` the `ddof = 1` deviation.
///
/// `NaN` for fewer than two values.
pub fn standard_error(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64;
    (var / n as f64).sqrt()
}

/// Column means of a `[n, d]` sample matrix.
pub fn column_means(samples: &Matrix) -> Vec<f64> {
    let n = samples.rows();
    let mut means = vec![0.0; samples.cols()];
    for row in samples.row_iter() {
        for (m, &x) in means.iter_mut().zip(row) {
            *m += x;
        }
    }
    means.iter_mut().for_each(|m| *m /= n as f64);
    means
}

/// Sample covariance (`ddof = 1`) of the columns of a `[n, d]` sample matrix.
///
/// Returns a `d x d` matrix filled with `NaN` if `n < 2`.
pub fn sample_covariance(samples: &Matrix) -> Matrix {
    let (n, d) = samples.shape();
    if n < 2 {
        return Matrix::from_fn(d, d, |_, _| f64::NAN);
    }

    let means = column_means(samples);
    let centred = Matrix::from_fn(n, d, |i, j| samples.get(i, j) - means[j]);
    centred.gram().scaled(1.0 / (n - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_population_std_uses_ddof_zero() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_std(&values), 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_standard_error() {
        let values = [1.0, 2.0, 3.0, 4.0];
        // s^2 = 5/3, se = sqrt(5/3 / 4)
        assert_relative_eq!(standard_error(&values), (5.0_f64 / 12.0).sqrt(), epsilon = 1e-15);
        assert!(standard_error(&[1.0]).is_nan());
    }

    #[test]
    fn test_column_means() {
        let m = Matrix::from_vec(2, 2, vec![1.0, 10.0, 3.0, 30.0]).unwrap();
        assert_eq!(column_means(&m), vec![2.0, 20.0]);
    }

    #[test]
    fn test_sample_covariance() {
        let m = Matrix::from_vec(3, 2, vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0]).unwrap();
        let cov = sample_covariance(&m);
        assert_relative_eq!(cov.get(0, 0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(0, 1), 2.0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(1, 0), 2.0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(1, 1), 4.0, epsilon = 1e-15);
    }

    #[test]
    fn test_sample_covariance_too_few_rows() {
        let m = Matrix::from_vec(1, 2, vec![1.0, 2.0]).unwrap();
        assert!(sample_covariance(&m).get(0, 0).is_nan());
    }
}
