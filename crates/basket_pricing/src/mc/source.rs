//! Sources of standard normal variates.

use basket_core::math::Matrix;

use crate::rng::PricerRng;

/// A supplier of independent standard normal draws.
///
/// The simulator and test-set builder only need batches of `N(0, 1)`
/// variates; abstracting the source lets tests inject fixed values.
pub trait GaussianSource {
    /// Fills `buffer` with standard normal variates, in slice order.
    fn fill_standard_normal(&mut self, buffer: &mut [f64]);

    /// Draws a row-major `[rows, cols]` matrix of standard normals.
    fn standard_normals(&mut self, rows: usize, cols: usize) -> Matrix {
        let mut z = Matrix::zeros(rows, cols);
        self.fill_standard_normal(z.as_mut_slice());
        z
    }
}

impl GaussianSource for PricerRng {
    #[inline]
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        self.fill_normal(buffer);
    }
}

impl<S: GaussianSource + ?Sized> GaussianSource for &mut S {
    #[inline]
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        (**self).fill_standard_normal(buffer);
    }
}

/// Source returning the same value for every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f64);

impl GaussianSource for ConstantSource {
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        buffer.fill(self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_normals_shape() {
        let mut rng = PricerRng::from_seed(1);
        let z = rng.standard_normals(7, 3);
        assert_eq!(z.shape(), (7, 3));
    }

    #[test]
    fn test_standard_normals_row_major_order() {
        let mut a = PricerRng::from_seed(9);
        let mut b = PricerRng::from_seed(9);
        let z = a.standard_normals(2, 3);
        let mut flat = vec![0.0; 6];
        b.fill_normal(&mut flat);
        assert_eq!(z.row(1), &flat[3..6]);
    }

    #[test]
    fn test_constant_source() {
        let z = ConstantSource(0.0).standard_normals(3, 2);
        assert!(z.as_slice().iter().all(|&v| v == 0.0));
    }
}
