use nalgebra::*;

use crate::data::Dataset;
use crate::error::{Error, Result};

/// Ordinary least-squares estimation of the linear return model, the
/// classical maximum-likelihood baseline the Bayes-optimal predictions are
/// compared against. Solves the system X^T X b = X^T y via QR decomposition
/// over the design [1, x].
#[derive(Debug)]
pub struct Ols {

    pub beta : DVector<f64>,

    // Inverse matrix of squares and cross-products, (X^T X)^-1; the
    // unnormalized coefficient covariance.
    pub sigma_b : DMatrix<f64>,

    pub err : Option<DVector<f64>>

}

impl Ols {

    /// Solves the least-squares system from the cross-product matrices
    /// (X^T X) and (X^T y). Instantiates self without the residual vector.
    pub fn estimate_from_cp(xx : &DMatrix<f64>, xy : &DVector<f64>) -> Result<Self> {
        let xx_qr = xx.clone().qr();
        let beta = xx_qr.solve(xy).ok_or(Error::SingularDesign)?;
        let sigma_b = xx_qr.try_inverse().ok_or(Error::SingularDesign)?;
        Ok(Self { beta, sigma_b, err : None })
    }

    pub fn estimate(data : &Dataset) -> Result<Self> {
        let n = data.len();
        let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { data.x[i] });
        let xx = x.transpose() * &x;
        let xy = x.transpose() * &data.y;
        let mut ols = Self::estimate_from_cp(&xx, &xy)?;
        ols.err = Some(&x * &ols.beta - &data.y);
        Ok(ols)
    }

    pub fn intercept(&self) -> f64 {
        self.beta[0]
    }

    pub fn slope(&self) -> f64 {
        self.beta[1]
    }

    pub fn predict(&self, signals : &[f64]) -> Vec<f64> {
        signals.iter().map(|x| self.beta[0] + self.beta[1] * x ).collect()
    }

    /// Standard errors of the coefficients, from the residual variance and
    /// the diagonal of (X^T X)^-1. None before residuals are available or
    /// with fewer observations than coefficients.
    pub fn coef_std_errors(&self) -> Option<DVector<f64>> {
        let err = self.err.as_ref()?;
        let dof = err.nrows().checked_sub(self.beta.nrows()).filter(|d| *d > 0 )?;
        let s2 = err.iter().map(|e| e * e ).sum::<f64>() / dof as f64;
        Some(DVector::from_iterator(
            self.beta.nrows(),
            (0..self.beta.nrows()).map(|i| (s2 * self.sigma_b[(i, i)]).sqrt() )
        ))
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn recovers_an_exact_line() {
        let x = DVector::from_vec(vec![-0.04, -0.02, 0.0, 0.02, 0.04]);
        let y = x.map(|x| 0.5 * x + 0.001 );
        let data = Dataset::new(x, y).unwrap();
        let ols = Ols::estimate(&data).unwrap();
        assert!((ols.slope() - 0.5).abs() < 1e-10, "slope {}", ols.slope());
        assert!((ols.intercept() - 0.001).abs() < 1e-10, "intercept {}", ols.intercept());
        let preds = ols.predict(&[0.1]);
        assert!((preds[0] - 0.051).abs() < 1e-10);
        let se = ols.coef_std_errors().unwrap();
        assert!(se[0] >= 0.0 && se[1] >= 0.0);
    }

    #[test]
    fn singular_design_is_rejected() {
        // constant zero signal makes the design rank-deficient
        let x = DVector::from_element(5, 0.0);
        let y = DVector::from_element(5, 0.01);
        let data = Dataset::new(x, y).unwrap();
        assert!(Ols::estimate(&data).is_err());
    }

}
