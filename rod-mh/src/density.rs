use crate::{Error, Result};
use rod_core::nalgebra::{Cholesky, Point, SMatrix};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// `ln(2π)`
const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// A covariance matrix of the form `σ² I`.
///
/// The variance is guaranteed to be finite and strictly positive, so the
/// matrix is always positive definite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct IsotropicCovariance {
    variance: f64,
}

impl IsotropicCovariance {
    /// Fails if `variance` is not finite or not strictly positive.
    pub fn new(variance: f64) -> Result<Self> {
        if variance.is_finite() && variance > 0.0 {
            Ok(Self { variance })
        } else {
            Err(Error::NonPositiveCovariance(variance))
        }
    }

    /// Creates the covariance from the standard deviation along each axis.
    pub fn from_std_dev(std_dev: f64) -> Result<Self> {
        if std_dev > 0.0 {
            Self::new(std_dev * std_dev)
        } else {
            Err(Error::NonPositiveCovariance(std_dev))
        }
    }

    pub fn variance(self) -> f64 {
        self.variance
    }

    pub fn std_dev(self) -> f64 {
        self.variance.sqrt()
    }

    /// The dense `D x D` matrix.
    pub fn matrix<const D: usize>(self) -> SMatrix<f64, D, D> {
        SMatrix::identity() * self.variance
    }
}

impl TryFrom<f64> for IsotropicCovariance {
    type Error = Error;

    fn try_from(variance: f64) -> Result<Self> {
        Self::new(variance)
    }
}

impl From<IsotropicCovariance> for f64 {
    fn from(covariance: IsotropicCovariance) -> f64 {
        covariance.variance
    }
}

/// Computes the log-density of `x` under the normal distribution `N(mean, σ² I)`.
///
/// This is the closed form of
/// `−½·d·ln(2π) − ½·ln|Σ| − ½·(x−μ)ᵀ Σ⁻¹ (x−μ)` for `Σ = σ² I`.
pub fn log_gaussian_pdf<const D: usize>(
    x: &Point<f64, D>,
    mean: &Point<f64, D>,
    covariance: IsotropicCovariance,
) -> f64 {
    let dimension = D as f64;
    let mahalanobis = (x - mean).norm_squared() / covariance.variance;
    -0.5 * (dimension * LN_2PI + dimension * covariance.variance.ln() + mahalanobis)
}

/// Computes the log-density of `x` under the normal distribution `N(mean, covariance)`
/// for an arbitrary dense covariance matrix.
///
/// Returns `None` if the covariance is not positive definite.
pub fn log_gaussian_pdf_dense<const D: usize>(
    x: &Point<f64, D>,
    mean: &Point<f64, D>,
    covariance: &SMatrix<f64, D, D>,
) -> Option<f64> {
    let cholesky = Cholesky::new(*covariance)?;
    let lower = cholesky.l();
    // |Σ| = |L|², and the determinant of a triangular matrix is its diagonal product.
    let log_determinant = 2.0 * lower.diagonal().iter().map(|d| d.ln()).sum::<f64>();
    let whitened = lower.solve_lower_triangular(&(x - mean))?;
    Some(-0.5 * (D as f64 * LN_2PI + log_determinant + whitened.norm_squared()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use proptest::prelude::*;
    use rod_core::nalgebra::{Matrix2, Point2, Point3};

    #[test]
    fn rejects_non_positive_variance() {
        for variance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(IsotropicCovariance::new(variance).is_err());
        }
        assert!(IsotropicCovariance::from_std_dev(-0.05).is_err());
        assert_float_eq!(
            IsotropicCovariance::from_std_dev(0.05).unwrap().variance(),
            0.0025,
            rmax <= 1e-12
        );
    }

    #[test]
    fn standard_normal_at_mean() {
        let covariance = IsotropicCovariance::new(1.0).unwrap();
        let origin = Point2::origin();
        assert_float_eq!(
            log_gaussian_pdf(&origin, &origin, covariance),
            -(2.0 * core::f64::consts::PI).ln(),
            rmax <= 1e-12
        );
    }

    #[test]
    fn peaks_at_mean() {
        let covariance = IsotropicCovariance::new(0.01).unwrap();
        let mean = Point3::new(0.3, -0.2, 4.0);
        let peak = log_gaussian_pdf(&mean, &mean, covariance);
        proptest!(|(dx in -1.0..1.0f64, dy in -1.0..1.0f64, dz in -1.0..1.0f64)| {
            let other = Point3::new(mean.x + dx, mean.y + dy, mean.z + dz);
            prop_assert!(log_gaussian_pdf(&other, &mean, covariance) <= peak);
        });
    }

    #[test]
    fn matches_dense_evaluation() {
        proptest!(|(
            x in -3.0..3.0f64,
            y in -3.0..3.0f64,
            z in -3.0..3.0f64,
            variance in 0.001..10.0f64
        )| {
            let covariance = IsotropicCovariance::new(variance).unwrap();
            let mean = Point3::new(0.0, 0.0, 4.0);
            let point = Point3::new(x, y, z);
            let isotropic = log_gaussian_pdf(&point, &mean, covariance);
            let dense = log_gaussian_pdf_dense(&point, &mean, &covariance.matrix()).unwrap();
            prop_assert!((isotropic - dense).abs() <= 1e-9 * (1.0 + isotropic.abs()));
        });
    }

    #[test]
    fn dense_rejects_indefinite() {
        let covariance = Matrix2::new(1.0, 2.0, 2.0, 1.0);
        let origin = Point2::origin();
        assert!(log_gaussian_pdf_dense(&origin, &origin, &covariance).is_none());
    }
}
