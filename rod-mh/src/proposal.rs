use crate::density::IsotropicCovariance;
use rand::Rng;
use rand_distr::StandardNormal;
use rod_core::nalgebra::{Point3, Vector3};

/// Draws a point from the normal distribution `N(center, σ² I)`.
///
/// Exactly three standard normal variates are taken from `rng`, for the
/// x, y and z components in that order.
pub fn propose<R>(center: Point3<f64>, covariance: IsotropicCovariance, rng: &mut R) -> Point3<f64>
where
    R: Rng + ?Sized,
{
    let mut standard = || rng.sample::<f64, _>(StandardNormal);
    let offset = Vector3::new(standard(), standard(), standard());
    center + offset * covariance.std_dev()
}
