use crate::{Error, Result};
use derive_more::{AsRef, Deref, From, Into};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A single image point observed at interpolation parameter `t` along the rod.
///
/// The image point is in pixel coordinates of the camera that observed it.
#[derive(Debug, Clone, Copy, PartialEq, From)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Observation {
    pub t: f64,
    pub point: Point2<f64>,
}

impl Observation {
    pub fn new(t: f64, point: Point2<f64>) -> Self {
        Self { t, point }
    }
}

/// An ordered set of [`Observation`]s from one camera.
///
/// Order is preserved exactly as given.
#[derive(Debug, Clone, PartialEq, Default, AsRef, Deref, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Observations(pub Vec<Observation>);

impl Observations {
    /// Pairs up index-aligned interpolation parameters and image points.
    ///
    /// ```
    /// use rod_core::{Error, Observations};
    /// use rod_core::nalgebra::Point2;
    ///
    /// let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.5)];
    /// let observations = Observations::new(&[0.0, 1.0], &points).unwrap();
    /// assert_eq!(observations.len(), 2);
    ///
    /// let mismatch = Observations::new(&[0.0], &points);
    /// assert_eq!(mismatch, Err(Error::ShapeMismatch { times: 1, points: 2 }));
    /// ```
    pub fn new(times: &[f64], points: &[Point2<f64>]) -> Result<Self> {
        if times.len() != points.len() {
            return Err(Error::ShapeMismatch {
                times: times.len(),
                points: points.len(),
            });
        }
        Ok(times
            .iter()
            .zip(points)
            .map(|(&t, &point)| Observation::new(t, point))
            .collect())
    }

    /// The interpolation parameters in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|observation| observation.t)
    }

    /// The observed image points in order.
    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.0.iter().map(|observation| observation.point)
    }
}

impl FromIterator<Observation> for Observations {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Observations {
    type Item = &'a Observation;
    type IntoIter = core::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
