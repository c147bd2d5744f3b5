//! This crate plugs into `rod-core` and provides a pinhole camera described by a single
//! 3x4 projection matrix. It converts world points into the pixel coordinates at which
//! the camera observes them using the [`rod_core::Projection`] trait.
//!
//! The projection matrix is the product of the intrinsic matrix and the camera pose
//! `K [R | t]`. Calibration is out of scope here, so the matrix is taken as given.

use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use rod_core::nalgebra::{Matrix3x4, Point2, Point3, Vector3};
use rod_core::{ImageSegment, Projection, Segment};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A pinhole camera that maps homogeneous world points to homogeneous image points.
///
/// Any non-zero scaling of the matrix describes the same camera, since the
/// image point is only known up to scale until the perspective division.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ProjectionMatrix(pub Matrix3x4<f64>);

impl ProjectionMatrix {
    pub fn new(matrix: Matrix3x4<f64>) -> Self {
        Self(matrix)
    }

    /// Creates the canonical camera `[I | 0]`, which sits at the origin and
    /// looks down the positive Z axis with a unit focal length.
    #[rustfmt::skip]
    pub fn identity() -> Self {
        Self(Matrix3x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
        ))
    }

    /// Creates a projection matrix from 12 values in row-major order.
    ///
    /// Returns `None` if the slice does not contain exactly 12 values.
    ///
    /// ```
    /// use rod_pinhole::ProjectionMatrix;
    /// let camera = ProjectionMatrix::from_row_slice(&[
    ///     0.0, 0.0, 1.0, -5.0,
    ///     0.0, 1.0, 0.0, 0.0,
    ///     -1.0, 0.0, 0.0, 5.0,
    /// ])
    /// .unwrap();
    /// assert_eq!(camera[(0, 3)], -5.0);
    /// assert!(ProjectionMatrix::from_row_slice(&[1.0; 9]).is_none());
    /// ```
    pub fn from_row_slice(values: &[f64]) -> Option<Self> {
        (values.len() == 12).then(|| Self(Matrix3x4::from_row_slice(values)))
    }

    /// Multiplies every entry of the matrix by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }

    /// Retrieves the homogeneous image point `(x, y, w)` of a world point.
    ///
    /// `w` is the depth of the point along the optical axis (up to the scale of the matrix).
    pub fn homogeneous(&self, point: Point3<f64>) -> Vector3<f64> {
        self.0 * point.to_homogeneous()
    }
}

impl Default for ProjectionMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Projection for ProjectionMatrix {
    /// Appends a homogeneous `1.0` to the point, multiplies by the matrix and divides
    /// by the resulting depth.
    ///
    /// Points at zero depth have no image and return `None`.
    ///
    /// ```
    /// use rod_core::Projection;
    /// use rod_core::nalgebra::{Point2, Point3};
    /// use rod_pinhole::ProjectionMatrix;
    /// let camera = ProjectionMatrix::identity();
    /// let image = camera.project(Point3::new(1.0, -2.0, 4.0)).unwrap();
    /// assert_eq!(image, Point2::new(0.25, -0.5));
    /// assert!(camera.project(Point3::new(1.0, 1.0, 0.0)).is_none());
    /// ```
    fn project(&self, point: Point3<f64>) -> Option<Point2<f64>> {
        Point2::from_homogeneous(self.homogeneous(point))
            .filter(|image| image.coords.iter().all(|n| n.is_finite()))
    }
}

/// Projects a world point through `camera`.
///
/// This is a convenience function for [`Projection::project`].
pub fn project(point: Point3<f64>, camera: &ProjectionMatrix) -> Option<Point2<f64>> {
    camera.project(point)
}

/// Projects both endpoints of a rod through `camera`.
///
/// ```
/// use rod_core::nalgebra::{Point2, Point3};
/// use rod_pinhole::{project_segment, ProjectionMatrix};
/// let image = project_segment(
///     Point3::new(0.0, 0.0, 2.0),
///     Point3::new(2.0, 2.0, 2.0),
///     &ProjectionMatrix::identity(),
/// )
/// .unwrap();
/// assert_eq!(image.initial, Point2::new(0.0, 0.0));
/// assert_eq!(image.terminal, Point2::new(1.0, 1.0));
/// assert_eq!(image.interpolate(0.5), Point2::new(0.5, 0.5));
/// ```
pub fn project_segment(
    initial: Point3<f64>,
    terminal: Point3<f64>,
    camera: &ProjectionMatrix,
) -> Option<ImageSegment> {
    camera.project_segment(Segment::new(initial, terminal))
}
