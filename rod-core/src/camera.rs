use crate::{ImageSegment, Segment};
use nalgebra::{Point2, Point3};

/// Allows conversion from a point in world coordinates to the pixel location
/// at which a camera observes it.
pub trait Projection {
    /// Projects a euclidean world point onto the image.
    ///
    /// Since this might not be possible (if the point lies on the plane through the
    /// optical center that is parallel to the image), this operation is fallible.
    fn project(&self, point: Point3<f64>) -> Option<Point2<f64>>;

    /// Projects both endpoints of a segment onto the image.
    ///
    /// Fails if either endpoint cannot be projected.
    fn project_segment(&self, segment: Segment) -> Option<ImageSegment> {
        Some(ImageSegment::new(
            self.project(segment.initial)?,
            self.project(segment.terminal)?,
        ))
    }
}

impl<P> Projection for &P
where
    P: Projection + ?Sized,
{
    fn project(&self, point: Point3<f64>) -> Option<Point2<f64>> {
        (**self).project(point)
    }
}
