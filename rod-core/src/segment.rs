use nalgebra::{Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A candidate rod in world coordinates.
///
/// The `initial` point is the end of the rod at `t = 0` and the `terminal`
/// point is the end at `t = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Segment {
    pub initial: Point3<f64>,
    pub terminal: Point3<f64>,
}

impl Segment {
    pub fn new(initial: Point3<f64>, terminal: Point3<f64>) -> Self {
        Self { initial, terminal }
    }

    /// A segment whose endpoints coincide.
    ///
    /// This is what a prior looks like when both endpoints share one mean.
    pub fn degenerate(point: Point3<f64>) -> Self {
        Self::new(point, point)
    }

    /// The euclidean distance between both endpoints.
    pub fn length(&self) -> f64 {
        (self.terminal - self.initial).norm()
    }
}

/// The image of a [`Segment`] as seen by one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ImageSegment {
    pub initial: Point2<f64>,
    pub terminal: Point2<f64>,
}

impl ImageSegment {
    pub fn new(initial: Point2<f64>, terminal: Point2<f64>) -> Self {
        Self { initial, terminal }
    }

    /// Linearly interpolates between the projected endpoints.
    ///
    /// `t = 0` yields `initial` and `t = 1` yields `terminal`. Values outside
    /// of `[0, 1]` extrapolate along the same line.
    pub fn interpolate(&self, t: f64) -> Point2<f64> {
        self.initial + (self.terminal - self.initial) * t
    }
}
