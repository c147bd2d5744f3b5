//! # Rod Core
//!
//! This library provides the common types and traits shared by the crates that estimate the
//! endpoints of a rigid rod from camera observations. A rod is modelled as a straight [`Segment`]
//! between an initial and a terminal point in world coordinates. Over time a camera observes
//! points along the rod, and each [`Observation`] records an image point together with the
//! interpolation parameter `t` that locates it between the two endpoints.
//!
//! Camera models live in their own crates and plug in through the [`Projection`] trait.
//!
//! ## Interpolation
//!
//! Observations are matched against the rod in image space. Both endpoints are projected first,
//! then the observation is compared with the point at `t` along the projected segment:
//!
//! ```text
//!   qi            qs = qi + (qf - qi) * t            qf
//!   o---------------------x-------------------------o
//!                         :
//!                         r  (observed image point)
//! ```
//!
//! This is not the same as projecting the interpolated world point, since perspective projection
//! does not preserve ratios along a line. The approximation is good when the rod is short compared
//! to its distance from the camera.

mod camera;
mod error;
mod observation;
mod segment;

pub use camera::*;
pub use error::*;
pub use nalgebra;
pub use observation::*;
pub use segment::*;
