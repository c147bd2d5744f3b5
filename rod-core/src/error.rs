use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The interpolation parameters and the image points are index-aligned,
    /// so both arrays must have the same length.
    #[error("got {times} interpolation parameters for {points} image points")]
    ShapeMismatch { times: usize, points: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
