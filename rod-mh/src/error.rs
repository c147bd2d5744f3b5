use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("covariance must be positive definite, got a variance of {0}")]
    NonPositiveCovariance(f64),
    #[error("the chain needs at least one iteration")]
    EmptyChain,
    #[error("invalid observations: {0}")]
    Observations(#[from] rod_core::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
