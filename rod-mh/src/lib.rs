//! Bayesian estimation of the endpoints of a rigid rod with a random-walk
//! [Metropolis-Hastings](https://en.wikipedia.org/wiki/Metropolis%E2%80%93Hastings_algorithm) sampler.
//!
//! A camera observes points along a rod at known interpolation parameters `t`. Each candidate
//! rod is projected through a [`rod_core::Projection`], compared with the observations under an
//! isotropic normal pixel noise, and weighted by a normal prior on both endpoints. The
//! resulting unnormalized log-posterior drives the acceptance test of the chain.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use rod_core::nalgebra::{Point2, Point3};
//! use rod_mh::{IsotropicCovariance, MetropolisHastings};
//! use rod_pinhole::ProjectionMatrix;
//!
//! let sampler = MetropolisHastings::new(
//!     1000,
//!     Point3::new(0.0, 0.0, 1.0),
//!     IsotropicCovariance::new(0.01).unwrap(),
//!     IsotropicCovariance::new(0.0025).unwrap(),
//! );
//! let chain = sampler
//!     .sample(
//!         ProjectionMatrix::identity(),
//!         &[0.0],
//!         &[Point2::origin()],
//!         &mut Pcg64::seed_from_u64(0),
//!     )
//!     .unwrap();
//! assert!(chain.acceptance_rate() > 0.0);
//! assert!(chain.map().is_some());
//! ```
//!
//! The generator is always passed in by the caller, so a fixed seed reproduces a run exactly.

mod chain;
mod density;
mod error;
mod posterior;
mod proposal;
mod sampler;
mod settings;

pub use chain::*;
pub use density::*;
pub use error::*;
pub use posterior::*;
pub use proposal::*;
pub use sampler::*;
pub use settings::*;
