use crate::density::{log_gaussian_pdf, IsotropicCovariance};
use rod_core::{Observations, Projection, Segment};

/// Scores candidate rods against the observations of one camera.
///
/// The score is the unnormalized log-posterior: the sum of the log-likelihood of every
/// observation and the log-prior of both endpoints. Only differences between scores
/// are meaningful.
#[derive(Debug, Clone, Copy)]
pub struct Posterior<'a, C> {
    pub camera: C,
    pub observations: &'a Observations,
    /// The covariance of the prior around each endpoint.
    pub prior_covariance: IsotropicCovariance,
    /// The pixel noise of the observations.
    pub observation_covariance: IsotropicCovariance,
}

impl<'a, C> Posterior<'a, C>
where
    C: Projection,
{
    pub fn new(
        camera: C,
        observations: &'a Observations,
        prior_covariance: IsotropicCovariance,
        observation_covariance: IsotropicCovariance,
    ) -> Self {
        Self {
            camera,
            observations,
            prior_covariance,
            observation_covariance,
        }
    }

    /// Sums the log-likelihood of each observation given the candidate.
    ///
    /// Both endpoints are projected once and the observation at `t` is compared with the
    /// point at `t` along the projected segment. If an endpoint cannot be projected the
    /// candidate explains nothing and the log-likelihood is negative infinity.
    pub fn log_likelihood(&self, candidate: Segment) -> f64 {
        let image = match self.camera.project_segment(candidate) {
            Some(image) => image,
            None => return f64::NEG_INFINITY,
        };
        self.observations
            .iter()
            .map(|observation| {
                log_gaussian_pdf(
                    &observation.point,
                    &image.interpolate(observation.t),
                    self.observation_covariance,
                )
            })
            .sum()
    }

    /// The log-prior of both endpoints of the candidate around `prior_mean`.
    pub fn log_prior(&self, candidate: Segment, prior_mean: Segment) -> f64 {
        log_gaussian_pdf(
            &candidate.initial,
            &prior_mean.initial,
            self.prior_covariance,
        ) + log_gaussian_pdf(
            &candidate.terminal,
            &prior_mean.terminal,
            self.prior_covariance,
        )
    }

    /// The unnormalized log-posterior of the candidate.
    ///
    /// The prior mean is explicit. The sampler passes the previous state of the chain,
    /// which turns the prior into the density of the random-walk step.
    pub fn log_posterior(&self, candidate: Segment, prior_mean: Segment) -> f64 {
        self.log_likelihood(candidate) + self.log_prior(candidate, prior_mean)
    }
}

/// Computes the unnormalized log-posterior of `candidate` in a single call.
///
/// See [`Posterior::log_posterior`].
pub fn log_posterior<C>(
    candidate: Segment,
    observations: &Observations,
    prior_mean: Segment,
    prior_covariance: IsotropicCovariance,
    observation_covariance: IsotropicCovariance,
    camera: C,
) -> f64
where
    C: Projection,
{
    Posterior::new(
        camera,
        observations,
        prior_covariance,
        observation_covariance,
    )
    .log_posterior(candidate, prior_mean)
}
