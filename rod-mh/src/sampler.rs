use crate::{propose, Chain, Error, IsotropicCovariance, MhSettings, Posterior, Result};
use log::*;
use rand::Rng;
use rod_core::nalgebra::{Point2, Point3};
use rod_core::{Observations, Projection, Segment};

/// A random-walk Metropolis-Hastings sampler over rod endpoints.
///
/// The chain starts with both endpoints drawn from the prior around `prior_mean`.
/// Every following iteration moves both endpoints by a normal step with
/// `prior_covariance` and scores the candidate with the prior centered on the
/// previous state. Since the step is symmetric, the plain Metropolis ratio is used.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MetropolisHastings {
    /// The number of iterations, including the initial draw
    pub iterations: usize,
    pub prior_mean: Point3<f64>,
    pub prior_covariance: IsotropicCovariance,
    pub observation_covariance: IsotropicCovariance,
}

impl MetropolisHastings {
    pub fn new(
        iterations: usize,
        prior_mean: Point3<f64>,
        prior_covariance: IsotropicCovariance,
        observation_covariance: IsotropicCovariance,
    ) -> Self {
        Self {
            iterations,
            prior_mean,
            prior_covariance,
            observation_covariance,
        }
    }

    /// Validates the covariances in the settings.
    ///
    /// The seed is not used here, since the generator is always passed to [`MetropolisHastings::run`].
    pub fn from_settings(settings: &MhSettings) -> Result<Self> {
        Ok(Self::new(
            settings.iterations,
            settings.prior_mean.into(),
            IsotropicCovariance::new(settings.prior_variance)?,
            IsotropicCovariance::new(settings.observation_variance)?,
        ))
    }

    /// Runs the chain on index-aligned interpolation parameters and image points.
    ///
    /// Fails before drawing anything if the arrays differ in length.
    pub fn sample<C, R>(
        &self,
        camera: C,
        times: &[f64],
        points: &[Point2<f64>],
        rng: &mut R,
    ) -> Result<Chain>
    where
        C: Projection,
        R: Rng + ?Sized,
    {
        let observations = Observations::new(times, points)?;
        self.run(camera, &observations, rng)
    }

    /// Runs the chain for [`MetropolisHastings::iterations`] iterations.
    ///
    /// Per iteration the generator is used in a fixed order: three normal variates for the
    /// initial endpoint, three for the terminal endpoint, then one uniform variate for the
    /// acceptance test. The initial draw takes the six normal variates only.
    pub fn run<C, R>(&self, camera: C, observations: &Observations, rng: &mut R) -> Result<Chain>
    where
        C: Projection,
        R: Rng + ?Sized,
    {
        if self.iterations == 0 {
            return Err(Error::EmptyChain);
        }
        let posterior = Posterior::new(
            camera,
            observations,
            self.prior_covariance,
            self.observation_covariance,
        );
        let mut chain = Chain::with_capacity(self.iterations);

        let prior = Segment::degenerate(self.prior_mean);
        let mut current = self.step(prior, rng);
        let mut previous_log_posterior = posterior.log_posterior(current, prior);
        chain.start(current, previous_log_posterior);
        trace!("initial log-posterior: {}", previous_log_posterior);

        let mut degenerate = 0usize;
        for _ in 1..self.iterations {
            let candidate = self.step(current, rng);
            let log_posterior = posterior.log_posterior(candidate, current);
            let alpha = acceptance_probability(log_posterior, previous_log_posterior);
            let u: f64 = rng.gen();
            if !log_posterior.is_finite() {
                degenerate += 1;
                chain.reject(current, log_posterior);
            } else if u <= alpha {
                chain.accept(candidate, log_posterior);
                current = candidate;
            } else {
                chain.reject(current, log_posterior);
            }
            // The next ratio is taken against this candidate's score, even when it was rejected.
            previous_log_posterior = log_posterior;
        }

        if degenerate != 0 {
            warn!(
                "rejected {} candidates with a non-finite log-posterior",
                degenerate
            );
        }
        debug!(
            "ran {} iterations, accepted {}, acceptance rate {}",
            chain.len(),
            chain.accepted().len(),
            chain.acceptance_rate()
        );
        Ok(chain)
    }

    fn step<R>(&self, from: Segment, rng: &mut R) -> Segment
    where
        R: Rng + ?Sized,
    {
        let initial = propose(from.initial, self.prior_covariance, rng);
        let terminal = propose(from.terminal, self.prior_covariance, rng);
        Segment::new(initial, terminal)
    }
}

/// The Metropolis acceptance probability `min(1, exp(candidate - previous))`.
///
/// A candidate whose score is not finite is never accepted. A finite candidate
/// following a score of negative infinity is always accepted.
pub fn acceptance_probability(candidate: f64, previous: f64) -> f64 {
    if !candidate.is_finite() {
        return 0.0;
    }
    let ratio = (candidate - previous).exp();
    if ratio.is_nan() {
        1.0
    } else {
        ratio.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use rod_pinhole::ProjectionMatrix;

    #[test]
    fn acceptance_probability_bounds() {
        assert_eq!(acceptance_probability(-1.0, -2.0), 1.0);
        assert_eq!(acceptance_probability(-2.0, -2.0), 1.0);
        assert!((acceptance_probability(-3.0, -2.0) - (-1.0f64).exp()).abs() < 1e-15);
        assert_eq!(acceptance_probability(f64::NEG_INFINITY, -2.0), 0.0);
        assert_eq!(acceptance_probability(f64::NAN, -2.0), 0.0);
        assert_eq!(acceptance_probability(-2.0, f64::NEG_INFINITY), 1.0);
        assert_eq!(acceptance_probability(-2.0, f64::NAN), 1.0);
    }

    #[test]
    fn zero_iterations_is_an_error() {
        let sampler = MetropolisHastings::from_settings(&MhSettings {
            iterations: 0,
            ..Default::default()
        })
        .unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(
            sampler.run(
                ProjectionMatrix::identity(),
                &Observations::default(),
                &mut rng
            ),
            Err(Error::EmptyChain)
        );
    }

    #[test]
    fn single_iteration_is_the_initial_draw() {
        let sampler = MetropolisHastings::from_settings(&MhSettings {
            iterations: 1,
            ..Default::default()
        })
        .unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        let chain = sampler
            .run(
                ProjectionMatrix::identity(),
                &Observations::default(),
                &mut rng,
            )
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain.accepted().is_empty());
        assert_eq!(chain.map(), Some(chain.trace()[0]));
    }

    #[test]
    fn settings_with_bad_covariance() {
        let settings = MhSettings {
            observation_variance: 0.0,
            ..Default::default()
        };
        assert_eq!(
            MetropolisHastings::from_settings(&settings),
            Err(Error::NonPositiveCovariance(0.0))
        );
    }
}
