use float_ord::FloatOrd;
use rod_core::nalgebra::Point3;
use rod_core::Segment;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A state of the chain together with its unnormalized log-posterior.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Sample {
    pub segment: Segment,
    pub log_posterior: f64,
}

/// The result of one Metropolis-Hastings run.
///
/// Three sequences are kept:
///
/// * The trajectory holds the state of the chain after every iteration. A rejected
///   iteration repeats the previous state.
/// * The trace holds the log-posterior of the candidate proposed at every iteration,
///   whether it was accepted or not.
/// * The accepted samples hold only the iterations where the chain moved, in order.
///   The initial draw is not part of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    trajectory: Vec<Segment>,
    trace: Vec<f64>,
    accepted: Vec<Sample>,
}

impl Chain {
    pub(crate) fn with_capacity(iterations: usize) -> Self {
        Self {
            trajectory: Vec::with_capacity(iterations),
            trace: Vec::with_capacity(iterations),
            accepted: Vec::with_capacity(iterations),
        }
    }

    pub(crate) fn start(&mut self, segment: Segment, log_posterior: f64) {
        self.trajectory.push(segment);
        self.trace.push(log_posterior);
    }

    pub(crate) fn accept(&mut self, segment: Segment, log_posterior: f64) {
        self.trajectory.push(segment);
        self.trace.push(log_posterior);
        self.accepted.push(Sample {
            segment,
            log_posterior,
        });
    }

    /// Records a rejected candidate. The chain stays at `current`.
    pub(crate) fn reject(&mut self, current: Segment, log_posterior: f64) {
        self.trajectory.push(current);
        self.trace.push(log_posterior);
    }

    /// The number of iterations, including the initial draw.
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    pub fn trajectory(&self) -> &[Segment] {
        &self.trajectory
    }

    /// The log-posterior of the candidate proposed at each iteration.
    pub fn trace(&self) -> &[f64] {
        &self.trace
    }

    pub fn accepted(&self) -> &[Sample] {
        &self.accepted
    }

    /// The initial endpoints of the accepted samples.
    pub fn accepted_initial(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.accepted.iter().map(|sample| sample.segment.initial)
    }

    /// The terminal endpoints of the accepted samples.
    pub fn accepted_terminal(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.accepted.iter().map(|sample| sample.segment.terminal)
    }

    pub fn accepted_log_posteriors(&self) -> impl Iterator<Item = f64> + '_ {
        self.accepted.iter().map(|sample| sample.log_posterior)
    }

    /// The fraction of iterations whose candidate was accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.accepted.len() as f64 / self.len() as f64
        }
    }

    /// The highest log-posterior in the whole trace, including rejected candidates.
    ///
    /// `NaN` entries are skipped. Returns `None` if no entry remains.
    pub fn map(&self) -> Option<f64> {
        self.trace
            .iter()
            .copied()
            .filter(|p| !p.is_nan())
            .max_by_key(|&p| FloatOrd(p))
    }

    /// The accepted sample with the highest log-posterior.
    ///
    /// Returns `None` if no candidate was ever accepted.
    pub fn map_estimate(&self) -> Option<Sample> {
        self.accepted
            .iter()
            .copied()
            .filter(|sample| !sample.log_posterior.is_nan())
            .max_by_key(|sample| FloatOrd(sample.log_posterior))
    }
}
