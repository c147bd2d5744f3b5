//! Runs the rod endpoint sampler on observation files and renders its results.

mod error;
mod input;
mod render;
mod settings;

pub use error::*;
pub use input::*;
pub use render::*;
pub use settings::*;

use log::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rod_core::nalgebra::Point2;
use rod_core::{ImageSegment, Projection};
use rod_mh::{Chain, MetropolisHastings, Sample};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Samples the rod from the observations of the first camera.
pub fn estimate(
    settings: &SandboxSettings,
    times: &[f64],
    points: &[Point2<f64>],
) -> Result<Chain> {
    let sampler = MetropolisHastings::from_settings(&settings.sampler)?;
    let mut rng = Pcg64::seed_from_u64(settings.sampler.seed);
    info!(
        "sampling {} iterations over {} observations",
        sampler.iterations,
        points.len()
    );
    Ok(sampler.sample(settings.camera(), times, points, &mut rng)?)
}

/// The sample shown as the estimate of a run.
///
/// This is the accepted sample with the highest log-posterior, or the initial draw
/// if nothing was accepted.
pub fn best_sample(chain: &Chain) -> Option<Sample> {
    chain.map_estimate().or_else(|| {
        Some(Sample {
            segment: *chain.trajectory().first()?,
            log_posterior: *chain.trace().first()?,
        })
    })
}

/// What a run found, as written to the JSON summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub name: String,
    pub iterations: usize,
    pub accepted: usize,
    pub acceptance_rate: f64,
    /// The highest log-posterior over every proposed candidate
    pub map: Option<f64>,
    pub estimate: Option<Sample>,
    /// The estimate as seen by the first camera
    pub projection: Option<ImageSegment>,
}

impl Summary {
    pub fn new(name: impl Into<String>, chain: &Chain, camera: impl Projection) -> Self {
        let estimate = best_sample(chain);
        Self {
            name: name.into(),
            iterations: chain.len(),
            accepted: chain.accepted().len(),
            acceptance_rate: chain.acceptance_rate(),
            map: chain.map(),
            estimate,
            projection: estimate.and_then(|sample| camera.project_segment(sample.segment)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| SandboxError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Writes the trace and estimate figures of a run into `directory`.
///
/// The figures are named `MH_<name>_Pi.png`, `MH_<name>_Pf.png`, `MH_<name>_MAP.png` and,
/// when points from the second camera are given, `MH_<name>_cam2_perspective_MAP.png`.
pub fn render_figures(
    directory: impl AsRef<Path>,
    name: &str,
    settings: &SandboxSettings,
    chain: &Chain,
    points: &[Point2<f64>],
    second_points: Option<&[Point2<f64>]>,
) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory).map_err(|source| SandboxError::Io {
        path: directory.to_owned(),
        source,
    })?;
    let figure = |suffix: &str| directory.join(format!("MH_{}_{}.png", name, suffix));
    let mut written = vec![];

    let initial: Vec<_> = chain.accepted_initial().collect();
    let terminal: Vec<_> = chain.accepted_terminal().collect();
    for (suffix, image) in [
        ("Pi", render_traces(&initial)),
        ("Pf", render_traces(&terminal)),
    ] {
        let path = figure(suffix);
        image.save(&path)?;
        written.push(path);
    }

    let estimate = best_sample(chain).map(|sample| sample.segment);
    let project = |camera: rod_pinhole::ProjectionMatrix| {
        estimate.and_then(|segment| camera.project_segment(segment))
    };
    let path = figure("MAP");
    render_map(points, project(settings.camera())).save(&path)?;
    written.push(path);

    if let Some(second_points) = second_points {
        let path = figure("cam2_perspective_MAP");
        render_map(second_points, project(settings.second_camera())).save(&path)?;
        written.push(path);
    }

    for path in &written {
        debug!("wrote {}", path.display());
    }
    Ok(written)
}
