use crate::{Result, SandboxError};
use log::*;
use rod_core::nalgebra::Matrix3x4;
use rod_mh::MhSettings;
use rod_pinhole::ProjectionMatrix;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The settings of a sandbox run.
///
/// Every field falls back to its default when missing from the JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SandboxSettings {
    #[serde(default)]
    pub sampler: MhSettings,
    /// The projection matrix of the camera the sampler runs on, in row-major order
    #[serde(default = "default_camera")]
    pub camera: [f64; 12],
    /// The projection matrix of the second camera, in row-major order
    ///
    /// It is only used to show the estimate from a second perspective.
    #[serde(default = "default_second_camera")]
    pub second_camera: [f64; 12],
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            sampler: MhSettings::default(),
            camera: default_camera(),
            second_camera: default_second_camera(),
        }
    }
}

impl SandboxSettings {
    /// Loads settings from a JSON file, or the defaults if the file cannot be opened.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::File::open(path) {
            Ok(file) => {
                let settings = serde_json::from_reader(std::io::BufReader::new(file))?;
                info!("loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) => {
                info!("used default settings ({}: {})", path.display(), e);
                Ok(Self::default())
            }
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

    pub fn camera(&self) -> ProjectionMatrix {
        ProjectionMatrix::new(Matrix3x4::from_row_slice(&self.camera))
    }

    pub fn second_camera(&self) -> ProjectionMatrix {
        ProjectionMatrix::new(Matrix3x4::from_row_slice(&self.second_camera))
    }
}

#[rustfmt::skip]
fn default_camera() -> [f64; 12] {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
    ]
}

/// Sits at `(5, 0, 5)` looking down the negative X axis.
#[rustfmt::skip]
fn default_second_camera() -> [f64; 12] {
    [
        0.0, 0.0, 1.0, -5.0,
        0.0, 1.0, 0.0, 0.0,
        -1.0, 0.0, 0.0, 5.0,
    ]
}
