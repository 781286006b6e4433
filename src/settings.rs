//! Render configuration, optionally read from a TOML file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::math::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub field_of_view: f32,       // Vertical, in radians.
    pub znear: f32,
    pub zfar: f32,
    pub light_position: Vector3,  // World-space point light used for the per-vertex lighting.
    pub threads: Option<usize>,   // Worker count, defaults to the number of cpus.
}

impl Default for RenderSettings {
    fn default() -> Self {
        return Self {
            field_of_view: 0.78,
            znear: 0.01,
            zfar: 1.0,
            light_position: Vector3::new(0.0, 10.0, 10.0),
            threads: None,
        };
    }
}

impl RenderSettings {
    pub fn from_toml(input: &str) -> Result<Self> {
        return Ok(toml::from_str(input)?);
    }

    /// Number of render workers, at least one.
    pub fn worker_count(&self) -> usize {
        return self.threads.unwrap_or_else(num_cpus::get).max(1);
    }
}

/// Reads settings from a TOML file. Missing keys keep their defaults.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RenderSettings> {
    let mut input = String::new();
    File::open(path)?.read_to_string(&mut input)?;
    return RenderSettings::from_toml(&input);
}
