//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and loop settings
//! - [`ViewConfig`]       – how the viewer maps meters to pixels
//! - [`SatelliteConfig`]  – initial state for each satellite
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section and every field is optional; anything left out takes the
//! stock demo value. A file that is blank, holds only comments, or is a YAML
//! null document (`~`) is the stock demo.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 6.67430e-11          # gravitational constant
//!   M: 5.972e24             # central body mass (kg)
//!   dt: 10.0                # fixed sub-step (s)
//!   steps_per_frame: 10     # sub-steps per rendered frame
//!   trail_len: 1000         # points kept per trail
//!   min_satellites: 2       # pruning floor
//!
//! view:
//!   scale: 1.0e-5           # pixels per meter
//!   central_radius: 6371.0e3
//!
//! satellites:
//!   - x: [0.0, 1.0e7]
//!     v: [7.8e3, 0.0]
//!   - x: [1.5e7, 0.0]
//!     v: [0.0, 7.0e3]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::simulation::params::Parameters;
use crate::simulation::states::{default_satellites, InitialState, NVec2};

/// Upper bound on `trail_len`; one trail point is 16 bytes
pub const MAX_TRAIL_LEN: usize = 1_000_000;

/// Physical constants and fixed-step loop settings
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub G: f64,                 // gravitational constant
    pub M: f64,                 // central body mass
    pub dt: f64,                // sub-step size in seconds
    pub steps_per_frame: usize, // sub-steps per step() call
    pub trail_len: usize,       // trail cap per satellite
    pub min_satellites: usize,  // pruning stops at this count
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            G: p.G,
            M: p.M,
            dt: p.dt,
            steps_per_frame: p.steps_per_frame,
            trail_len: p.trail_len,
            min_satellites: p.min_satellites,
        }
    }
}

/// Viewer-only settings; the simulation never reads these
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub scale: f64,          // pixels per meter
    pub central_radius: f64, // radius of the drawn central body in meters
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scale: 1.0e-5,
            central_radius: 6371.0e3,
        }
    }
}

/// Configuration for a single satellite's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SatelliteConfig {
    pub x: Vec<f64>, // initial position [x, y] in meters
    pub v: Vec<f64>, // initial velocity [vx, vy] in m/s
}

impl From<&InitialState> for SatelliteConfig {
    fn from(init: &InitialState) -> Self {
        Self {
            x: vec![init.position.x, init.position.y],
            v: vec![init.velocity.x, init.velocity.y],
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub view: ViewConfig,
    pub satellites: Vec<SatelliteConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            view: ViewConfig::default(),
            satellites: default_satellites().iter().map(SatelliteConfig::from).collect(),
        }
    }
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let only_comments = text
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));

        let cfg: ScenarioConfig = if only_comments {
            ScenarioConfig::default()
        } else {
            match serde_yaml::from_str::<serde_yaml::Value>(text)? {
                serde_yaml::Value::Null => ScenarioConfig::default(),
                value => serde_yaml::from_value(value)?,
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Reject scenarios the simulation cannot run meaningfully
    pub fn validate(&self) -> ConfigResult<()> {
        let p = &self.parameters;
        positive("parameters.G", p.G)?;
        positive("parameters.M", p.M)?;
        positive("parameters.dt", p.dt)?;
        if p.steps_per_frame == 0 {
            return Err(invalid("parameters.steps_per_frame must be at least 1"));
        }
        if p.trail_len == 0 || p.trail_len > MAX_TRAIL_LEN {
            return Err(invalid(format!(
                "parameters.trail_len must be in 1..={MAX_TRAIL_LEN}, got {}",
                p.trail_len
            )));
        }

        positive("view.scale", self.view.scale)?;
        positive("view.central_radius", self.view.central_radius)?;

        for (i, s) in self.satellites.iter().enumerate() {
            let (x, v) = vec2_pair(i, s)?;
            if !(x.iter().chain(v.iter()).all(|c| c.is_finite())) {
                return Err(invalid(format!("satellites[{i}] has a non-finite component")));
            }
            // the field is singular at the central body
            if x.norm() == 0.0 {
                return Err(invalid(format!("satellites[{i}] starts at the central body")));
            }
        }
        Ok(())
    }

    /// Runtime parameters described by this scenario
    pub fn parameters(&self) -> Parameters {
        let p = &self.parameters;
        Parameters {
            G: p.G,
            M: p.M,
            dt: p.dt,
            steps_per_frame: p.steps_per_frame,
            trail_len: p.trail_len,
            min_satellites: p.min_satellites,
        }
    }

    /// Initial satellite states; call after `validate`
    pub fn initial_states(&self) -> ConfigResult<Vec<InitialState>> {
        self.satellites
            .iter()
            .enumerate()
            .map(|(i, s)| vec2_pair(i, s).map(|(x, v)| InitialState::new(x, v)))
            .collect()
    }
}

// helpers ===========================================================================

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn positive(name: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

fn vec2_pair(i: usize, s: &SatelliteConfig) -> ConfigResult<(NVec2, NVec2)> {
    match (s.x.as_slice(), s.v.as_slice()) {
        (&[x, y], &[vx, vy]) => Ok((NVec2::new(x, y), NVec2::new(vx, vy))),
        _ => Err(invalid(format!(
            "satellites[{i}]: x and v need exactly 2 components, got {} and {}",
            s.x.len(),
            s.v.len()
        ))),
    }
}
