//! Build a ready-to-run scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`, containing:
//! - the simulation controller (parameters, field, satellites, in reset state)
//! - the view settings the viewer draws with
//!
//! The viewer inserts `Scenario` into Bevy as a `Resource`; the headless
//! runner uses it directly

use bevy::prelude::Resource;

use crate::configuration::config::{ScenarioConfig, ViewConfig};
use crate::error::ConfigResult;
use crate::simulation::controller::SimulationController;

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub controller: SimulationController,
    pub view: ViewConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> ConfigResult<Self> {
        cfg.validate()?;

        // Satellites: map `SatelliteConfig` -> runtime `InitialState` using nalgebra vectors
        let initial = cfg.initial_states()?;
        let controller = SimulationController::new(cfg.parameters(), initial);

        Ok(Self {
            controller,
            view: cfg.view,
        })
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            controller: SimulationController::default(),
            view: ViewConfig::default(),
        }
    }
}
