pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod error;

pub use simulation::states::{Satellite, SimulationState, InitialState, NVec2, default_satellites};
pub use simulation::trail::Trail;
pub use simulation::params::Parameters;
pub use simulation::physics::{AccelerationField, CentralGravity, distance_from_center, specific_energy, angular_momentum};
pub use simulation::integrator::rk4_step;
pub use simulation::controller::SimulationController;
pub use simulation::scenario::Scenario;

pub use configuration::config::{MAX_TRAIL_LEN, ParametersConfig, ViewConfig, SatelliteConfig, ScenarioConfig};

pub use visualization::{orbitsim_vis2d::run_2d, headless::{run_headless, log_frame_positions, HeadlessReport}};

pub use error::{ConfigError, ConfigResult, SimulationError};
