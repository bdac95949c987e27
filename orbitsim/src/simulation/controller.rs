//! Frame-driven simulation loop
//!
//! `SimulationController` owns one `SimulationState` and advances it in
//! fixed sub-steps. A presentation layer drives it through four calls:
//! `reset`, `start`, `step` (once per rendered frame) and `is_running`.
//!
//! Each sub-step integrates every satellite with RK4, appends the new position
//! to its trail, and then prunes the farthest satellite if the count is above
//! `Parameters::min_satellites`. Pruning runs after every sub-step, not once
//! per frame, so a scenario starting above the floor reaches it on the first
//! sub-step of the first frame.

use tracing::{info, trace};

use crate::simulation::integrator::rk4_step;
use crate::simulation::params::Parameters;
use crate::simulation::physics::CentralGravity;
use crate::simulation::states::{default_satellites, InitialState, Satellite, SimulationState};

#[derive(Debug, Clone)]
pub struct SimulationController {
    parameters: Parameters,
    field: CentralGravity,
    initial: Vec<InitialState>,
    state: SimulationState,
}

impl SimulationController {
    /// Build a controller and put it in its reset state
    pub fn new(parameters: Parameters, initial: Vec<InitialState>) -> Self {
        let field = CentralGravity {
            G: parameters.G,
            M: parameters.M,
        };
        let mut controller = Self {
            parameters,
            field,
            initial,
            state: SimulationState::default(),
        };
        controller.reset();
        controller
    }

    /// Replace all satellites with the initial configuration and stop
    pub fn reset(&mut self) {
        let trail_len = self.parameters.trail_len;
        self.state = SimulationState {
            satellites: self
                .initial
                .iter()
                .map(|init| Satellite::from_initial(init, trail_len))
                .collect(),
            running: false,
            t: 0.0,
        };
        info!(satellites = self.state.satellites.len(), "simulation reset");
    }

    /// Arm the loop; advancing is left to subsequent `step` calls
    pub fn start(&mut self) {
        if !self.state.running {
            self.state.running = true;
            info!("simulation started");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Advance one frame (`steps_per_frame` sub-steps) and return the result.
    /// Returns the state untouched when the simulation is not running.
    pub fn step(&mut self) -> &SimulationState {
        if self.state.running {
            for _ in 0..self.parameters.steps_per_frame {
                self.sub_step();
            }
        }
        &self.state
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Owned copy of the current state, for collaborators that keep frames around
    pub fn snapshot(&self) -> SimulationState {
        self.state.clone()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn field(&self) -> &CentralGravity {
        &self.field
    }

    fn sub_step(&mut self) {
        let dt = self.parameters.dt;

        for sat in self.state.satellites.iter_mut() {
            let (x, v) = rk4_step(&self.field, sat.position, sat.velocity, dt);
            sat.position = x;
            sat.velocity = v;
            sat.trail.push(x);
        }
        self.state.t += dt;

        if self.state.satellites.len() > self.parameters.min_satellites {
            if let Some((index, removed)) = self.state.prune_farthest() {
                info!(
                    index,
                    distance_km = removed.distance() / 1000.0,
                    remaining = self.state.satellites.len(),
                    "pruned farthest satellite"
                );
            }
        }

        trace!(t = self.state.t, satellites = self.state.satellites.len(), "sub-step done");
    }
}

impl Default for SimulationController {
    /// The stock demo: default constants and the three default satellites
    fn default() -> Self {
        Self::new(Parameters::default(), default_satellites())
    }
}
