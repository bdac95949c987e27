//! Core state types for the orbit simulation.
//!
//! Defines the satellite and simulation state structs:
//! - `Satellite` - one point mass with its position/velocity and trail
//! - `SimulationState` - the ordered satellite list plus the running flag
//! - `InitialState` - the position/velocity pair a satellite is created from
//!
//! All vectors are `NVec2` (meters, m/s, m/s^2), origin at the central body.

use nalgebra::Vector2;

use crate::simulation::physics::distance_from_center;
use crate::simulation::trail::Trail;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub position: NVec2, // meters
    pub velocity: NVec2, // meters / second
}

impl InitialState {
    pub fn new(position: NVec2, velocity: NVec2) -> Self {
        Self { position, velocity }
    }
}

/// The three satellites every reset starts from unless a scenario overrides them
pub fn default_satellites() -> Vec<InitialState> {
    vec![
        InitialState::new(NVec2::new(0.0, 1.0e7), NVec2::new(7.8e3, 0.0)),
        InitialState::new(NVec2::new(1.5e7, 0.0), NVec2::new(0.0, 7.0e3)),
        InitialState::new(NVec2::new(0.0, 1.5e7), NVec2::new(6.5e3, 0.0)),
    ]
}

#[derive(Debug, Clone)]
pub struct Satellite {
    pub position: NVec2, // position
    pub velocity: NVec2, // velocity
    pub trail: Trail,    // past positions, oldest first
}

impl Satellite {
    /// Create a satellite at `init` with an empty trail holding at most `trail_len` points
    pub fn from_initial(init: &InitialState, trail_len: usize) -> Self {
        Self {
            position: init.position,
            velocity: init.velocity,
            trail: Trail::with_capacity(trail_len),
        }
    }

    /// Distance from the central body in meters
    pub fn distance(&self) -> f64 {
        distance_from_center(self.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub satellites: Vec<Satellite>, // ordered, pruning removes by index
    pub running: bool,
    pub t: f64, // elapsed simulation time in seconds
}

impl SimulationState {
    /// Remove the satellite farthest from the origin and return its former index
    /// together with the removed satellite.
    ///
    /// The scan keeps the first strictly greater distance, so on an exact tie the
    /// lowest index is removed. Satellites sitting at distance zero (or with a
    /// NaN distance) are never selected; `None` is returned if nothing qualifies.
    pub fn prune_farthest(&mut self) -> Option<(usize, Satellite)> {
        // Scan first, then remove: no mutation while iterating
        let mut max_distance = 0.0;
        let mut index_to_remove = None;
        for (i, sat) in self.satellites.iter().enumerate() {
            let d = sat.distance();
            if d > max_distance {
                max_distance = d;
                index_to_remove = Some(i);
            }
        }

        index_to_remove.map(|i| (i, self.satellites.remove(i)))
    }

    /// Index of the first satellite holding a non-finite position or velocity
    pub fn first_non_finite(&self) -> Option<usize> {
        self.satellites.iter().position(|s| !s.is_finite())
    }
}
