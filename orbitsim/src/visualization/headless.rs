//! Console driver: steps a scenario for a fixed number of frames without a window
//!
//! Plays the role of the viewer for batch runs and logging. Each frame is one
//! `step()` call; per-frame satellite positions go to `tracing` at debug level.

use tracing::{debug, error, info};

use crate::error::SimulationError;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::SimulationState;

/// What a headless run produced
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub frames: usize,          // frames stepped
    pub pruned: usize,          // satellites removed by pruning
    pub last: SimulationState,  // state after the final frame
}

/// Debug-log every satellite's position for one rendered frame.
/// Returns how many satellites were logged.
pub fn log_frame_positions(frame: usize, state: &SimulationState) -> usize {
    for (i, sat) in state.satellites.iter().enumerate() {
        debug!(
            frame,
            satellite = i + 1,
            x = sat.position.x,
            y = sat.position.y,
            distance_km = sat.distance() / 1000.0,
            "satellite position"
        );
    }
    state.satellites.len()
}

pub fn run_headless(mut scenario: Scenario, frames: usize) -> Result<HeadlessReport, SimulationError> {
    let controller = &mut scenario.controller;
    controller.reset();
    let initial_count = controller.state().satellites.len();
    controller.start();

    info!(frames, satellites = initial_count, "run_headless: starting");

    for frame in 0..frames {
        let state = controller.step();

        if let Some(index) = state.first_non_finite() {
            error!(index, frame, "non-finite satellite state, stopping");
            return Err(SimulationError::NonFinite { index, frame });
        }

        log_frame_positions(frame, state);
    }

    let last = controller.snapshot();
    let pruned = initial_count - last.satellites.len();
    for (i, sat) in last.satellites.iter().enumerate() {
        info!(
            satellite = i + 1,
            distance_km = sat.distance() / 1000.0,
            trail = sat.trail.len(),
            "final state"
        );
    }
    info!(t = last.t, pruned, "run_headless: done");

    Ok(HeadlessReport { frames, pruned, last })
}
