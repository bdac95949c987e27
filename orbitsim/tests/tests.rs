use approx::assert_relative_eq;

use orbitsim::{
    angular_momentum, default_satellites, log_frame_positions, rk4_step, run_headless, specific_energy, AccelerationField,
    CentralGravity, InitialState, NVec2, Parameters, Satellite, Scenario, ScenarioConfig, SimulationController,
    SimulationError, SimulationState, ViewConfig, MAX_TRAIL_LEN,
};
use orbitsim::ConfigError;

/// Earth-like central body with the stock constants
pub fn earth() -> CentralGravity {
    let p = Parameters::default();
    CentralGravity { G: p.G, M: p.M }
}

/// Controller over custom satellites with the stock parameters
pub fn controller_with(initial: Vec<InitialState>) -> SimulationController {
    SimulationController::new(Parameters::default(), initial)
}

/// Stock parameters, but one sub-step per frame so tests can count appends
pub fn single_substep_params() -> Parameters {
    Parameters {
        steps_per_frame: 1,
        ..Parameters::default()
    }
}

pub fn sat(x: f64, y: f64, vx: f64, vy: f64) -> InitialState {
    InitialState::new(NVec2::new(x, y), NVec2::new(vx, vy))
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_points_toward_center() {
    let field = earth();
    let x = NVec2::new(3.0e6, -4.0e6);
    let a = field.acceleration(x);

    assert!(a.dot(&x) < 0.0, "acceleration is not toward the origin");
    assert!(a.perp(&x).abs() < 1e-12 * a.norm() * x.norm(), "acceleration is not radial");
}

#[test]
fn gravity_inverse_square_law() {
    let field = earth();
    let a_r = field.acceleration(NVec2::new(1.0e7, 0.0)).norm();
    let a_2r = field.acceleration(NVec2::new(2.0e7, 0.0)).norm();

    assert_relative_eq!(a_r / a_2r, 4.0, max_relative = 1e-12);
    assert_relative_eq!(a_r, field.mu() / 1.0e14, max_relative = 1e-12);
}

#[test]
fn gravity_at_origin_is_non_finite() {
    let a = earth().acceleration(NVec2::zeros());
    assert!(!a.x.is_finite() && !a.y.is_finite());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_single_step_golden_value() {
    let (x, v) = rk4_step(&earth(), NVec2::new(0.0, 1.0e7), NVec2::new(7.8e3, 0.0), 10.0);

    assert_relative_eq!(x.x, 77999.481838122, max_relative = 1e-9);
    assert_relative_eq!(x.y, 9999800.70710931, max_relative = 1e-9);
    assert_relative_eq!(v.x, 7799.844553175946, max_relative = 1e-9);
    assert_relative_eq!(v.y, -39.85823668462432, max_relative = 1e-9);
}

#[test]
fn rk4_conserves_energy_and_angular_momentum() {
    let field = earth();
    for init in default_satellites() {
        let (mut x, mut v) = (init.position, init.velocity);
        let e0 = specific_energy(&field, x, v);
        let l0 = angular_momentum(x, v);

        for _ in 0..10_000 {
            (x, v) = rk4_step(&field, x, v, 10.0);
        }

        let de = ((specific_energy(&field, x, v) - e0) / e0).abs();
        let dl = ((angular_momentum(x, v) - l0) / l0).abs();
        assert!(de < 1e-6, "energy drift {de} for {init:?}");
        assert!(dl < 1e-6, "angular momentum drift {dl} for {init:?}");
    }
}

#[test]
fn controller_single_satellite_conserves_energy() {
    let mut c = controller_with(vec![sat(0.0, 1.0e7, 7.8e3, 0.0)]);
    let field = *c.field();
    let s0 = c.state().satellites[0].clone();
    let e0 = specific_energy(&field, s0.position, s0.velocity);
    let l0 = angular_momentum(s0.position, s0.velocity);

    c.start();
    for _ in 0..1_000 {
        c.step(); // 10 sub-steps each
    }

    let s = &c.state().satellites[0];
    assert_eq!(c.state().satellites.len(), 1);
    assert_relative_eq!(c.state().t, 100_000.0, max_relative = 1e-12);
    assert_relative_eq!(specific_energy(&field, s.position, s.velocity), e0, max_relative = 1e-6);
    assert_relative_eq!(angular_momentum(s.position, s.velocity), l0, max_relative = 1e-6);
}

// ==================================================================================
// Controller lifecycle tests
// ==================================================================================

#[test]
fn reset_yields_stock_satellites() {
    let mut c = SimulationController::default();
    c.start();
    for _ in 0..20 {
        c.step();
    }
    c.reset();

    let state = c.state();
    assert!(!c.is_running());
    assert_eq!(state.t, 0.0);
    assert_eq!(state.satellites.len(), 3);

    let expected = [
        (NVec2::new(0.0, 1.0e7), NVec2::new(7.8e3, 0.0)),
        (NVec2::new(1.5e7, 0.0), NVec2::new(0.0, 7.0e3)),
        (NVec2::new(0.0, 1.5e7), NVec2::new(6.5e3, 0.0)),
    ];
    for (s, (x, v)) in state.satellites.iter().zip(expected.iter()) {
        assert_eq!(s.position, *x);
        assert_eq!(s.velocity, *v);
        assert!(s.trail.is_empty());
        assert_eq!(s.trail.capacity(), 1000);
    }
}

#[test]
fn step_when_stopped_is_a_no_op() {
    let mut c = SimulationController::default();
    let before = c.snapshot();
    let after = c.step().clone();

    assert!(!after.running);
    assert_eq!(after.t, before.t);
    assert_eq!(after.satellites.len(), before.satellites.len());
    for (a, b) in after.satellites.iter().zip(before.satellites.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
        assert_eq!(a.trail.len(), b.trail.len());
    }
}

#[test]
fn reset_stops_a_running_simulation() {
    let mut c = SimulationController::default();
    c.start();
    c.step();
    c.reset();

    let before = c.snapshot();
    c.step();
    assert_eq!(c.state().satellites[0].position, before.satellites[0].position);
    assert!(c.state().satellites[0].trail.is_empty());
}

#[test]
fn start_is_idempotent_and_does_not_advance() {
    let mut c = SimulationController::default();
    c.start();
    c.start();
    assert!(c.is_running());
    assert_eq!(c.state().t, 0.0);

    c.step();
    assert_relative_eq!(c.state().t, 100.0);
}

#[test]
fn controllers_are_independent() {
    let mut a = SimulationController::default();
    let b = SimulationController::default();
    a.start();
    a.step();

    assert_eq!(b.state().satellites.len(), 3);
    assert_eq!(b.state().satellites[0].position, NVec2::new(0.0, 1.0e7));
    assert_ne!(a.state().satellites[0].position, b.state().satellites[0].position);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_is_bounded_and_fifo() {
    let mut c = SimulationController::new(single_substep_params(), vec![sat(0.0, 1.0e7, 7.8e3, 0.0)]);
    c.start();

    let mut positions = Vec::new();
    for _ in 0..1000 {
        positions.push(c.step().satellites[0].position);
    }
    let trail = &c.state().satellites[0].trail;
    assert_eq!(trail.len(), 1000);
    assert_eq!(trail.oldest(), Some(&positions[0]));

    // 1001st append evicts the oldest point
    positions.push(c.step().satellites[0].position);
    let trail = &c.state().satellites[0].trail;
    assert_eq!(trail.len(), 1000);
    assert_eq!(trail.oldest(), Some(&positions[1]));
    assert_eq!(trail.newest(), Some(&positions[1000]));
    assert!(trail.iter().all(|p| *p != positions[0]));
}

#[test]
fn trails_never_exceed_cap() {
    let mut c = SimulationController::default();
    c.start();
    for _ in 0..150 {
        let state = c.step();
        assert!(state.satellites.iter().all(|s| s.trail.len() <= 1000));
    }
    assert!(c.state().satellites.iter().all(|s| s.trail.len() == 1000));
}

#[test]
fn unbounded_trail_len_steps_without_preallocating() {
    let params = Parameters {
        trail_len: usize::MAX,
        ..single_substep_params()
    };
    let mut c = SimulationController::new(params, vec![sat(0.0, 1.0e7, 7.8e3, 0.0)]);
    c.start();
    for _ in 0..3 {
        c.step();
    }
    let trail = &c.state().satellites[0].trail;
    assert_eq!(trail.len(), 3);
    assert_eq!(trail.capacity(), usize::MAX);
}

#[test]
fn oversized_trail_len_in_yaml_is_rejected() {
    let yaml = format!("parameters:\n  trail_len: {}\n", MAX_TRAIL_LEN + 1);
    let err = ScenarioConfig::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

// ==================================================================================
// Pruning tests
// ==================================================================================

#[test]
fn pruning_never_goes_below_floor() {
    let mut c = SimulationController::default();
    c.start();
    for _ in 0..300 {
        assert!(c.step().satellites.len() >= 2);
    }
    assert_eq!(c.state().satellites.len(), 2);
}

#[test]
fn first_step_prunes_the_satellite_starting_at_x_axis() {
    let mut c = SimulationController::default();
    c.start();
    let state = c.step();

    // after the first sub-step the (1.5e7, 0) satellite is farthest
    assert_eq!(state.satellites.len(), 2);
    assert!(state.satellites[0].position.y > 9.9e6 && state.satellites[0].position.y < 1.0e7);
    assert!(state.satellites[1].position.y > 1.49e7);
    assert!(state.satellites[1].position.x < 1.0e6);
}

#[test]
fn pruning_runs_once_per_sub_step() {
    let four = vec![
        sat(0.0, 1.0e7, 7.8e3, 0.0),
        sat(2.0e7, 0.0, 0.0, 4.5e3),
        sat(0.0, 1.5e7, 6.5e3, 0.0),
        sat(-1.8e7, 0.0, 0.0, -4.7e3),
    ];

    let mut one_per_frame = SimulationController::new(single_substep_params(), four.clone());
    one_per_frame.start();
    assert_eq!(one_per_frame.step().satellites.len(), 3);
    assert_eq!(one_per_frame.step().satellites.len(), 2);
    assert_eq!(one_per_frame.step().satellites.len(), 2);

    let mut stock = controller_with(four);
    stock.start();
    assert_eq!(stock.step().satellites.len(), 2);
}

#[test]
fn pruning_tie_removes_lower_index() {
    let mut state = SimulationState {
        satellites: vec![
            Satellite::from_initial(&sat(1.0e7, 0.0, 0.0, 1.0), 10),
            Satellite::from_initial(&sat(0.0, 5.0e6, 0.0, 2.0), 10),
            Satellite::from_initial(&sat(0.0, -1.0e7, 0.0, 3.0), 10),
        ],
        running: true,
        t: 0.0,
    };

    let (index, removed) = state.prune_farthest().unwrap();
    assert_eq!(index, 0);
    assert_eq!(removed.position, NVec2::new(1.0e7, 0.0));
    assert_eq!(state.satellites.len(), 2);
    assert_eq!(state.satellites[1].position, NVec2::new(0.0, -1.0e7));
}

#[test]
fn pruning_tie_in_controller_is_deterministic() {
    // mirror images stay exactly equidistant under RK4
    let mut c = controller_with(vec![
        sat(1.5e7, 0.0, 0.0, 7.0e3),
        sat(0.0, 1.0e7, 7.8e3, 0.0),
        sat(-1.5e7, 0.0, 0.0, -7.0e3),
    ]);
    c.start();
    let state = c.step();

    assert_eq!(state.satellites.len(), 2);
    assert!(state.satellites[0].position.y > 9.0e6);
    assert!(state.satellites[1].position.x < -1.4e7);
}

#[test]
fn prune_on_empty_state_is_none() {
    let mut state = SimulationState::default();
    assert!(state.prune_farthest().is_none());
}

// ==================================================================================
// Scenario and headless tests
// ==================================================================================

#[test]
fn bundled_scenario_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/default.yaml");
    let cfg = ScenarioConfig::from_path(path).unwrap();
    assert_eq!(cfg, ScenarioConfig::default());

    let scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.controller.parameters(), &Parameters::default());
    assert_eq!(scenario.controller.state().satellites.len(), 3);
}

#[test]
fn single_orbit_scenario_keeps_its_satellite() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/single_orbit.yaml");
    let scenario = Scenario::build_scenario(ScenarioConfig::from_path(path).unwrap()).unwrap();

    let report = run_headless(scenario, 50).unwrap();
    assert_eq!(report.pruned, 0);
    assert_eq!(report.last.satellites.len(), 1);
}

#[test]
fn missing_scenario_file_is_io_error() {
    let err = ScenarioConfig::from_path("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn headless_run_reports_pruning() {
    let report = run_headless(Scenario::default(), 5).unwrap();

    assert_eq!(report.frames, 5);
    assert_eq!(report.pruned, 1);
    assert_eq!(report.last.satellites.len(), 2);
    assert!(report.last.running);
    assert_relative_eq!(report.last.t, 500.0);
    assert!(report.last.satellites.iter().all(|s| s.trail.len() == 50));
}

#[test]
fn headless_run_stops_on_non_finite_state() {
    let scenario = Scenario {
        controller: controller_with(vec![InitialState::new(NVec2::zeros(), NVec2::zeros())]),
        view: ViewConfig::default(),
    };

    let err = run_headless(scenario, 3).unwrap_err();
    assert_eq!(err, SimulationError::NonFinite { index: 0, frame: 0 });
}

#[test]
fn frame_log_covers_every_satellite() {
    let mut c = SimulationController::default();
    assert_eq!(log_frame_positions(0, c.state()), 3);

    c.start();
    let state = c.step();
    assert_eq!(log_frame_positions(1, state), 2);
    assert_eq!(log_frame_positions(2, &SimulationState::default()), 0);
}
