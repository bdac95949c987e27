//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - central body constants (`G`, `M`),
//! - fixed sub-step size and sub-steps per rendered frame,
//! - trail length cap and the satellite floor used by pruning

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub M: f64, // central body mass
    pub dt: f64, // fixed sub-step, seconds
    pub steps_per_frame: usize, // sub-steps per step() call
    pub trail_len: usize, // max points kept per trail
    pub min_satellites: usize, // pruning never goes below this
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 6.67430e-11,
            M: 5.972e24,
            dt: 10.0,
            steps_per_frame: 10,
            trail_len: 1000,
            min_satellites: 2,
        }
    }
}
