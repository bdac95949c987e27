//! Acceleration sources and orbital diagnostics
//!
//! Defines the `AccelerationField` trait the integrator is driven by, the
//! central-body gravity field, and the conserved quantities used to check
//! integration quality

use crate::simulation::states::NVec2;

/// A position-dependent acceleration field (no velocity or time dependence)
pub trait AccelerationField {
    fn acceleration(&self, x: NVec2) -> NVec2;
}

/// Newtonian gravity of a single point mass fixed at the origin
///
/// Satellites feel only this field; they do not attract each other.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralGravity {
    pub G: f64, // gravitational constant
    pub M: f64, // central mass
}

impl CentralGravity {
    /// Standard gravitational parameter `G * M`
    pub fn mu(&self) -> f64 {
        self.G * self.M
    }
}

impl AccelerationField for CentralGravity {
    /// `a = -G*M / r^3 * x`, i.e. `G*M / r^2` pointing at the origin.
    ///
    /// Undefined at the origin: `x == 0` divides by zero and the result is
    /// non-finite. Callers must not evaluate the field there.
    fn acceleration(&self, x: NVec2) -> NVec2 {
        let r = x.norm();
        let accel = -self.mu() / (r * r * r);
        accel * x
    }
}

/// Euclidean distance from the central body
pub fn distance_from_center(x: NVec2) -> f64 {
    x.norm()
}

/// Specific orbital energy `v^2 / 2 - G*M / r`
pub fn specific_energy(field: &CentralGravity, x: NVec2, v: NVec2) -> f64 {
    0.5 * v.norm_squared() - field.mu() / x.norm()
}

/// Specific angular momentum (z component) `x * vy - y * vx`
pub fn angular_momentum(x: NVec2, v: NVec2) -> f64 {
    x.perp(&v)
}
