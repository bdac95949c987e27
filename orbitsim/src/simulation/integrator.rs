//! Fixed-step time integrator for a single body
//!
//! Provides a classical 4th-order Runge–Kutta step for the coupled system
//! `dx/dt = v`, `dv/dt = a(x)` driven by any `AccelerationField`

use super::physics::AccelerationField;
use super::states::NVec2;

/// Advance one body by `dt` using classical RK4
/// Four field evaluations per step; inputs are not modified and the new
/// `(position, velocity)` pair is returned
pub fn rk4_step<F>(field: &F, x: NVec2, v: NVec2, dt: f64) -> (NVec2, NVec2)
where
    F: AccelerationField + ?Sized,
{
    // k1: slopes at the start of the step
    let a1 = field.acceleration(x);
    let k1x = v * dt;
    let k1v = a1 * dt;

    // k2: midpoint using half of k1
    let x2 = x + 0.5 * k1x;
    let v2 = v + 0.5 * k1v;
    let a2 = field.acceleration(x2);
    let k2x = v2 * dt;
    let k2v = a2 * dt;

    // k3: midpoint again using half of k2
    let x3 = x + 0.5 * k2x;
    let v3 = v + 0.5 * k2v;
    let a3 = field.acceleration(x3);
    let k3x = v3 * dt;
    let k3v = a3 * dt;

    // k4: full step using k3
    let x4 = x + k3x;
    let v4 = v + k3v;
    let a4 = field.acceleration(x4);
    let k4x = v4 * dt;
    let k4v = a4 * dt;

    // weighted combination 1:2:2:1
    let x_new = x + (k1x + 2.0 * k2x + 2.0 * k3x + k4x) / 6.0;
    let v_new = v + (k1v + 2.0 * k2v + 2.0 * k3v + k4v) / 6.0;

    (x_new, v_new)
}
