//! Fixed-step semi-implicit Euler integrator
//!
//! Velocity is advanced first, then position with the *updated* velocity:
//!
//! ```text
//! a      = F / m   (mass aware)   or   F   (unit mass)
//! v_n+1  = v_n + a * dt
//! x_n+1  = x_n + v_n+1 * dt
//! ```
//!
//! There is no step-size control or energy correction; close encounters can
//! diverge and that is reproduced as is.

use super::params::SimulationConfig;
use super::states::{Body, NVec3};

/// Advance one body by one step under `force`
/// Returns `(new_velocity, new_position)` and leaves `body` untouched
pub fn semi_implicit_euler(body: &Body, force: &NVec3, cfg: &SimulationConfig) -> (NVec3, NVec3) {
    let dt = cfg.time_step;

    // Acceleration: divide by mass only when masses are in play
    let a = if cfg.mass_aware { force / body.m } else { *force };

    // Kick: v_n+1 = v_n + a dt
    let v = body.v + a * dt;
    // Drift with the new velocity: x_n+1 = x_n + v_n+1 dt
    let x = body.x + v * dt;

    (v, x)
}

/// Advance every body in place with its precomputed net force
/// `forces[i]` must come from the same snapshot for all `i`
pub fn integrate_all(bodies: &mut [Body], forces: &[NVec3], cfg: &SimulationConfig) {
    // Pair each body with its net force
    for (b, f) in bodies.iter_mut().zip(forces.iter()) {
        // Compute both updates from the old state, then write them back
        let (v, x) = semi_implicit_euler(b, f, cfg);
        b.v = v;
        b.x = x;
    }
}
