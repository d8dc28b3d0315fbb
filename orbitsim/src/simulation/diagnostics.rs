//! Aggregate quantities over the body set
//!
//! The center of mass is what the engine publishes every frame (mass-aware
//! engines only). Kinetic energy and momentum are used for run summaries and
//! drift checks.

use super::states::{Body, NVec3};

/// Mass-weighted mean position; the origin for an empty set
pub fn center_of_mass(bodies: &[Body]) -> NVec3 {
    let total_mass: f64 = bodies.iter().map(|b| b.m).sum();
    if bodies.is_empty() || total_mass == 0.0 {
        return NVec3::zeros();
    }

    let weighted = bodies
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.x * b.m);
    weighted / total_mass
}

// Weight used by the dynamics: the body's mass, or 1 when mass is ignored
fn weight(b: &Body, mass_aware: bool) -> f64 {
    if mass_aware {
        b.m
    } else {
        1.0
    }
}

/// Sum of 1/2 m |v|^2, with unit masses unless `mass_aware`
pub fn kinetic_energy(bodies: &[Body], mass_aware: bool) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * weight(b, mass_aware) * b.v.norm_squared())
        .sum()
}

/// Sum of m v, with unit masses unless `mass_aware`
pub fn momentum(bodies: &[Body], mass_aware: bool) -> NVec3 {
    bodies
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.v * weight(b, mass_aware))
}

/// Run summary logged by the binary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub center_of_mass: NVec3,
    pub kinetic_energy: f64,
    pub momentum: NVec3,
}

impl Summary {
    /// Diagnostics weighted the same way the engine weights its dynamics
    pub fn of(bodies: &[Body], mass_aware: bool) -> Self {
        Self {
            center_of_mass: center_of_mass(bodies),
            kinetic_energy: kinetic_energy(bodies, mass_aware),
            momentum: momentum(bodies, mass_aware),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::BodyColor;

    fn body(x: [f64; 3], v: [f64; 3], m: f64) -> Body {
        Body::new(NVec3::from(x), NVec3::from(v), m, BodyColor::RED)
    }

    #[test]
    fn empty_set_is_origin() {
        assert_eq!(center_of_mass(&[]), NVec3::zeros());
    }

    #[test]
    fn heavier_body_pulls_center() {
        let bodies = [body([0.0, 0.0, 0.0], [0.0; 3], 3.0), body([4.0, 0.0, 0.0], [0.0; 3], 1.0)];
        assert!((center_of_mass(&bodies) - NVec3::new(1.0, 0.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn energy_and_momentum() {
        let bodies = [
            body([0.0; 3], [3.0, 4.0, 0.0], 2.0),
            body([1.0; 3], [-1.0, 0.0, 0.0], 1.0),
        ];
        assert!((kinetic_energy(&bodies, true) - 25.5).abs() < 1e-12);
        assert_eq!(momentum(&bodies, true), NVec3::new(5.0, 8.0, 0.0));
    }

    #[test]
    fn unit_mass_diagnostics_ignore_stored_mass() {
        let bodies = [
            body([0.0; 3], [0.0, 1.0, 0.0], 5.0),
            body([1.0; 3], [0.0, -1.0, 0.0], 1.0),
        ];
        let s = Summary::of(&bodies, false);
        assert_eq!(s.momentum, NVec3::zeros());
        assert!((s.kinetic_energy - 1.0).abs() < 1e-15);

        let aware = Summary::of(&bodies, true);
        assert_eq!(aware.momentum, NVec3::new(0.0, 4.0, 0.0));
        assert!((aware.kinetic_energy - 3.0).abs() < 1e-15);
    }
}
