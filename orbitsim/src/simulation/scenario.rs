//! Initial conditions for the engine
//!
//! Three ways to populate a body set:
//! - the fixed three-body seed the unit-mass engine starts from
//! - `n` bodies drawn uniformly from the configured [`SeedRanges`]
//! - an explicit list of bodies from a scenario file
//!
//! [`Scenario`] bundles a runtime [`SimulationConfig`] with an optional
//! explicit body list and turns it into a ready [`SimulationEngine`].

use std::ops::RangeInclusive;

use rand::Rng;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::SimulationEngine;
use crate::simulation::params::{SeedRanges, SimulationConfig};
use crate::simulation::states::{Body, BodyColor, NVec3};

/// Three unit-mass bodies on the axes, nudged into a slow rotation
pub fn three_body_seed() -> Vec<Body> {
    vec![
        Body::new(NVec3::new(2.0, 0.0, 0.0), NVec3::new(0.0, 0.1, 0.0), 1.0, BodyColor::RED),
        Body::new(NVec3::new(-2.0, 0.0, 0.0), NVec3::new(0.0, -0.1, 0.0), 1.0, BodyColor::GREEN),
        Body::new(NVec3::new(0.0, 2.0, 0.0), NVec3::new(0.1, 0.0, 0.0), 1.0, BodyColor::BLUE),
    ]
}

/// `n` bodies with uniformly random position and velocity components
/// Masses are drawn from `ranges.mass` when `mass_aware`, otherwise 1
pub fn random_bodies<R: Rng>(
    n: usize,
    ranges: &SeedRanges,
    mass_aware: bool,
    rng: &mut R,
) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let x = sample_vec3(rng, &ranges.position);
        let v = sample_vec3(rng, &ranges.velocity);
        let m = if mass_aware {
            rng.random_range(ranges.mass.clone())
        } else {
            1.0
        };
        bodies.push(Body::new(x, v, m, BodyColor::spaced(i, n)));
    }
    bodies
}

fn sample_vec3<R: Rng>(rng: &mut R, r: &RangeInclusive<f64>) -> NVec3 {
    NVec3::new(
        rng.random_range(r.clone()),
        rng.random_range(r.clone()),
        rng.random_range(r.clone()),
    )
}

/// Map scenario-file bodies to runtime bodies, validating vector length and
/// mass. Masses become 1 unless `mass_aware`; colors come from the file or
/// are spaced evenly by index
pub fn bodies_from_config(cfgs: &[BodyConfig], mass_aware: bool) -> Result<Vec<Body>> {
    let n = cfgs.len();
    cfgs.iter()
        .enumerate()
        .map(|(i, bc)| {
            let x = vec3(i, "x", &bc.x)?;
            let v = vec3(i, "v", &bc.v)?;
            if !bc.m.is_finite() || bc.m <= 0.0 {
                return Err(SimError::InvalidBody {
                    index: i,
                    reason: "mass must be finite and > 0".into(),
                });
            }
            let m = if mass_aware { bc.m } else { 1.0 };
            let color = match bc.color {
                Some([r, g, b]) => BodyColor { r, g, b },
                None => BodyColor::spaced(i, n),
            };
            Ok(Body::new(x, v, m, color))
        })
        .collect()
}

fn vec3(index: usize, field: &str, c: &[f64]) -> Result<NVec3> {
    if c.len() != 3 {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("`{field}` must have 3 components, got {}", c.len()),
        });
    }
    if !c.iter().all(|x| x.is_finite()) {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("`{field}` must be finite"),
        });
    }
    Ok(NVec3::new(c[0], c[1], c[2]))
}

/// Fully-initialized simulation scenario
///
/// Built from a [`ScenarioConfig`]: clamped runtime parameters plus the
/// explicit bodies, if the file listed any.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub bodies: Option<Vec<Body>>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let config = cfg.simulation.into_runtime()?;

        let bodies = if cfg.bodies.is_empty() {
            None
        } else {
            Some(bodies_from_config(&cfg.bodies, config.mass_aware)?)
        };

        Ok(Self { config, bodies })
    }

    /// Engine starting from the explicit bodies when present, otherwise from
    /// the default seed for the configured variant
    pub fn into_engine(self) -> SimulationEngine {
        match self.bodies {
            Some(bodies) => SimulationEngine::with_bodies(self.config, bodies),
            None => SimulationEngine::new(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seed_has_three_unit_bodies() {
        let bodies = three_body_seed();
        assert_eq!(bodies.len(), 3);
        assert!(bodies.iter().all(|b| b.m == 1.0 && b.trail.is_empty()));
        assert_eq!(bodies[0].color, BodyColor::RED);
    }

    #[test]
    fn random_bodies_respect_ranges() {
        let ranges = SeedRanges::default();
        let mut rng = StdRng::seed_from_u64(7);
        let bodies = random_bodies(50, &ranges, true, &mut rng);
        assert_eq!(bodies.len(), 50);
        for b in &bodies {
            assert!(b.x.iter().all(|c| ranges.position.contains(c)));
            assert!(b.v.iter().all(|c| ranges.velocity.contains(c)));
            assert!(ranges.mass.contains(&b.m));
        }
    }

    #[test]
    fn unit_mass_random_bodies() {
        let mut rng = StdRng::seed_from_u64(7);
        let bodies = random_bodies(5, &SeedRanges::default(), false, &mut rng);
        assert!(bodies.iter().all(|b| b.m == 1.0));
    }

    #[test]
    fn rejects_short_vectors_and_bad_mass() {
        let short = BodyConfig { x: vec![0.0, 1.0], v: vec![0.0; 3], m: 1.0, color: None };
        assert!(matches!(
            bodies_from_config(&[short], true),
            Err(SimError::InvalidBody { index: 0, .. })
        ));

        let ok = BodyConfig { x: vec![0.0; 3], v: vec![0.0; 3], m: 1.0, color: None };
        let massless = BodyConfig { x: vec![1.0; 3], v: vec![0.0; 3], m: 0.0, color: None };
        assert!(matches!(
            bodies_from_config(&[ok, massless], false),
            Err(SimError::InvalidBody { index: 1, .. })
        ));
    }

    #[test]
    fn unit_mass_config_drops_file_masses() -> Result<()> {
        let heavy = BodyConfig { x: vec![0.0; 3], v: vec![0.0, 1.0, 0.0], m: 5.0, color: None };
        let light = BodyConfig { x: vec![1.0; 3], v: vec![0.0, -1.0, 0.0], m: 1.0, color: None };

        let unit = bodies_from_config(&[heavy.clone(), light.clone()], false)?;
        assert!(unit.iter().all(|b| b.m == 1.0));

        let aware = bodies_from_config(&[heavy, light], true)?;
        assert_eq!(aware[0].m, 5.0);
        Ok(())
    }

    #[test]
    fn file_colors_override_spaced_hues() -> Result<()> {
        let red = BodyConfig { x: vec![0.0; 3], v: vec![0.0; 3], m: 1.0, color: Some([1.0, 0.0, 0.0]) };
        let plain = BodyConfig { x: vec![1.0; 3], v: vec![0.0; 3], m: 1.0, color: None };
        let bodies = bodies_from_config(&[red, plain], false)?;
        assert_eq!(bodies[0].color, BodyColor::RED);
        assert_eq!(bodies[1].color, BodyColor::spaced(1, 2));
        Ok(())
    }
}
