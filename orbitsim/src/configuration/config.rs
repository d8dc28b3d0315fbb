//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SimulationFileConfig`] – force law, integration, display and seeding
//!   options
//! - [`BodyConfig`]           – optional explicit initial state per body
//! - [`ScenarioConfig`]       – top-level wrapper loaded from YAML
//!
//! # YAML format
//! Every key is optional; missing keys take the defaults shown.
//!
//! ```yaml
//! simulation:
//!   g: 0.5                  # gravitational constant, clamped to [0, 2]
//!   use_repulsion: true     # flip to repulsion below repel_threshold
//!   repel_threshold: 2.0    # clamped to [0, 5]
//!   trail_length: 100       # clamped to [1, 500]
//!   show_forces: true
//!   time_step: 0.01         # clamped to [0.001, 0.1]
//!   particle_count: 3       # at least 2
//!   pause: false
//!   mass_aware: false
//!   min_separation: null    # e.g. 1.0e-3 to clamp close encounters
//!   seed: null              # e.g. 42 for reproducible reseeds
//!   position_range: [-3.0, 3.0]
//!   velocity_range: [-0.1, 0.1]
//!   mass_range: [0.5, 2.5]
//!
//! bodies:
//!   - x: [ 2.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.1, 0.0 ]
//!     m: 1.0                # used only when mass_aware
//!     color: [1.0, 0.0, 0.0] # optional RGB
//! ```
//!
//! Values outside the documented ranges are clamped (with a warning) before
//! they reach the engine, which does no validation of its own.

use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::params::{SeedRanges, SimulationConfig};

pub const G_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const REPEL_THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const TRAIL_LENGTH_RANGE: RangeInclusive<usize> = 1..=500;
pub const TIME_STEP_RANGE: RangeInclusive<f64> = 0.001..=0.1;
pub const MIN_PARTICLE_COUNT: usize = 2;

/// Simulation options as written in a scenario file
#[derive(Deserialize, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationFileConfig {
    pub g: f64,               // gravitational constant
    pub use_repulsion: bool,  // invert the force at close range
    pub repel_threshold: f64, // distance below which repulsion applies
    pub trail_length: usize,  // trail samples kept per body
    pub show_forces: bool,    // publish per-pair force arrows
    pub time_step: f64,       // fixed integration step
    pub particle_count: usize, // body count for random seeds
    pub pause: bool,          // start paused
    pub mass_aware: bool,     // per-body masses and center of mass
    pub min_separation: Option<f64>, // opt-in clamp of the pair distance
    pub seed: Option<u64>,    // deterministic random seeds
    pub position_range: [f64; 2],
    pub velocity_range: [f64; 2],
    pub mass_range: [f64; 2],
}

impl Default for SimulationFileConfig {
    fn default() -> Self {
        let rt = SimulationConfig::default();
        Self {
            g: rt.g,
            use_repulsion: rt.use_repulsion,
            repel_threshold: rt.repel_threshold,
            trail_length: rt.trail_length,
            show_forces: rt.show_forces,
            time_step: rt.time_step,
            particle_count: rt.particle_count,
            pause: rt.pause,
            mass_aware: rt.mass_aware,
            min_separation: rt.min_separation,
            seed: rt.seed,
            position_range: bounds(&rt.ranges.position),
            velocity_range: bounds(&rt.ranges.velocity),
            mass_range: bounds(&rt.ranges.mass),
        }
    }
}

fn bounds(r: &RangeInclusive<f64>) -> [f64; 2] {
    [*r.start(), *r.end()]
}

impl SimulationFileConfig {
    /// Clamp every option into its documented range and build the runtime
    /// configuration. Fails only for values clamping cannot repair:
    /// non-finite numbers, inverted ranges, non-positive masses or
    /// separations.
    pub fn into_runtime(self) -> Result<SimulationConfig> {
        let g = clamp_logged("g", finite("g", self.g)?, &G_RANGE);
        let repel_threshold = clamp_logged(
            "repel_threshold",
            finite("repel_threshold", self.repel_threshold)?,
            &REPEL_THRESHOLD_RANGE,
        );
        let time_step = clamp_logged("time_step", finite("time_step", self.time_step)?, &TIME_STEP_RANGE);
        let trail_length = clamp_logged("trail_length", self.trail_length, &TRAIL_LENGTH_RANGE);
        let particle_count = self.particle_count.max(MIN_PARTICLE_COUNT);
        if particle_count != self.particle_count {
            log::warn!("particle_count {} raised to {}", self.particle_count, particle_count);
        }

        if let Some(eps) = self.min_separation {
            if !eps.is_finite() || eps <= 0.0 {
                return Err(SimError::InvalidParam("min_separation must be finite and > 0".into()));
            }
        }

        let ranges = SeedRanges {
            position: range("position_range", self.position_range)?,
            velocity: range("velocity_range", self.velocity_range)?,
            mass: range("mass_range", self.mass_range)?,
        };
        if *ranges.mass.start() <= 0.0 {
            return Err(SimError::InvalidParam("mass_range lower bound must be > 0".into()));
        }

        Ok(SimulationConfig {
            g,
            use_repulsion: self.use_repulsion,
            repel_threshold,
            trail_length,
            show_forces: self.show_forces,
            time_step,
            particle_count,
            pause: self.pause,
            mass_aware: self.mass_aware,
            min_separation: self.min_separation,
            seed: self.seed,
            ranges,
        })
    }
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParam(format!("{name} must be finite")))
    }
}

fn clamp_logged<T>(name: &str, value: T, r: &RangeInclusive<T>) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let clamped = if value < *r.start() {
        *r.start()
    } else if value > *r.end() {
        *r.end()
    } else {
        value
    };
    if clamped != value {
        log::warn!("{name} = {value} out of range, clamped to {clamped}");
    }
    clamped
}

fn range(name: &str, [lo, hi]: [f64; 2]) -> Result<RangeInclusive<f64>> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(SimError::InvalidParam(format!(
            "{name} must be finite with min <= max, got [{lo}, {hi}]"
        )));
    }
    Ok(lo..=hi)
}

fn default_mass() -> f64 {
    1.0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, 3 components
    pub v: Vec<f64>, // initial velocity, 3 components
    #[serde(default = "default_mass")]
    pub m: f64, // mass, > 0; ignored (1.0) unless mass_aware
    #[serde(default)]
    pub color: Option<[f32; 3]>, // RGB in [0, 1], evenly spaced hue when absent
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: SimulationFileConfig, // engine options
    pub bodies: Vec<BodyConfig>, // explicit initial bodies, empty for the default seed
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str("{}")?;
        let rt = cfg.simulation.into_runtime()?;
        assert_eq!(rt, SimulationConfig::default());
        assert!(cfg.bodies.is_empty());
        Ok(())
    }

    #[test]
    fn out_of_range_values_are_clamped() -> Result<()> {
        let yaml = "
simulation:
  g: 9.0
  repel_threshold: -1.0
  trail_length: 0
  time_step: 0.0
  particle_count: 1
";
        let rt = ScenarioConfig::from_yaml_str(yaml)?.simulation.into_runtime()?;
        assert_eq!(rt.g, 2.0);
        assert_eq!(rt.repel_threshold, 0.0);
        assert_eq!(rt.trail_length, 1);
        assert_eq!(rt.time_step, 0.001);
        assert_eq!(rt.particle_count, 2);
        Ok(())
    }

    #[test]
    fn bodies_default_to_unit_mass() -> Result<()> {
        let yaml = "
bodies:
  - x: [1.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
";
        let cfg = ScenarioConfig::from_yaml_str(yaml)?;
        assert_eq!(cfg.bodies.len(), 1);
        assert_eq!(cfg.bodies[0].m, 1.0);
        assert_eq!(cfg.bodies[0].color, None);
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ScenarioConfig::from_yaml_str("simulation:\n  gravity: 1.0\n").unwrap_err();
        assert!(matches!(err, SimError::Yaml(_)));
    }

    #[test]
    fn inverted_or_non_positive_mass_range_is_an_error() {
        let inverted = SimulationFileConfig {
            position_range: [3.0, -3.0],
            ..SimulationFileConfig::default()
        };
        assert!(matches!(inverted.into_runtime(), Err(SimError::InvalidParam(_))));

        let massless = SimulationFileConfig {
            mass_range: [0.0, 1.0],
            ..SimulationFileConfig::default()
        };
        assert!(matches!(massless.into_runtime(), Err(SimError::InvalidParam(_))));
    }
}
