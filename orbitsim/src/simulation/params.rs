//! Runtime parameters for the simulation
//!
//! `SimulationConfig` holds everything the engine reads each frame:
//! - force law constants (`g`, repulsion switch and threshold, optional
//!   minimum separation),
//! - integration step and trail length,
//! - display and control flags (`show_forces`, `pause`),
//! - seeding options (`particle_count`, `mass_aware`, `seed`, `ranges`)
//!
//! The engine assumes these values are already in range; clamping happens in
//! the configuration layer (see `configuration::config`).

use std::ops::RangeInclusive;

/// Uniform sampling ranges used when bodies are reseeded at random
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRanges {
    pub position: RangeInclusive<f64>, // per component
    pub velocity: RangeInclusive<f64>, // per component
    pub mass: RangeInclusive<f64>, // lower bound must be > 0
}

impl Default for SeedRanges {
    fn default() -> Self {
        Self {
            position: -3.0..=3.0,
            velocity: -0.1..=0.1,
            mass: 0.5..=2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub g: f64, // gravitational constant
    pub use_repulsion: bool, // invert the force below `repel_threshold`
    pub repel_threshold: f64, // distance
    pub trail_length: usize, // max trail samples per body
    pub show_forces: bool, // build the pair force list each frame
    pub time_step: f64, // fixed step dt
    pub particle_count: usize, // body count for random reseeds
    pub pause: bool, // freeze the engine
    pub mass_aware: bool, // use per-body mass in force, acceleration and diagnostics
    pub min_separation: Option<f64>, // opt-in clamp of r, inert above this distance
    pub seed: Option<u64>, // deterministic reseeds when set
    pub ranges: SeedRanges,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            g: 0.5,
            use_repulsion: true,
            repel_threshold: 2.0,
            trail_length: 100,
            show_forces: true,
            time_step: 0.01,
            particle_count: 3,
            pause: false,
            mass_aware: false,
            min_separation: None,
            seed: None,
            ranges: SeedRanges::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults for the mass-aware variant
    pub fn mass_aware() -> Self {
        Self {
            mass_aware: true,
            ..Self::default()
        }
    }
}
