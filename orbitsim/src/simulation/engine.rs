//! Frame-stepped simulation engine
//!
//! Owns the body set and the runtime configuration. Each call to
//! [`SimulationEngine::step`] is one frame:
//!
//! 1. net force on every body from a single snapshot of positions
//! 2. semi-implicit Euler advance of every body
//! 3. trail update
//! 4. center of mass (mass-aware engines only)
//!
//! The published state (bodies, pair forces, center of mass) is read through
//! accessors or copied out with [`SimulationEngine::snapshot`]. While paused,
//! `step` leaves everything untouched.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::diagnostics::center_of_mass;
use super::forces::ForceModel;
use super::integrator::integrate_all;
use super::params::SimulationConfig;
use super::scenario::{random_bodies, three_body_seed};
use super::states::{Body, NVec3, PairForce};

/// Run state, sampled from `SimulationConfig::pause` at the top of each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Paused,
}

/// Owned copy of the published state of one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time: f64,
    pub bodies: Vec<Body>,
    pub pair_forces: Vec<PairForce>,
    pub center_of_mass: Option<NVec3>,
}

pub struct SimulationEngine {
    config: SimulationConfig,
    bodies: Vec<Body>,
    pair_forces: Vec<PairForce>,
    center_of_mass: Option<NVec3>,
    forces: Vec<NVec3>, // per-body net force scratch buffer
    rng: StdRng,
    frame: u64, // frames advanced since the last (re)seed
    t: f64, // simulated time since the last (re)seed
    diverged: bool, // non-finite state already reported
}

impl SimulationEngine {
    /// Engine with the default seed for the configured variant: random
    /// `particle_count` bodies when mass aware, the three-body seed otherwise
    pub fn new(config: SimulationConfig) -> Self {
        let mut engine = Self::empty(config);
        if engine.config.mass_aware {
            engine.reseed();
        } else {
            engine.load(three_body_seed());
        }
        engine
    }

    /// Engine starting from an explicit body list
    pub fn with_bodies(config: SimulationConfig, bodies: Vec<Body>) -> Self {
        let mut engine = Self::empty(config);
        engine.load(bodies);
        engine
    }

    fn empty(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            bodies: Vec::new(),
            pair_forces: Vec::new(),
            center_of_mass: None,
            forces: Vec::new(),
            rng,
            frame: 0,
            t: 0.0,
            diverged: false,
        }
    }

    // Replace the body set and restart the clock
    fn load(&mut self, bodies: Vec<Body>) {
        if self.config.particle_count != bodies.len() {
            log::debug!(
                "particle_count {} -> {} to match loaded bodies",
                self.config.particle_count,
                bodies.len()
            );
            self.config.particle_count = bodies.len();
        }
        self.bodies = bodies;
        self.pair_forces.clear();
        self.forces.clear();
        self.frame = 0;
        self.t = 0.0;
        self.diverged = false;
        self.update_center_of_mass();
    }

    fn reseed(&mut self) {
        let n = self.config.particle_count;
        let bodies = random_bodies(n, &self.config.ranges, self.config.mass_aware, &mut self.rng);
        log::info!("reseeded {} bodies (mass_aware = {})", n, self.config.mass_aware);
        self.load(bodies);
    }

    fn update_center_of_mass(&mut self) {
        self.center_of_mass = if self.config.mass_aware {
            Some(center_of_mass(&self.bodies))
        } else {
            None
        };
    }

    /// Discard every body and trail and seed `particle_count` fresh bodies
    pub fn reset(&mut self, particle_count: usize) {
        self.config.particle_count = particle_count;
        self.reseed();
    }

    /// Replace the configuration; a changed `particle_count` reseeds at once,
    /// everything else applies from the next frame
    ///
    /// A new `Some` seed restarts the rng before any reseed, so the next
    /// random body set matches a fresh engine built with that seed.
    pub fn set_config(&mut self, config: SimulationConfig) {
        let reseed = config.particle_count != self.config.particle_count;
        if config.seed != self.config.seed {
            if let Some(seed) = config.seed {
                self.rng = StdRng::seed_from_u64(seed);
            }
        }
        self.config = config;

        if reseed {
            self.reseed();
        } else {
            // mass_aware may have flipped; publish the matching center of mass
            self.update_center_of_mass();
        }
    }

    pub fn set_paused(&mut self, pause: bool) {
        self.config.pause = pause;
    }

    pub fn state(&self) -> EngineState {
        if self.config.pause {
            EngineState::Paused
        } else {
            EngineState::Running
        }
    }

    /// Advance one frame unless paused
    pub fn step(&mut self) -> EngineState {
        let state = self.state();
        if state == EngineState::Paused {
            return state;
        }

        let n = self.bodies.len();
        let model = ForceModel::from_config(&self.config);

        // Forces all read the pre-step positions
        self.forces.resize(n, NVec3::zeros());
        self.pair_forces.clear();
        let pairs = if self.config.show_forces {
            Some(&mut self.pair_forces)
        } else {
            None
        };
        model.accumulate_forces(&self.bodies, &mut self.forces, pairs);

        integrate_all(&mut self.bodies, &self.forces, &self.config);

        let max_len = self.config.trail_length;
        for b in self.bodies.iter_mut() {
            b.trail.push(b.x, max_len);
        }

        self.update_center_of_mass();

        self.frame += 1;
        self.t += self.config.time_step;

        if !self.diverged && self.bodies.iter().any(|b| !b.is_finite()) {
            self.diverged = true;
            log::warn!("non-finite body state at frame {} (t = {:.4})", self.frame, self.t);
        }
        log::trace!("frame {} t = {:.4}", self.frame, self.t);

        state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Force arrows from the last frame; empty when `show_forces` was off
    pub fn pair_forces(&self) -> &[PairForce] {
        &self.pair_forces
    }

    /// `None` unless the engine is mass aware
    pub fn center_of_mass(&self) -> Option<NVec3> {
        self.center_of_mass
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            time: self.t,
            bodies: self.bodies.clone(),
            pair_forces: self.pair_forces.clone(),
            center_of_mass: self.center_of_mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(mass_aware: bool, n: usize) -> SimulationEngine {
        SimulationEngine::new(SimulationConfig {
            mass_aware,
            particle_count: n,
            seed: Some(11),
            ..SimulationConfig::default()
        })
    }

    #[test]
    fn unit_mass_engine_starts_from_three_body_seed() {
        let engine = SimulationEngine::new(SimulationConfig::default());
        assert_eq!(engine.bodies().len(), 3);
        assert_eq!(engine.bodies()[1].x, NVec3::new(-2.0, 0.0, 0.0));
        assert!(engine.center_of_mass().is_none());
    }

    #[test]
    fn mass_aware_engine_publishes_center_of_mass() {
        let mut engine = seeded(true, 8);
        assert_eq!(engine.bodies().len(), 8);
        assert!(engine.center_of_mass().is_some());
        engine.step();
        let expected = center_of_mass(engine.bodies());
        assert_eq!(engine.center_of_mass(), Some(expected));
    }

    #[test]
    fn pair_forces_follow_show_forces() {
        let mut engine = seeded(true, 4);
        engine.step();
        assert_eq!(engine.pair_forces().len(), 12);

        let mut cfg = engine.config().clone();
        cfg.show_forces = false;
        engine.set_config(cfg);
        engine.step();
        assert!(engine.pair_forces().is_empty());
    }

    #[test]
    fn frame_and_time_advance_only_while_running() {
        let mut engine = seeded(false, 3);
        engine.step();
        engine.step();
        assert_eq!(engine.frame(), 2);
        assert!((engine.time() - 0.02).abs() < 1e-15);

        engine.set_paused(true);
        assert_eq!(engine.step(), EngineState::Paused);
        assert_eq!(engine.frame(), 2);
    }

    #[test]
    fn reset_restarts_clock_and_clears_trails() {
        let mut engine = seeded(true, 5);
        for _ in 0..10 {
            engine.step();
        }
        engine.reset(7);
        assert_eq!(engine.frame(), 0);
        assert_eq!(engine.bodies().len(), 7);
        assert_eq!(engine.config().particle_count, 7);
        assert!(engine.bodies().iter().all(|b| b.trail.is_empty()));
        assert!(engine.pair_forces().is_empty());
    }

    #[test]
    fn snapshot_matches_published_state() {
        let mut engine = seeded(true, 3);
        engine.step();
        let snap = engine.snapshot();
        assert_eq!(snap.frame, 1);
        assert_eq!(snap.bodies.len(), 3);
        assert_eq!(snap.pair_forces.len(), 6);
        assert_eq!(snap.center_of_mass, engine.center_of_mass());
    }

    #[test]
    fn toggling_mass_aware_refreshes_center_of_mass_while_paused() {
        let mut engine = seeded(false, 3);
        engine.set_paused(true);
        assert!(engine.center_of_mass().is_none());

        let mut cfg = engine.config().clone();
        cfg.mass_aware = true;
        engine.set_config(cfg);
        assert_eq!(engine.center_of_mass(), Some(center_of_mass(engine.bodies())));

        let mut cfg = engine.config().clone();
        cfg.mass_aware = false;
        engine.set_config(cfg);
        assert!(engine.center_of_mass().is_none());
        assert_eq!(engine.frame(), 0);
    }
}
