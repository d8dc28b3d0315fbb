pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyColor, ForceKind, PairForce, NVec3};
pub use simulation::params::{SimulationConfig, SeedRanges};
pub use simulation::forces::{ForceModel, PairEval};
pub use simulation::integrator::{semi_implicit_euler, integrate_all};
pub use simulation::trail::Trail;
pub use simulation::diagnostics::{center_of_mass, kinetic_energy, momentum, Summary};
pub use simulation::engine::{SimulationEngine, EngineState, FrameSnapshot};
pub use simulation::scenario::{Scenario, three_body_seed, random_bodies};

pub use configuration::config::{ScenarioConfig, SimulationFileConfig, BodyConfig};

pub use error::{SimError, Result};

pub use benchmark::benchmark::{bench_forces, bench_step_curve};
