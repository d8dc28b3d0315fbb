//! Wall-clock timing of the all-pairs step
//!
//! Output goes to stdout so it can be pasted into a spreadsheet.

use std::time::Instant;

use crate::simulation::engine::SimulationEngine;
use crate::simulation::forces::ForceModel;
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{Body, BodyColor, NVec3};

/// Body set of size `n` spread over a deterministic curve, no rng needed
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 3.0,
                (i_f * 0.13).cos() * 3.0,
                (i_f * 0.07).sin() * 3.0,
            );
            Body::new(x, NVec3::zeros(), 1.0 + (i % 3) as f64 * 0.5, BodyColor::spaced(i, n))
        })
        .collect()
}

fn bench_config() -> SimulationConfig {
    SimulationConfig {
        mass_aware: true,
        use_repulsion: false,
        min_separation: Some(1e-3),
        seed: Some(42),
        ..SimulationConfig::default()
    }
}

/// Force accumulation alone, with and without building the pair arrow list
pub fn bench_forces() {
    let ns = [100, 200, 400, 800, 1600];
    let model = ForceModel::from_config(&bench_config());

    for n in ns {
        let bodies = make_bodies(n);
        let mut out = vec![NVec3::zeros(); n];
        let mut pairs = Vec::with_capacity(n * (n - 1));

        // Warm up
        model.accumulate_forces(&bodies, &mut out, None);

        let t0 = Instant::now();
        model.accumulate_forces(&bodies, &mut out, None);
        let dt_plain = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        model.accumulate_forces(&bodies, &mut out, Some(&mut pairs));
        let dt_pairs = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, forces = {dt_plain:8.6} s, forces + arrows = {dt_pairs:8.6} s");
    }
}

/// Full engine step for a range of `n`, as CSV
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (100..=1600).step_by(100) {
        // Small n: average over a few frames to smooth noise
        let frames = if n <= 400 { 10 } else { 2 };

        let mut cfg = bench_config();
        cfg.show_forces = false;
        let mut engine = SimulationEngine::with_bodies(cfg, make_bodies(n));
        engine.step();

        let t0 = Instant::now();
        for _ in 0..frames {
            engine.step();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / frames as f64;

        println!("{n},{ms:.6}");
    }
}
