//! Pairwise central force for the n-body engine
//!
//! Attractive inverse-square gravity that can flip to repulsion below a
//! threshold distance. The force on body `a` due to body `b` is
//!
//! ```text
//! d = x_b - x_a,  r = |d|
//! magnitude = G / r^2            (unit mass)
//!           = G * m_a * m_b / r^2 (mass aware)
//! force = ±magnitude * d / r
//! ```
//!
//! Coincident bodies (`r == 0`) are a known singularity. Without
//! `min_separation` they produce non-finite values; with it, `r` is clamped
//! below that distance and the clamp has no effect above it.

use super::params::SimulationConfig;
use super::states::{Body, ForceKind, NVec3, PairForce};

/// Scale applied to force arrows so they are visible next to the bodies
pub const FORCE_DISPLAY_SCALE: f64 = 10.0;

/// Force on one body from another plus the branch that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairEval {
    pub force: NVec3,
    pub kind: ForceKind,
}

/// Force law parameters, captured from a [`SimulationConfig`] once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub g: f64, // gravitational constant
    pub use_repulsion: bool,
    pub repel_threshold: f64,
    pub mass_aware: bool, // include m_a * m_b in the magnitude
    pub min_separation: Option<f64>,
}

impl ForceModel {
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self {
            g: cfg.g,
            use_repulsion: cfg.use_repulsion,
            repel_threshold: cfg.repel_threshold,
            mass_aware: cfg.mass_aware,
            min_separation: cfg.min_separation,
        }
    }

    /// Force acting on `a` due to `b`, with its attractive/repulsive tag
    pub fn evaluate(&self, a: &Body, b: &Body) -> PairEval {
        // Separation vector from a to b; the force on a points along it
        let d = b.x - a.x;
        let mut r2 = d.dot(&d);
        let mut r = r2.sqrt();

        // Optional floor on the distance, inert above eps
        if let Some(eps) = self.min_separation {
            if r < eps {
                r = eps;
                r2 = eps * eps;
            }
        }

        // Inverse-square magnitude
        let mut magnitude = if self.mass_aware {
            self.g * a.m * b.m / r2
        } else {
            self.g / r2
        };

        // Close pairs push apart instead of attracting
        let kind = if self.use_repulsion && r < self.repel_threshold {
            magnitude = -magnitude;
            ForceKind::Repulsive
        } else {
            ForceKind::Attractive
        };

        // Unit direction d / r scaled by the signed magnitude
        PairEval {
            force: d * magnitude / r,
            kind,
        }
    }

    /// Force acting on `a` due to `b`
    pub fn force(&self, a: &Body, b: &Body) -> NVec3 {
        self.evaluate(a, b).force
    }

    /// Display arrow for `eval` anchored at body `a`
    ///
    /// The mass-aware engine draws the arrow at acceleration scale (divided by
    /// `m_a`); the unit-mass engine draws the raw force.
    pub fn display_arrow(&self, a: &Body, eval: &PairEval) -> PairForce {
        let offset = if self.mass_aware {
            eval.force * FORCE_DISPLAY_SCALE / a.m
        } else {
            eval.force * FORCE_DISPLAY_SCALE
        };
        PairForce {
            start: a.x,
            end: a.x + offset,
            kind: eval.kind,
        }
    }

    /// Compute the net force on every body from one snapshot of `bodies`
    /// - `out[i]` is overwritten with the sum over all `j != i`
    /// - when `pairs` is given, one arrow per ordered pair is appended to it
    pub fn accumulate_forces(
        &self,
        bodies: &[Body],
        out: &mut [NVec3],
        mut pairs: Option<&mut Vec<PairForce>>,
    ) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }

        // Every ordered pair (i, j), i != j; each direction is evaluated on its own
        for (i, bi) in bodies.iter().enumerate() {
            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let eval = self.evaluate(bi, bj);
                out[i] += eval.force;

                // Arrow anchored at body i
                if let Some(list) = pairs.as_deref_mut() {
                    list.push(self.display_arrow(bi, &eval));
                }
            }
        }
    }
}
