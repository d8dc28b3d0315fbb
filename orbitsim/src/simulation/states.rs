//! Core state types for the N-body simulation.
//!
//! Defines the per-body state and the display-only values the engine
//! publishes every frame:
//! - `Body`      point mass with position, velocity, mass, color and trail
//! - `PairForce` force arrow from one body toward (or away from) another
//! - `BodyColor` display tag attached to bodies and force arrows

use nalgebra::Vector3;
use serde::Serialize;

use super::trail::Trail;

pub type NVec3 = Vector3<f64>;

/// RGB display tag, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BodyColor {
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 0.5, b: 0.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0 };
    pub const YELLOW: Self = Self { r: 1.0, g: 1.0, b: 0.0 };
    pub const PURPLE: Self = Self { r: 0.5, g: 0.0, b: 0.5 };

    /// Fully saturated color at half lightness for `hue` in degrees
    pub fn from_hue(hue: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        Self { r, g, b }
    }

    /// Evenly spaced hue for body `index` out of `count`
    pub fn spaced(index: usize, count: usize) -> Self {
        if count == 0 {
            return Self::from_hue(0.0);
        }
        Self::from_hue(index as f32 / count as f32 * 360.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass, always > 0 (1.0 when the engine ignores mass)
    pub color: BodyColor, // display tag
    pub trail: Trail, // recent positions, oldest first
}

impl Body {
    pub fn new(x: NVec3, v: NVec3, m: f64, color: BodyColor) -> Self {
        Self {
            x,
            v,
            m,
            color,
            trail: Trail::new(),
        }
    }

    /// True when position and velocity are finite
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

/// Which branch of the force law produced a pair force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForceKind {
    Attractive,
    Repulsive,
}

impl ForceKind {
    pub fn color(self) -> BodyColor {
        match self {
            ForceKind::Attractive => BodyColor::YELLOW,
            ForceKind::Repulsive => BodyColor::PURPLE,
        }
    }
}

/// Display arrow for the force one body feels from another
#[derive(Debug, Clone, Serialize)]
pub struct PairForce {
    pub start: NVec3, // position of the body feeling the force
    pub end: NVec3, // start + scaled force
    pub kind: ForceKind,
}

impl PairForce {
    pub fn color(&self) -> BodyColor {
        self.kind.color()
    }
}
