//! Random polygon generation.
//!
//! Each polygon is sampled in two steps: [`ShapeParams::sample`] draws the
//! vertex count, center, base radius, colour and per-vertex jitter from an
//! RNG, then [`ShapeParams::build`] lays the vertices out around the center.
//! Splitting the two keeps the geometry a pure function of its parameters.

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;

use std::f64::consts::TAU;

use rand::Rng;
use uuid::Builder;

use crate::camera::Point;
use crate::consts::{MAX_VERTICES, MIN_VERTICES, PALETTE};
use crate::doc::{Polygon, PolygonId};

/// Largest angular deviation of a vertex from its regular position, in radians.
pub const ANGLE_JITTER: f64 = 0.25;

/// Smallest per-vertex radius multiplier.
pub const RADIUS_FACTOR_MIN: f64 = 0.7;

/// Largest per-vertex radius multiplier.
pub const RADIUS_FACTOR_MAX: f64 = 1.3;

/// Per-vertex deviation from a regular polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    /// Added to the vertex's regular angle, in radians.
    pub angle: f64,
    /// Multiplies the base radius for this vertex.
    pub radius_factor: f64,
}

impl Jitter {
    /// No deviation: the vertex sits exactly on the regular polygon.
    pub const NONE: Self = Self { angle: 0.0, radius_factor: 1.0 };
}

/// Everything needed to lay out one polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParams {
    pub center: Point,
    pub radius: f64,
    pub color: &'static str,
    /// One entry per vertex.
    pub jitter: Vec<Jitter>,
}

impl ShapeParams {
    /// Draw shape parameters from `rng`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vertex_count = rng.random_range(MIN_VERTICES..=MAX_VERTICES);
        let center = Point::new(rng.random_range(10.0..90.0), rng.random_range(10.0..90.0));
        let radius = rng.random_range(15.0..45.0);
        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        let jitter = (0..vertex_count)
            .map(|_| Jitter {
                angle: rng.random_range(-ANGLE_JITTER..ANGLE_JITTER),
                radius_factor: rng.random_range(RADIUS_FACTOR_MIN..RADIUS_FACTOR_MAX),
            })
            .collect();
        Self { center, radius, color, jitter }
    }

    /// Number of vertices the built polygon will have.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.jitter.len()
    }

    /// Vertex positions, each coordinate rounded to one decimal place.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> Vec<Point> {
        let step = TAU / self.jitter.len() as f64;
        self.jitter
            .iter()
            .enumerate()
            .map(|(k, j)| {
                let angle = k as f64 * step + j.angle;
                let r = self.radius * j.radius_factor;
                Point::new(
                    round_tenth(self.center.x + angle.cos() * r),
                    round_tenth(self.center.y + angle.sin() * r),
                )
            })
            .collect()
    }

    /// Build an unplaced polygon with the given id.
    #[must_use]
    pub fn build(&self, id: PolygonId) -> Polygon {
        Polygon { id, points: self.points(), color: self.color.to_owned(), x: 0.0, y: 0.0 }
    }
}

/// Generate `count` random, unplaced polygons.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Polygon> {
    (0..count)
        .map(|_| {
            let params = ShapeParams::sample(rng);
            params.build(random_id(rng))
        })
        .collect()
}

/// A fresh polygon id drawn from `rng`.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> PolygonId {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    PolygonId::from_uuid(Builder::from_random_bytes(bytes).into_uuid())
}

/// Halves round toward positive infinity: `-0.25` becomes `-0.2`.
fn round_tenth(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}
