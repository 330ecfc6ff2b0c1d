//! Formation sampling: where each particle lives in the assembled and
//! scattered shapes.
//!
//! Every sampler takes the random source explicitly so a seeded
//! [`rand::rngs::StdRng`] reproduces the same layout.  None of them validate
//! their inputs; [`crate::config::SceneConfig::validate`] is the gatekeeper.
//!
//! | Function        | Shape                          | Distribution        |
//! |-----------------|--------------------------------|---------------------|
//! | `cone_point`    | right cone, apex up, centred   | area-uniform slices |
//! | `sphere_point`  | ball centred at the origin     | uniform by volume   |
//! | `spiral_point`  | shrinking helix, centred       | deterministic in `t`|

use crate::constants::SPIRAL_RADIUS_OFFSET;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniform sample in `[min, max)`.
///
/// A degenerate range (`min >= max`) yields `min` instead of panicking the way
/// `gen_range` would.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}

/// Point inside a right cone standing on its base, apex up, vertically centred
/// on the origin.
///
/// The height is sampled uniformly and the local disk with `sqrt(u)`, so
/// density is constant by area within each horizontal slice and the narrow
/// top reads denser than the base.
pub fn cone_point<R: Rng + ?Sized>(rng: &mut R, height: f32, base_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height;
    let local_radius = base_radius * (height - y) / height;
    let theta = rng.gen::<f32>() * TAU;
    let radius = rng.gen::<f32>().sqrt() * local_radius;

    Vec3::new(radius * theta.cos(), y - height / 2.0, radius * theta.sin())
}

/// Point uniformly distributed by volume inside a ball of `radius`.
///
/// `phi = acos(2v − 1)` keeps directions uniform over the sphere surface and
/// `cbrt(w)` gives the `r²` radial density of a solid ball.
pub fn sphere_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let u = rng.gen::<f32>();
    let v = rng.gen::<f32>();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;

    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Point on a helix that shrinks linearly from `base_radius` at the bottom
/// (`t = 0`) to [`SPIRAL_RADIUS_OFFSET`] at the top (`t = 1`).
pub fn spiral_point(t: f32, height: f32, base_radius: f32, turns: f32) -> Vec3 {
    let y = t * height - height / 2.0;
    let r = base_radius * (1.0 - t) + SPIRAL_RADIUS_OFFSET;
    let theta = t * TAU * turns;

    Vec3::new(r * theta.cos(), y, r * theta.sin())
}
