//! Particle field animation: the assembled ⇄ scattered blend and each
//! family's secondary motion.
//!
//! ## Blend filter
//!
//! A single scalar `progress ∈ [0, 1]` chases the mode target (0 assembled,
//! 1 scattered) with a first-order exponential filter:
//!
//! ```text
//! progress ← progress + (target − progress) · (1 − e^(−k·Δt))
//! ```
//!
//! Toggling the mode only retargets the filter; an in-flight transition is
//! never restarted.
//!
//! ## Per-family motion
//!
//! | Family   | Position wobble          | Rotation                      | Scale            |
//! |----------|--------------------------|-------------------------------|------------------|
//! | Foliage  | vertical bob             | slow tumble about X and Y     | 30% smaller scattered |
//! | Ornament | none                     | spin, phase by index          | sine twinkle     |
//! | Halo     | diagonal flow            | face the viewer, spin about Z | fixed            |

use crate::config::SceneConfig;
use crate::constants::*;
use crate::error::SceneResult;
use crate::particle::{FamilyKind, ParticleFamily};
use bevy::prelude::*;
use rand::Rng;

// ── Resources ────────────────────────────────────────────────────────────────

/// Which formation the tree is heading toward.  Flipped by clicks.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeMode {
    #[default]
    Assembled,
    Scattered,
}

impl TreeMode {
    pub fn toggle(&mut self) {
        *self = match self {
            TreeMode::Assembled => TreeMode::Scattered,
            TreeMode::Scattered => TreeMode::Assembled,
        };
    }

    /// Blend target: 0 for assembled, 1 for scattered.
    pub fn target(self) -> f32 {
        match self {
            TreeMode::Assembled => 0.0,
            TreeMode::Scattered => 1.0,
        }
    }
}

/// Viewer position expressed in the particle field's local space.
///
/// Written each frame by [`crate::scene::track_viewer_system`]; only the halo
/// family reads it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewer(pub Vec3);

impl Default for Viewer {
    fn default() -> Self {
        Viewer(Vec3::from_array(CAMERA_POSITION))
    }
}

/// All particle families plus the shared blend state.
#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    /// One entry per [`FamilyKind::ALL`], in that order.
    pub families: Vec<ParticleFamily>,
    /// Current blend factor: 0 = assembled, 1 = scattered.
    pub progress: f32,
    /// Rate constant `k` of the blend filter (1/s).
    pub blend_rate: f32,
}

impl ParticleField {
    /// Generate every family from `config`, drawing randomness from `rng` only.
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> SceneResult<Self> {
        let families = FamilyKind::ALL
            .into_iter()
            .map(|kind| ParticleFamily::generate(kind, &config.family(kind), rng))
            .collect::<SceneResult<Vec<_>>>()?;

        Ok(Self {
            families,
            progress: 0.0,
            blend_rate: config.blend_rate,
        })
    }

    pub fn family(&self, kind: FamilyKind) -> Option<&ParticleFamily> {
        self.families.iter().find(|f| f.kind == kind)
    }

    /// Rendered transform of one particle, if it exists.
    pub fn transform(&self, kind: FamilyKind, index: usize) -> Option<&Transform> {
        self.family(kind).and_then(|f| f.transforms.get(index))
    }

    pub fn particle_count(&self) -> usize {
        self.families.iter().map(ParticleFamily::len).sum()
    }

    /// Move `progress` toward the mode target by one filter step.
    ///
    /// Never overshoots the target for any non-negative `dt`.
    pub fn advance_progress(&mut self, mode: TreeMode, dt: f32) {
        self.progress = blend_step(self.progress, mode.target(), self.blend_rate, dt);
    }

    /// Full per-frame update: advance the blend, then rewrite every transform.
    pub fn update(&mut self, mode: TreeMode, dt: f32, elapsed: f32, viewer: Vec3) {
        self.advance_progress(mode, dt);
        self.write_transforms(elapsed, viewer);
    }

    /// Rewrite every family's transform buffer for the current `progress`.
    pub fn write_transforms(&mut self, elapsed: f32, viewer: Vec3) {
        let progress = self.progress;
        for family in &mut self.families {
            match family.kind {
                FamilyKind::Foliage => update_foliage(family, progress, elapsed),
                FamilyKind::Ornament => update_ornaments(family, progress, elapsed),
                FamilyKind::Halo => update_halo(family, progress, elapsed, viewer),
            }
        }
    }
}

// ── Blend filter ─────────────────────────────────────────────────────────────

/// One step of the exponential approach from `current` toward `target`.
pub fn blend_step(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let alpha = 1.0 - (-rate * dt.max(0.0)).exp();
    current + (target - current) * alpha
}

// ── Per-family updates ───────────────────────────────────────────────────────

fn update_foliage(family: &mut ParticleFamily, progress: f32, elapsed: f32) {
    let shrink = 1.0 - progress * FOLIAGE_SCATTER_SHRINK;
    for (i, (p, out)) in family
        .particles
        .iter()
        .zip(family.transforms.iter_mut())
        .enumerate()
    {
        let mut translation = p.assembled.lerp(p.scattered, progress);
        translation.y += (elapsed * p.speed + i as f32).sin() * WOBBLE_AMPLITUDE;

        *out = Transform {
            translation,
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                elapsed * p.speed * 0.2,
                elapsed * p.speed * 0.1,
                0.0,
            ),
            scale: Vec3::splat(p.scale * shrink),
        };
    }
}

fn update_ornaments(family: &mut ParticleFamily, progress: f32, elapsed: f32) {
    for (i, (p, out)) in family
        .particles
        .iter()
        .zip(family.transforms.iter_mut())
        .enumerate()
    {
        let twinkle = 1.0 + (elapsed * ORNAMENT_TWINKLE_FREQ + i as f32).sin() * ORNAMENT_TWINKLE;

        *out = Transform {
            translation: p.assembled.lerp(p.scattered, progress),
            rotation: Quat::from_euler(EulerRot::XYZ, elapsed, elapsed * 0.5, i as f32),
            scale: Vec3::splat(p.scale * twinkle),
        };
    }
}

/// Halo stars turn their +Z face toward `viewer` and then spin in that plane.
fn update_halo(family: &mut ParticleFamily, progress: f32, elapsed: f32, viewer: Vec3) {
    for (i, (p, out)) in family
        .particles
        .iter()
        .zip(family.transforms.iter_mut())
        .enumerate()
    {
        let flow = (elapsed * HALO_FLOW_FREQ + i as f32 * HALO_FLOW_PHASE_STEP).sin()
            * WOBBLE_AMPLITUDE;
        let translation = p.assembled.lerp(p.scattered, progress) + Vec3::splat(flow);

        let facing =
            Transform::from_translation(translation).looking_to(translation - viewer, Vec3::Y);

        *out = Transform {
            translation,
            rotation: facing.rotation * Quat::from_rotation_z(elapsed * p.speed),
            scale: Vec3::splat(p.scale),
        };
    }
}

// ── System ───────────────────────────────────────────────────────────────────

/// Advance the blend and rewrite all particle transforms once per frame.
pub fn animate_field_system(
    time: Res<Time>,
    mode: Res<TreeMode>,
    viewer: Res<Viewer>,
    mut field: ResMut<ParticleField>,
) {
    field.update(*mode, time.delta_secs(), time.elapsed_secs(), viewer.0);
}
