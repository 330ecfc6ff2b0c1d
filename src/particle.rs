//! Particle families: fixed-size, contiguous particle data plus the per-frame
//! transform buffer the animator rewrites in place.
//!
//! A [`ParticleFamily`] owns two parallel vectors of equal length:
//! `particles` (immutable after generation) and `transforms` (overwritten every
//! frame).  Nothing is inserted or removed after [`ParticleFamily::generate`].

use crate::config::{FamilyConfig, Formation};
use crate::error::{SceneError, SceneResult};
use crate::formation::{cone_point, random_range, sphere_point, spiral_point};
use bevy::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// The three particle families that make up the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyKind {
    /// Dense fill of the cone; bobs and slowly tumbles.
    Foliage,
    /// Accent gems on the cone surface; spin and twinkle.
    Ornament,
    /// Star-shaped ribbon spiralling around the tree; faces the viewer.
    Halo,
}

impl FamilyKind {
    /// Update order used by the animator.
    pub const ALL: [FamilyKind; 3] = [FamilyKind::Foliage, FamilyKind::Ornament, FamilyKind::Halo];

    pub fn label(self) -> &'static str {
        match self {
            FamilyKind::Foliage => "foliage",
            FamilyKind::Ornament => "ornaments",
            FamilyKind::Halo => "halo",
        }
    }

    /// Key prefix in `assets/tree.toml`.
    pub fn config_prefix(self) -> &'static str {
        match self {
            FamilyKind::Foliage => "foliage",
            FamilyKind::Ornament => "ornament",
            FamilyKind::Halo => "halo",
        }
    }
}

/// Static per-particle data, fixed at generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in the assembled tree.
    pub assembled: Vec3,
    /// Position in the exploded cloud.
    pub scattered: Vec3,
    /// Base uniform scale.
    pub scale: f32,
    /// Index into the owning family's palette.
    pub color: usize,
    /// Oscillation / rotation rate multiplier.
    pub speed: f32,
}

/// One family of particles and its rendered transform buffer.
#[derive(Debug, Clone)]
pub struct ParticleFamily {
    pub kind: FamilyKind,
    pub particles: Vec<Particle>,
    /// Rendered transforms, index-aligned with `particles`.
    pub transforms: Vec<Transform>,
    /// Distinct colours referenced by [`Particle::color`].
    pub palette: Vec<Color>,
}

impl ParticleFamily {
    /// Lay out `config.count` particles.
    ///
    /// Cone families sample their assembled position randomly; spiral families
    /// walk `t = i / count` so the ribbon is evenly populated.  Every particle
    /// gets an independent scattered position inside the scatter sphere.
    pub fn generate<R: Rng + ?Sized>(
        kind: FamilyKind,
        config: &FamilyConfig<'_>,
        rng: &mut R,
    ) -> SceneResult<Self> {
        let palette = config
            .palette
            .iter()
            .map(|entry| entry.parse_color())
            .collect::<SceneResult<Vec<_>>>()?;
        let picker = WeightedIndex::new(config.palette.iter().map(|entry| entry.weight)).map_err(
            |e| SceneError::InvalidPalette {
                family: kind.label(),
                reason: e.to_string(),
            },
        )?;

        let mut particles = Vec::with_capacity(config.count);
        for i in 0..config.count {
            let assembled = match config.formation {
                Formation::Cone {
                    height,
                    base_radius,
                } => cone_point(rng, height, base_radius),
                Formation::Spiral {
                    height,
                    base_radius,
                    turns,
                } => spiral_point(i as f32 / config.count as f32, height, base_radius, turns),
            };
            let scattered = sphere_point(rng, config.scatter_radius);

            particles.push(Particle {
                assembled,
                scattered,
                scale: random_range(rng, config.scale_min, config.scale_max),
                color: picker.sample(rng),
                speed: random_range(rng, config.speed_min, config.speed_max),
            });
        }

        let transforms = particles
            .iter()
            .map(|p| Transform::from_translation(p.assembled).with_scale(Vec3::splat(p.scale)))
            .collect();

        Ok(Self {
            kind,
            particles,
            transforms,
            palette,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
