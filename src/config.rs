//! Runtime scene configuration loaded from `assets/tree.toml`.
//!
//! [`SceneConfig`] is a Bevy [`Resource`] that mirrors every tunable in
//! [`crate::constants`].  At startup, [`load_scene_config`] reads
//! `assets/tree.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! seed = 42
//! foliage_count = 6000
//! halo_palette = [{ color = "#FFD700" }]
//! ```
//!
//! The configuration is read once; the particle field is generated from it at
//! startup and never rebuilt.

use crate::constants::*;
use crate::error::{require_positive, require_range, SceneError, SceneResult};
use crate::particle::FamilyKind;
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the scene configuration, relative to the working directory.
pub const SCENE_CONFIG_PATH: &str = "assets/tree.toml";

/// One weighted palette colour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteEntry {
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub color: String,
    /// Relative pick weight within the family palette.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl PaletteEntry {
    pub fn new(color: &str, weight: f32) -> Self {
        Self {
            color: color.to_string(),
            weight,
        }
    }

    /// Parse the hex string into a Bevy colour.
    pub fn parse_color(&self) -> SceneResult<Color> {
        Srgba::hex(&self.color)
            .map(Color::from)
            .map_err(|_| SceneError::InvalidColor {
                value: self.color.clone(),
            })
    }
}

/// Shape a family is laid out in while assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formation {
    /// Volume fill of a right cone (see [`crate::formation::cone_point`]).
    Cone { height: f32, base_radius: f32 },
    /// Evenly spaced along a shrinking helix (see [`crate::formation::spiral_point`]).
    Spiral {
        height: f32,
        base_radius: f32,
        turns: f32,
    },
}

/// Borrowed per-family view over [`SceneConfig`].
#[derive(Debug, Clone, Copy)]
pub struct FamilyConfig<'a> {
    pub count: usize,
    pub formation: Formation,
    pub scatter_radius: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub palette: &'a [PaletteEntry],
}

/// Runtime-tunable scene configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset in `assets/tree.toml`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    // ── Layout ────────────────────────────────────────────────────────────────
    /// Fixed seed for the particle layout; `None` draws a fresh one each run.
    pub seed: Option<u64>,

    // ── Animation ─────────────────────────────────────────────────────────────
    pub blend_rate: f32,
    pub rotation_speed: f32,

    // ── Foliage ───────────────────────────────────────────────────────────────
    pub foliage_count: usize,
    pub foliage_cone_height: f32,
    pub foliage_cone_radius: f32,
    pub foliage_scatter_radius: f32,
    pub foliage_scale_min: f32,
    pub foliage_scale_max: f32,
    pub foliage_speed_min: f32,
    pub foliage_speed_max: f32,
    pub foliage_palette: Vec<PaletteEntry>,

    // ── Ornaments ─────────────────────────────────────────────────────────────
    pub ornament_count: usize,
    pub ornament_cone_height: f32,
    pub ornament_cone_radius: f32,
    pub ornament_scatter_radius: f32,
    pub ornament_scale_min: f32,
    pub ornament_scale_max: f32,
    pub ornament_speed_min: f32,
    pub ornament_speed_max: f32,
    pub ornament_palette: Vec<PaletteEntry>,

    // ── Halo ribbon ───────────────────────────────────────────────────────────
    pub halo_count: usize,
    pub halo_spiral_height: f32,
    pub halo_spiral_radius: f32,
    pub halo_spiral_turns: f32,
    pub halo_scatter_radius: f32,
    pub halo_scale_min: f32,
    pub halo_scale_max: f32,
    pub halo_speed_min: f32,
    pub halo_speed_max: f32,
    pub halo_palette: Vec<PaletteEntry>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            // Animation
            blend_rate: BLEND_RATE,
            rotation_speed: TREE_ROTATION_SPEED,
            // Foliage
            foliage_count: FOLIAGE_COUNT,
            foliage_cone_height: FOLIAGE_CONE_HEIGHT,
            foliage_cone_radius: FOLIAGE_CONE_RADIUS,
            foliage_scatter_radius: FOLIAGE_SCATTER_RADIUS,
            foliage_scale_min: FOLIAGE_SCALE_MIN,
            foliage_scale_max: FOLIAGE_SCALE_MAX,
            foliage_speed_min: FOLIAGE_SPEED_MIN,
            foliage_speed_max: FOLIAGE_SPEED_MAX,
            foliage_palette: vec![
                PaletteEntry::new(WARM_ROSE, 0.5),
                PaletteEntry::new(SOFT_CHERRY, 0.5),
            ],
            // Ornaments
            ornament_count: ORNAMENT_COUNT,
            ornament_cone_height: ORNAMENT_CONE_HEIGHT,
            ornament_cone_radius: ORNAMENT_CONE_RADIUS,
            ornament_scatter_radius: ORNAMENT_SCATTER_RADIUS,
            ornament_scale_min: ORNAMENT_SCALE_MIN,
            ornament_scale_max: ORNAMENT_SCALE_MAX,
            ornament_speed_min: ORNAMENT_SPEED_MIN,
            ornament_speed_max: ORNAMENT_SPEED_MAX,
            ornament_palette: vec![
                PaletteEntry::new(CHAMPAGNE_LIGHT, 0.7),
                PaletteEntry::new(WARM_ROSE, 0.3),
            ],
            // Halo
            halo_count: HALO_COUNT,
            halo_spiral_height: HALO_SPIRAL_HEIGHT,
            halo_spiral_radius: HALO_SPIRAL_RADIUS,
            halo_spiral_turns: HALO_SPIRAL_TURNS,
            halo_scatter_radius: HALO_SCATTER_RADIUS,
            halo_scale_min: HALO_SCALE_MIN,
            halo_scale_max: HALO_SCALE_MAX,
            halo_speed_min: HALO_SPEED_MIN,
            halo_speed_max: HALO_SPEED_MAX,
            halo_palette: vec![PaletteEntry::new(CHAMPAGNE_LIGHT, 1.0)],
        }
    }
}

impl SceneConfig {
    /// Per-family view used by [`crate::particle::ParticleFamily::generate`].
    pub fn family(&self, kind: FamilyKind) -> FamilyConfig<'_> {
        match kind {
            FamilyKind::Foliage => FamilyConfig {
                count: self.foliage_count,
                formation: Formation::Cone {
                    height: self.foliage_cone_height,
                    base_radius: self.foliage_cone_radius,
                },
                scatter_radius: self.foliage_scatter_radius,
                scale_min: self.foliage_scale_min,
                scale_max: self.foliage_scale_max,
                speed_min: self.foliage_speed_min,
                speed_max: self.foliage_speed_max,
                palette: &self.foliage_palette,
            },
            FamilyKind::Ornament => FamilyConfig {
                count: self.ornament_count,
                formation: Formation::Cone {
                    height: self.ornament_cone_height,
                    base_radius: self.ornament_cone_radius,
                },
                scatter_radius: self.ornament_scatter_radius,
                scale_min: self.ornament_scale_min,
                scale_max: self.ornament_scale_max,
                speed_min: self.ornament_speed_min,
                speed_max: self.ornament_speed_max,
                palette: &self.ornament_palette,
            },
            FamilyKind::Halo => FamilyConfig {
                count: self.halo_count,
                formation: Formation::Spiral {
                    height: self.halo_spiral_height,
                    base_radius: self.halo_spiral_radius,
                    turns: self.halo_spiral_turns,
                },
                scatter_radius: self.halo_scatter_radius,
                scale_min: self.halo_scale_min,
                scale_max: self.halo_scale_max,
                speed_min: self.halo_speed_min,
                speed_max: self.halo_speed_max,
                palette: &self.halo_palette,
            },
        }
    }

    /// Reject values the samplers cannot turn into a sensible layout.
    ///
    /// Counts may be zero (the family is simply empty).  Geometry, ranges and
    /// palettes must be usable.
    pub fn validate(&self) -> SceneResult<()> {
        require_positive("blend_rate", self.blend_rate)?;
        if !self.rotation_speed.is_finite() {
            return Err(SceneError::InvalidParameter {
                name: "rotation_speed".into(),
                value: self.rotation_speed,
                expected: "finite",
            });
        }

        for kind in FamilyKind::ALL {
            let family = self.family(kind);
            let prefix = kind.config_prefix();
            match family.formation {
                Formation::Cone {
                    height,
                    base_radius,
                } => {
                    require_positive(format!("{prefix}_cone_height"), height)?;
                    require_positive(format!("{prefix}_cone_radius"), base_radius)?;
                }
                Formation::Spiral {
                    height,
                    base_radius,
                    turns,
                } => {
                    require_positive(format!("{prefix}_spiral_height"), height)?;
                    require_positive(format!("{prefix}_spiral_radius"), base_radius)?;
                    require_positive(format!("{prefix}_spiral_turns"), turns)?;
                }
            }
            require_positive(format!("{prefix}_scatter_radius"), family.scatter_radius)?;
            require_range(&format!("{prefix}_scale"), family.scale_min, family.scale_max)?;
            require_range(&format!("{prefix}_speed"), family.speed_min, family.speed_max)?;

            if family.palette.is_empty() {
                return Err(SceneError::InvalidPalette {
                    family: kind.label(),
                    reason: "no colours".into(),
                });
            }
            for entry in family.palette {
                entry.parse_color()?;
                if !entry.weight.is_finite() || entry.weight < 0.0 {
                    return Err(SceneError::InvalidPalette {
                        family: kind.label(),
                        reason: format!(
                            "weight {} for {} must be finite and non-negative",
                            entry.weight, entry.color
                        ),
                    });
                }
            }
            if family.palette.iter().all(|entry| entry.weight == 0.0) {
                return Err(SceneError::InvalidPalette {
                    family: kind.label(),
                    reason: "all weights are zero".into(),
                });
            }
        }
        Ok(())
    }
}

/// Read, parse and validate a scene configuration file.
pub fn load_scene_config_from(path: &str) -> SceneResult<SceneConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| SceneError::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    parse_scene_config(path, &contents)
}

/// Parse and validate TOML text; `path` is only used in error messages.
pub fn parse_scene_config(path: &str, contents: &str) -> SceneResult<SceneConfig> {
    let config =
        toml::from_str::<SceneConfig>(contents).map_err(|e| SceneError::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}

/// Startup system: attempt to load `assets/tree.toml` and overwrite the
/// `SceneConfig` resource with it.
///
/// A missing file is not an error (defaults are already in place from
/// `insert_resource`).  Parse and validation errors are logged and the
/// defaults kept.
pub fn load_scene_config(mut config: ResMut<SceneConfig>) {
    match load_scene_config_from(SCENE_CONFIG_PATH) {
        Ok(loaded) => {
            *config = loaded;
            info!("Loaded scene config from {}", SCENE_CONFIG_PATH);
        }
        Err(SceneError::ConfigRead { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            info!("No {} found; using compiled defaults", SCENE_CONFIG_PATH);
        }
        Err(err) => {
            warn!("{}; using compiled defaults", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SceneConfig::default()
            .validate()
            .expect("compiled defaults must be valid");
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = parse_scene_config(
            "inline",
            "seed = 7\nfoliage_count = 10\nhalo_spiral_turns = 2.0\n",
        )
        .expect("partial config should parse");

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.foliage_count, 10);
        assert_eq!(config.halo_spiral_turns, 2.0);
        assert_eq!(config.ornament_count, ORNAMENT_COUNT);
        assert_eq!(config.blend_rate, BLEND_RATE);
    }

    #[test]
    fn palette_weight_defaults_to_one() {
        let config = parse_scene_config("inline", "halo_palette = [{ color = \"#FFD700\" }]\n")
            .expect("palette without weight should parse");
        assert_eq!(config.halo_palette, vec![PaletteEntry::new("#FFD700", 1.0)]);
    }

    #[test]
    fn bad_hex_colour_is_rejected() {
        let err = parse_scene_config("inline", "foliage_palette = [{ color = \"pinkish\" }]\n")
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidColor { .. }), "got {err}");
    }

    #[test]
    fn empty_palette_is_rejected() {
        let err = parse_scene_config("inline", "ornament_palette = []\n").unwrap_err();
        assert!(matches!(err, SceneError::InvalidPalette { .. }), "got {err}");
    }

    #[test]
    fn non_positive_geometry_is_rejected() {
        let err = parse_scene_config("inline", "foliage_cone_height = 0.0\n").unwrap_err();
        assert!(
            err.to_string().contains("foliage_cone_height"),
            "message should name the key: {err}"
        );
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = parse_scene_config("inline", "foliage_count = \"many\"\n").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { .. }), "got {err}");
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let err = parse_scene_config("inline", "foliage_cout = 10\n").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { .. }), "got {err}");
        assert!(err.to_string().contains("foliage_cout"), "got {err}");
    }

    #[test]
    fn nested_family_table_is_rejected() {
        let err = parse_scene_config("inline", "[foliage]\ncount = 10\n").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { .. }), "got {err}");
    }

    #[test]
    fn unknown_palette_field_is_rejected() {
        let toml = "halo_palette = [{ color = \"#FFD700\", wieght = 2.0 }]\n";
        let err = parse_scene_config("inline", toml).unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { .. }), "got {err}");
    }

    #[test]
    fn nan_weight_is_reported_as_non_finite() {
        let config = SceneConfig {
            halo_palette: vec![PaletteEntry::new("#FFFFFF", f32::NAN)],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SceneError::InvalidPalette { family: "halo", .. }));
        assert!(err.to_string().contains("finite"), "got {err}");
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = load_scene_config_from("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, SceneError::ConfigRead { .. }));
    }

    #[test]
    fn family_view_maps_halo_to_spiral() {
        let config = SceneConfig::default();
        let halo = config.family(FamilyKind::Halo);
        assert_eq!(
            halo.formation,
            Formation::Spiral {
                height: HALO_SPIRAL_HEIGHT,
                base_radius: HALO_SPIRAL_RADIUS,
                turns: HALO_SPIRAL_TURNS,
            }
        );
        assert_eq!(halo.count, HALO_COUNT);
    }
}
