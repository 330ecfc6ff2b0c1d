//! Centralised scene constants.
//!
//! Every default that [`crate::config::SceneConfig`] falls back to lives here,
//! so the look of the tree can be reasoned about in one place.
//!
//! ## Tuning guidance
//!
//! Counts drive frame cost linearly (one entity per particle).  Geometry values
//! are in world units; the camera sits 28 units in front of the origin, so the
//! assembled tree fills roughly half the viewport height.

// ── Animation ─────────────────────────────────────────────────────────────────

/// Rate constant `k` of the progress filter, in 1/s.
///
/// `progress` closes `1 − e^(−k·Δt)` of the remaining distance each frame.
/// At 2.5 a full burst visually settles in about 1.5 s.
pub const BLEND_RATE: f32 = 2.5;

/// Constant yaw of the whole tree group (rad/s), independent of the mode.
pub const TREE_ROTATION_SPEED: f32 = 0.1;

/// Radial floor added to the spiral radius so the ribbon tip stays off the axis.
pub const SPIRAL_RADIUS_OFFSET: f32 = 0.5;

/// Amplitude of every family's positional wobble (world units).
///
/// Secondary motion never moves a particle further than `WOBBLE_AMPLITUDE·√3`
/// from its interpolated position.
pub const WOBBLE_AMPLITUDE: f32 = 0.05;

/// Fraction by which foliage shrinks when fully scattered.
pub const FOLIAGE_SCATTER_SHRINK: f32 = 0.3;

/// Relative amplitude of the ornament scale twinkle.
pub const ORNAMENT_TWINKLE: f32 = 0.2;

/// Angular frequency of the ornament twinkle (rad/s).
pub const ORNAMENT_TWINKLE_FREQ: f32 = 5.0;

/// Angular frequency of the halo flow wobble (rad/s).
pub const HALO_FLOW_FREQ: f32 = 3.0;

/// Phase step between neighbouring halo particles.
pub const HALO_FLOW_PHASE_STEP: f32 = 0.1;

// ── Palette ───────────────────────────────────────────────────────────────────

/// Deep warm rose.
pub const WARM_ROSE: &str = "#E63968";

/// Soft cherry-blossom pink.
pub const SOFT_CHERRY: &str = "#FF9EAA";

/// Warm champagne white.
pub const CHAMPAGNE_LIGHT: &str = "#FFF0D4";

/// Gold used by the star topper.
pub const WARM_YELLOW: &str = "#FFD700";

// ── Foliage (dense fill) ──────────────────────────────────────────────────────

pub const FOLIAGE_COUNT: usize = 18_000;
pub const FOLIAGE_CONE_HEIGHT: f32 = 12.0;
pub const FOLIAGE_CONE_RADIUS: f32 = 4.0;
pub const FOLIAGE_SCATTER_RADIUS: f32 = 15.0;
pub const FOLIAGE_SCALE_MIN: f32 = 0.015;
pub const FOLIAGE_SCALE_MAX: f32 = 0.05;
pub const FOLIAGE_SPEED_MIN: f32 = 0.2;
pub const FOLIAGE_SPEED_MAX: f32 = 1.0;

// ── Ornaments (accent) ────────────────────────────────────────────────────────

pub const ORNAMENT_COUNT: usize = 3_000;
pub const ORNAMENT_CONE_HEIGHT: f32 = 12.0;
/// Slightly wider than the foliage cone so gems sit on the surface.
pub const ORNAMENT_CONE_RADIUS: f32 = 4.2;
pub const ORNAMENT_SCATTER_RADIUS: f32 = 20.0;
pub const ORNAMENT_SCALE_MIN: f32 = 0.04;
pub const ORNAMENT_SCALE_MAX: f32 = 0.08;
pub const ORNAMENT_SPEED_MIN: f32 = 0.5;
pub const ORNAMENT_SPEED_MAX: f32 = 1.5;

// ── Halo ribbon ───────────────────────────────────────────────────────────────

pub const HALO_COUNT: usize = 2_000;
pub const HALO_SPIRAL_HEIGHT: f32 = 13.0;
pub const HALO_SPIRAL_RADIUS: f32 = 5.5;
pub const HALO_SPIRAL_TURNS: f32 = 3.5;
pub const HALO_SCATTER_RADIUS: f32 = 25.0;
pub const HALO_SCALE_MIN: f32 = 0.05;
pub const HALO_SCALE_MAX: f32 = 0.12;
pub const HALO_SPEED_MIN: f32 = 1.0;
pub const HALO_SPEED_MAX: f32 = 3.0;

// ── Star topper ───────────────────────────────────────────────────────────────

/// Resting height of the star above the tree origin.
pub const STAR_HEIGHT: f32 = 6.5;
pub const STAR_OUTER_RADIUS: f32 = 0.8;
pub const STAR_INNER_RADIUS: f32 = 0.4;
pub const STAR_DEPTH: f32 = 0.2;
pub const STAR_POINTS: usize = 5;

// ── Camera ────────────────────────────────────────────────────────────────────

pub const CAMERA_POSITION: [f32; 3] = [0.0, 2.0, 28.0];
pub const CAMERA_FOV_DEGREES: f32 = 50.0;
