//! Gold star on top of the tree: floats and slowly turns, independent of the
//! assembled/scattered mode.

use crate::constants::{STAR_HEIGHT, WARM_YELLOW};
use bevy::prelude::*;

/// Marker for the star topper entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct TreeStar;

/// Star transform at `elapsed` seconds.
///
/// Yaw `0.5·t`, a ±0.1 rad rock about Z, and a ±0.2 bob around
/// [`STAR_HEIGHT`].
pub fn star_pose(elapsed: f32) -> Transform {
    Transform::from_xyz(0.0, STAR_HEIGHT + (elapsed * 2.0).sin() * 0.2, 0.0).with_rotation(
        Quat::from_euler(EulerRot::XYZ, 0.0, elapsed * 0.5, elapsed.sin() * 0.1),
    )
}

/// Emissive gold material; bright enough to read as a light source.
pub fn star_material() -> StandardMaterial {
    let gold = Srgba::hex(WARM_YELLOW).map(Color::from).unwrap_or(Color::srgb(1.0, 0.84, 0.0));
    StandardMaterial {
        base_color: gold,
        emissive: LinearRgba::from(gold) * 2.1,
        ..default()
    }
}

/// Apply [`star_pose`] every frame.
pub fn star_float_system(time: Res<Time>, mut query: Query<&mut Transform, With<TreeStar>>) {
    let pose = star_pose(time.elapsed_secs());
    for mut transform in query.iter_mut() {
        *transform = pose;
    }
}
