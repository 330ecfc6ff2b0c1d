use crate::constants::{CAMERA_FOV_DEGREES, CAMERA_POSITION};
use crate::scene::ViewerCamera;
use bevy::prelude::*;

/// Spawn the perspective camera looking at the tree.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        ViewerCamera,
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(CAMERA_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
    info!("[SETUP] Camera spawned");
}

/// Warm key light, champagne fill, and a soft uplight under the tree.
pub fn setup_lights(mut commands: Commands) {
    commands.spawn((
        SpotLight {
            color: Color::srgb_u8(0xF0, 0x62, 0x92),
            intensity: 3_000_000.0,
            range: 50.0,
            outer_angle: 0.5,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        SpotLight {
            color: Color::srgb_u8(0xFF, 0xDA, 0xB9),
            intensity: 2_200_000.0,
            range: 50.0,
            outer_angle: 0.6,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 8.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xFF, 0xF5, 0xE1),
            intensity: 1_200_000.0,
            range: 20.0,
            ..default()
        },
        Transform::from_xyz(0.0, -5.0, 5.0),
    ));
    info!("[SETUP] Lights spawned");
}
