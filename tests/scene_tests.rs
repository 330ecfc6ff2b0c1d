//! Headless tests for the particle field plugins.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering, no assets)
//! with a manual time step, so every frame advances exactly 1/60 s.
//!
//! Covered scenarios:
//! 1. Scattered for 2 s pushes progress past 0.99; Assembled for 2 s brings it under 0.01.
//! 2. Particle entities follow the field's transform buffers.
//! 3. A left click toggles the mode exactly once.
//! 4. Without a field resource the animation systems stay idle.
//! 5. The viewer tracks the camera through the root's yaw, and is left alone
//!    when the camera or the root is missing.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use particle_tree::animator::{ParticleField, TreeMode, Viewer};
use particle_tree::config::SceneConfig;
use particle_tree::particle::FamilyKind;
use particle_tree::scene::{
    rotate_tree_root_system, toggle_mode_system, track_viewer_system, ParticleInstance,
    TreeFieldPlugin, TreeRoot, TreeSet, ViewerCamera,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ten foliage particles in a 12 × 4 cone and nothing else.
fn small_config() -> SceneConfig {
    SceneConfig {
        foliage_count: 10,
        foliage_cone_height: 12.0,
        foliage_cone_radius: 4.0,
        ornament_count: 0,
        halo_count: 0,
        ..Default::default()
    }
}

/// Build a headless app stepping at exactly 60 Hz with a seeded field.
///
/// One warm-up update is run because the first frame always reports a zero delta.
fn app_with_field(config: &SceneConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TreeFieldPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    let field = ParticleField::generate(config, &mut StdRng::seed_from_u64(42))
        .expect("small config should generate");
    app.insert_resource(field);
    app.update();
    app
}

/// Headless app with root yaw and viewer tracking but no particle field.
fn app_with_viewer_tracking() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TreeFieldPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    app.insert_resource(SceneConfig::default());
    app.add_systems(
        Update,
        (rotate_tree_root_system, track_viewer_system)
            .chain()
            .in_set(TreeSet::Input),
    );
    app
}

fn spawn_camera(app: &mut App, position: Vec3) {
    app.world_mut().spawn((
        ViewerCamera,
        Transform::from_translation(position),
        GlobalTransform::from_translation(position),
    ));
}

fn set_mode(app: &mut App, mode: TreeMode) {
    *app.world_mut().resource_mut::<TreeMode>() = mode;
}

fn progress(app: &App) -> f32 {
    app.world().resource::<ParticleField>().progress
}

fn advance_seconds(app: &mut App, seconds: u32) {
    for _ in 0..seconds * 60 {
        app.update();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The end-to-end burst and reassembly scenario.
#[test]
fn scatter_then_reassemble_within_two_seconds_each() {
    let mut app = app_with_field(&small_config());
    assert_eq!(progress(&app), 0.0, "field starts assembled");

    set_mode(&mut app, TreeMode::Scattered);
    advance_seconds(&mut app, 2);
    assert!(progress(&app) > 0.99, "got {}", progress(&app));

    set_mode(&mut app, TreeMode::Assembled);
    advance_seconds(&mut app, 2);
    assert!(progress(&app) < 0.01, "got {}", progress(&app));
}

/// Progress climbs monotonically while the mode stays scattered.
#[test]
fn progress_is_monotonic_under_a_constant_target() {
    let mut app = app_with_field(&small_config());
    set_mode(&mut app, TreeMode::Scattered);

    let mut previous = progress(&app);
    for _ in 0..90 {
        app.update();
        let current = progress(&app);
        assert!(current > previous && current <= 1.0);
        previous = current;
    }
}

/// Entities tagged with `ParticleInstance` receive the animator's transforms.
#[test]
fn particle_entities_follow_the_field() {
    let mut app = app_with_field(&small_config());
    let entities: Vec<Entity> = (0..10)
        .map(|index| {
            app.world_mut()
                .spawn((
                    ParticleInstance {
                        family: FamilyKind::Foliage,
                        index,
                    },
                    Transform::default(),
                ))
                .id()
        })
        .collect();

    set_mode(&mut app, TreeMode::Scattered);
    advance_seconds(&mut app, 1);

    let world = app.world();
    let field = world.resource::<ParticleField>();
    for (index, entity) in entities.iter().enumerate() {
        let synced = world.get::<Transform>(*entity).expect("transform present");
        let rendered = field
            .transform(FamilyKind::Foliage, index)
            .expect("foliage slot exists");
        assert_eq!(synced, rendered);
    }
}

/// A single left click flips the mode once.
#[test]
fn left_click_toggles_mode() {
    let mut app = app_with_field(&small_config());
    app.init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_systems(Update, toggle_mode_system.in_set(TreeSet::Input));

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    assert_eq!(*app.world().resource::<TreeMode>(), TreeMode::Scattered);
    assert!(progress(&app) > 0.0, "animation sees the new mode in the same frame");

    // Nothing clears the input here, so reset it by hand before the next frame.
    {
        let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.release(MouseButton::Left);
        mouse.clear();
    }
    app.update();
    assert_eq!(*app.world().resource::<TreeMode>(), TreeMode::Scattered);
}

/// Without a field the plugin still runs; mode and viewer resources exist.
#[test]
fn plugin_is_idle_without_a_field() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TreeFieldPlugin));
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(*app.world().resource::<TreeMode>(), TreeMode::Assembled);
    assert!(app.world().get_resource::<ParticleField>().is_none());
}

/// Half a second of yaw counter-rotates the camera position in root space.
#[test]
fn viewer_follows_camera_through_root_yaw() {
    let mut app = app_with_viewer_tracking();
    let camera = Vec3::new(0.0, 2.0, 28.0);
    spawn_camera(&mut app, camera);
    let root = app
        .world_mut()
        .spawn((TreeRoot, Transform::default()))
        .id();
    app.update();

    for _ in 0..30 {
        app.update();
    }

    let yaw = SceneConfig::default().rotation_speed * 30.0 / 60.0;
    let expected = Quat::from_rotation_y(-yaw) * camera;
    let viewer = app.world().resource::<Viewer>().0;
    assert!(
        viewer.distance(expected) < 1e-3,
        "viewer {viewer} expected {expected}"
    );

    let root_transform = app.world().get::<Transform>(root).expect("root transform");
    assert!(root_transform.rotation.angle_between(Quat::from_rotation_y(yaw)) < 1e-3);
}

/// No camera: the viewer keeps whatever it held.
#[test]
fn viewer_is_untouched_without_a_camera() {
    let mut app = app_with_viewer_tracking();
    let sentinel = Vec3::new(3.0, -1.0, 7.0);
    app.insert_resource(Viewer(sentinel));
    app.world_mut().spawn((TreeRoot, Transform::default()));

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().resource::<Viewer>().0, sentinel);
}

/// No root: the viewer keeps whatever it held.
#[test]
fn viewer_is_untouched_without_a_root() {
    let mut app = app_with_viewer_tracking();
    let sentinel = Vec3::new(3.0, -1.0, 7.0);
    app.insert_resource(Viewer(sentinel));
    spawn_camera(&mut app, Vec3::new(0.0, 2.0, 28.0));

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().resource::<Viewer>().0, sentinel);
}
