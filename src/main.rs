use bevy::prelude::*;
use bevy::window::WindowResolution;

use particle_tree::config::{self, SceneConfig};
use particle_tree::graphics;
use particle_tree::scene::{self, TreeFieldPlugin, TreeScenePlugin};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Particle Tree".into(),
            resolution: WindowResolution::new(1200, 800),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb_u8(0x05, 0x01, 0x03)))
    // Insert SceneConfig with compiled defaults; load_scene_config will
    // overwrite it from assets/tree.toml (if present) in the Startup schedule.
    .insert_resource(SceneConfig::default())
    .add_plugins((TreeFieldPlugin, TreeScenePlugin))
    .add_systems(
        Startup,
        (
            // Load config first so the field is generated from the final values.
            config::load_scene_config,
            graphics::setup_camera,
            graphics::setup_lights,
            scene::spawn_tree_scene.after(config::load_scene_config),
        ),
    );

    app.run();
}
