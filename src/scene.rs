//! Scene host: spawns one entity per particle under a slowly turning root,
//! flips the mode on click, and copies the animator's transform buffers onto
//! the entities each frame.
//!
//! ## Plugins
//!
//! | Plugin            | Needs window/render | Registers                                    |
//! |-------------------|---------------------|----------------------------------------------|
//! | `TreeFieldPlugin` | no                  | `TreeMode`, `Viewer`, animation + sync       |
//! | `TreeScenePlugin` | yes                 | input toggle, root yaw, viewer tracking, star |
//!
//! ## Frame order (all `Update`)
//!
//! | Set              | Systems                                                      |
//! |------------------|--------------------------------------------------------------|
//! | `TreeSet::Input` | `toggle_mode_system`, `rotate_tree_root_system` → `track_viewer_system` |
//! | `TreeSet::Animate` | `animate_field_system`                                     |
//! | `TreeSet::Sync`  | `sync_instance_transforms_system`, `star_float_system`       |

use crate::animator::{animate_field_system, ParticleField, TreeMode, Viewer};
use crate::config::SceneConfig;
use crate::constants::*;
use crate::geometry::{extruded_star_mesh, octahedron_mesh, star_mesh};
use crate::particle::FamilyKind;
use crate::star::{star_float_system, star_material, star_pose, TreeStar};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Components ───────────────────────────────────────────────────────────────

/// Group entity every particle and the star hang from.
#[derive(Component, Debug, Clone, Copy)]
pub struct TreeRoot;

/// The camera whose position the halo family faces.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewerCamera;

/// Links a rendered entity to its slot in the [`ParticleField`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleInstance {
    pub family: FamilyKind,
    pub index: usize,
}

// ── Ordering ─────────────────────────────────────────────────────────────────

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeSet {
    Input,
    Animate,
    Sync,
}

// ── Plugins ──────────────────────────────────────────────────────────────────

/// Headless core: mode, viewer, animation, and the buffer → entity sync.
///
/// The animation systems stay idle until a [`ParticleField`] resource exists.
pub struct TreeFieldPlugin;

impl Plugin for TreeFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TreeMode>()
            .init_resource::<Viewer>()
            .configure_sets(
                Update,
                (TreeSet::Input, TreeSet::Animate, TreeSet::Sync).chain(),
            )
            .add_systems(
                Update,
                (
                    animate_field_system.in_set(TreeSet::Animate),
                    sync_instance_transforms_system.in_set(TreeSet::Sync),
                )
                    .run_if(resource_exists::<ParticleField>),
            );
    }
}

/// Interactive host: click toggle, group rotation, camera-relative viewer, star.
pub struct TreeScenePlugin;

impl Plugin for TreeScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                toggle_mode_system,
                (rotate_tree_root_system, track_viewer_system).chain(),
            )
                .in_set(TreeSet::Input),
        )
        .add_systems(Update, star_float_system.in_set(TreeSet::Sync));
    }
}

// ── Startup ──────────────────────────────────────────────────────────────────

/// Generate the particle field from [`SceneConfig`] and spawn its entities.
///
/// Each family shares one mesh; each palette colour gets one material, so
/// Bevy batches every family into a handful of draw calls.
pub fn spawn_tree_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let field = match ParticleField::generate(&config, &mut rng) {
        Ok(field) => field,
        Err(err) => {
            error!("Failed to generate particle field: {}", err);
            return;
        }
    };
    info!(
        "Generated particle field: {} foliage, {} ornaments, {} halo",
        config.foliage_count, config.ornament_count, config.halo_count
    );

    commands
        .spawn((TreeRoot, Transform::default(), Visibility::default()))
        .with_children(|root| {
            for family in &field.families {
                let mesh = meshes.add(family_mesh(family.kind));
                let palette: Vec<Handle<StandardMaterial>> = family
                    .palette
                    .iter()
                    .map(|color| materials.add(family_material(family.kind, *color)))
                    .collect();

                for (index, (particle, transform)) in
                    family.particles.iter().zip(&family.transforms).enumerate()
                {
                    let Some(material) = palette.get(particle.color) else {
                        continue;
                    };
                    root.spawn((
                        ParticleInstance {
                            family: family.kind,
                            index,
                        },
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        *transform,
                    ));
                }
            }

            root.spawn((
                TreeStar,
                Mesh3d(meshes.add(extruded_star_mesh(
                    STAR_POINTS,
                    STAR_OUTER_RADIUS,
                    STAR_INNER_RADIUS,
                    STAR_DEPTH,
                ))),
                MeshMaterial3d(materials.add(star_material())),
                star_pose(0.0),
            ));
        });

    info!("[SETUP] Tree spawned with {} particles", field.particle_count());
    commands.insert_resource(field);
}

fn family_mesh(kind: FamilyKind) -> Mesh {
    match kind {
        FamilyKind::Foliage => octahedron_mesh(1.0),
        FamilyKind::Ornament => Sphere::new(1.0)
            .mesh()
            .ico(0)
            .unwrap_or_else(|_| Sphere::new(1.0).mesh().uv(8, 6)),
        FamilyKind::Halo => star_mesh(STAR_POINTS, 1.0, 0.4),
    }
}

fn family_material(kind: FamilyKind, color: Color) -> StandardMaterial {
    match kind {
        FamilyKind::Foliage => StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 0.3,
            metallic: 0.6,
            perceptual_roughness: 0.4,
            ..default()
        },
        FamilyKind::Ornament => StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 0.5,
            metallic: 0.9,
            perceptual_roughness: 0.1,
            ..default()
        },
        FamilyKind::Halo => StandardMaterial {
            base_color: color,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        },
    }
}

// ── Update systems ───────────────────────────────────────────────────────────

/// Left click (or Space) flips between assembled and scattered.
pub fn toggle_mode_system(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<TreeMode>,
) {
    if mouse.just_pressed(MouseButton::Left) || keys.just_pressed(KeyCode::Space) {
        mode.toggle();
        info!("Tree mode → {:?}", *mode);
    }
}

/// Constant yaw of the whole tree, independent of the mode.
pub fn rotate_tree_root_system(
    time: Res<Time>,
    config: Res<SceneConfig>,
    mut roots: Query<&mut Transform, With<TreeRoot>>,
) {
    let angle = config.rotation_speed * time.delta_secs();
    for mut transform in roots.iter_mut() {
        transform.rotate_y(angle);
    }
}

/// Express the camera position in the tree's local space for the halo family.
///
/// Reads the root's local `Transform` (it has no parent), so this frame's yaw
/// is already included.  Leaves [`Viewer`] as it was when either the camera or
/// the root is missing.
pub fn track_viewer_system(
    cameras: Query<&GlobalTransform, With<ViewerCamera>>,
    roots: Query<&Transform, With<TreeRoot>>,
    mut viewer: ResMut<Viewer>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let Ok(root) = roots.single() else {
        return;
    };
    viewer.0 = viewer_in_local_space(root, camera.translation());
}

/// Inverse of `root` applied to a world-space point.
pub fn viewer_in_local_space(root: &Transform, world: Vec3) -> Vec3 {
    root.compute_affine().inverse().transform_point3(world)
}

/// Copy each particle's rendered transform onto its entity.
pub fn sync_instance_transforms_system(
    field: Res<ParticleField>,
    mut query: Query<(&ParticleInstance, &mut Transform)>,
) {
    for (instance, mut transform) in query.iter_mut() {
        if let Some(rendered) = field.transform(instance.family, instance.index) {
            *transform = *rendered;
        }
    }
}
