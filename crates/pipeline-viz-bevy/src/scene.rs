//! Scene bootstrap and teardown.
//!
//! Teardown is the one failure-sensitive contract here: every retained
//! mesh and material handle is removed explicitly so nothing survives the
//! root despawn.

use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy_panorbit_camera::PanOrbitCamera;
use tracing::info;

use crate::geometry::{NodeEntities, VizAssets};
use crate::{VizRoot, VizSettings, VizTopology};

pub(crate) const CAMERA_START: Vec3 = Vec3::new(0.0, 6.0, 26.0);

/// Requests a full teardown of the visualization scene.
#[derive(Event, Debug, Default)]
pub struct TeardownViz;

/// Spawn the camera and lights. Orbit controls are attached only when the
/// config asks for interactive rotation; drag panning is handled separately
/// and the two modes are mutually exclusive.
pub fn setup_scene(mut commands: Commands, settings: Res<VizSettings>) {
    let mut camera = commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: 50.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    if settings.interactive && settings.enable_rotation {
        camera.insert(PanOrbitCamera {
            focus: Vec3::ZERO,
            zoom_lower_limit: 5.0,
            zoom_upper_limit: Some(50.0),
            ..default()
        });
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(6.0, 10.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        ..default()
    });
}

/// Despawn the scene graph and release every retained GPU asset.
pub fn handle_teardown(
    mut commands: Commands,
    mut events: EventReader<TeardownViz>,
    roots: Query<Entity, With<VizRoot>>,
    mut assets: ResMut<VizAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let mut despawned = 0;
    for root in &roots {
        commands.entity(root).despawn();
        despawned += 1;
    }
    let released = assets.meshes.len() + assets.materials.len();
    for handle in assets.meshes.drain(..) {
        meshes.remove(&handle);
    }
    for handle in assets.materials.drain(..) {
        materials.remove(&handle);
    }
    commands.remove_resource::<VizTopology>();
    commands.remove_resource::<NodeEntities>();
    info!(despawned, released, "visualization torn down");
}
